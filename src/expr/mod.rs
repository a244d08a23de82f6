//! The expression node model: an immutable, shape-annotated tree of operations
//! over named collections.

mod _impl_children;
pub(crate) mod _impl_dshape;
mod _impl_name;
mod _impl_substitute;
mod _impl_validation;
mod collection_ops;
mod common_subexpression;
mod elemwise;
mod expression;
mod expression_enums;
mod expression_error;
mod expression_node_data;

pub use common_subexpression::common_subexpression;
pub use expression::{Expr, ExprNode};
pub use expression_enums::{
    BinaryOp, BooleanFn, DateTimePart, ExprKind, IntegerFn, LiteralValue, MathFn, RealFn, UnaryOp,
};
pub use expression_error::ExprError;
pub use expression_node_data::ExprNodeData;

#[cfg(test)]
pub(crate) mod tests {
    use crate::datashape::{DataShape, Dim, Measure, ScalarType};
    use crate::expr::Expr;

    /// `t: var * {name: string, amount: int32, id: int32}`
    pub fn accounts() -> Expr {
        Expr::symbol(
            "t",
            DataShape::var(Measure::record(vec![
                ("name", ScalarType::String.into()),
                ("amount", ScalarType::Int32.into()),
                ("id", ScalarType::Int32.into()),
            ])),
        )
    }

    /// `t: 100 * {x: int32, y: int32}`
    pub fn points() -> Expr {
        Expr::symbol(
            "t",
            DataShape::new(
                vec![Dim::Fixed(100)],
                Measure::record(vec![
                    ("x", ScalarType::Int32.into()),
                    ("y", ScalarType::Int32.into()),
                ]),
            ),
        )
    }

    pub fn vector(name: &str, len: usize, scalar: ScalarType) -> Expr {
        Expr::symbol(name, DataShape::fixed(len, scalar))
    }
}
