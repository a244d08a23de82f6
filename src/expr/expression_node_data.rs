use crate::datashape::{DataShape, Measure};
use crate::expr::{BinaryOp, DateTimePart, Expr, ExprKind, LiteralValue, MathFn, UnaryOp};
use crate::reductions::ReductionOp;
use serde::Serialize;
use serde_with::skip_serializing_none;

/// Enum of possible node types in an expression tree.
///
/// In particular, a node can be:
///     - A leaf: a named [`ExprNodeData::Symbol`] or a constant [`ExprNodeData::Literal`].
///     - An element-wise operation: `BinOp`, `UnaryOp`, `Math`, `Field`, `Map`, `DateTime`.
///     - A fused [`ExprNodeData::Broadcast`] of a scalar expression over collection leaves.
///     - An aggregation: `Reduction` or `Summary` (a record of named reductions).
///     - A grouping [`ExprNodeData::By`] of an apply expression over a grouper.
///     - A whole-collection operation: `Sort` or `Distinct`.
#[skip_serializing_none]
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum ExprNodeData {
    Symbol {
        name: String,
        dshape: DataShape,
    },
    Literal(LiteralValue),
    BinOp {
        op: BinaryOp,
        lhs: Expr,
        rhs: Expr,
    },
    UnaryOp {
        op: UnaryOp,
        child: Expr,
    },
    Math {
        func: MathFn,
        child: Expr,
    },
    Field {
        child: Expr,
        name: String,
    },
    Map {
        child: Expr,
        func: String,
        schema: Measure,
    },
    DateTime {
        child: Expr,
        part: DateTimePart,
    },
    /// Invariant: `children.len() == scalars.len()` and `scalar_expr` only refers
    /// to the `scalars` placeholders.
    Broadcast {
        children: Vec<Expr>,
        scalars: Vec<Expr>,
        scalar_expr: Expr,
    },
    Reduction {
        op: ReductionOp,
        child: Expr,
        axis: Vec<usize>,
        keepdims: bool,
    },
    /// Invariant: `names` are sorted and unique, `names.len() == values.len()`.
    Summary {
        child: Expr,
        names: Vec<String>,
        values: Vec<Expr>,
        keepdims: bool,
    },
    /// The `child` is derived from `grouper` and `apply`, see
    /// [`crate::expr::common_subexpression`].
    By {
        grouper: Expr,
        apply: Expr,
        child: Expr,
    },
    Sort {
        child: Expr,
        key: Option<String>,
        ascending: bool,
    },
    Distinct {
        child: Expr,
    },
}

impl ExprNodeData {
    #[must_use]
    pub fn kind(&self) -> ExprKind {
        match self {
            ExprNodeData::Symbol { .. } => ExprKind::Symbol,
            ExprNodeData::Literal(_) => ExprKind::Literal,
            ExprNodeData::BinOp { .. } | ExprNodeData::UnaryOp { .. } => ExprKind::Arithmetic,
            ExprNodeData::Math { .. } => ExprKind::Math,
            ExprNodeData::Field { .. } => ExprKind::Field,
            ExprNodeData::Map { .. } => ExprKind::Map,
            ExprNodeData::DateTime { .. } => ExprKind::DateTime,
            ExprNodeData::Broadcast { .. } => ExprKind::Broadcast,
            ExprNodeData::Reduction { .. } => ExprKind::Reduction,
            ExprNodeData::Summary { .. } => ExprKind::Summary,
            ExprNodeData::By { .. } => ExprKind::By,
            ExprNodeData::Sort { .. } => ExprKind::Sort,
            ExprNodeData::Distinct { .. } => ExprKind::Distinct,
        }
    }
}
