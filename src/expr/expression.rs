use crate::datashape::{DataShape, Dim, Measure};
use crate::expr::_impl_dshape::derive_dshape;
use crate::expr::{ExprError, ExprKind, ExprNodeData};
use crate::utils::{parenthesize, tuple_str};
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// A node of an expression tree together with its derived [`DataShape`].
///
/// The shape is computed once, when the node is created, so it is always consistent
/// with the node data.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct ExprNode {
    data: ExprNodeData,
    dshape: DataShape,
}

/// A wrapper type that stores [`ExprNode`] using an atomic reference counter
/// such that it can be safely cloned without data duplication, or shared between threads.
///
/// Expressions are immutable. Every transformation (substitution, fusion) produces a new
/// tree which shares all unchanged sub-trees with the original.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Expr(Arc<ExprNode>);

/// Utility data access.
impl Expr {
    /// Get a reference to the underlying [`ExprNodeData`].
    #[must_use]
    pub fn as_data(&self) -> &ExprNodeData {
        &self.0.data
    }

    #[must_use]
    pub fn kind(&self) -> ExprKind {
        self.as_data().kind()
    }

    #[must_use]
    pub fn dshape(&self) -> &DataShape {
        &self.0.dshape
    }

    #[must_use]
    pub fn shape(&self) -> &[Dim] {
        self.dshape().dims()
    }

    #[must_use]
    pub fn ndim(&self) -> usize {
        self.dshape().ndim()
    }

    #[must_use]
    pub fn measure(&self) -> &Measure {
        self.dshape().measure()
    }

    /// The per-element shape of this expression.
    #[must_use]
    pub fn schema(&self) -> DataShape {
        self.dshape().schema()
    }

    /// True if both expressions point to the same shared node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Expr) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Expr {
    /// Create a new expression node, deriving (and validating) its data shape.
    pub fn from_data(data: ExprNodeData) -> Result<Expr, ExprError> {
        let dshape = derive_dshape(&data)?;
        Ok(Expr(Arc::new(ExprNode { data, dshape })))
    }

    /// Create a node with the given shape, skipping the derivation.
    #[cfg(test)]
    pub(crate) fn from_parts_unchecked(data: ExprNodeData, dshape: DataShape) -> Expr {
        Expr(Arc::new(ExprNode { data, dshape }))
    }

    /// Create a named placeholder bound to the given data shape.
    ///
    /// See also [`ExprNodeData::Symbol`].
    #[must_use]
    pub fn symbol<S: Into<String>>(name: S, dshape: DataShape) -> Expr {
        let data = ExprNodeData::Symbol {
            name: name.into(),
            dshape: dshape.clone(),
        };
        Expr(Arc::new(ExprNode { data, dshape }))
    }
}

impl AsRef<ExprNodeData> for Expr {
    fn as_ref(&self) -> &ExprNodeData {
        self.as_data()
    }
}

impl TryFrom<ExprNodeData> for Expr {
    type Error = ExprError;

    fn try_from(value: ExprNodeData) -> Result<Self, Self::Error> {
        Expr::from_data(value)
    }
}

/// Canonical string form of an expression. It is used to order expressions
/// deterministically, so it must not depend on anything but the tree structure.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.as_data() {
            ExprNodeData::Symbol { name, .. } => write!(f, "{name}"),
            ExprNodeData::Literal(value) => write!(f, "{value}"),
            ExprNodeData::BinOp { op, lhs, rhs } => {
                let (lhs, rhs) = (lhs.to_string(), rhs.to_string());
                write!(f, "{} {op} {}", parenthesize(&lhs), parenthesize(&rhs))
            }
            ExprNodeData::UnaryOp { op, child } => {
                write!(f, "{op}{}", parenthesize(&child.to_string()))
            }
            ExprNodeData::Math { func, child } => write!(f, "{func}({child})"),
            ExprNodeData::Field { child, name } => {
                write!(f, "{}.{name}", parenthesize(&child.to_string()))
            }
            ExprNodeData::Map { child, func, .. } => {
                write!(f, "{}.map({func})", parenthesize(&child.to_string()))
            }
            ExprNodeData::DateTime { child, part } => {
                write!(f, "{}.{part}", parenthesize(&child.to_string()))
            }
            ExprNodeData::Broadcast {
                children,
                scalars,
                scalar_expr,
            } => write!(
                f,
                "Broadcast(_children={}, _scalars={}, _scalar_expr={scalar_expr})",
                tuple_str(children),
                tuple_str(scalars)
            ),
            ExprNodeData::Reduction {
                op,
                child,
                axis,
                keepdims,
            } => {
                write!(f, "{}({child}", op.symbol())?;
                if *axis != (0..child.ndim()).collect::<Vec<_>>() {
                    write!(f, ", axis={}", tuple_str(axis))?;
                }
                if *keepdims {
                    write!(f, ", keepdims=True")?;
                }
                if let Some(unbiased) = op.unbiased() {
                    write!(f, ", unbiased={}", if unbiased { "True" } else { "False" })?;
                }
                write!(f, ")")
            }
            ExprNodeData::Summary {
                names,
                values,
                keepdims,
                ..
            } => {
                write!(f, "summary(")?;
                for (name, value) in names.iter().zip(values) {
                    write!(f, "{name}={value}, ")?;
                }
                write!(f, "keepdims={})", if *keepdims { "True" } else { "False" })
            }
            ExprNodeData::By { grouper, apply, .. } => write!(f, "by({grouper}, {apply})"),
            ExprNodeData::Sort {
                child,
                key,
                ascending,
            } => {
                write!(f, "sort({child}")?;
                if let Some(key) = key {
                    write!(f, ", {key:?}")?;
                }
                write!(f, ", ascending={})", if *ascending { "True" } else { "False" })
            }
            ExprNodeData::Distinct { child } => write!(f, "distinct({child})"),
        }
    }
}

impl Serialize for Expr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}
