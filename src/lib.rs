//! Backend-independent symbolic expressions over shaped tabular data.
//!
//! An [`Expr`] tree describes a computation over named collections ([`Expr::symbol`])
//! without touching any data. Every node knows its [`DataShape`], derived and checked
//! when the node is created. The [`broadcast`] module rewrites chains of element-wise
//! operations into fused `Broadcast` nodes for single-pass evaluation.

pub mod broadcast;
pub mod capability;
pub mod datashape;
pub mod expr;
pub mod reductions;
pub mod split_apply_combine;
pub mod traits;
pub mod utils;
pub mod validation;

pub use capability::{CapabilityTable, Operation};
pub use datashape::{DataShape, Dim, Measure, ScalarType, ShapeError};
pub use expr::{Expr, ExprError, ExprKind, ExprNodeData, common_subexpression};
pub use reductions::{ReductionOp, summary};
pub use split_apply_combine::{by, by_named, count_values};
