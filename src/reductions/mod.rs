//! Aggregations: column-wise reductions and named summaries of several reductions.

mod reduction;
mod reduction_op;
mod summary;

pub(crate) use reduction::reduction_dshape;
pub use reduction_op::ReductionOp;
pub use summary::summary;
pub(crate) use summary::summary_dshape;
