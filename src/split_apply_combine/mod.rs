//! Split-apply-combine: grouping a collection by a key and aggregating each group.

mod by;

pub use by::{by, by_named, count_values};
pub(crate) use by::by_dshape;
