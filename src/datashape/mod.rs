//! The shape/type layer: a dimension vector paired with a measure (per-element) type.
//!
//! Expressions never look at data, they only combine [`DataShape`] values using
//! the predicates and the [`max_shape`] broadcasting rule defined here.

mod data_shape;
mod dim;
mod max_shape;
mod measure;
mod scalar_type;
mod shape_error;

pub use data_shape::DataShape;
pub use dim::Dim;
pub use max_shape::max_shape;
pub use measure::Measure;
pub use scalar_type::ScalarType;
pub use shape_error::ShapeError;
