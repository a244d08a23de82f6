use crate::datashape::Dim;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when shapes cannot be combined or an axis does not exist.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ShapeError {
    /// Two dimensions aligned at the same (trailing) position differ and neither is `1`.
    #[error("Cannot broadcast dimension `{left}` against `{right}` at position `{position}`")]
    Mismatch {
        left: Dim,
        right: Dim,
        position: usize,
    },
    /// A reduction axis is not one of the input dimensions.
    #[error("Axis `{axis}` is out of range for an input with `{ndim}` dimension(s)")]
    AxisOutOfRange { axis: usize, ndim: usize },
    /// The operation only makes sense over a collection.
    #[error("Operation `{operation}` requires a collection, but got `{dshape}`")]
    NotACollection { operation: String, dshape: String },
}
