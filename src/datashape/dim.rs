use serde::{Deserialize, Serialize};
use std::fmt;

/// A single dimension of a [`crate::datashape::DataShape`].
///
/// A dimension is either a fixed size known at construction time, or `Var`, a collection
/// whose length is only known once the expression is evaluated (e.g. the rows of a table,
/// or the result of a grouping).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Dim {
    Fixed(usize),
    Var,
}

impl Dim {
    /// True if this is a fixed dimension of size `1`, which broadcasts against anything.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        matches!(self, Dim::Fixed(1))
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dim::Fixed(size) => write!(f, "{size}"),
            Dim::Var => write!(f, "var"),
        }
    }
}

impl From<usize> for Dim {
    fn from(value: usize) -> Self {
        Dim::Fixed(value)
    }
}
