use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar unit types admissible as (part of) a measure.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Date,
    Time,
    DateTime,
}

impl ScalarType {
    /// The default integer type (`int32`).
    pub const INT: ScalarType = ScalarType::Int32;
    /// The default real type (`float64`).
    pub const REAL: ScalarType = ScalarType::Float64;

    #[must_use]
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            ScalarType::Int8 | ScalarType::Int16 | ScalarType::Int32 | ScalarType::Int64
        )
    }

    #[must_use]
    pub fn is_floating(&self) -> bool {
        matches!(self, ScalarType::Float32 | ScalarType::Float64)
    }

    /// Integral or floating. Note that `bool` is not numeric.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.is_integral() || self.is_floating()
    }

    #[must_use]
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            ScalarType::Date | ScalarType::Time | ScalarType::DateTime
        )
    }

    /// Bit width of numeric types, used to pick the wider type during promotion.
    fn width(&self) -> Option<u8> {
        match self {
            ScalarType::Int8 => Some(8),
            ScalarType::Int16 => Some(16),
            ScalarType::Int32 | ScalarType::Float32 => Some(32),
            ScalarType::Int64 | ScalarType::Float64 => Some(64),
            _ => None,
        }
    }

    /// Promote two numeric types to a common type: a floating type beats an integral one,
    /// within the same family the wider type wins.
    ///
    /// Returns `None` if one of the types is not numeric.
    #[must_use]
    pub fn promote(self, other: ScalarType) -> Option<ScalarType> {
        let (left, right) = (self.width()?, other.width()?);
        let result = match (self.is_floating(), other.is_floating()) {
            (true, false) => self,
            (false, true) => other,
            _ if left >= right => self,
            _ => other,
        };
        Some(result)
    }

    /// The floating type used for true division over this type.
    #[must_use]
    pub fn to_floating(self) -> ScalarType {
        if self.is_floating() {
            self
        } else {
            ScalarType::REAL
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::Bool => "bool",
            ScalarType::Int8 => "int8",
            ScalarType::Int16 => "int16",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Float32 => "float32",
            ScalarType::Float64 => "float64",
            ScalarType::String => "string",
            ScalarType::Date => "date",
            ScalarType::Time => "time",
            ScalarType::DateTime => "datetime",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use crate::datashape::ScalarType;

    #[test]
    fn promotion_prefers_floating_then_width() {
        use ScalarType::*;
        assert_eq!(Int32.promote(Int64), Some(Int64));
        assert_eq!(Int64.promote(Float32), Some(Float32));
        assert_eq!(Float32.promote(Float64), Some(Float64));
        assert_eq!(Int8.promote(Int8), Some(Int8));
        assert_eq!(Bool.promote(Int32), None);
        assert_eq!(String.promote(String), None);
    }

    #[test]
    fn numeric_predicates() {
        assert!(ScalarType::Int16.is_numeric());
        assert!(ScalarType::Float32.is_floating());
        assert!(!ScalarType::Bool.is_numeric());
        assert!(ScalarType::DateTime.is_temporal());
        assert_eq!(ScalarType::Int64.to_floating(), ScalarType::Float64);
        assert_eq!(ScalarType::Float32.to_floating(), ScalarType::Float32);
    }
}
