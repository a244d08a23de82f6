use crate::datashape::{Dim, Measure, ScalarType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (dimension vector, measure type) pair describing the result of an expression.
///
/// An empty dimension vector describes a scalar (a single element of the measure type),
/// anything else describes a collection.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct DataShape {
    dims: Vec<Dim>,
    measure: Measure,
}

impl DataShape {
    #[must_use]
    pub fn new(dims: Vec<Dim>, measure: Measure) -> DataShape {
        DataShape { dims, measure }
    }

    /// A shape with no dimensions.
    #[must_use]
    pub fn scalar<M: Into<Measure>>(measure: M) -> DataShape {
        DataShape::new(Vec::new(), measure.into())
    }

    /// A one-dimensional collection of fixed length.
    #[must_use]
    pub fn fixed<M: Into<Measure>>(len: usize, measure: M) -> DataShape {
        DataShape::new(vec![Dim::Fixed(len)], measure.into())
    }

    /// A one-dimensional collection of unknown length (`var * measure`).
    #[must_use]
    pub fn var<M: Into<Measure>>(measure: M) -> DataShape {
        DataShape::new(vec![Dim::Var], measure.into())
    }

    #[must_use]
    pub fn dims(&self) -> &[Dim] {
        &self.dims
    }

    #[must_use]
    pub fn measure(&self) -> &Measure {
        &self.measure
    }

    #[must_use]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// The per-element shape (this shape without its dimensions).
    #[must_use]
    pub fn schema(&self) -> DataShape {
        DataShape::scalar(self.measure.clone())
    }

    /// True for shapes of rank one or more, including unbounded `var` dimensions.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        !self.dims.is_empty()
    }

    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.measure.is_numeric()
    }

    #[must_use]
    pub fn is_boolean(&self) -> bool {
        self.measure.is_boolean()
    }

    #[must_use]
    pub fn is_record(&self) -> bool {
        self.measure.is_record()
    }

    #[must_use]
    pub fn is_real(&self) -> bool {
        self.measure.is_real()
    }
}

impl From<ScalarType> for DataShape {
    fn from(value: ScalarType) -> Self {
        DataShape::scalar(value)
    }
}

impl fmt::Display for DataShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dim in &self.dims {
            write!(f, "{dim} * ")?;
        }
        write!(f, "{}", self.measure)
    }
}

#[cfg(test)]
mod tests {
    use crate::datashape::{DataShape, Dim, Measure, ScalarType};

    #[test]
    fn collection_predicates() {
        let table = DataShape::var(Measure::record(vec![
            ("name", ScalarType::String.into()),
            ("amount", ScalarType::Int32.into()),
        ]));
        assert!(table.is_collection());
        assert!(table.is_record());
        assert!(!table.is_numeric());
        assert_eq!(table.ndim(), 1);
        assert!(table.schema().is_scalar());
        assert_eq!(table.to_string(), "var * {name: string, amount: int32}");

        let matrix = DataShape::new(vec![Dim::Fixed(5), Dim::Fixed(3)], ScalarType::Int32.into());
        assert_eq!(matrix.to_string(), "5 * 3 * int32");
        assert_eq!(DataShape::from(ScalarType::Float64).to_string(), "float64");
    }
}
