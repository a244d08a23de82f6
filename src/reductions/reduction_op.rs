use crate::datashape::{Measure, ScalarType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column-wise reduction operators.
///
/// `Var` and `Std` carry the denominator convention: `unbiased` means the sample
/// estimate (divide by `n - 1`), otherwise the population one. It is only a parameter
/// for the evaluating backend.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ReductionOp {
    Any,
    All,
    Sum,
    Min,
    Max,
    Mean,
    Var { unbiased: bool },
    Std { unbiased: bool },
    Count,
    Nunique,
}

impl ReductionOp {
    /// The operator name, also used to derive the name of a reduction result.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            ReductionOp::Any => "any",
            ReductionOp::All => "all",
            ReductionOp::Sum => "sum",
            ReductionOp::Min => "min",
            ReductionOp::Max => "max",
            ReductionOp::Mean => "mean",
            ReductionOp::Var { .. } => "var",
            ReductionOp::Std { .. } => "std",
            ReductionOp::Count => "count",
            ReductionOp::Nunique => "nunique",
        }
    }

    #[must_use]
    pub fn unbiased(&self) -> Option<bool> {
        match self {
            ReductionOp::Var { unbiased } | ReductionOp::Std { unbiased } => Some(*unbiased),
            _ => None,
        }
    }

    /// The measure of the reduction result for an input of the given measure.
    ///
    /// `sum`, `min` and `max` of a single-field record yield the type of that field.
    #[must_use]
    pub fn dtype(&self, input: &Measure) -> Measure {
        match self {
            ReductionOp::Any | ReductionOp::All => ScalarType::Bool.into(),
            ReductionOp::Sum | ReductionOp::Min | ReductionOp::Max => match input.fields() {
                Some([(_, single)]) => single.clone(),
                _ => input.clone(),
            },
            ReductionOp::Mean | ReductionOp::Var { .. } | ReductionOp::Std { .. } => {
                ScalarType::REAL.into()
            }
            ReductionOp::Count | ReductionOp::Nunique => ScalarType::INT.into(),
        }
    }
}

impl fmt::Display for ReductionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use crate::datashape::{Measure, ScalarType};
    use crate::reductions::ReductionOp;

    #[test]
    fn single_field_records_are_unwrapped() {
        let single = Measure::record(vec![("amount", ScalarType::Int32.into())]);
        assert_eq!(ReductionOp::Sum.dtype(&single), ScalarType::Int32.into());
        assert_eq!(ReductionOp::Min.dtype(&single), ScalarType::Int32.into());
        assert_eq!(ReductionOp::Max.dtype(&single), ScalarType::Int32.into());

        let pair = Measure::record(vec![
            ("x", ScalarType::Int32.into()),
            ("y", ScalarType::Int32.into()),
        ]);
        assert_eq!(ReductionOp::Sum.dtype(&pair), pair);
    }

    #[test]
    fn fixed_result_types() {
        let input = Measure::from(ScalarType::Int16);
        assert_eq!(ReductionOp::Any.dtype(&input), ScalarType::Bool.into());
        assert_eq!(ReductionOp::Mean.dtype(&input), ScalarType::Float64.into());
        assert_eq!(
            ReductionOp::Std { unbiased: true }.dtype(&input),
            ScalarType::Float64.into()
        );
        assert_eq!(ReductionOp::Nunique.dtype(&input), ScalarType::Int32.into());
        assert_eq!(ReductionOp::Sum.dtype(&input), ScalarType::Int16.into());
    }

    #[test]
    fn symbols() {
        assert_eq!(ReductionOp::Var { unbiased: false }.to_string(), "var");
        assert_eq!(ReductionOp::Var { unbiased: false }.unbiased(), Some(false));
        assert_eq!(ReductionOp::Count.unbiased(), None);
    }
}
