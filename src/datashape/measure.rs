use crate::datashape::ScalarType;
use crate::expr::ExprError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// The per-element type of a [`crate::datashape::DataShape`].
///
/// A measure is either a scalar unit, an optional (nullable) measure, or a record of
/// named fields. Record fields keep their declaration order.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Measure {
    Scalar(ScalarType),
    Option(Box<Measure>),
    Record(Vec<(String, Measure)>),
}

/// Utility constructors.
impl Measure {
    /// Create a record measure. Field names are not checked for uniqueness,
    /// see [`Measure::try_record`].
    #[must_use]
    pub fn record<S: Into<String>>(fields: Vec<(S, Measure)>) -> Measure {
        Measure::Record(
            fields
                .into_iter()
                .map(|(name, measure)| (name.into(), measure))
                .collect(),
        )
    }

    /// Create a record measure, failing with the first duplicate field name.
    pub fn try_record(fields: Vec<(String, Measure)>) -> Result<Measure, ExprError> {
        let mut seen = HashSet::new();
        for (name, _) in &fields {
            if !seen.insert(name.as_str()) {
                return Err(ExprError::DuplicateField {
                    field: name.clone(),
                });
            }
        }
        Ok(Measure::Record(fields))
    }

    #[must_use]
    pub fn optional(inner: Measure) -> Measure {
        match inner {
            Measure::Option(_) => inner,
            other => Measure::Option(Box::new(other)),
        }
    }

    /// Wrap this measure into an option if `condition` holds.
    #[must_use]
    pub fn optional_if(self, condition: bool) -> Measure {
        if condition {
            Measure::optional(self)
        } else {
            self
        }
    }
}

/// Predicates and data access.
impl Measure {
    /// The measure with a top-level option removed.
    #[must_use]
    pub fn unwrap_option(&self) -> &Measure {
        match self {
            Measure::Option(inner) => inner.as_ref(),
            other => other,
        }
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self, Measure::Option(_))
    }

    /// The scalar unit type of this measure (ignoring an option), if it is not a record.
    #[must_use]
    pub fn as_scalar(&self) -> Option<ScalarType> {
        match self.unwrap_option() {
            Measure::Scalar(scalar) => Some(*scalar),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_record(&self) -> bool {
        matches!(self.unwrap_option(), Measure::Record(_))
    }

    #[must_use]
    pub fn is_scalar_unit(&self) -> bool {
        self.as_scalar().is_some()
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.as_scalar().is_some_and(|s| s.is_numeric())
    }

    #[must_use]
    pub fn is_boolean(&self) -> bool {
        self.as_scalar() == Some(ScalarType::Bool)
    }

    #[must_use]
    pub fn is_real(&self) -> bool {
        self.as_scalar().is_some_and(|s| s.is_floating())
    }

    /// Record fields (ignoring an option), or `None` if this is not a record.
    #[must_use]
    pub fn fields(&self) -> Option<&[(String, Measure)]> {
        match self.unwrap_option() {
            Measure::Record(fields) => Some(fields.as_slice()),
            _ => None,
        }
    }

    /// Find a record field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Measure> {
        self.fields()?
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, measure)| measure)
    }
}

impl From<ScalarType> for Measure {
    fn from(value: ScalarType) -> Self {
        Measure::Scalar(value)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Scalar(scalar) => write!(f, "{scalar}"),
            Measure::Option(inner) => write!(f, "?{inner}"),
            Measure::Record(fields) => {
                write!(f, "{{")?;
                for (i, (name, measure)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {measure}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
