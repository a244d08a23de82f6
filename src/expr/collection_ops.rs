use crate::datashape::{DataShape, Dim, ShapeError};
use crate::expr::{Expr, ExprError, ExprNodeData};

/// Whole-collection operations. These are never fused, their result depends on more
/// than the aligned input element.
impl Expr {
    /// Sort a collection, optionally by a field of its record measure.
    pub fn sort(&self, key: Option<&str>, ascending: bool) -> Result<Expr, ExprError> {
        Expr::from_data(ExprNodeData::Sort {
            child: self.clone(),
            key: key.map(str::to_string),
            ascending,
        })
    }

    /// Unique elements of a collection.
    pub fn distinct(&self) -> Result<Expr, ExprError> {
        Expr::from_data(ExprNodeData::Distinct {
            child: self.clone(),
        })
    }
}

fn require_collection(operation: &str, child: &Expr) -> Result<(), ExprError> {
    if child.dshape().is_collection() {
        Ok(())
    } else {
        Err(ShapeError::NotACollection {
            operation: operation.to_string(),
            dshape: child.dshape().to_string(),
        }
        .into())
    }
}

pub(crate) fn sort_dshape(child: &Expr, key: Option<&str>) -> Result<DataShape, ExprError> {
    require_collection("sort", child)?;
    if let Some(key) = key {
        // A scalar measure can only be sorted "by itself".
        let known = if child.measure().is_record() {
            child.measure().field(key).is_some()
        } else {
            child.name().as_deref() == Some(key)
        };
        if !known {
            return Err(ExprError::UnknownField {
                field: key.to_string(),
                measure: child.measure().to_string(),
            });
        }
    }
    Ok(child.dshape().clone())
}

pub(crate) fn distinct_dshape(child: &Expr) -> Result<DataShape, ExprError> {
    require_collection("distinct", child)?;
    let mut dims = vec![Dim::Var];
    dims.extend_from_slice(&child.shape()[1..]);
    Ok(DataShape::new(dims, child.measure().clone()))
}

#[cfg(test)]
mod tests {
    use crate::datashape::{DataShape, ScalarType, ShapeError};
    use crate::expr::tests::{accounts, vector};
    use crate::expr::{Expr, ExprError};

    #[test]
    fn sort_keeps_shape() {
        let t = accounts();
        let sorted = t.sort(Some("amount"), false).unwrap();
        assert_eq!(sorted.dshape(), t.dshape());
        assert_eq!(sorted.to_string(), "sort(t, \"amount\", ascending=False)");
        assert!(matches!(
            t.sort(Some("missing"), true),
            Err(ExprError::UnknownField { .. })
        ));

        let amount = t.field("amount").unwrap();
        assert!(amount.sort(Some("amount"), true).is_ok());
        assert!(amount.sort(None, true).is_ok());
    }

    #[test]
    fn distinct_is_variable_length() {
        let a = vector("a", 10, ScalarType::Int32);
        let unique = a.distinct().unwrap();
        assert_eq!(unique.dshape(), &DataShape::var(ScalarType::Int32));
        assert_eq!(unique.to_string(), "distinct(a)");
    }

    #[test]
    fn scalars_cannot_be_sorted() {
        let x = Expr::symbol("x", DataShape::scalar(ScalarType::Int32));
        assert_eq!(
            x.distinct().unwrap_err(),
            ExprError::Shape(ShapeError::NotACollection {
                operation: "distinct".to_string(),
                dshape: "int32".to_string(),
            })
        );
        assert!(x.sort(None, true).is_err());
    }
}
