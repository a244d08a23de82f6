use crate::datashape::{DataShape, Dim, Measure};
use crate::expr::{Expr, ExprError, ExprKind, ExprNodeData, common_subexpression};
use tracing::trace;

/// Bundle named aggregations of one collection into a single record.
///
/// The values are ordered by name and the names must be unique. The summarized
/// collection is the common subexpression of all values. With a single value, that
/// is the value itself, so the collection is found by walking up its single-input
/// ancestors, see [`resolve_collection`]. A reduction over only some axes contributes
/// its element type to the record.
pub fn summary<S: Into<String>>(values: Vec<(S, Expr)>, keepdims: bool) -> Result<Expr, ExprError> {
    let mut values = values
        .into_iter()
        .map(|(name, value)| (name.into(), value))
        .collect::<Vec<_>>();
    values.sort_by(|(a, _), (b, _)| a.cmp(b));
    if let Some(pair) = values.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(ExprError::DuplicateField {
            field: pair[0].0.clone(),
        });
    }

    let (names, values): (Vec<String>, Vec<Expr>) = values.into_iter().unzip();
    let mut child = common_subexpression(&values)?;
    if values.len() == 1 {
        child = resolve_collection(&child)?;
    }
    Expr::from_data(ExprNodeData::Summary {
        child,
        names,
        values,
        keepdims,
    })
}

/// A collection of records, i.e. something a user would call a table.
fn is_tabular(expr: &Expr) -> bool {
    expr.dshape().is_collection() && expr.measure().is_record()
}

/// Walk up from `expr` through single-input ancestors to the first table.
///
/// Literal operands are not inputs for this purpose. When the walk stops early, at an
/// ancestor with several inputs or at a leaf, the nearest collection passed on the way
/// is used. Stopping before any collection was reached is ambiguous.
fn resolve_collection(expr: &Expr) -> Result<Expr, ExprError> {
    let mut nearest = None;
    let mut current = expr.clone();
    loop {
        let inputs = current
            .children()
            .into_iter()
            .filter(|input| input.kind() != ExprKind::Literal)
            .cloned()
            .collect::<Vec<_>>();
        let [single] = inputs.as_slice() else {
            return nearest.ok_or_else(|| ExprError::NamingAmbiguity {
                expression: expr.to_string(),
            });
        };
        current = single.clone();
        trace!(candidate = %current, "Resolving summarized collection.");
        if is_tabular(&current) {
            return Ok(current);
        }
        if nearest.is_none() && current.dshape().is_collection() {
            nearest = Some(current.clone());
        }
    }
}

pub(crate) fn summary_dshape(
    child: &Expr,
    names: &[String],
    values: &[Expr],
    keepdims: bool,
) -> Result<DataShape, ExprError> {
    if names.len() != values.len() {
        return Err(ExprError::InvalidSummary {
            message: format!("{} names for {} values", names.len(), values.len()),
        });
    }
    if !names.is_sorted() {
        return Err(ExprError::InvalidSummary {
            message: "names are not sorted".to_string(),
        });
    }
    let not_aggregated = |value: &&Expr| {
        value.dshape().is_collection() && value.kind() != ExprKind::Reduction
    };
    if let Some(value) = values.iter().find(not_aggregated) {
        return Err(ExprError::InvalidSummary {
            message: format!("`{value}` is not an aggregation"),
        });
    }

    let fields = names
        .iter()
        .cloned()
        .zip(values.iter().map(|value| value.measure().clone()))
        .collect();
    let measure = Measure::try_record(fields)?;
    let dims = if keepdims {
        vec![Dim::Fixed(1); child.ndim()]
    } else {
        Vec::new()
    };
    Ok(DataShape::new(dims, measure))
}

#[cfg(test)]
mod tests {
    use crate::datashape::{DataShape, Dim, Measure, ScalarType};
    use crate::expr::tests::{accounts, vector};
    use crate::expr::{Expr, ExprError, ExprNodeData};
    use crate::reductions::{ReductionOp, summary};

    fn summary_child(expr: &Expr) -> &Expr {
        let ExprNodeData::Summary { child, .. } = expr.as_data() else {
            panic!("Not a summary: {expr}");
        };
        child
    }

    #[test]
    fn values_are_ordered_by_name() {
        let t = accounts();
        let expr = summary(
            vec![
                ("total", t.field("amount").unwrap().sum().unwrap()),
                ("number", t.field("id").unwrap().nunique().unwrap()),
            ],
            false,
        )
        .unwrap();
        assert_eq!(
            expr.to_string(),
            "summary(number=nunique(t.id), total=sum(t.amount), keepdims=False)"
        );
        assert_eq!(
            expr.dshape(),
            &DataShape::scalar(Measure::record(vec![
                ("number", ScalarType::Int32.into()),
                ("total", ScalarType::Int32.into()),
            ]))
        );
        assert_eq!(summary_child(&expr), &t);
    }

    #[test]
    fn single_value_resolves_to_table() {
        let t = accounts();
        let expr = summary(vec![("total", t.field("amount").unwrap().sum().unwrap())], false)
            .unwrap();
        assert_eq!(summary_child(&expr), &t);

        // Literal operands do not make the walk ambiguous.
        let scaled = t.field("amount").unwrap().mul(&Expr::literal(2)).unwrap();
        let expr = summary(vec![("total", scaled.sum().unwrap())], false).unwrap();
        assert_eq!(summary_child(&expr), &t);
    }

    #[test]
    fn single_value_over_plain_collection() {
        let a = vector("a", 10, ScalarType::Float64);
        let expr = summary(vec![("m", a.mean().unwrap())], true).unwrap();
        assert_eq!(summary_child(&expr), &a);
        assert_eq!(expr.dshape().to_string(), "1 * {m: float64}");
    }

    #[test]
    fn computed_column_is_summarized() {
        let a = vector("a", 10, ScalarType::Int32);
        let b = vector("b", 10, ScalarType::Int32);
        let sum = a.add(&b).unwrap();
        let expr = summary(vec![("total", sum.sum().unwrap())], false).unwrap();
        assert_eq!(summary_child(&expr), &sum);

        let t = accounts();
        let computed = t.field("amount").unwrap().add(&t.field("id").unwrap()).unwrap();
        let expr = summary(vec![("total", computed.sum().unwrap())], false).unwrap();
        assert_eq!(summary_child(&expr), &computed);
        assert_eq!(expr.dshape().to_string(), "{total: int32}");
    }

    #[test]
    fn multi_input_scalar_is_ambiguous() {
        let a = vector("a", 10, ScalarType::Int32);
        let b = vector("b", 10, ScalarType::Int32);
        let total = a.sum().unwrap().add(&b.sum().unwrap()).unwrap();
        assert_eq!(
            summary(vec![("total", total)], false).unwrap_err(),
            ExprError::NamingAmbiguity {
                expression: "sum(a) + sum(b)".to_string(),
            }
        );

        let x = Expr::symbol("x", DataShape::scalar(ScalarType::Float64));
        assert!(matches!(
            summary(vec![("m", x.sum().unwrap())], false),
            Err(ExprError::NamingAmbiguity { .. })
        ));
    }

    #[test]
    fn partial_reductions_are_accepted() {
        let m = Expr::symbol(
            "m",
            DataShape::new(vec![Dim::Fixed(2), Dim::Fixed(3)], ScalarType::Int32.into()),
        );
        let rows = m.reduce(ReductionOp::Sum, Some(&[1]), false).unwrap();
        let expr = summary(vec![("rows", rows)], false).unwrap();
        assert_eq!(summary_child(&expr), &m);
        assert_eq!(expr.dshape().to_string(), "{rows: int32}");
    }

    #[test]
    fn duplicate_and_collection_values_are_rejected() {
        let t = accounts();
        let total = t.field("amount").unwrap().sum().unwrap();
        assert_eq!(
            summary(vec![("x", total.clone()), ("x", total)], false).unwrap_err(),
            ExprError::DuplicateField {
                field: "x".to_string(),
            }
        );
        let amount = t.field("amount").unwrap();
        let id = t.field("id").unwrap();
        assert!(matches!(
            summary(vec![("x", amount), ("y", id)], false),
            Err(ExprError::InvalidSummary { .. })
        ));
    }
}
