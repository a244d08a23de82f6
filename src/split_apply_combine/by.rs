use crate::datashape::{DataShape, Measure};
use crate::expr::{Expr, ExprError, ExprKind, ExprNodeData, common_subexpression};
use crate::reductions::summary;

/// Group the common collection of `grouper` and `apply` by the values of `grouper`
/// and aggregate each group with `apply`.
///
/// The `apply` expression must be a reduction or a summary. The grouped collection is
/// the common subexpression of both, see [`Expr::by_parts`].
pub fn by(grouper: &Expr, apply: &Expr) -> Result<Expr, ExprError> {
    let child = common_subexpression(&[grouper.clone(), apply.clone()])?;
    Expr::from_data(ExprNodeData::By {
        grouper: grouper.clone(),
        apply: apply.clone(),
        child,
    })
}

/// Same as [`by`], with the aggregation given as the named values of a [`summary`].
pub fn by_named<S: Into<String>>(grouper: &Expr, values: Vec<(S, Expr)>) -> Result<Expr, ExprError> {
    let apply = summary(values, false)?;
    by(grouper, &apply)
}

/// Count occurrences of each distinct element of `expr`.
///
/// With `sort`, the result is ordered by decreasing count.
pub fn count_values(expr: &Expr, sort: bool) -> Result<Expr, ExprError> {
    let result = by_named(expr, vec![("count", expr.count()?)])?;
    if sort {
        result.sort(Some("count"), false)
    } else {
        Ok(result)
    }
}

/// Field names and types contributed by `expr` to a grouping result.
///
/// A record contributes its fields, a scalar unit contributes a single field named
/// after the expression. Options are unwrapped.
pub(crate) fn names_and_types(expr: &Expr) -> Result<Vec<(String, Measure)>, ExprError> {
    let measure = expr.measure().unwrap_option();
    if let Some(fields) = measure.fields() {
        return Ok(fields.to_vec());
    }
    match expr.name() {
        Some(name) if measure.is_scalar_unit() => Ok(vec![(name, measure.clone())]),
        _ => Err(ExprError::Schema {
            expression: expr.to_string(),
            measure: expr.measure().to_string(),
        }),
    }
}

pub(crate) fn by_dshape(grouper: &Expr, apply: &Expr, child: &Expr) -> Result<DataShape, ExprError> {
    if !matches!(apply.kind(), ExprKind::Reduction | ExprKind::Summary) {
        return Err(ExprError::InvalidApply {
            expression: apply.to_string(),
        });
    }
    let expected = common_subexpression(&[grouper.clone(), apply.clone()])?;
    if expected != *child {
        return Err(ExprError::InconsistentChild {
            expression: format!("by({grouper}, {apply})"),
            expected: expected.to_string(),
            actual: child.to_string(),
        });
    }
    let mut fields = names_and_types(grouper)?;
    fields.extend(names_and_types(apply)?);
    Ok(DataShape::var(Measure::try_record(fields)?))
}
