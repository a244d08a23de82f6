use crate::expr::_impl_dshape::derive_dshape;
use crate::expr::{Expr, ExprError, ExprNodeData};
use crate::validation::{ErrorReporter, Validation};
use std::collections::HashSet;

/// Check the structural invariants of a whole tree.
///
/// Every node is derived again from its children and compared to its stored shape.
/// This covers the closure of broadcast scalar expressions and the derived child of
/// a grouping. Trees built through the constructors always pass.
impl Validation for Expr {
    type Error = ExprError;

    fn validate_all<R: ErrorReporter<Self::Error>>(&self, reporter: &mut R) {
        let mut visited = HashSet::new();
        validate_rec(self, &mut visited, reporter);
    }
}

fn validate_rec<R: ErrorReporter<ExprError>>(
    expr: &Expr,
    visited: &mut HashSet<Expr>,
    reporter: &mut R,
) {
    if !visited.insert(expr.clone()) {
        return;
    }

    match derive_dshape(expr.as_data()) {
        Ok(derived) if &derived == expr.dshape() => {}
        Ok(derived) => reporter.report(ExprError::InconsistentShape {
            expression: expr.to_string(),
            stored: expr.dshape().to_string(),
            derived: derived.to_string(),
        }),
        Err(error) => reporter.report(error),
    }

    if let ExprNodeData::Broadcast { scalar_expr, .. } = expr.as_data() {
        validate_rec(scalar_expr, visited, reporter);
    }
    for child in expr.children() {
        validate_rec(child, visited, reporter);
    }
}
