use crate::expr::{Expr, ExprError, ExprKind};
use std::collections::HashSet;

/// Find the common subexpression of the given expressions: the unique maximal
/// sub-expression from which all of them are derived.
///
/// Sub-terms follow [`Expr::children`]; literals are never considered. A common
/// sub-term is maximal if it is not a strict sub-term of another common sub-term.
/// Finding no common sub-term, or more than one maximal one, is an error.
pub fn common_subexpression(exprs: &[Expr]) -> Result<Expr, ExprError> {
    let Some((first, rest)) = exprs.split_first() else {
        return Err(no_common(exprs, Vec::new()));
    };

    let mut common = subterms(first);
    for expr in rest {
        let terms = subterms(expr);
        common.retain(|term| terms.contains(term));
    }

    let mut dominated = HashSet::new();
    for term in &common {
        for child in term.children() {
            dominated.extend(subterms(child));
        }
    }

    let mut maximal = common
        .into_iter()
        .filter(|term| !dominated.contains(term))
        .collect::<Vec<_>>();
    if maximal.len() == 1 {
        return Ok(maximal.remove(0));
    }
    let mut candidates = maximal.iter().map(|e| e.to_string()).collect::<Vec<_>>();
    candidates.sort();
    Err(no_common(exprs, candidates))
}

/// All sub-terms of `expr` (including itself), except literals.
fn subterms(expr: &Expr) -> HashSet<Expr> {
    fn collect_rec(expr: &Expr, result: &mut HashSet<Expr>) {
        if expr.kind() == ExprKind::Literal || result.contains(expr) {
            return;
        }
        result.insert(expr.clone());
        for child in expr.children() {
            collect_rec(child, result);
        }
    }

    let mut result = HashSet::new();
    collect_rec(expr, &mut result);
    result
}

fn no_common(exprs: &[Expr], candidates: Vec<String>) -> ExprError {
    ExprError::NoCommonSubexpression {
        expressions: exprs.iter().map(|e| e.to_string()).collect(),
        candidates,
    }
}
