use crate::expr::Expr;
use crate::utils::take_if_not_blank;
use std::collections::HashSet;

/// Source of synthetic placeholder names `_1`, `_2`, ... .
///
/// Fusion uses one instance per `Broadcast`, so equal leaf batches always get equal
/// placeholders. The counter only grows: a synthetic name is never handed out twice by
/// the same instance.
#[derive(Clone, Debug, Default)]
pub struct ScalarNames {
    counter: usize,
}

impl ScalarNames {
    #[must_use]
    pub fn new() -> ScalarNames {
        ScalarNames::default()
    }

    /// The next synthetic name that is not in `taken`.
    pub fn fresh(&mut self, taken: &HashSet<String>) -> String {
        loop {
            self.counter += 1;
            let name = format!("_{}", self.counter);
            if !taken.contains(&name) {
                return name;
            }
        }
    }
}

/// Create one scalar placeholder per expression, typed by the expression's
/// per-element shape. Uses a fresh [`ScalarNames`] counter.
#[must_use]
pub fn scalar_symbols(exprs: &[Expr]) -> Vec<Expr> {
    scalar_symbols_with(exprs, &mut ScalarNames::new())
}

/// Same as [`scalar_symbols`], drawing synthetic names from `names`.
///
/// A placeholder reuses the name of its expression when there is one and no earlier
/// placeholder of this batch took it. Names within the batch are pairwise unique.
pub fn scalar_symbols_with(exprs: &[Expr], names: &mut ScalarNames) -> Vec<Expr> {
    let mut taken = HashSet::new();
    let mut scalars = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let name = expr
            .name()
            .as_deref()
            .and_then(take_if_not_blank)
            .filter(|name| !taken.contains(name))
            .unwrap_or_else(|| names.fresh(&taken));
        taken.insert(name.clone());
        scalars.push(Expr::symbol(name, expr.schema()));
    }
    scalars
}
