use crate::broadcast::scalar_symbols;
use crate::datashape::{DataShape, max_shape};
use crate::expr::{Expr, ExprError, ExprKind, ExprNodeData};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Collect the maximal sub-expressions of `expr` whose kind is not in `kinds`.
///
/// Nodes of the given kinds are walked through, every path stops at its first node
/// of another kind. A node without children of a walked kind (e.g. a literal)
/// contributes nothing.
#[must_use]
pub fn leaves_of_type(kinds: &[ExprKind], expr: &Expr) -> HashSet<Expr> {
    fn collect_rec(kinds: &[ExprKind], expr: &Expr, result: &mut HashSet<Expr>) {
        if !kinds.contains(&expr.kind()) {
            trace!(leaf = %expr, "Found leaf.");
            result.insert(expr.clone());
            return;
        }
        for child in expr.children() {
            collect_rec(kinds, child, result);
        }
    }

    let mut result = HashSet::new();
    collect_rec(kinds, expr, &mut result);
    result
}

/// Wrap `expr` into a `Broadcast` over `leaves`.
///
/// Every leaf is replaced by its scalar placeholder in the scalar expression. When no
/// placeholders are given, they are created by [`scalar_symbols`].
pub fn broadcast(expr: &Expr, leaves: &[Expr], scalars: Option<Vec<Expr>>) -> Result<Expr, ExprError> {
    let scalars = scalars.unwrap_or_else(|| scalar_symbols(leaves));
    if scalars.len() != leaves.len() {
        return Err(arity_error(leaves.len(), scalars.len()));
    }
    let mapping = leaves
        .iter()
        .cloned()
        .zip(scalars.iter().cloned())
        .collect::<HashMap<_, _>>();
    let scalar_expr = expr.substitute(&mapping)?;
    Expr::from_data(ExprNodeData::Broadcast {
        children: leaves.to_vec(),
        scalars,
        scalar_expr,
    })
}

impl Expr {
    /// The un-fused form of a `Broadcast`: its scalar expression with the placeholders
    /// replaced by the leaves again. Other nodes are returned as they are.
    pub fn full_expr(&self) -> Result<Expr, ExprError> {
        let ExprNodeData::Broadcast {
            children,
            scalars,
            scalar_expr,
        } = self.as_data()
        else {
            return Ok(self.clone());
        };
        let mapping = scalars
            .iter()
            .cloned()
            .zip(children.iter().cloned())
            .collect::<HashMap<_, _>>();
        scalar_expr.substitute(&mapping)
    }
}

fn arity_error(leaves: usize, scalars: usize) -> ExprError {
    ExprError::InvalidBroadcast {
        message: format!("{leaves} leaves but {scalars} placeholders"),
    }
}

pub(crate) fn broadcast_dshape(
    children: &[Expr],
    scalars: &[Expr],
    scalar_expr: &Expr,
) -> Result<DataShape, ExprError> {
    if children.is_empty() {
        return Err(ExprError::InvalidBroadcast {
            message: "no leaves".to_string(),
        });
    }
    if children.len() != scalars.len() {
        return Err(arity_error(children.len(), scalars.len()));
    }

    let mut names = HashSet::new();
    for (leaf, scalar) in children.iter().zip(scalars) {
        let ExprNodeData::Symbol { name, dshape } = scalar.as_data() else {
            return Err(ExprError::InvalidBroadcast {
                message: format!("placeholder `{scalar}` is not a symbol"),
            });
        };
        if *dshape != leaf.schema() {
            return Err(ExprError::InvalidBroadcast {
                message: format!(
                    "placeholder `{name}: {dshape}` does not match leaf `{leaf}: {}`",
                    leaf.dshape()
                ),
            });
        }
        if !names.insert(name.as_str()) {
            return Err(ExprError::InvalidBroadcast {
                message: format!("placeholder `{name}` is used more than once"),
            });
        }
    }
    let mut free = scalar_expr
        .symbols()
        .into_iter()
        .filter(|symbol| !scalars.contains(symbol))
        .map(|symbol| symbol.to_string())
        .collect::<Vec<_>>();
    free.sort();
    if let Some(symbol) = free.first() {
        return Err(ExprError::InvalidBroadcast {
            message: format!("free symbol `{symbol}` in scalar expression"),
        });
    }
    if scalar_expr.dshape().is_collection() {
        return Err(ExprError::InvalidBroadcast {
            message: format!("scalar expression `{scalar_expr}` is a collection"),
        });
    }

    let dims = max_shape(children.iter().map(|leaf| leaf.shape()))?;
    Ok(DataShape::new(dims, scalar_expr.measure().clone()))
}
