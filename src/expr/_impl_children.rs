use crate::expr::{Expr, ExprError, ExprNodeData};
use std::collections::{HashMap, HashSet};

impl Expr {
    /// The ordered structural inputs of this node.
    ///
    /// For a `Broadcast`, these are its collection leaves (not its scalar expression),
    /// for a `Summary` the child followed by the values, and for a `By` the grouper and
    /// the apply expression.
    #[must_use]
    pub fn children(&self) -> Vec<&Expr> {
        match self.as_data() {
            ExprNodeData::Symbol { .. } | ExprNodeData::Literal(_) => Vec::new(),
            ExprNodeData::BinOp { lhs, rhs, .. } => vec![lhs, rhs],
            ExprNodeData::UnaryOp { child, .. }
            | ExprNodeData::Math { child, .. }
            | ExprNodeData::Field { child, .. }
            | ExprNodeData::Map { child, .. }
            | ExprNodeData::DateTime { child, .. }
            | ExprNodeData::Reduction { child, .. }
            | ExprNodeData::Sort { child, .. }
            | ExprNodeData::Distinct { child } => vec![child],
            ExprNodeData::Broadcast { children, .. } => children.iter().collect(),
            ExprNodeData::Summary { child, values, .. } => {
                let mut result = vec![child];
                result.extend(values.iter());
                result
            }
            ExprNodeData::By { grouper, apply, .. } => vec![grouper, apply],
        }
    }

    /// The grouper, the apply expression and the grouped collection of a `By` node.
    #[must_use]
    pub fn by_parts(&self) -> Option<(&Expr, &Expr, &Expr)> {
        match self.as_data() {
            ExprNodeData::By {
                grouper,
                apply,
                child,
            } => Some((grouper, apply, child)),
            _ => None,
        }
    }

    /// Rebuild this node with every child replaced by `function(child)`.
    ///
    /// If every child is returned unchanged (the same shared node), `self` is returned
    /// without allocating. Otherwise, the node shape is derived again, which can fail.
    pub(crate) fn map_children<F>(&self, mut function: F) -> Result<Expr, ExprError>
    where
        F: FnMut(&Expr) -> Result<Expr, ExprError>,
    {
        let children = self.children();
        let mut changed = false;
        let mut mapped = Vec::with_capacity(children.len());
        for child in &children {
            let new_child = function(child)?;
            changed = changed || !new_child.ptr_eq(child);
            mapped.push(new_child);
        }
        if !changed {
            return Ok(self.clone());
        }

        let mut mapped = mapped.into_iter();
        let mut next = || {
            mapped
                .next()
                .expect("Invariant violation: Child count changed during rebuild.")
        };
        let data = match self.as_data() {
            ExprNodeData::Symbol { .. } | ExprNodeData::Literal(_) => return Ok(self.clone()),
            ExprNodeData::BinOp { op, .. } => ExprNodeData::BinOp {
                op: *op,
                lhs: next(),
                rhs: next(),
            },
            ExprNodeData::UnaryOp { op, .. } => ExprNodeData::UnaryOp {
                op: *op,
                child: next(),
            },
            ExprNodeData::Math { func, .. } => ExprNodeData::Math {
                func: *func,
                child: next(),
            },
            ExprNodeData::Field { name, .. } => ExprNodeData::Field {
                child: next(),
                name: name.clone(),
            },
            ExprNodeData::Map { func, schema, .. } => ExprNodeData::Map {
                child: next(),
                func: func.clone(),
                schema: schema.clone(),
            },
            ExprNodeData::DateTime { part, .. } => ExprNodeData::DateTime {
                child: next(),
                part: *part,
            },
            ExprNodeData::Broadcast {
                children,
                scalars,
                scalar_expr,
            } => {
                let new_children = children.iter().map(|_| next()).collect::<Vec<_>>();
                retype_broadcast(children, new_children, scalars, scalar_expr)?
            }
            ExprNodeData::Reduction {
                op, axis, keepdims, ..
            } => ExprNodeData::Reduction {
                op: *op,
                child: next(),
                axis: axis.clone(),
                keepdims: *keepdims,
            },
            ExprNodeData::Summary {
                names,
                values,
                keepdims,
                ..
            } => ExprNodeData::Summary {
                child: next(),
                names: names.clone(),
                values: values.iter().map(|_| next()).collect(),
                keepdims: *keepdims,
            },
            ExprNodeData::By { .. } => {
                let (grouper, apply) = (next(), next());
                let child = crate::expr::common_subexpression(&[grouper.clone(), apply.clone()])?;
                ExprNodeData::By {
                    grouper,
                    apply,
                    child,
                }
            }
            ExprNodeData::Sort { key, ascending, .. } => ExprNodeData::Sort {
                child: next(),
                key: key.clone(),
                ascending: *ascending,
            },
            ExprNodeData::Distinct { .. } => ExprNodeData::Distinct { child: next() },
        };
        Expr::from_data(data)
    }

    /// Collect all named placeholders used in this expression.
    ///
    /// For a `Broadcast`, the placeholders of its scalar expression are bound by the node,
    /// so only the symbols of its leaves are reported.
    #[must_use]
    pub fn symbols(&self) -> HashSet<Expr> {
        fn collect_rec(expr: &Expr, result: &mut HashSet<Expr>) {
            if let ExprNodeData::Symbol { .. } = expr.as_data() {
                result.insert(expr.clone());
            }
            for child in expr.children() {
                collect_rec(child, result);
            }
        }

        let mut result = HashSet::new();
        collect_rec(self, &mut result);
        result
    }
}

/// Build a `Broadcast` over new leaves. A placeholder whose leaf changed its measure is
/// replaced by a placeholder with the same name and the new per-element type, and the
/// scalar expression is rebuilt over it.
fn retype_broadcast(
    old_children: &[Expr],
    new_children: Vec<Expr>,
    scalars: &[Expr],
    scalar_expr: &Expr,
) -> Result<ExprNodeData, ExprError> {
    let mut retyped = HashMap::new();
    let mut new_scalars = Vec::with_capacity(scalars.len());
    for ((old, new), scalar) in old_children.iter().zip(&new_children).zip(scalars) {
        if old.measure() == new.measure() {
            new_scalars.push(scalar.clone());
            continue;
        }
        let ExprNodeData::Symbol { name, .. } = scalar.as_data() else {
            return Err(ExprError::InvalidBroadcast {
                message: format!("Placeholder `{scalar}` is not a symbol"),
            });
        };
        let replacement = Expr::symbol(name.clone(), new.schema());
        retyped.insert(scalar.clone(), replacement.clone());
        new_scalars.push(replacement);
    }
    Ok(ExprNodeData::Broadcast {
        children: new_children,
        scalars: new_scalars,
        scalar_expr: scalar_expr.substitute(&retyped)?,
    })
}
