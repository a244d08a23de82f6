use crate::expr::{Expr, ExprNodeData};

impl Expr {
    /// The advisory name of this expression, used to name derived results
    /// (e.g. record fields of a grouping) and scalar placeholders.
    ///
    /// Naming never fails: when no sensible name exists, the result is `None`
    /// (or, for reductions, just the operator symbol).
    #[must_use]
    pub fn name(&self) -> Option<String> {
        match self.as_data() {
            ExprNodeData::Symbol { name, .. } => Some(name.clone()),
            ExprNodeData::Literal(_) => None,
            ExprNodeData::Field { name, .. } => Some(name.clone()),
            ExprNodeData::BinOp { lhs, rhs, .. } => {
                if !self.measure().is_scalar_unit() {
                    return None;
                }
                match (lhs.name(), rhs.name()) {
                    (Some(left), None) => Some(left),
                    (None, Some(right)) => Some(right),
                    (Some(left), Some(right)) if left == right => Some(left),
                    _ => None,
                }
            }
            ExprNodeData::UnaryOp { child, .. }
            | ExprNodeData::Math { child, .. }
            | ExprNodeData::Map { child, .. }
            | ExprNodeData::Sort { child, .. }
            | ExprNodeData::Distinct { child } => child.name(),
            ExprNodeData::DateTime { child, part } => match child.name() {
                Some(name) => Some(format!("{name}_{part}")),
                None => Some(part.to_string()),
            },
            ExprNodeData::Broadcast { scalar_expr, .. } => scalar_expr.name(),
            ExprNodeData::Reduction { op, child, .. } => match child.name() {
                Some(name) => Some(format!("{name}_{}", op.symbol())),
                None => Some(op.symbol().to_string()),
            },
            ExprNodeData::Summary { .. } | ExprNodeData::By { .. } => None,
        }
    }
}
