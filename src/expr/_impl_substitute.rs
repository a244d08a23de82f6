use crate::expr::{Expr, ExprError};
use std::collections::HashMap;

impl Expr {
    /// Replace every occurrence of a `mapping` key (compared structurally) by its value.
    ///
    /// A matched sub-expression is replaced as a whole, its interior is not searched
    /// further. Sub-trees without a match are shared with the original tree, so a
    /// substitution that changes nothing returns the very same node.
    ///
    /// The scalar expression of a `Broadcast` is only reached through its leaves:
    /// substituting a leaf re-types the matching placeholder if needed.
    ///
    /// Fails if a rebuilt node is no longer well-shaped (e.g. its new inputs
    /// cannot be broadcast together).
    pub fn substitute(&self, mapping: &HashMap<Expr, Expr>) -> Result<Expr, ExprError> {
        if mapping.is_empty() {
            return Ok(self.clone());
        }
        if let Some(replacement) = mapping.get(self) {
            return Ok(replacement.clone());
        }
        self.map_children(|child| child.substitute(mapping))
    }
}

#[cfg(test)]
mod tests {
    use crate::datashape::{DataShape, Measure, ScalarType, ShapeError};
    use crate::expr::tests::{accounts, vector};
    use crate::expr::{Expr, ExprError};
    use std::collections::HashMap;

    #[test]
    fn replaces_all_occurrences() {
        let a = vector("a", 10, ScalarType::Int32);
        let b = vector("b", 10, ScalarType::Int64);
        let expr = a.add(&a.mul(&Expr::literal(2)).unwrap()).unwrap();
        let result = expr.substitute(&HashMap::from([(a.clone(), b.clone())])).unwrap();
        assert_eq!(result.to_string(), "b + (b * 2)");
        assert_eq!(result.measure(), &ScalarType::Int64.into());
    }

    #[test]
    fn unchanged_trees_are_shared() {
        let t = accounts();
        let expr = t.field("amount").unwrap().add(&Expr::literal(1)).unwrap();
        let other = vector("other", 3, ScalarType::Int32);
        let result = expr
            .substitute(&HashMap::from([(other.clone(), other.clone())]))
            .unwrap();
        assert!(result.ptr_eq(&expr));

        // Only the branch with a match is rebuilt.
        let sum = expr.add(&other).unwrap();
        let c = vector("c", 3, ScalarType::Int32);
        let result = sum.substitute(&HashMap::from([(other, c)])).unwrap();
        assert!(result.children()[0].ptr_eq(&expr));
    }

    #[test]
    fn keys_are_compared_structurally() {
        let a = vector("a", 10, ScalarType::Int32);
        let a_other_shape = vector("a", 20, ScalarType::Int32);
        let b = vector("b", 20, ScalarType::Int32);
        let expr = a.negate().unwrap();
        let result = expr
            .substitute(&HashMap::from([(a_other_shape, b)]))
            .unwrap();
        assert_eq!(result, expr);
    }

    #[test]
    fn summary_values_are_substituted() {
        let t = accounts();
        let s = Expr::symbol(
            "s",
            DataShape::var(Measure::record(vec![
                ("name", ScalarType::String.into()),
                ("amount", ScalarType::Float64.into()),
                ("id", ScalarType::Int32.into()),
            ])),
        );
        let summary = crate::reductions::summary(
            vec![
                ("total", t.field("amount").unwrap().sum().unwrap()),
                ("n", t.field("id").unwrap().count().unwrap()),
            ],
            false,
        )
        .unwrap();
        let result = summary.substitute(&HashMap::from([(t, s.clone())])).unwrap();
        assert_eq!(result.to_string(), "summary(n=count(s.id), total=sum(s.amount), keepdims=False)");
        assert_eq!(result.measure().field("total"), Some(&ScalarType::Float64.into()));
        assert_eq!(result.children()[0], &s);
    }

    #[test]
    fn ill_shaped_substitution_fails() {
        let a = vector("a", 10, ScalarType::Int32);
        let b = vector("b", 10, ScalarType::Int32);
        let c = vector("c", 7, ScalarType::Int32);
        let expr = a.add(&b).unwrap();
        let error = expr.substitute(&HashMap::from([(a, c)])).unwrap_err();
        assert!(matches!(error, ExprError::Shape(ShapeError::Mismatch { .. })));
    }
}
