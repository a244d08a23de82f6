use crate::broadcast::{broadcast, leaves_of_type, scalar_symbols};
use crate::expr::{Expr, ExprError, ExprKind};
use tracing::debug;

/// Kinds that fusion walks through while looking for broadcast leaves.
pub const BROADCASTABLE: &[ExprKind] = &[
    ExprKind::Arithmetic,
    ExprKind::Math,
    ExprKind::Map,
    ExprKind::Field,
    ExprKind::DateTime,
    ExprKind::Literal,
];

/// Kinds that trigger fusion of a collection-shaped node. Field projection is
/// walked through, but alone it is not worth a `Broadcast`.
pub const WANT_TO_BROADCAST: &[ExprKind] = &[
    ExprKind::Arithmetic,
    ExprKind::Math,
    ExprKind::Map,
    ExprKind::DateTime,
];

/// Collapse chains of element-wise operations over collections into `Broadcast` nodes,
/// using the default [`BROADCASTABLE`] and [`WANT_TO_BROADCAST`] kinds.
pub fn broadcast_collect(expr: &Expr) -> Result<Expr, ExprError> {
    broadcast_collect_with(expr, BROADCASTABLE, WANT_TO_BROADCAST)
}

/// Alias of [`broadcast_collect`].
pub fn fuse(expr: &Expr) -> Result<Expr, ExprError> {
    broadcast_collect(expr)
}

/// Broadcast fusion with custom kind sets.
///
/// A collection-shaped node whose kind is in `want_to_broadcast` becomes a `Broadcast`
/// over its leaves with respect to `broadcastable`. The leaves are ordered by their
/// canonical string (then by their data shape), and every `Broadcast` names its
/// placeholders independently, so equal sub-trees fuse into equal nodes. The children
/// of the (possibly fused) node are then fused independently.
///
/// Fusion never changes the data shape of the tree. `broadcastable` should contain
/// [`ExprKind::Literal`], otherwise literals become placeholders and lose their weak
/// typing.
pub fn broadcast_collect_with(
    expr: &Expr,
    broadcastable: &[ExprKind],
    want_to_broadcast: &[ExprKind],
) -> Result<Expr, ExprError> {
    collect_rec(expr, broadcastable, want_to_broadcast)
}

fn collect_rec(
    expr: &Expr,
    broadcastable: &[ExprKind],
    want_to_broadcast: &[ExprKind],
) -> Result<Expr, ExprError> {
    let mut expr = expr.clone();
    let candidate = expr.kind() != ExprKind::Broadcast
        && want_to_broadcast.contains(&expr.kind())
        && expr.dshape().is_collection();
    if candidate {
        let mut leaves = leaves_of_type(broadcastable, &expr)
            .into_iter()
            .collect::<Vec<_>>();
        leaves.sort_by_cached_key(|leaf| (leaf.to_string(), leaf.dshape().to_string()));
        let scalars = scalar_symbols(&leaves);
        debug!(
            leaves = leaves.len(),
            scalars = ?scalars.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            "Fusing `{expr}` into a broadcast."
        );
        expr = broadcast(&expr, &leaves, Some(scalars))?;
    }
    expr.map_children(|child| collect_rec(child, broadcastable, want_to_broadcast))
}

#[cfg(test)]
mod tests {
    use crate::broadcast::{BROADCASTABLE, broadcast_collect, broadcast_collect_with, fuse};
    use crate::datashape::{DataShape, Measure, ScalarType};
    use crate::expr::tests::{accounts, points, vector};
    use crate::expr::{DateTimePart, Expr, ExprKind, ExprNodeData};
    use crate::reductions::summary;
    use crate::split_apply_combine::by;

    fn events() -> Expr {
        Expr::symbol(
            "t",
            DataShape::var(Measure::record(vec![
                ("x", ScalarType::Int32.into()),
                ("y", ScalarType::Int32.into()),
                ("z", ScalarType::Int32.into()),
                ("when", ScalarType::DateTime.into()),
            ])),
        )
    }

    /// No node outside of a scalar expression is a fusion candidate any more.
    fn has_candidates(expr: &Expr) -> bool {
        let candidate = matches!(
            expr.kind(),
            ExprKind::Arithmetic | ExprKind::Math | ExprKind::Map | ExprKind::DateTime
        ) && expr.dshape().is_collection();
        candidate || expr.children().into_iter().any(has_candidates)
    }

    #[test]
    fn end_to_end_fusion() {
        let a = vector("a", 100, ScalarType::Int32);
        let t = points();
        let expr = a
            .sin()
            .unwrap()
            .add(&t.field("y").unwrap().pow(&Expr::literal(2)).unwrap())
            .unwrap();
        let fused = fuse(&expr).unwrap();

        let ExprNodeData::Broadcast {
            children,
            scalars,
            scalar_expr,
        } = fused.as_data()
        else {
            panic!("Expected a broadcast, got {fused}");
        };
        assert_eq!(children, &vec![a, t]);
        assert_eq!(scalars.len(), 2);
        assert_eq!(scalars[0].dshape(), &DataShape::scalar(ScalarType::Int32));
        assert_eq!(scalar_expr.to_string(), "sin(a) + (t.y ** 2)");
        assert_eq!(fused.dshape().to_string(), "100 * float64");
        assert_eq!(
            fused.to_string(),
            "Broadcast(_children=(a, t), _scalars=(a, t), _scalar_expr=sin(a) + (t.y ** 2))"
        );
    }

    #[test]
    fn distinct_is_a_fusion_boundary() {
        let t = events();
        let expr = t
            .field("x")
            .unwrap()
            .add(&Expr::literal(2).mul(&t.field("y").unwrap()).unwrap())
            .unwrap()
            .distinct()
            .unwrap();
        let fused = broadcast_collect(&expr).unwrap();
        assert_eq!(
            fused.to_string(),
            "distinct(Broadcast(_children=(t,), _scalars=(t,), _scalar_expr=t.x + (2 * t.y)))"
        );
        assert_eq!(fused.dshape(), expr.dshape());
    }

    #[test]
    fn nested_fusion_is_independent() {
        let t = events();
        let inner = t.field("x").unwrap().add(&t.field("y").unwrap()).unwrap();
        let expr = inner
            .distinct()
            .unwrap()
            .mul(&Expr::literal(3))
            .unwrap();
        let fused = fuse(&expr).unwrap();
        assert_eq!(
            fused.to_string(),
            "Broadcast(_children=(distinct(Broadcast(_children=(t,), _scalars=(t,), \
             _scalar_expr=t.x + t.y)),), _scalars=(_1,), _scalar_expr=_1 * 3)"
        );
        assert_eq!(fused.dshape(), expr.dshape());
        assert!(!has_candidates(&fused));
    }

    #[test]
    fn fusion_preserves_shapes() {
        let t = events();
        let year = t.field("when").unwrap().datetime(DateTimePart::Year).unwrap();
        let x = t.field("x").unwrap();
        let exprs = vec![
            year.add(&x).unwrap(),
            x.sum().unwrap().add(&x).unwrap(),
            x.map("inc", ScalarType::Int64.into()).unwrap().exp().unwrap(),
            x.mul(&Expr::literal(0.5)).unwrap().sum().unwrap(),
            x.distinct().unwrap().negate().unwrap(),
            t.field("y").unwrap(),
        ];
        for expr in exprs {
            let fused = fuse(&expr).unwrap();
            assert_eq!(fused.dshape(), expr.dshape(), "{expr}");
            assert!(!has_candidates(&fused), "{fused}");
        }
    }

    #[test]
    fn fusion_is_idempotent() {
        let t = accounts();
        let amount = t.field("amount").unwrap();
        let expr = amount
            .add(&t.field("id").unwrap())
            .unwrap()
            .distinct()
            .unwrap()
            .add(&Expr::literal(1))
            .unwrap();
        let once = fuse(&expr).unwrap();
        let twice = fuse(&once).unwrap();
        assert_eq!(once, twice);
        assert!(twice.ptr_eq(&once));
    }

    #[test]
    fn scalars_and_projections_are_not_fused() {
        let t = accounts();
        let amount = t.field("amount").unwrap();
        assert!(fuse(&amount).unwrap().ptr_eq(&amount));

        let total = amount.sum().unwrap().add(&Expr::literal(1)).unwrap();
        assert_eq!(fuse(&total).unwrap(), total);
    }

    #[test]
    fn reductions_inside_aggregations_are_fused() {
        let t = accounts();
        let doubled = t.field("amount").unwrap().mul(&Expr::literal(2)).unwrap();
        let grouped = by(
            &t.field("name").unwrap(),
            &summary(vec![("total", doubled.sum().unwrap())], false).unwrap(),
        )
        .unwrap();
        let fused = fuse(&grouped).unwrap();
        assert_eq!(
            fused.to_string(),
            "by(t.name, summary(total=sum(Broadcast(_children=(t,), _scalars=(t,), \
             _scalar_expr=t.amount * 2)), keepdims=False))"
        );
        assert_eq!(fused.dshape(), grouped.dshape());
    }

    #[test]
    fn repeated_grouper_fuses_consistently() {
        let a1 = vector("a", 10, ScalarType::Int32);
        let a2 = vector("a", 10, ScalarType::Float64);
        let key = a1.add(&a2).unwrap();
        let grouped = by(&key, &key.sum().unwrap()).unwrap();
        assert_eq!(grouped.dshape().to_string(), "var * {a: float64, a_sum: float64}");

        let fused = fuse(&grouped).unwrap();
        assert_eq!(fused.dshape(), grouped.dshape());
        let (grouper, apply, child) = fused.by_parts().unwrap();
        assert_eq!(
            grouper.to_string(),
            "Broadcast(_children=(a, a), _scalars=(a, _1), _scalar_expr=_1 + a)"
        );
        assert_eq!(child, grouper);
        assert_eq!(apply.children()[0], grouper);
    }

    #[test]
    fn custom_kind_sets() {
        let t = accounts();
        let expr = t.field("amount").unwrap().negate().unwrap();
        // Nothing wants to broadcast.
        let fused = broadcast_collect_with(&expr, BROADCASTABLE, &[]).unwrap();
        assert!(fused.ptr_eq(&expr));

        // Projections are leaves when they cannot be walked through.
        let fused = broadcast_collect_with(&expr, &[ExprKind::Arithmetic], &[ExprKind::Arithmetic])
            .unwrap();
        assert_eq!(
            fused.to_string(),
            "Broadcast(_children=(t.amount,), _scalars=(amount,), _scalar_expr=-amount)"
        );
    }
}
