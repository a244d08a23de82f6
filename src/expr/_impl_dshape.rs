use crate::broadcast::broadcast_dshape;
use crate::datashape::DataShape;
use crate::expr::collection_ops::{distinct_dshape, sort_dshape};
use crate::expr::elemwise::{
    binary_dshape, datetime_dshape, field_dshape, literal_type, math_dshape, unary_dshape,
};
use crate::expr::{ExprError, ExprNodeData};
use crate::reductions::{reduction_dshape, summary_dshape};
use crate::split_apply_combine::by_dshape;

/// Derive the data shape of a node from its (already shaped) children.
///
/// Each variant family keeps its rule next to its constructors; this only dispatches.
pub(crate) fn derive_dshape(data: &ExprNodeData) -> Result<DataShape, ExprError> {
    match data {
        ExprNodeData::Symbol { dshape, .. } => Ok(dshape.clone()),
        ExprNodeData::Literal(value) => Ok(DataShape::scalar(literal_type(value))),
        ExprNodeData::BinOp { op, lhs, rhs } => binary_dshape(*op, lhs, rhs),
        ExprNodeData::UnaryOp { op, child } => unary_dshape(*op, child),
        ExprNodeData::Math { func, child } => math_dshape(*func, child),
        ExprNodeData::Field { child, name } => field_dshape(child, name),
        ExprNodeData::Map { child, schema, .. } => {
            Ok(DataShape::new(child.shape().to_vec(), schema.clone()))
        }
        ExprNodeData::DateTime { child, part } => datetime_dshape(child, *part),
        ExprNodeData::Broadcast {
            children,
            scalars,
            scalar_expr,
        } => broadcast_dshape(children, scalars, scalar_expr),
        ExprNodeData::Reduction {
            op,
            child,
            axis,
            keepdims,
        } => reduction_dshape(op, child, axis, *keepdims),
        ExprNodeData::Summary {
            child,
            names,
            values,
            keepdims,
        } => summary_dshape(child, names, values, *keepdims),
        ExprNodeData::By {
            grouper,
            apply,
            child,
        } => by_dshape(grouper, apply, child),
        ExprNodeData::Sort { child, key, .. } => sort_dshape(child, key.as_deref()),
        ExprNodeData::Distinct { child } => distinct_dshape(child),
    }
}
