use crate::datashape::{DataShape, Dim, ShapeError};
use crate::expr::{Expr, ExprError, ExprNodeData};
use crate::reductions::ReductionOp;

impl Expr {
    /// Reduce this expression over the given axes (all axes by default).
    ///
    /// The axes are normalized into a sorted list without duplicates. With `keepdims`,
    /// every reduced dimension is kept with length `1`.
    pub fn reduce(
        &self,
        op: ReductionOp,
        axis: Option<&[usize]>,
        keepdims: bool,
    ) -> Result<Expr, ExprError> {
        let axis = match axis {
            None => (0..self.ndim()).collect(),
            Some(axis) => {
                let mut axis = axis.to_vec();
                axis.sort_unstable();
                axis.dedup();
                axis
            }
        };
        Expr::from_data(ExprNodeData::Reduction {
            op,
            child: self.clone(),
            axis,
            keepdims,
        })
    }

    pub fn any(&self) -> Result<Expr, ExprError> {
        self.reduce(ReductionOp::Any, None, false)
    }

    pub fn all(&self) -> Result<Expr, ExprError> {
        self.reduce(ReductionOp::All, None, false)
    }

    pub fn sum(&self) -> Result<Expr, ExprError> {
        self.reduce(ReductionOp::Sum, None, false)
    }

    pub fn min(&self) -> Result<Expr, ExprError> {
        self.reduce(ReductionOp::Min, None, false)
    }

    pub fn max(&self) -> Result<Expr, ExprError> {
        self.reduce(ReductionOp::Max, None, false)
    }

    pub fn mean(&self) -> Result<Expr, ExprError> {
        self.reduce(ReductionOp::Mean, None, false)
    }

    pub fn var(&self, unbiased: bool) -> Result<Expr, ExprError> {
        self.reduce(ReductionOp::Var { unbiased }, None, false)
    }

    pub fn std(&self, unbiased: bool) -> Result<Expr, ExprError> {
        self.reduce(ReductionOp::Std { unbiased }, None, false)
    }

    /// The number of non-null elements.
    pub fn count(&self) -> Result<Expr, ExprError> {
        self.reduce(ReductionOp::Count, None, false)
    }

    pub fn nunique(&self) -> Result<Expr, ExprError> {
        self.reduce(ReductionOp::Nunique, None, false)
    }
}

pub(crate) fn reduction_dshape(
    op: &ReductionOp,
    child: &Expr,
    axis: &[usize],
    keepdims: bool,
) -> Result<DataShape, ExprError> {
    let ndim = child.ndim();
    if let Some(axis) = axis.iter().find(|axis| **axis >= ndim) {
        return Err(ShapeError::AxisOutOfRange { axis: *axis, ndim }.into());
    }

    let mut dims = Vec::with_capacity(ndim);
    for (i, dim) in child.shape().iter().enumerate() {
        if !axis.contains(&i) {
            dims.push(*dim);
        } else if keepdims {
            dims.push(Dim::Fixed(1));
        }
    }
    Ok(DataShape::new(dims, op.dtype(child.measure())))
}

#[cfg(test)]
mod tests {
    use crate::datashape::{DataShape, Dim, Measure, ScalarType, ShapeError};
    use crate::expr::tests::{accounts, vector};
    use crate::expr::{Expr, ExprError};
    use crate::reductions::ReductionOp;

    fn matrix() -> Expr {
        Expr::symbol(
            "m",
            DataShape::new(vec![Dim::Fixed(5), Dim::Var], ScalarType::Int32.into()),
        )
    }

    #[test]
    fn full_reduction_is_scalar() {
        let t = accounts();
        let total = t.field("amount").unwrap().sum().unwrap();
        assert_eq!(total.dshape(), &DataShape::scalar(ScalarType::Int32));
        assert_eq!(total.to_string(), "sum(t.amount)");
        assert_eq!(
            t.field("amount").unwrap().mean().unwrap().measure(),
            &ScalarType::Float64.into()
        );
        assert_eq!(t.count().unwrap().measure(), &ScalarType::Int32.into());
    }

    #[test]
    fn single_field_record_sum() {
        let s = Expr::symbol(
            "s",
            DataShape::var(Measure::record(vec![("amount", ScalarType::Int32.into())])),
        );
        assert_eq!(s.sum().unwrap().measure(), &ScalarType::Int32.into());
        assert_eq!(s.max().unwrap().measure(), &ScalarType::Int32.into());
    }

    #[test]
    fn axis_is_normalized() {
        let m = matrix();
        let expr = m.reduce(ReductionOp::Sum, Some(&[1, 1]), false).unwrap();
        assert_eq!(expr.dshape().to_string(), "5 * int32");
        assert_eq!(expr.to_string(), "sum(m, axis=(1,))");

        let same = m.reduce(ReductionOp::Sum, Some(&[1, 0]), false).unwrap();
        assert_eq!(same, m.sum().unwrap());
        assert_eq!(same.to_string(), "sum(m)");
    }

    #[test]
    fn keepdims_keeps_unit_dimensions() {
        let m = matrix();
        let expr = m.reduce(ReductionOp::Max, Some(&[0]), true).unwrap();
        assert_eq!(expr.dshape().to_string(), "1 * var * int32");
        assert_eq!(expr.to_string(), "max(m, axis=(0,), keepdims=True)");
    }

    #[test]
    fn axis_out_of_range() {
        let a = vector("a", 3, ScalarType::Float64);
        assert_eq!(
            a.reduce(ReductionOp::Sum, Some(&[1]), false).unwrap_err(),
            ExprError::Shape(ShapeError::AxisOutOfRange { axis: 1, ndim: 1 })
        );
    }

    #[test]
    fn unbiased_flag_is_displayed() {
        let a = vector("a", 3, ScalarType::Float64);
        assert_eq!(a.var(true).unwrap().to_string(), "var(a, unbiased=True)");
        assert_eq!(a.std(false).unwrap().to_string(), "std(a, unbiased=False)");
    }
}
