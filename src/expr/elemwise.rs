//! Element-wise operators: arithmetic, math functions, field projection, mapping and
//! date/time extraction.
//!
//! The shape of an element-wise node is always the broadcast of its inputs' shapes
//! (see [`max_shape`]), its measure is given by a per-variant scalar rule.

use crate::datashape::{DataShape, Measure, ScalarType, max_shape};
use crate::expr::{
    BinaryOp, BooleanFn, DateTimePart, Expr, ExprError, ExprNodeData, IntegerFn, LiteralValue,
    MathFn, RealFn, UnaryOp,
};

/// Constructors of leaves and element-wise nodes.
impl Expr {
    /// Create a [`Expr`] representing a scalar constant.
    ///
    /// See also [`ExprNodeData::Literal`].
    #[must_use]
    pub fn literal<V: Into<LiteralValue>>(value: V) -> Expr {
        Expr::from_data(ExprNodeData::Literal(value.into()))
            .expect("Invariant violation: Literal shape is always defined.")
    }

    /// Create a binary element-wise [`Expr`] from the given arguments.
    pub fn binary(op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Result<Expr, ExprError> {
        Expr::from_data(ExprNodeData::BinOp {
            op,
            lhs: lhs.clone(),
            rhs: rhs.clone(),
        })
    }

    pub fn unary(op: UnaryOp, child: &Expr) -> Result<Expr, ExprError> {
        Expr::from_data(ExprNodeData::UnaryOp {
            op,
            child: child.clone(),
        })
    }

    pub fn math(func: MathFn, child: &Expr) -> Result<Expr, ExprError> {
        Expr::from_data(ExprNodeData::Math {
            func,
            child: child.clone(),
        })
    }

    /// Project a field of a record-valued expression.
    pub fn field(&self, name: &str) -> Result<Expr, ExprError> {
        Expr::from_data(ExprNodeData::Field {
            child: self.clone(),
            name: name.to_string(),
        })
    }

    /// Map a named scalar function with the declared output `schema` over every element.
    pub fn map<S: Into<String>>(&self, func: S, schema: Measure) -> Result<Expr, ExprError> {
        Expr::from_data(ExprNodeData::Map {
            child: self.clone(),
            func: func.into(),
            schema,
        })
    }

    pub fn datetime(&self, part: DateTimePart) -> Result<Expr, ExprError> {
        Expr::from_data(ExprNodeData::DateTime {
            child: self.clone(),
            part,
        })
    }
}

/// Operator shorthands.
impl Expr {
    pub fn add(&self, other: &Expr) -> Result<Expr, ExprError> {
        Expr::binary(BinaryOp::Add, self, other)
    }

    pub fn sub(&self, other: &Expr) -> Result<Expr, ExprError> {
        Expr::binary(BinaryOp::Sub, self, other)
    }

    pub fn mul(&self, other: &Expr) -> Result<Expr, ExprError> {
        Expr::binary(BinaryOp::Mul, self, other)
    }

    pub fn div(&self, other: &Expr) -> Result<Expr, ExprError> {
        Expr::binary(BinaryOp::Div, self, other)
    }

    pub fn floor_div(&self, other: &Expr) -> Result<Expr, ExprError> {
        Expr::binary(BinaryOp::FloorDiv, self, other)
    }

    pub fn modulo(&self, other: &Expr) -> Result<Expr, ExprError> {
        Expr::binary(BinaryOp::Mod, self, other)
    }

    pub fn pow(&self, other: &Expr) -> Result<Expr, ExprError> {
        Expr::binary(BinaryOp::Pow, self, other)
    }

    pub fn equal(&self, other: &Expr) -> Result<Expr, ExprError> {
        Expr::binary(BinaryOp::Eq, self, other)
    }

    pub fn less(&self, other: &Expr) -> Result<Expr, ExprError> {
        Expr::binary(BinaryOp::Lt, self, other)
    }

    pub fn greater(&self, other: &Expr) -> Result<Expr, ExprError> {
        Expr::binary(BinaryOp::Gt, self, other)
    }

    pub fn and(&self, other: &Expr) -> Result<Expr, ExprError> {
        Expr::binary(BinaryOp::And, self, other)
    }

    pub fn or(&self, other: &Expr) -> Result<Expr, ExprError> {
        Expr::binary(BinaryOp::Or, self, other)
    }

    pub fn negate(&self) -> Result<Expr, ExprError> {
        Expr::unary(UnaryOp::Neg, self)
    }

    pub fn invert(&self) -> Result<Expr, ExprError> {
        Expr::unary(UnaryOp::Not, self)
    }

    pub fn sqrt(&self) -> Result<Expr, ExprError> {
        Expr::math(MathFn::Real(RealFn::Sqrt), self)
    }

    pub fn sin(&self) -> Result<Expr, ExprError> {
        Expr::math(MathFn::Real(RealFn::Sin), self)
    }

    pub fn cos(&self) -> Result<Expr, ExprError> {
        Expr::math(MathFn::Real(RealFn::Cos), self)
    }

    pub fn exp(&self) -> Result<Expr, ExprError> {
        Expr::math(MathFn::Real(RealFn::Exp), self)
    }

    pub fn log(&self) -> Result<Expr, ExprError> {
        Expr::math(MathFn::Real(RealFn::Log), self)
    }

    pub fn ceil(&self) -> Result<Expr, ExprError> {
        Expr::math(MathFn::Integer(IntegerFn::Ceil), self)
    }

    pub fn floor(&self) -> Result<Expr, ExprError> {
        Expr::math(MathFn::Integer(IntegerFn::Floor), self)
    }

    pub fn isnan(&self) -> Result<Expr, ExprError> {
        Expr::math(MathFn::Boolean(BooleanFn::IsNan), self)
    }
}

fn type_mismatch(operation: impl ToString, operands: &[&Expr]) -> ExprError {
    let operands = operands
        .iter()
        .map(|e| e.measure().to_string())
        .collect::<Vec<_>>();
    ExprError::TypeMismatch {
        operation: operation.to_string(),
        operands: operands.join(", "),
    }
}

fn is_literal(expr: &Expr) -> bool {
    matches!(expr.as_data(), ExprNodeData::Literal(_))
}

/// The result type of numeric arithmetic. Literals are "weak": they adopt the type
/// of the other operand unless that would lose the fractional part.
fn promote_operands(
    lhs: &Expr,
    left: ScalarType,
    rhs: &Expr,
    right: ScalarType,
) -> Option<ScalarType> {
    fn weak(literal: ScalarType, other: ScalarType) -> ScalarType {
        if literal.is_integral() || other.is_floating() {
            other
        } else {
            ScalarType::REAL
        }
    }

    if !left.is_numeric() || !right.is_numeric() {
        return None;
    }
    match (is_literal(lhs), is_literal(rhs)) {
        (true, false) => Some(weak(left, right)),
        (false, true) => Some(weak(right, left)),
        _ => left.promote(right),
    }
}

pub(crate) fn literal_type(value: &LiteralValue) -> ScalarType {
    match value {
        LiteralValue::Bool(_) => ScalarType::Bool,
        LiteralValue::Int(_) => ScalarType::Int64,
        LiteralValue::Float(_) => ScalarType::Float64,
        LiteralValue::String(_) => ScalarType::String,
    }
}

pub(crate) fn binary_dshape(op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Result<DataShape, ExprError> {
    let dims = max_shape([lhs.shape(), rhs.shape()])?;
    let (Some(left), Some(right)) = (lhs.measure().as_scalar(), rhs.measure().as_scalar()) else {
        return Err(type_mismatch(op, &[lhs, rhs]));
    };

    let result = if op.is_logical() {
        (left == ScalarType::Bool && right == ScalarType::Bool).then_some(ScalarType::Bool)
    } else if op.is_comparison() {
        let comparable = (left.is_numeric() && right.is_numeric()) || left == right;
        comparable.then_some(ScalarType::Bool)
    } else if op == BinaryOp::Add && left == ScalarType::String && right == ScalarType::String {
        Some(ScalarType::String)
    } else {
        promote_operands(lhs, left, rhs, right).map(|promoted| match op {
            BinaryOp::Div => promoted.to_floating(),
            _ => promoted,
        })
    };

    let Some(result) = result else {
        return Err(type_mismatch(op, &[lhs, rhs]));
    };
    let optional = lhs.measure().is_optional() || rhs.measure().is_optional();
    Ok(DataShape::new(
        dims,
        Measure::Scalar(result).optional_if(optional),
    ))
}

pub(crate) fn unary_dshape(op: UnaryOp, child: &Expr) -> Result<DataShape, ExprError> {
    let accepted = match op {
        UnaryOp::Neg => child.measure().is_numeric(),
        UnaryOp::Not => child.measure().is_boolean(),
    };
    if !accepted {
        return Err(type_mismatch(op, &[child]));
    }
    Ok(child.dshape().clone())
}

pub(crate) fn math_dshape(func: MathFn, child: &Expr) -> Result<DataShape, ExprError> {
    if !child.measure().is_numeric() {
        return Err(type_mismatch(func, &[child]));
    }
    let measure = Measure::Scalar(func.result_type()).optional_if(child.measure().is_optional());
    Ok(DataShape::new(child.shape().to_vec(), measure))
}

pub(crate) fn field_dshape(child: &Expr, name: &str) -> Result<DataShape, ExprError> {
    let Some(measure) = child.measure().field(name) else {
        return Err(ExprError::UnknownField {
            field: name.to_string(),
            measure: child.measure().to_string(),
        });
    };
    let measure = measure.clone().optional_if(child.measure().is_optional());
    Ok(DataShape::new(child.shape().to_vec(), measure))
}

pub(crate) fn datetime_dshape(child: &Expr, part: DateTimePart) -> Result<DataShape, ExprError> {
    use ScalarType::{Date, DateTime, Time};

    let input = child.measure().as_scalar();
    let (accepted, result) = match part {
        DateTimePart::Year | DateTimePart::Month | DateTimePart::Day => {
            (matches!(input, Some(Date | DateTime)), ScalarType::INT)
        }
        DateTimePart::Hour
        | DateTimePart::Minute
        | DateTimePart::Second
        | DateTimePart::Millisecond
        | DateTimePart::Microsecond => (matches!(input, Some(Time | DateTime)), ScalarType::INT),
        DateTimePart::Date => (input == Some(DateTime), Date),
        DateTimePart::Time => (input == Some(DateTime), Time),
    };
    if !accepted {
        return Err(type_mismatch(part, &[child]));
    }
    let measure = Measure::Scalar(result).optional_if(child.measure().is_optional());
    Ok(DataShape::new(child.shape().to_vec(), measure))
}
