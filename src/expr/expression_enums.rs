use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of expression variants, used mainly to describe which variants an
/// algorithm may walk through (see [`crate::broadcast::leaves_of_type`]).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum ExprKind {
    Symbol,
    Literal,
    Arithmetic,
    Math,
    Field,
    Map,
    DateTime,
    Broadcast,
    Reduction,
    Summary,
    By,
    Sort,
    Distinct,
}

/// A scalar constant appearing in an expression.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    String(String),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Bool(value) => write!(f, "{value}"),
            LiteralValue::Int(value) => write!(f, "{value}"),
            LiteralValue::Float(value) => write!(f, "{:?}", value.0),
            LiteralValue::String(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        LiteralValue::Bool(value)
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        LiteralValue::Int(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        LiteralValue::Int(i64::from(value))
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        LiteralValue::Float(OrderedFloat(value))
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::String(value.to_string())
    }
}

/// Binary element-wise operators.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    #[must_use]
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }

    #[must_use]
    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
        };
        write!(f, "{symbol}")
    }
}

/// Unary element-wise operators.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "~"),
        }
    }
}

/// Math functions with a real-valued result.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum RealFn {
    Sqrt,
    Sin,
    Sinh,
    Cos,
    Cosh,
    Tan,
    Tanh,
    Exp,
    Expm1,
    Log,
    Log10,
    Log1p,
    Acos,
    Acosh,
    Asin,
    Asinh,
    Atan,
    Atanh,
    Radians,
    Degrees,
}

/// Math functions with an integer-valued result.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum IntegerFn {
    Ceil,
    Floor,
    Trunc,
}

/// Math predicates with a boolean result.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum BooleanFn {
    IsNan,
}

/// A unary math function, tagged by its result category.
///
/// The category alone decides the result type (see [`MathFn::result_type`]),
/// the inner tag only names the function for the backend.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum MathFn {
    Real(RealFn),
    Integer(IntegerFn),
    Boolean(BooleanFn),
}

impl MathFn {
    #[must_use]
    pub fn result_type(&self) -> crate::datashape::ScalarType {
        use crate::datashape::ScalarType;
        match self {
            MathFn::Real(_) => ScalarType::REAL,
            MathFn::Integer(_) => ScalarType::INT,
            MathFn::Boolean(_) => ScalarType::Bool,
        }
    }
}

impl fmt::Display for MathFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MathFn::Real(function) => match function {
                RealFn::Sqrt => "sqrt",
                RealFn::Sin => "sin",
                RealFn::Sinh => "sinh",
                RealFn::Cos => "cos",
                RealFn::Cosh => "cosh",
                RealFn::Tan => "tan",
                RealFn::Tanh => "tanh",
                RealFn::Exp => "exp",
                RealFn::Expm1 => "expm1",
                RealFn::Log => "log",
                RealFn::Log10 => "log10",
                RealFn::Log1p => "log1p",
                RealFn::Acos => "acos",
                RealFn::Acosh => "acosh",
                RealFn::Asin => "asin",
                RealFn::Asinh => "asinh",
                RealFn::Atan => "atan",
                RealFn::Atanh => "atanh",
                RealFn::Radians => "radians",
                RealFn::Degrees => "degrees",
            },
            MathFn::Integer(function) => match function {
                IntegerFn::Ceil => "ceil",
                IntegerFn::Floor => "floor",
                IntegerFn::Trunc => "trunc",
            },
            MathFn::Boolean(BooleanFn::IsNan) => "isnan",
        };
        write!(f, "{name}")
    }
}

/// Parts that can be extracted from temporal values.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum DateTimePart {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Date,
    Time,
}

impl fmt::Display for DateTimePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateTimePart::Year => "year",
            DateTimePart::Month => "month",
            DateTimePart::Day => "day",
            DateTimePart::Hour => "hour",
            DateTimePart::Minute => "minute",
            DateTimePart::Second => "second",
            DateTimePart::Millisecond => "millisecond",
            DateTimePart::Microsecond => "microsecond",
            DateTimePart::Date => "date",
            DateTimePart::Time => "time",
        };
        write!(f, "{name}")
    }
}
