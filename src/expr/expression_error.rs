use crate::capability::Operation;
use crate::datashape::ShapeError;
use thiserror::Error;

/// An error raised while constructing (or rebuilding) an expression tree.
///
/// All of these are reported eagerly: a successfully constructed [`crate::expr::Expr`]
/// is always well-shaped and well-typed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum ExprError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    /// A single-reduction summary cannot decide which collection it aggregates over.
    #[error("Cannot resolve a unique collection to summarize in `{expression}`")]
    NamingAmbiguity { expression: String },
    /// The expressions share no common ancestor, or more than one maximal one.
    #[error("{}", no_common_message(.expressions, .candidates))]
    NoCommonSubexpression {
        expressions: Vec<String>,
        candidates: Vec<String>,
    },
    /// Names and types cannot be read from the measure of `expression`.
    #[error("Unable to determine name and type of `{expression}` with measure `{measure}`")]
    Schema { expression: String, measure: String },
    #[error("Field `{field}` not found in `{measure}`")]
    UnknownField { field: String, measure: String },
    #[error("Field `{field}` is defined more than once")]
    DuplicateField { field: String },
    #[error("Operation `{operation}` is not defined for `{operands}`")]
    TypeMismatch { operation: String, operands: String },
    #[error("Invalid broadcast: {message}")]
    InvalidBroadcast { message: String },
    #[error("Invalid summary: {message}")]
    InvalidSummary { message: String },
    /// The apply part of a grouping must be a reduction or a summary.
    #[error("Expected a reduction or a summary, but got `{expression}`")]
    InvalidApply { expression: String },
    /// The stored shape of a node differs from the shape derived from its children.
    #[error("Node `{expression}` has shape `{stored}`, but its inputs imply `{derived}`")]
    InconsistentShape {
        expression: String,
        stored: String,
        derived: String,
    },
    #[error("Node `{expression}` has child `{actual}`, expected `{expected}`")]
    InconsistentChild {
        expression: String,
        expected: String,
        actual: String,
    },
    #[error("Operation `{operation}` is not available for `{dshape}`")]
    UnsupportedOperation { operation: Operation, dshape: String },
}

fn no_common_message(expressions: &[String], candidates: &[String]) -> String {
    let expressions = expressions.join("`, `");
    if candidates.is_empty() {
        format!("No common subexpression found among `{expressions}`")
    } else {
        format!(
            "Ambiguous common subexpression among `{expressions}`: candidates `{}`",
            candidates.join("`, `")
        )
    }
}
