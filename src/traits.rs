use crate::expr::Expr;
use serde::Serialize;

/// Trait that provides methods to serialize objects into JSON, utilizing [serde].
///
/// Expression trees are only ever exported: reading them back would bypass the shape
/// checks done by the constructors.
pub trait JsonSer: Serialize {
    /// Wrapper for json serialization.
    fn to_json_str(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Wrapper for *pretty* json serialization with indentation.
    fn to_pretty_json_str(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl JsonSer for Expr {}
