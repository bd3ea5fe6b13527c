//! Cell values.
//!
//! The reader performs no type coercion: a cell is either the raw token as it
//! appeared in the file or `Null` for the unset placeholder. Typed ordering is
//! the projector's concern (see [`crate::project::ordering`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder Zeek writes for an unset field.
pub const DEFAULT_UNSET_FIELD: &str = "-";

/// Placeholder Zeek writes for an empty container.
pub const DEFAULT_EMPTY_FIELD: &str = "(empty)";

/// A single cell of a [`crate::model::LogTable`].
///
/// Serializes as JSON `null` or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Unset field or missing trailing value
    Null,
    /// Raw token
    Text(String),
}

impl Value {
    /// Build a value from a raw token, mapping the unset marker to `Null`.
    pub fn from_token(token: &str, unset_field: &str) -> Self {
        if token == unset_field {
            Value::Null
        } else {
            Value::Text(token.to_string())
        }
    }

    pub fn text(token: impl Into<String>) -> Self {
        Value::Text(token.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(s),
        }
    }

    /// Finite numeric interpretation of the token, if it has one.
    ///
    /// `nan` and `inf` spellings are treated as text.
    pub fn as_number(&self) -> Option<f64> {
        self.as_str()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|n| n.is_finite())
    }

    /// Exact integer interpretation of the token, if it has one.
    pub fn as_integer(&self) -> Option<i128> {
        self.as_str().and_then(|s| s.parse::<i128>().ok())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str(DEFAULT_UNSET_FIELD),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Option<&str>> for Value {
    fn from(s: Option<&str>) -> Self {
        s.map(Value::from).unwrap_or(Value::Null)
    }
}
