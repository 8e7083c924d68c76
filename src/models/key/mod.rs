//! Identifiers for events and resources.
//!
//! Events and resources arrive from an external store as loose JSON payloads,
//! so ids may be numbers or strings. `Key` keeps both shapes and gives them a
//! total order (integers before text) for deterministic tie-breaking.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier of an event or a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Text(String),
}

impl Key {
    /// Synthetic "unassigned/all" resource of the workload view.
    pub const SENTINEL: Key = Key::Int(0);

    /// Read a key from a scalar payload value.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map(Key::Int),
            Value::String(text) => Some(Key::Text(text.clone())),
            _ => None,
        }
    }

    /// Read one or many keys; arrays assign an event to several resources.
    pub fn keys_from_value(value: &Value) -> Vec<Self> {
        match value {
            Value::Array(items) => items.iter().filter_map(Key::from_value).collect(),
            other => Key::from_value(other).into_iter().collect(),
        }
    }

    /// Parse command-line input: integers stay integers, anything else is text.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        trimmed
            .parse::<i64>()
            .map(Key::Int)
            .unwrap_or_else(|_| Key::Text(trimmed.to_string()))
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(number) => write!(f, "{}", number),
            Key::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Text(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Text(value)
    }
}
