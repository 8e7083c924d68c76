//! Resource model.
//!
//! Resources (people, rooms, queues) are supplied by the host and never
//! mutated. Which payload properties hold the id and display data is decided
//! by [`ResourceFields`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::key::Key;

/// A resource as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource {
    pub payload: Map<String, Value>,
}

impl Resource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a payload field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(name.into(), value.into());
        self
    }

    pub fn key(&self, fields: &ResourceFields) -> Option<Key> {
        self.payload.get(&fields.id_field).and_then(Key::from_value)
    }

    pub fn label(&self, fields: &ResourceFields) -> Option<&str> {
        self.str_field(&fields.text_field)
    }

    pub fn subtext(&self, fields: &ResourceFields) -> Option<&str> {
        self.str_field(&fields.subtext_field)
    }

    pub fn avatar(&self, fields: &ResourceFields) -> Option<&str> {
        self.str_field(&fields.avatar_field)
    }

    pub fn color(&self, fields: &ResourceFields) -> Option<&str> {
        self.str_field(&fields.color_field)
            .filter(|color| !color.is_empty())
    }

    fn str_field(&self, name: &str) -> Option<&str> {
        self.payload.get(name).and_then(Value::as_str)
    }
}

/// Names of the payload properties that describe a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceFields {
    /// Property holding the resource id; events use the same name for their assignment
    pub id_field: String,
    pub text_field: String,
    pub subtext_field: String,
    pub avatar_field: String,
    /// Property holding a color inherited by events that have none
    pub color_field: String,
}

impl Default for ResourceFields {
    fn default() -> Self {
        Self {
            id_field: "assignee".to_string(),
            text_field: "text".to_string(),
            subtext_field: "subtext".to_string(),
            avatar_field: "avatar".to_string(),
            color_field: "color".to_string(),
        }
    }
}
