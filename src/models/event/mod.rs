// Event module
// Time-bounded entity laid out by the scheduler

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::key::Key;

/// A scheduled event as supplied by the data source.
///
/// Only `event_id`, `start`, `end` and `all_day` are interpreted by the layout
/// engine. Everything else (title, color, resource assignment) lives in the
/// flattened `payload` and is read through the configured field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: Key,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, alias = "allDay")]
    pub all_day: bool,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Event {
    /// Create an event with an empty payload.
    ///
    /// No validation happens here: a malformed interval is clamped when the
    /// event is laid out rather than rejected.
    ///
    /// # Examples
    /// ```
    /// use rust_scheduler::models::event::Event;
    /// use chrono::{Duration, Utc};
    ///
    /// let start = Utc::now();
    /// let event = Event::new(1, start, start + Duration::minutes(30))
    ///     .with_field("title", "Standup")
    ///     .with_field("assignee", 3);
    /// assert_eq!(event.title(), Some("Standup"));
    /// ```
    pub fn new(event_id: impl Into<Key>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            event_id: event_id.into(),
            start,
            end,
            all_day: false,
            payload: Map::new(),
        }
    }

    /// Set a payload field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(name.into(), value.into());
        self
    }

    /// Mark the event as all-day
    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    pub fn title(&self) -> Option<&str> {
        self.field("title").and_then(Value::as_str)
    }

    pub fn color(&self) -> Option<&str> {
        self.field("color")
            .and_then(Value::as_str)
            .filter(|color| !color.is_empty())
    }

    /// Resources this event is assigned to, read from `id_field`.
    pub fn resource_keys(&self, id_field: &str) -> Vec<Key> {
        self.field(id_field)
            .map(Key::keys_from_value)
            .unwrap_or_default()
    }

    /// Validate the interval
    pub fn validate(&self) -> Result<(), String> {
        if self.end < self.start {
            return Err("Event end time must not be before start time".to_string());
        }
        Ok(())
    }

    /// Get the duration of the event (never negative)
    pub fn duration(&self) -> Duration {
        (self.end - self.start).max(Duration::zero())
    }
}
