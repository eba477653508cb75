//! Vendor-neutral dispatch events.
//!
//! An event is constructed at the call site, dispatched once, and dropped.
//! Its `data` is deliberately flat: primitives and arrays of primitives only,
//! so every vendor table can forward it without inspecting nested shapes.

use crate::ids::EventId;
use crate::pixel::ALL_PAGES;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// A primitive or array event parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<EventValue>),
}

impl EventValue {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Converts to a JSON value for a native call argument.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

impl From<bool> for EventValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for EventValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<f64> for EventValue {
    fn from(n: f64) -> Self {
        // NaN and infinities have no JSON form.
        Number::from_f64(n).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for EventValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for EventValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<EventValue>> From<Vec<T>> for EventValue {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Event parameters keyed by name. Ordered so mapped calls are deterministic.
pub type EventData = BTreeMap<String, EventValue>;

/// A vendor-neutral application event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchEvent {
    pub id: EventId,
    /// Vendor-neutral name, e.g. `purchase`.
    pub name: String,
    #[serde(default)]
    pub data: EventData,
    pub timestamp: DateTime<Utc>,
    /// Resolved page tag of the call site.
    pub page: String,
}

impl DispatchEvent {
    /// Creates an event with no parameters on an untagged page.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EventId::new(),
            name: name.into(),
            data: EventData::new(),
            timestamp: Utc::now(),
            page: ALL_PAGES.to_string(),
        }
    }

    #[must_use]
    pub fn on_page(mut self, page: impl Into<String>) -> Self {
        self.page = page.into();
        self
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<EventValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: EventData) -> Self {
        self.data = data;
        self
    }
}
