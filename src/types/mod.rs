//! Record and field types.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::ser::Serializer;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Level;

/// `@timestamp` format: ISO-8601 UTC with millisecond precision.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// A single structured key/value pair attached to a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Field name as it appears in the emitted JSON object.
    pub key: String,
    /// Field value.
    pub value: Value,
}

impl Field {
    /// Creates a field from any value that converts to JSON.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a field rendering a duration as fractional seconds.
    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, value.as_secs_f64())
    }

    /// Creates a field rendering any displayable value as a string.
    pub fn display(key: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(key, value.to_string())
    }
}

/// Shorthand for [`Field::new`].
pub fn field(key: impl Into<String>, value: impl Into<Value>) -> Field {
    Field::new(key, value)
}

/// A fully assembled log record, ready for encoding.
///
/// Serializes to a single JSON object with fixed field names. Persistent
/// and call-site fields are flattened into the same object; on a key
/// collision the call-site field wins.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// Record severity, rendered upper-case (`"INFO"`).
    pub level: Level,
    /// Emission time in UTC.
    #[serde(rename = "@timestamp", serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Dotted logger name; omitted for unnamed loggers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger_name: Option<String>,
    /// Call site in short `dir/file.rs:line` form.
    pub caller: String,
    /// Record message.
    pub message: String,
    /// Flattened structured fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    /// Captured backtrace; present at [`Level::Error`] and above.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl Record {
    /// Assembles a record from its parts, stamped with the current time.
    ///
    /// Persistent fields are merged with call-site fields; a call-site field
    /// replaces a persistent field with the same key.
    pub fn new(
        level: Level,
        logger_name: Option<String>,
        caller: String,
        message: &str,
        persistent: &[Field],
        call: &[Field],
    ) -> Self {
        let mut fields = Map::new();
        for f in persistent.iter().chain(call.iter()) {
            fields.insert(f.key.clone(), f.value.clone());
        }

        Self {
            level,
            timestamp: Utc::now(),
            logger_name,
            caller,
            message: message.to_string(),
            fields,
            stack_trace: None,
        }
    }
}

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
}
