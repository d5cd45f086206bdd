//! The record transmitted to the ingestion service.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::tags::Tags;

/// One log entry as it appears on the wire.
///
/// Borrows the text and tags from the caller so serialisation does not copy
/// them.
#[derive(Clone, Debug)]
pub struct LogEntry<'a> {
    pub timestamp: DateTime<Utc>,
    pub text: &'a str,
    pub tags: Tags<'a>,
}

impl<'a> LogEntry<'a> {
    /// Build an entry stamped with the current time.
    pub fn now(text: &'a str, tags: Tags<'a>) -> Self {
        Self {
            timestamp: Utc::now(),
            text,
            tags,
        }
    }

    /// Encode the entry as the JSON request body.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for LogEntry<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut entry = serializer.serialize_struct("LogEntry", 3)?;
        entry.serialize_field(
            "timestamp",
            &self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        )?;
        entry.serialize_field("text", self.text)?;
        entry.serialize_field("tags", &self.tags)?;
        entry.end()
    }
}
