// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parsed log entries and their line format.

use crate::record::LogRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp layout of the `datetime` field
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One captured log line
///
/// Serializes to a single-line JSON object. `level` and `datetime` are left
/// out when empty, `attrs` when there are none; `omit_datetime` only affects
/// [`Display`](fmt::Display) and is never serialized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub level: String,

    pub message: String,

    #[serde(
        rename = "datetime",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub date_time: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<String>,

    #[serde(skip)]
    pub omit_datetime: bool,
}

impl LogEntry {
    /// Build an entry from a record, flattening its attributes
    pub fn from_record(record: &LogRecord) -> Self {
        Self {
            level: record.level.as_str().to_string(),
            message: record.message.clone(),
            date_time: record.time.format(DATETIME_FORMAT).to_string(),
            attrs: record.flattened_attrs(),
            omit_datetime: false,
        }
    }

    /// Attributes joined by single spaces
    pub fn attrs_string(&self) -> String {
        self.attrs.join(" ")
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;
        if !self.omit_datetime {
            write!(f, " at {}", self.date_time)?;
        }
        write!(f, " [{}]", self.attrs_string())
    }
}

/// Sequence of entries, rendered joined by `;`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogEntries(pub Vec<LogEntry>);

impl fmt::Display for LogEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl From<Vec<LogEntry>> for LogEntries {
    fn from(entries: Vec<LogEntry>) -> Self {
        Self(entries)
    }
}

impl std::ops::Deref for LogEntries {
    type Target = [LogEntry];

    fn deref(&self) -> &[LogEntry] {
        &self.0
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
