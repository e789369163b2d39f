// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capturing log sink implementation.

use crate::entry::LogEntry;
use crate::error::{CaptureError, Result};
use crate::record::{Attr, Level, LogRecord};
use crate::sink::LogSink;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Generic parsed form of one captured line
pub type RawEntry = Map<String, Value>;

/// Log sink that keeps every record as a JSON line in memory
///
/// Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Create an empty capture
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the raw captured bytes
    pub fn buffer(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    /// Raw captured output as text
    pub fn string(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Clear all captured records
    pub fn reset(&self) {
        self.buffer.lock().clear();
    }

    /// Substring search over the raw captured output
    pub fn contains(&self, needle: &str) -> bool {
        self.string().contains(needle)
    }

    /// Number of captured records
    pub fn len(&self) -> usize {
        lines(&self.buffer.lock()).count()
    }

    /// Check if nothing has been captured
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse every captured line as a generic JSON object
    pub fn entries(&self) -> Result<Vec<RawEntry>> {
        self.parse_all(|_: &RawEntry| true)
    }

    /// Parse every captured line and keep the entries logged at `level`.
    ///
    /// Returned entries have their level cleared and `omit_datetime` set, so
    /// they render as `"<message> [<attrs>]"` in level-scoped assertions.
    pub fn entries_by_level(&self, level: Level) -> Result<Vec<LogEntry>> {
        let mut entries = self.parse_all(|entry: &LogEntry| entry.level == level.as_str())?;
        for entry in &mut entries {
            entry.level.clear();
            entry.omit_datetime = true;
        }
        Ok(entries)
    }

    /// Parse all lines, failing on the first malformed one
    fn parse_all<T, F>(&self, keep: F) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        let buffer = self.buffer.lock();
        let mut out = Vec::new();
        for (index, line) in lines(&buffer) {
            let parsed: T = serde_json::from_slice(line).map_err(|source| CaptureError::Parse {
                line: index + 1,
                source,
            })?;
            if keep(&parsed) {
                out.push(parsed);
            }
        }
        Ok(out)
    }
}

/// Non-blank lines with their 0-based position in the buffer
fn lines(buffer: &[u8]) -> impl Iterator<Item = (usize, &[u8])> {
    buffer
        .split(|b| *b == b'\n')
        .enumerate()
        .filter(|(_, line)| !line.iter().all(u8::is_ascii_whitespace))
}

impl LogSink for LogCapture {
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    /// Appends one JSON line. [`CaptureError::Serialize`] is part of the
    /// sink contract; an all-string [`LogEntry`] never actually fails to encode.
    fn handle(&self, record: &LogRecord) -> Result<()> {
        let entry = LogEntry::from_record(record);
        let mut line = serde_json::to_vec(&entry).map_err(CaptureError::Serialize)?;
        line.push(b'\n');
        self.buffer.lock().extend_from_slice(&line);
        Ok(())
    }

    /// Returns a handle to this same capture; attributes are attached per record.
    fn with_attrs(&self, _attrs: &[Attr]) -> Arc<dyn LogSink> {
        Arc::new(self.clone())
    }

    /// Returns a handle to this same capture; groups are attached per record.
    fn with_group(&self, _name: &str) -> Arc<dyn LogSink> {
        Arc::new(self.clone())
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
