// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Log sink capability.

use crate::error::Result;
use crate::record::{Attr, Level, LogRecord};
use std::sync::Arc;

/// Receiver of structured log records
pub trait LogSink: Send + Sync {
    /// Whether records at `level` should be delivered at all
    fn enabled(&self, level: Level) -> bool;

    /// Record one log record
    fn handle(&self, record: &LogRecord) -> Result<()>;

    /// Sink that adds `attrs` to every record
    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn LogSink>;

    /// Sink that nests subsequent attributes under `name`
    fn with_group(&self, name: &str) -> Arc<dyn LogSink>;
}

/// Sink that discards everything, for tests that don't inspect logs
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn handle(&self, _record: &LogRecord) -> Result<()> {
        Ok(())
    }

    fn with_attrs(&self, _attrs: &[Attr]) -> Arc<dyn LogSink> {
        Arc::new(NullSink)
    }

    fn with_group(&self, _name: &str) -> Arc<dyn LogSink> {
        Arc::new(NullSink)
    }
}
