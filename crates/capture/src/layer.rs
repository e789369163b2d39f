// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `tracing` layer that forwards events to a [`LogSink`].
//!
//! Lets code instrumented with `tracing` macros be asserted on through a
//! [`LogCapture`](crate::LogCapture):
//!
//! ```
//! use capture_testutil::{Level, LogCapture, SinkLayer};
//! use tracing_subscriber::layer::SubscriberExt;
//!
//! let capture = LogCapture::new();
//! let subscriber = tracing_subscriber::registry().with(SinkLayer::new(capture.clone()));
//! tracing::subscriber::with_default(subscriber, || {
//!     tracing::info!(user = "alice", "logged in");
//! });
//!
//! let entries = capture.entries_by_level(Level::Info).unwrap();
//! assert_eq!(entries[0].message, "logged in");
//! assert_eq!(entries[0].attrs, vec!["user=alice"]);
//! ```

use crate::record::{Attr, Level, LogRecord, Value};
use crate::sink::LogSink;
use crate::time::{Clock, ClockHandle};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// A `tracing` layer that turns events into [`LogRecord`]s for a sink.
pub struct SinkLayer<K> {
    sink: K,
    clock: ClockHandle,
}

impl<K: LogSink> SinkLayer<K> {
    /// Creates a layer stamping records with the system clock.
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            clock: ClockHandle::system(),
        }
    }

    /// Stamp records with `clock` instead.
    pub fn with_clock(mut self, clock: ClockHandle) -> Self {
        self.clock = clock;
        self
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Converts an event into the record handed to the sink.
    fn to_record(&self, event: &Event<'_>) -> LogRecord {
        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);
        LogRecord {
            time: self.clock.now(),
            level: Level::from(*event.metadata().level()),
            message: visitor.message,
            attrs: visitor.attrs,
        }
    }
}

impl<S, K> Layer<S> for SinkLayer<K>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    K: LogSink + 'static,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        !metadata.is_event() || self.sink.enabled(Level::from(*metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let record = self.to_record(event);
        // tracing has no way to hand a sink error back to the logging call site
        let _ = self.sink.handle(&record);
    }
}

/// Splits event fields into the message and typed attributes.
#[derive(Default)]
struct RecordVisitor {
    message: String,
    attrs: Vec<Attr>,
}

impl RecordVisitor {
    fn push(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.attrs.push(Attr::new(field.name(), value));
        }
    }
}

impl Visit for RecordVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, Value::Str(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::I64(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::U64(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, Value::F64(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::Bool(value));
    }
}

#[cfg(test)]
#[path = "layer_tests.rs"]
mod tests;
