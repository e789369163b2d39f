// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output and log capture for test assertions.
//!
//! This crate records what a program printed or logged in memory, so unit
//! tests can assert on it without touching real standard streams or log
//! sinks:
//!
//! - [`OutputBuffer`] captures standard and error output written through the
//!   [`Writer`] capability, with quiet mode and verbosity gating.
//! - [`LogCapture`] is a [`LogSink`] that stores each record as a JSON line
//!   and parses them back as raw maps or typed [`LogEntry`] values.
//! - [`SinkLayer`] feeds `tracing` events into any sink, and
//!   [`CaptureSession`] wires both captures together for one test.

mod entry;
mod error;
mod layer;
mod log;
mod output;
mod record;
mod session;
mod sink;
mod time;
mod writer;

pub use entry::{LogEntries, LogEntry, DATETIME_FORMAT};
pub use error::{CaptureError, Result};
pub use layer::SinkLayer;
pub use log::{LogCapture, RawEntry};
pub use output::{Channel, OutputBuffer, OutputView, RawStream, Verbosity, ViewKind};
pub use record::{Attr, Level, LogRecord, Value};
pub use session::CaptureSession;
pub use sink::{LogSink, NullSink};
pub use time::{Clock, ClockHandle, FakeClock, SystemClock};
pub use writer::{flatten_error, Flattened, Writer};

#[doc(hidden)]
pub mod __private {
    pub use crate::writer::{
        BoxedError, ErrorProbe, FlattenBoxedError, FlattenError, PassThrough,
    };
}
