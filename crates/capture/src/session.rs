// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-test capture session.
//!
//! A session bundles an [`OutputBuffer`] and a [`LogCapture`] and is passed
//! by reference to the code under test. There is no process-wide logger, so
//! tests using separate sessions can run in parallel without seeing each
//! other's output.

use crate::layer::SinkLayer;
use crate::log::LogCapture;
use crate::output::OutputBuffer;
use crate::time::ClockHandle;
use tracing::Dispatch;
use tracing_subscriber::layer::SubscriberExt;

/// Output and log capture for one test
#[derive(Clone, Debug, Default)]
pub struct CaptureSession {
    output: OutputBuffer,
    logs: LogCapture,
    clock: ClockHandle,
}

impl CaptureSession {
    /// Create a session with empty captures and the system clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp `tracing` records with `clock`
    pub fn with_clock(mut self, clock: ClockHandle) -> Self {
        self.clock = clock;
        self
    }

    /// Captured program output
    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    /// Captured log records
    pub fn logs(&self) -> &LogCapture {
        &self.logs
    }

    pub fn clock(&self) -> &ClockHandle {
        &self.clock
    }

    /// A `tracing` dispatcher that records events into this session's logs
    pub fn dispatch(&self) -> Dispatch {
        let layer = SinkLayer::new(self.logs.clone()).with_clock(self.clock.clone());
        Dispatch::new(tracing_subscriber::registry().with(layer))
    }

    /// Run `f` with this session's dispatcher as the thread's default
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch(), f)
    }

    /// Clear captured output and logs
    pub fn reset(&self) {
        self.output.reset();
        self.logs.reset();
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
