// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory capture of standard and error output.
//!
//! An [`OutputBuffer`] records everything written through its [`Writer`]
//! implementation into two stores. Standard output is gated by the quiet flag
//! and by verbosity; error output always gets through. Derived views
//! ([`OutputBuffer::loud_view`], [`OutputBuffer::level_view`]) write into the
//! same stores under the same lock, so assertions against the buffer see
//! writes issued through any view.

use crate::error::{CaptureError, Result};
use crate::writer::Writer;
use parking_lot::Mutex;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Standard-output verbosity level, always within 1..=3
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Verbosity(u8);

impl Verbosity {
    /// Least detailed level; everything at level 1 is captured
    pub const MIN: Self = Self(1);

    /// Most detailed level
    pub const MAX: Self = Self(3);

    /// Validate a raw verbosity level
    pub fn new(level: u8) -> Result<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&level) {
            Ok(Self(level))
        } else {
            Err(CaptureError::InvalidVerbosity(level))
        }
    }

    /// Raw level
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Verbosity {
    type Error = CaptureError;

    fn try_from(level: u8) -> Result<Self> {
        Self::new(level)
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The well-known derived views of a buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Ignores quiet mode
    Loud,
    /// Standard output requires verbosity 2
    V2,
    /// Standard output requires verbosity 3
    V3,
}

impl ViewKind {
    /// Minimum buffer verbosity for standard output through this view
    pub fn required_level(self) -> Verbosity {
        match self {
            Self::Loud => Verbosity::MIN,
            Self::V2 => Verbosity(2),
            Self::V3 => Verbosity::MAX,
        }
    }
}

/// Output channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Stdout,
    Stderr,
}

/// Quiet override and required level of one writer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Gate {
    quiet: bool,
    required: Verbosity,
}

#[derive(Debug, Default)]
struct ViewCache {
    loud: Option<Gate>,
    v2: Option<Gate>,
    v3: Option<Gate>,
}

impl ViewCache {
    fn slot(&mut self, kind: ViewKind) -> &mut Option<Gate> {
        match kind {
            ViewKind::Loud => &mut self.loud,
            ViewKind::V2 => &mut self.v2,
            ViewKind::V3 => &mut self.v3,
        }
    }
}

#[derive(Debug)]
struct State {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    quiet: bool,
    verbosity: Verbosity,
    views: ViewCache,
}

impl State {
    fn store(&self, channel: Channel) -> &[u8] {
        match channel {
            Channel::Stdout => &self.stdout,
            Channel::Stderr => &self.stderr,
        }
    }

    fn store_mut(&mut self, channel: Channel) -> &mut Vec<u8> {
        match channel {
            Channel::Stdout => &mut self.stdout,
            Channel::Stderr => &mut self.stderr,
        }
    }

    fn passes(&self, gate: Gate) -> bool {
        !gate.quiet && self.verbosity >= gate.required
    }

    fn root_gate(&self) -> Gate {
        Gate {
            quiet: self.quiet,
            required: Verbosity::MIN,
        }
    }
}

fn write_stdout(
    state: &Mutex<State>,
    gate: impl FnOnce(&State) -> Gate,
    args: fmt::Arguments<'_>,
) {
    // Format before locking: Display impls may write to this buffer.
    let text = fmt::format(args);
    let mut state = state.lock();
    let gate = gate(&*state);
    if state.passes(gate) {
        state.stdout.extend_from_slice(text.as_bytes());
    }
}

fn write_stderr(state: &Mutex<State>, args: fmt::Arguments<'_>) {
    let text = fmt::format(args);
    state.lock().stderr.extend_from_slice(text.as_bytes());
}

fn cached_view(state: &Arc<Mutex<State>>, kind: ViewKind) -> OutputView {
    let mut guard = state.lock();
    let quiet = guard.quiet;
    let gate = *guard.views.slot(kind).get_or_insert(Gate {
        quiet: kind != ViewKind::Loud && quiet,
        required: kind.required_level(),
    });
    OutputView {
        kind,
        gate,
        state: Arc::clone(state),
    }
}

fn non_blank_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[allow(clippy::panic)]
fn fatal(err: CaptureError) -> ! {
    panic!("{err}")
}

/// Capturing writer for standard and error output
///
/// Clones share the same stores and settings.
#[derive(Clone, Debug)]
pub struct OutputBuffer {
    state: Arc<Mutex<State>>,
}

impl OutputBuffer {
    /// Create an empty buffer: not quiet, maximum verbosity
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                stdout: Vec::new(),
                stderr: Vec::new(),
                quiet: false,
                verbosity: Verbosity::MAX,
                views: ViewCache::default(),
            })),
        }
    }

    /// Builder-style quiet setting
    pub fn with_quiet(self, quiet: bool) -> Self {
        self.set_quiet(quiet);
        self
    }

    /// Builder-style verbosity setting; panics outside 1..=3
    pub fn with_verbosity(self, verbosity: u8) -> Self {
        self.set_verbosity(verbosity);
        self
    }

    /// Suppress (or restore) standard output written through the buffer
    pub fn set_quiet(&self, quiet: bool) {
        self.state.lock().quiet = quiet;
    }

    /// Set the verbosity level.
    ///
    /// # Panics
    ///
    /// Panics if `verbosity` is outside 1..=3; an invalid level is a mistake
    /// in test setup.
    pub fn set_verbosity(&self, verbosity: u8) {
        if let Err(err) = self.try_set_verbosity(verbosity) {
            fatal(err);
        }
    }

    /// Set the verbosity level, rejecting values outside 1..=3
    pub fn try_set_verbosity(&self, verbosity: u8) -> Result<()> {
        let verbosity = Verbosity::new(verbosity)?;
        self.state.lock().verbosity = verbosity;
        Ok(())
    }

    /// Current quiet setting
    pub fn quiet(&self) -> bool {
        self.state.lock().quiet
    }

    /// Current verbosity
    pub fn verbosity(&self) -> Verbosity {
        self.state.lock().verbosity
    }

    /// Get (creating once) the view of the given kind
    pub fn view(&self, kind: ViewKind) -> OutputView {
        cached_view(&self.state, kind)
    }

    /// View that ignores quiet mode but keeps verbosity gating
    pub fn loud_view(&self) -> OutputView {
        self.view(ViewKind::Loud)
    }

    /// View requiring verbosity `level` (2 or 3) for standard output.
    ///
    /// # Panics
    ///
    /// Panics for any other level.
    pub fn level_view(&self, level: u8) -> OutputView {
        match level {
            2 => self.view(ViewKind::V2),
            3 => self.view(ViewKind::V3),
            other => fatal(CaptureError::InvalidViewLevel(other)),
        }
    }

    /// Clear both stores; views keep pointing at the emptied stores
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.stdout.clear();
        state.stderr.clear();
    }

    /// Captured standard output
    pub fn stdout(&self) -> String {
        self.read(Channel::Stdout)
    }

    /// Captured error output
    pub fn stderr(&self) -> String {
        self.read(Channel::Stderr)
    }

    /// Standard output followed by error output
    pub fn output(&self) -> String {
        let state = self.state.lock();
        let mut all = String::from_utf8_lossy(&state.stdout).into_owned();
        all.push_str(&String::from_utf8_lossy(&state.stderr));
        all
    }

    pub fn contains_stdout(&self, needle: &str) -> bool {
        self.stdout().contains(needle)
    }

    pub fn contains_stderr(&self, needle: &str) -> bool {
        self.stderr().contains(needle)
    }

    /// True if either channel contains `needle`
    pub fn contains_output(&self, needle: &str) -> bool {
        let state = self.state.lock();
        String::from_utf8_lossy(&state.stdout).contains(needle)
            || String::from_utf8_lossy(&state.stderr).contains(needle)
    }

    /// Non-blank standard output lines, each trimmed
    pub fn stdout_lines(&self) -> Vec<String> {
        non_blank_lines(self.state.lock().store(Channel::Stdout))
    }

    /// Non-blank error output lines, each trimmed
    pub fn stderr_lines(&self) -> Vec<String> {
        non_blank_lines(self.state.lock().store(Channel::Stderr))
    }

    pub fn count_stdout_lines(&self) -> usize {
        self.stdout_lines().len()
    }

    pub fn count_stderr_lines(&self) -> usize {
        self.stderr_lines().len()
    }

    /// Ungated `io::Write` handle appending to standard output
    pub fn stdout_stream(&self) -> RawStream {
        self.stream(Channel::Stdout)
    }

    /// `io::Write` handle appending to error output
    pub fn stderr_stream(&self) -> RawStream {
        self.stream(Channel::Stderr)
    }

    fn stream(&self, channel: Channel) -> RawStream {
        RawStream {
            channel,
            state: Arc::clone(&self.state),
        }
    }

    fn read(&self, channel: Channel) -> String {
        String::from_utf8_lossy(self.state.lock().store(channel)).into_owned()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for OutputBuffer {
    fn printf(&self, args: fmt::Arguments<'_>) {
        write_stdout(&self.state, State::root_gate, args);
    }

    fn errorf(&self, args: fmt::Arguments<'_>) {
        write_stderr(&self.state, args);
    }

    fn loud(&self) -> Box<dyn Writer> {
        Box::new(self.loud_view())
    }

    fn v2(&self) -> Box<dyn Writer> {
        Box::new(self.view(ViewKind::V2))
    }

    fn v3(&self) -> Box<dyn Writer> {
        Box::new(self.view(ViewKind::V3))
    }
}

/// Differently gated writer over a buffer's stores
///
/// The quiet override is fixed when the view is first created; the required
/// level is checked against the buffer's verbosity at write time.
#[derive(Clone, Debug)]
pub struct OutputView {
    kind: ViewKind,
    gate: Gate,
    state: Arc<Mutex<State>>,
}

impl OutputView {
    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    /// Whether standard output through this view is suppressed by quiet mode
    pub fn is_quiet(&self) -> bool {
        self.gate.quiet
    }

    pub fn required_level(&self) -> Verbosity {
        self.gate.required
    }

    /// True if both views write into the same buffer
    pub fn shares_buffer(&self, buffer: &OutputBuffer) -> bool {
        Arc::ptr_eq(&self.state, &buffer.state)
    }
}

impl Writer for OutputView {
    fn printf(&self, args: fmt::Arguments<'_>) {
        let gate = self.gate;
        write_stdout(&self.state, |_| gate, args);
    }

    fn errorf(&self, args: fmt::Arguments<'_>) {
        write_stderr(&self.state, args);
    }

    fn loud(&self) -> Box<dyn Writer> {
        Box::new(cached_view(&self.state, ViewKind::Loud))
    }

    fn v2(&self) -> Box<dyn Writer> {
        Box::new(cached_view(&self.state, ViewKind::V2))
    }

    fn v3(&self) -> Box<dyn Writer> {
        Box::new(cached_view(&self.state, ViewKind::V3))
    }
}

/// `io::Write` adapter appending raw bytes to one channel of a buffer
///
/// Writes are not gated by quiet or verbosity.
#[derive(Clone, Debug)]
pub struct RawStream {
    channel: Channel,
    state: Arc<Mutex<State>>,
}

impl RawStream {
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

impl io::Write for RawStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.state
            .lock()
            .store_mut(self.channel)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
