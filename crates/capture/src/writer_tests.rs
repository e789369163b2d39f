// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::OutputBuffer;
use std::io;
use std::sync::Arc;

#[derive(Debug)]
struct MultiLine;

impl fmt::Display for MultiLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("line 1\nline 2\nline 3")
    }
}

impl Error for MultiLine {}

#[test]
fn test_error_argument_is_flattened() {
    let out = OutputBuffer::new();
    errorf!(out, "failed: {}\n", MultiLine);

    assert!(out.contains_stderr("line 1; line 2; line 3"));
    assert_eq!(out.stderr(), "failed: line 1; line 2; line 3\n");
}

#[test]
fn test_plain_string_is_not_flattened() {
    let out = OutputBuffer::new();
    errorf!(out, "{}", "line 1\nline 2");
    assert_eq!(out.stderr(), "line 1\nline 2");
}

#[test]
fn test_mixed_arguments() {
    let out = OutputBuffer::new();
    let err = io::Error::other("a\nb");
    errorf!(out, "{} {} {}", 7, err, "x\ny");
    assert_eq!(out.stderr(), "7 a; b x\ny");
}

#[test]
fn test_error_reference_is_flattened() {
    let out = OutputBuffer::new();
    let err = MultiLine;
    let by_ref: &MultiLine = &err;
    let as_dyn: &dyn Error = &err;
    errorf!(out, "{}|{}", by_ref, *as_dyn);
    assert_eq!(out.stderr(), "line 1; line 2; line 3|line 1; line 2; line 3");
}

#[test]
fn test_boxed_errors_are_flattened() {
    let out = OutputBuffer::new();
    let boxed: Box<dyn Error> = Box::new(MultiLine);
    let sendable: Box<dyn Error + Send + Sync> = Box::new(MultiLine);
    let shared: Arc<dyn Error + Send + Sync> = Arc::new(MultiLine);

    errorf!(out, "{}\n", boxed);
    errorf!(out, "{}\n", sendable);
    errorf!(out, "{}\n", shared);

    assert_eq!(
        out.stderr_lines(),
        vec!["line 1; line 2; line 3"; 3],
    );
}

#[test]
fn test_flattened_error_respects_width_and_debug() {
    let out = OutputBuffer::new();
    let err = io::Error::other("x\ny");
    errorf!(out, "[{:>6}] {:?}", err, MultiLine);
    assert_eq!(out.stderr(), "[  x; y] \"line 1; line 2; line 3\"");
}

#[test]
fn test_printf_does_not_flatten() {
    let out = OutputBuffer::new();
    printf!(out, "{}", MultiLine);
    assert_eq!(out.stdout_lines(), vec!["line 1", "line 2", "line 3"]);
}

#[test]
fn test_flatten_error() {
    assert_eq!(flatten_error(&MultiLine), "line 1; line 2; line 3");
    assert_eq!(flatten_error(&io::Error::other("single")), "single");
}

#[test]
fn test_named_error_argument_is_flattened() {
    let out = OutputBuffer::new();
    let err = io::Error::other("line 1\nline 2\nline 3");
    errorf!(out, "failed: {e} ({code})", e = err, code = 2);
    assert_eq!(out.stderr(), "failed: line 1; line 2; line 3 (2)");
}

#[test]
fn test_positional_then_named_arguments() {
    let out = OutputBuffer::new();
    errorf!(out, "{} {tag}: {}", "op", MultiLine, tag = "x\ny",);
    assert_eq!(out.stderr(), "op x\ny: line 1; line 2; line 3");
}

#[test]
fn test_inline_capture_needs_flattened_wrapper() {
    let out = OutputBuffer::new();
    let err = io::Error::other("line 1\nline 2");

    errorf!(out, "raw: {err}\n");
    let err = Flattened::new(&err);
    errorf!(out, "wrapped: {err}\n");

    assert_eq!(out.stderr(), "raw: line 1\nline 2\nwrapped: line 1; line 2\n");
}

#[test]
fn test_errorf_trailing_comma() {
    let out = OutputBuffer::new();
    errorf!(out, "{}-{}", 1, 2,);
    assert_eq!(out.stderr(), "1-2");
}

/// Writer that records calls without gating
#[derive(Clone, Default)]
struct Recorder(Arc<parking_lot::Mutex<Vec<String>>>);

impl Writer for Recorder {
    fn printf(&self, args: fmt::Arguments<'_>) {
        self.0.lock().push(format!("out:{args}"));
    }

    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.0.lock().push(format!("err:{args}"));
    }

    fn loud(&self) -> Box<dyn Writer> {
        Box::new(self.clone())
    }

    fn v2(&self) -> Box<dyn Writer> {
        Box::new(self.clone())
    }

    fn v3(&self) -> Box<dyn Writer> {
        Box::new(self.clone())
    }
}

fn report(writer: &dyn Writer, count: usize) {
    printf!(writer, "processed {} items\n", count);
    printf!(writer.v2(), "details\n");
    errorf!(writer, "warning: {}\n", MultiLine);
}

#[test]
fn test_code_under_test_accepts_any_writer() {
    let recorder = Recorder::default();
    report(&recorder, 2);
    assert_eq!(
        *recorder.0.lock(),
        vec![
            "out:processed 2 items\n".to_string(),
            "out:details\n".to_string(),
            "err:warning: line 1; line 2; line 3\n".to_string(),
        ]
    );

    let out = OutputBuffer::new().with_verbosity(1);
    report(&out, 5);
    assert_eq!(out.stdout(), "processed 5 items\n");
    assert_eq!(out.stderr(), "warning: line 1; line 2; line 3\n");
}
