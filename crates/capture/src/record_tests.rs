// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use chrono::{TimeZone, Utc};
use yare::parameterized;

fn at_christmas() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2023, 12, 25, 10, 30, 45)
        .unwrap()
        .fixed_offset()
}

#[parameterized(
    debug = { Level::Debug, "DEBUG" },
    info = { Level::Info, "INFO" },
    warn = { Level::Warn, "WARN" },
    error = { Level::Error, "ERROR" },
)]
fn level_names(level: Level, name: &str) {
    assert_eq!(level.as_str(), name);
    assert_eq!(level.to_string(), name);
}

#[parameterized(
    trace = { tracing::Level::TRACE, Level::Debug },
    debug = { tracing::Level::DEBUG, Level::Debug },
    info = { tracing::Level::INFO, Level::Info },
    warn = { tracing::Level::WARN, Level::Warn },
    error = { tracing::Level::ERROR, Level::Error },
)]
fn level_from_tracing(level: tracing::Level, expected: Level) {
    assert_eq!(Level::from(level), expected);
}

#[test]
fn test_attr_flatten_scalars() {
    assert_eq!(Attr::new("user", "alice").flatten(), vec!["user=alice"]);
    assert_eq!(Attr::new("count", 42).flatten(), vec!["count=42"]);
    assert_eq!(Attr::new("active", true).flatten(), vec!["active=true"]);
    assert_eq!(Attr::new("rate", 2.5).flatten(), vec!["rate=2.5"]);
    assert_eq!(Attr::new("big", u64::MAX).flatten(), vec![format!("big={}", u64::MAX)]);
}

#[test]
fn test_attr_flatten_nested_groups() {
    let attr = Attr::group(
        "request",
        vec![
            Attr::new("method", "GET"),
            Attr::group("client", vec![Attr::new("ip", "10.0.0.1")]),
        ],
    );

    assert_eq!(
        attr.flatten(),
        vec!["request.method=GET", "request.client.ip=10.0.0.1"]
    );
}

#[test]
fn test_attr_flatten_empty_group() {
    assert!(Attr::group("empty", vec![]).flatten().is_empty());
}

#[test]
fn test_attr_display() {
    let attr = Attr::group("g", vec![Attr::new("a", 1), Attr::new("b", "x")]);
    assert_eq!(attr.to_string(), "g=[a=1 b=x]");
}

#[test]
fn test_record_builder() {
    let record = LogRecord::new(at_christmas(), Level::Info, "Test message")
        .attr("user", "alice")
        .group("ctx", vec![Attr::new("id", 7)]);

    assert_eq!(record.message, "Test message");
    assert_eq!(record.level, Level::Info);
    assert_eq!(record.attrs.len(), 2);
    assert_eq!(record.flattened_attrs(), vec!["user=alice", "ctx.id=7"]);
}

#[test]
fn test_record_without_attrs() {
    let record = LogRecord::new(at_christmas(), Level::Warn, "bare");
    assert!(record.flattened_attrs().is_empty());
}
