// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for output and log capture.

use thiserror::Error;

/// Errors surfaced by capture operations
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("invalid verbosity: must be between 1 and 3, got {0}")]
    InvalidVerbosity(u8),

    #[error("invalid view level: must be 2 or 3, got {0}")]
    InvalidViewLevel(u8),

    #[error("failed to serialize log record: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to parse captured log line {line}: {source}")]
    Parse {
        /// 1-based line number within the captured output
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for capture operations
pub type Result<T> = std::result::Result<T, CaptureError>;
