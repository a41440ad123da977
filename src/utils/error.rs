//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::parser::ParsedGcLog;
use std::path::PathBuf;
use thiserror::Error;

/// Cursor into the log used for diagnostics only.
///
/// `line_number` is 1-based, `index` is the byte offset inside the
/// current logical line where the extractors stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsePosition {
    pub line_number: usize,
    pub index: usize,
}

impl ParsePosition {
    pub fn new(line_number: usize) -> Self {
        Self {
            line_number,
            index: 0,
        }
    }
}

/// What went wrong while parsing a single logical line
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("invalid timestamp")]
    InvalidTimestamp,

    #[error("unknown gc type '{0}'")]
    UnknownType(String),

    #[error("missing pause duration")]
    MissingPause,

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("invalid memory size '{0}'")]
    InvalidMemory(String),

    #[error("unrecognized line")]
    Unrecognized,
}

/// Recoverable failure for one line. The reader logs it and moves on.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at line {line_number}, offset {offset}: \"{line}\"")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: String,
    pub line_number: usize,
    pub offset: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: &str, pos: &ParsePosition) -> Self {
        Self {
            kind,
            line: line.to_string(),
            line_number: pos.line_number,
            offset: pos.index,
        }
    }
}

/// Errors that end a read
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The line source failed. `partial` holds everything parsed before it.
    #[error("Failed to read line {line_number}: {source}")]
    Io {
        line_number: usize,
        source: std::io::Error,
        partial: Box<ParsedGcLog>,
    },
}

impl ReadError {
    /// Events and diagnostics collected before the failure, if any
    pub fn into_partial(self) -> Option<ParsedGcLog> {
        match self {
            ReadError::Io { partial, .. } => Some(*partial),
            ReadError::Open { .. } => None,
        }
    }
}

/// Errors that can occur while rendering a model
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
