use std::io;

use thiserror::Error;

/// Which container form the restricted scanner refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Array,
    Object,
}

impl core::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ContainerKind::Array => f.write_str("array"),
            ContainerKind::Object => f.write_str("object"),
        }
    }
}

/// What went wrong while scanning a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanErrorKind {
    #[error("unexpected token")]
    UnexpectedToken,

    #[error("unexpected end of row")]
    UnexpectedEnd,

    #[error("unterminated string")]
    UnterminatedString,

    #[error("invalid escape sequence")]
    InvalidEscape,

    #[error("control character in string")]
    ControlCharacter,

    #[error("expected ':' after object key")]
    ExpectedColon,

    #[error("expected ',' or closing delimiter")]
    ExpectedCommaOrClose,

    #[error("expected object key string")]
    ExpectedKey,

    #[error("extra data after row")]
    TrailingCharacters,

    #[error("{0} values not allowed")]
    ContainerNotPermitted(ContainerKind),
}

/// Scanner-level error: a kind plus the byte offset it was detected at.
///
/// Offsets from [`tokenize_row`](crate::decode::row::tokenize_row) refer to
/// columns in the trimmed source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at column {pos}")]
pub struct ScanError {
    pub pos: usize,
    pub kind: ScanErrorKind,
}

impl ScanError {
    pub(crate) fn new(pos: usize, kind: ScanErrorKind) -> Self {
        Self { pos, kind }
    }
}

/// Header lines that tokenize but do not resolve to field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("{0}")]
    Invalid(&'static str),
}

/// Document-level error, carrying the 1-based source line.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}, column {column}: {kind}")]
    Scan {
        line: usize,
        column: usize,
        kind: ScanErrorKind,
    },

    #[error("line {line}: {message}")]
    Header { line: usize, message: String },

    #[error("line {line}: row has {found} values, expected {expected}")]
    Arity {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[cfg(feature = "json")]
    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
