//! Error types for xylem

use std::fmt;
use thiserror::Error;

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input ended while the scanner was still looking for a construct.
    UnexpectedEof { expected: &'static str },
    /// A scanned name, key or value was not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input, expected {expected}")
            }
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
        }
    }
}

/// Main error type for xylem
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    offset: usize,
}

impl Error {
    /// Create error at a byte offset in the input
    pub fn at(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Byte offset where scanning stopped
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error at offset {}: {}", self.offset, self.kind)
    }
}

/// Result type alias for xylem
pub type Result<T> = std::result::Result<T, Error>;
