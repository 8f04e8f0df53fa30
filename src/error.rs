//! Error types for the editing core.

use crate::highlight::RuleId;
use std::fmt;
use std::io;
use std::str::Utf8Error;

/// Result type alias for fallible core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for fallible core operations.
///
/// Contract violations (an out-of-range line passed to a non-clamping API) are
/// not represented here; those panic.
#[derive(Debug)]
pub enum Error {
    /// I/O error while streaming document content.
    Io(io::Error),
    /// Initial content was not valid UTF-8.
    InvalidUtf8(Utf8Error),
    /// A highlighting pattern failed to compile.
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    /// A start pattern matches the empty string and would never advance.
    EmptyMatchPattern { pattern: String },
    /// Two rules in one language were given the same identifier.
    DuplicateRule(RuleId),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidUtf8(e) => write!(f, "content is not valid UTF-8: {e}"),
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid highlight pattern {pattern:?}: {source}")
            }
            Self::EmptyMatchPattern { pattern } => {
                write!(f, "highlight pattern {pattern:?} matches the empty string")
            }
            Self::DuplicateRule(id) => write!(f, "duplicate highlight rule id {}", id.get()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidUtf8(e) => Some(e),
            Self::InvalidPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<Utf8Error> for Error {
    fn from(e: Utf8Error) -> Self {
        Self::InvalidUtf8(e)
    }
}
