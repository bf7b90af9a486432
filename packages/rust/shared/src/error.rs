//! Error types for transcribe.
//!
//! Library crates use [`TranscribeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for reporting.

use std::path::PathBuf;

/// Top-level error type for all transcribe operations.
///
/// Every variant is fatal to the call that produced it; transcription never
/// returns partial output.
#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    /// Heading level outside `[1, 6]` or not an integer.
    #[error("{message}")]
    Range { message: String },

    /// Missing or malformed configuration (e.g. no URL template).
    #[error("{message}")]
    Config { message: String },

    /// A heading line whose signature could not be parsed.
    #[error("{file}:{line}: {source}")]
    Signature {
        file: String,
        line: usize,
        source: SignatureError,
    },

    /// The host document lacks the insertion markers.
    #[error("{message}")]
    Marker { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Syntax errors in a `name :: type` signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("Type signature does not contain \" :: \" separator")]
    MissingSeparator,

    #[error("Type signature contains unbalanced parentheses")]
    UnbalancedParens,
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TranscribeError>;

impl TranscribeError {
    /// Create a range error from any displayable message.
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a marker error from any displayable message.
    pub fn marker(msg: impl Into<String>) -> Self {
        Self::Marker {
            message: msg.into(),
        }
    }

    /// Attach file and line context to a signature error.
    pub fn signature(file: impl Into<String>, line: usize, source: SignatureError) -> Self {
        Self::Signature {
            file: file.into(),
            line,
            source,
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
