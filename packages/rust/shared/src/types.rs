//! Core domain types for transcribe.

use std::fmt;

// ---------------------------------------------------------------------------
// InputFile
// ---------------------------------------------------------------------------

/// A source file handed to the transcription engine.
///
/// `name` is an opaque token substituted into the URL template; the engine
/// never opens it. `text` is the full contents, original line endings
/// included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub text: String,
}

impl InputFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// LineEnding
// ---------------------------------------------------------------------------

/// The line terminator used for every separator the engine inserts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lf => f.write_str("LF"),
            Self::CrLf => f.write_str("CRLF"),
        }
    }
}
