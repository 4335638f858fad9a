//! Structured error types shared by every converter.

use thiserror::Error;

/// Unified error type for all Cyanea conversions.
#[derive(Debug, Error)]
pub enum CyaneaError {
    /// I/O error while reading an input file before conversion.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed input data).
    #[error("parse error: {0}")]
    Parse(String),

    /// A record broke the framing rules of its format (wrong prefix,
    /// short line, unreadable counts). `line` is 1-based.
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    /// An opened construct was never closed (SMILES branch or ring).
    #[error("unclosed structure: {0}")]
    Unclosed(String),

    /// Invalid input (bad arguments, out-of-range values, empty results).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A writer produced bytes that are not UTF-8 (only possible when input
    /// text was not UTF-8 to begin with).
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(String),
}

impl CyaneaError {
    /// Build a [`CyaneaError::Format`] for a 1-based line number.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        CyaneaError::Format {
            line,
            message: message.into(),
        }
    }

    /// The 1-based line a format violation points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            CyaneaError::Format { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the Cyanea crates.
pub type Result<T> = std::result::Result<T, CyaneaError>;

/// Run an `io::Write`-based serializer into a `String`.
pub fn write_to_string<F>(write: F) -> Result<String>
where
    F: FnOnce(&mut Vec<u8>) -> Result<()>,
{
    let mut buf = Vec::new();
    write(&mut buf)?;
    Ok(String::from_utf8(buf)?)
}
