//! Error types for the skytalk system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Parse-time rejections are not errors in this sense: the interpreter
//! reports those as values (see `skytalk_parser::ParseError`).

use thiserror::Error;

/// Result type alias using the skytalk [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for skytalk operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig {
            field,
            reason: reason.into(),
        })
    }

    /// Creates a terminal I/O error.
    #[must_use]
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Terminal(message.into()))
    }

    /// Creates a file I/O error naming the file involved.
    #[must_use]
    pub fn io(path: impl Into<String>, source: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            path: path.into(),
            reason: source.to_string(),
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A configuration value is out of its permitted domain.
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfig {
        /// The offending configuration field.
        field: &'static str,
        /// Why the value was refused.
        reason: String,
    },

    /// Reading from or writing to the terminal failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// A script or other file could not be read.
    #[error("failed to read {path}: {reason}")]
    Io {
        /// The file that was being read.
        path: String,
        /// The underlying I/O failure.
        reason: String,
    },
}
