//! Parse error types.

use thiserror::Error;

/// Errors raised by a parse oracle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The source was rejected; `message` is the front end's first
    /// diagnostic.
    #[error("Invalid source: {message}")]
    InvalidSource {
        /// Error message.
        message: String,
        /// Byte offset of the diagnostic's primary label, when it has one.
        offset: Option<usize>,
    },

    /// The front end failed in a way unrelated to the source, such as a
    /// parse task that never completed.
    #[error("Internal parser error: {0}")]
    Internal(String),
}

impl ParseError {
    /// Creates a new invalid source error.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
            offset: None,
        }
    }

    /// Creates a new invalid source error with offset.
    pub fn invalid_source_at(message: impl Into<String>, offset: usize) -> Self {
        Self::InvalidSource {
            message: message.into(),
            offset: Some(offset),
        }
    }

    /// Creates a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
