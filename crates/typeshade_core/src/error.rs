//! Core error types.

use thiserror::Error;

/// Errors surfaced while loading typeshade settings.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The configuration is malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configuration file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
