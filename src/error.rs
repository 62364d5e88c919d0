//! Error types for unnotion library.

use std::io;
use thiserror::Error;

/// Result type alias for unnotion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while talking to the store or writing output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport-level failure reaching the document store.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The document store answered with an error object.
    #[error("API error {status} ({code}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Machine-readable error code (e.g. "object_not_found")
        code: String,
        /// Human-readable message
        message: String,
    },

    /// A response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build an API error from its parts.
    pub fn api(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Api {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Whether the store signalled rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::Api { status: 429, .. })
    }
}
