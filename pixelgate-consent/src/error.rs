//! Error types for consent persistence.

use thiserror::Error;

/// Result type for consent operations.
pub type ConsentResult<T> = Result<T, ConsentError>;

/// Errors that can occur while persisting consent.
#[derive(Debug, Error)]
pub enum ConsentError {
    /// IO error from a file backend.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] pixelgate_types::TypesError),

    /// Backend lock poisoned by a panicking writer.
    #[error("consent backend unavailable: {0}")]
    Unavailable(String),
}
