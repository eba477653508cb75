//! Catalog fetch error types.

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Reasons the catalog could not be fetched. Every variant is a
/// configuration-fetch failure; callers degrade to the cached snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unrecognized catalog payload: {0}")]
    Payload(String),

    #[error("catalog fetch timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("catalog source failed: {0}")]
    Source(String),
}

impl CatalogError {
    /// Returns true if the fetch was abandoned on its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
