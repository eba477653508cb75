//! Runtime error types.

use thiserror::Error;

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Failures at the document seam. Vendor call failures are not errors; they
/// are recorded in a [`DispatchReport`](crate::DispatchReport).
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("loader injection failed: {0}")]
    Injection(String),
}
