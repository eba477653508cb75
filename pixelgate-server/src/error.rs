use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use pixelgate_consent::ConsentError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failures that surface as a non-2xx response. Catalog and vendor problems
/// never land here; they shrink the pixel list instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("consent could not be stored: {0}")]
    Consent(#[from] ConsentError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{}", self);
        let status = match &self {
            ApiError::Consent(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
