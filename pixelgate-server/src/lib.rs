//! HTTP surface for pixelgate.
//!
//! Serves eligible pixels and their loaders for a page, maps events into
//! native vendor calls, and reads or writes the consent cookie. The server
//! holds no per-visitor state: consent travels in the request cookie.

mod api;
mod config;
mod error;

pub use api::{
    ActivePixelsResponse, ActiveQuery, ConsentResponse, DebugResponse, TrackRequest,
    TrackResponse,
};
pub use config::{CatalogSection, ConsentSection, ServerConfig, ServerSection};
pub use error::ApiError;

use axum::{routing::get, Router};
use pixelgate_catalog::PixelCatalog;
use std::sync::Arc;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<PixelCatalog>,
    pub consent: ConsentSection,
    pub debug: bool,
}

impl AppState {
    pub fn new(catalog: Arc<PixelCatalog>, config: &ServerConfig) -> Self {
        Self {
            catalog,
            consent: config.consent.clone(),
            debug: config.server.debug,
        }
    }
}

/// Build the HTTP API router. The debug route exists only when `debug` is set.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route(
            "/api/v1/pixels/active",
            get(api::active_pixels).post(api::track_event),
        )
        .route(
            "/api/v1/consent",
            get(api::get_consent)
                .put(api::put_consent)
                .delete(api::delete_consent),
        );
    if state.debug {
        router = router.route("/api/v1/pixels/debug", get(api::debug_state));
    }
    router.with_state(state)
}
