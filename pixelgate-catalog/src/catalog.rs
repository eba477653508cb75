//! Memoized catalog snapshot with fail-soft refresh.

use crate::error::CatalogError;
use crate::source::ConfigSource;
use chrono::{DateTime, Utc};
use pixelgate_types::PixelDefinition;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Catalog caching configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// How long a fetched snapshot (or a failed attempt) is reused.
    pub ttl: Duration,
    /// Deadline for a single fetch.
    pub fetch_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            fetch_timeout: Duration::from_secs(3),
        }
    }
}

/// Outcome of a refresh: the snapshot to use plus the failure, if any.
#[derive(Debug)]
pub struct Refresh {
    pub pixels: Arc<Vec<PixelDefinition>>,
    pub failure: Option<CatalogError>,
}

impl Refresh {
    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }
}

/// Point-in-time view of catalog health for debug tooling.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatus {
    pub source: String,
    pub pixel_count: usize,
    pub last_success: Option<DateTime<Utc>>,
    pub last_failure: Option<String>,
    pub refreshes: u64,
}

#[derive(Default)]
struct CatalogState {
    snapshot: Arc<Vec<PixelDefinition>>,
    /// Time of the last attempt, successful or not.
    attempted_at: Option<Instant>,
    last_success: Option<DateTime<Utc>>,
    last_failure: Option<String>,
    refreshes: u64,
}

/// Cached view of the configured pixels.
///
/// Snapshots are immutable once fetched; a refresh swaps in a new `Arc`, so
/// readers holding an older snapshot keep a consistent list.
pub struct PixelCatalog {
    source: Arc<dyn ConfigSource>,
    config: CatalogConfig,
    state: RwLock<CatalogState>,
    /// Serializes TTL-driven refreshes so a burst of expired reads fetches once.
    refresh_lock: Mutex<()>,
}

impl PixelCatalog {
    pub fn new(source: Arc<dyn ConfigSource>, config: CatalogConfig) -> Self {
        Self {
            source,
            config,
            state: RwLock::new(CatalogState::default()),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Fetches from the source unconditionally.
    pub async fn refresh(&self) -> Refresh {
        let timeout = self.config.fetch_timeout;
        let result = match tokio::time::timeout(timeout, self.source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(CatalogError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        };

        let mut state = self.state.write().await;
        state.attempted_at = Some(Instant::now());
        state.refreshes += 1;
        match result {
            Ok(pixels) => {
                info!(
                    "Catalog refreshed from {} source: {} pixels",
                    self.source.source_name(),
                    pixels.len()
                );
                state.snapshot = Arc::new(pixels);
                state.last_success = Some(Utc::now());
                state.last_failure = None;
                Refresh {
                    pixels: Arc::clone(&state.snapshot),
                    failure: None,
                }
            }
            Err(e) => {
                warn!(
                    "Catalog fetch from {} source failed, keeping {} cached pixels: {}",
                    self.source.source_name(),
                    state.snapshot.len(),
                    e
                );
                state.last_failure = Some(e.to_string());
                Refresh {
                    pixels: Arc::clone(&state.snapshot),
                    failure: Some(e),
                }
            }
        }
    }

    /// Returns the last successfully fetched snapshot without fetching.
    pub async fn get_all(&self) -> Arc<Vec<PixelDefinition>> {
        Arc::clone(&self.state.read().await.snapshot)
    }

    /// Returns the memoized snapshot, refreshing it once the TTL has lapsed.
    pub async fn current(&self) -> Arc<Vec<PixelDefinition>> {
        if let Some(pixels) = self.fresh_snapshot().await {
            return pixels;
        }
        let _guard = self.refresh_lock.lock().await;
        // Another caller may have refreshed while we waited.
        if let Some(pixels) = self.fresh_snapshot().await {
            return pixels;
        }
        self.refresh().await.pixels
    }

    async fn fresh_snapshot(&self) -> Option<Arc<Vec<PixelDefinition>>> {
        let state = self.state.read().await;
        let at = state.attempted_at?;
        if at.elapsed() < self.config.ttl {
            debug!("Catalog cache hit ({} pixels)", state.snapshot.len());
            Some(Arc::clone(&state.snapshot))
        } else {
            None
        }
    }

    pub async fn status(&self) -> CatalogStatus {
        let state = self.state.read().await;
        CatalogStatus {
            source: self.source.source_name().to_string(),
            pixel_count: state.snapshot.len(),
            last_success: state.last_success,
            last_failure: state.last_failure.clone(),
            refreshes: state.refreshes,
        }
    }
}
