//! Server configuration from `pixelgate.toml`.
//!
//! Loading is fail-soft: a missing file means defaults, an unreadable or
//! unparsable file is logged and also means defaults.

use pixelgate_catalog::{
    CatalogConfig, CatalogResult, ConfigSource, FileSource, HttpSource, StaticSource,
};
use pixelgate_consent::cookie::{DEFAULT_COOKIE_NAME, DEFAULT_MAX_AGE_SECS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Exposes `GET /api/v1/pixels/debug`.
    pub debug: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            debug: false,
        }
    }
}

/// Where pixel definitions come from. `url` wins over `file` when both are set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    pub file: Option<PathBuf>,
    pub url: Option<String>,
    pub ttl_secs: u64,
    pub fetch_timeout_ms: u64,
}

impl Default for CatalogSection {
    fn default() -> Self {
        let defaults = CatalogConfig::default();
        Self {
            file: None,
            url: None,
            ttl_secs: defaults.ttl.as_secs(),
            fetch_timeout_ms: defaults.fetch_timeout.as_millis() as u64,
        }
    }
}

impl CatalogSection {
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            ttl: Duration::from_secs(self.ttl_secs),
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
        }
    }

    /// Builds the configured source. With neither `url` nor `file` set the
    /// catalog is empty and every request resolves to zero pixels.
    pub fn build_source(&self) -> CatalogResult<Arc<dyn ConfigSource>> {
        if let Some(url) = &self.url {
            return Ok(Arc::new(HttpSource::new(url.clone())?));
        }
        if let Some(file) = &self.file {
            return Ok(Arc::new(FileSource::new(file.clone())));
        }
        warn!("No catalog source configured, serving an empty catalog");
        Ok(Arc::new(StaticSource::new(Vec::new())))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConsentSection {
    pub cookie_name: String,
    pub max_age_secs: u64,
}

impl Default for ConsentSection {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            max_age_secs: DEFAULT_MAX_AGE_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub catalog: CatalogSection,
    pub consent: ConsentSection,
}

impl ServerConfig {
    /// Loads `path`, falling back to defaults when it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ServerConfig>(&contents) {
                Ok(config) => {
                    info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse config file {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
