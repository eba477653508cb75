//! Configuration sources the catalog reads pixel definitions from.

use crate::error::{CatalogError, CatalogResult};
use async_trait::async_trait;
use pixelgate_types::PixelDefinition;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Read-only list query against the configuration collaborator.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Short name used in logs.
    fn source_name(&self) -> &str;

    /// Fetches every pixel definition.
    async fn fetch(&self) -> CatalogResult<Vec<PixelDefinition>>;
}

/// Parses a catalog payload.
///
/// Accepts a bare array, a CMS list result (`{"docs": [...]}`) or
/// `{"pixels": [...]}`. Records that do not deserialize are skipped with a
/// warning so one malformed entry cannot take the whole catalog down.
pub fn parse_payload(bytes: &[u8]) -> CatalogResult<Vec<PixelDefinition>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Payload {
        List(Vec<Value>),
        Docs { docs: Vec<Value> },
        Pixels { pixels: Vec<Value> },
    }

    let records = match serde_json::from_slice::<Payload>(bytes) {
        Ok(Payload::List(records))
        | Ok(Payload::Docs { docs: records })
        | Ok(Payload::Pixels { pixels: records }) => records,
        Err(e) => return Err(CatalogError::Payload(e.to_string())),
    };

    let total = records.len();
    let pixels: Vec<PixelDefinition> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(def) => Some(def),
            Err(e) => {
                warn!("Skipping malformed pixel record #{}: {}", index, e);
                None
            }
        })
        .collect();
    debug!("Parsed {} of {} pixel records", pixels.len(), total);
    Ok(pixels)
}

/// A fixed list, for tests and embedded configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pixels: Vec<PixelDefinition>,
}

impl StaticSource {
    pub fn new(pixels: Vec<PixelDefinition>) -> Self {
        Self { pixels }
    }
}

#[async_trait]
impl ConfigSource for StaticSource {
    fn source_name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> CatalogResult<Vec<PixelDefinition>> {
        Ok(self.pixels.clone())
    }
}

/// Reads a JSON export of the collection from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn source_name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> CatalogResult<Vec<PixelDefinition>> {
        let bytes = tokio::fs::read(&self.path).await?;
        parse_payload(&bytes)
    }
}

/// Queries the collaborator's HTTP list endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ConfigSource for HttpSource {
    fn source_name(&self) -> &str {
        "http"
    }

    async fn fetch(&self) -> CatalogResult<Vec<PixelDefinition>> {
        let resp = self
            .client
            .get(&self.url)
            .header("accept", "application/json")
            .send()
            .await?
            .error_for_status()?;
        let bytes = resp.bytes().await?;
        parse_payload(&bytes)
    }
}
