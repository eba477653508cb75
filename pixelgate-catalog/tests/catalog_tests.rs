use async_trait::async_trait;
use pixelgate_catalog::{
    CatalogConfig, CatalogError, CatalogResult, ConfigSource, PixelCatalog, StaticSource,
};
use pixelgate_types::{PixelDefinition, PixelType};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Source whose behaviour can be flipped between calls.
#[derive(Default)]
struct ScriptedSource {
    calls: AtomicUsize,
    failing: AtomicBool,
    hang: AtomicBool,
}

impl ScriptedSource {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigSource for ScriptedSource {
    fn source_name(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self) -> CatalogResult<Vec<PixelDefinition>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Source("collection offline".into()));
        }
        Ok(vec![PixelDefinition::new(
            format!("px-{n}"),
            PixelType::Vk,
            "VK-RTRG-1-abc",
        )])
    }
}

fn config() -> CatalogConfig {
    CatalogConfig {
        ttl: Duration::from_secs(30),
        fetch_timeout: Duration::from_secs(2),
    }
}

#[tokio::test]
async fn refresh_returns_fetched_list() {
    let source = Arc::new(StaticSource::new(vec![PixelDefinition::new(
        "a",
        PixelType::Ga4,
        "G-ABCDEF1",
    )]));
    let catalog = PixelCatalog::new(source, config());

    assert!(catalog.get_all().await.is_empty());
    let refresh = catalog.refresh().await;
    assert!(refresh.is_ok());
    assert_eq!(refresh.pixels.len(), 1);
    assert_eq!(catalog.get_all().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn current_is_memoized_for_ttl() {
    let source = Arc::new(ScriptedSource::default());
    let catalog = PixelCatalog::new(source.clone(), config());

    let first = catalog.current().await;
    let second = catalog.current().await;
    assert_eq!(source.calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));

    tokio::time::advance(Duration::from_secs(31)).await;
    let third = catalog.current().await;
    assert_eq!(source.calls(), 2);
    assert_eq!(third[0].id.as_str(), "px-1");
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_keeps_last_known_good() {
    let source = Arc::new(ScriptedSource::default());
    let catalog = PixelCatalog::new(source.clone(), config());
    catalog.refresh().await;

    source.failing.store(true, Ordering::SeqCst);
    let refresh = catalog.refresh().await;
    assert!(matches!(refresh.failure, Some(CatalogError::Source(_))));
    assert_eq!(refresh.pixels.len(), 1);
    assert_eq!(refresh.pixels[0].id.as_str(), "px-0");

    let status = catalog.status().await;
    assert_eq!(status.pixel_count, 1);
    assert!(status.last_failure.is_some());
    assert!(status.last_success.is_some());
    assert_eq!(status.refreshes, 2);
}

#[tokio::test]
async fn failure_on_first_load_is_empty() {
    let source = Arc::new(ScriptedSource::default());
    source.failing.store(true, Ordering::SeqCst);
    let catalog = PixelCatalog::new(source, config());

    let refresh = catalog.refresh().await;
    assert!(refresh.failure.is_some());
    assert!(refresh.pixels.is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_attempt_is_not_retried_within_ttl() {
    let source = Arc::new(ScriptedSource::default());
    source.failing.store(true, Ordering::SeqCst);
    let catalog = PixelCatalog::new(source.clone(), config());

    catalog.current().await;
    catalog.current().await;
    assert_eq!(source.calls(), 1);

    source.failing.store(false, Ordering::SeqCst);
    tokio::time::advance(Duration::from_secs(31)).await;
    assert_eq!(catalog.current().await.len(), 1);
    assert_eq!(source.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn slow_source_times_out() {
    let source = Arc::new(ScriptedSource::default());
    source.hang.store(true, Ordering::SeqCst);
    let catalog = PixelCatalog::new(source, config());

    let refresh = catalog.refresh().await;
    let failure = refresh.failure.expect("timeout expected");
    assert!(failure.is_timeout());
    assert!(refresh.pixels.is_empty());
}

/// Source that takes a while to answer.
#[derive(Default)]
struct SlowSource {
    calls: AtomicUsize,
}

#[async_trait]
impl ConfigSource for SlowSource {
    fn source_name(&self) -> &str {
        "slow"
    }

    async fn fetch(&self) -> CatalogResult<Vec<PixelDefinition>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(vec![PixelDefinition::new("a", PixelType::Ga4, "G-ABCDEF1")])
    }
}

#[tokio::test(start_paused = true)]
async fn concurrent_misses_share_one_fetch() {
    let source = Arc::new(SlowSource::default());
    let catalog = Arc::new(PixelCatalog::new(source.clone(), config()));

    let readers: Vec<_> = (0..20)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            tokio::spawn(async move { catalog.current().await.len() })
        })
        .collect();
    for reader in readers {
        assert_eq!(reader.await.unwrap(), 1);
    }

    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(catalog.status().await.refreshes, 1);
}
