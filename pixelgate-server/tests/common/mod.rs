use pixelgate_catalog::{CatalogConfig, PixelCatalog, StaticSource};
use pixelgate_consent::cookie;
use pixelgate_server::{build_router, AppState, ServerConfig};
use pixelgate_types::{ConsentRecord, PageTargets, PixelDefinition, PixelType, Placement};
use std::sync::Arc;

pub fn catalog() -> Vec<PixelDefinition> {
    vec![
        PixelDefinition::new("vk", PixelType::Vk, "VK-RTRG-100500-aBc"),
        PixelDefinition::new("ga4", PixelType::Ga4, "G-ABC1234").gdpr_compliant(true),
        PixelDefinition::new("ym", PixelType::YandexMetrica, "12345678")
            .with_pages(PageTargets::new(["checkout"])),
        PixelDefinition::new("fb", PixelType::Facebook, "123456789012345")
            .with_placement(Placement::BodyEnd)
            .with_priority(-1),
        PixelDefinition::new("broken", PixelType::Ga4, "UA-1234").gdpr_compliant(true),
    ]
}

/// Spin up the HTTP server on an OS-assigned port, returning the base URL.
pub async fn spawn_test_server(debug: bool) -> String {
    let catalog = Arc::new(PixelCatalog::new(
        Arc::new(StaticSource::new(catalog())),
        CatalogConfig::default(),
    ));
    let mut config = ServerConfig::default();
    config.server.debug = debug;
    let app = build_router(AppState::new(catalog, &config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

/// A `Cookie` header carrying `record`.
pub fn consent_cookie(record: &ConsentRecord) -> String {
    format!("pixel_consent={}", cookie::encode(record).unwrap())
}
