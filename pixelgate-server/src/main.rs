//! pixelgate server
//!
//! Serves the pixels a page may load under the visitor's consent, maps
//! vendor-neutral events into native vendor calls, and manages the consent
//! cookie.
//!
//! Usage:
//!   pixelgate --config pixelgate.toml --catalog-url https://config.example/pixels
//!
//! Flags override the config file.

use anyhow::{Context, Result};
use clap::Parser;
use pixelgate_catalog::PixelCatalog;
use pixelgate_server::{build_router, AppState, ServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "pixelgate")]
#[command(about = "Consent-gated marketing pixel server")]
struct Args {
    /// Path to the config file
    #[arg(short, long, default_value = "pixelgate.toml")]
    config: PathBuf,

    /// HTTP port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Read pixel definitions from a JSON file
    #[arg(long)]
    catalog_file: Option<PathBuf>,

    /// Fetch pixel definitions from a URL
    #[arg(long)]
    catalog_url: Option<String>,

    /// Expose the debug endpoint
    #[arg(long)]
    debug: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(file) = &self.catalog_file {
            config.catalog.file = Some(file.clone());
        }
        if let Some(url) = &self.catalog_url {
            config.catalog.url = Some(url.clone());
        }
        if self.debug {
            config.server.debug = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("pixelgate starting...");
    let mut config = ServerConfig::load_from(&args.config);
    args.apply(&mut config);

    let source = config
        .catalog
        .build_source()
        .context("Failed to build catalog source")?;
    let catalog = Arc::new(PixelCatalog::new(source, config.catalog.catalog_config()));

    // Warm the cache; a failure here is not fatal, requests retry after the TTL.
    let warm = catalog.refresh().await;
    match &warm.failure {
        None => info!("Catalog ready with {} pixels", warm.pixels.len()),
        Some(e) => warn!("Initial catalog fetch failed, starting empty: {}", e),
    }
    if config.server.debug {
        warn!("Debug endpoint enabled at /api/v1/pixels/debug");
    }

    let app = build_router(AppState::new(catalog, &config));
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("pixelgate stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
