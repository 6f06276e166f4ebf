mod config;
mod editor;
mod errors;
mod export;
mod layout;
mod models;
mod notice;
mod render;
mod routes;
mod state;
mod templates;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::rasterizer::PdfRasterizer;
use crate::export::Exporter;
use crate::routes::build_router;
use crate::state::AppState;
use crate::templates::{FileKvStore, TemplateStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Studio v{}", env!("CARGO_PKG_VERSION"));

    // Template store over the local key-value file
    let kv = Arc::new(FileKvStore::new(&config.store_path));
    let templates = TemplateStore::open(kv).with_context(|| {
        format!("failed to open template store at {}", config.store_path.display())
    })?;
    for diagnostic in templates.diagnostics() {
        warn!(key = %diagnostic.key, "template store reset: {}", diagnostic.message);
    }
    info!(
        "Template store: {} ({} templates)",
        config.store_path.display(),
        templates.list().len()
    );

    // Exporter (printpdf rasterizer by default)
    let exporter = Exporter::new(Arc::new(PdfRasterizer), config.export_settings());
    info!(
        "Export: settle {}ms, min width {}px",
        config.export_settle_ms, config.export_min_width_px
    );

    let state = AppState::new(config.clone(), templates, exporter);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::new(config.bind_addr, config.port);
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
