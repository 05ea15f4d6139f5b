mod catalog;
mod config;
mod db;
mod errors;
mod kit;
mod models;
mod routes;
mod state;
mod uploads;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::store::CatalogStore;
use crate::config::Config;
use crate::db::create_pool;
use crate::kit::try_on::TemplateTryOn;
use crate::routes::build_router;
use crate::state::AppState;
use crate::uploads::UploadStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Fitroom v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite catalog
    let db = create_pool(&config.database_url).await?;
    let catalog = CatalogStore::new(db);
    if config.seed_sample_catalog {
        catalog.seed_samples().await?;
    }
    info!("Catalog ready ({} items)", catalog.count().await?);

    let uploads = UploadStore::open(&config.upload_dir)?;
    info!("Upload dir: {}", uploads.dir().display());
    info!("Kit budget: {}", config.kit_budget.amount());

    // Build app state
    let state = AppState {
        catalog,
        uploads,
        config: config.clone(),
        try_on: Arc::new(TemplateTryOn),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
