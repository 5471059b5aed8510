use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::api::{self, AppState};
use crate::config::SeedleConfig;
use crate::models::DirectorySnapshot;

/// Build the full application router: JSON API under /api, static frontend
/// as the fallback, CORS open.
pub fn app(config: &SeedleConfig, snapshot: Arc<DirectorySnapshot>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        snapshot,
        directory: config.directory.clone(),
    };

    Router::new()
        .nest("/api", api::router(state))
        .fallback_service(ServeDir::new(&config.server.static_dir))
        .layer(cors)
}

pub async fn run(config: &SeedleConfig, snapshot: Arc<DirectorySnapshot>) -> Result<()> {
    let router = app(config, snapshot);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", config.server.port);
    axum::serve(listener, router)
        .await
        .context("Web server exited")?;
    Ok(())
}
