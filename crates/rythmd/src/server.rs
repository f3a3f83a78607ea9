//! HTTP server for rythmd

use crate::routes;
use anyhow::{Context, Result};
use axum::Router;
use rythm_common::config::ServerSettings;
use rythm_common::CompletionProvider;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Maximum request body: 64 KiB
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Application state shared across handlers
pub struct AppState {
    pub provider: Arc<dyn CompletionProvider>,
    pub start_time: Instant,
    pub ping_message: String,
}

impl AppState {
    pub fn new(provider: Arc<dyn CompletionProvider>, ping_message: impl Into<String>) -> Self {
        Self {
            provider,
            start_time: Instant::now(),
            ping_message: ping_message.into(),
        }
    }
}

/// Full application router, also used in-process by tests
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::gateway_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until Ctrl-C
pub async fn run(state: AppState, settings: &ServerSettings) -> Result<()> {
    let app = router(state);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
