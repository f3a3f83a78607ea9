//! rythmd - Rythm Assistant Gateway daemon

use anyhow::Result;
use rythm_common::{RythmConfig, UpstreamProvider};
use rythmd::AppState;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rythmd=info,tower_http=info")),
        )
        .init();

    info!("Rythm daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = RythmConfig::load()?;
    let provider = UpstreamProvider::new(&config.gateway)?;
    if provider.is_configured() {
        info!(
            "Provider configured (model {}, timeout {}s)",
            provider.model(),
            config.gateway.timeout_secs
        );
    } else {
        warn!("No provider endpoint or API key set; /api/llama will answer with errors and clients will fall back");
    }

    let state = AppState::new(Arc::new(provider), config.server.ping_message.clone());
    rythmd::run(state, &config.server).await
}
