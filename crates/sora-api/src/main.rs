//! # sora-api server entry point
//!
//! Reads configuration from the environment, initializes tracing, and
//! serves the application router.

use tracing_subscriber::EnvFilter;

use sora_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let port = config.port;
    let state = AppState::with_config(config);
    let app = sora_api::app(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "sora-api listening");
    axum::serve(listener, app).await?;
    Ok(())
}
