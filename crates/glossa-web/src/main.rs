//! Glossa web server
//!
//! Run with: cargo run -p glossa-web

use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use glossa_web::{config::Config, router::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Glossa web server...");

    let config = Config::load()?;
    if config.admin.api_token.is_none() {
        tracing::warn!("no admin token configured; the /api endpoints will refuse every request");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::from_config(config).await?;
    let app = build_router(state);

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
