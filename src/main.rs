//! logos-ircd - Logos IRC Server
//!
//! Serves IRC on the configured address and mirrors channel activity
//! through a logging chat backend.

use logos_ircd::bridge::relay::{LogBackend, Relay};
use logos_ircd::{Config, Server};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration; no argument means built-in defaults
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).map_err(|e| {
            error!(path = %path, error = %e, "Failed to load config");
            e
        })?,
        None => Config::default(),
    };

    info!(
        server = %config.server.name,
        version = %config.server.version,
        address = %config.listen.address,
        "Starting Logos IRC Server"
    );

    let handle = Server::start(&config).await.map_err(|e| {
        error!(error = %e, "Failed to start server");
        e
    })?;

    // The inbound half would be driven by the chat backend's message
    // callbacks; the logging backend never produces any.
    let relay = Relay::new(LogBackend);
    let _inbound = relay.inbound(handle.clone());
    handle.subscribe(relay)?;

    info!(address = %handle.local_addr(), "Server running");

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    handle.stop().await;

    Ok(())
}
