//! Test server management.
//!
//! Starts logos-ircd in-process on an ephemeral loopback port.

use std::net::SocketAddr;

use logos_ircd::{Config, Server, ServerHandle};

/// A test server instance. Stopped explicitly with [`TestServer::stop`].
pub struct TestServer {
    pub handle: ServerHandle,
}

impl TestServer {
    /// Start a server with default settings on `127.0.0.1:0`.
    pub async fn start() -> anyhow::Result<Self> {
        Self::with_config(Config::with_address(SocketAddr::from(([127, 0, 0, 1], 0)))).await
    }

    /// Start a server with the given config, forcing a loopback ephemeral port.
    pub async fn with_config(mut config: Config) -> anyhow::Result<Self> {
        config.listen.address = SocketAddr::from(([127, 0, 0, 1], 0));
        let handle = Server::start(&config).await?;
        Ok(Self { handle })
    }

    /// Get the server address for connecting.
    pub fn address(&self) -> String {
        self.handle.local_addr().to_string()
    }

    #[allow(dead_code)]
    pub async fn stop(&self) {
        self.handle.stop().await;
    }
}
