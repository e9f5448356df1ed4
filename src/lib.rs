//! logos-ircd - a minimal IRC server with a chat bridge.
//!
//! The server accepts plain TCP clients, runs them through NICK/USER
//! registration and relays channel traffic. A synthetic bridge bot sits in
//! a home channel, and a narrow event surface lets an external chat
//! system mirror joins and messages in both directions.
//!
//! ```no_run
//! use logos_ircd::{Config, Server};
//!
//! # async fn run() -> Result<(), logos_ircd::ServerError> {
//! let handle = Server::start(&Config::default()).await?;
//! handle.inject_bridge_message("#general", "[WAKU]carol", "hello from waku")?;
//! handle.stop().await;
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod handlers;
mod network;
pub mod server;
pub mod state;

pub use bridge::{BridgeEvent, BridgeListener};
pub use config::Config;
pub use error::{HandlerError, ServerError};
pub use server::{Server, ServerHandle};
