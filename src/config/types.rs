//! Core configuration types and loading.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use super::defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
///
/// Every section is optional; an empty document is a valid config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server identity.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Message of the Day configuration.
    #[serde(default)]
    pub motd: MotdConfig,
    /// Bridge bot configuration.
    #[serde(default)]
    pub bridge: BridgeConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Default configuration listening on the given address.
    pub fn with_address(address: SocketAddr) -> Self {
        Self {
            listen: ListenConfig { address },
            ..Self::default()
        }
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name, used as the prefix of server-originated replies.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Text shown in the 001 welcome line.
    #[serde(default = "default_network")]
    pub network: String,
    /// Version string advertised in 004.
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            network: default_network(),
            version: default_version(),
        }
    }
}

/// Network listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "0.0.0.0:6667").
    #[serde(default = "default_listen_address")]
    pub address: SocketAddr,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_listen_address(),
        }
    }
}

/// Message of the Day configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MotdConfig {
    /// Body of the MOTD sent after registration, one 372 per line.
    #[serde(default = "default_motd_lines")]
    pub lines: Vec<String>,
    /// Single 372 line sent in reply to the MOTD command.
    #[serde(default = "default_motd_short")]
    pub short: String,
}

impl Default for MotdConfig {
    fn default() -> Self {
        Self {
            lines: default_motd_lines(),
            short: default_motd_short(),
        }
    }
}

/// Bridge bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    /// Create the bridge bot at startup.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_bridge_nick")]
    pub nick: String,
    #[serde(default = "default_bridge_user")]
    pub user: String,
    #[serde(default = "default_bridge_host")]
    pub host: String,
    /// Channel the bot is seeded into and keeps alive.
    #[serde(default = "default_home_channel")]
    pub home_channel: String,
    /// Canned reply to messages in the home channel; empty disables it.
    #[serde(default = "default_auto_reply")]
    pub auto_reply: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            nick: default_bridge_nick(),
            user: default_bridge_user(),
            host: default_bridge_host(),
            home_channel: default_home_channel(),
            auto_reply: default_auto_reply(),
        }
    }
}
