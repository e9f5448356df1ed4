//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and loading
//! - [`defaults`]: serde default value functions

mod defaults;
mod types;

pub use types::{BridgeConfig, Config, ConfigError, ListenConfig, MotdConfig, ServerConfig};
