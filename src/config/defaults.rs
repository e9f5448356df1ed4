//! Default value functions for configuration.
//!
//! These reproduce the behaviour of a server started with no config file.

use std::net::SocketAddr;

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_server_name() -> String {
    "logos-irc-server".to_string()
}

pub fn default_network() -> String {
    "Logos IRC Server".to_string()
}

pub fn default_version() -> String {
    "v1.0".to_string()
}

// =============================================================================
// Listen Defaults
// =============================================================================

pub fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 6667))
}

// =============================================================================
// MOTD Defaults
// =============================================================================

pub fn default_motd_lines() -> Vec<String> {
    vec![
        "Welcome to the Logos IRC Server".to_string(),
        "This is a simple IRC server implementation".to_string(),
    ]
}

pub fn default_motd_short() -> String {
    "Welcome to the Logos IRC Proxy Server".to_string()
}

// =============================================================================
// Bridge Defaults
// =============================================================================

pub fn default_bridge_nick() -> String {
    "waku_bridge".to_string()
}

pub fn default_bridge_user() -> String {
    "waku".to_string()
}

pub fn default_bridge_host() -> String {
    "bot.localhost".to_string()
}

pub fn default_home_channel() -> String {
    "#general".to_string()
}

pub fn default_auto_reply() -> String {
    "hello back!".to_string()
}
