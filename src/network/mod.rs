//! Network module.
//!
//! Contains the Gateway (TCP listener) and the per-connection I/O task.
//! Neither touches server state: both only talk to the coordinator through
//! [`ServerEvent`](crate::server::ServerEvent)s.

mod connection;
mod gateway;

pub use connection::Connection;
pub use gateway::Gateway;
