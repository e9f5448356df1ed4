//! State management module.
//!
//! Contains the Matrix (server state) and the client and channel records
//! it owns.

mod channel;
mod client;
mod matrix;
mod uid;

pub use channel::{Channel, ChannelRegistry};
pub use client::{Client, Transport};
pub use matrix::{Matrix, ServerInfo};
pub use uid::{ClientId, ClientIdGenerator};
