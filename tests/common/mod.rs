//! Integration test common infrastructure.
//!
//! Provides utilities for starting in-process test servers, creating test
//! clients, and asserting on IRC line flows.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use server::TestServer;
