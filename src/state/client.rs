//! Per-connection client state.
//!
//! A `Client` holds identity, registration state and the client-local view
//! of channel membership. Keeping the channel side in sync is the job of
//! [`Matrix`](super::Matrix), never of the client.

use std::collections::BTreeSet;

use logos_irc_proto::{Message, Prefix};
use tokio::sync::mpsc;

use super::ClientId;

/// Outbound half of a connection: lines pushed here are written to the
/// socket by the connection task, which appends the line terminator.
#[derive(Debug, Clone)]
pub struct Transport {
    tx: mpsc::UnboundedSender<String>,
}

impl Transport {
    pub fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx }
    }

    /// Whether the connection task is still draining this queue.
    pub fn is_connected(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Fire-and-forget write; failures are not surfaced.
    fn write(&self, line: String) {
        let _ = self.tx.send(line);
    }
}

/// A connected client (or the transport-less bridge bot).
#[derive(Debug)]
pub struct Client {
    pub id: ClientId,
    pub nick: String,
    pub user: String,
    /// Peer address as text, or a fixed host for the bridge bot.
    pub host: String,
    pub registered: bool,
    channels: BTreeSet<String>,
    transport: Option<Transport>,
}

impl Client {
    /// A freshly accepted, unregistered connection.
    pub fn new(id: ClientId, host: impl Into<String>, transport: Transport) -> Self {
        Self {
            id,
            nick: String::new(),
            user: String::new(),
            host: host.into(),
            registered: false,
            channels: BTreeSet::new(),
            transport: Some(transport),
        }
    }

    /// A pre-registered client with no transport.
    pub fn without_transport(
        id: ClientId,
        nick: impl Into<String>,
        user: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            id,
            nick: nick.into(),
            user: user.into(),
            host: host.into(),
            registered: true,
            channels: BTreeSet::new(),
            transport: None,
        }
    }

    /// `nick!user@host` for messages originating from this client.
    pub fn prefix(&self) -> Prefix {
        Prefix::new(self.nick.as_str(), self.user.as_str(), self.host.as_str())
    }

    /// Both halves of the NICK/USER handshake have been supplied.
    pub fn has_identity(&self) -> bool {
        !self.nick.is_empty() && !self.user.is_empty()
    }

    /// Format and deliver a message. A no-op without a live transport.
    pub fn send(&self, msg: &Message) {
        if let Some(transport) = &self.transport
            && transport.is_connected()
        {
            transport.write(msg.to_string());
        }
    }

    /// Drop the transport; the connection task sees its queue close and
    /// shuts the socket down after flushing what was already queued.
    pub fn close(&mut self) {
        self.transport = None;
    }

    pub fn join(&mut self, channel: &str) {
        self.channels.insert(channel.to_string());
    }

    pub fn leave(&mut self, channel: &str) -> bool {
        self.channels.remove(channel)
    }

    pub fn is_in(&self, channel: &str) -> bool {
        self.channels.contains(channel)
    }

    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(String::as_str)
    }

    pub(crate) fn take_channels(&mut self) -> BTreeSet<String> {
        std::mem::take(&mut self.channels)
    }
}
