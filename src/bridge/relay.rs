//! Relay between bridge events and an external chat backend.
//!
//! [`Relay`] is a [`BridgeListener`]: it mirrors joined IRC channels and
//! channel messages into the backend. [`RelayInbound`] carries backend
//! traffic the other way, injecting it into every mirrored channel.
//!
//! Backend channel names are IRC channel names without the leading `#`.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::{BridgeEvent, BridgeListener};

/// Nick prefix for live messages arriving from the backend.
pub const LIVE_TAG: &str = "[WAKU]";
/// Nick prefix for replayed history.
pub const HISTORY_TAG: &str = "[HISTORY][WAKU]";

/// The external messaging system.
///
/// Calls are made on the coordinator task and must not block.
pub trait ChatBackend: Send {
    /// Join a backend channel; false if the backend refused.
    fn join_channel(&mut self, channel: &str) -> bool;
    /// Request history replay for a channel.
    fn retrieve_history(&mut self, channel: &str) -> bool;
    fn send_message(&mut self, channel: &str, nick: &str, text: &str);
}

/// Destination for messages flowing from the backend into IRC.
pub trait BridgeSink: Send + Sync {
    fn inject(&self, channel: &str, nick: &str, text: &str);
}

/// A message delivered by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub timestamp: String,
    pub nick: String,
    pub text: String,
}

/// Backend channel names mirrored so far, shared between both directions.
#[derive(Debug, Clone, Default)]
struct Mirrored(Arc<Mutex<Vec<String>>>);

impl Mirrored {
    fn contains(&self, channel: &str) -> bool {
        self.0.lock().iter().any(|c| c == channel)
    }

    fn push(&self, channel: String) {
        self.0.lock().push(channel);
    }

    fn snapshot(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

fn backend_name(irc_channel: &str) -> &str {
    irc_channel.strip_prefix('#').unwrap_or(irc_channel)
}

/// Outbound half: mirrors IRC activity into the backend.
pub struct Relay<B> {
    backend: B,
    mirrored: Mirrored,
}

impl<B: ChatBackend> Relay<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            mirrored: Mirrored::default(),
        }
    }

    /// Inbound half sharing this relay's mirrored-channel list.
    pub fn inbound<S: BridgeSink>(&self, sink: S) -> RelayInbound<S> {
        RelayInbound {
            sink: Arc::new(sink),
            mirrored: self.mirrored.clone(),
        }
    }

    /// Backend channels joined so far, in join order.
    #[cfg(test)]
    pub fn mirrored_channels(&self) -> Vec<String> {
        self.mirrored.snapshot()
    }

    fn on_channel_joined(&mut self, channel: &str) {
        let name = backend_name(channel);
        if self.mirrored.contains(name) {
            debug!(channel = %name, "Channel already mirrored");
            return;
        }

        if !self.backend.join_channel(name) {
            warn!(channel = %name, "Failed to join backend channel");
            return;
        }
        self.mirrored.push(name.to_string());
        info!(channel = %name, "Mirroring channel");

        if !self.backend.retrieve_history(name) {
            warn!(channel = %name, "History retrieval was refused");
        }
    }
}

impl<B: ChatBackend> BridgeListener for Relay<B> {
    fn on_event(&mut self, event: &BridgeEvent) {
        match event {
            BridgeEvent::ChannelJoined { channel } => self.on_channel_joined(channel),
            BridgeEvent::MessageSent {
                channel,
                nick,
                text,
            } => {
                let name = backend_name(channel);
                debug!(channel = %name, nick = %nick, "Forwarding message to backend");
                self.backend.send_message(name, nick, text);
            }
        }
    }
}

/// Inbound half: injects backend messages into mirrored IRC channels.
///
/// Backend messages carry no channel, so each one is fanned out to every
/// mirrored channel.
pub struct RelayInbound<S> {
    sink: Arc<S>,
    mirrored: Mirrored,
}

impl<S> Clone for RelayInbound<S> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            mirrored: self.mirrored.clone(),
        }
    }
}

impl<S: BridgeSink> RelayInbound<S> {
    pub fn chat_message(&self, msg: &ChatMessage) {
        self.forward(LIVE_TAG, msg);
    }

    pub fn history_message(&self, msg: &ChatMessage) {
        self.forward(HISTORY_TAG, msg);
    }

    fn forward(&self, tag: &str, msg: &ChatMessage) {
        let nick = format!("{tag}{}", msg.nick);
        for channel in self.mirrored.snapshot() {
            self.sink.inject(&format!("#{channel}"), &nick, &msg.text);
        }
    }
}

/// Backend that only logs; used when no external system is attached.
#[derive(Debug, Default)]
pub struct LogBackend;

impl ChatBackend for LogBackend {
    fn join_channel(&mut self, channel: &str) -> bool {
        info!(channel = %channel, "Backend join");
        true
    }

    fn retrieve_history(&mut self, channel: &str) -> bool {
        info!(channel = %channel, "Backend history request");
        true
    }

    fn send_message(&mut self, channel: &str, nick: &str, text: &str) {
        info!(channel = %channel, nick = %nick, text = %text, "Backend message");
    }
}
