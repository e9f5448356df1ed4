//! Bridge gateway between the IRC channel space and an external chat system.
//!
//! The gateway owns three things:
//!
//! - the bridge bot, a transport-less client seeded into the home channel
//!   at startup without a JOIN announcement;
//! - the outbound listener registry, notified synchronously from inside
//!   the handler that completed a JOIN or a channel PRIVMSG;
//! - the inbound injection path used by the external collaborator.

pub mod relay;

use logos_irc_proto::{Message, Prefix, normalize_channel};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::BridgeConfig;
use crate::state::{Client, ClientId, Matrix};

/// Host and user used in the prefix of injected messages.
const INJECT_USER: &str = "bridge";
const INJECT_HOST: &str = "waku.bridge";

/// Channel activity mirrored to the external collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// A real client completed a JOIN.
    ChannelJoined { channel: String },
    /// A channel PRIVMSG was broadcast.
    MessageSent {
        channel: String,
        nick: String,
        text: String,
    },
}

/// Receives [`BridgeEvent`]s on the coordinator task.
///
/// Implementations must not block: they run inline with command dispatch.
pub trait BridgeListener: Send {
    fn on_event(&mut self, event: &BridgeEvent);
}

impl BridgeListener for mpsc::UnboundedSender<BridgeEvent> {
    fn on_event(&mut self, event: &BridgeEvent) {
        let _ = self.send(event.clone());
    }
}

/// Bridge bot identity plus the listener registry.
pub struct BridgeGateway {
    config: BridgeConfig,
    bot: Option<ClientId>,
    listeners: Vec<Box<dyn BridgeListener>>,
}

impl BridgeGateway {
    pub fn new(mut config: BridgeConfig) -> Self {
        config.home_channel = normalize_channel(&config.home_channel).into_owned();
        Self {
            config,
            bot: None,
            listeners: Vec::new(),
        }
    }

    /// The bot's client id while it exists.
    pub fn bot(&self) -> Option<ClientId> {
        self.bot
    }

    pub fn home_channel(&self) -> &str {
        &self.config.home_channel
    }

    pub fn subscribe(&mut self, listener: Box<dyn BridgeListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Notify every listener, in registration order, before returning.
    pub fn emit(&mut self, event: BridgeEvent) {
        debug!(?event, listeners = self.listeners.len(), "Bridge event");
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }
}

/// Create the bridge bot and seed it into its home channel.
///
/// No JOIN is announced and no `ChannelJoined` event is raised.
pub fn create_bot(matrix: &mut Matrix) {
    if !matrix.bridge.config.enabled || matrix.bridge.bot.is_some() {
        return;
    }

    let config = &matrix.bridge.config;
    let bot = Client::without_transport(
        ClientId::BRIDGE,
        config.nick.as_str(),
        config.user.as_str(),
        config.host.as_str(),
    );
    let home = config.home_channel.clone();
    let nick = bot.nick.clone();

    matrix.add_client(bot);
    matrix.join_channel(ClientId::BRIDGE, &home);
    matrix.bridge.bot = Some(ClientId::BRIDGE);

    info!(nick = %nick, channel = %home, "Bridge bot created");
}

/// Remove the bridge bot and its memberships.
pub fn remove_bot(matrix: &mut Matrix) {
    if let Some(bot) = matrix.bridge.bot.take() {
        matrix.disconnect(bot);
        info!("Bridge bot removed");
    }
}

/// Canned reply from the bot after a PRIVMSG in its home channel.
///
/// Sent to every registered member except the bot itself; the original
/// sender receives it too.
pub fn auto_respond(matrix: &Matrix, channel: &str, sender: ClientId) {
    let Some(bot_id) = matrix.bridge.bot else {
        return;
    };
    let reply = matrix.bridge.config.auto_reply.as_str();
    if reply.is_empty() || sender == bot_id || channel != matrix.bridge.home_channel() {
        return;
    }
    let Some(bot) = matrix.client(bot_id) else {
        return;
    };

    let msg = Message::privmsg(channel, reply).with_prefix(bot.prefix());
    for member in matrix.registered_members(channel) {
        if member.id != bot_id {
            member.send(&msg);
        }
    }

    debug!(channel = %channel, sender = %sender, "Bridge bot replied");
}

/// Deliver a message from the external system to a channel.
///
/// Every registered member receives it, as the injecting party is not a
/// member itself. Returns false (and delivers nothing) if the channel
/// does not exist.
pub fn inject_message(matrix: &Matrix, channel: &str, nick: &str, text: &str) -> bool {
    if !matrix.channels.contains(channel) {
        info!(channel = %channel, nick = %nick, "Bridge injection into unknown channel dropped");
        return false;
    }

    let msg = Message::privmsg(channel, text)
        .with_prefix(Prefix::new(nick, INJECT_USER, INJECT_HOST));
    for member in matrix.registered_members(channel) {
        member.send(&msg);
    }

    debug!(channel = %channel, nick = %nick, "Injected bridge message");
    true
}
