//! The Matrix - server-wide state owned by the coordinator.
//!
//! The Matrix exclusively owns every [`Client`] and [`Channel`](super::Channel)
//! record. All mutation happens on the coordinator task, one event at a
//! time, so no locking is involved. Channel membership is always updated
//! on both sides here: `channel ∈ client.channels ⇔ client ∈ channel.members`.

use std::collections::{BTreeSet, HashMap};

use chrono::Local;
use logos_irc_proto::{Message, irc_eq};
use tracing::debug;

use super::{ChannelRegistry, Client, ClientId};
use crate::bridge::BridgeGateway;
use crate::config::{Config, MotdConfig};

/// Static server identity used in replies.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub network: String,
    pub version: String,
    /// Human-readable start time for RPL_CREATED.
    pub created: String,
}

/// Server state: clients, channels and the bridge gateway.
pub struct Matrix {
    pub server_info: ServerInfo,
    pub motd: MotdConfig,
    pub clients: HashMap<ClientId, Client>,
    pub channels: ChannelRegistry,
    pub bridge: BridgeGateway,
}

impl Matrix {
    pub fn new(config: &Config) -> Self {
        Self {
            server_info: ServerInfo {
                name: config.server.name.clone(),
                network: config.server.network.clone(),
                version: config.server.version.clone(),
                created: Local::now().format("%a %b %e %H:%M:%S %Y").to_string(),
            },
            motd: config.motd.clone(),
            clients: HashMap::new(),
            channels: ChannelRegistry::default(),
            bridge: BridgeGateway::new(config.bridge.clone()),
        }
    }

    #[inline]
    pub fn server_name(&self) -> &str {
        &self.server_info.name
    }

    pub fn add_client(&mut self, client: Client) {
        self.clients.insert(client.id, client);
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(&id)
    }

    pub fn client_mut(&mut self, id: ClientId) -> Option<&mut Client> {
        self.clients.get_mut(&id)
    }

    /// Deliver a message to one client, if it still exists.
    pub fn send_to(&self, id: ClientId, msg: &Message) {
        if let Some(client) = self.clients.get(&id) {
            client.send(msg);
        }
    }

    /// Find another client currently holding `nick` (case-insensitive).
    pub fn find_nick_owner(&self, nick: &str, except: ClientId) -> Option<ClientId> {
        self.clients
            .values()
            .find(|c| c.id != except && !c.nick.is_empty() && irc_eq(&c.nick, nick))
            .map(|c| c.id)
    }

    /// Add membership on both sides. Returns false if the client is unknown.
    pub fn join_channel(&mut self, id: ClientId, channel: &str) -> bool {
        let Some(client) = self.clients.get_mut(&id) else {
            return false;
        };
        client.join(channel);
        self.channels.add_member(channel, id);
        true
    }

    /// Remove membership on both sides, deleting the channel if it empties.
    /// Returns whether the client was a member.
    pub fn part_channel(&mut self, id: ClientId, channel: &str) -> bool {
        let was_local = self
            .clients
            .get_mut(&id)
            .is_some_and(|client| client.leave(channel));
        let was_member = self.channels.remove_member(channel, id);
        was_local || was_member
    }

    /// Remove a client from every channel it belongs to.
    pub fn remove_from_all_channels(&mut self, id: ClientId) {
        if let Some(client) = self.clients.get_mut(&id) {
            client.take_channels();
        }
        self.channels.remove_from_all(id);
    }

    /// Deliver a PRIVMSG from `sender` to every other member of `channel`.
    /// A no-op if the channel or sender does not exist.
    pub fn broadcast(&self, channel: &str, sender: ClientId, text: &str) {
        let (Some(chan), Some(origin)) = (self.channels.get(channel), self.clients.get(&sender))
        else {
            return;
        };

        let msg = Message::privmsg(channel, text).with_prefix(origin.prefix());
        for member in chan.members().filter(|m| *m != sender) {
            self.send_to(member, &msg);
        }
    }

    /// Every distinct client sharing at least one channel with `id`,
    /// excluding `id` itself.
    pub fn peers_of(&self, id: ClientId) -> BTreeSet<ClientId> {
        let Some(client) = self.clients.get(&id) else {
            return BTreeSet::new();
        };
        client
            .channels()
            .filter_map(|name| self.channels.get(name))
            .flat_map(|channel| channel.members())
            .filter(|member| *member != id)
            .collect()
    }

    /// Tear a client down: leave every channel, drop it from the table and
    /// release its transport. Safe to call more than once.
    pub fn disconnect(&mut self, id: ClientId) -> Option<Client> {
        self.remove_from_all_channels(id);
        let mut client = self.clients.remove(&id)?;
        client.close();
        debug!(client = %id, nick = %client.nick, "Client removed");
        Some(client)
    }

    /// Drop every client and channel.
    pub fn clear(&mut self) {
        for client in self.clients.values_mut() {
            client.close();
        }
        self.clients.clear();
        self.channels.clear();
    }

    /// Registered members of a channel, in member order.
    pub fn registered_members(&self, channel: &str) -> Vec<&Client> {
        self.channels
            .get(channel)
            .into_iter()
            .flat_map(|ch| ch.members())
            .filter_map(|id| self.clients.get(&id))
            .filter(|client| client.registered)
            .collect()
    }
}
