//! Channel records and the name-keyed channel registry.

use std::collections::{BTreeSet, HashMap};

use super::ClientId;

/// A channel and its member set.
#[derive(Debug, Clone)]
pub struct Channel {
    pub name: String,
    members: BTreeSet<ClientId>,
}

impl Channel {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: BTreeSet::new(),
        }
    }

    pub fn members(&self) -> impl Iterator<Item = ClientId> + '_ {
        self.members.iter().copied()
    }

    pub fn contains(&self, id: ClientId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Server-wide mapping of channel name to channel.
///
/// Channels are created lazily by [`add_member`](Self::add_member) and
/// deleted as soon as their member set becomes empty.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: HashMap<String, Channel>,
}

impl ChannelRegistry {
    pub fn get(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    pub fn add_member(&mut self, name: &str, id: ClientId) {
        self.channels
            .entry(name.to_string())
            .or_insert_with(|| Channel::new(name))
            .members
            .insert(id);
    }

    /// Remove one member; drops the channel if it is left empty.
    /// Returns whether the client was a member.
    pub fn remove_member(&mut self, name: &str, id: ClientId) -> bool {
        let Some(channel) = self.channels.get_mut(name) else {
            return false;
        };
        let removed = channel.members.remove(&id);
        if channel.is_empty() {
            self.channels.remove(name);
        }
        removed
    }

    /// Remove a client from every channel, deleting channels left empty.
    pub fn remove_from_all(&mut self, id: ClientId) {
        self.channels.retain(|_, channel| {
            channel.members.remove(&id);
            !channel.is_empty()
        });
    }

    pub fn clear(&mut self) {
        self.channels.clear();
    }
}

#[cfg(test)]
impl ChannelRegistry {
    /// Snapshot of a channel's members; empty if it does not exist.
    pub fn member_ids(&self, name: &str) -> Vec<ClientId> {
        self.channels
            .get(name)
            .map(|channel| channel.members().collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
