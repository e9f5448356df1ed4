//! Client identifier generation.

use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque handle naming one client record in the server state.
///
/// Every accepted connection gets a fresh id; the bridge bot owns the
/// reserved id [`ClientId::BRIDGE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(u64);

impl ClientId {
    /// Reserved for the bridge bot, which has no transport.
    pub const BRIDGE: ClientId = ClientId(0);

    pub const fn new(raw: u64) -> Self {
        ClientId(raw)
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Generates unique client ids.
///
/// Shared between the gateway (which allocates on accept) and tests.
/// Counter starts at 1 because 0 is reserved for the bridge bot.
pub struct ClientIdGenerator {
    counter: AtomicU64,
}

const ID_COUNTER_START: u64 = 1;

impl ClientIdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(ID_COUNTER_START),
        }
    }

    /// Allocate the next unique id.
    pub fn next(&self) -> ClientId {
        ClientId(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ClientIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
