//! IRC command handlers.
//!
//! Every inbound line is routed through the [`Registry`], which looks the
//! verb up, enforces the registration precondition and hands a [`Context`]
//! to the matching [`Handler`]. Handlers run on the coordinator task with
//! exclusive access to the [`Matrix`]; all fan-out they perform is complete
//! by the time they return.

mod channel;
mod connection;
mod messaging;
mod mode;
mod registry;
mod server_query;
mod user_query;

#[cfg(test)]
pub(crate) mod test_support;

pub use registry::Registry;

use logos_irc_proto::{Message, MessageRef, Response};

pub use crate::error::{HandlerError, HandlerResult};
use crate::state::{Client, ClientId, Matrix};

/// Per-command handler context.
///
/// Carries the originating client explicitly, so handlers never have to
/// recover the sender from anything else.
pub struct Context<'a> {
    /// The client that sent the command.
    pub id: ClientId,
    /// Server state, owned by the coordinator.
    pub matrix: &'a mut Matrix,
}

impl<'a> Context<'a> {
    pub fn new(id: ClientId, matrix: &'a mut Matrix) -> Self {
        Self { id, matrix }
    }

    pub fn client(&self) -> Result<&Client, HandlerError> {
        self.matrix.client(self.id).ok_or(HandlerError::SessionGone)
    }

    pub fn client_mut(&mut self) -> Result<&mut Client, HandlerError> {
        self.matrix.client_mut(self.id).ok_or(HandlerError::SessionGone)
    }

    /// The sender's current nick, or empty if none has been accepted yet.
    pub fn nick(&self) -> &str {
        self.matrix.client(self.id).map_or("", |c| c.nick.as_str())
    }

    #[inline]
    pub fn server_name(&self) -> &str {
        self.matrix.server_name()
    }

    /// Deliver a message to the sender.
    pub fn send(&self, msg: &Message) {
        self.matrix.send_to(self.id, msg);
    }

    /// Build and send a server numeric in one call.
    pub fn reply(&self, response: Response, params: impl Into<String>) {
        self.send(&Message::response(self.server_name(), response, params));
    }
}

/// A command handler.
///
/// Handlers are synchronous: they run inline on the coordinator task and
/// must never block or wait on I/O.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult;
}
