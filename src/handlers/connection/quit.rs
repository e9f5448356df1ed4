//! QUIT handler for terminating client sessions.

use logos_irc_proto::{Message, MessageRef};

use super::super::{Context, Handler, HandlerError, HandlerResult};

const DEFAULT_REASON: &str = "Client quit";

/// Handler for QUIT command.
///
/// Notifies peers, then signals the dispatcher to tear the session down.
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let reason = msg
            .trailing(0)
            .unwrap_or_else(|| DEFAULT_REASON.to_string());

        let client = ctx.client()?;
        if client.registered {
            let notice = Message::quit(&reason).with_prefix(client.prefix());
            for peer in ctx.matrix.peers_of(ctx.id) {
                ctx.matrix.send_to(peer, &notice);
            }
        }

        Err(HandlerError::Quit(reason))
    }
}
