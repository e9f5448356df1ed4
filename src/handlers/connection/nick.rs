//! NICK command handler.

use logos_irc_proto::{Message, MessageRef};
use tracing::debug;

use super::super::{Context, Handler, HandlerError, HandlerResult};

/// Handler for NICK command.
///
/// Nicks are unique under RFC 1459 case mapping across every other client,
/// registered or not, including the bridge bot.
pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // NICK <nickname>
        let new_nick = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;

        if let Some(owner) = ctx.matrix.find_nick_owner(new_nick, ctx.id) {
            debug!(nick = %new_nick, owner = %owner, "Nickname collision");
            return Err(HandlerError::NicknameInUse(new_nick.to_string()));
        }

        let client = ctx.client()?;
        let old_nick = client.nick.clone();

        if client.registered && !old_nick.is_empty() {
            // Old prefix; self first, then each peer exactly once.
            let notice = Message::nick(new_nick).with_prefix(client.prefix());
            ctx.send(&notice);
            for peer in ctx.matrix.peers_of(ctx.id) {
                ctx.matrix.send_to(peer, &notice);
            }
        }

        ctx.client_mut()?.nick = new_nick.to_string();
        debug!(client = %ctx.id, old = %old_nick, new = %new_nick, "Nick changed");
        Ok(())
    }
}
