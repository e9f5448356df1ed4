//! PRIVMSG handler.
//!
//! Only channel targets are delivered. Private messages between users are
//! not routed; they are logged and dropped.

use logos_irc_proto::{MessageRef, is_channel_name};
use tracing::debug;

use super::{Context, Handler, HandlerError, HandlerResult};
use crate::bridge::{self, BridgeEvent};

/// Handler for PRIVMSG command.
pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // PRIVMSG <target> <text...>
        if msg.arg_count() < 2 {
            return Err(HandlerError::NeedMoreParams);
        }
        let target = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let text = msg.trailing(1).unwrap_or_default();

        let client = ctx.client()?;
        if !is_channel_name(target) {
            debug!(from = %client.nick, to = %target, "Private message dropped");
            return Ok(());
        }
        if !client.is_in(target) {
            return Err(HandlerError::NotOnChannel(target.to_string()));
        }
        let nick = client.nick.clone();

        ctx.matrix.broadcast(target, ctx.id, &text);
        debug!(nick = %nick, channel = %target, "Broadcast message");

        ctx.matrix.bridge.emit(BridgeEvent::MessageSent {
            channel: target.to_string(),
            nick,
            text,
        });

        bridge::auto_respond(ctx.matrix, target, ctx.id);
        Ok(())
    }
}
