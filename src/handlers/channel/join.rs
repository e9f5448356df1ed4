//! JOIN command handler.

use logos_irc_proto::{Message, MessageRef, Response, normalize_channel};
use tracing::info;

use super::super::{Context, Handler, HandlerError, HandlerResult};
use crate::bridge::BridgeEvent;

/// Handler for JOIN command.
///
/// Only the first argument is honoured; channel keys and lists are not.
pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let target = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let channel = normalize_channel(target).into_owned();

        if !ctx.matrix.join_channel(ctx.id, &channel) {
            return Err(HandlerError::SessionGone);
        }

        let client = ctx.client()?;
        let nick = client.nick.as_str();
        let echo = Message::join(&channel).with_prefix(client.prefix());
        ctx.send(&echo);

        ctx.reply(
            Response::RPL_TOPIC,
            format!("{nick} {channel} :Welcome to {channel}"),
        );

        let names = ctx
            .matrix
            .registered_members(&channel)
            .into_iter()
            .map(|member| member.nick.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        if !names.is_empty() {
            ctx.reply(
                Response::RPL_NAMREPLY,
                format!("{nick} = {channel} :{names}"),
            );
        }
        ctx.reply(
            Response::RPL_ENDOFNAMES,
            format!("{nick} {channel} :End of /NAMES list"),
        );

        for member in ctx.matrix.registered_members(&channel) {
            if member.id != ctx.id {
                member.send(&echo);
            }
        }

        info!(client = %ctx.id, nick = %nick, channel = %channel, "Joined channel");

        ctx.matrix.bridge.emit(BridgeEvent::ChannelJoined { channel });
        Ok(())
    }
}
