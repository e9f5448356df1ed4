//! MODE handler.
//!
//! Modes are not modelled: queries get an empty `+` mode string and any
//! attempt to change modes is ignored.

use chrono::Utc;
use logos_irc_proto::{MessageRef, Response, is_channel_name};

use super::{Context, Handler, HandlerError, HandlerResult};

/// Handler for MODE command.
pub struct ModeHandler;

impl Handler for ModeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let target = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        if msg.arg_count() > 1 {
            return Ok(());
        }

        let nick = ctx.nick();
        if target == nick {
            ctx.reply(Response::RPL_UMODEIS, format!("{nick} +"));
        } else if is_channel_name(target) {
            ctx.reply(Response::RPL_CHANNELMODEIS, format!("{nick} {target} +"));
            ctx.reply(
                Response::RPL_CREATIONTIME,
                format!("{nick} {target} {}", Utc::now().timestamp()),
            );
        }
        Ok(())
    }
}
