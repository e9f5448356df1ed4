//! WHO handler.

use logos_irc_proto::{MessageRef, Response, is_channel_name};

use super::{Context, Handler, HandlerError, HandlerResult};

/// Handler for WHO command.
///
/// Only the channel form is answered. Unknown channels still get the
/// end-of-list reply.
pub struct WhoHandler;

impl Handler for WhoHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let target = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        if !is_channel_name(target) {
            return Ok(());
        }

        let nick = ctx.nick();
        let server_name = ctx.server_name();
        for member in ctx.matrix.registered_members(target) {
            ctx.reply(
                Response::RPL_WHOREPLY,
                format!(
                    "{nick} {target} {} {} {} {server_name} {} H :0 {}",
                    member.nick, member.user, member.host, member.nick, member.user
                ),
            );
        }
        ctx.reply(
            Response::RPL_ENDOFWHO,
            format!("{nick} {target} :End of /WHO list"),
        );
        Ok(())
    }
}
