//! PING handler.

use logos_irc_proto::{Message, MessageRef};

use super::super::{Context, Handler, HandlerResult};

/// Handler for PING command.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // PING [<token>]
        let token = msg.arg(0).unwrap_or("ping");
        ctx.send(&Message::pong(token));
        Ok(())
    }
}
