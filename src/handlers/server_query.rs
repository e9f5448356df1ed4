//! Server query handlers (MOTD).

use logos_irc_proto::{Message, MessageRef, Response};

use super::{Context, Handler, HandlerResult};
use crate::state::Client;

/// Send `375`, one `372` per line, then `376`.
pub(super) fn send_motd_block(server_name: &str, client: &Client, lines: &[String]) {
    let nick = client.nick.as_str();
    let reply = |response, params: String| {
        client.send(&Message::response(server_name, response, params));
    };

    reply(
        Response::RPL_MOTDSTART,
        format!("{nick} :- {server_name} Message of the day -"),
    );
    for line in lines {
        reply(Response::RPL_MOTD, format!("{nick} :- {line}"));
    }
    reply(Response::RPL_ENDOFMOTD, format!("{nick} :End of /MOTD command"));
}

/// Handler for MOTD command.
///
/// Resends the short MOTD, not the one shown at registration.
pub struct MotdHandler;

impl Handler for MotdHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &MessageRef<'_>) -> HandlerResult {
        let client = ctx.client()?;
        send_motd_block(
            ctx.server_name(),
            client,
            std::slice::from_ref(&ctx.matrix.motd.short),
        );
        Ok(())
    }
}
