//! USER command handler.

use logos_irc_proto::MessageRef;
use tracing::debug;

use super::super::{Context, Handler, HandlerError, HandlerResult};

/// Handler for USER command.
///
/// Only the username is kept; mode and realname are accepted and dropped.
pub struct UserHandler;

impl Handler for UserHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // USER <username> <mode> <unused> <realname>
        if msg.arg_count() < 4 {
            return Err(HandlerError::NeedMoreParams);
        }
        let username = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;

        ctx.client_mut()?.user = username.to_string();
        debug!(client = %ctx.id, user = %username, "User set");
        Ok(())
    }
}
