//! Command handler registry and dispatch.

use std::collections::HashMap;

use logos_irc_proto::MessageRef;
use tracing::{Level, debug, info, span};

use super::channel::{JoinHandler, PartHandler};
use super::connection::{NickHandler, PingHandler, QuitHandler, UserHandler, try_register};
use super::messaging::PrivmsgHandler;
use super::mode::ModeHandler;
use super::server_query::MotdHandler;
use super::user_query::WhoHandler;
use super::{Context, Handler, HandlerError};
use crate::state::{ClientId, Matrix};

/// Registry of command handlers, split by registration requirement.
pub struct Registry {
    /// Accepted in any state.
    universal: HashMap<&'static str, Box<dyn Handler>>,
    /// Silently dropped until the client has registered.
    post_reg: HashMap<&'static str, Box<dyn Handler>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut universal: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();
        let mut post_reg: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        // Connection/registration handlers
        universal.insert("NICK", Box::new(NickHandler));
        universal.insert("USER", Box::new(UserHandler));
        universal.insert("PING", Box::new(PingHandler));
        universal.insert("QUIT", Box::new(QuitHandler));

        // Membership is checked by the handler itself
        universal.insert("PRIVMSG", Box::new(PrivmsgHandler));

        // Channel handlers
        post_reg.insert("JOIN", Box::new(JoinHandler));
        post_reg.insert("PART", Box::new(PartHandler));
        post_reg.insert("MODE", Box::new(ModeHandler));

        // Query handlers
        post_reg.insert("WHO", Box::new(WhoHandler));
        post_reg.insert("MOTD", Box::new(MotdHandler));

        Self {
            universal,
            post_reg,
        }
    }

    /// Dispatch one trimmed line from `id`.
    ///
    /// Malformed lines and unknown verbs are dropped. Handler errors are
    /// absorbed here; the only client-visible one is 433. After every
    /// command that did not end the session, the client is checked for
    /// the Unregistered to Registered transition.
    pub fn dispatch(&self, matrix: &mut Matrix, id: ClientId, line: &str) {
        let msg = match MessageRef::parse(line) {
            Ok(msg) => msg,
            Err(e) => {
                debug!(client = %id, error = %e, "Dropping unparsable line");
                return;
            }
        };

        let cmd_name = msg.command_name().to_ascii_uppercase();
        let _span = span!(Level::DEBUG, "irc.command", command = %cmd_name, client = %id).entered();

        let result = if let Some(handler) = self.universal.get(cmd_name.as_str()) {
            handler.handle(&mut Context::new(id, matrix), &msg)
        } else if let Some(handler) = self.post_reg.get(cmd_name.as_str()) {
            if matrix.client(id).is_some_and(|c| c.registered) {
                handler.handle(&mut Context::new(id, matrix), &msg)
            } else {
                Err(HandlerError::NotRegistered)
            }
        } else {
            debug!(command = %cmd_name, "Ignoring unknown command");
            Ok(())
        };

        match result {
            Ok(()) => {}
            Err(HandlerError::Quit(reason)) => {
                info!(client = %id, reason = %reason, "Client quit");
                matrix.disconnect(id);
                return;
            }
            Err(e) => {
                let nick = matrix.client(id).map(|c| c.nick.clone()).unwrap_or_default();
                if let Some(reply) = e.to_irc_reply(matrix.server_name(), &nick) {
                    matrix.send_to(id, &reply);
                }
                debug!(command = %cmd_name, error = %e, code = e.error_code(), "Command error");
            }
        }

        try_register(matrix, id);
    }
}
