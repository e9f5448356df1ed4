//! Unified error handling for logos-ircd.
//!
//! Handler errors never unwind the coordinator: the dispatcher turns the
//! few that have a client-visible form into a numeric reply and logs the
//! rest.

use logos_irc_proto::{Message, Response};
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("not registered")]
    NotRegistered,

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("not on channel: {0}")]
    NotOnChannel(String),

    /// The client record vanished before the command could run.
    #[error("session gone")]
    SessionGone,

    /// The client asked to leave; the coordinator tears the session down.
    #[error("client quit: {0}")]
    Quit(String),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::NotRegistered => "not_registered",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::NotOnChannel(_) => "not_on_channel",
            Self::SessionGone => "session_gone",
            Self::Quit(_) => "quit",
        }
    }

    /// Convert to an IRC error reply message.
    ///
    /// Returns `None` for errors the server absorbs silently. `nick` is the
    /// requester's current nick, or empty before one has been accepted.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str) -> Option<Message> {
        match self {
            Self::NicknameInUse(wanted) => {
                let current = if nick.is_empty() { "*" } else { nick };
                Some(Message::response(
                    server_name,
                    Response::ERR_NICKNAMEINUSE,
                    format!("{current} {wanted} :Nickname is already in use"),
                ))
            }
            Self::NeedMoreParams
            | Self::NotRegistered
            | Self::NotOnChannel(_)
            | Self::SessionGone
            | Self::Quit(_) => None,
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Server Errors (lifecycle)
// ============================================================================

/// Errors surfaced by server startup and the public handle.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server is not running")]
    NotRunning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_codes() {
        assert_eq!(HandlerError::NeedMoreParams.error_code(), "need_more_params");
        assert_eq!(HandlerError::NotRegistered.error_code(), "not_registered");
        assert_eq!(HandlerError::Quit("bye".into()).error_code(), "quit");
    }

    #[test]
    fn test_nickname_in_use_reply() {
        let reply = HandlerError::NicknameInUse("bob".into())
            .to_irc_reply("srv", "alice")
            .unwrap();
        assert_eq!(reply.to_string(), ":srv 433 alice bob :Nickname is already in use");
    }

    #[test]
    fn test_nickname_in_use_before_first_nick() {
        let reply = HandlerError::NicknameInUse("bob".into())
            .to_irc_reply("srv", "")
            .unwrap();
        assert_eq!(reply.to_string(), ":srv 433 * bob :Nickname is already in use");
    }

    #[test]
    fn test_silent_errors_have_no_reply() {
        assert!(HandlerError::NotRegistered.to_irc_reply("srv", "a").is_none());
        assert!(HandlerError::NeedMoreParams.to_irc_reply("srv", "a").is_none());
        assert!(HandlerError::Quit("x".into()).to_irc_reply("srv", "a").is_none());
    }
}
