//! Inbound command parsing and outbound message formatting.
//!
//! Inbound lines are parsed permissively: the line is split on single
//! spaces, empty tokens are dropped, the first token is the verb and the
//! rest are arguments. There is no special handling of `:` trailing
//! parameters on input; handlers rejoin the tail with [`MessageRef::trailing`].
//!
//! Outbound lines are `[:<prefix> ]<command>[ <params>]`, where `params` is
//! already formatted by the caller (including any `:` trailing marker).

use std::fmt::{self, Display, Formatter};

use smallvec::SmallVec;

use crate::error::MessageParseError;
use crate::prefix::Prefix;
use crate::response::Response;

/// A borrowed command line: verb plus space-split arguments.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MessageRef<'a> {
    command: &'a str,
    args: SmallVec<[&'a str; 8]>,
}

impl<'a> MessageRef<'a> {
    /// Parse a trimmed line into a `MessageRef`.
    ///
    /// Fails only when the line has no tokens at all.
    #[must_use = "parsing result should be handled"]
    pub fn parse(s: &'a str) -> Result<MessageRef<'a>, MessageParseError> {
        let mut tokens = s.split(' ').filter(|t| !t.is_empty());
        let command = tokens.next().ok_or(MessageParseError::EmptyMessage)?;

        Ok(MessageRef {
            command,
            args: tokens.collect(),
        })
    }

    /// The verb exactly as sent.
    #[inline]
    pub fn command_name(&self) -> &'a str {
        self.command
    }

    /// A specific argument by index.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    /// Number of arguments after the verb.
    #[inline]
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Arguments from `from` onward rejoined with single spaces, with one
    /// leading `:` stripped. `None` when there are no such arguments.
    pub fn trailing(&self, from: usize) -> Option<String> {
        let rest = self.args.get(from..).filter(|rest| !rest.is_empty())?;
        let joined = rest.join(" ");
        Some(match joined.strip_prefix(':') {
            Some(stripped) => stripped.to_string(),
            None => joined,
        })
    }
}

/// An owned outbound message.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    /// Origin of the message; omitted from the wire when `None`.
    pub prefix: Option<Prefix>,
    /// Verb or zero-padded numeric.
    pub command: String,
    /// Pre-formatted parameter string.
    pub params: String,
}

impl Message {
    /// Create an unprefixed message.
    pub fn new(command: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            prefix: None,
            command: command.into(),
            params: params.into(),
        }
    }

    /// Create a numeric reply originating from the server.
    pub fn response(server_name: &str, response: Response, params: impl Into<String>) -> Self {
        Self::new(response.to_string(), params).with_prefix(Prefix::server(server_name))
    }

    /// Attach a prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// `PRIVMSG <target> :<text>`
    pub fn privmsg(target: &str, text: &str) -> Self {
        Self::new("PRIVMSG", format!("{target} :{text}"))
    }

    /// `JOIN :<channel>`
    pub fn join(channel: &str) -> Self {
        Self::new("JOIN", format!(":{channel}"))
    }

    /// `PART <channel> :<reason>`
    pub fn part(channel: &str, reason: &str) -> Self {
        Self::new("PART", format!("{channel} :{reason}"))
    }

    /// `NICK :<new nick>`
    pub fn nick(new_nick: &str) -> Self {
        Self::new("NICK", format!(":{new_nick}"))
    }

    /// `QUIT :<reason>`
    pub fn quit(reason: &str) -> Self {
        Self::new("QUIT", format!(":{reason}"))
    }

    /// `PONG :<token>`
    pub fn pong(token: &str) -> Self {
        Self::new("PONG", format!(":{token}"))
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            let prefix = prefix.to_string();
            if !prefix.is_empty() {
                write!(f, ":{prefix} ")?;
            }
        }
        f.write_str(&self.command)?;
        if !self.params.is_empty() {
            write!(f, " {}", self.params)?;
        }
        Ok(())
    }
}
