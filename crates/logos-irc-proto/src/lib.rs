//! # logos-irc-proto
//!
//! Wire-level pieces of the Logos IRC server: a tolerant line framer,
//! a whitespace-splitting command parser, outbound message formatting and
//! the numeric replies the server emits.
//!
//! ```rust
//! use logos_irc_proto::{Message, MessageRef, Prefix, Response};
//!
//! let msg = MessageRef::parse("PRIVMSG #general :hi there").unwrap();
//! assert_eq!(msg.command_name(), "PRIVMSG");
//! assert_eq!(msg.trailing(1).as_deref(), Some("hi there"));
//!
//! let reply = Message::response("irc.local", Response::RPL_UMODEIS, "alice +");
//! assert_eq!(reply.to_string(), ":irc.local 221 alice +");
//!
//! let echo = Message::join("#general").with_prefix(Prefix::new("alice", "alice", "127.0.0.1"));
//! assert_eq!(echo.to_string(), ":alice!alice@127.0.0.1 JOIN :#general");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod chan;
pub mod error;
pub mod line;
pub mod message;
pub mod prefix;
pub mod response;

pub use self::casemap::irc_eq;
pub use self::chan::{is_channel_name, normalize_channel};
pub use self::error::{MessageParseError, ProtocolError};
pub use self::line::LineCodec;
pub use self::message::{Message, MessageRef};
pub use self::prefix::Prefix;
pub use self::response::Response;
