//! IRC numeric response codes emitted by the server.

#![allow(non_camel_case_types)]

use std::fmt::{self, Display, Formatter};

/// IRC server response code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    /// 001 - Welcome to the IRC network
    RPL_WELCOME = 1,
    /// 002 - Your host is running version
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,
    /// 004 - Server info (name, version, user modes, channel modes)
    RPL_MYINFO = 4,
    /// 221 - User mode string
    RPL_UMODEIS = 221,
    /// 315 - End of WHO list
    RPL_ENDOFWHO = 315,
    /// 324 - Channel mode string
    RPL_CHANNELMODEIS = 324,
    /// 329 - Channel creation time
    RPL_CREATIONTIME = 329,
    /// 332 - Channel topic
    RPL_TOPIC = 332,
    /// 352 - WHO reply
    RPL_WHOREPLY = 352,
    /// 353 - NAMES reply
    RPL_NAMREPLY = 353,
    /// 366 - End of NAMES list
    RPL_ENDOFNAMES = 366,
    /// 372 - MOTD line
    RPL_MOTD = 372,
    /// 375 - MOTD start
    RPL_MOTDSTART = 375,
    /// 376 - End of MOTD
    RPL_ENDOFMOTD = 376,
    /// 433 - Nickname already in use
    ERR_NICKNAMEINUSE = 433,
}

impl Response {
    /// Numeric value of the response code.
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }
}

impl Display for Response {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}
