//! Connection and registration handlers.
//!
//! Handles NICK, USER, PING and QUIT, plus the registration transition.

mod nick;
mod ping;
mod quit;
mod user;
mod welcome;

pub use nick::NickHandler;
pub use ping::PingHandler;
pub use quit::QuitHandler;
pub use user::UserHandler;
pub(crate) use welcome::try_register;
