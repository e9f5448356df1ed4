//! Channel membership handlers.
//!
//! Channel names are normalized to start with `#`; beyond that they are
//! compared exactly.

mod join;
mod part;

pub use join::JoinHandler;
pub use part::PartHandler;
