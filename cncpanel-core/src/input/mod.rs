//! Input dispatch
//!
//! Turns raw key codes into the logical commands the session acts on.

pub mod command;
pub mod dispatch;

pub use command::Command;
pub use dispatch::KeyMap;
