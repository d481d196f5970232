//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`], which owns the settings every command shares
//! (project root, explicit config path).

pub mod completions;
pub mod dispatcher;
pub mod run;
pub mod tools;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
