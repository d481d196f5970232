//! Command-line interface for cxxvet.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, RunArgs, ToolsArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
