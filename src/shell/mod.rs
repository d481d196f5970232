//! External process execution and environment detection.

pub mod command;
pub mod platform;

pub use command::{
    describe, execute, execute_quiet, CommandOptions, CommandResult,
};
pub use platform::is_ci;
