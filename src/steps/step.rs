//! The step contract.

use std::time::Duration;

use serde::Serialize;

use crate::error::Result;
use crate::shell::CommandResult;

use super::context::RunContext;
use super::oracle::{ExitStatusOracle, Oracle, Outcome};

/// Whether a step can run right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum Availability {
    /// Everything the step needs is present.
    Available,
    /// A required external tool is not installed.
    Unavailable(String),
    /// The tool exists but there is nothing for it to act on (no sources,
    /// no executable, unsupported compiler).
    NotApplicable(String),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    /// The skip reason, if the step cannot run.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Availability::Available => None,
            Availability::Unavailable(r) | Availability::NotApplicable(r) => Some(r),
        }
    }
}

/// Whether a step's outcome feeds the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accumulation {
    /// A failure overwrites the accumulator.
    Folded,
    /// A failure is reported but leaves the accumulator alone (unless the
    /// run is strict).
    Informational,
    /// Never touches the accumulator, even in strict runs.
    Never,
}

impl Accumulation {
    /// Whether a failure under this policy changes the exit code.
    pub fn counts(&self, strict: bool) -> bool {
        match self {
            Accumulation::Folded => true,
            Accumulation::Informational => strict,
            Accumulation::Never => false,
        }
    }
}

/// What a step's action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutput {
    /// Exit status as a shell would report it.
    pub exit_code: i32,
    /// Captured combined stdout/stderr, when the step captures it.
    pub output: Option<String>,
    /// The command line that was run, for verbose display.
    pub command: Option<String>,
    /// Wall time spent in the action.
    pub duration: Duration,
}

impl ActionOutput {
    pub fn new(exit_code: i32, output: Option<String>) -> Self {
        Self {
            exit_code,
            output,
            command: None,
            duration: Duration::ZERO,
        }
    }

    /// An action that did its work in-process and produced a report.
    pub fn report(text: impl Into<String>) -> Self {
        Self::new(0, Some(text.into()))
    }

    /// Wrap a finished external command.
    pub fn from_command(command: String, result: &CommandResult) -> Self {
        let text = result.combined_output();
        Self {
            exit_code: result.status_code(),
            output: (!text.is_empty()).then_some(text),
            command: Some(command),
            duration: result.duration,
        }
    }

    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }
}

/// One unit of work in the fixed sequence.
///
/// The runner calls [`availability`](Step::availability) first; only when it
/// returns [`Availability::Available`] does it call [`run`](Step::run) and
/// then [`interpret`](Step::interpret) on the result.
pub trait Step {
    /// Stable identifier, used in logs and reports (e.g. `build`).
    fn name(&self) -> &str;

    /// Human label for banners (e.g. `Build executable`).
    fn description(&self) -> &str;

    /// Check preconditions against the current run state.
    fn availability(&self, ctx: &RunContext) -> Availability;

    /// Perform the action. Errors mean the tool could not be started.
    fn run(&self, ctx: &mut RunContext) -> Result<ActionOutput>;

    /// Map the action's result to an outcome.
    ///
    /// `ctx` is the state after [`run`](Step::run), so anything the action
    /// resolved for this run is visible here.
    fn interpret(&self, _ctx: &RunContext, output: &ActionOutput) -> Outcome {
        ExitStatusOracle.judge(output)
    }

    /// How the outcome is folded into the exit code.
    fn accumulation(&self) -> Accumulation {
        Accumulation::Folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_reason() {
        assert_eq!(Availability::Available.reason(), None);
        assert!(Availability::Available.is_available());

        let missing = Availability::Unavailable("cppcheck not found".to_string());
        assert_eq!(missing.reason(), Some("cppcheck not found"));
        assert!(!missing.is_available());
    }

    #[test]
    fn accumulation_counts() {
        assert!(Accumulation::Folded.counts(false));
        assert!(!Accumulation::Informational.counts(false));
        assert!(Accumulation::Informational.counts(true));
        assert!(!Accumulation::Never.counts(true));
    }

    #[test]
    fn from_command_drops_empty_output() {
        let result = CommandResult::success(String::new(), String::new(), Duration::ZERO);
        let output = ActionOutput::from_command("g++ main.cpp".to_string(), &result);
        assert_eq!(output.exit_code, 0);
        assert!(output.output.is_none());
        assert_eq!(output.command.as_deref(), Some("g++ main.cpp"));
    }

    #[test]
    fn from_command_keeps_failure_status_and_text() {
        let result = CommandResult::failure(
            Some(2),
            String::new(),
            "main.cpp:1: error".to_string(),
            Duration::from_millis(5),
        );
        let output = ActionOutput::from_command("g++".to_string(), &result);
        assert_eq!(output.exit_code, 2);
        assert_eq!(output.output.as_deref(), Some("main.cpp:1: error"));
        assert_eq!(output.duration, Duration::from_millis(5));
    }

    #[test]
    fn report_is_successful() {
        let output = ActionOutput::report("removed 2 files");
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.output.as_deref(), Some("removed 2 files"));
    }
}
