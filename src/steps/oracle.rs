//! Outcome interpretation.
//!
//! An [`Oracle`] turns what a step's action produced into an [`Outcome`].
//! Steps own their oracle, so a marker that only matches one vendor's
//! wording can be swapped without touching the runner.

use std::fmt;

use serde::Serialize;

use super::step::ActionOutput;

/// Exit code reported when the leak checker's "no leaks" marker is missing.
pub const LEAK_SENTINEL: i32 = 111;

/// Exit code reported when static analysis output carries a warning marker.
pub const ANALYSIS_WARNING_CODE: i32 = 1;

/// Interpreted result of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "code", rename_all = "snake_case")]
pub enum Outcome {
    /// The step passed.
    Success,
    /// The external tool exited nonzero; carries its status.
    ToolFailure(i32),
    /// A marker rule failed; carries the rule's sentinel code.
    PatternMatchFailure(i32),
    /// The step could not run; never touches the accumulator.
    ToolUnavailable,
}

impl Outcome {
    /// The code this outcome contributes (0 for success and skips).
    pub fn code(&self) -> i32 {
        match self {
            Outcome::Success | Outcome::ToolUnavailable => 0,
            Outcome::ToolFailure(code) | Outcome::PatternMatchFailure(code) => *code,
        }
    }

    /// Whether this outcome is a failure of any kind.
    pub fn is_failure(&self) -> bool {
        self.code() != 0
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::ToolFailure(code) => write!(f, "tool failed with exit code {}", code),
            Outcome::PatternMatchFailure(code) => write!(f, "marker check failed ({})", code),
            Outcome::ToolUnavailable => write!(f, "unavailable"),
        }
    }
}

/// Maps an action's result to an outcome.
pub trait Oracle {
    /// Judge the action's result.
    fn judge(&self, output: &ActionOutput) -> Outcome;

    /// Short human description of the rule, for logs and `--verbose`.
    fn describe(&self) -> String;
}

/// Passes when the tool exits 0; otherwise propagates its exit status.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitStatusOracle;

impl Oracle for ExitStatusOracle {
    fn judge(&self, output: &ActionOutput) -> Outcome {
        match output.exit_code {
            0 => Outcome::Success,
            code => Outcome::ToolFailure(code),
        }
    }

    fn describe(&self) -> String {
        "exit status".to_string()
    }
}

/// Which way a [`MarkerOracle`] reads its marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRule {
    /// Fail when the marker is absent.
    MustContain,
    /// Fail when the marker is present.
    MustNotContain,
}

/// Substring rule over captured output. Ignores the exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerOracle {
    marker: String,
    rule: MarkerRule,
    failure_code: i32,
}

impl MarkerOracle {
    /// Fail with `failure_code` unless the output contains `marker`.
    pub fn must_contain(marker: impl Into<String>, failure_code: i32) -> Self {
        Self {
            marker: marker.into(),
            rule: MarkerRule::MustContain,
            failure_code,
        }
    }

    /// Fail with `failure_code` if the output contains `marker`.
    pub fn must_not_contain(marker: impl Into<String>, failure_code: i32) -> Self {
        Self {
            marker: marker.into(),
            rule: MarkerRule::MustNotContain,
            failure_code,
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn rule(&self) -> MarkerRule {
        self.rule
    }
}

impl Oracle for MarkerOracle {
    fn judge(&self, output: &ActionOutput) -> Outcome {
        let found = output
            .output
            .as_deref()
            .is_some_and(|text| text.contains(&self.marker));

        let passed = match self.rule {
            MarkerRule::MustContain => found,
            MarkerRule::MustNotContain => !found,
        };

        if passed {
            Outcome::Success
        } else {
            Outcome::PatternMatchFailure(self.failure_code)
        }
    }

    fn describe(&self) -> String {
        match self.rule {
            MarkerRule::MustContain => format!("output must contain {:?}", self.marker),
            MarkerRule::MustNotContain => format!("output must not contain {:?}", self.marker),
        }
    }
}
