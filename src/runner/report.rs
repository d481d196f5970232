//! Per-step records and the run summary.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::steps::{Accumulation, ActionOutput, Availability, Outcome};

/// How a step ended, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// The step ran and passed.
    Passed,
    /// The step ran and failed in a way that counts.
    Failed,
    /// The step failed, but its failure does not feed the exit code.
    Warned,
    /// The step did not run.
    Skipped,
}

impl StepStatus {
    /// Get a display character for this status.
    pub fn display_char(&self) -> char {
        match self {
            StepStatus::Passed => '✓',
            StepStatus::Failed => '✗',
            StepStatus::Warned => '!',
            StepStatus::Skipped => '⊘',
        }
    }
}

/// Everything known about one step after it was considered.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub name: String,
    pub description: String,
    pub status: StepStatus,
    pub outcome: Outcome,
    pub accumulation: Accumulation,
    /// Exit status of the external action, if one ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Skip reason or error text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub duration_ms: u64,
}

impl StepRecord {
    /// A step that did not run.
    pub fn skipped(
        name: &str,
        description: &str,
        accumulation: Accumulation,
        availability: &Availability,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            status: StepStatus::Skipped,
            outcome: Outcome::ToolUnavailable,
            accumulation,
            exit_code: None,
            output: None,
            command: None,
            note: availability.reason().map(str::to_string),
            duration_ms: 0,
        }
    }

    /// A step whose action completed and was judged.
    pub fn finished(
        name: &str,
        description: &str,
        accumulation: Accumulation,
        action: ActionOutput,
        outcome: Outcome,
        strict: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            status: status_for(outcome, accumulation, strict),
            outcome,
            accumulation,
            exit_code: action.command.is_some().then_some(action.exit_code),
            output: action.output,
            command: action.command,
            note: None,
            duration_ms: millis(action.duration),
        }
    }

    /// A step whose action could not be started.
    pub fn errored(
        name: &str,
        description: &str,
        accumulation: Accumulation,
        outcome: Outcome,
        error: String,
        strict: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            status: status_for(outcome, accumulation, strict),
            outcome,
            accumulation,
            exit_code: None,
            output: None,
            command: None,
            note: Some(error),
            duration_ms: 0,
        }
    }

    /// Whether this record's outcome is folded into the exit code.
    pub fn counts(&self, strict: bool) -> bool {
        self.accumulation.counts(strict)
    }
}

fn status_for(outcome: Outcome, accumulation: Accumulation, strict: bool) -> StepStatus {
    match outcome {
        Outcome::Success => StepStatus::Passed,
        Outcome::ToolUnavailable => StepStatus::Skipped,
        Outcome::ToolFailure(_) | Outcome::PatternMatchFailure(_) => {
            if accumulation.counts(strict) {
                StepStatus::Failed
            } else {
                StepStatus::Warned
            }
        }
    }
}

pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Result of running the whole sequence.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub strict: bool,
    pub steps: Vec<StepRecord>,
    /// The folded exit code.
    pub exit_code: i32,
}

impl RunReport {
    /// Whether the run exits 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }

    /// The record that set the final exit code, if any.
    ///
    /// With last-nonzero-wins folding this is the last counting failure.
    pub fn deciding_step(&self) -> Option<&StepRecord> {
        if self.exit_code == 0 {
            return None;
        }
        self.steps
            .iter()
            .rev()
            .find(|s| s.counts(self.strict) && s.outcome.code() == self.exit_code)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(name: &str, code: i32, accumulation: Accumulation, strict: bool) -> StepRecord {
        StepRecord::finished(
            name,
            name,
            accumulation,
            ActionOutput::new(code, None),
            Outcome::ToolFailure(code),
            strict,
        )
    }

    #[test]
    fn informational_failure_is_warned() {
        let record = failed("format-check", 1, Accumulation::Informational, false);
        assert_eq!(record.status, StepStatus::Warned);
        assert!(!record.counts(false));
    }

    #[test]
    fn informational_failure_counts_when_strict() {
        let record = failed("format-check", 1, Accumulation::Informational, true);
        assert_eq!(record.status, StepStatus::Failed);
        assert!(record.counts(true));
    }

    #[test]
    fn never_does_not_count_even_strict() {
        let record = failed("cleanup", 1, Accumulation::Never, true);
        assert_eq!(record.status, StepStatus::Warned);
    }

    #[test]
    fn skipped_carries_reason() {
        let record = StepRecord::skipped(
            "lint",
            "Lint sources",
            Accumulation::Folded,
            &Availability::Unavailable("cppcheck not found on PATH".to_string()),
        );
        assert_eq!(record.status, StepStatus::Skipped);
        assert_eq!(record.outcome, Outcome::ToolUnavailable);
        assert_eq!(record.note.as_deref(), Some("cppcheck not found on PATH"));
    }

    #[test]
    fn in_process_report_has_no_exit_code() {
        let record = StepRecord::finished(
            "discover-compiler",
            "Discover C++ compiler",
            Accumulation::Never,
            ActionOutput::report("Using g++"),
            Outcome::Success,
            false,
        );
        assert_eq!(record.exit_code, None);
        assert_eq!(record.output.as_deref(), Some("Using g++"));
    }

    #[test]
    fn deciding_step_is_last_matching_failure() {
        let report = RunReport {
            started_at: Utc::now(),
            duration_ms: 0,
            strict: false,
            steps: vec![
                failed("build", 2, Accumulation::Folded, false),
                failed("format-check", 1, Accumulation::Informational, false),
                failed("lint", 2, Accumulation::Folded, false),
            ],
            exit_code: 2,
        };
        assert_eq!(report.deciding_step().map(|s| s.name.as_str()), Some("lint"));
        assert_eq!(report.count(StepStatus::Failed), 2);
        assert_eq!(report.count(StepStatus::Warned), 1);
    }

    #[test]
    fn json_uses_snake_case() {
        let report = RunReport {
            started_at: Utc::now(),
            duration_ms: 5,
            strict: false,
            steps: vec![failed("build", 2, Accumulation::Folded, false)],
            exit_code: 2,
        };
        let json = report.to_json().unwrap();
        assert!(json.contains("\"exit_code\": 2"));
        assert!(json.contains("\"status\": \"failed\""));
        assert!(json.contains("\"kind\": \"tool_failure\""));
    }
}
