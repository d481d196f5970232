//! Sequential step execution and exit-code folding.

use std::time::Instant;

use chrono::Utc;

use crate::steps::{Accumulation, Outcome, RunContext, Step};

use super::report::{millis, RunReport, StepRecord};

/// Exit status reported when a detected tool could not be started.
pub const SPAWN_FAILURE_CODE: i32 = 127;

/// Progress events emitted while the sequence runs.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A step is about to start.
    StepStarting {
        name: &'a str,
        description: &'a str,
        index: usize,
        total: usize,
    },
    /// A step did not run.
    StepSkipped { record: &'a StepRecord },
    /// A step ran and was judged.
    StepFinished { record: &'a StepRecord },
}

/// The running exit code.
///
/// Starts at 0. A counting failure overwrites it with that failure's code;
/// successes and skips leave it untouched, so the last nonzero code wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accumulator(i32);

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one step's outcome in.
    pub fn absorb(self, outcome: Outcome, accumulation: Accumulation, strict: bool) -> Self {
        match outcome.code() {
            0 => self,
            code if accumulation.counts(strict) => Self(code),
            _ => self,
        }
    }

    pub fn code(&self) -> i32 {
        self.0
    }
}

/// Runs every step in order, never stopping early.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepRunner {
    strict: bool,
}

impl StepRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold informational failures into the exit code too.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn run(&self, steps: &[Box<dyn Step>], ctx: &mut RunContext) -> RunReport {
        self.run_with_progress(steps, ctx, |_| {})
    }

    /// Run the sequence, reporting each step through `on_progress`.
    pub fn run_with_progress(
        &self,
        steps: &[Box<dyn Step>],
        ctx: &mut RunContext,
        mut on_progress: impl FnMut(RunProgress<'_>),
    ) -> RunReport {
        let started_at = Utc::now();
        let start = Instant::now();
        let total = steps.len();
        let mut accumulator = Accumulator::new();
        let mut records = Vec::with_capacity(total);

        for (index, step) in steps.iter().enumerate() {
            on_progress(RunProgress::StepStarting {
                name: step.name(),
                description: step.description(),
                index,
                total,
            });

            let record = self.run_step(step.as_ref(), ctx);
            accumulator = accumulator.absorb(record.outcome, record.accumulation, self.strict);
            tracing::debug!(
                "Step {} -> {} (accumulator {})",
                record.name,
                record.outcome,
                accumulator.code()
            );

            if record.outcome == Outcome::ToolUnavailable {
                on_progress(RunProgress::StepSkipped { record: &record });
            } else {
                on_progress(RunProgress::StepFinished { record: &record });
            }
            records.push(record);
        }

        RunReport {
            started_at,
            duration_ms: millis(start.elapsed()),
            strict: self.strict,
            steps: records,
            exit_code: accumulator.code(),
        }
    }

    fn run_step(&self, step: &dyn Step, ctx: &mut RunContext) -> StepRecord {
        let accumulation = step.accumulation();
        let availability = step.availability(ctx);
        if !availability.is_available() {
            tracing::info!(
                "Skipping {}: {}",
                step.name(),
                availability.reason().unwrap_or("unavailable")
            );
            return StepRecord::skipped(
                step.name(),
                step.description(),
                accumulation,
                &availability,
            );
        }

        match step.run(ctx) {
            Ok(action) => {
                let outcome = step.interpret(ctx, &action);
                StepRecord::finished(
                    step.name(),
                    step.description(),
                    accumulation,
                    action,
                    outcome,
                    self.strict,
                )
            }
            Err(e) => {
                tracing::warn!("Step {} could not run: {}", step.name(), e);
                StepRecord::errored(
                    step.name(),
                    step.description(),
                    accumulation,
                    Outcome::ToolFailure(SPAWN_FAILURE_CODE),
                    e.to_string(),
                    self.strict,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VetConfig;
    use crate::error::{CxxvetError, Result};
    use crate::runner::StepStatus;
    use crate::steps::{ActionOutput, Availability, MarkerOracle, Oracle, LEAK_SENTINEL};
    use crate::tools::PathProbe;
    use std::cell::Cell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    /// A step with scripted availability and result.
    struct FakeStep {
        name: &'static str,
        availability: Availability,
        exit_code: i32,
        output: Option<&'static str>,
        accumulation: Accumulation,
        oracle: Option<MarkerOracle>,
        fail_to_spawn: bool,
        runs: Rc<Cell<usize>>,
    }

    impl FakeStep {
        fn exits(name: &'static str, exit_code: i32) -> Self {
            Self {
                name,
                availability: Availability::Available,
                exit_code,
                output: None,
                accumulation: Accumulation::Folded,
                oracle: None,
                fail_to_spawn: false,
                runs: Rc::new(Cell::new(0)),
            }
        }

        fn unavailable(name: &'static str) -> Self {
            Self {
                availability: Availability::Unavailable(format!("{} not found", name)),
                ..Self::exits(name, 0)
            }
        }

        fn informational(mut self) -> Self {
            self.accumulation = Accumulation::Informational;
            self
        }

        fn never(mut self) -> Self {
            self.accumulation = Accumulation::Never;
            self
        }

        fn printing(mut self, output: &'static str, oracle: MarkerOracle) -> Self {
            self.output = Some(output);
            self.oracle = Some(oracle);
            self
        }
    }

    impl Step for FakeStep {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.name
        }

        fn availability(&self, _ctx: &RunContext) -> Availability {
            self.availability.clone()
        }

        fn run(&self, _ctx: &mut RunContext) -> Result<ActionOutput> {
            self.runs.set(self.runs.get() + 1);
            if self.fail_to_spawn {
                return Err(CxxvetError::SpawnFailed {
                    command: self.name.to_string(),
                    message: "permission denied".to_string(),
                });
            }
            Ok(ActionOutput::new(
                self.exit_code,
                self.output.map(str::to_string),
            ))
        }

        fn interpret(&self, _ctx: &RunContext, output: &ActionOutput) -> Outcome {
            match &self.oracle {
                Some(oracle) => oracle.judge(output),
                None => crate::steps::ExitStatusOracle.judge(output),
            }
        }

        fn accumulation(&self) -> Accumulation {
            self.accumulation
        }
    }

    fn context() -> RunContext {
        RunContext::with_probe(
            Path::new("/project"),
            VetConfig::default(),
            vec![PathBuf::from("main.cpp")],
            Box::new(PathProbe::new(Vec::new())),
        )
    }

    fn run(steps: Vec<FakeStep>) -> RunReport {
        run_strict(steps, false)
    }

    fn run_strict(steps: Vec<FakeStep>, strict: bool) -> RunReport {
        let steps: Vec<Box<dyn Step>> = steps
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn Step>)
            .collect();
        StepRunner::new().strict(strict).run(&steps, &mut context())
    }

    #[test]
    fn all_success_is_zero() {
        let report = run(vec![FakeStep::exits("build", 0), FakeStep::exits("run", 0)]);
        assert_eq!(report.exit_code, 0);
        assert!(report.success());
    }

    #[test]
    fn all_unavailable_is_zero() {
        let report = run(vec![
            FakeStep::unavailable("lint"),
            FakeStep::unavailable("format-check"),
            FakeStep::unavailable("leak-check"),
        ]);
        assert_eq!(report.exit_code, 0);
        assert_eq!(report.count(StepStatus::Skipped), 3);
    }

    #[test]
    fn later_failure_overwrites_earlier_one() {
        let report = run(vec![FakeStep::exits("build", 2), FakeStep::exits("lint", 3)]);
        assert_eq!(report.exit_code, 3);
    }

    #[test]
    fn later_success_does_not_clear_failure() {
        let report = run(vec![FakeStep::exits("build", 2), FakeStep::exits("lint", 0)]);
        assert_eq!(report.exit_code, 2);
    }

    #[test]
    fn skip_after_failure_keeps_code() {
        let report = run(vec![
            FakeStep::exits("build", 2),
            FakeStep::unavailable("run"),
        ]);
        assert_eq!(report.exit_code, 2);
    }

    #[test]
    fn every_step_runs_after_failure() {
        let later = FakeStep::exits("cleanup", 0);
        let runs = Rc::clone(&later.runs);
        let report = run(vec![FakeStep::exits("build", 2), later]);
        assert_eq!(runs.get(), 1);
        assert_eq!(report.steps.len(), 2);
    }

    #[test]
    fn unavailable_step_is_not_run() {
        let step = FakeStep::unavailable("lint");
        let runs = Rc::clone(&step.runs);
        run(vec![step]);
        assert_eq!(runs.get(), 0);
    }

    #[test]
    fn missing_leak_marker_is_sentinel() {
        let report = run(vec![
            FakeStep::exits("build", 0),
            FakeStep::exits("leak-check", 0).printing(
                "definitely lost: 40 bytes in 1 blocks",
                MarkerOracle::must_contain("no leaks are possible", LEAK_SENTINEL),
            ),
        ]);
        assert_eq!(report.exit_code, 111);
    }

    #[test]
    fn analysis_warning_overrides_prior_zero() {
        let report = run(vec![
            FakeStep::exits("build", 0),
            FakeStep::exits("static-analysis", 0).printing(
                "main.cpp:2:5: warning: Dead store",
                MarkerOracle::must_not_contain("warning", 1),
            ),
        ]);
        assert_eq!(report.exit_code, 1);
    }

    #[test]
    fn informational_failure_does_not_fold() {
        let report = run(vec![
            FakeStep::exits("build", 0),
            FakeStep::exits("format-check", 1).informational(),
            FakeStep::exits("sanitizer-run", 23).informational(),
        ]);
        assert_eq!(report.exit_code, 0);
        assert_eq!(report.count(StepStatus::Warned), 2);
    }

    #[test]
    fn strict_folds_informational_failures() {
        let report = run_strict(
            vec![
                FakeStep::exits("build", 0),
                FakeStep::exits("format-check", 1).informational(),
            ],
            true,
        );
        assert_eq!(report.exit_code, 1);
        assert!(report.strict);
    }

    #[test]
    fn strict_never_folds_cleanup() {
        let report = run_strict(vec![FakeStep::exits("cleanup", 9).never()], true);
        assert_eq!(report.exit_code, 0);
    }

    #[test]
    fn spawn_error_is_tool_failure_127() {
        let mut step = FakeStep::exits("lint", 0);
        step.fail_to_spawn = true;
        let report = run(vec![step, FakeStep::exits("cleanup", 0).never()]);
        assert_eq!(report.exit_code, SPAWN_FAILURE_CODE);
        assert_eq!(report.steps[0].status, StepStatus::Failed);
        assert!(report.steps[0].note.as_deref().unwrap().contains("permission denied"));
    }

    #[test]
    fn progress_events_follow_order() {
        let steps: Vec<Box<dyn Step>> = vec![
            Box::new(FakeStep::exits("build", 0)),
            Box::new(FakeStep::unavailable("lint")),
        ];
        let mut events = Vec::new();
        StepRunner::new().run_with_progress(&steps, &mut context(), |event| {
            events.push(match event {
                RunProgress::StepStarting { name, index, total, .. } => {
                    format!("start {} {}/{}", name, index + 1, total)
                }
                RunProgress::StepSkipped { record } => format!("skip {}", record.name),
                RunProgress::StepFinished { record } => format!("done {}", record.name),
            });
        });
        assert_eq!(
            events,
            vec!["start build 1/2", "done build", "start lint 2/2", "skip lint"]
        );
    }

    #[test]
    fn accumulator_fold_rules() {
        let acc = Accumulator::new()
            .absorb(Outcome::ToolFailure(2), Accumulation::Folded, false)
            .absorb(Outcome::Success, Accumulation::Folded, false)
            .absorb(Outcome::ToolUnavailable, Accumulation::Folded, false)
            .absorb(Outcome::ToolFailure(5), Accumulation::Informational, false);
        assert_eq!(acc.code(), 2);

        let acc = acc.absorb(Outcome::PatternMatchFailure(111), Accumulation::Folded, false);
        assert_eq!(acc.code(), 111);
    }
}
