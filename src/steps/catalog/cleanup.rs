use std::fs;
use std::io::ErrorKind;

use crate::error::Result;
use crate::steps::context::RunContext;
use crate::steps::oracle::Outcome;
use crate::steps::step::{Accumulation, ActionOutput, Availability, Step};

/// Removes every artifact registered during the run.
///
/// Always runs and always passes. Missing files are expected (a failed
/// build leaves none); other removal errors are logged and skipped.
pub struct Cleanup;

impl Step for Cleanup {
    fn name(&self) -> &str {
        "cleanup"
    }

    fn description(&self) -> &str {
        "Clean up artifacts"
    }

    fn availability(&self, _ctx: &RunContext) -> Availability {
        Availability::Available
    }

    fn run(&self, ctx: &mut RunContext) -> Result<ActionOutput> {
        let artifacts = ctx.take_artifacts();

        if ctx.keeps_artifacts() {
            let kept: Vec<String> = artifacts.iter().map(|p| p.display().to_string()).collect();
            return Ok(ActionOutput::report(if kept.is_empty() {
                "Nothing to keep".to_string()
            } else {
                format!("Kept {}", kept.join(", "))
            }));
        }

        let mut removed = 0;
        let mut failed = 0;
        for path in &artifacts {
            match fs::remove_file(path) {
                Ok(()) => {
                    tracing::debug!("Removed {}", path.display());
                    removed += 1;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!("Could not remove {}: {}", path.display(), e);
                    failed += 1;
                }
            }
        }

        ctx.executable = None;
        ctx.sanitized_executable = None;

        let mut report = format!("Removed {} artifact(s)", removed);
        if failed > 0 {
            report.push_str(&format!(", {} could not be removed", failed));
        }
        Ok(ActionOutput::report(report))
    }

    fn interpret(&self, _ctx: &RunContext, _output: &ActionOutput) -> Outcome {
        Outcome::Success
    }

    fn accumulation(&self) -> Accumulation {
        Accumulation::Never
    }
}
