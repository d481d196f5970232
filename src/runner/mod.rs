//! Step sequence orchestration.
//!
//! - [`StepRunner`] - runs every step in order and folds outcomes
//! - [`Accumulator`] - last-nonzero-wins exit code
//! - [`RunReport`] - what happened, for display and `--json`

pub mod report;
pub mod sequence;

pub use report::{RunReport, StepRecord, StepStatus};
pub use sequence::{Accumulator, RunProgress, StepRunner, SPAWN_FAILURE_CODE};
