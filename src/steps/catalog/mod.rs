//! The fixed step sequence.
//!
//! Order matters: discovery feeds the builds, the builds feed the runs and
//! the leak check, and cleanup reclaims whatever the others registered.

mod analyze;
mod build;
mod cleanup;
mod discover;
mod execute;
mod format;
mod leak;
mod lint;
mod sanitizer;

pub use analyze::StaticAnalysis;
pub use build::Build;
pub use cleanup::Cleanup;
pub use discover::CompilerDiscovery;
pub use execute::RunExecutable;
pub use format::{changed_region, ChangedRegion, FormatCheck};
pub use leak::LeakCheck;
pub use lint::Lint;
pub use sanitizer::{SanitizerBuild, SanitizerRun};

use crate::config::VetConfig;

use super::step::Step;

/// Step names in execution order.
pub const STEP_NAMES: &[&str] = &[
    "discover-compiler",
    "build",
    "run",
    "lint",
    "format-check",
    "leak-check",
    "sanitizer-build",
    "sanitizer-run",
    "static-analysis",
    "cleanup",
];

/// Build the standard sequence for a configuration.
pub fn default_steps(config: &VetConfig) -> Vec<Box<dyn Step>> {
    vec![
        Box::new(CompilerDiscovery),
        Box::new(Build),
        Box::new(RunExecutable),
        Box::new(Lint),
        Box::new(FormatCheck),
        Box::new(LeakCheck::new()),
        Box::new(SanitizerBuild),
        Box::new(SanitizerRun),
        Box::new(StaticAnalysis::new(&config.static_analysis.warning_marker)),
        Box::new(Cleanup),
    ]
}
