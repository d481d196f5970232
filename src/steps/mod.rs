//! Steps and how their results are judged.
//!
//! - [`Step`] - one unit of work with a tri-state availability probe
//! - [`RunContext`] - state threaded through the sequence
//! - [`Oracle`] - maps an action's result to an [`Outcome`]
//! - [`catalog`] - the concrete steps, in their fixed order
//!
//! # Example
//!
//! ```no_run
//! use cxxvet::config::VetConfig;
//! use cxxvet::steps::{catalog, RunContext};
//! use std::path::Path;
//!
//! let config = VetConfig::default();
//! let steps = catalog::default_steps(&config);
//! let mut ctx = RunContext::new(Path::new("."), config, Vec::new());
//!
//! for step in &steps {
//!     println!("{}: {:?}", step.name(), step.availability(&ctx));
//! }
//! # let _ = &mut ctx;
//! ```

pub mod catalog;
pub mod context;
pub mod oracle;
pub mod step;

pub use context::RunContext;
pub use oracle::{
    ExitStatusOracle, MarkerOracle, MarkerRule, Oracle, Outcome, ANALYSIS_WARNING_CODE,
    LEAK_SENTINEL,
};
pub use step::{Accumulation, ActionOutput, Availability, Step};
