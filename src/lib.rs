//! cxxvet - vet a directory of C++ sources with the tools already installed.
//!
//! cxxvet runs a fixed sequence of steps (compiler discovery, build, run,
//! lint, format check, leak check, sanitizer build and run, static analysis,
//! cleanup) and folds their outcomes into one exit code. Steps whose tool is
//! missing are skipped; a failing step never stops the ones after it.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.cxxvet.yml` loading, merging, and validation
//! - [`error`] - Error types and result aliases
//! - [`runner`] - The step loop, exit-code folding, and run reports
//! - [`shell`] - External command execution
//! - [`sources`] - Source file discovery
//! - [`steps`] - The step contract, outcome oracles, and the step catalog
//! - [`tools`] - PATH probing and tool flavour detection
//! - [`ui`] - Banners, spinners, and summaries
//!
//! # Example
//!
//! ```
//! use cxxvet::config::VetConfig;
//! use cxxvet::runner::StepRunner;
//! use cxxvet::steps::{catalog, RunContext};
//! use cxxvet::tools::PathProbe;
//! use tempfile::TempDir;
//!
//! let dir = TempDir::new().unwrap();
//! let config = VetConfig::default();
//! let steps = catalog::default_steps(&config);
//!
//! // An empty PATH: every tool-backed step is skipped.
//! let mut ctx = RunContext::with_probe(dir.path(), config, Vec::new(), Box::new(PathProbe::new(vec![])));
//! let report = StepRunner::new().run(&steps, &mut ctx);
//! assert_eq!(report.exit_code, 0);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;
pub mod sources;
pub mod steps;
pub mod tools;
pub mod ui;

pub use error::{CxxvetError, Result};
