//! Configuration loading, parsing, and validation for cxxvet.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layer merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use cxxvet::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".cxxvet.yml"), "build:\n  std: c++20\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.build.std, "c++20");
//! ```

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    load_config, load_config_value, parse_config, ConfigPaths, LOCAL_CONFIG, PROJECT_CONFIG,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{
    BuildConfig, FormatConfig, LeakCheckConfig, LintConfig, SanitizerConfig, SourcesConfig,
    StaticAnalysisConfig, VetConfig,
};
pub use validator::{validate, validate_config, ValidationError};
