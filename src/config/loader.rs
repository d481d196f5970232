//! Configuration file discovery and loading.
//!
//! Layers, later overriding earlier:
//! 1. Built-in defaults
//! 2. Project config (`.cxxvet.yml`)
//! 3. Local overrides (`.cxxvet.local.yml`, meant to stay out of VCS)
//!
//! An explicit `--config` path replaces both file layers.

use crate::config::merger::merge_configs;
use crate::config::schema::VetConfig;
use crate::config::validator::validate;
use crate::error::{CxxvetError, Result};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Project config file name.
pub const PROJECT_CONFIG: &str = ".cxxvet.yml";

/// Local override file name.
pub const LOCAL_CONFIG: &str = ".cxxvet.local.yml";

/// Config files found for a project, in merge order.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project config: .cxxvet.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .cxxvet.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files in the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(PROJECT_CONFIG)),
            project_local: existing(project_root.join(LOCAL_CONFIG)),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a config file as a raw YAML value (for merging).
///
/// An empty file is an empty mapping.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CxxvetError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CxxvetError::Io(e)
        }
    })?;

    if content.trim().is_empty() {
        return Ok(Value::Mapping(Default::default()));
    }

    let value: Value = serde_yaml::from_str(&content).map_err(|e| CxxvetError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(match value {
        Value::Null => Value::Mapping(Default::default()),
        other => other,
    })
}

/// Parse YAML content into a [`VetConfig`].
pub fn parse_config(content: &str, source_path: &Path) -> Result<VetConfig> {
    if content.trim().is_empty() {
        return Ok(VetConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| CxxvetError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load, merge and validate the configuration for a project.
///
/// # Errors
///
/// Returns `ConfigNotFound` if `explicit` names a missing file.
/// Returns `ConfigParseError` if any layer is invalid YAML or has unknown keys.
/// Returns `ConfigValidationError` if the merged values are unusable.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<VetConfig> {
    let paths: Vec<PathBuf> = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => ConfigPaths::discover(project_root)
            .all_existing()
            .into_iter()
            .cloned()
            .collect(),
    };

    if paths.is_empty() {
        tracing::debug!("No config files in {}, using defaults", project_root.display());
        return Ok(VetConfig::default());
    }

    let mut layers = Vec::with_capacity(paths.len());
    for path in &paths {
        tracing::debug!("Loading config layer {}", path.display());
        layers.push(load_config_value(path)?);
    }

    // Parse errors on the merged value are attributed to the last layer.
    let report_path = paths.last().cloned().unwrap_or_default();
    let config: VetConfig =
        serde_yaml::from_value(merge_configs(&layers)).map_err(|e| {
            CxxvetError::ConfigParseError {
                path: report_path,
                message: e.to_string(),
            }
        })?;

    validate(&config)?;
    Ok(config)
}
