//! Configuration validation rules.
//!
//! Catches values that would make a step meaningless or destructive:
//! - compiler and leak checker candidate lists must not be empty
//! - executable outputs must be distinct, relative names
//! - markers must not be empty (an empty marker matches everything)

use crate::config::schema::VetConfig;
use crate::error::{CxxvetError, Result};
use std::path::Path;

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &VetConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.sources.extensions.is_empty() {
        errors.push(ValidationError::new(
            "no-extensions",
            "sources.extensions must list at least one extension",
        ));
    }

    if config.build.compilers.iter().all(|c| c.trim().is_empty()) {
        errors.push(ValidationError::new(
            "no-compilers",
            "build.compilers must list at least one compiler",
        ));
    }

    errors.extend(validate_output("build.output", &config.build.output));
    errors.extend(validate_output("sanitizer.output", &config.sanitizer.output));

    if config.build.output == config.sanitizer.output {
        errors.push(ValidationError::new(
            "shared-output",
            format!(
                "build.output and sanitizer.output are both '{}'",
                config.build.output
            ),
        ));
    }

    if config.lint.tool.trim().is_empty() {
        errors.push(ValidationError::new("empty-tool", "lint.tool is empty"));
    }

    if config.format.tool.trim().is_empty() {
        errors.push(ValidationError::new("empty-tool", "format.tool is empty"));
    }

    if config.leak_check.tools.iter().all(|t| t.trim().is_empty()) {
        errors.push(ValidationError::new(
            "no-leak-checkers",
            "leak_check.tools must list at least one tool",
        ));
    }

    if matches!(config.leak_check.marker.as_deref(), Some(m) if m.is_empty()) {
        errors.push(ValidationError::new(
            "empty-marker",
            "leak_check.marker must not be empty",
        ));
    }

    if config.static_analysis.warning_marker.is_empty() {
        errors.push(ValidationError::new(
            "empty-marker",
            "static_analysis.warning_marker must not be empty",
        ));
    }

    errors
}

fn validate_output(field: &str, output: &str) -> Option<ValidationError> {
    if output.trim().is_empty() {
        return Some(ValidationError::new(
            "empty-output",
            format!("{} must not be empty", field),
        ));
    }
    let escapes = output
        .split(|c: char| c == '/' || c == '\\')
        .any(|part| part == "..");
    if Path::new(output).is_absolute() || escapes {
        return Some(ValidationError::new(
            "output-outside-project",
            format!("{} must stay inside the project: '{}'", field, output),
        ));
    }
    None
}

/// Validate and fail on the first batch of errors.
pub fn validate(config: &VetConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(CxxvetError::ConfigValidationError { message })
}
