//! Error types for cxxvet operations.
//!
//! This module defines [`CxxvetError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `CxxvetError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `CxxvetError::Other`) for unexpected errors
//! - A failing external tool is an outcome, not an error: it is recorded by
//!   the runner and never surfaces through this type

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cxxvet operations.
#[derive(Debug, Error)]
pub enum CxxvetError {
    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// An external program could not be started.
    #[error("Failed to start '{command}': {message}")]
    SpawnFailed { command: String, message: String },

    /// The project directory could not be scanned for sources.
    #[error("Cannot scan sources in {path}: {message}")]
    SourceScanFailed { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for cxxvet operations.
pub type Result<T> = std::result::Result<T, CxxvetError>;
