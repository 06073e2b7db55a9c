//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Cannot read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rules: {0}")]
    InvalidRules(#[from] crate::domain::foundation::ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("max_turns must be between 1 and 20, got {0}")]
    InvalidMaxTurns(usize),

    #[error("critical_blocker_threshold must be at least 1")]
    InvalidBlockerThreshold,

    #[error("always_probe_categories contains an empty entry")]
    EmptyProbeCategory,

    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),
}
