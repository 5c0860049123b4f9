//! Error types for configuration and activation.

use thiserror::Error;

/// Errors surfaced when placement mode is enabled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("No camera available for placement mode")]
    MissingCamera,
    #[error("No ground plane available for placement mode")]
    MissingGroundPlane,
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for placement activation.
pub type PlacementResult<T> = Result<T, PlacementError>;
