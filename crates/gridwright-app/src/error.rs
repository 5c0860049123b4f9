//! Application errors.

use gridwright_core::{ConfigError, ObjectKind, PlacementError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Placement error: {0}")]
    Placement(#[from] PlacementError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scenario parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown key code: {0}")]
    UnknownKey(String),
    #[error("No template configured for {0:?}")]
    UnknownTemplate(ObjectKind),
    #[error("{0}")]
    Usage(String),
}
