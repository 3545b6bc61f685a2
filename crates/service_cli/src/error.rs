//! CLI error types

use crate::config::ConfigError;
use numeric_core::types::{LinalgError, SolverError};
use thiserror::Error;

/// Errors surfaced to the `numtool` user
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Linear algebra error: {0}")]
    Linalg(#[from] LinalgError),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
