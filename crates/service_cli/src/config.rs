//! numtool configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! CLI arguments.

use numeric_core::math::eigen::{ConvergenceCriterion, PowerIterationConfig};
use numeric_core::math::solvers::{SolverConfig, SolverKind, UnknownSolverKind, MAX_SCAN_WINDOWS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "numtool.toml";

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "NUMTOOL_LOG_LEVEL";

/// Environment variable overriding the solver
pub const ENV_SOLVER: &str = "NUMTOOL_SOLVER";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error(transparent)]
    InvalidSolver(#[from] UnknownSolverKind),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels, least verbose last
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Root-finding settings (`[solver]` table)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Algorithm used by `numtool root`
    #[serde(deserialize_with = "deserialize_solver_kind")]
    pub kind: SolverKind,
    /// Absolute tolerance on x
    pub tolerance: f64,
    /// Iteration cap for the open methods and the hybrid
    pub max_iterations: usize,
    /// Forward-difference step of the secant method
    pub secant_step: f64,
    /// Number of sub-windows scanned for sign changes when a bracketing
    /// solver is asked for several roots
    pub scan_windows: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        let solver = SolverConfig::default();
        Self {
            kind: SolverKind::default(),
            tolerance: 1e-10,
            max_iterations: solver.max_iterations,
            secant_step: solver.secant_step,
            scan_windows: 100,
        }
    }
}

/// Power-iteration settings (`[eigen]` table)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EigenSettings {
    pub max_iterations: usize,
    pub tolerance: f64,
    pub criterion: ConvergenceCriterion,
}

impl Default for EigenSettings {
    fn default() -> Self {
        let config = PowerIterationConfig::default();
        Self {
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            criterion: config.criterion,
        }
    }
}

/// Effective numtool configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Root-finding settings
    pub solver: SolverSettings,
    /// Eigenvalue settings
    pub eigen: EigenSettings,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_solver_kind<'de, D>(deserializer: D) -> Result<SolverKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    SolverKind::from_str(&s).map_err(serde::de::Error::custom)
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be positive and finite, got {}", value),
        })
    }
}

fn check_nonzero(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Override fields from environment variables resolved through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(solver) = lookup(ENV_SOLVER) {
            self.solver.kind = SolverKind::from_str(&solver)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("solver.tolerance", self.solver.tolerance)?;
        check_positive("solver.secant_step", self.solver.secant_step)?;
        check_nonzero("solver.max_iterations", self.solver.max_iterations)?;
        check_nonzero("solver.scan_windows", self.solver.scan_windows)?;
        if self.solver.scan_windows > MAX_SCAN_WINDOWS {
            return Err(ConfigError::InvalidValue {
                field: "solver.scan_windows",
                reason: format!(
                    "must be at most {}, got {}",
                    MAX_SCAN_WINDOWS, self.solver.scan_windows
                ),
            });
        }
        check_positive("eigen.tolerance", self.eigen.tolerance)?;
        check_nonzero("eigen.max_iterations", self.eigen.max_iterations)?;
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if cli.verbose && self.log_level > LogLevel::Debug {
            self.log_level = LogLevel::Debug;
        }
        if let Some(solver) = &cli.solver {
            self.solver.kind = SolverKind::from_str(solver)?;
        }
        if let Some(tolerance) = cli.tolerance {
            self.solver.tolerance = tolerance;
        }
        Ok(())
    }

    /// Solver configuration for [`SolverKind::build`]
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            max_iterations: self.solver.max_iterations,
            secant_step: self.solver.secant_step,
        }
    }

    /// Power-iteration configuration
    pub fn power_iteration_config(&self) -> PowerIterationConfig {
        PowerIterationConfig {
            max_iterations: self.eigen.max_iterations,
            tolerance: self.eigen.tolerance,
            criterion: self.eigen.criterion,
        }
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// `--verbose` raises the log level to at least debug
    pub verbose: bool,
    /// Solver override
    pub solver: Option<String>,
    /// Tolerance override
    pub tolerance: Option<f64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file (`--config`, else `numtool.toml` when present)
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<AppConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let default_file = Path::new(DEFAULT_CONFIG_FILE);
    let mut config = match &cli.config_file {
        Some(path) => AppConfig::from_file(path)?,
        None if default_file.is_file() => AppConfig::from_file(default_file)?,
        None => AppConfig::default(),
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;

    // Final validation
    config.validate()?;

    Ok(config)
}
