//! numtool - Command Line Numerics
//!
//! This is the command-line entry point for the numeric_core library.
//!
//! # Commands
//!
//! - `numtool root --coeffs 1,0,-2 --lower 1 --upper 2` - Roots of a polynomial
//! - `numtool eigen --matrix m.csv --count 2` - Dominant eigenpairs of a CSV matrix
//! - `numtool check` - Print the effective configuration
//!
//! # Configuration
//!
//! Settings come from `--config` (or `numtool.toml` in the working
//! directory), then `NUMTOOL_LOG_LEVEL` / `NUMTOOL_SOLVER`, then flags.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

/// Root finding and power iteration from the command line
#[derive(Parser)]
#[command(name = "numtool")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path [default: numtool.toml, if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find real roots of a polynomial in an interval
    Root {
        /// Coefficients, highest degree first (e.g. "1,0,-2" for x^2 - 2)
        #[arg(long, allow_hyphen_values = true)]
        coeffs: String,

        /// Lower end of the search interval
        #[arg(long, allow_negative_numbers = true)]
        lower: f64,

        /// Upper end of the search interval
        #[arg(long, allow_negative_numbers = true)]
        upper: f64,

        /// Solver (bisection, newton, secant, hybrid)
        #[arg(short, long)]
        solver: Option<String>,

        /// Absolute tolerance on x
        #[arg(long)]
        tol: Option<f64>,

        /// Maximum number of roots to report
        #[arg(long, default_value = "1")]
        count: usize,

        /// Output format (json, csv, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Extract dominant eigenpairs of a square matrix stored as CSV
    Eigen {
        /// Path to the matrix file (comma separated, no header)
        #[arg(short, long)]
        matrix: PathBuf,

        /// Number of eigenpairs to extract
        #[arg(long, default_value = "1")]
        count: usize,

        /// Output format (json, csv, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Print the effective configuration
    Check,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (solver, tolerance) = match &cli.command {
        Commands::Root { solver, tol, .. } => (solver.clone(), *tol),
        _ => (None, None),
    };
    let args = config::CliArgs {
        config_file: cli.config.clone(),
        verbose: cli.verbose,
        solver,
        tolerance,
    };
    let config = config::build_config(&args)?;

    init_tracing(config.log_level.as_filter_str());

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "Effective configuration");

    match cli.command {
        Commands::Root {
            coeffs,
            lower,
            upper,
            count,
            format,
            ..
        } => commands::root::run(&config, &coeffs, lower, upper, count, &format),
        Commands::Eigen {
            matrix,
            count,
            format,
        } => commands::eigen::run(&config, &matrix, count, &format),
        Commands::Check => commands::check::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_root_with_negative_values() {
        let cli = Cli::parse_from([
            "numtool", "root", "--coeffs", "-1,0,4", "--lower", "-3", "--upper", "0",
            "--solver", "newton", "--count", "2",
        ]);
        match cli.command {
            Commands::Root {
                coeffs,
                lower,
                upper,
                solver,
                count,
                format,
                ..
            } => {
                assert_eq!(coeffs, "-1,0,4");
                assert_eq!(lower, -3.0);
                assert_eq!(upper, 0.0);
                assert_eq!(solver.as_deref(), Some("newton"));
                assert_eq!(count, 2);
                assert_eq!(format, "table");
            }
            _ => panic!("Expected root command"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["numtool", "check", "--verbose", "--config", "alt.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_parse_eigen() {
        let cli = Cli::parse_from(["numtool", "eigen", "-m", "m.csv", "--count", "3", "-f", "json"]);
        match cli.command {
            Commands::Eigen {
                matrix,
                count,
                format,
            } => {
                assert_eq!(matrix, PathBuf::from("m.csv"));
                assert_eq!(count, 3);
                assert_eq!(format, "json");
            }
            _ => panic!("Expected eigen command"),
        }
    }
}
