//! `numtool check`: print the effective configuration

use crate::config::AppConfig;
use crate::Result;
use tracing::info;

/// Render the effective configuration as TOML
pub fn render(config: &AppConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

/// Execute the check command
pub fn run(config: &AppConfig) -> Result<()> {
    info!("Checking numtool configuration...");
    info!("  numtool version: {}", env!("CARGO_PKG_VERSION"));
    info!("  Log level: {}", config.log_level);
    info!("  Solver: {}", config.solver.kind);

    println!("# numtool {}", env!("CARGO_PKG_VERSION"));
    print!("{}", render(config)?);

    info!("Configuration OK");
    Ok(())
}
