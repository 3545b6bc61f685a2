//! CLI command implementations
//!
//! Each submodule implements a specific CLI command and renders its output
//! as a string so that the formatting can be tested without a terminal.

pub mod check;
pub mod eigen;
pub mod root;

use crate::{CliError, Result};
use std::str::FromStr;

/// Output format shared by `root` and `eigen`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, csv, table",
                s
            ))),
        }
    }
}

/// Finish a CSV writer into a string
fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| CliError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str(" csv ").unwrap(), OutputFormat::Csv);

        match OutputFormat::from_str("xml") {
            Err(CliError::InvalidArgument(msg)) => assert!(msg.contains("xml")),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }
}
