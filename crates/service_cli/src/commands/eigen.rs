//! `numtool eigen`: dominant eigenpairs of a CSV matrix

use super::{finish_csv, OutputFormat};
use crate::config::AppConfig;
use crate::{CliError, Result};
use numeric_core::math::eigen::PowerIteration;
use numeric_core::math::linalg::{ColumnVector, Matrix};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// One extracted eigenpair
#[derive(Debug, Clone, Serialize)]
pub struct EigenPair {
    pub eigenvalue: f64,
    pub eigenvector: Vec<f64>,
    pub converged: bool,
    pub iterations: usize,
}

/// Outcome of an eigen extraction
#[derive(Debug, Clone, Serialize)]
pub struct EigenReport {
    pub rows: usize,
    pub cols: usize,
    pub pairs: Vec<EigenPair>,
}

/// Read a headerless CSV of numbers into a matrix
///
/// Whitespace around fields is ignored and lines starting with `#` are
/// skipped. Rows of unequal length are rejected by [`Matrix::from_rows`].
pub fn read_matrix<R: Read>(reader: R) -> Result<Matrix> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = record
            .iter()
            .enumerate()
            .map(|(j, field)| {
                field.parse::<f64>().map_err(|_| {
                    CliError::InvalidArgument(format!(
                        "Row {}, column {}: '{}' is not a number",
                        i + 1,
                        j + 1,
                        field
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(CliError::InvalidArgument("Matrix file is empty".to_string()));
    }
    Ok(Matrix::from_rows(rows)?)
}

/// Deterministic start vector with distinct positive entries in `[1, 2)`
pub fn start_vector(n: usize) -> ColumnVector {
    const GOLDEN_FRACTION: f64 = 0.618_033_988_749_895;
    (0..n)
        .map(|i| 1.0 + ((i + 1) as f64 * GOLDEN_FRACTION).fract())
        .collect()
}

/// Extract up to `count` eigenpairs of `matrix`
pub fn compute(config: &AppConfig, matrix: &Matrix, count: usize) -> Result<EigenReport> {
    if count == 0 {
        return Err(CliError::InvalidArgument(
            "--count must be at least 1".to_string(),
        ));
    }

    let solver = PowerIteration::new(config.power_iteration_config());
    let results = solver.extract(matrix, count, &start_vector(matrix.rows()))?;

    let pairs = results
        .into_iter()
        .map(|r| EigenPair {
            eigenvalue: r.eigenvalue,
            eigenvector: r.eigenvector.as_slice().to_vec(),
            converged: r.converged,
            iterations: r.iterations,
        })
        .collect();

    Ok(EigenReport {
        rows: matrix.rows(),
        cols: matrix.cols(),
        pairs,
    })
}

fn format_vector(values: &[f64]) -> String {
    let entries: Vec<String> = values.iter().map(|v| format!("{:.6}", v)).collect();
    format!("[{}]", entries.join(", "))
}

/// Render a report in the requested format
pub fn render(report: &EigenReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            let mut header = vec![
                "index".to_string(),
                "eigenvalue".to_string(),
                "converged".to_string(),
                "iterations".to_string(),
            ];
            header.extend((1..=report.rows).map(|i| format!("v{}", i)));
            writer.write_record(&header)?;

            for (i, pair) in report.pairs.iter().enumerate() {
                let mut record = vec![
                    (i + 1).to_string(),
                    pair.eigenvalue.to_string(),
                    pair.converged.to_string(),
                    pair.iterations.to_string(),
                ];
                record.extend(pair.eigenvector.iter().map(|v| v.to_string()));
                writer.write_record(&record)?;
            }
            finish_csv(writer)
        }
        OutputFormat::Table => {
            let mut out = String::new();
            out.push_str(&format!("Matrix: {}x{}\n", report.rows, report.cols));
            out.push_str(&format!(
                "{:>3}  {:>20}  {:>9}  {:>10}  eigenvector\n",
                "#", "eigenvalue", "converged", "iterations"
            ));
            for (i, pair) in report.pairs.iter().enumerate() {
                out.push_str(&format!(
                    "{:>3}  {:>20.12}  {:>9}  {:>10}  {}\n",
                    i + 1,
                    pair.eigenvalue,
                    if pair.converged { "yes" } else { "no" },
                    pair.iterations,
                    format_vector(&pair.eigenvector)
                ));
            }
            Ok(out)
        }
    }
}

/// Execute the eigen command
pub fn run(config: &AppConfig, matrix_path: &Path, count: usize, format: &str) -> Result<()> {
    let format = OutputFormat::from_str(format)?;
    if !matrix_path.is_file() {
        return Err(CliError::FileNotFound(matrix_path.display().to_string()));
    }

    info!("Extracting eigenpairs...");
    info!("  Matrix file: {}", matrix_path.display());
    info!("  Count: {}", count);

    let matrix = read_matrix(File::open(matrix_path)?)?;
    info!("  Shape: {}x{}", matrix.rows(), matrix.cols());

    let report = compute(config, &matrix, count)?;
    info!("Extracted {} eigenpair(s)", report.pairs.len());

    print!("{}", render(&report, format)?);
    Ok(())
}
