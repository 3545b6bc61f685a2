//! `numtool root`: real roots of a polynomial

use super::{finish_csv, OutputFormat};
use crate::config::AppConfig;
use crate::{CliError, Result};
use numeric_core::math::function::Polynomial;
use numeric_core::math::solvers::{find_roots, scan_brackets, Solution, SolverKind};
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Outcome of a root search
#[derive(Debug, Clone, Serialize)]
pub struct RootReport {
    pub polynomial: String,
    pub solver: SolverKind,
    pub lower: f64,
    pub upper: f64,
    pub tolerance: f64,
    pub roots: Vec<Solution>,
}

/// Parse comma-separated coefficients, highest degree first
pub fn parse_coefficients(text: &str) -> Result<Vec<f64>> {
    let coefficients = text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| CliError::InvalidArgument(format!("Invalid coefficient '{}'", s)))
        })
        .collect::<Result<Vec<f64>>>()?;

    if coefficients.is_empty() {
        return Err(CliError::InvalidArgument(
            "No polynomial coefficients given".to_string(),
        ));
    }
    Ok(coefficients)
}

/// Search `[lower, upper]` for up to `count` roots of `polynomial`
///
/// A single root is a plain solve. Several roots come from deflation for
/// the open methods and from a sign-change scan for the bracketing ones.
pub fn find(
    config: &AppConfig,
    polynomial: &Polynomial,
    lower: f64,
    upper: f64,
    count: usize,
) -> Result<RootReport> {
    if count == 0 {
        return Err(CliError::InvalidArgument(
            "--count must be at least 1".to_string(),
        ));
    }

    let kind = config.solver.kind;
    let tolerance = config.solver.tolerance;
    let solver = kind.build(config.solver_config());

    let roots = if count == 1 {
        vec![solver.solve(polynomial, lower, upper, tolerance)?]
    } else if kind.requires_sign_change() {
        let window = (upper - lower) / config.solver.scan_windows as f64;
        let brackets = scan_brackets(polynomial, lower, upper, window)?;
        debug!(brackets = brackets.len(), window, "Sign changes found");
        brackets
            .into_iter()
            .take(count)
            .map(|(a, b)| solver.solve(polynomial, a, b, tolerance))
            .collect::<std::result::Result<Vec<_>, _>>()?
    } else {
        find_roots(&*solver, polynomial, lower, upper, tolerance, count)?
    };

    for root in roots.iter().filter(|r| !r.is_success()) {
        warn!("Solver stopped early: {}", root);
    }

    Ok(RootReport {
        polynomial: polynomial.to_string(),
        solver: kind,
        lower,
        upper,
        tolerance,
        roots,
    })
}

/// Render a report in the requested format
pub fn render(report: &RootReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["index", "x", "f(x)", "iterations", "status"])?;
            for (i, root) in report.roots.iter().enumerate() {
                writer.write_record([
                    (i + 1).to_string(),
                    root.x_estimate().to_string(),
                    root.y_estimate().to_string(),
                    root.iterations().to_string(),
                    root.status().to_string(),
                ])?;
            }
            finish_csv(writer)
        }
        OutputFormat::Table => {
            let mut out = String::new();
            out.push_str(&format!("Polynomial: {}\n", report.polynomial));
            out.push_str(&format!(
                "Interval:   [{}, {}]  solver = {}  tol = {:e}\n",
                report.lower, report.upper, report.solver, report.tolerance
            ));
            out.push_str(&format!(
                "{:>3}  {:>22}  {:>12}  {:>10}  status\n",
                "#", "x", "f(x)", "iterations"
            ));
            if report.roots.is_empty() {
                out.push_str("  (no roots found)\n");
            }
            for (i, root) in report.roots.iter().enumerate() {
                out.push_str(&format!(
                    "{:>3}  {:>22.15}  {:>12.3e}  {:>10}  {}\n",
                    i + 1,
                    root.x_estimate(),
                    root.y_estimate(),
                    root.iterations(),
                    root.status()
                ));
            }
            Ok(out)
        }
    }
}

/// Execute the root command
pub fn run(
    config: &AppConfig,
    coeffs: &str,
    lower: f64,
    upper: f64,
    count: usize,
    format: &str,
) -> Result<()> {
    let format = OutputFormat::from_str(format)?;
    let polynomial = Polynomial::new(parse_coefficients(coeffs)?);

    info!("Finding roots...");
    info!("  Polynomial: {}", polynomial);
    info!("  Interval: [{}, {}]", lower, upper);
    info!("  Solver: {}", config.solver.kind);

    let report = find(config, &polynomial, lower, upper, count)?;
    info!("Found {} root(s)", report.roots.iter().filter(|r| r.is_success()).count());

    print!("{}", render(&report, format)?);
    Ok(())
}
