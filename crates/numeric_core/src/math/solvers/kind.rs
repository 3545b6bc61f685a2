//! Runtime solver selection.

use super::{
    BisectionSolver, HybridSolver, NewtonSolver, NonLinearSolver, SecantSolver, SolverConfig,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The available root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SolverKind {
    /// [`BisectionSolver`]
    Bisection,
    /// [`NewtonSolver`]
    Newton,
    /// [`SecantSolver`]
    Secant,
    /// [`HybridSolver`]
    #[default]
    Hybrid,
}

/// Error returned when parsing an unknown solver name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown solver '{0}'. Valid values: bisection, newton, secant, hybrid")]
pub struct UnknownSolverKind(pub String);

impl SolverKind {
    /// All solver kinds, in declaration order.
    pub const ALL: [SolverKind; 4] = [
        SolverKind::Bisection,
        SolverKind::Newton,
        SolverKind::Secant,
        SolverKind::Hybrid,
    ];

    /// Lowercase name used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverKind::Bisection => "bisection",
            SolverKind::Newton => "newton",
            SolverKind::Secant => "secant",
            SolverKind::Hybrid => "hybrid",
        }
    }

    /// Whether the algorithm needs a sign change over the bracket.
    pub fn requires_sign_change(&self) -> bool {
        matches!(self, SolverKind::Bisection | SolverKind::Hybrid)
    }

    /// Instantiate the solver with `config`.
    ///
    /// ```
    /// use numeric_core::math::solvers::{SolverConfig, SolverKind};
    ///
    /// let solver = SolverKind::Secant.build(SolverConfig::default());
    /// assert_eq!(solver.kind(), SolverKind::Secant);
    /// ```
    pub fn build(self, config: SolverConfig) -> Box<dyn NonLinearSolver + Send + Sync> {
        match self {
            SolverKind::Bisection => Box::new(BisectionSolver::new(config)),
            SolverKind::Newton => Box::new(NewtonSolver::new(config)),
            SolverKind::Secant => Box::new(SecantSolver::new(config)),
            SolverKind::Hybrid => Box::new(HybridSolver::new(config)),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SolverKind {
    type Err = UnknownSolverKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bisection" | "bisect" => Ok(SolverKind::Bisection),
            "newton" | "newton-raphson" => Ok(SolverKind::Newton),
            "secant" => Ok(SolverKind::Secant),
            "hybrid" => Ok(SolverKind::Hybrid),
            _ => Err(UnknownSolverKind(s.to_string())),
        }
    }
}
