//! Solver results.

use std::fmt;

/// Outcome of a root-finding run.
///
/// Failures here are expected numerical outcomes, not programmer errors:
/// callers may retry with another solver or bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverStatus {
    /// Converged within tolerance.
    Success,
    /// An iterate left the bracket, or the bracket has no sign change.
    FailedOutOfRange,
    /// The iteration cap was reached.
    FailedTooManyIterations,
    /// Zero derivative or a failed function evaluation.
    FailedNumericalError,
    /// Sign pattern inconsistent with a valid bracket.
    FailedOtherReason,
}

impl SolverStatus {
    /// Whether the status is [`SolverStatus::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, SolverStatus::Success)
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverStatus::Success => write!(f, "success"),
            SolverStatus::FailedOutOfRange => write!(f, "failed: out of range"),
            SolverStatus::FailedTooManyIterations => write!(f, "failed: too many iterations"),
            SolverStatus::FailedNumericalError => write!(f, "failed: numerical error"),
            SolverStatus::FailedOtherReason => write!(f, "failed: other reason"),
        }
    }
}

/// Immutable record of a solve: best estimate, residual, effort and status.
///
/// Only solvers create solutions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    x_estimate: f64,
    y_estimate: f64,
    iterations: usize,
    status: SolverStatus,
}

impl Solution {
    pub(crate) fn new(
        x_estimate: f64,
        y_estimate: f64,
        iterations: usize,
        status: SolverStatus,
    ) -> Self {
        Self {
            x_estimate,
            y_estimate,
            iterations,
            status,
        }
    }

    /// Estimated root.
    pub fn x_estimate(&self) -> f64 {
        self.x_estimate
    }

    /// Function value at the estimate; NaN when it could not be evaluated.
    pub fn y_estimate(&self) -> f64 {
        self.y_estimate
    }

    /// Iterations performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// How the run ended.
    pub fn status(&self) -> SolverStatus {
        self.status
    }

    /// Shorthand for `status().is_success()`.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x = {}, f(x) = {}, iterations = {}, status = {}",
            self.x_estimate, self.y_estimate, self.iterations, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let s = Solution::new(1.5, -0.25, 7, SolverStatus::Success);
        assert_eq!(s.x_estimate(), 1.5);
        assert_eq!(s.y_estimate(), -0.25);
        assert_eq!(s.iterations(), 7);
        assert_eq!(s.status(), SolverStatus::Success);
        assert!(s.is_success());
    }

    #[test]
    fn test_failure_is_not_success() {
        for status in [
            SolverStatus::FailedOutOfRange,
            SolverStatus::FailedTooManyIterations,
            SolverStatus::FailedNumericalError,
            SolverStatus::FailedOtherReason,
        ] {
            assert!(!status.is_success());
            assert!(format!("{}", status).starts_with("failed"));
        }
    }

    #[test]
    fn test_display() {
        let s = Solution::new(2.0, 0.0, 3, SolverStatus::Success);
        assert_eq!(
            format!("{}", s),
            "x = 2, f(x) = 0, iterations = 3, status = success"
        );
    }
}
