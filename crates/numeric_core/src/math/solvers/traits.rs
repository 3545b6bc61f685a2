//! The common solver interface and shared input checks.

use super::{SolverKind, Solution, SolverStatus};
use crate::math::function::ScalarFunction;
use crate::types::SolverError;
use tracing::debug;

/// A one-dimensional root finder over a bracket `[a, b]`.
///
/// Invalid inputs are reported as [`SolverError`]; convergence failures are
/// reported through the returned [`Solution`]'s status.
pub trait NonLinearSolver {
    /// Search for a root of `f` in `[a, b]` to tolerance `tol`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] if `a`/`b` are non-finite or not ordered, or
    /// if `tol` is not a positive finite number.
    fn solve(
        &self,
        f: &dyn ScalarFunction,
        a: f64,
        b: f64,
        tol: f64,
    ) -> Result<Solution, SolverError>;

    /// Which algorithm this is.
    fn kind(&self) -> SolverKind;
}

pub(crate) fn validate_inputs(a: f64, b: f64, tol: f64) -> Result<(), SolverError> {
    if !(a.is_finite() && b.is_finite() && a < b) {
        return Err(SolverError::InvalidBracket { a, b });
    }
    if !(tol.is_finite() && tol > 0.0) {
        return Err(SolverError::InvalidTolerance(tol));
    }
    Ok(())
}

/// `f(x)`, or a numerical-error solution at `x` if evaluation fails.
pub(crate) fn evaluate_or_fail(
    f: &dyn ScalarFunction,
    x: f64,
    iterations: usize,
) -> Result<f64, Solution> {
    f.evaluate(x).map_err(|err| {
        debug!(x, iterations, error = %err, "function evaluation failed");
        Solution::new(x, f64::NAN, iterations, SolverStatus::FailedNumericalError)
    })
}

/// `f'(x)`, or a numerical-error solution at `x` if it cannot be computed.
pub(crate) fn derivative_or_fail(
    f: &dyn ScalarFunction,
    x: f64,
    fx: f64,
    iterations: usize,
) -> Result<f64, Solution> {
    f.derivative(x).map_err(|err| {
        debug!(x, iterations, error = %err, "derivative evaluation failed");
        Solution::new(x, fx, iterations, SolverStatus::FailedNumericalError)
    })
}

/// Residual for a terminal solution; NaN when `f(x)` is undefined.
pub(crate) fn residual(f: &dyn ScalarFunction, x: f64) -> f64 {
    f.evaluate(x).unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_inputs() {
        assert!(validate_inputs(0.0, 1.0, 1e-6).is_ok());
        assert_eq!(
            validate_inputs(1.0, 0.0, 1e-6),
            Err(SolverError::InvalidBracket { a: 1.0, b: 0.0 })
        );
        assert!(validate_inputs(1.0, 1.0, 1e-6).is_err());
        assert!(validate_inputs(f64::NAN, 1.0, 1e-6).is_err());
        assert!(validate_inputs(0.0, f64::INFINITY, 1e-6).is_err());
        assert_eq!(
            validate_inputs(0.0, 1.0, 0.0),
            Err(SolverError::InvalidTolerance(0.0))
        );
        assert!(validate_inputs(0.0, 1.0, f64::NAN).is_err());
    }
}
