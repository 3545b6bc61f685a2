//! Bisection root-finding solver.

use super::traits::{evaluate_or_fail, residual, validate_inputs};
use super::{NonLinearSolver, SolverConfig, SolverKind, Solution, SolverStatus};
use crate::math::function::ScalarFunction;
use crate::types::SolverError;
use tracing::{debug, trace};

/// Bisection root finder.
///
/// Repeatedly halves a bracket whose endpoints have opposite signs. Linear
/// convergence, but guaranteed for any continuous function with a sign
/// change: the final estimate is within `tol` of a root.
///
/// Stops with [`SolverStatus::FailedTooManyIterations`] at the current
/// midpoint after `max_iterations` halvings.
///
/// # Example
///
/// ```
/// use numeric_core::math::function::FnFunction;
/// use numeric_core::math::solvers::{BisectionSolver, NonLinearSolver};
///
/// let f = FnFunction::new(|x: f64| x * x * x - x - 2.0);
/// let solution = BisectionSolver::default().solve(&f, 1.0, 2.0, 1e-10).unwrap();
///
/// assert!(solution.is_success());
/// assert!((solution.x_estimate() - 1.5213797068).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BisectionSolver {
    config: SolverConfig,
}

impl BisectionSolver {
    /// Create a new bisection solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Get the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn iterate(
        &self,
        f: &dyn ScalarFunction,
        mut a: f64,
        mut b: f64,
        tol: f64,
    ) -> Result<Solution, Solution> {
        let mut fa = evaluate_or_fail(f, a, 0)?;
        if fa == 0.0 {
            return Ok(Solution::new(a, fa, 0, SolverStatus::Success));
        }
        let mut fb = evaluate_or_fail(f, b, 0)?;
        if fb == 0.0 {
            return Ok(Solution::new(b, fb, 0, SolverStatus::Success));
        }

        if fa.signum() == fb.signum() {
            debug!(a, b, fa, fb, "bracket has no sign change");
            return Err(Solution::new(a, fa, 0, SolverStatus::FailedOutOfRange));
        }

        let mut iterations = 0;
        loop {
            let c = a + (b - a) / 2.0;
            // Converged, or the bracket can no longer be split
            if b - a <= 2.0 * tol || c <= a || c >= b {
                let fc = evaluate_or_fail(f, c, iterations)?;
                return Ok(Solution::new(c, fc, iterations, SolverStatus::Success));
            }

            if iterations >= self.config.max_iterations {
                debug!(iterations, a, b, "bisection iteration cap reached");
                return Err(Solution::new(
                    c,
                    residual(f, c),
                    iterations,
                    SolverStatus::FailedTooManyIterations,
                ));
            }

            iterations += 1;
            let fc = evaluate_or_fail(f, c, iterations)?;
            trace!(iterations, a, b, c, fc, "bisection step");
            if fc == 0.0 {
                return Ok(Solution::new(c, fc, iterations, SolverStatus::Success));
            }

            let sc = fc.signum();
            if sc == fa.signum() && sc != fb.signum() {
                a = c;
                fa = fc;
            } else if sc == fb.signum() && sc != fa.signum() {
                b = c;
                fb = fc;
            } else {
                debug!(c, fc, fa, fb, "inconsistent sign pattern");
                return Err(Solution::new(
                    c,
                    fc,
                    iterations,
                    SolverStatus::FailedOtherReason,
                ));
            }
        }
    }
}

impl NonLinearSolver for BisectionSolver {
    fn solve(
        &self,
        f: &dyn ScalarFunction,
        a: f64,
        b: f64,
        tol: f64,
    ) -> Result<Solution, SolverError> {
        validate_inputs(a, b, tol)?;
        let (Ok(solution) | Err(solution)) = self.iterate(f, a, b, tol);
        Ok(solution)
    }

    fn kind(&self) -> SolverKind {
        SolverKind::Bisection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::function::{FnFunction, Polynomial};
    use crate::types::NumericalError;
    use approx::assert_relative_eq;

    #[test]
    fn test_find_sqrt_2() {
        let f = Polynomial::new(vec![1.0, 0.0, -2.0]);
        let solution = BisectionSolver::default().solve(&f, 0.0, 2.0, 1e-10).unwrap();

        assert_eq!(solution.status(), SolverStatus::Success);
        assert!((solution.x_estimate() - std::f64::consts::SQRT_2).abs() <= 1e-10);
        assert!(solution.y_estimate().abs() < 1e-9);
        assert!(solution.iterations() > 0);
    }

    #[test]
    fn test_find_sin_root() {
        let f = FnFunction::new(|x: f64| x.sin());
        let solution = BisectionSolver::default().solve(&f, 3.0, 4.0, 1e-12).unwrap();
        assert!(solution.is_success());
        assert_relative_eq!(solution.x_estimate(), std::f64::consts::PI, epsilon = 1e-11);
    }

    #[test]
    fn test_same_sign_is_out_of_range() {
        let f = Polynomial::new(vec![1.0, 0.0, 1.0]);
        let solution = BisectionSolver::default().solve(&f, -1.0, 1.0, 1e-6).unwrap();
        assert_eq!(solution.status(), SolverStatus::FailedOutOfRange);
        assert_eq!(solution.iterations(), 0);
    }

    #[test]
    fn test_root_at_endpoint() {
        let f = Polynomial::new(vec![1.0, -1.0]);
        let solution = BisectionSolver::default().solve(&f, 1.0, 3.0, 1e-6).unwrap();
        assert!(solution.is_success());
        assert_eq!(solution.x_estimate(), 1.0);
        assert_eq!(solution.iterations(), 0);

        let solution = BisectionSolver::default().solve(&f, -2.0, 1.0, 1e-6).unwrap();
        assert_eq!(solution.x_estimate(), 1.0);
    }

    #[test]
    fn test_narrow_bracket_returns_midpoint() {
        let f = Polynomial::new(vec![1.0, -1.0]);
        let solution = BisectionSolver::default()
            .solve(&f, 0.9999, 1.0001, 1e-3)
            .unwrap();
        assert!(solution.is_success());
        assert_eq!(solution.iterations(), 0);
        assert_relative_eq!(solution.x_estimate(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_evaluation_error_is_numerical_failure() {
        // Defined only for x > 0
        let f = FnFunction::new(|x: f64| x.ln());
        let solution = BisectionSolver::default().solve(&f, -1.0, 2.0, 1e-6).unwrap();
        assert_eq!(solution.status(), SolverStatus::FailedNumericalError);
    }

    #[test]
    fn test_inconsistent_sign_pattern() {
        struct Spike;
        impl ScalarFunction for Spike {
            fn evaluate(&self, x: f64) -> Result<f64, NumericalError> {
                Ok(if x == 0.0 { f64::NAN } else { x })
            }
        }
        let solution = BisectionSolver::default().solve(&Spike, -1.0, 1.0, 1e-6).unwrap();
        assert_eq!(solution.status(), SolverStatus::FailedOtherReason);
        assert_eq!(solution.iterations(), 1);
    }

    #[test]
    fn test_iteration_cap() {
        let f = Polynomial::new(vec![1.0, 0.0, -2.0]);
        let solver = BisectionSolver::new(SolverConfig::new(3, 1e-3));
        let solution = solver.solve(&f, 0.0, 2.0, 1e-14).unwrap();

        assert_eq!(solution.status(), SolverStatus::FailedTooManyIterations);
        assert_eq!(solution.iterations(), 3);
        // Bracket after three halvings is [1.25, 1.5]
        assert_eq!(solution.x_estimate(), 1.375);
        assert_relative_eq!(solution.y_estimate(), 1.375 * 1.375 - 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_invalid_inputs() {
        let f = Polynomial::new(vec![1.0, 0.0]);
        let solver = BisectionSolver::with_defaults();
        assert!(matches!(
            solver.solve(&f, 1.0, -1.0, 1e-6),
            Err(SolverError::InvalidBracket { .. })
        ));
        assert!(matches!(
            solver.solve(&f, -1.0, 1.0, -1e-6),
            Err(SolverError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn test_kind_and_config() {
        let solver = BisectionSolver::new(SolverConfig::new(10, 1e-3));
        assert_eq!(solver.kind(), SolverKind::Bisection);
        assert_eq!(solver.config().max_iterations, 10);
    }
}
