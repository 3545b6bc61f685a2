//! Secant-slope root-finding solver.

use super::traits::{evaluate_or_fail, residual, validate_inputs};
use super::{NonLinearSolver, SolverConfig, SolverKind, Solution, SolverStatus};
use crate::math::function::ScalarFunction;
use crate::types::SolverError;
use tracing::{debug, trace};

/// Newton-like iteration with a forward-difference slope.
///
/// The slope at `c` is `(f(c + h) - f(c)) / h` with
/// `h = config.secant_step`, so no derivative is required. Starts at `a`;
/// iterates must stay in `[a, b)`.
///
/// # Example
///
/// ```
/// use numeric_core::math::function::FnFunction;
/// use numeric_core::math::solvers::{NonLinearSolver, SecantSolver};
///
/// let f = FnFunction::new(|x: f64| x.exp() - 2.0);
/// let solution = SecantSolver::default().solve(&f, 0.0, 2.0, 1e-10).unwrap();
///
/// assert!(solution.is_success());
/// assert!((solution.x_estimate() - 2.0_f64.ln()).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SecantSolver {
    config: SolverConfig,
}

impl SecantSolver {
    /// Create a new secant solver with the given configuration.
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
        a: f64,
        b: f64,
        tol: f64,
    ) -> Result<Solution, Solution> {
        let h = self.config.secant_step;
        let mut c = a;

        for k in 1..=self.config.max_iterations {
            let fc = evaluate_or_fail(f, c, k - 1)?;
            let fch = evaluate_or_fail(f, c + h, k - 1)?;
            let slope = (fch - fc) / h;

            if slope == 0.0 {
                debug!(x = c, iterations = k, "zero secant slope");
                return Err(Solution::new(c, fc, k, SolverStatus::FailedNumericalError));
            }

            let delta = -fc / slope;
            c += delta;
            trace!(iterations = k, x = c, delta, "secant step");

            if !c.is_finite() {
                return Err(Solution::new(c, f64::NAN, k, SolverStatus::FailedNumericalError));
            }

            if delta.abs() < tol {
                let fc = evaluate_or_fail(f, c, k)?;
                return Ok(Solution::new(c, fc, k, SolverStatus::Success));
            }

            if c < a || c >= b {
                debug!(x = c, a, b, "iterate left the bracket");
                return Err(Solution::new(
                    c,
                    residual(f, c),
                    k,
                    SolverStatus::FailedOutOfRange,
                ));
            }
        }

        Err(Solution::new(
            c,
            residual(f, c),
            self.config.max_iterations,
            SolverStatus::FailedTooManyIterations,
        ))
    }
}

impl NonLinearSolver for SecantSolver {
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
        SolverKind::Secant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::function::{FnFunction, Polynomial};
    use approx::assert_relative_eq;

    #[test]
    fn test_find_sqrt_2() {
        let f = Polynomial::new(vec![1.0, 0.0, -2.0]);
        let solution = SecantSolver::default().solve(&f, 1.0, 2.0, 1e-10).unwrap();
        assert_eq!(solution.status(), SolverStatus::Success);
        assert_relative_eq!(
            solution.x_estimate(),
            std::f64::consts::SQRT_2,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_custom_step() {
        let f = FnFunction::new(|x: f64| x.cos() - x);
        let solver = SecantSolver::new(SolverConfig::new(100, 1e-6));
        let solution = solver.solve(&f, 0.0, 2.0, 1e-12).unwrap();
        assert!(solution.is_success());
        assert_relative_eq!(solution.x_estimate(), 0.7390851332151607, epsilon = 1e-10);
    }

    #[test]
    fn test_flat_function_fails() {
        let f = Polynomial::new(vec![3.0]);
        let solution = SecantSolver::default().solve(&f, 0.0, 1.0, 1e-8).unwrap();
        assert_eq!(solution.status(), SolverStatus::FailedNumericalError);
        assert_eq!(solution.iterations(), 1);
    }

    #[test]
    fn test_leaves_bracket() {
        // Decreasing line with its root left of the bracket
        let f = Polynomial::new(vec![-1.0, -1.0]);
        let solution = SecantSolver::default().solve(&f, 0.0, 1.0, 1e-8).unwrap();
        assert_eq!(solution.status(), SolverStatus::FailedOutOfRange);
        assert!(solution.x_estimate() < 0.0);
    }

    #[test]
    fn test_kind() {
        assert_eq!(SecantSolver::with_defaults().kind(), SolverKind::Secant);
    }
}
