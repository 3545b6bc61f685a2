//! Newton-Raphson root-finding solver.

use super::traits::{derivative_or_fail, evaluate_or_fail, residual, validate_inputs};
use super::{NonLinearSolver, SolverConfig, SolverKind, Solution, SolverStatus};
use crate::math::function::ScalarFunction;
use crate::types::SolverError;
use tracing::{debug, trace};

/// Newton-Raphson root finder.
///
/// Uses Newton's method: `x_{n+1} = x_n - f(x_n) / f'(x_n)`, starting from
/// the left endpoint `a`. The derivative comes from
/// [`ScalarFunction::derivative`], exact or numerical.
///
/// The bracket is only a validity region: iterates must stay in `(a, b]`.
/// No sign change is required.
///
/// # Convergence
///
/// Newton-Raphson converges quadratically near a simple root, meaning the
/// number of correct digits approximately doubles each iteration. However,
/// it may fail if:
/// - The derivative is zero at an iterate
/// - The start point is far from the root
/// - The function has discontinuities
///
/// # Example
///
/// ```
/// use numeric_core::math::function::Polynomial;
/// use numeric_core::math::solvers::{NewtonSolver, NonLinearSolver};
///
/// // Solve x² - 2 = 0 (find √2)
/// let f = Polynomial::new(vec![1.0, 0.0, -2.0]);
/// let solution = NewtonSolver::default().solve(&f, 1.0, 2.0, 1e-10).unwrap();
///
/// assert!(solution.is_success());
/// assert!((solution.x_estimate() - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewtonSolver {
    /// Solver configuration
    config: SolverConfig,
}

impl NewtonSolver {
    /// Create a new Newton-Raphson solver with the given configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use numeric_core::math::solvers::{NewtonSolver, SolverConfig};
    ///
    /// let solver = NewtonSolver::new(SolverConfig::new(50, 1e-3));
    /// assert_eq!(solver.config().max_iterations, 50);
    /// ```
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
        let mut c = a;

        for k in 1..=self.config.max_iterations {
            let fc = evaluate_or_fail(f, c, k - 1)?;
            let dfc = derivative_or_fail(f, c, fc, k - 1)?;

            if dfc == 0.0 {
                debug!(x = c, iterations = k, "zero derivative");
                return Err(Solution::new(c, fc, k, SolverStatus::FailedNumericalError));
            }

            let delta = -fc / dfc;
            c += delta;
            trace!(iterations = k, x = c, delta, "newton step");

            if !c.is_finite() {
                return Err(Solution::new(c, f64::NAN, k, SolverStatus::FailedNumericalError));
            }

            if delta.abs() < tol {
                let fc = evaluate_or_fail(f, c, k)?;
                return Ok(Solution::new(c, fc, k, SolverStatus::Success));
            }

            if c <= a || c > b {
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

impl NonLinearSolver for NewtonSolver {
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
        SolverKind::Newton
    }
}
