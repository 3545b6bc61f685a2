//! Safeguarded Newton-bisection solver.

use super::traits::{evaluate_or_fail, residual, validate_inputs};
use super::{NonLinearSolver, SolverConfig, SolverKind, Solution, SolverStatus};
use crate::math::function::ScalarFunction;
use crate::types::SolverError;
use tracing::{debug, trace};

/// Bracketing Newton solver with a bisection fallback.
///
/// Keeps a sign-changing bracket at all times. Each step tries Newton from
/// the newest point and accepts it only if:
/// - the derivative is nonzero and its sign matches the bracket's orientation
/// - the step lands strictly inside the current bracket
/// - the step is at most half the previous one
///
/// Otherwise the bracket is bisected. Every iterate therefore stays inside
/// the initial `[a, b]`, and convergence is at least as fast as bisection.
///
/// # Algorithm
///
/// Based on the `rtsafe` scheme from Numerical Recipes.
///
/// # Example
///
/// ```
/// use numeric_core::math::function::FnFunction;
/// use numeric_core::math::solvers::{HybridSolver, NonLinearSolver};
///
/// // Plain Newton diverges on atan from x = 10
/// let f = FnFunction::new(|x: f64| x.atan());
/// let solution = HybridSolver::default().solve(&f, -1.0, 10.0, 1e-12).unwrap();
///
/// assert!(solution.is_success());
/// assert!(solution.x_estimate().abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HybridSolver {
    config: SolverConfig,
}

#[derive(Debug, Clone, Copy)]
struct Endpoint {
    x: f64,
    fx: f64,
}

/// A Newton step from `x` that passes the safeguards, as `(next, delta)`.
fn safeguarded_step(
    x: f64,
    fx: f64,
    dfx: Option<f64>,
    lo: f64,
    hi: f64,
    increasing: bool,
    last_step: f64,
) -> Option<(f64, f64)> {
    let dfx = dfx?;
    let consistent = if increasing { dfx > 0.0 } else { dfx < 0.0 };
    if !consistent {
        return None;
    }

    let delta = -fx / dfx;
    let next = x + delta;
    if next > lo && next < hi && 2.0 * delta.abs() <= last_step.abs() {
        Some((next, delta))
    } else {
        None
    }
}

impl HybridSolver {
    /// Create a new hybrid solver with the given configuration.
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
        let fa = evaluate_or_fail(f, a, 0)?;
        if fa == 0.0 {
            return Ok(Solution::new(a, fa, 0, SolverStatus::Success));
        }
        let fb = evaluate_or_fail(f, b, 0)?;
        if fb == 0.0 {
            return Ok(Solution::new(b, fb, 0, SolverStatus::Success));
        }

        if fa.signum() == fb.signum() {
            debug!(a, b, fa, fb, "bracket has no sign change");
            return Err(Solution::new(a, fa, 0, SolverStatus::FailedOutOfRange));
        }

        let mut lo = Endpoint { x: a, fx: fa };
        let mut hi = Endpoint { x: b, fx: fb };
        let increasing = fb > fa;
        let mut last_step = b - a;
        let mut c = a + last_step / 2.0;

        for k in 1..=self.config.max_iterations {
            let fc = evaluate_or_fail(f, c, k)?;
            if fc == 0.0 {
                return Ok(Solution::new(c, fc, k, SolverStatus::Success));
            }

            let sc = fc.signum();
            if sc == lo.fx.signum() {
                lo = Endpoint { x: c, fx: fc };
            } else if sc == hi.fx.signum() {
                hi = Endpoint { x: c, fx: fc };
            } else {
                debug!(x = c, fx = fc, "inconsistent sign pattern");
                return Err(Solution::new(c, fc, k, SolverStatus::FailedOtherReason));
            }

            let width = hi.x - lo.x;
            let mid = lo.x + width / 2.0;
            if width < 2.0 * tol || mid <= lo.x || mid >= hi.x {
                let fm = evaluate_or_fail(f, mid, k)?;
                return Ok(Solution::new(mid, fm, k, SolverStatus::Success));
            }

            match safeguarded_step(
                c,
                fc,
                f.derivative(c).ok(),
                lo.x,
                hi.x,
                increasing,
                last_step,
            ) {
                Some((next, delta)) => {
                    trace!(iterations = k, x = next, delta, "newton step");
                    if delta.abs() < tol {
                        let fnext = evaluate_or_fail(f, next, k)?;
                        return Ok(Solution::new(next, fnext, k, SolverStatus::Success));
                    }
                    last_step = delta;
                    c = next;
                }
                None => {
                    trace!(iterations = k, x = mid, width, "bisection step");
                    last_step = width / 2.0;
                    c = mid;
                }
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

impl NonLinearSolver for HybridSolver {
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
        SolverKind::Hybrid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::function::{FnFunction, FnWithDerivative, Polynomial};
    use approx::assert_relative_eq;

    #[test]
    fn test_find_sqrt_2() {
        let f = Polynomial::new(vec![1.0, 0.0, -2.0]);
        let solution = HybridSolver::default().solve(&f, 0.0, 2.0, 1e-12).unwrap();
        assert_eq!(solution.status(), SolverStatus::Success);
        assert_relative_eq!(
            solution.x_estimate(),
            std::f64::consts::SQRT_2,
            epsilon = 1e-11
        );
        assert!(solution.iterations() < 20);
    }

    #[test]
    fn test_decreasing_function() {
        let f = FnFunction::new(|x: f64| x.cos() - x);
        let solution = HybridSolver::default().solve(&f, 0.0, 1.0, 1e-12).unwrap();
        assert!(solution.is_success());
        assert_relative_eq!(solution.x_estimate(), 0.7390851332151607, epsilon = 1e-11);
    }

    #[test]
    fn test_survives_newton_divergence() {
        let f = FnWithDerivative::new(|x: f64| x.atan(), |x: f64| 1.0 / (1.0 + x * x));
        let solution = HybridSolver::default().solve(&f, -2.0, 20.0, 1e-12).unwrap();
        assert!(solution.is_success());
        assert!(solution.x_estimate().abs() < 1e-11);
    }

    #[test]
    fn test_falls_back_on_wrong_derivative_sign() {
        // x³ - x has derivative of the wrong sign on (-0.577, 0.577)
        let f = Polynomial::new(vec![1.0, 0.0, -1.0, 0.0]);
        let solution = HybridSolver::default().solve(&f, 0.5, 1.7, 1e-12).unwrap();
        assert!(solution.is_success());
        assert_relative_eq!(solution.x_estimate(), 1.0, epsilon = 1e-11);
    }

    #[test]
    fn test_same_sign_is_out_of_range() {
        let f = Polynomial::new(vec![1.0, 0.0, 1.0]);
        let solution = HybridSolver::default().solve(&f, -1.0, 1.0, 1e-8).unwrap();
        assert_eq!(solution.status(), SolverStatus::FailedOutOfRange);
        assert_eq!(solution.iterations(), 0);
    }

    #[test]
    fn test_root_at_endpoint() {
        let f = Polynomial::new(vec![1.0, -2.0]);
        let solution = HybridSolver::default().solve(&f, 0.0, 2.0, 1e-8).unwrap();
        assert!(solution.is_success());
        assert_eq!(solution.x_estimate(), 2.0);
        assert_eq!(solution.iterations(), 0);
    }

    #[test]
    fn test_max_iterations_exceeded() {
        let f = FnFunction::new(|x: f64| x.cbrt());
        let solver = HybridSolver::new(SolverConfig::new(3, 1e-3));
        let solution = solver.solve(&f, -1.0, 4.0, 1e-14).unwrap();
        assert_eq!(solution.status(), SolverStatus::FailedTooManyIterations);
        assert_eq!(solution.iterations(), 3);
        assert!(solution.x_estimate() > -1.0 && solution.x_estimate() < 4.0);
    }

    #[test]
    fn test_kind() {
        assert_eq!(HybridSolver::with_defaults().kind(), SolverKind::Hybrid);
    }
}
