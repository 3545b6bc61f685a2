//! Multi-root search: bracket scanning and deflation.

use super::traits::validate_inputs;
use super::{NonLinearSolver, Solution};
use crate::math::function::{DeflatedFunction, ScalarFunction};
use crate::types::SolverError;
use tracing::debug;

/// Upper bound on the number of windows [`scan_brackets`] evaluates.
pub const MAX_SCAN_WINDOWS: usize = 1_000_000;

/// Split `[a, b]` into windows of width `window` and return those whose
/// endpoints have opposite signs.
///
/// Windows where `f` cannot be evaluated at an endpoint are skipped. The
/// last window is truncated at `b`. Window edges are `a + i·window`; an edge
/// that rounds onto the previous one is merged into the next window, so no
/// part of `[a, b]` is left unscanned.
///
/// # Errors
///
/// [`SolverError::InvalidBracket`] for an invalid interval, and
/// [`SolverError::InvalidWindow`] when `window` is not positive and finite or
/// splits `[a, b]` into more than [`MAX_SCAN_WINDOWS`] windows.
///
/// # Example
///
/// ```
/// use numeric_core::math::function::FnFunction;
/// use numeric_core::math::solvers::scan_brackets;
///
/// let f = FnFunction::new(|x: f64| x.sin());
/// let brackets = scan_brackets(&f, 1.0, 10.0, 0.5).unwrap();
///
/// // Roots at π, 2π and 3π
/// assert_eq!(brackets.len(), 3);
/// assert!(brackets[0].0 < std::f64::consts::PI && std::f64::consts::PI < brackets[0].1);
/// ```
pub fn scan_brackets(
    f: &dyn ScalarFunction,
    a: f64,
    b: f64,
    window: f64,
) -> Result<Vec<(f64, f64)>, SolverError> {
    if !(a.is_finite() && b.is_finite() && a < b) {
        return Err(SolverError::InvalidBracket { a, b });
    }
    if !(window.is_finite() && window > 0.0) {
        return Err(SolverError::InvalidWindow(window));
    }
    // A window of (b - a) / n may divide back to n plus one ulp
    let windows = ((b - a) / window * (1.0 - f64::EPSILON)).ceil();
    if !(windows.is_finite() && windows <= MAX_SCAN_WINDOWS as f64) {
        return Err(SolverError::InvalidWindow(window));
    }
    let windows = (windows as usize).max(1);

    let mut brackets = Vec::new();
    let mut lo = a;
    let mut f_lo = f.evaluate(lo).ok();

    for i in 1..=windows {
        let hi = if i == windows {
            b
        } else {
            (a + i as f64 * window).min(b)
        };
        if hi <= lo {
            continue;
        }
        let f_hi = f.evaluate(hi).ok();

        if let (Some(y_lo), Some(y_hi)) = (f_lo, f_hi) {
            if y_lo.signum() != y_hi.signum() {
                brackets.push((lo, hi));
            }
        }

        lo = hi;
        f_lo = f_hi;
    }

    debug!(a, b, window, found = brackets.len(), "bracket scan");
    Ok(brackets)
}

/// Find up to `count` distinct roots of `f` in `[a, b]` by deflation.
///
/// After each success the root is divided out of `f` and `solver` is run
/// again on the same bracket. Stops early at the first unsuccessful solve.
/// Reported residuals are those of the undeflated `f`.
///
/// Bracketing solvers rarely find more than one root this way, since the
/// deflated function keeps the sign pattern of its endpoints; prefer
/// [`NewtonSolver`](super::NewtonSolver) or
/// [`SecantSolver`](super::SecantSolver) here, or run a bracketing solver
/// over [`scan_brackets`] instead.
///
/// # Errors
///
/// Returns [`SolverError`] for an invalid bracket or tolerance.
pub fn find_roots(
    solver: &dyn NonLinearSolver,
    f: &dyn ScalarFunction,
    a: f64,
    b: f64,
    tol: f64,
    count: usize,
) -> Result<Vec<Solution>, SolverError> {
    validate_inputs(a, b, tol)?;

    let mut deflated = DeflatedFunction::new(f);
    let mut roots = Vec::with_capacity(count);

    while roots.len() < count {
        let solution = solver.solve(&deflated, a, b, tol)?;
        if !solution.is_success() {
            debug!(
                found = roots.len(),
                status = %solution.status(),
                "deflated search stopped"
            );
            break;
        }

        let x = solution.x_estimate();
        deflated.push_root(x);
        roots.push(Solution::new(
            x,
            f.evaluate(x).unwrap_or(f64::NAN),
            solution.iterations(),
            solution.status(),
        ));
    }

    Ok(roots)
}
