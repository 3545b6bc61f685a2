//! Power iteration with deflation.

use crate::math::linalg::{deflate, ColumnVector, Matrix};
use crate::types::LinalgError;
use tracing::{debug, trace, warn};

/// When power iteration is considered converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ConvergenceCriterion {
    /// Successive eigenvalue estimates differ by less than the tolerance.
    Eigenvalue,
    /// As [`Eigenvalue`](Self::Eigenvalue), and the normalized iterate
    /// changes by less than the tolerance in max-abs norm (up to sign).
    #[default]
    EigenvalueAndVector,
}

/// Configuration for [`PowerIteration`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerIterationConfig {
    /// Iteration cap `kmax`.
    pub max_iterations: usize,
    /// Convergence tolerance.
    pub tolerance: f64,
    /// Stopping rule.
    pub criterion: ConvergenceCriterion,
}

impl Default for PowerIterationConfig {
    /// Default values:
    /// - `max_iterations`: 1000
    /// - `tolerance`: 1e-10
    /// - `criterion`: [`ConvergenceCriterion::EigenvalueAndVector`]
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-10,
            criterion: ConvergenceCriterion::default(),
        }
    }
}

impl PowerIterationConfig {
    /// Create a configuration with the default criterion.
    ///
    /// # Panics
    ///
    /// Panics if `max_iterations == 0` or `tolerance` is not positive.
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        assert!(max_iterations > 0, "max_iterations must be > 0");
        assert!(
            tolerance > 0.0 && tolerance.is_finite(),
            "tolerance must be positive"
        );
        Self {
            max_iterations,
            tolerance,
            criterion: ConvergenceCriterion::default(),
        }
    }

    /// Replace the stopping rule.
    pub fn with_criterion(mut self, criterion: ConvergenceCriterion) -> Self {
        self.criterion = criterion;
        self
    }
}

/// An eigenpair estimate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EigenResult {
    /// Eigenvector, scaled so its largest entry has magnitude 1.
    pub eigenvector: ColumnVector,
    /// Signed eigenvalue.
    pub eigenvalue: f64,
    /// Whether the stopping rule was met before the iteration cap.
    pub converged: bool,
    /// Iterations performed.
    pub iterations: usize,
}

/// Power-iteration eigensolver.
///
/// Repeats `y = M·x`, `l = ‖y‖∞`, `x = y / l`. The eigenvalue is `l` signed
/// by `y[i]·x[i]` at the largest entry of `y`. Converges to the eigenvalue
/// of largest magnitude at rate `|λ₂/λ₁|`, provided the start vector has a
/// component along its eigenvector.
///
/// # Example
///
/// ```
/// use numeric_core::math::eigen::PowerIteration;
/// use numeric_core::math::linalg::{ColumnVector, Matrix};
///
/// let m = Matrix::diagonal(&[5.0, 3.0, 1.0]);
/// let x0 = ColumnVector::new(vec![1.0, 1.0, 1.0]);
///
/// let result = PowerIteration::with_defaults().dominant(&m, &x0).unwrap();
/// assert!(result.converged);
/// assert!((result.eigenvalue - 5.0).abs() < 1e-9);
/// assert!((result.eigenvector[0] - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PowerIteration {
    config: PowerIterationConfig,
}

impl PowerIteration {
    /// Create a solver with the given configuration.
    pub fn new(config: PowerIterationConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Get the solver configuration.
    pub fn config(&self) -> &PowerIterationConfig {
        &self.config
    }

    /// Dominant eigenpair of `matrix` starting from `x0`.
    ///
    /// Running out of iterations is not an error: the best estimate is
    /// returned with `converged = false`. If `M·x` is ever exactly zero the
    /// result is eigenvalue 0 with the current iterate, converged.
    ///
    /// # Errors
    ///
    /// - [`LinalgError::NotSquare`] if `matrix` is not square
    /// - [`LinalgError::DimensionMismatch`] if `x0` has the wrong length
    /// - [`LinalgError::ZeroVector`] if `x0` is all zeros
    pub fn dominant(&self, matrix: &Matrix, x0: &ColumnVector) -> Result<EigenResult, LinalgError> {
        if !matrix.is_square() {
            return Err(LinalgError::NotSquare {
                rows: matrix.rows(),
                cols: matrix.cols(),
            });
        }
        if x0.len() != matrix.cols() {
            return Err(LinalgError::DimensionMismatch {
                op: "power iteration",
                left: matrix.shape(),
                right: x0.shape(),
            });
        }
        let start_scale = x0.max_abs();
        if start_scale == 0.0 {
            return Err(LinalgError::ZeroVector);
        }

        let tol = self.config.tolerance;
        let mut x = x0.scale(1.0 / start_scale);
        let mut last: Option<f64> = None;
        let mut eigenvalue = 0.0;

        for k in 1..=self.config.max_iterations {
            let y = matrix.mul_vector(&x)?;
            let l = y.max_abs();
            if l == 0.0 {
                debug!(iterations = k, "iterate mapped to zero");
                return Ok(EigenResult {
                    eigenvector: x,
                    eigenvalue: 0.0,
                    converged: true,
                    iterations: k,
                });
            }

            let imax = y.argmax_abs().unwrap_or(0);
            let sign = if y[imax] * x[imax] < 0.0 { -1.0 } else { 1.0 };
            let next = y.scale(1.0 / l);
            eigenvalue = sign * l;

            let value_converged = last.is_some_and(|prev| (l - prev).abs() < tol);
            let vector_converged = match self.config.criterion {
                ConvergenceCriterion::Eigenvalue => true,
                ConvergenceCriterion::EigenvalueAndVector => {
                    next.iter()
                        .zip(x.iter())
                        .map(|(n, p)| (n - sign * p).abs())
                        .fold(0.0, f64::max)
                        < tol
                }
            };
            trace!(iterations = k, eigenvalue, "power iteration step");

            x = next;
            last = Some(l);

            if value_converged && vector_converged {
                debug!(iterations = k, eigenvalue, "power iteration converged");
                return Ok(EigenResult {
                    eigenvector: x,
                    eigenvalue,
                    converged: true,
                    iterations: k,
                });
            }
        }

        debug!(
            iterations = self.config.max_iterations,
            eigenvalue, "power iteration hit the iteration cap"
        );
        Ok(EigenResult {
            eigenvector: x,
            eigenvalue,
            converged: false,
            iterations: self.config.max_iterations,
        })
    }

    /// Up to `count` eigenpairs in order of decreasing magnitude.
    ///
    /// Each pair is found on the matrix with all previous pairs deflated
    /// out, every run starting from `x0`. Stops early once the deflated
    /// matrix maps the iterate to zero, and never returns more than `n`
    /// pairs for an `n × n` matrix.
    ///
    /// Exact for symmetric matrices; for others the deflated spectrum is
    /// only approximate. A repeated eigenvalue is found once: the first
    /// deflation removes all of `x0` that lies in its eigenspace.
    pub fn extract(
        &self,
        matrix: &Matrix,
        count: usize,
        x0: &ColumnVector,
    ) -> Result<Vec<EigenResult>, LinalgError> {
        let count = count.min(matrix.rows());
        let mut remaining = matrix.clone();
        let mut pairs = Vec::with_capacity(count);

        for index in 0..count {
            let result = self.dominant(&remaining, x0)?;
            if result.eigenvalue == 0.0 {
                debug!(index, "matrix exhausted");
                break;
            }
            if !result.converged {
                warn!(index, eigenvalue = result.eigenvalue, "eigenpair did not converge");
            }
            remaining = deflate(&remaining, &result.eigenvector, result.eigenvalue)?;
            pairs.push(result);
        }

        Ok(pairs)
    }
}
