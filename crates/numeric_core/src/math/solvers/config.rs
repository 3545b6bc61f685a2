//! Solver configuration types.

/// Configuration for the iterative root finders.
///
/// Bisection terminates by bracket shrinkage and ignores the iteration cap;
/// Newton, secant and hybrid stop after `max_iterations` steps.
///
/// # Example
///
/// ```
/// use numeric_core::math::solvers::SolverConfig;
///
/// // Use default configuration
/// let config = SolverConfig::default();
/// assert_eq!(config.max_iterations, 200);
/// assert_eq!(config.secant_step, 0.001);
///
/// // Custom configuration
/// let custom = SolverConfig {
///     max_iterations: 500,
///     ..SolverConfig::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Maximum number of iterations before giving up.
    ///
    /// If the solver doesn't converge within this limit, it reports
    /// `SolverStatus::FailedTooManyIterations`.
    pub max_iterations: usize,

    /// Forward-difference offset used by the secant solver's slope.
    pub secant_step: f64,
}

impl Default for SolverConfig {
    /// Default values:
    /// - `max_iterations`: 200
    /// - `secant_step`: 0.001
    fn default() -> Self {
        Self {
            max_iterations: 200,
            secant_step: 1e-3,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with specified values.
    ///
    /// # Arguments
    ///
    /// * `max_iterations` - Maximum iteration count (must be > 0)
    /// * `secant_step` - Secant slope offset (must be positive and finite)
    ///
    /// # Panics
    ///
    /// Panics if `max_iterations == 0` or `secant_step` is not positive.
    ///
    /// # Example
    ///
    /// ```
    /// use numeric_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(50, 1e-4);
    /// assert_eq!(config.max_iterations, 50);
    /// ```
    pub fn new(max_iterations: usize, secant_step: f64) -> Self {
        assert!(max_iterations > 0, "max_iterations must be > 0");
        assert!(
            secant_step > 0.0 && secant_step.is_finite(),
            "secant_step must be positive"
        );
        Self {
            max_iterations,
            secant_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.max_iterations, 200);
        assert!((config.secant_step - 1e-3).abs() < 1e-15);
    }

    #[test]
    fn test_new_config() {
        let config = SolverConfig::new(25, 1e-5);
        assert_eq!(config.max_iterations, 25);
        assert_eq!(config.secant_step, 1e-5);
    }

    #[test]
    #[should_panic(expected = "max_iterations must be > 0")]
    fn test_new_config_zero_iterations_panics() {
        let _ = SolverConfig::new(0, 1e-3);
    }

    #[test]
    #[should_panic(expected = "secant_step must be positive")]
    fn test_new_config_negative_step_panics() {
        let _ = SolverConfig::new(10, -1e-3);
    }

    #[test]
    #[should_panic(expected = "secant_step must be positive")]
    fn test_new_config_nan_step_panics() {
        let _ = SolverConfig::new(10, f64::NAN);
    }

    #[test]
    fn test_config_copy() {
        let config1 = SolverConfig::default();
        let config2 = config1; // Copy semantics
        assert_eq!(config1, config2);
    }
}
