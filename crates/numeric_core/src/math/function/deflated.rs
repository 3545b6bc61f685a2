//! Root deflation.

use super::ScalarFunction;
use crate::types::NumericalError;

/// Offset applied once when an argument coincides exactly with a known root.
pub const COLLISION_OFFSET: f64 = 1e-5;

/// A function with its known roots divided out.
///
/// Evaluates `f(x) / Π (x - r_i)` so that a solver started again on the same
/// bracket converges to a root it has not found yet. The wrapped function is
/// held by value; pass a reference (`&f`) or an `Arc` to share it.
///
/// No exact derivative is available: [`ScalarFunction::derivative`] falls
/// back to the numerical approximation.
///
/// # Example
///
/// ```
/// use numeric_core::math::function::{DeflatedFunction, Polynomial, ScalarFunction};
///
/// // (x - 1)(x - 2)
/// let p = Polynomial::from_roots(&[1.0, 2.0]);
/// let deflated = DeflatedFunction::with_roots(&p, vec![1.0]);
///
/// // (x - 2) remains
/// assert!((deflated.evaluate(3.0).unwrap() - 1.0).abs() < 1e-12);
/// assert!(!deflated.has_exact_derivative());
/// ```
#[derive(Debug, Clone)]
pub struct DeflatedFunction<F> {
    inner: F,
    roots: Vec<f64>,
}

impl<F: ScalarFunction> DeflatedFunction<F> {
    /// Wrap `inner` with no known roots.
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            roots: Vec::new(),
        }
    }

    /// Wrap `inner` with an initial set of known roots.
    pub fn with_roots(inner: F, roots: Vec<f64>) -> Self {
        Self { inner, roots }
    }

    /// Record another known root.
    pub fn push_root(&mut self, root: f64) {
        self.roots.push(root);
    }

    /// Known roots in discovery order.
    pub fn roots(&self) -> &[f64] {
        &self.roots
    }

    /// The undeflated function.
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: ScalarFunction> ScalarFunction for DeflatedFunction<F> {
    fn evaluate(&self, x: f64) -> Result<f64, NumericalError> {
        let x = if self.roots.iter().any(|&r| r == x) {
            x + COLLISION_OFFSET
        } else {
            x
        };

        let denominator: f64 = self.roots.iter().map(|&r| x - r).product();
        if denominator == 0.0 {
            return Err(NumericalError::DivisionByZero { x });
        }

        Ok(self.inner.evaluate(x)? / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::function::{FnFunction, Polynomial};
    use approx::assert_relative_eq;

    #[test]
    fn test_no_roots_is_identity() {
        let f = FnFunction::new(|x: f64| x.cos());
        let deflated = DeflatedFunction::new(&f);
        for &x in &[-1.0, 0.0, 2.0] {
            assert_eq!(deflated.evaluate(x).unwrap(), x.cos());
        }
    }

    #[test]
    fn test_divides_out_roots() {
        // (x - 1)(x + 2)(x - 3)
        let p = Polynomial::from_roots(&[1.0, -2.0, 3.0]);
        let mut deflated = DeflatedFunction::new(&p);
        deflated.push_root(1.0);
        deflated.push_root(-2.0);

        assert_eq!(deflated.roots(), &[1.0, -2.0]);
        for &x in &[0.0, 0.5, 4.0, 10.0] {
            assert_relative_eq!(deflated.evaluate(x).unwrap(), x - 3.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_evaluate_at_known_root_is_perturbed() {
        let p = Polynomial::from_roots(&[1.0, 2.0]);
        let deflated = DeflatedFunction::with_roots(&p, vec![1.0]);

        // Evaluated at 1 + 1e-5: (x - 2) ≈ -1
        let value = deflated.evaluate(1.0).unwrap();
        assert_relative_eq!(value, 1.0 + COLLISION_OFFSET - 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_perturbed_collision_fails() {
        let f = FnFunction::new(|x: f64| x);
        let deflated = DeflatedFunction::with_roots(&f, vec![0.0, COLLISION_OFFSET]);

        match deflated.evaluate(0.0) {
            Err(NumericalError::DivisionByZero { x }) => assert_eq!(x, COLLISION_OFFSET),
            other => panic!("Expected DivisionByZero error, got {:?}", other),
        }
    }

    #[test]
    fn test_inner_errors_propagate() {
        let f = FnFunction::new(|x: f64| x.sqrt());
        let deflated = DeflatedFunction::with_roots(&f, vec![1.0]);
        assert!(matches!(
            deflated.evaluate(-4.0),
            Err(NumericalError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_numerical_derivative() {
        // (x - 1)(x - 4) deflated by 1 leaves (x - 4), slope 1
        let p = Polynomial::from_roots(&[1.0, 4.0]);
        let deflated = DeflatedFunction::with_roots(&p, vec![1.0]);
        assert!(!deflated.has_exact_derivative());
        assert_relative_eq!(deflated.derivative(2.5).unwrap(), 1.0, epsilon = 1e-7);
        assert_eq!(deflated.inner().degree(), 2);
    }
}
