//! The scalar function abstraction and its numerical derivative.

use crate::types::NumericalError;
use std::sync::Arc;

/// Base step for the default numerical derivative.
pub const DEFAULT_STEP: f64 = 1e-4;

/// Extrapolation depth (both halvings and Richardson order) for the default
/// numerical derivative.
pub const DEFAULT_ORDER: u32 = 5;

/// A real function of one real variable.
///
/// Evaluation must be pure: solvers re-evaluate freely and in any order.
///
/// # Example
///
/// ```
/// use numeric_core::math::function::ScalarFunction;
/// use numeric_core::types::NumericalError;
///
/// struct Reciprocal;
///
/// impl ScalarFunction for Reciprocal {
///     fn evaluate(&self, x: f64) -> Result<f64, NumericalError> {
///         if x == 0.0 {
///             return Err(NumericalError::DivisionByZero { x });
///         }
///         Ok(1.0 / x)
///     }
/// }
///
/// assert!(Reciprocal.evaluate(0.0).is_err());
/// assert!((Reciprocal.derivative(2.0).unwrap() + 0.25).abs() < 1e-8);
/// ```
pub trait ScalarFunction {
    /// Evaluate `f(x)`.
    ///
    /// Fails with [`NumericalError`] where the function is undefined.
    fn evaluate(&self, x: f64) -> Result<f64, NumericalError>;

    /// Evaluate `f'(x)`.
    ///
    /// Defaults to [`richardson_derivative`] with [`DEFAULT_STEP`] and
    /// [`DEFAULT_ORDER`]. Override together with
    /// [`has_exact_derivative`](Self::has_exact_derivative) when the
    /// derivative is known in closed form.
    fn derivative(&self, x: f64) -> Result<f64, NumericalError> {
        richardson_derivative(self, x, DEFAULT_STEP, DEFAULT_ORDER, DEFAULT_ORDER)
    }

    /// Whether [`derivative`](Self::derivative) is exact rather than approximated.
    fn has_exact_derivative(&self) -> bool {
        false
    }
}

impl<T: ScalarFunction + ?Sized> ScalarFunction for &T {
    fn evaluate(&self, x: f64) -> Result<f64, NumericalError> {
        (**self).evaluate(x)
    }

    fn derivative(&self, x: f64) -> Result<f64, NumericalError> {
        (**self).derivative(x)
    }

    fn has_exact_derivative(&self) -> bool {
        (**self).has_exact_derivative()
    }
}

impl<T: ScalarFunction + ?Sized> ScalarFunction for Box<T> {
    fn evaluate(&self, x: f64) -> Result<f64, NumericalError> {
        (**self).evaluate(x)
    }

    fn derivative(&self, x: f64) -> Result<f64, NumericalError> {
        (**self).derivative(x)
    }

    fn has_exact_derivative(&self) -> bool {
        (**self).has_exact_derivative()
    }
}

impl<T: ScalarFunction + ?Sized> ScalarFunction for Arc<T> {
    fn evaluate(&self, x: f64) -> Result<f64, NumericalError> {
        (**self).evaluate(x)
    }

    fn derivative(&self, x: f64) -> Result<f64, NumericalError> {
        (**self).derivative(x)
    }

    fn has_exact_derivative(&self) -> bool {
        (**self).has_exact_derivative()
    }
}

/// Central difference `(f(x+h) - f(x-h)) / 2h`.
fn central_difference<F: ScalarFunction + ?Sized>(
    f: &F,
    x: f64,
    h: f64,
) -> Result<f64, NumericalError> {
    Ok((f.evaluate(x + h)? - f.evaluate(x - h)?) / (2.0 * h))
}

/// Richardson-extrapolated derivative `D(n, m)`.
///
/// # Mathematical Definition
/// ```text
/// D(i, 0) = (f(x + h/2^i) - f(x - h/2^i)) / (2 h/2^i)
/// D(i, k) = D(i, k-1) + (D(i, k-1) - D(i-1, k-1)) / (4^k - 1)
/// ```
///
/// The tableau is filled bottom-up, so each central difference is evaluated
/// once (`2(n+1)` function evaluations). `m` is clamped to `n`.
///
/// # Arguments
/// * `f` - Function to differentiate
/// * `x` - Point of evaluation
/// * `h` - Base step (must be positive)
/// * `n` - Number of step halvings
/// * `m` - Extrapolation order
///
/// # Examples
/// ```
/// use numeric_core::math::function::{richardson_derivative, FnFunction};
///
/// let f = FnFunction::new(|x: f64| x.exp());
/// let d = richardson_derivative(&f, 1.0, 1e-2, 4, 4).unwrap();
/// assert!((d - 1.0_f64.exp()).abs() < 1e-9);
/// ```
pub fn richardson_derivative<F: ScalarFunction + ?Sized>(
    f: &F,
    x: f64,
    h: f64,
    n: u32,
    m: u32,
) -> Result<f64, NumericalError> {
    let n = n as usize;
    let m = (m as usize).min(n);

    let mut tableau = Vec::with_capacity(n + 1);
    let mut step = h;
    for _ in 0..=n {
        tableau.push(central_difference(f, x, step)?);
        step /= 2.0;
    }

    let mut factor = 1.0;
    for k in 1..=m {
        factor *= 4.0;
        // Descending so tableau[i - 1] still holds column k - 1.
        for i in (k..=n).rev() {
            tableau[i] += (tableau[i] - tableau[i - 1]) / (factor - 1.0);
        }
    }

    Ok(tableau[n])
}

fn check_finite(x: f64, value: f64) -> Result<f64, NumericalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumericalError::NonFinite { x, value })
    }
}

/// A closure as a [`ScalarFunction`] with a numerical derivative.
///
/// NaN or infinite results are reported as [`NumericalError::NonFinite`].
#[derive(Clone, Copy)]
pub struct FnFunction<F> {
    f: F,
}

impl<F> FnFunction<F>
where
    F: Fn(f64) -> f64,
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> ScalarFunction for FnFunction<F>
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> Result<f64, NumericalError> {
        check_finite(x, (self.f)(x))
    }
}

/// A closure paired with its exact derivative.
#[derive(Clone, Copy)]
pub struct FnWithDerivative<F, G> {
    f: F,
    df: G,
}

impl<F, G> FnWithDerivative<F, G>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    /// Wrap a function `f` and its derivative `df`.
    pub fn new(f: F, df: G) -> Self {
        Self { f, df }
    }
}

impl<F, G> ScalarFunction for FnWithDerivative<F, G>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> Result<f64, NumericalError> {
        check_finite(x, (self.f)(x))
    }

    fn derivative(&self, x: f64) -> Result<f64, NumericalError> {
        check_finite(x, (self.df)(x))
    }

    fn has_exact_derivative(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_derivative_polynomial() {
        let f = FnFunction::new(|x: f64| x * x * x - 2.0 * x);
        // f'(x) = 3x² - 2
        for &x in &[-2.0, -0.5, 0.0, 1.0, 3.0] {
            let d = f.derivative(x).unwrap();
            assert_relative_eq!(d, 3.0 * x * x - 2.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_default_derivative_transcendental() {
        let f = FnFunction::new(|x: f64| x.sin());
        for &x in &[0.0, 0.5, 1.0, 2.5] {
            let d = f.derivative(x).unwrap();
            assert_relative_eq!(d, x.cos(), epsilon = 1e-8);
        }

        let g = FnFunction::new(|x: f64| x.exp());
        assert_relative_eq!(g.derivative(1.0).unwrap(), 1.0_f64.exp(), epsilon = 1e-8);
    }

    #[test]
    fn test_even_function_has_zero_derivative_at_origin() {
        // Central differences of an even function cancel exactly.
        let f = FnFunction::new(|x: f64| x * x);
        assert_eq!(f.derivative(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_richardson_order_zero_is_central_difference() {
        let f = FnFunction::new(|x: f64| x * x * x);
        let d = richardson_derivative(&f, 1.0, 0.1, 0, 0).unwrap();
        // (1.1³ - 0.9³) / 0.2 = 3.01
        assert_relative_eq!(d, 3.01, epsilon = 1e-12);
    }

    #[test]
    fn test_richardson_improves_on_central_difference() {
        let f = FnFunction::new(|x: f64| x.exp());
        let exact = 1.0_f64.exp();

        let plain = richardson_derivative(&f, 1.0, 0.1, 0, 0).unwrap();
        let extrapolated = richardson_derivative(&f, 1.0, 0.1, 3, 3).unwrap();

        assert!((extrapolated - exact).abs() < (plain - exact).abs());
        assert!((extrapolated - exact).abs() < 1e-10);
    }

    #[test]
    fn test_richardson_clamps_order() {
        let f = FnFunction::new(|x: f64| x.exp());
        let clamped = richardson_derivative(&f, 0.0, 0.1, 2, 10).unwrap();
        let explicit = richardson_derivative(&f, 0.0, 0.1, 2, 2).unwrap();
        assert_eq!(clamped, explicit);
    }

    #[test]
    fn test_derivative_propagates_evaluation_error() {
        let f = FnFunction::new(|x: f64| x.ln());
        // ln(-1e-4) is NaN
        let result = f.derivative(0.0);
        assert!(matches!(result, Err(NumericalError::NonFinite { .. })));
    }

    #[test]
    fn test_fn_function_non_finite() {
        let f = FnFunction::new(|x: f64| 1.0 / x);
        match f.evaluate(0.0) {
            Err(NumericalError::NonFinite { x, value }) => {
                assert_eq!(x, 0.0);
                assert!(value.is_infinite());
            }
            other => panic!("Expected NonFinite error, got {:?}", other),
        }
        assert!(!f.has_exact_derivative());
    }

    #[test]
    fn test_fn_with_derivative_is_exact() {
        let f = FnWithDerivative::new(|x: f64| x * x - 2.0, |x: f64| 2.0 * x);
        assert!(f.has_exact_derivative());
        assert_eq!(f.evaluate(3.0).unwrap(), 7.0);
        assert_eq!(f.derivative(3.0).unwrap(), 6.0);
    }

    #[test]
    fn test_forwarding_impls() {
        let f = FnWithDerivative::new(|x: f64| 2.0 * x, |_x: f64| 2.0);

        let by_ref: &dyn ScalarFunction = &f;
        assert_eq!(by_ref.evaluate(1.5).unwrap(), 3.0);
        assert!(by_ref.has_exact_derivative());

        let boxed: Box<dyn ScalarFunction> = Box::new(f);
        assert_eq!(boxed.derivative(0.0).unwrap(), 2.0);

        let shared = Arc::new(f);
        assert_eq!(shared.evaluate(-1.0).unwrap(), -2.0);
        assert!(shared.has_exact_derivative());
    }
}
