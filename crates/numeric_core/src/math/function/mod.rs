//! Scalar functions of one real variable.
//!
//! [`ScalarFunction`] is the seam every root finder consumes. Implementors
//! only need `evaluate`; the derivative defaults to a Richardson-extrapolated
//! central difference (see [`richardson_derivative`]).
//!
//! ## Implementations
//!
//! - [`FnFunction`]: wraps a closure, numerical derivative
//! - [`FnWithDerivative`]: wraps a closure and its exact derivative
//! - [`Polynomial`]: dense coefficients with an exact derivative
//! - [`DeflatedFunction`]: divides known roots out of another function
//!
//! ## Examples
//!
//! ```
//! use numeric_core::math::function::{FnFunction, ScalarFunction};
//!
//! let f = FnFunction::new(|x: f64| x.sin());
//! let d = f.derivative(0.0).unwrap();
//! assert!((d - 1.0).abs() < 1e-10);
//! ```

mod deflated;
mod polynomial;
mod scalar;

pub use deflated::{DeflatedFunction, COLLISION_OFFSET};
pub use polynomial::Polynomial;
pub use scalar::{
    richardson_derivative, FnFunction, FnWithDerivative, ScalarFunction, DEFAULT_ORDER,
    DEFAULT_STEP,
};
