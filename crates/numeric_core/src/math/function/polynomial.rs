//! Dense polynomials.

use super::ScalarFunction;
use crate::types::NumericalError;
use std::fmt;

/// A real polynomial with coefficients stored highest degree first.
///
/// `[1.0, 0.0, -2.0]` is `x² - 2`. Evaluation uses Horner's scheme and the
/// derivative is exact.
///
/// # Example
///
/// ```
/// use numeric_core::math::function::{Polynomial, ScalarFunction};
///
/// let p = Polynomial::new(vec![1.0, 0.0, -2.0]);
/// assert_eq!(p.evaluate(3.0).unwrap(), 7.0);
/// assert_eq!(p.derivative(3.0).unwrap(), 6.0);
/// assert!(p.has_exact_derivative());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from coefficients, highest degree first.
    ///
    /// Leading zeros are dropped; an empty list is the zero polynomial.
    pub fn new(coefficients: Vec<f64>) -> Self {
        let first_nonzero = coefficients
            .iter()
            .position(|&c| c != 0.0)
            .unwrap_or(coefficients.len());
        Self {
            coefficients: coefficients[first_nonzero..].to_vec(),
        }
    }

    /// Build the monic polynomial `Π (x - r_i)` with the given roots.
    ///
    /// ```
    /// use numeric_core::math::function::{Polynomial, ScalarFunction};
    ///
    /// let p = Polynomial::from_roots(&[1.0, 2.0]);
    /// assert_eq!(p.coefficients(), &[1.0, -3.0, 2.0]);
    /// ```
    pub fn from_roots(roots: &[f64]) -> Self {
        let mut coefficients = vec![1.0];
        for &r in roots {
            let mut next = coefficients.clone();
            next.push(0.0);
            for (i, c) in coefficients.iter().enumerate() {
                next[i + 1] -= r * c;
            }
            coefficients = next;
        }
        Self { coefficients }
    }

    /// Coefficients, highest degree first.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Degree of the polynomial; the zero polynomial reports 0.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// The derivative polynomial.
    pub fn differentiate(&self) -> Polynomial {
        let degree = self.degree();
        let coefficients = self
            .coefficients
            .iter()
            .take(degree)
            .enumerate()
            .map(|(i, c)| c * (degree - i) as f64)
            .collect();
        Polynomial::new(coefficients)
    }

    fn horner(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, c| acc * x + c)
    }
}

impl ScalarFunction for Polynomial {
    fn evaluate(&self, x: f64) -> Result<f64, NumericalError> {
        let value = self.horner(x);
        if !value.is_finite() {
            return Err(NumericalError::NonFinite { x, value });
        }
        Ok(value)
    }

    fn derivative(&self, x: f64) -> Result<f64, NumericalError> {
        self.differentiate().evaluate(x)
    }

    fn has_exact_derivative(&self) -> bool {
        true
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficients.is_empty() {
            return write!(f, "0");
        }
        let degree = self.degree();
        let mut first = true;
        for (i, &c) in self.coefficients.iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            let power = degree - i;
            if first {
                if c < 0.0 {
                    write!(f, "-")?;
                }
                first = false;
            } else if c < 0.0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            let magnitude = c.abs();
            match power {
                0 => write!(f, "{}", magnitude)?,
                _ if magnitude != 1.0 => write!(f, "{}", magnitude)?,
                _ => {}
            }
            match power {
                0 => {}
                1 => write!(f, "x")?,
                p => write!(f, "x^{}", p)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_leading_zeros() {
        let p = Polynomial::new(vec![0.0, 0.0, 2.0, 1.0]);
        assert_eq!(p.coefficients(), &[2.0, 1.0]);
        assert_eq!(p.degree(), 1);
    }

    #[test]
    fn test_zero_polynomial() {
        let p = Polynomial::new(vec![]);
        assert_eq!(p.degree(), 0);
        assert_eq!(p.evaluate(5.0).unwrap(), 0.0);
        assert_eq!(p.derivative(5.0).unwrap(), 0.0);
        assert_eq!(format!("{}", p), "0");
    }

    #[test]
    fn test_horner_evaluation() {
        // 2x³ - 3x + 1
        let p = Polynomial::new(vec![2.0, 0.0, -3.0, 1.0]);
        assert_eq!(p.evaluate(0.0).unwrap(), 1.0);
        assert_eq!(p.evaluate(2.0).unwrap(), 11.0);
        assert_eq!(p.evaluate(-1.0).unwrap(), 2.0);
    }

    #[test]
    fn test_differentiate() {
        // d/dx (2x³ - 3x + 1) = 6x² - 3
        let p = Polynomial::new(vec![2.0, 0.0, -3.0, 1.0]);
        assert_eq!(p.differentiate().coefficients(), &[6.0, 0.0, -3.0]);
        assert_eq!(p.derivative(2.0).unwrap(), 21.0);

        let constant = Polynomial::new(vec![4.0]);
        assert!(constant.differentiate().coefficients().is_empty());
    }

    #[test]
    fn test_from_roots() {
        let p = Polynomial::from_roots(&[1.0, -2.0, 3.0]);
        for &r in &[1.0, -2.0, 3.0] {
            assert_eq!(p.evaluate(r).unwrap(), 0.0);
        }
        assert_eq!(p.degree(), 3);
    }

    #[test]
    fn test_overflow_is_non_finite() {
        let p = Polynomial::new(vec![1.0, 0.0, 0.0, 0.0]);
        assert!(matches!(
            p.evaluate(1e200),
            Err(NumericalError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", Polynomial::new(vec![1.0, 0.0, -2.0])),
            "x^2 - 2"
        );
        assert_eq!(
            format!("{}", Polynomial::new(vec![-3.0, 1.0, 0.5])),
            "-3x^2 + x + 0.5"
        );
    }
}
