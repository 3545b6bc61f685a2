//! Conversions between raw pixel buffers and linear algebra types.

use crate::math::linalg::{ColumnVector, Matrix};
use crate::types::LinalgError;
use num_traits::ToPrimitive;

fn to_real<P: ToPrimitive>(p: &P) -> f64 {
    p.to_f64().unwrap_or(f64::NAN)
}

impl ColumnVector {
    /// Flatten a pixel buffer (any primitive numeric type) into a column vector.
    ///
    /// ```
    /// use numeric_core::math::linalg::ColumnVector;
    ///
    /// let v = ColumnVector::from_pixels(&[0u8, 128, 255]);
    /// assert_eq!(v.as_slice(), &[0.0, 128.0, 255.0]);
    /// ```
    pub fn from_pixels<P: ToPrimitive>(pixels: &[P]) -> Self {
        pixels.iter().map(to_real).collect()
    }

    /// Stretch the entries linearly onto `0..=255`.
    ///
    /// The smallest entry maps to 0 and the largest to 255; a constant
    /// vector maps to all zeros. Used to view eigenfaces as images.
    pub fn to_gray_pixels(&self) -> Vec<u8> {
        let (min, max) = self
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let range = max - min;
        if !(range > 0.0 && range.is_finite()) {
            return vec![0; self.len()];
        }
        self.iter()
            .map(|&v| ((v - min) / range * 255.0).round().clamp(0.0, 255.0) as u8)
            .collect()
    }
}

impl Matrix {
    /// A `height × width` matrix from a row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::InvalidShape`] if `pixels.len() != width * height`.
    ///
    /// ```
    /// use numeric_core::math::linalg::Matrix;
    ///
    /// let m = Matrix::from_pixels(2, 3, &[1u16, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(m.shape(), (3, 2));
    /// assert_eq!(m.row(2), &[5.0, 6.0]);
    /// ```
    pub fn from_pixels<P: ToPrimitive>(
        width: usize,
        height: usize,
        pixels: &[P],
    ) -> Result<Self, LinalgError> {
        Matrix::from_vec(height, width, pixels.iter().map(to_real).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_from_pixels_types() {
        assert_eq!(
            ColumnVector::from_pixels(&[1u8, 2, 3]).as_slice(),
            &[1.0, 2.0, 3.0]
        );
        assert_eq!(
            ColumnVector::from_pixels(&[-1i32, 7]).as_slice(),
            &[-1.0, 7.0]
        );
        assert_eq!(ColumnVector::from_pixels(&[0.5f32]).as_slice(), &[0.5]);
        assert!(ColumnVector::from_pixels::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_matrix_from_pixels_shape_check() {
        let m = Matrix::from_pixels(3, 1, &[9u8, 8, 7]).unwrap();
        assert_eq!(m.shape(), (1, 3));

        assert_eq!(
            Matrix::from_pixels(2, 2, &[1u8, 2, 3]),
            Err(LinalgError::InvalidShape {
                rows: 2,
                cols: 2,
                len: 3
            })
        );
    }

    #[test]
    fn test_to_gray_pixels() {
        let v = ColumnVector::new(vec![-1.0, 0.0, 1.0]);
        assert_eq!(v.to_gray_pixels(), vec![0, 128, 255]);

        let flat = ColumnVector::new(vec![3.0, 3.0]);
        assert_eq!(flat.to_gray_pixels(), vec![0, 0]);
    }
}
