//! Column and row vectors.
//!
//! Both are thin wrappers over a single-column / single-row [`Matrix`] and
//! dereference to it, so every read-only matrix operation applies. Shape
//! changing operations are not reachable through the wrappers, which keeps
//! the one-column / one-row invariant.

use super::Matrix;
use crate::types::LinalgError;
use std::ops::{Deref, Index, IndexMut};

/// A `n × 1` matrix.
///
/// # Example
///
/// ```
/// use numeric_core::math::linalg::ColumnVector;
///
/// let v = ColumnVector::new(vec![3.0, -4.0]);
/// assert_eq!(v.euclidean_norm(), 5.0);
/// assert_eq!(v.argmax_abs(), Some(1));
/// assert_eq!(v.dot(&v).unwrap(), 25.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnVector(Matrix);

/// A `1 × n` matrix.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowVector(Matrix);

fn check_same_len(
    op: &'static str,
    left: (usize, usize),
    right: (usize, usize),
    a: usize,
    b: usize,
) -> Result<(), LinalgError> {
    if a != b {
        return Err(LinalgError::DimensionMismatch { op, left, right });
    }
    Ok(())
}

fn dot_slices(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl ColumnVector {
    /// A column vector holding `values`.
    pub fn new(values: Vec<f64>) -> Self {
        let n = values.len();
        Self(Matrix::from_vec(n, 1, values).unwrap_or_default())
    }

    /// The zero vector of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self(Matrix::zeros(n, 1))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.rows()
    }

    /// Whether the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries as a slice.
    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    /// Iterator over entries.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.as_slice().iter()
    }

    /// The underlying `n × 1` matrix.
    pub fn as_matrix(&self) -> &Matrix {
        &self.0
    }

    /// Unwrap into the underlying `n × 1` matrix.
    pub fn into_matrix(self) -> Matrix {
        self.0
    }

    /// Inner product. Lengths must match.
    pub fn dot(&self, other: &ColumnVector) -> Result<f64, LinalgError> {
        check_same_len("dot", self.shape(), other.shape(), self.len(), other.len())?;
        Ok(dot_slices(self.as_slice(), other.as_slice()))
    }

    /// Outer product `self · otherᵗ`, a `self.len() × other.len()` matrix.
    pub fn outer(&self, other: &ColumnVector) -> Matrix {
        Matrix::from_fn(self.len(), other.len(), |i, j| self[i] * other[j])
    }

    /// Elementwise sum. Lengths must match.
    pub fn add(&self, other: &ColumnVector) -> Result<ColumnVector, LinalgError> {
        Ok(Self(self.0.add(&other.0)?))
    }

    /// Elementwise difference. Lengths must match.
    pub fn subtract(&self, other: &ColumnVector) -> Result<ColumnVector, LinalgError> {
        Ok(Self(self.0.subtract(&other.0)?))
    }

    /// Scalar multiple.
    pub fn scale(&self, k: f64) -> ColumnVector {
        Self(self.0.scale(k))
    }

    /// `Σ v_i²`.
    pub fn norm_squared(&self) -> f64 {
        self.iter().map(|v| v * v).sum()
    }

    /// Euclidean length.
    pub fn euclidean_norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// `max |v_i|`, zero for an empty vector.
    pub fn max_abs(&self) -> f64 {
        self.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// Index of the first entry with the largest magnitude.
    pub fn argmax_abs(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, v) in self.iter().enumerate() {
            match best {
                Some((_, m)) if v.abs() <= m => {}
                _ => best = Some((i, v.abs())),
            }
        }
        best.map(|(i, _)| i)
    }

    /// The transpose as a row vector.
    pub fn transpose(&self) -> RowVector {
        RowVector::new(self.as_slice().to_vec())
    }
}

impl RowVector {
    /// A row vector holding `values`.
    pub fn new(values: Vec<f64>) -> Self {
        let n = values.len();
        Self(Matrix::from_vec(1, n, values).unwrap_or_default())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.cols()
    }

    /// Whether the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries as a slice.
    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    /// Unwrap into the underlying `1 × n` matrix.
    pub fn into_matrix(self) -> Matrix {
        self.0
    }

    /// Inner product. Lengths must match.
    pub fn dot(&self, other: &RowVector) -> Result<f64, LinalgError> {
        check_same_len("dot", self.shape(), other.shape(), self.len(), other.len())?;
        Ok(dot_slices(self.as_slice(), other.as_slice()))
    }

    /// The transpose as a column vector.
    pub fn transpose(&self) -> ColumnVector {
        ColumnVector::new(self.as_slice().to_vec())
    }
}

impl Deref for ColumnVector {
    type Target = Matrix;

    fn deref(&self) -> &Matrix {
        &self.0
    }
}

impl Deref for RowVector {
    type Target = Matrix;

    fn deref(&self) -> &Matrix {
        &self.0
    }
}

impl Index<usize> for ColumnVector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[(i, 0)]
    }
}

impl IndexMut<usize> for ColumnVector {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0[(i, 0)]
    }
}

impl Index<usize> for RowVector {
    type Output = f64;

    fn index(&self, j: usize) -> &f64 {
        &self.0[(0, j)]
    }
}

impl IndexMut<usize> for RowVector {
    fn index_mut(&mut self, j: usize) -> &mut f64 {
        &mut self.0[(0, j)]
    }
}

impl From<Vec<f64>> for ColumnVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<Vec<f64>> for RowVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<f64> for ColumnVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<ColumnVector> for Matrix {
    fn from(v: ColumnVector) -> Self {
        v.0
    }
}

impl From<RowVector> for Matrix {
    fn from(v: RowVector) -> Self {
        v.0
    }
}

impl TryFrom<Matrix> for ColumnVector {
    type Error = LinalgError;

    fn try_from(m: Matrix) -> Result<Self, Self::Error> {
        if m.cols() != 1 {
            return Err(LinalgError::DimensionMismatch {
                op: "column vector",
                left: m.shape(),
                right: (m.rows(), 1),
            });
        }
        Ok(Self(m))
    }
}

impl TryFrom<Matrix> for RowVector {
    type Error = LinalgError;

    fn try_from(m: Matrix) -> Result<Self, Self::Error> {
        if m.rows() != 1 {
            return Err(LinalgError::DimensionMismatch {
                op: "row vector",
                left: m.shape(),
                right: (1, m.cols()),
            });
        }
        Ok(Self(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_vector_shape() {
        let v = ColumnVector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.shape(), (3, 1));
        assert_eq!(v.len(), 3);
        assert!(!v.is_empty());
        assert_eq!(v[2], 3.0);
        assert!(ColumnVector::zeros(0).is_empty());
    }

    #[test]
    fn test_row_vector_shape() {
        let r = RowVector::new(vec![1.0, 2.0]);
        assert_eq!(r.shape(), (1, 2));
        assert_eq!(r[1], 2.0);
        assert_eq!(r.transpose().shape(), (2, 1));
    }

    #[test]
    fn test_dot_requires_equal_length() {
        let a = ColumnVector::new(vec![1.0, 2.0, 3.0]);
        let b = ColumnVector::new(vec![4.0, -5.0, 6.0]);
        assert_eq!(a.dot(&b).unwrap(), 12.0);

        let short = ColumnVector::new(vec![1.0]);
        assert!(matches!(
            a.dot(&short),
            Err(LinalgError::DimensionMismatch { op: "dot", .. })
        ));

        let r = RowVector::new(vec![1.0, 1.0]);
        assert_eq!(r.dot(&r).unwrap(), 2.0);
        assert!(r.dot(&RowVector::new(vec![1.0])).is_err());
    }

    #[test]
    fn test_outer_product() {
        let u = ColumnVector::new(vec![1.0, 2.0]);
        let v = ColumnVector::new(vec![3.0, 4.0, 5.0]);
        let m = u.outer(&v);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.row(1), &[6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_arithmetic() {
        let a = ColumnVector::new(vec![1.0, 2.0]);
        let b = ColumnVector::new(vec![0.5, -1.0]);
        assert_eq!(a.add(&b).unwrap().as_slice(), &[1.5, 1.0]);
        assert_eq!(a.subtract(&b).unwrap().as_slice(), &[0.5, 3.0]);
        assert_eq!(a.scale(2.0).as_slice(), &[2.0, 4.0]);
        assert!(a.add(&ColumnVector::zeros(3)).is_err());
    }

    #[test]
    fn test_magnitudes() {
        let v = ColumnVector::new(vec![-7.0, 2.0, 7.0]);
        assert_eq!(v.max_abs(), 7.0);
        // First of the tied entries
        assert_eq!(v.argmax_abs(), Some(0));
        assert_eq!(v.norm_squared(), 102.0);
        assert_eq!(ColumnVector::zeros(0).argmax_abs(), None);
    }

    #[test]
    fn test_conversions() {
        let m = Matrix::from_vec(2, 1, vec![1.0, 2.0]).unwrap();
        let v = ColumnVector::try_from(m.clone()).unwrap();
        assert_eq!(Matrix::from(v), m);

        assert!(ColumnVector::try_from(Matrix::zeros(2, 2)).is_err());
        assert!(RowVector::try_from(Matrix::zeros(1, 4)).is_ok());
        assert!(RowVector::try_from(Matrix::zeros(2, 4)).is_err());

        let collected: ColumnVector = (0..3).map(|i| i as f64).collect();
        assert_eq!(collected.as_slice(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_index_mut() {
        let mut v = ColumnVector::zeros(2);
        v[1] = 9.0;
        assert_eq!(v.as_slice(), &[0.0, 9.0]);

        let mut r = RowVector::new(vec![0.0, 0.0]);
        r[0] = -1.0;
        assert_eq!(r.as_slice(), &[-1.0, 0.0]);
    }
}
