//! Dense row-major matrices.

use super::{ColumnVector, MatrixFormat, RowVector};
use crate::types::LinalgError;
use std::fmt;
use std::ops::{Index, IndexMut};

/// A dense `rows × cols` matrix of `f64`.
///
/// Storage is a single row-major buffer. The shape only changes through
/// [`add_row`](Self::add_row) and [`add_column`](Self::add_column), which
/// copy into a freshly allocated buffer.
///
/// Binary operations validate shapes and fail with
/// [`LinalgError::DimensionMismatch`] instead of truncating or padding.
///
/// # Example
///
/// ```
/// use numeric_core::math::linalg::Matrix;
///
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let b = Matrix::identity(2);
///
/// assert_eq!(a.multiply(&b).unwrap(), a);
/// assert_eq!(a.transpose()[(0, 1)], 3.0);
/// assert!(a.multiply(&Matrix::zeros(3, 1)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// A `rows × cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// The `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// A square matrix with `values` on the diagonal.
    pub fn diagonal(values: &[f64]) -> Self {
        let n = values.len();
        Self::from_fn(n, n, |i, j| if i == j { values[i] } else { 0.0 })
    }

    /// Build a matrix whose element `(i, j)` is `f(i, j)`.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Wrap a row-major buffer.
    ///
    /// # Errors
    ///
    /// [`LinalgError::InvalidShape`] if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, LinalgError> {
        if data.len() != rows * cols {
            return Err(LinalgError::InvalidShape {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from nested rows.
    ///
    /// An empty outer vector gives a `0 × 0` matrix.
    ///
    /// # Errors
    ///
    /// [`LinalgError::RaggedRows`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, LinalgError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);

        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(LinalgError::RaggedRows {
                    row: i,
                    len: row.len(),
                    expected: n_cols,
                });
            }
            data.extend(row);
        }

        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Stack column vectors side by side.
    ///
    /// # Errors
    ///
    /// [`LinalgError::DimensionMismatch`] if the columns differ in length.
    pub fn from_columns(columns: &[ColumnVector]) -> Result<Self, LinalgError> {
        let n_rows = columns.first().map_or(0, ColumnVector::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != n_rows) {
            return Err(LinalgError::DimensionMismatch {
                op: "from_columns",
                left: (n_rows, 1),
                right: (bad.len(), 1),
            });
        }
        Ok(Self::from_fn(n_rows, columns.len(), |i, j| columns[j][i]))
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether the matrix has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `rows == cols`.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The row-major buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Element `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.rows, "Row index {} out of bounds {}", i, self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Row `i` copied into a [`RowVector`].
    pub fn row_vector(&self, i: usize) -> RowVector {
        RowVector::new(self.row(i).to_vec())
    }

    /// Column `j` copied into a [`ColumnVector`].
    ///
    /// # Panics
    ///
    /// Panics if `j >= cols`.
    pub fn column(&self, j: usize) -> ColumnVector {
        assert!(j < self.cols, "Column index {} out of bounds {}", j, self.cols);
        (0..self.rows).map(|i| self.data[i * self.cols + j]).collect()
    }

    /// The transpose.
    pub fn transpose(&self) -> Matrix {
        Self::from_fn(self.cols, self.rows, |i, j| self[(j, i)])
    }

    fn check_same_shape(&self, other: &Matrix, op: &'static str) -> Result<(), LinalgError> {
        if self.shape() != other.shape() {
            return Err(LinalgError::DimensionMismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    fn zip_with<F>(&self, other: &Matrix, op: &'static str, f: F) -> Result<Matrix, LinalgError>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.check_same_shape(other, op)?;
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Elementwise sum. Shapes must match.
    pub fn add(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Elementwise difference. Shapes must match.
    pub fn subtract(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    /// Elementwise (Hadamard) product. Shapes must match.
    pub fn mask(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        self.zip_with(other, "mask", |a, b| a * b)
    }

    /// Scalar multiple `k · self`.
    pub fn scale(&self, k: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|a| k * a).collect(),
        }
    }

    /// Matrix product `self · other`.
    ///
    /// # Errors
    ///
    /// [`LinalgError::DimensionMismatch`] unless `self.cols() == other.rows()`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        if self.cols != other.rows {
            return Err(LinalgError::DimensionMismatch {
                op: "multiply",
                left: self.shape(),
                right: other.shape(),
            });
        }

        let mut data = vec![0.0; self.rows * other.cols];
        let width = other.cols.max(1);

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            data.par_chunks_mut(width)
                .enumerate()
                .for_each(|(i, out)| self.multiply_row(other, i, out));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for (i, out) in data.chunks_mut(width).enumerate() {
                self.multiply_row(other, i, out);
            }
        }

        Ok(Matrix {
            rows: self.rows,
            cols: other.cols,
            data,
        })
    }

    /// Row `i` of `self · other` written into `out`.
    fn multiply_row(&self, other: &Matrix, i: usize, out: &mut [f64]) {
        let lhs = self.row(i);
        for (j, cell) in out.iter_mut().enumerate() {
            *cell = lhs
                .iter()
                .enumerate()
                .map(|(k, &a)| a * other.data[k * other.cols + j])
                .sum();
        }
    }

    /// Matrix-vector product `self · v`.
    pub fn mul_vector(&self, v: &ColumnVector) -> Result<ColumnVector, LinalgError> {
        if self.cols != v.len() {
            return Err(LinalgError::DimensionMismatch {
                op: "mul_vector",
                left: self.shape(),
                right: v.shape(),
            });
        }
        Ok((0..self.rows)
            .map(|i| {
                self.row(i)
                    .iter()
                    .zip(v.as_slice())
                    .map(|(a, b)| a * b)
                    .sum::<f64>()
            })
            .collect())
    }

    /// Maximum absolute row sum `max_i Σ_j |a_ij|`.
    pub fn max_row_sum_norm(&self) -> f64 {
        (0..self.rows)
            .map(|i| self.row(i).iter().map(|a| a.abs()).sum::<f64>())
            .fold(0.0, f64::max)
    }

    /// Maximum absolute column sum `max_j Σ_i |a_ij|`.
    pub fn max_column_sum_norm(&self) -> f64 {
        (0..self.cols)
            .map(|j| (0..self.rows).map(|i| self[(i, j)].abs()).sum::<f64>())
            .fold(0.0, f64::max)
    }

    /// Frobenius norm `sqrt(Σ a_ij²)`.
    pub fn frobenius_norm(&self) -> f64 {
        self.data.iter().map(|a| a * a).sum::<f64>().sqrt()
    }

    /// Legacy "1-norm": the maximum absolute row sum.
    ///
    /// Kept identical to [`norm2`](Self::norm2) for compatibility with
    /// existing results. Use [`max_column_sum_norm`](Self::max_column_sum_norm)
    /// for the induced 1-norm.
    pub fn norm1(&self) -> f64 {
        self.max_row_sum_norm()
    }

    /// Legacy "2-norm": the maximum absolute row sum, same as
    /// [`norm1`](Self::norm1). Use [`frobenius_norm`](Self::frobenius_norm)
    /// for an Euclidean-type norm.
    pub fn norm2(&self) -> f64 {
        self.max_row_sum_norm()
    }

    /// Legacy "infinity norm": the maximum absolute column sum.
    pub fn norm_inf(&self) -> f64 {
        self.max_column_sum_norm()
    }

    /// Append a row, growing the matrix to `(rows + 1) × cols`.
    ///
    /// An empty `0 × 0` matrix adopts the row's length.
    ///
    /// # Errors
    ///
    /// [`LinalgError::DimensionMismatch`] if `row.len() != cols`.
    pub fn add_row(&mut self, row: &[f64]) -> Result<(), LinalgError> {
        let cols = if self.shape() == (0, 0) {
            row.len()
        } else {
            self.cols
        };
        if row.len() != cols {
            return Err(LinalgError::DimensionMismatch {
                op: "add_row",
                left: self.shape(),
                right: (1, row.len()),
            });
        }

        let mut data = Vec::with_capacity(self.data.len() + row.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(row);

        self.data = data;
        self.rows += 1;
        self.cols = cols;
        Ok(())
    }

    /// Append a column, growing the matrix to `rows × (cols + 1)`.
    ///
    /// An empty `0 × 0` matrix adopts the column's length.
    ///
    /// # Errors
    ///
    /// [`LinalgError::DimensionMismatch`] if `column.len() != rows`.
    pub fn add_column(&mut self, column: &[f64]) -> Result<(), LinalgError> {
        let rows = if self.shape() == (0, 0) {
            column.len()
        } else {
            self.rows
        };
        if column.len() != rows {
            return Err(LinalgError::DimensionMismatch {
                op: "add_column",
                left: self.shape(),
                right: (column.len(), 1),
            });
        }

        let cols = self.cols + 1;
        let mut data = Vec::with_capacity(rows * cols);
        for (i, &value) in column.iter().enumerate() {
            if self.cols > 0 {
                data.extend_from_slice(self.row(i));
            }
            data.push(value);
        }

        self.data = data;
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    /// Render with custom delimiters.
    ///
    /// ```
    /// use numeric_core::math::linalg::{Matrix, MatrixFormat};
    ///
    /// let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// let text = m.format_with(&MatrixFormat::new("{", "}", " ").with_row_separator(";"));
    /// assert_eq!(text, "{1 2};{3 4}");
    /// ```
    pub fn format_with(&self, format: &MatrixFormat) -> String {
        let mut out = String::new();
        for i in 0..self.rows {
            if i > 0 {
                out.push_str(&format.row_separator);
            }
            out.push_str(&format.begin);
            let cells: Vec<String> = self.row(i).iter().map(|v| v.to_string()).collect();
            out.push_str(&cells.join(&format.separator));
            out.push_str(&format.end);
        }
        out
    }
}

/// Remove a known eigenpair from a square matrix (Hotelling deflation).
///
/// Returns `M - λ · v vᵗ / ‖v‖²`. For a symmetric `M` and a true eigenpair
/// `(λ, v)`, the result has the same eigenvectors with `λ` replaced by zero,
/// so power iteration on it finds the next eigenpair.
///
/// # Errors
///
/// - [`LinalgError::NotSquare`] if `matrix` is not square
/// - [`LinalgError::DimensionMismatch`] if `eigenvector` has the wrong length
/// - [`LinalgError::ZeroVector`] if `eigenvector` is zero
///
/// # Example
///
/// ```
/// use numeric_core::math::linalg::{deflate, ColumnVector, Matrix};
///
/// let m = Matrix::diagonal(&[5.0, 3.0]);
/// let v = ColumnVector::new(vec![1.0, 0.0]);
/// let d = deflate(&m, &v, 5.0).unwrap();
/// assert_eq!(d, Matrix::diagonal(&[0.0, 3.0]));
/// ```
pub fn deflate(
    matrix: &Matrix,
    eigenvector: &ColumnVector,
    eigenvalue: f64,
) -> Result<Matrix, LinalgError> {
    if !matrix.is_square() {
        return Err(LinalgError::NotSquare {
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }
    if eigenvector.len() != matrix.rows() {
        return Err(LinalgError::DimensionMismatch {
            op: "deflate",
            left: matrix.shape(),
            right: eigenvector.shape(),
        });
    }

    let norm_squared = eigenvector.norm_squared();
    if norm_squared == 0.0 {
        return Err(LinalgError::ZeroVector);
    }

    let projector = eigenvector.outer(eigenvector);
    matrix.subtract(&projector.scale(eigenvalue / norm_squared))
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.rows, "Row index {} out of bounds {}", row, self.rows);
        assert!(col < self.cols, "Column index {} out of bounds {}", col, self.cols);
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(row < self.rows, "Row index {} out of bounds {}", row, self.rows);
        assert!(col < self.cols, "Column index {} out of bounds {}", col, self.cols);
        &mut self.data[row * self.cols + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(&MatrixFormat::default()))
    }
}
