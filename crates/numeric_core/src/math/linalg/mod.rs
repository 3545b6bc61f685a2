//! Dense linear algebra.
//!
//! This module provides:
//! - [`Matrix`]: row-major `rows × cols` storage with checked arithmetic
//! - [`ColumnVector`] / [`RowVector`]: single-column / single-row matrices
//! - [`deflate`]: removal of a known eigenpair
//! - [`MatrixFormat`]: delimiters for text rendering
//!
//! Only small and medium dense problems are in scope. With the `parallel`
//! feature, rows of a matrix product are computed on the rayon pool; the
//! summation order inside each element is unchanged.

mod format;
mod matrix;
mod vector;

pub use format::MatrixFormat;
pub use matrix::{deflate, Matrix};
pub use vector::{ColumnVector, RowVector};
