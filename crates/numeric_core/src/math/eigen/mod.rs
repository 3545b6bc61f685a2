//! Eigenpair extraction for dense matrices.
//!
//! - [`PowerIteration`]: dominant eigenpair by repeated multiply-and-normalize,
//!   and successive eigenpairs by [`deflate`](crate::math::linalg::deflate)
//!
//! ## Examples
//!
//! ```
//! use numeric_core::math::eigen::PowerIteration;
//! use numeric_core::math::linalg::{ColumnVector, Matrix};
//!
//! let m = Matrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 2.0]]).unwrap();
//! let start = ColumnVector::new(vec![1.0, 0.0]);
//!
//! let pairs = PowerIteration::with_defaults().extract(&m, 2, &start).unwrap();
//! assert!((pairs[0].eigenvalue - 3.0).abs() < 1e-8);
//! assert!((pairs[1].eigenvalue - 1.0).abs() < 1e-8);
//! ```

mod power_iteration;

pub use power_iteration::{ConvergenceCriterion, EigenResult, PowerIteration, PowerIterationConfig};
