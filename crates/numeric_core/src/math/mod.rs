//! Numerical algorithms.
//!
//! - `function`: Scalar functions, numerical derivatives and root deflation
//! - `linalg`: Dense matrices and vectors
//! - `solvers`: One-dimensional root finders
//! - `eigen`: Power iteration eigensolver

pub mod eigen;
pub mod function;
pub mod linalg;
pub mod solvers;
