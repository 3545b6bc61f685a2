//! Error types for structured error handling.
//!
//! This module provides:
//! - `NumericalError`: Ill-defined function evaluations
//! - `LinalgError`: Shape violations in matrix and vector operations
//! - `SolverError`: Invalid inputs to root-finding solvers
//! - `RecognitionError`: Errors from eigenface training and matching

use thiserror::Error;

/// Errors raised while evaluating a scalar function.
///
/// # Examples
/// ```
/// use numeric_core::types::NumericalError;
///
/// let err = NumericalError::DivisionByZero { x: 1.5 };
/// assert_eq!(format!("{}", err), "Division by zero at x = 1.5");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericalError {
    /// A denominator evaluated to exactly zero.
    #[error("Division by zero at x = {x}")]
    DivisionByZero {
        /// The point of evaluation
        x: f64,
    },

    /// The function is not defined at this point (domain error).
    #[error("Function undefined at x = {x}: {reason}")]
    Undefined {
        /// The point of evaluation
        x: f64,
        /// Human-readable explanation
        reason: String,
    },

    /// Evaluation produced NaN or an infinity.
    #[error("Non-finite value {value} at x = {x}")]
    NonFinite {
        /// The point of evaluation
        x: f64,
        /// The offending value
        value: f64,
    },
}

/// Linear algebra errors.
///
/// Shape violations are programmer errors: operations fail immediately
/// rather than truncating or padding their operands.
///
/// # Examples
/// ```
/// use numeric_core::types::LinalgError;
///
/// let err = LinalgError::DimensionMismatch { op: "add", left: (2, 3), right: (3, 2) };
/// assert!(format!("{}", err).contains("(2, 3) vs (3, 2)"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinalgError {
    /// Operand shapes are incompatible for the operation.
    #[error("Dimension mismatch in {op}: {left:?} vs {right:?}")]
    DimensionMismatch {
        /// Name of the operation
        op: &'static str,
        /// Shape of the left operand (rows, cols)
        left: (usize, usize),
        /// Shape of the right operand (rows, cols)
        right: (usize, usize),
    },

    /// The operation requires a square matrix.
    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Row count
        rows: usize,
        /// Column count
        cols: usize,
    },

    /// Rows of a nested input have different lengths.
    #[error("Ragged rows: row {row} has length {len}, expected {expected}")]
    RaggedRows {
        /// Index of the first offending row
        row: usize,
        /// Its length
        len: usize,
        /// Length of the first row
        expected: usize,
    },

    /// A flat buffer does not match the requested shape.
    #[error("Buffer of length {len} cannot form a {rows}x{cols} matrix")]
    InvalidShape {
        /// Requested rows
        rows: usize,
        /// Requested columns
        cols: usize,
        /// Actual buffer length
        len: usize,
    },

    /// A vector that must be nonzero is identically zero.
    #[error("Vector must be nonzero")]
    ZeroVector,
}

/// Root-finding solver input errors.
///
/// Convergence failures are not errors; see
/// [`SolverStatus`](crate::math::solvers::SolverStatus).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Bracket endpoints are non-finite or not ordered `a < b`.
    #[error("Invalid bracket [{a}, {b}]: endpoints must be finite with a < b")]
    InvalidBracket {
        /// Left endpoint
        a: f64,
        /// Right endpoint
        b: f64,
    },

    /// Tolerance is not a positive finite number.
    #[error("Tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),

    /// Bracket scan window is not a positive finite number, or splits the
    /// interval into too many windows.
    #[error(
        "Scan window must be positive and give at most {max} windows, got {0}",
        max = crate::math::solvers::MAX_SCAN_WINDOWS
    )]
    InvalidWindow(f64),
}

/// Eigenface training and matching errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecognitionError {
    /// No training images were supplied.
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// An image has a different pixel count from the training set.
    #[error("Image has {got} pixels, expected {expected}")]
    ImageSizeMismatch {
        /// Pixel count of the training images
        expected: usize,
        /// Pixel count of the offending image
        got: usize,
    },

    /// Requested component count is zero or exceeds the training set size.
    #[error("Cannot extract {requested} components from {available} images")]
    InvalidComponentCount {
        /// Components requested
        requested: usize,
        /// Training images available
        available: usize,
    },

    /// Underlying linear algebra failure.
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}
