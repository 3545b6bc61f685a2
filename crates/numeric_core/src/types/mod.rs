//! Shared types.

pub mod error;

pub use error::{LinalgError, NumericalError, RecognitionError, SolverError};
