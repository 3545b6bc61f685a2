//! # numeric_core: Numerical Foundation for numtool
//!
//! ## Role
//!
//! numeric_core is the library behind the `numtool` command line, providing:
//! - Scalar functions with Richardson-extrapolated derivatives (`math::function`)
//! - Root deflation for successive root discovery (`math::function::DeflatedFunction`)
//! - Dense matrix and vector algebra (`math::linalg`)
//! - Bisection, Newton, secant and hybrid root finders (`math::solvers`)
//! - Power iteration with matrix deflation (`math::eigen`)
//! - An eigenface recognizer built on top of power iteration (`recognition`)
//! - Error types: `NumericalError`, `LinalgError`, `SolverError`, `RecognitionError` (`types::error`)
//!
//! ## Failure Model
//!
//! Shape violations and invalid inputs are programmer errors and surface as
//! `Err`. Non-convergence is an expected outcome and is reported through
//! [`math::solvers::SolverStatus`] or [`math::eigen::EigenResult::converged`].
//!
//! ## Usage Examples
//!
//! ```rust
//! use numeric_core::math::function::Polynomial;
//! use numeric_core::math::solvers::{HybridSolver, NonLinearSolver, SolverStatus};
//!
//! // x² - 2 on [1, 2]
//! let f = Polynomial::new(vec![1.0, 0.0, -2.0]);
//! let solution = HybridSolver::default().solve(&f, 1.0, 2.0, 1e-10).unwrap();
//!
//! assert_eq!(solution.status(), SolverStatus::Success);
//! assert!((solution.x_estimate() - std::f64::consts::SQRT_2).abs() < 1e-9);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Row-parallel matrix multiplication via rayon
//! - `serde`: Serialisation for matrices, solutions and configurations

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod math;
pub mod recognition;
pub mod types;
