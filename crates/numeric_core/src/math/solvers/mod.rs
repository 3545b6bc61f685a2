//! Root-finding solvers for scalar functions.
//!
//! All solvers implement [`NonLinearSolver`], searching `[a, b]` for a root
//! of a [`ScalarFunction`](crate::math::function::ScalarFunction) to a
//! caller-supplied tolerance.
//!
//! ## Available Solvers
//!
//! - [`BisectionSolver`]: Guaranteed convergence on a sign-changing bracket
//! - [`NewtonSolver`]: Quadratic convergence using derivatives
//! - [`SecantSolver`]: Newton with a forward-difference slope
//! - [`HybridSolver`]: Newton steps safeguarded by bisection
//!
//! ## Results
//!
//! Invalid inputs (unordered or non-finite bracket, non-positive tolerance)
//! are reported as [`SolverError`](crate::types::SolverError). Numerical
//! failures are not errors: the returned [`Solution`] carries a
//! [`SolverStatus`] describing how the run ended.
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `max_iterations`: Maximum iteration count (default: 200)
//! - `secant_step`: Secant slope offset (default: 0.001)
//!
//! ## Examples
//!
//! ```
//! use numeric_core::math::function::Polynomial;
//! use numeric_core::math::solvers::{SolverConfig, SolverKind, SolverStatus};
//!
//! // Solve x² - 2 = 0 (find √2) with every solver
//! let f = Polynomial::new(vec![1.0, 0.0, -2.0]);
//!
//! for kind in SolverKind::ALL {
//!     let solver = kind.build(SolverConfig::default());
//!     let solution = solver.solve(&f, 1.0, 2.0, 1e-10).unwrap();
//!     assert_eq!(solution.status(), SolverStatus::Success);
//!     assert!((solution.x_estimate() - std::f64::consts::SQRT_2).abs() < 1e-8);
//! }
//! ```

mod bisection;
mod config;
mod hybrid;
mod kind;
mod newton;
mod roots;
mod secant;
mod solution;
mod traits;

// Re-export public types at module level
pub use bisection::BisectionSolver;
pub use config::SolverConfig;
pub use hybrid::HybridSolver;
pub use kind::{SolverKind, UnknownSolverKind};
pub use newton::NewtonSolver;
pub use roots::{find_roots, scan_brackets, MAX_SCAN_WINDOWS};
pub use secant::SecantSolver;
pub use solution::{Solution, SolverStatus};
pub use traits::NonLinearSolver;
