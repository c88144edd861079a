//! Root-finding solvers.
//!
//! [`BrentSolver`] inverts CDFs that have no closed-form quantile (the gamma
//! family and everything built on it). It needs only a sign-changing bracket,
//! which the distribution layer builds by expanding an upper bound.
//!
//! ```
//! use stoch_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! let solver = BrentSolver::new(SolverConfig::high_precision());
//! let root = solver.find_root(|x: f64| x.exp() - 2.0, 0.0, 1.0).unwrap();
//! assert!((root - 2.0_f64.ln()).abs() < 1e-15);
//! ```

mod brent;
mod config;

pub use brent::BrentSolver;
pub use config::SolverConfig;
