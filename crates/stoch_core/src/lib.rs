//! # stoch_core: Numerical Foundation for the stoch toolkit
//!
//! ## Foundation Layer Role
//!
//! stoch_core is the bottom layer of the workspace and provides:
//! - Error types: `StatsError`, `GeneratorError`, `DistributionError`,
//!   `SolverError` (`types::error`)
//! - Strided sample views: `Strided` (`types::strided`)
//! - Special functions: error function, log-gamma, incomplete gamma and the
//!   standard normal CDF and quantile (`math::special`)
//! - Root finding: `BrentSolver` with `SolverConfig` (`math::solvers`)
//!
//! ## Minimal Dependencies
//!
//! Nothing here depends on other stoch_* crates:
//! - num-traits: Generic floating-point solver
//! - thiserror: Error derivation
//!
//! ## Usage Examples
//!
//! ```rust
//! use stoch_core::math::special::{std_normal_cdf, std_normal_inv_cdf};
//! use stoch_core::types::Strided;
//!
//! let p = std_normal_cdf(1.0);
//! assert!((std_normal_inv_cdf(p) - 1.0).abs() < 1e-12);
//!
//! let data = [1.0, -1.0, 2.0, -2.0];
//! let view = Strided::new(&data, 2).unwrap();
//! assert_eq!(view.to_vec(), vec![1.0, 2.0]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
