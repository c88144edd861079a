//! Core types shared by the statistics and sampling layers.
//!
//! This module provides:
//! - `error`: Structured error types for statistics, generators, distributions and solvers
//! - `strided`: Borrowed, stride-aware views over sample sequences
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`StatsError`], [`GeneratorError`], [`DistributionError`], [`SolverError`] from `error`
//! - [`Strided`] from `strided`

pub mod error;
pub mod strided;

// Re-export commonly used types at module level
pub use error::{DistributionError, GeneratorError, SolverError, StatsError};
pub use strided::Strided;
