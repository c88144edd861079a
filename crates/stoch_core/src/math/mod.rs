//! Numerical building blocks for the distribution layer.
//!
//! - [`special`]: error function, log-gamma, regularised incomplete gamma,
//!   standard normal CDF and quantile
//! - [`solvers`]: bracketing root finder for numerically inverted CDFs

pub mod solvers;
pub mod special;
