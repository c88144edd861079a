//! Command-line driver for the stoch statistics and sampling crates
//!
//! This crate backs the `stoch` binary: configuration loading, distribution
//! selection by name and the command implementations. Every command writes
//! its report to a caller-supplied writer.

pub mod commands;
pub mod config;
pub mod error;
pub mod family;

pub use error::{CliError, Result};

// Re-export library crates for integration
pub use stoch_random;
pub use stoch_stats;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
