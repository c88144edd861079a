//! Error type for the stoch binary.

use thiserror::Error;

use crate::config::ConfigError;
use stoch_core::types::{DistributionError, GeneratorError, StatsError};

/// Any failure surfaced by a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A statistic could not be computed.
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// A generator operation failed.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// A distribution could not be built or inverted.
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),

    /// A named input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command-line value was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not defined for the chosen family.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Reading or writing a file or stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A numeric input file was malformed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the CLI.
pub type Result<T> = std::result::Result<T, CliError>;
