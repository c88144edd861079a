//! Error types for structured error handling.
//!
//! This module provides:
//! - `StatsError`: Errors from descriptive statistics over sample sequences
//! - `GeneratorError`: Errors from pseudo-random and quasirandom generators
//! - `DistributionError`: Errors from distribution sampling, CDFs and inverses
//! - `SolverError`: Errors from root-finding solvers

use thiserror::Error;

/// Descriptive statistics errors.
///
/// Every statistic is computed over a non-empty sequence; paired and weighted
/// statistics additionally require equal logical lengths.
///
/// # Variants
/// - `EmptyInput`: Zero-length sample sequence
/// - `LengthMismatch`: Paired sequences of unequal logical length
/// - `InvalidStride`: Stride of zero
/// - `InsufficientData`: Too few elements for an `N-1` denominator
/// - `ZeroTotalWeight`: No strictly positive weight in a weighted sequence
/// - `InvalidProbability`: Quantile fraction outside `[0, 1]`
/// - `Unsorted`: Order statistic requested on unsorted data
///
/// # Examples
/// ```
/// use stoch_core::types::StatsError;
///
/// let err = StatsError::LengthMismatch { expected: 4, found: 3 };
/// assert_eq!(format!("{}", err), "Length mismatch: expected 4 elements, found 3");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Zero-length sample sequence.
    #[error("Empty input: statistics require at least one element")]
    EmptyInput,

    /// Paired sequences have different logical lengths.
    #[error("Length mismatch: expected {expected} elements, found {found}")]
    LengthMismatch {
        /// Logical length of the first sequence
        expected: usize,
        /// Logical length of the second sequence
        found: usize,
    },

    /// Stride of zero.
    #[error("Invalid stride {0}: must be at least 1")]
    InvalidStride(usize),

    /// Not enough elements for the requested statistic.
    #[error("Insufficient data: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of logical elements provided
        got: usize,
        /// Minimum number of logical elements required
        need: usize,
    },

    /// All weights are zero or negative.
    #[error("Total weight is zero: at least one weight must be positive")]
    ZeroTotalWeight,

    /// Quantile fraction outside `[0, 1]`.
    #[error("Invalid probability {0}: must be in [0, 1]")]
    InvalidProbability(f64),

    /// Data is not sorted in ascending order.
    #[error("Data is not sorted at index {index}")]
    Unsorted {
        /// Logical index of the first out-of-order element
        index: usize,
    },
}

/// Generator errors.
///
/// Covers the lifecycle of pseudo-random and quasirandom generators:
/// use after release, state persistence, and construction.
///
/// # Examples
/// ```
/// use stoch_core::types::GeneratorError;
///
/// let err = GeneratorError::KindMismatch {
///     expected: "pcg64".to_string(),
///     found: "chacha8".to_string(),
/// };
/// assert!(format!("{}", err).contains("pcg64"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// Generator used after it was released.
    #[error("Generator has been released")]
    Released,

    /// State blob is corrupt or was produced by an incompatible generator.
    #[error("Serialisation error: {0}")]
    Serialization(String),

    /// Source and destination generators are of different kinds.
    #[error("Generator kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        /// Kind of the destination generator
        expected: String,
        /// Kind of the source generator or state blob
        found: String,
    },

    /// Generator name not in the closed set of kinds.
    #[error("Unknown generator: {0}")]
    UnknownKind(String),

    /// Invalid argument to a generator operation.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the constraint that was violated
        reason: String,
    },

    /// Quasirandom dimension outside the method's supported range.
    #[error("Invalid dimension {dimension} for {method}: must be in [1, {max}]")]
    InvalidDimension {
        /// Quasirandom method name
        method: &'static str,
        /// Requested dimension
        dimension: usize,
        /// Largest supported dimension
        max: usize,
    },

    /// Quasirandom sequence ran out of representable points.
    #[error("Quasirandom sequence exhausted")]
    SequenceExhausted,
}

/// Distribution errors.
///
/// # Examples
/// ```
/// use stoch_core::types::DistributionError;
///
/// let err = DistributionError::InvalidParameter {
///     name: "sigma",
///     value: -1.0,
///     reason: "must be positive",
/// };
/// assert_eq!(format!("{}", err), "Invalid parameter sigma = -1: must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    /// Distribution parameter out of domain.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Description of the valid domain
        reason: &'static str,
    },

    /// Probability argument outside `[0, 1]`.
    #[error("Invalid probability {0}: must be in [0, 1]")]
    InvalidProbability(f64),

    /// Underlying generator failed.
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Numerical inversion failed.
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `NumericalInstability`: General numerical instability
///
/// # Examples
/// ```
/// use stoch_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}
