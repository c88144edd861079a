//! # Quasirandom (Low-Discrepancy) Sequences
//!
//! This module provides deterministic low-discrepancy sequences for
//! quasi-Monte Carlo integration. Each point lies in the unit hypercube
//! `[0, 1)^d` and successive points fill it more evenly than independent
//! uniform draws.
//!
//! ## Module Structure
//!
//! - [`LowDiscrepancySequence`]: The trait implemented by every sequence engine
//! - [`Sobol`]: Sobol sequence, Joe-Kuo direction numbers, up to 40 dimensions
//! - [`Niederreiter2`]: Niederreiter base-2 sequence, up to 12 dimensions
//! - [`Halton`]: Halton and reverse Halton sequences, up to 1229 dimensions
//! - [`QuasiRandom`]: Method-selected generator with an explicit lifecycle
//!
//! ## Usage Example
//!
//! ```rust
//! use stoch_random::qrng::{QrngMethod, QuasiRandom};
//!
//! let mut qrng = QuasiRandom::new(QrngMethod::Sobol, 2).unwrap();
//! let points = qrng.take_points(4).unwrap();
//! assert_eq!(points[0], vec![0.5, 0.5]);
//! assert_eq!(points[2], vec![0.25, 0.75]);
//!
//! // Reinitialise and replay
//! qrng.init().unwrap();
//! assert_eq!(qrng.next_point().unwrap(), vec![0.5, 0.5]);
//! ```

mod halton;
mod niederreiter;
mod sobol;

pub use halton::{Halton, HALTON_MAX_DIMENSION};
pub use niederreiter::{Niederreiter2, NIEDERREITER_MAX_DIMENSION};
pub use sobol::{Sobol, SOBOL_MAX_DIMENSION};

use std::fmt;
use std::str::FromStr;
use stoch_core::types::GeneratorError;

/// Trait for low-discrepancy sequences used in quasi-Monte Carlo methods.
///
/// Low-discrepancy sequences provide more uniform coverage of the unit
/// hypercube than pseudo-random sequences, often leading to faster
/// convergence in numerical integration.
pub trait LowDiscrepancySequence {
    /// Returns the dimensionality of the sequence.
    fn dimension(&self) -> usize;

    /// Advances the sequence and returns the next point.
    ///
    /// # Returns
    ///
    /// A slice of `dimension()` values, each in `[0, 1)`, or `None` once the
    /// sequence has run out of representable points.
    fn next_point(&mut self) -> Option<&[f64]>;

    /// Resets the sequence to its initial state.
    ///
    /// After calling this method, the sequence will produce the same
    /// points as a newly initialised instance.
    fn reset(&mut self);

    /// Skips ahead by `n` points in the sequence.
    ///
    /// The default steps through the skipped points; engines with a direct
    /// jump override it.
    fn skip(&mut self, n: usize) {
        for _ in 0..n {
            if self.next_point().is_none() {
                break;
            }
        }
    }
}

/// Quasirandom method.
///
/// # Examples
///
/// ```rust
/// use stoch_random::qrng::QrngMethod;
///
/// let method: QrngMethod = "niederreiter_2".parse().unwrap();
/// assert_eq!(method, QrngMethod::Niederreiter2);
/// assert_eq!(method.max_dimension(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QrngMethod {
    /// Niederreiter base-2 sequence.
    Niederreiter2,
    /// Sobol sequence.
    Sobol,
    /// Halton sequence.
    Halton,
    /// Halton sequence with reversed digit permutation.
    ReverseHalton,
}

impl QrngMethod {
    /// Every method, in listing order.
    pub const ALL: [QrngMethod; 4] = [
        QrngMethod::Niederreiter2,
        QrngMethod::Sobol,
        QrngMethod::Halton,
        QrngMethod::ReverseHalton,
    ];

    /// Stable lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            QrngMethod::Niederreiter2 => "niederreiter_2",
            QrngMethod::Sobol => "sobol",
            QrngMethod::Halton => "halton",
            QrngMethod::ReverseHalton => "reversehalton",
        }
    }

    /// Largest dimension the method supports.
    pub fn max_dimension(&self) -> usize {
        match self {
            QrngMethod::Niederreiter2 => NIEDERREITER_MAX_DIMENSION,
            QrngMethod::Sobol => SOBOL_MAX_DIMENSION,
            QrngMethod::Halton | QrngMethod::ReverseHalton => HALTON_MAX_DIMENSION,
        }
    }
}

impl fmt::Display for QrngMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QrngMethod {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        QrngMethod::ALL
            .into_iter()
            .find(|method| method.name() == wanted)
            .ok_or_else(|| GeneratorError::UnknownKind(s.to_string()))
    }
}

/// Concrete sequence engine; static dispatch over the three families.
#[derive(Debug, Clone)]
enum SequenceEngine {
    Niederreiter(Niederreiter2),
    Sobol(Sobol),
    Halton(Halton),
}

impl SequenceEngine {
    fn build(method: QrngMethod, dimension: usize) -> Result<Self, GeneratorError> {
        Ok(match method {
            QrngMethod::Niederreiter2 => SequenceEngine::Niederreiter(Niederreiter2::new(dimension)?),
            QrngMethod::Sobol => SequenceEngine::Sobol(Sobol::new(dimension)?),
            QrngMethod::Halton => SequenceEngine::Halton(Halton::new(dimension)?),
            QrngMethod::ReverseHalton => SequenceEngine::Halton(Halton::reversed(dimension)?),
        })
    }

    fn sequence(&mut self) -> &mut dyn LowDiscrepancySequence {
        match self {
            SequenceEngine::Niederreiter(seq) => seq,
            SequenceEngine::Sobol(seq) => seq,
            SequenceEngine::Halton(seq) => seq,
        }
    }
}

/// Quasirandom generator with an explicit lifecycle.
///
/// Created for a method and dimension, advanced by [`next_point`],
/// [`fill_point`] and [`take_points`], rewound by [`init`], and retired by
/// [`release`], after which every operation fails with
/// `GeneratorError::Released`.
///
/// [`next_point`]: QuasiRandom::next_point
/// [`fill_point`]: QuasiRandom::fill_point
/// [`take_points`]: QuasiRandom::take_points
/// [`init`]: QuasiRandom::init
/// [`release`]: QuasiRandom::release
#[derive(Debug)]
pub struct QuasiRandom {
    method: QrngMethod,
    dimension: usize,
    engine: Option<SequenceEngine>,
}

impl QuasiRandom {
    /// Create a generator producing points in `[0, 1)^dimension`.
    ///
    /// # Errors
    ///
    /// `GeneratorError::InvalidDimension` unless
    /// `1 ≤ dimension ≤ method.max_dimension()`.
    pub fn new(method: QrngMethod, dimension: usize) -> Result<Self, GeneratorError> {
        let engine = SequenceEngine::build(method, dimension)?;
        tracing::debug!(method = %method, dimension, "quasirandom generator created");
        Ok(Self {
            method,
            dimension,
            engine: Some(engine),
        })
    }

    /// Sequence method.
    pub fn method(&self) -> QrngMethod {
        self.method
    }

    /// Method name, e.g. `"sobol"`.
    pub fn name(&self) -> &'static str {
        self.method.name()
    }

    /// Number of coordinates per point.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Whether [`release`](Self::release) has been called.
    pub fn is_released(&self) -> bool {
        self.engine.is_none()
    }

    fn sequence(&mut self) -> Result<&mut dyn LowDiscrepancySequence, GeneratorError> {
        self.engine
            .as_mut()
            .map(SequenceEngine::sequence)
            .ok_or(GeneratorError::Released)
    }

    /// Next point as a new vector.
    pub fn next_point(&mut self) -> Result<Vec<f64>, GeneratorError> {
        self.sequence()?
            .next_point()
            .map(<[f64]>::to_vec)
            .ok_or(GeneratorError::SequenceExhausted)
    }

    /// Write the next point into `out`.
    ///
    /// # Errors
    ///
    /// `GeneratorError::InvalidParameter` if `out.len()` differs from the
    /// dimension.
    pub fn fill_point(&mut self, out: &mut [f64]) -> Result<(), GeneratorError> {
        if out.len() != self.dimension {
            return Err(GeneratorError::InvalidParameter {
                name: "out",
                reason: format!(
                    "buffer holds {} values, dimension is {}",
                    out.len(),
                    self.dimension
                ),
            });
        }
        let point = self
            .sequence()?
            .next_point()
            .ok_or(GeneratorError::SequenceExhausted)?;
        out.copy_from_slice(point);
        Ok(())
    }

    /// The next `n` points.
    pub fn take_points(&mut self, n: usize) -> Result<Vec<Vec<f64>>, GeneratorError> {
        (0..n).map(|_| self.next_point()).collect()
    }

    /// Discard the next `n` points.
    pub fn skip(&mut self, n: usize) -> Result<(), GeneratorError> {
        self.sequence()?.skip(n);
        Ok(())
    }

    /// Rewind to the first point.
    pub fn init(&mut self) -> Result<(), GeneratorError> {
        self.sequence()?.reset();
        tracing::debug!(method = %self.method, "quasirandom generator reinitialised");
        Ok(())
    }

    /// Independent copy whose future output equals this generator's.
    pub fn try_clone(&self) -> Result<Self, GeneratorError> {
        let engine = self.engine.as_ref().ok_or(GeneratorError::Released)?;
        Ok(Self {
            method: self.method,
            dimension: self.dimension,
            engine: Some(engine.clone()),
        })
    }

    /// Overwrite this generator's state with `src`'s.
    ///
    /// # Errors
    ///
    /// - `GeneratorError::Released` if either generator was released
    /// - `GeneratorError::KindMismatch` if the method or dimension differs
    pub fn copy_from(&mut self, src: &QuasiRandom) -> Result<(), GeneratorError> {
        let source = src.engine.as_ref().ok_or(GeneratorError::Released)?;
        if self.engine.is_none() {
            return Err(GeneratorError::Released);
        }
        if src.method != self.method || src.dimension != self.dimension {
            return Err(GeneratorError::KindMismatch {
                expected: format!("{}/{}", self.method, self.dimension),
                found: format!("{}/{}", src.method, src.dimension),
            });
        }
        self.engine = Some(source.clone());
        Ok(())
    }

    /// Drop the sequence state. Later operations, including a second
    /// release, fail with `GeneratorError::Released`.
    pub fn release(&mut self) -> Result<(), GeneratorError> {
        self.engine.take().ok_or(GeneratorError::Released)?;
        tracing::debug!(method = %self.method, "quasirandom generator released");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
