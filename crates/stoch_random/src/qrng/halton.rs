//! Halton and reverse Halton sequences.

use super::LowDiscrepancySequence;
use stoch_core::types::GeneratorError;

/// Largest supported dimension: one prime base per dimension, using every
/// prime below 10,000.
pub const HALTON_MAX_DIMENSION: usize = 1229;

/// Upper limit of the prime sieve.
const SIEVE_LIMIT: usize = 10_000;

/// The first `n` primes, `n ≤ 1229`.
fn first_primes(n: usize) -> Vec<u32> {
    let mut composite = vec![false; SIEVE_LIMIT];
    let mut primes = Vec::with_capacity(n);
    for candidate in 2..SIEVE_LIMIT {
        if primes.len() == n {
            break;
        }
        if composite[candidate] {
            continue;
        }
        primes.push(candidate as u32);
        for multiple in (candidate * candidate..SIEVE_LIMIT).step_by(candidate) {
            composite[multiple] = true;
        }
    }
    primes
}

/// Radical inverse of `n` in `base`: the base-`b` digits of `n` mirrored
/// about the radix point. The reversed variant maps each non-zero digit
/// `d` to `b - d` first.
fn radical_inverse(mut n: u64, base: u32, reversed: bool) -> f64 {
    let b = u64::from(base);
    let inv = 1.0 / f64::from(base);
    let mut scale = 1.0;
    let mut result = 0.0;
    while n > 0 {
        let digit = n % b;
        let digit = if reversed { (b - digit) % b } else { digit };
        scale *= inv;
        result += scale * digit as f64;
        n /= b;
    }
    result
}

/// Halton sequence (optionally with reversed digits) in up to 1229
/// dimensions.
///
/// Dimension `i` is the radical inverse of the point index in the `i`-th
/// prime. Indices start at 1, so the first point is `0.5` in base 2.
#[derive(Debug, Clone)]
pub struct Halton {
    bases: Vec<u32>,
    reversed: bool,
    count: u64,
    point: Vec<f64>,
}

impl Halton {
    /// Halton sequence of the given dimension.
    ///
    /// # Errors
    ///
    /// `GeneratorError::InvalidDimension` unless `1 ≤ dimension ≤ 1229`.
    pub fn new(dimension: usize) -> Result<Self, GeneratorError> {
        Self::build(dimension, false, "halton")
    }

    /// Reverse Halton sequence of the given dimension.
    pub fn reversed(dimension: usize) -> Result<Self, GeneratorError> {
        Self::build(dimension, true, "reversehalton")
    }

    fn build(dimension: usize, reversed: bool, method: &'static str) -> Result<Self, GeneratorError> {
        if dimension == 0 || dimension > HALTON_MAX_DIMENSION {
            return Err(GeneratorError::InvalidDimension {
                method,
                dimension,
                max: HALTON_MAX_DIMENSION,
            });
        }
        Ok(Self {
            bases: first_primes(dimension),
            reversed,
            count: 0,
            point: vec![0.0; dimension],
        })
    }
}

impl LowDiscrepancySequence for Halton {
    fn dimension(&self) -> usize {
        self.bases.len()
    }

    fn next_point(&mut self) -> Option<&[f64]> {
        self.count = self.count.checked_add(1)?;
        for (x, &base) in self.point.iter_mut().zip(&self.bases) {
            *x = radical_inverse(self.count, base, self.reversed);
        }
        Some(&self.point)
    }

    fn reset(&mut self) {
        self.count = 0;
    }

    fn skip(&mut self, n: usize) {
        self.count = self.count.saturating_add(n as u64);
    }
}
