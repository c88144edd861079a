//! Sobol sequence with Joe-Kuo direction numbers.

use super::LowDiscrepancySequence;
use stoch_core::types::GeneratorError;

/// Largest supported dimension.
pub const SOBOL_MAX_DIMENSION: usize = 40;

/// Bits per coordinate.
const BITS: usize = 32;

/// 2^-32.
const RECIP: f64 = 1.0 / 4_294_967_296.0;

/// Primitive polynomial degree `s`, interior coefficients `a` and initial
/// direction numbers `m` for dimensions 2 to 40. Dimension 1 uses `m_k = 1`
/// throughout (the van der Corput sequence in base 2).
const DIRECTION_PARAMETERS: [(usize, u32, &[u32]); SOBOL_MAX_DIMENSION - 1] = [
    (1, 0, &[1]),
    (2, 1, &[1, 3]),
    (3, 1, &[1, 3, 1]),
    (3, 2, &[1, 1, 1]),
    (4, 1, &[1, 1, 3, 3]),
    (4, 4, &[1, 3, 5, 13]),
    (5, 2, &[1, 1, 5, 5, 17]),
    (5, 4, &[1, 1, 5, 5, 5]),
    (5, 7, &[1, 1, 7, 11, 19]),
    (5, 11, &[1, 1, 5, 1, 1]),
    (5, 13, &[1, 1, 1, 3, 11]),
    (5, 14, &[1, 3, 5, 5, 31]),
    (6, 1, &[1, 3, 3, 9, 7, 49]),
    (6, 13, &[1, 1, 1, 15, 21, 21]),
    (6, 16, &[1, 3, 1, 13, 27, 49]),
    (6, 19, &[1, 1, 1, 15, 7, 5]),
    (6, 22, &[1, 3, 1, 15, 13, 25]),
    (6, 25, &[1, 1, 5, 5, 19, 61]),
    (7, 1, &[1, 3, 7, 11, 23, 15, 103]),
    (7, 4, &[1, 3, 7, 13, 13, 15, 69]),
    (7, 7, &[1, 1, 3, 13, 7, 35, 63]),
    (7, 8, &[1, 3, 5, 9, 1, 25, 53]),
    (7, 14, &[1, 3, 1, 13, 9, 35, 107]),
    (7, 19, &[1, 3, 1, 5, 27, 61, 31]),
    (7, 21, &[1, 1, 5, 11, 19, 41, 61]),
    (7, 28, &[1, 3, 5, 3, 3, 13, 69]),
    (7, 31, &[1, 1, 7, 13, 1, 19, 1]),
    (7, 32, &[1, 3, 7, 5, 13, 19, 59]),
    (7, 37, &[1, 1, 3, 9, 25, 29, 41]),
    (7, 41, &[1, 3, 5, 13, 23, 1, 55]),
    (7, 42, &[1, 3, 7, 3, 13, 59, 17]),
    (7, 50, &[1, 3, 1, 3, 5, 53, 69]),
    (7, 55, &[1, 1, 5, 5, 23, 33, 13]),
    (7, 56, &[1, 1, 7, 7, 1, 61, 123]),
    (7, 59, &[1, 1, 7, 9, 13, 61, 49]),
    (7, 62, &[1, 3, 3, 5, 3, 55, 33]),
    (8, 14, &[1, 3, 1, 15, 31, 13, 49, 245]),
    (8, 21, &[1, 3, 5, 15, 31, 59, 63, 97]),
    (8, 22, &[1, 3, 1, 11, 11, 11, 77, 249]),
];

/// Direction numbers `V_1 … V_32`, left-aligned in 32 bits.
fn direction_numbers(degree: usize, coefficients: u32, initial: &[u32]) -> [u32; BITS] {
    let mut v = [0u32; BITS];
    for (k, &m) in initial.iter().enumerate() {
        v[k] = m << (BITS - 1 - k);
    }
    for k in degree..BITS {
        let mut x = v[k - degree] ^ (v[k - degree] >> degree);
        for i in 1..degree {
            if (coefficients >> (degree - 1 - i)) & 1 == 1 {
                x ^= v[k - i];
            }
        }
        v[k] = x;
    }
    v
}

/// Sobol low-discrepancy sequence in up to 40 dimensions.
///
/// Points are generated in Gray-code order (Antonov-Saleev): each step
/// XORs one direction number into the running numerator. The all-zero
/// point is skipped, so the first point is `0.5` in every coordinate.
/// The sequence is exhausted after `2^32 - 1` points.
#[derive(Debug, Clone)]
pub struct Sobol {
    directions: Vec<[u32; BITS]>,
    numerators: Vec<u32>,
    count: u64,
    point: Vec<f64>,
}

impl Sobol {
    /// Sobol sequence of the given dimension.
    ///
    /// # Errors
    ///
    /// `GeneratorError::InvalidDimension` unless `1 ≤ dimension ≤ 40`.
    pub fn new(dimension: usize) -> Result<Self, GeneratorError> {
        if dimension == 0 || dimension > SOBOL_MAX_DIMENSION {
            return Err(GeneratorError::InvalidDimension {
                method: "sobol",
                dimension,
                max: SOBOL_MAX_DIMENSION,
            });
        }
        let mut directions = Vec::with_capacity(dimension);
        directions.push(std::array::from_fn(|k| 1u32 << (BITS - 1 - k)));
        for &(degree, coefficients, initial) in &DIRECTION_PARAMETERS[..dimension - 1] {
            directions.push(direction_numbers(degree, coefficients, initial));
        }
        Ok(Self {
            directions,
            numerators: vec![0; dimension],
            count: 0,
            point: vec![0.0; dimension],
        })
    }
}

impl LowDiscrepancySequence for Sobol {
    fn dimension(&self) -> usize {
        self.directions.len()
    }

    fn next_point(&mut self) -> Option<&[f64]> {
        let bit = self.count.trailing_ones() as usize;
        if bit >= BITS {
            return None;
        }
        for ((numerator, v), x) in self
            .numerators
            .iter_mut()
            .zip(&self.directions)
            .zip(self.point.iter_mut())
        {
            *numerator ^= v[bit];
            *x = f64::from(*numerator) * RECIP;
        }
        self.count += 1;
        Some(&self.point)
    }

    fn reset(&mut self) {
        self.numerators.fill(0);
        self.count = 0;
    }

    /// Jumps directly to the Gray-code state `n` points ahead.
    fn skip(&mut self, n: usize) {
        let limit = (1u64 << BITS) - 1;
        self.count = self.count.saturating_add(n as u64).min(limit);
        let gray = self.count ^ (self.count >> 1);
        for (numerator, v) in self.numerators.iter_mut().zip(&self.directions) {
            *numerator = (0..BITS)
                .filter(|&bit| (gray >> bit) & 1 == 1)
                .fold(0, |acc, bit| acc ^ v[bit]);
        }
    }
}
