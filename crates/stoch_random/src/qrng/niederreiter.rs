//! Niederreiter sequence in base 2.
//!
//! Generator matrices are built from irreducible polynomials over GF(2)
//! following Bratley, Fox and Niederreiter (1992). Dimension `i` uses the
//! `(i + 1)`-th polynomial of the table below.

use super::LowDiscrepancySequence;
use stoch_core::types::GeneratorError;

/// Largest supported dimension.
pub const NIEDERREITER_MAX_DIMENSION: usize = 12;

/// Bits per coordinate.
const NBITS: usize = 31;

/// Highest polynomial degree in the table.
const MAX_PRIM_DEGREE: usize = 5;

/// Length of the `v` recurrence buffer.
const MAXV: usize = NBITS + MAX_PRIM_DEGREE;

/// Capacity for accumulated polynomial products.
const MAX_DEGREE: usize = 50;

/// 2^-31.
const RECIP: f64 = 1.0 / 2_147_483_648.0;

/// Polynomial coefficients over GF(2), constant term first.
const POLYNOMIALS: [&[u8]; NIEDERREITER_MAX_DIMENSION + 1] = [
    &[1],                // 1
    &[0, 1],             // x
    &[1, 1],             // 1 + x
    &[1, 1, 1],          // 1 + x + x²
    &[1, 1, 0, 1],       // 1 + x + x³
    &[1, 0, 1, 1],       // 1 + x² + x³
    &[1, 1, 0, 0, 1],    // 1 + x + x⁴
    &[1, 0, 0, 1, 1],    // 1 + x³ + x⁴
    &[1, 1, 1, 1, 1],    // 1 + x + x² + x³ + x⁴
    &[1, 0, 1, 0, 0, 1], // 1 + x² + x⁵
    &[1, 0, 0, 1, 0, 1], // 1 + x³ + x⁵
    &[1, 1, 1, 1, 0, 1], // 1 + x + x² + x³ + x⁵
    &[1, 1, 1, 0, 1, 1], // 1 + x + x² + x⁴ + x⁵
];

/// Polynomial over GF(2) with a fixed coefficient buffer.
#[derive(Clone, Copy)]
struct Poly {
    coeffs: [u8; MAX_DEGREE + 1],
    degree: usize,
}

impl Poly {
    fn from_coeffs(coeffs: &[u8]) -> Self {
        let mut poly = Self {
            coeffs: [0; MAX_DEGREE + 1],
            degree: coeffs.len() - 1,
        };
        poly.coeffs[..coeffs.len()].copy_from_slice(coeffs);
        poly
    }

    fn one() -> Self {
        Self::from_coeffs(&[1])
    }

    fn multiply(&self, other: &Poly) -> Poly {
        let degree = self.degree + other.degree;
        let mut coeffs = [0u8; MAX_DEGREE + 1];
        for (k, c) in coeffs.iter_mut().enumerate().take(degree + 1) {
            *c = (0..=k).fold(0, |acc, j| acc ^ (self.coeffs[k - j] & other.coeffs[j]));
        }
        Poly { coeffs, degree }
    }
}

/// Multiplies `b` by `px` in place and fills `v` with the next run of the
/// linear recurrence whose characteristic polynomial is the new `b`.
fn advance_recurrence(px: &Poly, b: &mut Poly, v: &mut [u8; MAXV + 1]) {
    let previous_degree = b.degree;
    *b = px.multiply(b);
    let m = b.degree;

    v.fill(0);
    v[previous_degree] = 1;
    for entry in v.iter_mut().take(m).skip(previous_degree + 1) {
        *entry = 1;
    }
    for r in 0..=(MAXV - m) {
        v[r + m] = (0..m).fold(0, |acc, k| acc ^ (b.coeffs[k] & v[r + k]));
    }
}

/// Generator matrix rows `c[r][dim]`, each row packed into `NBITS` bits.
fn generator_matrix(dimension: usize) -> Vec<[u32; NIEDERREITER_MAX_DIMENSION]> {
    let mut cj = vec![[0u32; NIEDERREITER_MAX_DIMENSION]; NBITS];
    for dim in 0..dimension {
        let px = Poly::from_coeffs(POLYNOMIALS[dim + 1]);
        let mut b = Poly::one();
        let mut v = [0u8; MAXV + 1];
        let mut ci = [[0u8; NBITS]; NBITS];
        let mut u = 0;

        for j in 0..NBITS {
            if u == 0 {
                advance_recurrence(&px, &mut b, &mut v);
            }
            for (r, row) in ci.iter_mut().enumerate() {
                row[j] = v[r + u];
            }
            u += 1;
            if u == px.degree {
                u = 0;
            }
        }

        for (r, row) in ci.iter().enumerate() {
            cj[r][dim] = row.iter().fold(0, |acc, &bit| (acc << 1) | u32::from(bit));
        }
    }
    cj
}

/// Niederreiter base-2 sequence in up to 12 dimensions.
///
/// The first point is the origin. The sequence is exhausted after
/// `2^31 - 1` points.
#[derive(Debug, Clone)]
pub struct Niederreiter2 {
    cj: Vec<[u32; NIEDERREITER_MAX_DIMENSION]>,
    next_q: Vec<u32>,
    count: u64,
    point: Vec<f64>,
}

impl Niederreiter2 {
    /// Niederreiter sequence of the given dimension.
    ///
    /// # Errors
    ///
    /// `GeneratorError::InvalidDimension` unless `1 ≤ dimension ≤ 12`.
    pub fn new(dimension: usize) -> Result<Self, GeneratorError> {
        if dimension == 0 || dimension > NIEDERREITER_MAX_DIMENSION {
            return Err(GeneratorError::InvalidDimension {
                method: "niederreiter_2",
                dimension,
                max: NIEDERREITER_MAX_DIMENSION,
            });
        }
        Ok(Self {
            cj: generator_matrix(dimension),
            next_q: vec![0; dimension],
            count: 0,
            point: vec![0.0; dimension],
        })
    }
}

impl LowDiscrepancySequence for Niederreiter2 {
    fn dimension(&self) -> usize {
        self.next_q.len()
    }

    fn next_point(&mut self) -> Option<&[f64]> {
        let r = self.count.trailing_ones() as usize;
        if r >= NBITS {
            return None;
        }
        for (dim, (q, x)) in self.next_q.iter_mut().zip(self.point.iter_mut()).enumerate() {
            *x = f64::from(*q) * RECIP;
            *q ^= self.cj[r][dim];
        }
        self.count += 1;
        Some(&self.point)
    }

    fn reset(&mut self) {
        self.next_q.fill(0);
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_points() {
        let mut seq = Niederreiter2::new(3).unwrap();
        let expected = [
            [0.0, 0.0, 0.0],
            [0.5, 0.5, 0.75],
            [0.75, 0.25, 0.3125],
            [0.25, 0.75, 0.5625],
            [0.375, 0.375, 0.875],
            [0.875, 0.875, 0.125],
            [0.625, 0.125, 0.6875],
            [0.125, 0.625, 0.4375],
        ];
        for point in expected {
            assert_eq!(seq.next_point(), Some(&point[..]));
        }
    }

    #[test]
    fn test_full_dimension_in_unit_cube() {
        let mut seq = Niederreiter2::new(NIEDERREITER_MAX_DIMENSION).unwrap();
        for _ in 0..4_096 {
            let point = seq.next_point().unwrap();
            assert!(point.iter().all(|&x| (0.0..1.0).contains(&x)));
        }
    }

    #[test]
    fn test_reset_restarts() {
        let mut seq = Niederreiter2::new(2).unwrap();
        let first: Vec<Vec<f64>> = (0..10).map(|_| seq.next_point().unwrap().to_vec()).collect();
        seq.reset();
        let again: Vec<Vec<f64>> = (0..10).map(|_| seq.next_point().unwrap().to_vec()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_dimension_limits() {
        assert!(Niederreiter2::new(0).is_err());
        assert!(Niederreiter2::new(13).is_err());
        assert_eq!(Niederreiter2::new(12).unwrap().dimension(), 12);
    }
}
