//! Flat (uniform) distribution on `[a, b)`.

use super::{check_probability, finite, Cdf, Density, InverseCdf};
use rand::Rng;
use rand_distr::Distribution;
use stoch_core::types::DistributionError;

/// Uniform distribution on `[a, b)`.
///
/// # Examples
///
/// ```rust
/// use stoch_random::distributions::{Cdf, Density, Flat};
///
/// let dist = Flat::new(-1.0, 3.0).unwrap();
/// assert_eq!(dist.pdf(0.0), 0.25);
/// assert_eq!(dist.cdf_lower(1.0), 0.5);
/// assert!(Flat::new(2.0, 2.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flat {
    a: f64,
    b: f64,
}

impl Flat {
    /// Uniform on `[a, b)` with finite `a < b`.
    pub fn new(a: f64, b: f64) -> Result<Self, DistributionError> {
        let a = finite("a", a)?;
        let b = finite("b", b)?;
        if a >= b {
            return Err(DistributionError::InvalidParameter {
                name: "b",
                value: b,
                reason: "upper limit must exceed lower limit a",
            });
        }
        Ok(Self { a, b })
    }

    /// Lower limit.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Upper limit.
    pub fn b(&self) -> f64 {
        self.b
    }
}

impl Distribution<f64> for Flat {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.gen();
        self.a * (1.0 - u) + self.b * u
    }
}

impl Density for Flat {
    fn pdf(&self, x: f64) -> f64 {
        if x >= self.a && x < self.b {
            1.0 / (self.b - self.a)
        } else {
            0.0
        }
    }
}

impl Cdf for Flat {
    fn cdf_lower(&self, x: f64) -> f64 {
        if x < self.a {
            0.0
        } else if x > self.b {
            1.0
        } else {
            (x - self.a) / (self.b - self.a)
        }
    }

    fn cdf_upper(&self, x: f64) -> f64 {
        if x < self.a {
            1.0
        } else if x > self.b {
            0.0
        } else {
            (self.b - x) / (self.b - self.a)
        }
    }
}

impl InverseCdf for Flat {
    fn inv_cdf_lower(&self, p: f64) -> Result<f64, DistributionError> {
        let p = check_probability(p)?;
        Ok(self.a * (1.0 - p) + self.b * p)
    }

    fn inv_cdf_upper(&self, q: f64) -> Result<f64, DistributionError> {
        let q = check_probability(q)?;
        Ok(self.a * q + self.b * (1.0 - q))
    }
}
