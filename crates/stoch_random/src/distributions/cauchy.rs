//! Cauchy (Lorentz) distribution.

use super::{check_probability, positive, Cdf, Density, InverseCdf};
use rand::Rng;
use rand_distr::Distribution;
use std::f64::consts::PI;
use stoch_core::types::DistributionError;

/// Cauchy distribution with scale `a`: `p(x) = 1 / (aπ (1 + (x/a)²))`.
///
/// The tails use `atan(1/u)` beyond `|u| = 1` so that far-tail probabilities
/// keep their relative precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cauchy {
    a: f64,
}

impl Cauchy {
    /// Cauchy with scale `a > 0`.
    pub fn new(a: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            a: positive("a", a)?,
        })
    }

    /// Scale.
    pub fn a(&self) -> f64 {
        self.a
    }
}

impl Distribution<f64> for Cauchy {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = loop {
            let u: f64 = rng.gen();
            if u != 0.5 {
                break u;
            }
        };
        self.a * (PI * u).tan()
    }
}

impl Density for Cauchy {
    fn pdf(&self, x: f64) -> f64 {
        let u = x / self.a;
        1.0 / (PI * self.a * (1.0 + u * u))
    }
}

impl Cdf for Cauchy {
    fn cdf_lower(&self, x: f64) -> f64 {
        let u = x / self.a;
        if u > -1.0 {
            0.5 + u.atan() / PI
        } else {
            (-1.0 / u).atan() / PI
        }
    }

    fn cdf_upper(&self, x: f64) -> f64 {
        let u = x / self.a;
        if u < 1.0 {
            0.5 - u.atan() / PI
        } else {
            (1.0 / u).atan() / PI
        }
    }
}

impl InverseCdf for Cauchy {
    fn inv_cdf_lower(&self, p: f64) -> Result<f64, DistributionError> {
        let p = check_probability(p)?;
        Ok(if p == 1.0 {
            f64::INFINITY
        } else if p == 0.0 {
            f64::NEG_INFINITY
        } else if p > 0.5 {
            self.a * (PI * (p - 0.5)).tan()
        } else {
            -self.a / (PI * p).tan()
        })
    }

    fn inv_cdf_upper(&self, q: f64) -> Result<f64, DistributionError> {
        let q = check_probability(q)?;
        Ok(if q == 0.0 {
            f64::INFINITY
        } else if q == 1.0 {
            f64::NEG_INFINITY
        } else if q > 0.5 {
            self.a * (PI * (0.5 - q)).tan()
        } else {
            self.a / (PI * q).tan()
        })
    }
}
