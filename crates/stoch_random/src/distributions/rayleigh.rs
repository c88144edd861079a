//! Rayleigh distribution and its upper tail.

use super::{check_probability, positive, Cdf, Density, InverseCdf};
use rand::distributions::Open01;
use rand::Rng;
use rand_distr::Distribution;
use stoch_core::types::DistributionError;

/// Rayleigh distribution with scale `sigma`:
/// `p(x) = x/σ² · e^(-x²/2σ²)` for `x ≥ 0`.
///
/// # Examples
///
/// ```rust
/// use stoch_random::distributions::{Cdf, InverseCdf, Rayleigh};
///
/// let dist = Rayleigh::new(1.0).unwrap();
/// let median = dist.inv_cdf_lower(0.5).unwrap();
/// assert!((median - (2.0 * 2.0_f64.ln()).sqrt()).abs() < 1e-14);
/// assert!((dist.cdf_upper(median) - 0.5).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rayleigh {
    sigma: f64,
}

impl Rayleigh {
    /// Rayleigh with scale `sigma > 0`.
    pub fn new(sigma: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            sigma: positive("sigma", sigma)?,
        })
    }

    /// Scale.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Distribution<f64> for Rayleigh {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.sample(Open01);
        self.sigma * (-2.0 * u.ln()).sqrt()
    }
}

impl Density for Rayleigh {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        let u = x / self.sigma;
        (u / self.sigma) * (-u * u / 2.0).exp()
    }
}

impl Cdf for Rayleigh {
    fn cdf_lower(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let u = x / self.sigma;
        -(-u * u / 2.0).exp_m1()
    }

    fn cdf_upper(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 1.0;
        }
        let u = x / self.sigma;
        (-u * u / 2.0).exp()
    }
}

impl InverseCdf for Rayleigh {
    fn inv_cdf_lower(&self, p: f64) -> Result<f64, DistributionError> {
        let p = check_probability(p)?;
        Ok(self.sigma * (-2.0 * (-p).ln_1p()).sqrt())
    }

    fn inv_cdf_upper(&self, q: f64) -> Result<f64, DistributionError> {
        let q = check_probability(q)?;
        Ok(self.sigma * (-2.0 * q.ln()).sqrt())
    }
}

/// Upper tail `x ≥ a` of a Rayleigh distribution with scale `sigma`:
/// `p(x) = x/σ² · e^((a² - x²)/2σ²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayleighTail {
    a: f64,
    sigma: f64,
}

impl RayleighTail {
    /// Tail above `a ≥ 0` with scale `sigma > 0`.
    pub fn new(a: f64, sigma: f64) -> Result<Self, DistributionError> {
        if !(a >= 0.0 && a.is_finite()) {
            return Err(DistributionError::InvalidParameter {
                name: "a",
                value: a,
                reason: "must be finite and non-negative",
            });
        }
        Ok(Self {
            a,
            sigma: positive("sigma", sigma)?,
        })
    }

    /// Lower limit of the support.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Scale.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Distribution<f64> for RayleighTail {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.sample(Open01);
        (self.a * self.a - 2.0 * self.sigma * self.sigma * u.ln()).sqrt()
    }
}

impl Density for RayleighTail {
    fn pdf(&self, x: f64) -> f64 {
        if x < self.a {
            return 0.0;
        }
        let u = x / self.sigma;
        let v = self.a / self.sigma;
        (u / self.sigma) * ((v + u) * (v - u) / 2.0).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn test_pdf_peak_at_sigma() {
        let dist = Rayleigh::new(2.0).unwrap();
        assert!(dist.pdf(2.0) > dist.pdf(1.9));
        assert!(dist.pdf(2.0) > dist.pdf(2.1));
        assert_eq!(dist.pdf(-1.0), 0.0);
    }

    #[test]
    fn test_inverse_round_trip() {
        let dist = Rayleigh::new(1.7).unwrap();
        for x in [0.1, 1.0, 3.0, 8.0] {
            assert_relative_eq!(dist.inv_cdf_lower(dist.cdf_lower(x)).unwrap(), x, max_relative = 1e-12);
            assert_relative_eq!(dist.inv_cdf_upper(dist.cdf_upper(x)).unwrap(), x, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_zero_tail_is_rayleigh() {
        let tail = RayleighTail::new(0.0, 1.5).unwrap();
        let plain = Rayleigh::new(1.5).unwrap();
        for x in [0.2, 1.0, 4.0] {
            assert_relative_eq!(tail.pdf(x), plain.pdf(x), max_relative = 1e-14);
        }
    }

    #[test]
    fn test_tail_samples_above_limit() {
        let dist = RayleighTail::new(2.5, 0.8).unwrap();
        let mut rng = Pcg64Mcg::seed_from_u64(21);
        for _ in 0..5_000 {
            assert!(dist.sample(&mut rng) >= 2.5);
        }
        assert_eq!(dist.pdf(2.4), 0.0);
        assert!(RayleighTail::new(-0.1, 1.0).is_err());
    }
}
