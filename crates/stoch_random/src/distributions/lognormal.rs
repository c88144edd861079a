//! Lognormal distribution.

use super::gaussian::polar;
use super::{check_probability, finite, positive, Cdf, Density, InverseCdf};
use rand::Rng;
use rand_distr::Distribution;
use stoch_core::math::special::{
    std_normal_cdf, std_normal_inv_cdf, std_normal_inv_sf, std_normal_sf, FRAC_1_SQRT_2PI,
};
use stoch_core::types::DistributionError;

/// Lognormal distribution: `ln X` is Gaussian with mean `zeta` and standard
/// deviation `sigma`.
///
/// # Examples
///
/// ```rust
/// use stoch_random::distributions::{Cdf, InverseCdf, Lognormal};
///
/// let dist = Lognormal::new(1.0, 0.5).unwrap();
/// // The median is e^zeta
/// assert!((dist.inv_cdf_lower(0.5).unwrap() - 1.0_f64.exp()).abs() < 1e-14);
/// assert_eq!(dist.cdf_lower(0.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lognormal {
    zeta: f64,
    sigma: f64,
}

impl Lognormal {
    /// Lognormal with location `zeta` and shape `sigma > 0`.
    pub fn new(zeta: f64, sigma: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            zeta: finite("zeta", zeta)?,
            sigma: positive("sigma", sigma)?,
        })
    }

    /// Location of `ln X`.
    pub fn zeta(&self) -> f64 {
        self.zeta
    }

    /// Shape: standard deviation of `ln X`.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    fn standardise(&self, x: f64) -> f64 {
        (x.ln() - self.zeta) / self.sigma
    }
}

impl Distribution<f64> for Lognormal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        (self.sigma * polar(rng) + self.zeta).exp()
    }
}

impl Density for Lognormal {
    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let u = self.standardise(x);
        FRAC_1_SQRT_2PI / (x * self.sigma) * (-u * u / 2.0).exp()
    }
}

impl Cdf for Lognormal {
    fn cdf_lower(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            std_normal_cdf(self.standardise(x))
        }
    }

    fn cdf_upper(&self, x: f64) -> f64 {
        if x <= 0.0 {
            1.0
        } else {
            std_normal_sf(self.standardise(x))
        }
    }
}

impl InverseCdf for Lognormal {
    fn inv_cdf_lower(&self, p: f64) -> Result<f64, DistributionError> {
        let p = check_probability(p)?;
        Ok((self.zeta + self.sigma * std_normal_inv_cdf(p)).exp())
    }

    fn inv_cdf_upper(&self, q: f64) -> Result<f64, DistributionError> {
        let q = check_probability(q)?;
        Ok((self.zeta + self.sigma * std_normal_inv_sf(q)).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_inverse_edges() {
        let dist = Lognormal::new(0.0, 1.0).unwrap();
        assert_eq!(dist.inv_cdf_lower(0.0), Ok(0.0));
        assert_eq!(dist.inv_cdf_lower(1.0), Ok(f64::INFINITY));
        assert_eq!(dist.inv_cdf_upper(1.0), Ok(0.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let dist = Lognormal::new(-0.5, 0.8).unwrap();
        for x in [0.05, 0.6, 1.0, 4.0, 20.0] {
            assert_relative_eq!(dist.inv_cdf_lower(dist.cdf_lower(x)).unwrap(), x, max_relative = 1e-10);
            assert_relative_eq!(dist.inv_cdf_upper(dist.cdf_upper(x)).unwrap(), x, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_pdf_value() {
        // zeta = 0, sigma = 1 at x = e: φ(1) / e
        let dist = Lognormal::new(0.0, 1.0).unwrap();
        let e = 1.0_f64.exp();
        assert_relative_eq!(dist.pdf(e), FRAC_1_SQRT_2PI * (-0.5_f64).exp() / e, max_relative = 1e-14);
        assert_eq!(dist.pdf(-1.0), 0.0);
    }

    #[test]
    fn test_samples_positive_with_log_mean_zeta() {
        let dist = Lognormal::new(0.7, 0.3).unwrap();
        let mut rng = Pcg32::seed_from_u64(13);
        let n = 100_000;
        let mut log_sum = 0.0;
        for _ in 0..n {
            let x = dist.sample(&mut rng);
            assert!(x > 0.0);
            log_sum += x.ln();
        }
        assert_relative_eq!(log_sum / n as f64, 0.7, epsilon = 0.005);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(Lognormal::new(f64::NAN, 1.0).is_err());
        assert!(Lognormal::new(0.0, 0.0).is_err());
    }
}
