//! Exponential family: exponential, Laplace and exponential power.

use super::gamma::standard_gamma;
use super::{check_probability, positive, Cdf, Density, Gamma, InverseCdf};
use rand::Rng;
use rand_distr::Distribution;
use stoch_core::math::special::{gamma_p, gamma_q, ln_gamma};
use stoch_core::types::DistributionError;

/// Exponential distribution with mean `mu`: `p(x) = e^(-x/mu) / mu`, `x ≥ 0`.
///
/// # Examples
///
/// ```rust
/// use stoch_random::distributions::{Cdf, Exponential, InverseCdf};
///
/// let dist = Exponential::new(2.0).unwrap();
/// assert!((dist.cdf_upper(2.0) - (-1.0_f64).exp()).abs() < 1e-15);
/// assert!((dist.inv_cdf_upper((-1.0_f64).exp()).unwrap() - 2.0).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    mu: f64,
}

impl Exponential {
    /// Exponential with mean `mu > 0`.
    pub fn new(mu: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            mu: positive("mu", mu)?,
        })
    }

    /// Mean.
    pub fn mu(&self) -> f64 {
        self.mu
    }
}

impl Distribution<f64> for Exponential {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.gen();
        -self.mu * (-u).ln_1p()
    }
}

impl Density for Exponential {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            0.0
        } else {
            (-x / self.mu).exp() / self.mu
        }
    }
}

impl Cdf for Exponential {
    fn cdf_lower(&self, x: f64) -> f64 {
        if x < 0.0 {
            0.0
        } else {
            -(-x / self.mu).exp_m1()
        }
    }

    fn cdf_upper(&self, x: f64) -> f64 {
        if x < 0.0 {
            1.0
        } else {
            (-x / self.mu).exp()
        }
    }
}

impl InverseCdf for Exponential {
    fn inv_cdf_lower(&self, p: f64) -> Result<f64, DistributionError> {
        Ok(-self.mu * (-check_probability(p)?).ln_1p())
    }

    fn inv_cdf_upper(&self, q: f64) -> Result<f64, DistributionError> {
        Ok(-self.mu * check_probability(q)?.ln())
    }
}

/// Laplace (two-sided exponential) distribution with width `a`:
/// `p(x) = e^(-|x|/a) / (2a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Laplace {
    a: f64,
}

impl Laplace {
    /// Laplace with width `a > 0`.
    pub fn new(a: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            a: positive("a", a)?,
        })
    }

    /// Width.
    pub fn a(&self) -> f64 {
        self.a
    }
}

impl Distribution<f64> for Laplace {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = loop {
            let u = 2.0 * rng.gen::<f64>() - 1.0;
            if u != 0.0 {
                break u;
            }
        };
        if u < 0.0 {
            self.a * (-u).ln()
        } else {
            -self.a * u.ln()
        }
    }
}

impl Density for Laplace {
    fn pdf(&self, x: f64) -> f64 {
        (-x.abs() / self.a).exp() / (2.0 * self.a)
    }
}

impl Cdf for Laplace {
    fn cdf_lower(&self, x: f64) -> f64 {
        let u = x / self.a;
        if u < 0.0 {
            0.5 * u.exp()
        } else {
            1.0 - 0.5 * (-u).exp()
        }
    }

    fn cdf_upper(&self, x: f64) -> f64 {
        let u = x / self.a;
        if u < 0.0 {
            1.0 - 0.5 * u.exp()
        } else {
            0.5 * (-u).exp()
        }
    }
}

impl InverseCdf for Laplace {
    fn inv_cdf_lower(&self, p: f64) -> Result<f64, DistributionError> {
        let p = check_probability(p)?;
        Ok(if p < 0.5 {
            self.a * (2.0 * p).ln()
        } else {
            -self.a * (2.0 * (1.0 - p)).ln()
        })
    }

    fn inv_cdf_upper(&self, q: f64) -> Result<f64, DistributionError> {
        let q = check_probability(q)?;
        Ok(if q < 0.5 {
            -self.a * (2.0 * q).ln()
        } else {
            self.a * (2.0 * (1.0 - q)).ln()
        })
    }
}

/// Exponential power distribution with scale `a` and exponent `b`:
/// `p(x) = e^(-|x/a|^b) / (2a Γ(1 + 1/b))`.
///
/// `b = 1` is the Laplace distribution and `b = 2` a Gaussian with
/// `sigma = a / √2`.
///
/// # Algorithm
///
/// `|X/a|^b` follows a gamma distribution with shape `1/b`, so sampling draws
/// `V ~ Gamma(1/b)`, returns `a·V^(1/b)` with a random sign, and the CDF and
/// its inverse go through the regularised incomplete gamma function.
///
/// # Examples
///
/// ```rust
/// use stoch_random::distributions::{Cdf, ExponentialPower, InverseCdf, Laplace};
///
/// let exppow = ExponentialPower::new(1.5, 1.0).unwrap();
/// let laplace = Laplace::new(1.5).unwrap();
/// assert!((exppow.cdf_lower(-0.7) - laplace.cdf_lower(-0.7)).abs() < 1e-12);
///
/// let x = exppow.inv_cdf_lower(0.9).unwrap();
/// assert!((exppow.cdf_lower(x) - 0.9).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialPower {
    a: f64,
    b: f64,
    radial: Gamma,
}

impl ExponentialPower {
    /// Exponential power with scale `a > 0` and exponent `b > 0`.
    pub fn new(a: f64, b: f64) -> Result<Self, DistributionError> {
        let a = positive("a", a)?;
        let b = positive("b", b)?;
        Ok(Self {
            a,
            b,
            radial: Gamma::new(1.0 / b, 1.0)?,
        })
    }

    /// Scale.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Exponent.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// `x = ±a·t^(1/b)` for a standardised gamma quantile `t`.
    fn from_radial(&self, t: f64, negative: bool) -> f64 {
        let x = self.a * t.powf(1.0 / self.b);
        if negative {
            -x
        } else {
            x
        }
    }
}

impl Distribution<f64> for ExponentialPower {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.gen();
        let v = standard_gamma(rng, 1.0 / self.b);
        self.from_radial(v, u <= 0.5)
    }
}

impl Density for ExponentialPower {
    fn pdf(&self, x: f64) -> f64 {
        let ln_norm = ln_gamma(1.0 + 1.0 / self.b);
        (-(x / self.a).abs().powf(self.b) - ln_norm).exp() / (2.0 * self.a)
    }
}

impl Cdf for ExponentialPower {
    fn cdf_lower(&self, x: f64) -> f64 {
        let u = x / self.a;
        let shape = 1.0 / self.b;
        if u < 0.0 {
            0.5 * gamma_q(shape, (-u).powf(self.b))
        } else {
            0.5 * (1.0 + gamma_p(shape, u.powf(self.b)))
        }
    }

    fn cdf_upper(&self, x: f64) -> f64 {
        let u = x / self.a;
        let shape = 1.0 / self.b;
        if u < 0.0 {
            0.5 * (1.0 + gamma_p(shape, (-u).powf(self.b)))
        } else {
            0.5 * gamma_q(shape, u.powf(self.b))
        }
    }
}

impl InverseCdf for ExponentialPower {
    fn inv_cdf_lower(&self, p: f64) -> Result<f64, DistributionError> {
        let p = check_probability(p)?;
        if p < 0.5 {
            let t = self.radial.inv_cdf_upper(2.0 * p)?;
            Ok(self.from_radial(t, true))
        } else {
            let t = self.radial.inv_cdf_lower(2.0 * p - 1.0)?;
            Ok(self.from_radial(t, false))
        }
    }

    /// The distribution is symmetric, so `Qinv(q) = -Pinv(q)`.
    fn inv_cdf_upper(&self, q: f64) -> Result<f64, DistributionError> {
        Ok(-self.inv_cdf_lower(q)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_exponential_support() {
        let dist = Exponential::new(3.0).unwrap();
        assert_eq!(dist.pdf(-0.1), 0.0);
        assert_eq!(dist.cdf_lower(-1.0), 0.0);
        assert_eq!(dist.cdf_upper(-1.0), 1.0);
        assert_eq!(dist.inv_cdf_lower(0.0), Ok(0.0));
        assert_eq!(dist.inv_cdf_upper(0.0), Ok(f64::INFINITY));
    }

    #[test]
    fn test_exponential_samples_non_negative() {
        let dist = Exponential::new(0.5).unwrap();
        let mut rng = Pcg64::seed_from_u64(1);
        let n = 100_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let x = dist.sample(&mut rng);
            assert!(x >= 0.0);
            sum += x;
        }
        assert_relative_eq!(sum / n as f64, 0.5, epsilon = 0.01);
    }

    #[test]
    fn test_laplace_symmetry() {
        let dist = Laplace::new(2.0).unwrap();
        for x in [0.1, 1.0, 5.0] {
            assert_relative_eq!(dist.cdf_lower(-x), dist.cdf_upper(x), max_relative = 1e-15);
            assert_relative_eq!(dist.pdf(-x), dist.pdf(x));
        }
        assert_eq!(dist.cdf_lower(0.0), 0.5);
    }

    #[test]
    fn test_laplace_inverse_round_trip() {
        let dist = Laplace::new(0.7).unwrap();
        for x in [-3.0, -0.5, 0.2, 2.0] {
            assert_relative_eq!(dist.inv_cdf_lower(dist.cdf_lower(x)).unwrap(), x, epsilon = 1e-12);
            assert_relative_eq!(dist.inv_cdf_upper(dist.cdf_upper(x)).unwrap(), x, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_exppow_matches_laplace_at_b_one() {
        let exppow = ExponentialPower::new(1.3, 1.0).unwrap();
        let laplace = Laplace::new(1.3).unwrap();
        for x in [-2.0, -0.4, 0.0, 0.9, 3.0] {
            assert_relative_eq!(exppow.pdf(x), laplace.pdf(x), max_relative = 1e-13);
            assert_relative_eq!(exppow.cdf_lower(x), laplace.cdf_lower(x), epsilon = 1e-13);
        }
    }

    #[test]
    fn test_exppow_matches_gaussian_at_b_two() {
        use crate::distributions::Gaussian;
        let exppow = ExponentialPower::new(2.0, 2.0).unwrap();
        let gauss = Gaussian::new(2.0 / 2.0_f64.sqrt()).unwrap();
        for x in [-1.5, 0.3, 2.2] {
            assert_relative_eq!(exppow.pdf(x), gauss.pdf(x), max_relative = 1e-12);
            assert_relative_eq!(exppow.cdf_upper(x), gauss.cdf_upper(x), max_relative = 1e-10);
        }
    }

    #[test]
    fn test_exppow_inverse_round_trip() {
        for b in [0.5, 1.0, 2.5, 6.0] {
            let dist = ExponentialPower::new(1.2, b).unwrap();
            for x in [-2.0, -0.3, 0.4, 1.7] {
                let p = dist.cdf_lower(x);
                assert_relative_eq!(dist.inv_cdf_lower(p).unwrap(), x, max_relative = 1e-8);
                let q = dist.cdf_upper(x);
                assert_relative_eq!(dist.inv_cdf_upper(q).unwrap(), x, max_relative = 1e-8);
            }
        }
        let dist = ExponentialPower::new(1.0, 3.0).unwrap();
        assert_eq!(dist.inv_cdf_lower(0.5), Ok(0.0));
        assert_eq!(dist.inv_cdf_lower(0.0), Ok(f64::NEG_INFINITY));
    }

    #[test]
    fn test_exppow_sample_is_symmetric() {
        let dist = ExponentialPower::new(1.0, 3.0).unwrap();
        let mut rng = Pcg64::seed_from_u64(4);
        let n = 100_000;
        let positives = (0..n).filter(|_| dist.sample(&mut rng) > 0.0).count();
        assert_relative_eq!(positives as f64 / n as f64, 0.5, epsilon = 0.01);
    }
}
