//! # Continuous Distribution Families
//!
//! Each family is an immutable parameter struct validated once by its
//! constructor. Families implement:
//!
//! - `rand_distr::Distribution<f64>`: sampling from any `rand::Rng`, including
//!   through [`Generator::sample`](crate::rng::Generator::sample)
//! - [`Density`]: the probability density
//! - [`Cdf`]: lower (`P`) and upper (`Q`) cumulative probabilities, computed
//!   separately so that each tail keeps full relative precision
//! - [`InverseCdf`]: quantiles of either tail
//!
//! The bivariate Gaussian samples pairs and carries its own two-argument
//! density; the Rayleigh tail has no closed-form CDF here.
//!
//! ## Usage Example
//!
//! ```rust
//! use stoch_random::distributions::{Cdf, Density, Gaussian, InverseCdf};
//! use stoch_random::rng::Generator;
//!
//! let dist = Gaussian::new(2.0).unwrap();
//! let p = dist.cdf_lower(1.0);
//! assert!((p + dist.cdf_upper(1.0) - 1.0).abs() < 1e-12);
//! assert!((dist.inv_cdf_lower(p).unwrap() - 1.0).abs() < 1e-10);
//! assert!(dist.pdf(0.0) > dist.pdf(1.0));
//!
//! let mut rng = Generator::default();
//! let draws = rng.sample_n(&dist, 100).unwrap();
//! assert_eq!(draws.len(), 100);
//! ```

mod cauchy;
mod exponential;
mod flat;
mod gamma;
mod gaussian;
mod lognormal;
mod rayleigh;

pub use cauchy::Cauchy;
pub use exponential::{Exponential, ExponentialPower, Laplace};
pub use flat::Flat;
pub use gamma::Gamma;
pub use gaussian::{BivariateGaussian, Gaussian, GaussianMethod, GaussianTail, UnitGaussian};
pub use lognormal::Lognormal;
pub use rayleigh::{Rayleigh, RayleighTail};

use stoch_core::types::DistributionError;

/// Probability density function.
pub trait Density {
    /// Density at `x`; zero outside the support.
    fn pdf(&self, x: f64) -> f64;
}

/// Cumulative distribution function, both tails.
pub trait Cdf {
    /// `P(X ≤ x)`.
    fn cdf_lower(&self, x: f64) -> f64;

    /// `Q(x) = P(X > x)`.
    fn cdf_upper(&self, x: f64) -> f64;
}

/// Quantile function, both tails.
///
/// # Errors
///
/// Both methods return `DistributionError::InvalidProbability` for an
/// argument outside `[0, 1]` (or NaN).
pub trait InverseCdf {
    /// `x` such that `P(X ≤ x) = p`.
    fn inv_cdf_lower(&self, p: f64) -> Result<f64, DistributionError>;

    /// `x` such that `Q(x) = q`.
    fn inv_cdf_upper(&self, q: f64) -> Result<f64, DistributionError>;
}

/// Rejects probabilities outside `[0, 1]`.
pub(crate) fn check_probability(p: f64) -> Result<f64, DistributionError> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(DistributionError::InvalidProbability(p))
    }
}

/// Requires a finite, strictly positive parameter.
pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64, DistributionError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(DistributionError::InvalidParameter {
            name,
            value,
            reason: "must be finite and positive",
        })
    }
}

/// Requires a finite parameter.
pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64, DistributionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DistributionError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}
