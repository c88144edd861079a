//! Gaussian family: centred Gaussian, unit Gaussian, upper tail, bivariate.

use super::{check_probability, positive, Cdf, Density, InverseCdf};
use rand::distributions::Open01;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::f64::consts::{FRAC_2_PI, PI, SQRT_2};
use std::fmt;
use std::str::FromStr;
use stoch_core::math::special::{
    erfcx, std_normal_cdf, std_normal_inv_cdf, std_normal_inv_sf, std_normal_pdf, std_normal_sf,
};
use stoch_core::types::DistributionError;

/// Algorithm used to draw standard normal variates.
///
/// All three produce the same distribution; the bit streams differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GaussianMethod {
    /// Marsaglia's polar form of the Box-Muller transform.
    #[default]
    Polar,
    /// Ziggurat, via `rand_distr::StandardNormal`.
    Ziggurat,
    /// Kinderman-Monahan ratio of uniforms with Leva's quadratic bounds.
    RatioMethod,
}

impl GaussianMethod {
    /// Every method, in listing order.
    pub const ALL: [GaussianMethod; 3] = [
        GaussianMethod::Polar,
        GaussianMethod::Ziggurat,
        GaussianMethod::RatioMethod,
    ];

    /// Stable lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            GaussianMethod::Polar => "polar",
            GaussianMethod::Ziggurat => "ziggurat",
            GaussianMethod::RatioMethod => "ratio",
        }
    }

    /// One standard normal variate.
    pub(crate) fn standard<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            GaussianMethod::Polar => polar(rng),
            GaussianMethod::Ziggurat => rng.sample(StandardNormal),
            GaussianMethod::RatioMethod => ratio_of_uniforms(rng),
        }
    }
}

impl fmt::Display for GaussianMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GaussianMethod {
    type Err = DistributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        GaussianMethod::ALL
            .into_iter()
            .find(|method| method.name() == wanted)
            .ok_or(DistributionError::InvalidParameter {
                name: "method",
                value: f64::NAN,
                reason: "expected one of polar, ziggurat, ratio",
            })
    }
}

/// Marsaglia polar method.
///
/// Draws points uniformly in the square `(-1, 1)²` until one falls inside
/// the unit disc (excluding the origin), then maps its radius.
pub(crate) fn polar<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let x = -1.0 + 2.0 * rng.sample::<f64, _>(Open01);
        let y = -1.0 + 2.0 * rng.sample::<f64, _>(Open01);
        let r2 = x * x + y * y;
        if r2 <= 1.0 && r2 != 0.0 {
            return y * (-2.0 * r2.ln() / r2).sqrt();
        }
    }
}

/// Ratio of uniforms with Leva's quadratic pre-tests.
///
/// # Algorithm
///
/// Draw `u ∈ (0, 1]` and `v ∈ [-0.8578, 0.8578)`. Points inside the inner
/// quadratic bound are accepted, points outside the outer bound rejected,
/// and only those in between pay for the exact `v² ≤ -4u² ln u` test.
fn ratio_of_uniforms<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    const S: f64 = 0.449871;
    const T: f64 = -0.386595;
    const A: f64 = 0.19600;
    const B: f64 = 0.25472;
    const R1: f64 = 0.27597;
    const R2: f64 = 0.27846;
    const SCALE: f64 = 1.7156;

    loop {
        let u = 1.0 - rng.gen::<f64>();
        let v = SCALE * (rng.gen::<f64>() - 0.5);
        let x = u - S;
        let y = v.abs() - T;
        let q = x * x + y * (A * y - B * x);
        if q < R1 {
            return v / u;
        }
        if q > R2 {
            continue;
        }
        if v * v <= -4.0 * u * u * u.ln() {
            return v / u;
        }
    }
}

/// Zero-mean Gaussian with standard deviation `sigma`.
///
/// # Examples
///
/// ```rust
/// use stoch_random::distributions::{Density, Gaussian, GaussianMethod};
///
/// let dist = Gaussian::new(1.0).unwrap().with_method(GaussianMethod::RatioMethod);
/// assert!((dist.pdf(0.0) - 0.398_942_280_401_432_7).abs() < 1e-15);
/// assert!(Gaussian::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    sigma: f64,
    method: GaussianMethod,
}

impl Gaussian {
    /// Gaussian with standard deviation `sigma > 0`, sampled by the polar method.
    pub fn new(sigma: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            sigma: positive("sigma", sigma)?,
            method: GaussianMethod::default(),
        })
    }

    /// Same distribution, sampled by `method`.
    pub fn with_method(self, method: GaussianMethod) -> Self {
        Self { method, ..self }
    }

    /// Standard deviation.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Sampling algorithm.
    pub fn method(&self) -> GaussianMethod {
        self.method
    }
}

impl Distribution<f64> for Gaussian {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sigma * self.method.standard(rng)
    }
}

impl Density for Gaussian {
    fn pdf(&self, x: f64) -> f64 {
        std_normal_pdf(x / self.sigma) / self.sigma
    }
}

impl Cdf for Gaussian {
    fn cdf_lower(&self, x: f64) -> f64 {
        std_normal_cdf(x / self.sigma)
    }

    fn cdf_upper(&self, x: f64) -> f64 {
        std_normal_sf(x / self.sigma)
    }
}

impl InverseCdf for Gaussian {
    fn inv_cdf_lower(&self, p: f64) -> Result<f64, DistributionError> {
        Ok(self.sigma * std_normal_inv_cdf(check_probability(p)?))
    }

    fn inv_cdf_upper(&self, q: f64) -> Result<f64, DistributionError> {
        Ok(self.sigma * std_normal_inv_sf(check_probability(q)?))
    }
}

/// Standard normal distribution, `sigma = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnitGaussian {
    method: GaussianMethod,
}

impl UnitGaussian {
    /// Standard normal sampled by the polar method.
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard normal sampled by `method`.
    pub fn with_method(method: GaussianMethod) -> Self {
        Self { method }
    }
}

impl Distribution<f64> for UnitGaussian {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.method.standard(rng)
    }
}

impl Density for UnitGaussian {
    fn pdf(&self, x: f64) -> f64 {
        std_normal_pdf(x)
    }
}

impl Cdf for UnitGaussian {
    fn cdf_lower(&self, x: f64) -> f64 {
        std_normal_cdf(x)
    }

    fn cdf_upper(&self, x: f64) -> f64 {
        std_normal_sf(x)
    }
}

impl InverseCdf for UnitGaussian {
    fn inv_cdf_lower(&self, p: f64) -> Result<f64, DistributionError> {
        Ok(std_normal_inv_cdf(check_probability(p)?))
    }

    fn inv_cdf_upper(&self, q: f64) -> Result<f64, DistributionError> {
        Ok(std_normal_inv_sf(check_probability(q)?))
    }
}

/// Upper tail `x ≥ a` of a zero-mean Gaussian with standard deviation `sigma`.
///
/// # Algorithm
///
/// With `s = a / sigma`: for `s < 1` draw Gaussians until one exceeds `s`;
/// otherwise use the Marsaglia tail deviate `x = sqrt(s² - 2 ln v)`, accepted
/// when `u·x ≤ s`.
///
/// Densities and tail probabilities are ratios against `Q(s)`, evaluated
/// with the scaled complementary error function so they stay finite when
/// `Q(s)` itself underflows (`s` beyond about 37).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianTail {
    a: f64,
    sigma: f64,
}

impl GaussianTail {
    /// Tail above `a > 0` of a Gaussian with `sigma > 0`.
    pub fn new(a: f64, sigma: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            a: positive("a", a)?,
            sigma: positive("sigma", sigma)?,
        })
    }

    /// Tail above `a` of the standard normal.
    pub fn unit(a: f64) -> Result<Self, DistributionError> {
        Self::new(a, 1.0)
    }

    /// Lower limit of the support.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Standard deviation of the parent Gaussian.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    fn scaled_limit(&self) -> f64 {
        self.a / self.sigma
    }

    /// Upper-tail mass of the parent Gaussian above `a`. Zero in very deep
    /// tails.
    fn normaliser(&self) -> f64 {
        std_normal_sf(self.scaled_limit())
    }

    /// `ln(Q(u) / Q(s))` for `u ≥ s > 0`.
    fn ln_upper_ratio(&self, u: f64) -> f64 {
        let s = self.scaled_limit();
        (erfcx(u / SQRT_2) / erfcx(s / SQRT_2)).ln() - 0.5 * (u - s) * (u + s)
    }

    /// `u ≥ s` with `Q(u) / Q(s) = q`, for `0 < q < 1`.
    ///
    /// Inverts the standard normal directly while `q·Q(s)` is comfortably
    /// representable, otherwise runs Newton on the log ratio. Started from
    /// `sqrt(s² − 2 ln q)`, which lies above the root, the iteration
    /// decreases monotonically onto it.
    fn upper_quantile(&self, q: f64) -> f64 {
        let target = q * self.normaliser();
        if target > DIRECT_INVERSION_FLOOR {
            return std_normal_inv_sf(target);
        }
        let s = self.scaled_limit();
        let ln_q = q.ln();
        let mut u = (s * s - 2.0 * ln_q).sqrt();
        for _ in 0..TAIL_NEWTON_STEPS {
            // h(u) = ln ratio − ln q, h'(u) = −φ(u)/Q(u) = −sqrt(2/π) / erfcx(u/√2)
            let h = self.ln_upper_ratio(u) - ln_q;
            let step = h * erfcx(u / SQRT_2) / FRAC_2_PI.sqrt();
            u += step;
            if step.abs() <= f64::EPSILON * u {
                break;
            }
        }
        u
    }
}

/// Below this, `q·Q(s)` is inverted in log space.
const DIRECT_INVERSION_FLOOR: f64 = 1e-280;

const TAIL_NEWTON_STEPS: usize = 100;

impl Distribution<f64> for GaussianTail {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let s = self.scaled_limit();
        if s < 1.0 {
            loop {
                let x = polar(rng);
                if x >= s {
                    return x * self.sigma;
                }
            }
        }
        loop {
            let u: f64 = rng.gen();
            let v: f64 = rng.sample(Open01);
            let x = (s * s - 2.0 * v.ln()).sqrt();
            if x * u <= s {
                return x * self.sigma;
            }
        }
    }
}

impl Density for GaussianTail {
    fn pdf(&self, x: f64) -> f64 {
        if x < self.a {
            return 0.0;
        }
        // φ(u) / Q(s) with the common factor e^(−s²/2) cancelled
        let s = self.scaled_limit();
        let u = x / self.sigma;
        FRAC_2_PI.sqrt() * (-0.5 * (u - s) * (u + s)).exp() / (erfcx(s / SQRT_2) * self.sigma)
    }
}

impl Cdf for GaussianTail {
    fn cdf_lower(&self, x: f64) -> f64 {
        if x <= self.a {
            return 0.0;
        }
        -self.ln_upper_ratio(x / self.sigma).exp_m1()
    }

    fn cdf_upper(&self, x: f64) -> f64 {
        if x <= self.a {
            return 1.0;
        }
        self.ln_upper_ratio(x / self.sigma).exp()
    }
}

impl InverseCdf for GaussianTail {
    fn inv_cdf_lower(&self, p: f64) -> Result<f64, DistributionError> {
        let p = check_probability(p)?;
        self.inv_cdf_upper(1.0 - p)
    }

    fn inv_cdf_upper(&self, q: f64) -> Result<f64, DistributionError> {
        let q = check_probability(q)?;
        if q == 1.0 {
            return Ok(self.a);
        }
        if q == 0.0 {
            return Ok(f64::INFINITY);
        }
        Ok(self.sigma * self.upper_quantile(q))
    }
}

/// Correlated pair of zero-mean Gaussians.
///
/// Samples `(x, y)` with standard deviations `sigma_x`, `sigma_y` and
/// correlation `rho`.
///
/// # Examples
///
/// ```rust
/// use stoch_random::distributions::BivariateGaussian;
/// use stoch_random::rng::Generator;
///
/// let dist = BivariateGaussian::new(1.0, 2.0, 0.5).unwrap();
/// let mut rng = Generator::default();
/// let (x, y) = rng.sample(&dist).unwrap();
/// assert!(x.is_finite() && y.is_finite());
/// assert!(dist.pdf(0.0, 0.0).unwrap() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BivariateGaussian {
    sigma_x: f64,
    sigma_y: f64,
    rho: f64,
}

impl BivariateGaussian {
    /// Pair with `sigma_x, sigma_y > 0` and `rho ∈ [-1, 1]`.
    pub fn new(sigma_x: f64, sigma_y: f64, rho: f64) -> Result<Self, DistributionError> {
        if !(-1.0..=1.0).contains(&rho) {
            return Err(DistributionError::InvalidParameter {
                name: "rho",
                value: rho,
                reason: "must lie in [-1, 1]",
            });
        }
        Ok(Self {
            sigma_x: positive("sigma_x", sigma_x)?,
            sigma_y: positive("sigma_y", sigma_y)?,
            rho,
        })
    }

    /// Standard deviation of the first component.
    pub fn sigma_x(&self) -> f64 {
        self.sigma_x
    }

    /// Standard deviation of the second component.
    pub fn sigma_y(&self) -> f64 {
        self.sigma_y
    }

    /// Correlation coefficient.
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Joint density at `(x, y)`.
    ///
    /// # Errors
    ///
    /// `DistributionError::InvalidParameter` if `|rho| = 1`: the distribution
    /// is then concentrated on a line and has no density.
    pub fn pdf(&self, x: f64, y: f64) -> Result<f64, DistributionError> {
        let c = 1.0 - self.rho * self.rho;
        if c <= 0.0 {
            return Err(DistributionError::InvalidParameter {
                name: "rho",
                value: self.rho,
                reason: "density requires |rho| < 1",
            });
        }
        let u = x / self.sigma_x;
        let v = y / self.sigma_y;
        let norm = 2.0 * PI * self.sigma_x * self.sigma_y * c.sqrt();
        Ok((-(u * u - 2.0 * self.rho * u * v + v * v) / (2.0 * c)).exp() / norm)
    }
}

impl Distribution<(f64, f64)> for BivariateGaussian {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let (u, v, r2) = loop {
            let u = -1.0 + 2.0 * rng.gen::<f64>();
            let v = -1.0 + 2.0 * rng.gen::<f64>();
            let r2 = u * u + v * v;
            if r2 <= 1.0 && r2 != 0.0 {
                break (u, v, r2);
            }
        };
        let scale = (-2.0 * r2.ln() / r2).sqrt();
        let x = self.sigma_x * u * scale;
        let y = self.sigma_y * (self.rho * u + (1.0 - self.rho * self.rho).sqrt() * v) * scale;
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_method_names_round_trip() {
        for method in GaussianMethod::ALL {
            assert_eq!(method.name().parse::<GaussianMethod>(), Ok(method));
        }
        assert!("box-muller".parse::<GaussianMethod>().is_err());
    }

    #[test]
    fn test_pdf_scales_with_sigma() {
        let dist = Gaussian::new(2.0).unwrap();
        assert_relative_eq!(dist.pdf(1.0), std_normal_pdf(0.5) / 2.0, max_relative = 1e-15);
        assert_relative_eq!(UnitGaussian::new().pdf(0.3), std_normal_pdf(0.3));
    }

    #[test]
    fn test_inverse_round_trip() {
        for sigma in [1.0, 10.0] {
            let dist = Gaussian::new(sigma).unwrap();
            for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
                let p = dist.cdf_lower(x);
                let q = dist.cdf_upper(x);
                assert_relative_eq!(dist.inv_cdf_lower(p).unwrap(), x, epsilon = 1e-10);
                assert_relative_eq!(dist.inv_cdf_upper(q).unwrap(), x, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_inverse_rejects_invalid_probability() {
        let dist = Gaussian::new(1.0).unwrap();
        assert_eq!(
            dist.inv_cdf_lower(1.5),
            Err(DistributionError::InvalidProbability(1.5))
        );
        assert!(dist.inv_cdf_upper(-0.5).is_err());
        assert_eq!(dist.inv_cdf_lower(0.0), Ok(f64::NEG_INFINITY));
    }

    #[test]
    fn test_tail_samples_above_limit() {
        let mut rng = Pcg64::seed_from_u64(17);
        // Both the rejection branch (s < 1) and the tail deviate (s ≥ 1)
        for (a, sigma) in [(0.5, 1.0), (3.0, 1.0), (2.0, 0.5)] {
            let dist = GaussianTail::new(a, sigma).unwrap();
            for _ in 0..2_000 {
                assert!(dist.sample(&mut rng) >= a);
            }
        }
    }

    #[test]
    fn test_tail_cdf() {
        let dist = GaussianTail::new(1.5, 2.0).unwrap();
        assert_eq!(dist.cdf_lower(1.0), 0.0);
        assert_eq!(dist.cdf_upper(1.5), 1.0);
        assert_eq!(dist.pdf(1.4), 0.0);
        for x in [1.6, 2.0, 4.0, 8.0] {
            assert_relative_eq!(dist.cdf_lower(x) + dist.cdf_upper(x), 1.0, epsilon = 1e-12);
            let p = dist.cdf_lower(x);
            assert_relative_eq!(dist.inv_cdf_lower(p).unwrap(), x, max_relative = 1e-9);
            let q = dist.cdf_upper(x);
            assert_relative_eq!(dist.inv_cdf_upper(q).unwrap(), x, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_tail_pdf_integrates_to_one() {
        // Trapezoid rule over [a, a + 12 sigma]
        let dist = GaussianTail::new(0.7, 1.3).unwrap();
        let n = 20_000;
        let h = 12.0 * 1.3 / n as f64;
        let mut sum = 0.5 * (dist.pdf(0.7) + dist.pdf(0.7 + n as f64 * h));
        for i in 1..n {
            sum += dist.pdf(0.7 + i as f64 * h);
        }
        assert_relative_eq!(sum * h, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_tail_deep_limit_stays_finite() {
        // Q(40) underflows f64
        let dist = GaussianTail::new(40.0, 1.0).unwrap();
        assert_eq!(std_normal_sf(40.0), 0.0);

        // Hazard rate at s is ~s, so P(X ≤ 40.1) ≈ 1 − e^(−4.005)
        let x = 40.1;
        let p = dist.cdf_lower(x);
        let q = dist.cdf_upper(x);
        assert!(p.is_finite() && q.is_finite());
        assert_relative_eq!(p + q, 1.0, epsilon = 1e-12);
        assert_relative_eq!(q, 0.018_2, epsilon = 5e-4);

        let pdf = dist.pdf(41.0);
        assert!(pdf.is_finite() && pdf > 0.0);
        // At the limit the density equals the hazard rate φ(s)/Q(s) ≈ s + 1/s
        assert_relative_eq!(dist.pdf(40.0), 40.025, max_relative = 1e-4);

        for x in [40.01, 40.1, 40.5, 41.0] {
            let q = dist.cdf_upper(x);
            assert_relative_eq!(dist.inv_cdf_upper(q).unwrap(), x, max_relative = 1e-12);
        }
        // P rounds to 1 beyond about x = 40.8
        for x in [40.01, 40.1, 40.5] {
            let p = dist.cdf_lower(x);
            assert_relative_eq!(dist.inv_cdf_lower(p).unwrap(), x, max_relative = 1e-9);
        }
        assert_eq!(dist.inv_cdf_upper(1.0), Ok(40.0));
        assert_eq!(dist.inv_cdf_upper(0.0), Ok(f64::INFINITY));
    }

    #[test]
    fn test_tail_rejects_non_positive_limit() {
        assert!(GaussianTail::new(0.0, 1.0).is_err());
        assert!(GaussianTail::unit(-1.0).is_err());
    }

    #[test]
    fn test_bivariate_validation() {
        assert!(BivariateGaussian::new(1.0, 1.0, 1.0).is_ok());
        assert!(BivariateGaussian::new(1.0, 1.0, 1.2).is_err());
        assert!(BivariateGaussian::new(-1.0, 1.0, 0.0).is_err());

        let degenerate = BivariateGaussian::new(1.0, 1.0, -1.0).unwrap();
        assert!(degenerate.pdf(0.0, 0.0).is_err());
    }

    #[test]
    fn test_bivariate_pdf_factorises_when_uncorrelated() {
        let dist = BivariateGaussian::new(1.5, 0.5, 0.0).unwrap();
        let gx = Gaussian::new(1.5).unwrap();
        let gy = Gaussian::new(0.5).unwrap();
        assert_relative_eq!(
            dist.pdf(0.4, -0.2).unwrap(),
            gx.pdf(0.4) * gy.pdf(-0.2),
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_bivariate_perfect_correlation() {
        let dist = BivariateGaussian::new(1.0, 3.0, 1.0).unwrap();
        let mut rng = Pcg64::seed_from_u64(5);
        for _ in 0..100 {
            let (x, y) = dist.sample(&mut rng);
            assert_relative_eq!(y, 3.0 * x, epsilon = 1e-12);
        }
    }
}
