//! Statistical acceptance tests for the distribution families.
//!
//! These tests draw large samples through [`Generator`] and check them with
//! the descriptive statistics from `stoch_stats`, and verify that the two
//! CDF tails of every family are complementary.

use approx::assert_relative_eq;
use stoch_random::distributions::{
    Cauchy, Cdf, Exponential, ExponentialPower, Flat, Gamma, Gaussian, GaussianMethod,
    GaussianTail, InverseCdf, Laplace, Lognormal, Rayleigh,
};
use stoch_random::rng::{Generator, GeneratorKind};
use stoch_stats::moments::{mean, sd};

/// Draws per method in the basic moment check.
const GAUSSIAN_DRAWS: usize = 1_000_000;
/// Draws per method in the large-sample check, same tolerance.
const GAUSSIAN_DRAWS_LARGE: usize = 4_000_000;
const MOMENT_TOLERANCE: f64 = 2e-3;

fn families() -> Vec<(&'static str, Box<dyn Cdf>)> {
    vec![
        ("gaussian", Box::new(Gaussian::new(1.3).unwrap())),
        ("exponential", Box::new(Exponential::new(0.7).unwrap())),
        ("laplace", Box::new(Laplace::new(2.0).unwrap())),
        ("exppow", Box::new(ExponentialPower::new(1.0, 2.5).unwrap())),
        ("cauchy", Box::new(Cauchy::new(1.5).unwrap())),
        ("rayleigh", Box::new(Rayleigh::new(1.2).unwrap())),
        ("gamma", Box::new(Gamma::new(3.5, 0.8).unwrap())),
        ("flat", Box::new(Flat::new(-1.0, 4.0).unwrap())),
        ("lognormal", Box::new(Lognormal::new(0.2, 0.6).unwrap())),
    ]
}

/// Verifies P(x) + Q(x) = 1 across a grid for every family.
#[test]
fn test_cdf_tails_complementary() {
    for (name, dist) in families() {
        for i in -40..=40 {
            let x = f64::from(i) * 0.125;
            let total = dist.cdf_lower(x) + dist.cdf_upper(x);
            assert!((total - 1.0).abs() < 1e-12, "{} at {}: P + Q = {}", name, x, total);
        }
    }
}

/// Verifies that the lower CDF never decreases.
#[test]
fn test_cdf_monotone() {
    for (name, dist) in families() {
        let mut previous = 0.0;
        for i in -80..=80 {
            let p = dist.cdf_lower(f64::from(i) * 0.0625);
            assert!(p >= previous - 1e-15, "{} decreases at step {}", name, i);
            previous = p;
        }
    }
}

fn assert_unit_gaussian_moments(draws: usize) {
    for method in GaussianMethod::ALL {
        let mut rng = Generator::with_seed(GeneratorKind::Pcg64, 20_240_917);
        let gaussian = Gaussian::new(1.0).unwrap().with_method(method);
        let sample = rng.sample_n(&gaussian, draws).unwrap();

        let m = mean(&sample).unwrap();
        let s = sd(&sample).unwrap();
        assert!(m.abs() < MOMENT_TOLERANCE, "{} ({} draws): mean {}", method, draws, m);
        assert!((s - 1.0).abs() < MOMENT_TOLERANCE, "{} ({} draws): sd {}", method, draws, s);
    }
}

/// Verifies each Gaussian algorithm separately: the methods need not share
/// a bit sequence, but all must pass the same moment checks.
#[test]
fn test_gaussian_moments_every_method() {
    assert_unit_gaussian_moments(GAUSSIAN_DRAWS);
}

#[test]
fn test_gaussian_moments_every_method_large_sample() {
    assert_unit_gaussian_moments(GAUSSIAN_DRAWS_LARGE);
}

/// Verifies the empirical CDF of Gamma draws against the analytic CDF.
#[test]
fn test_gamma_empirical_cdf() {
    let mut rng = Generator::with_seed(GeneratorKind::ChaCha12, 99);
    let gamma = Gamma::new(0.6, 2.0).unwrap();
    let draws = rng.sample_n(&gamma, 200_000).unwrap();
    for x in [0.1, 0.5, 1.0, 2.0, 4.0] {
        let empirical = draws.iter().filter(|&&d| d <= x).count() as f64 / draws.len() as f64;
        assert!(
            (empirical - gamma.cdf_lower(x)).abs() < 5e-3,
            "x = {}: empirical {} vs {}",
            x,
            empirical,
            gamma.cdf_lower(x)
        );
    }
}

/// Verifies that tail draws follow the truncated CDF.
#[test]
fn test_gaussian_tail_median() {
    let mut rng = Generator::with_seed(GeneratorKind::Pcg64Mcg, 5);
    let tail = GaussianTail::new(2.0, 1.5).unwrap();
    let median = tail.inv_cdf_lower(0.5).unwrap();
    let draws = rng.sample_n(&tail, 100_000).unwrap();
    assert!(draws.iter().all(|&d| d >= 2.0));
    let below = draws.iter().filter(|&&d| d <= median).count() as f64 / draws.len() as f64;
    assert!((below - 0.5).abs() < 1e-2, "fraction below median {}", below);
}

/// Verifies the exponential sample mean.
#[test]
fn test_exponential_sample_mean() {
    let mut rng = Generator::with_seed(GeneratorKind::Pcg32, 1);
    let draws = rng.sample_n(&Exponential::new(3.0).unwrap(), 1_000_000).unwrap();
    assert_relative_eq!(mean(&draws).unwrap(), 3.0, max_relative = 1e-2);
}
