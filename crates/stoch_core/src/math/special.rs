//! Special mathematical functions.
//!
//! Double-precision implementations of the functions the distribution layer
//! needs for densities, CDFs and quantiles:
//!
//! - [`erf`], [`erfc`]: error function and its complement
//! - [`ln_gamma`]: logarithm of the gamma function
//! - [`gamma_p`], [`gamma_q`]: regularised incomplete gamma functions
//! - [`std_normal_pdf`], [`std_normal_cdf`], [`std_normal_sf`]: standard normal
//!   density, lower tail and upper tail
//! - [`std_normal_inv_cdf`], [`std_normal_inv_sf`]: standard normal quantiles
//!
//! Every complementary pair is evaluated so that the smaller tail is computed
//! directly and the larger one as its complement, which keeps
//! `lower + upper == 1` to within a few ulps.

use std::f64::consts::{PI, SQRT_2};

/// 1/√(2π) ≈ 0.3989422804014327
pub const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// √(2π)
const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// 2/√π
const FRAC_2_SQRT_PI: f64 = std::f64::consts::FRAC_2_SQRT_PI;

/// 1/√π
const FRAC_1_SQRT_PI: f64 = 0.564_189_583_547_756_3;

/// Below this argument the power series for erf is used, above it the
/// continued fraction for erfc.
const ERF_SERIES_LIMIT: f64 = 2.5;

/// Guard against division by zero in Lentz's algorithm.
const LENTZ_TINY: f64 = 1.0e-300;

const MAX_SERIES_TERMS: usize = 100_000;

/// Error function erf(x) = (2/√π) ∫₀ˣ e^(−t²) dt.
///
/// # Algorithm
/// For |x| < 2.5 the all-positive series
/// erf(x) = (2/√π) e^(−x²) Σ 2ⁿ x^(2n+1) / (1·3·…·(2n+1)),
/// otherwise `1 − erfc(|x|)` with the continued fraction of [`erfc`].
///
/// # Examples
/// ```
/// use stoch_core::math::special::erf;
/// assert_eq!(erf(0.0), 0.0);
/// assert!((erf(1.0) - 0.842_700_792_949_714_9).abs() < 1e-15);
/// assert!((erf(-1.0) + 0.842_700_792_949_714_9).abs() < 1e-15);
/// ```
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let ax = x.abs();
    let value = if ax < ERF_SERIES_LIMIT {
        erf_series(ax)
    } else {
        1.0 - (-ax * ax).exp() * erfcx_continued_fraction(ax)
    };
    value.copysign(x)
}

/// Complementary error function erfc(x) = 1 − erf(x).
///
/// Accurate in the far upper tail, where `1 − erf(x)` would cancel.
///
/// # Examples
/// ```
/// use stoch_core::math::special::erfc;
/// assert_eq!(erfc(0.0), 1.0);
/// assert!((erfc(3.0) - 2.209_049_699_858_544e-5).abs() < 1e-18);
/// assert!((erfc(-3.0) - (2.0 - 2.209_049_699_858_544e-5)).abs() < 1e-15);
/// ```
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 2.0 - erfc(-x);
    }
    if x < ERF_SERIES_LIMIT {
        1.0 - erf_series(x)
    } else {
        (-x * x).exp() * erfcx_continued_fraction(x)
    }
}

/// Scaled complementary error function erfcx(x) = e^(x²) erfc(x).
///
/// Stays finite where erfc underflows: erfcx(x) ~ 1/(x√π) as x → ∞.
///
/// # Examples
/// ```
/// use stoch_core::math::special::{erfc, erfcx};
/// assert_eq!(erfcx(0.0), 1.0);
/// assert!((erfcx(2.0) - 4.0_f64.exp() * erfc(2.0)).abs() < 1e-14);
/// assert!(erfcx(40.0) > 0.0);
/// ```
pub fn erfcx(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x == f64::INFINITY {
        return 0.0;
    }
    if x < 0.0 {
        return 2.0 * (x * x).exp() - erfcx(-x);
    }
    if x < ERF_SERIES_LIMIT {
        (x * x).exp() * (1.0 - erf_series(x))
    } else {
        erfcx_continued_fraction(x)
    }
}

/// Series for erf on `0 ≤ x < ERF_SERIES_LIMIT`.
fn erf_series(x: f64) -> f64 {
    let x2 = x * x;
    let mut term = x;
    let mut sum = x;
    for n in 1..MAX_SERIES_TERMS {
        term *= 2.0 * x2 / (2 * n + 1) as f64;
        sum += term;
        if term <= sum * f64::EPSILON * 0.5 {
            break;
        }
    }
    FRAC_2_SQRT_PI * (-x2).exp() * sum
}

/// Continued fraction for erfcx on `x ≥ ERF_SERIES_LIMIT`, evaluated with
/// the modified Lentz algorithm:
/// erfcx(x) = 1/√π · 1/(x + (1/2)/(x + 1/(x + (3/2)/(x + …)))).
fn erfcx_continued_fraction(x: f64) -> f64 {
    let mut f = x;
    let mut c = f;
    let mut d = 0.0;
    for j in 1..MAX_SERIES_TERMS {
        let a = 0.5 * j as f64;
        d = x + a * d;
        if d.abs() < LENTZ_TINY {
            d = LENTZ_TINY;
        }
        d = 1.0 / d;
        c = x + a / c;
        if c.abs() < LENTZ_TINY {
            c = LENTZ_TINY;
        }
        let delta = c * d;
        f *= delta;
        if (delta - 1.0).abs() < f64::EPSILON {
            break;
        }
    }
    FRAC_1_SQRT_PI / f
}

/// Lanczos coefficients (g = 7, n = 9).
const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural logarithm of the gamma function, ln Γ(x), for x > 0.
///
/// # Algorithm
/// Lanczos approximation (g = 7, n = 9); arguments below 0.5 go through the
/// reflection formula Γ(x)Γ(1−x) = π / sin(πx).
///
/// Returns `+∞` at 0 and NaN for negative or NaN input.
///
/// # Examples
/// ```
/// use stoch_core::math::special::ln_gamma;
/// // Γ(5) = 24
/// assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-13);
/// // Γ(1/2) = √π
/// assert!((ln_gamma(0.5) - std::f64::consts::PI.sqrt().ln()).abs() < 1e-14);
/// ```
pub fn ln_gamma(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return f64::INFINITY;
    }
    if x < 0.5 {
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    let mut acc = LANCZOS_COEFFS[0];
    for (i, &c) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
        acc += c / (x + i as f64);
    }
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
}

/// Regularised lower incomplete gamma function P(a, x) = γ(a, x) / Γ(a).
///
/// Returns NaN unless `a > 0`; `P(a, x) = 0` for `x ≤ 0`.
///
/// # Algorithm
/// Power series for `x < a + 1`, otherwise `1 − Q(a, x)` with the Legendre
/// continued fraction for `Q`.
///
/// # Examples
/// ```
/// use stoch_core::math::special::gamma_p;
/// // P(1, x) = 1 - e^{-x}
/// assert!((gamma_p(1.0, 2.0) - (1.0 - (-2.0_f64).exp())).abs() < 1e-14);
/// ```
pub fn gamma_p(a: f64, x: f64) -> f64 {
    if a.is_nan() || x.is_nan() || a <= 0.0 {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    if x == f64::INFINITY {
        return 1.0;
    }
    if x < a + 1.0 {
        incomplete_gamma_series(a, x)
    } else {
        1.0 - incomplete_gamma_continued_fraction(a, x)
    }
}

/// Regularised upper incomplete gamma function Q(a, x) = 1 − P(a, x).
///
/// # Examples
/// ```
/// use stoch_core::math::special::{gamma_p, gamma_q};
/// let (a, x) = (3.5, 2.0);
/// assert!((gamma_p(a, x) + gamma_q(a, x) - 1.0).abs() < 1e-15);
/// ```
pub fn gamma_q(a: f64, x: f64) -> f64 {
    if a.is_nan() || x.is_nan() || a <= 0.0 {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 1.0;
    }
    if x == f64::INFINITY {
        return 0.0;
    }
    if x < a + 1.0 {
        1.0 - incomplete_gamma_series(a, x)
    } else {
        incomplete_gamma_continued_fraction(a, x)
    }
}

/// e^(−x) xᵃ / Γ(a), evaluated in log space.
fn incomplete_gamma_prefactor(a: f64, x: f64) -> f64 {
    (-x + a * x.ln() - ln_gamma(a)).exp()
}

fn incomplete_gamma_series(a: f64, x: f64) -> f64 {
    let mut ap = a;
    let mut term = 1.0 / a;
    let mut sum = term;
    for _ in 0..MAX_SERIES_TERMS {
        ap += 1.0;
        term *= x / ap;
        sum += term;
        if term.abs() < sum.abs() * f64::EPSILON {
            break;
        }
    }
    sum * incomplete_gamma_prefactor(a, x)
}

fn incomplete_gamma_continued_fraction(a: f64, x: f64) -> f64 {
    let mut b = x + 1.0 - a;
    let mut c = 1.0 / LENTZ_TINY;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..MAX_SERIES_TERMS {
        let an = -(i as f64) * (i as f64 - a);
        b += 2.0;
        d = an * d + b;
        if d.abs() < LENTZ_TINY {
            d = LENTZ_TINY;
        }
        c = b + an / c;
        if c.abs() < LENTZ_TINY {
            c = LENTZ_TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;
        if (delta - 1.0).abs() < f64::EPSILON {
            break;
        }
    }
    incomplete_gamma_prefactor(a, x) * h
}

/// Standard normal PDF φ(x) = (1/√(2π)) exp(−x²/2).
///
/// # Examples
/// ```
/// use stoch_core::math::special::std_normal_pdf;
/// assert!((std_normal_pdf(0.0) - 0.3989422804014327).abs() < 1e-16);
/// ```
#[inline]
pub fn std_normal_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal lower tail Φ(x) = P(Z ≤ x).
///
/// # Examples
/// ```
/// use stoch_core::math::special::std_normal_cdf;
/// assert_eq!(std_normal_cdf(0.0), 0.5);
/// assert!((std_normal_cdf(1.0) - 0.841_344_746_068_542_9).abs() < 1e-15);
/// ```
#[inline]
pub fn std_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal upper tail Q(x) = P(Z > x) = 1 − Φ(x).
///
/// # Examples
/// ```
/// use stoch_core::math::special::std_normal_sf;
/// assert!((std_normal_sf(2.0) - 0.022_750_131_948_179_2).abs() < 1e-15);
/// ```
#[inline]
pub fn std_normal_sf(x: f64) -> f64 {
    0.5 * erfc(x / SQRT_2)
}

// Rational approximation of the normal quantile (P. J. Acklam), used as the
// starting point for Halley refinement against `std_normal_cdf`.
const QUANTILE_A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_69e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const QUANTILE_B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const QUANTILE_C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const QUANTILE_D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];
const QUANTILE_P_LOW: f64 = 0.024_25;
const QUANTILE_HALLEY_STEPS: usize = 3;

/// Lower-half quantile: returns `x ≤ 0` with Φ(x) = p for `0 < p ≤ 0.5`.
fn lower_half_quantile(p: f64) -> f64 {
    let mut x = if p < QUANTILE_P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        let num = ((((QUANTILE_C[0] * q + QUANTILE_C[1]) * q + QUANTILE_C[2]) * q
            + QUANTILE_C[3])
            * q
            + QUANTILE_C[4])
            * q
            + QUANTILE_C[5];
        let den =
            (((QUANTILE_D[0] * q + QUANTILE_D[1]) * q + QUANTILE_D[2]) * q + QUANTILE_D[3]) * q
                + 1.0;
        num / den
    } else {
        let q = p - 0.5;
        let r = q * q;
        let num = (((((QUANTILE_A[0] * r + QUANTILE_A[1]) * r + QUANTILE_A[2]) * r
            + QUANTILE_A[3])
            * r
            + QUANTILE_A[4])
            * r
            + QUANTILE_A[5])
            * q;
        let den = ((((QUANTILE_B[0] * r + QUANTILE_B[1]) * r + QUANTILE_B[2]) * r
            + QUANTILE_B[3])
            * r
            + QUANTILE_B[4])
            * r
            + 1.0;
        num / den
    };

    for _ in 0..QUANTILE_HALLEY_STEPS {
        let e = std_normal_cdf(x) - p;
        if e == 0.0 {
            break;
        }
        let u = e * SQRT_2PI * (0.5 * x * x).exp();
        if !u.is_finite() {
            break;
        }
        x -= u / (1.0 + 0.5 * x * u);
    }
    x
}

/// Standard normal quantile: returns x with Φ(x) = p.
///
/// Returns `−∞` for `p = 0`, `+∞` for `p = 1` and NaN outside `[0, 1]`.
///
/// # Examples
/// ```
/// use stoch_core::math::special::{std_normal_cdf, std_normal_inv_cdf};
/// assert_eq!(std_normal_inv_cdf(0.5), 0.0);
/// let x = std_normal_inv_cdf(0.975);
/// assert!((x - 1.959_963_984_540_054).abs() < 1e-13);
/// assert!((std_normal_cdf(x) - 0.975).abs() < 1e-15);
/// ```
pub fn std_normal_inv_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }
    if p == 0.5 {
        return 0.0;
    }
    if p < 0.5 {
        lower_half_quantile(p)
    } else {
        -lower_half_quantile(1.0 - p)
    }
}

/// Standard normal upper-tail quantile: returns x with Q(x) = q.
///
/// # Examples
/// ```
/// use stoch_core::math::special::{std_normal_inv_sf, std_normal_sf};
/// let x = std_normal_inv_sf(1e-10);
/// assert!((std_normal_sf(x) / 1e-10 - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn std_normal_inv_sf(q: f64) -> f64 {
    -std_normal_inv_cdf(q)
}
