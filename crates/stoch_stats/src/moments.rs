//! Moments of a single sample sequence.
//!
//! All accumulations are running means (`m += (x - m) / (i + 1)`), which keep
//! intermediate values on the scale of the data instead of on the scale of
//! the sum.
//!
//! Functions with an `_m` suffix take a caller-supplied mean, and `_m_sd`
//! functions additionally take a standard deviation; they skip the passes
//! that would otherwise recompute those values. Given the sample mean they
//! agree with the self-contained forms up to rounding.

use stoch_core::types::{StatsError, Strided};

/// Running mean of `f(x)` over the logical elements.
pub(crate) fn running_mean(data: &Strided<'_>, f: impl Fn(f64) -> f64) -> f64 {
    let mut acc = 0.0;
    for (i, x) in data.iter().enumerate() {
        acc += (f(x) - acc) / (i + 1) as f64;
    }
    acc
}

/// Bessel correction factor `n / (n - 1)`.
#[inline]
pub(crate) fn bessel(n: usize) -> f64 {
    n as f64 / (n - 1) as f64
}

/// Arithmetic mean.
///
/// # Errors
///
/// `StatsError::EmptyInput` for an empty sequence.
///
/// # Examples
/// ```
/// use stoch_stats::moments::mean;
/// assert_eq!(mean(&[2.0, 4.0, 9.0]).unwrap(), 5.0);
/// ```
pub fn mean<'a>(data: impl Into<Strided<'a>>) -> Result<f64, StatsError> {
    let data = data.into();
    data.require_non_empty()?;
    Ok(running_mean(&data, |x| x))
}

/// Sample variance with `N - 1` denominator.
///
/// # Errors
///
/// - `StatsError::EmptyInput` for an empty sequence
/// - `StatsError::InsufficientData` for a single element
pub fn variance<'a>(data: impl Into<Strided<'a>>) -> Result<f64, StatsError> {
    let data = data.into();
    data.require_at_least(2)?;
    let m = running_mean(&data, |x| x);
    variance_m(data, m)
}

/// Sample variance about a caller-supplied mean, `N - 1` denominator.
pub fn variance_m<'a>(data: impl Into<Strided<'a>>, mean: f64) -> Result<f64, StatsError> {
    let data = data.into();
    let n = data.require_at_least(2)?;
    Ok(running_mean(&data, |x| (x - mean) * (x - mean)) * bessel(n))
}

/// Sample standard deviation, `sqrt(variance)`.
pub fn sd<'a>(data: impl Into<Strided<'a>>) -> Result<f64, StatsError> {
    variance(data).map(f64::sqrt)
}

/// Sample standard deviation about a caller-supplied mean.
pub fn sd_m<'a>(data: impl Into<Strided<'a>>, mean: f64) -> Result<f64, StatsError> {
    variance_m(data, mean).map(f64::sqrt)
}

/// Total sum of squares about the sample mean, `Σ (xᵢ - x̄)²`.
///
/// # Examples
/// ```
/// use stoch_stats::moments::tss;
/// let data: Vec<f64> = (1..=10).map(f64::from).collect();
/// assert!((tss(&data).unwrap() - 82.5).abs() < 1e-12);
/// ```
pub fn tss<'a>(data: impl Into<Strided<'a>>) -> Result<f64, StatsError> {
    let data = data.into();
    data.require_non_empty()?;
    let m = running_mean(&data, |x| x);
    tss_m(data, m)
}

/// Total sum of squares about a caller-supplied mean.
pub fn tss_m<'a>(data: impl Into<Strided<'a>>, mean: f64) -> Result<f64, StatsError> {
    let data = data.into();
    data.require_non_empty()?;
    Ok(data.iter().map(|x| (x - mean) * (x - mean)).sum())
}

/// Variance about a population mean known a priori.
///
/// Uses the `N` denominator, so with the sample mean supplied it equals
/// `variance * (N - 1) / N`. A single element is valid input.
///
/// # Examples
/// ```
/// use stoch_stats::moments::variance_with_fixed_mean;
/// let data: Vec<f64> = (1..=10).map(f64::from).collect();
/// assert!((variance_with_fixed_mean(&data, 5.5).unwrap() - 8.25).abs() < 1e-12);
/// ```
pub fn variance_with_fixed_mean<'a>(
    data: impl Into<Strided<'a>>,
    mean: f64,
) -> Result<f64, StatsError> {
    let data = data.into();
    data.require_non_empty()?;
    Ok(running_mean(&data, |x| (x - mean) * (x - mean)))
}

/// Standard deviation about a population mean known a priori.
pub fn sd_with_fixed_mean<'a>(data: impl Into<Strided<'a>>, mean: f64) -> Result<f64, StatsError> {
    variance_with_fixed_mean(data, mean).map(f64::sqrt)
}

/// Mean absolute deviation from the sample mean, `(1/N) Σ |xᵢ - x̄|`.
pub fn absdev<'a>(data: impl Into<Strided<'a>>) -> Result<f64, StatsError> {
    let data = data.into();
    data.require_non_empty()?;
    let m = running_mean(&data, |x| x);
    absdev_m(data, m)
}

/// Mean absolute deviation from a caller-supplied mean.
pub fn absdev_m<'a>(data: impl Into<Strided<'a>>, mean: f64) -> Result<f64, StatsError> {
    let data = data.into();
    data.require_non_empty()?;
    Ok(running_mean(&data, |x| (x - mean).abs()))
}

/// Skewness, `(1/N) Σ ((xᵢ - x̄) / σ)³` with the sample standard deviation σ.
///
/// # Errors
///
/// - `StatsError::EmptyInput` for an empty sequence
/// - `StatsError::InsufficientData` for a single element
pub fn skew<'a>(data: impl Into<Strided<'a>>) -> Result<f64, StatsError> {
    let data = data.into();
    data.require_at_least(2)?;
    let m = running_mean(&data, |x| x);
    let s = sd_m(data, m)?;
    skew_m_sd(data, m, s)
}

/// Skewness with caller-supplied mean and standard deviation.
pub fn skew_m_sd<'a>(data: impl Into<Strided<'a>>, mean: f64, sd: f64) -> Result<f64, StatsError> {
    let data = data.into();
    data.require_non_empty()?;
    Ok(running_mean(&data, |x| {
        let z = (x - mean) / sd;
        z * z * z
    }))
}

/// Excess kurtosis, `(1/N) Σ ((xᵢ - x̄) / σ)⁴ - 3`.
///
/// A normal sample has excess kurtosis close to zero.
///
/// # Errors
///
/// - `StatsError::EmptyInput` for an empty sequence
/// - `StatsError::InsufficientData` for a single element
pub fn kurtosis<'a>(data: impl Into<Strided<'a>>) -> Result<f64, StatsError> {
    let data = data.into();
    data.require_at_least(2)?;
    let m = running_mean(&data, |x| x);
    let s = sd_m(data, m)?;
    kurtosis_m_sd(data, m, s)
}

/// Excess kurtosis with caller-supplied mean and standard deviation.
pub fn kurtosis_m_sd<'a>(
    data: impl Into<Strided<'a>>,
    mean: f64,
    sd: f64,
) -> Result<f64, StatsError> {
    let data = data.into();
    data.require_non_empty()?;
    let avg = running_mean(&data, |x| {
        let z = (x - mean) / sd;
        let z2 = z * z;
        z2 * z2
    });
    Ok(avg - 3.0)
}

/// Lag-1 autocorrelation,
/// `Σᵢ₌₁ (xᵢ - x̄)(xᵢ₋₁ - x̄) / Σᵢ₌₀ (xᵢ - x̄)²`.
///
/// # Errors
///
/// - `StatsError::EmptyInput` for an empty sequence
/// - `StatsError::InsufficientData` for a single element (no lagged pair)
pub fn lag1_autocorrelation<'a>(data: impl Into<Strided<'a>>) -> Result<f64, StatsError> {
    let data = data.into();
    data.require_at_least(2)?;
    let m = running_mean(&data, |x| x);
    lag1_autocorrelation_m(data, m)
}

/// Lag-1 autocorrelation about a caller-supplied mean.
pub fn lag1_autocorrelation_m<'a>(
    data: impl Into<Strided<'a>>,
    mean: f64,
) -> Result<f64, StatsError> {
    let data = data.into();
    data.require_at_least(2)?;

    let mut values = data.iter();
    let mut prev = match values.next() {
        Some(x) => x - mean,
        None => return Err(StatsError::EmptyInput),
    };
    let mut q = 0.0;
    let mut v = prev * prev;
    for (i, x) in values.enumerate() {
        let delta = x - mean;
        let k = (i + 2) as f64;
        q += (prev * delta - q) / k;
        v += (delta * delta - v) / k;
        prev = delta;
    }
    Ok(q / v)
}
