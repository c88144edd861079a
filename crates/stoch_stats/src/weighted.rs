//! Weighted moments.
//!
//! Weights act as reliability multipliers. Elements whose weight is zero or
//! negative contribute nothing; if no weight is positive the call fails with
//! `StatsError::ZeroTotalWeight`. Data and weights may have different strides
//! but must have the same logical length.
//!
//! The unbiased forms (`wvariance`, `wsd`, `wskew`, `wkurtosis`,
//! `wcovariance`) multiply the weighted second central moment by
//! `(Σw)² / ((Σw)² - Σw²)`, the effective-sample-size correction. The
//! fixed-mean forms omit it.

use stoch_core::types::{StatsError, Strided};

/// Data paired with validated weights.
#[derive(Debug, Clone, Copy)]
struct WeightedView<'a, 'b> {
    data: Strided<'a>,
    weights: Strided<'b>,
    positive: usize,
}

impl<'a, 'b> WeightedView<'a, 'b> {
    fn new(data: Strided<'a>, weights: Strided<'b>) -> Result<Self, StatsError> {
        weights.require_non_empty()?;
        data.require_same_len(&weights)?;
        let positive = weights.iter().filter(|&w| w > 0.0).count();
        if positive == 0 {
            return Err(StatsError::ZeroTotalWeight);
        }
        Ok(Self {
            data,
            weights,
            positive,
        })
    }

    /// Fails unless at least two weights are positive, so that the
    /// effective-sample-size correction is finite.
    fn require_two_positive(&self) -> Result<(), StatsError> {
        if self.positive < 2 {
            return Err(StatsError::InsufficientData {
                got: self.positive,
                need: 2,
            });
        }
        Ok(())
    }

    /// Weighted running mean of `f(x)`.
    fn running_mean(&self, f: impl Fn(f64) -> f64) -> f64 {
        let mut total = 0.0;
        let mut acc = 0.0;
        for (x, w) in self.data.iter().zip(self.weights.iter()) {
            if w > 0.0 {
                total += w;
                acc += (f(x) - acc) * (w / total);
            }
        }
        acc
    }

    /// `(Σw)² / ((Σw)² - Σw²)` over the positive weights.
    fn correction(&self) -> f64 {
        let (a, b) = self
            .weights
            .iter()
            .filter(|&w| w > 0.0)
            .fold((0.0, 0.0), |(a, b), w| (a + w, b + w * w));
        (a * a) / (a * a - b)
    }
}

fn view<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
) -> Result<WeightedView<'a, 'b>, StatsError> {
    WeightedView::new(data.into(), weights.into())
}

/// Weighted mean `Σ wᵢxᵢ / Σ wᵢ`.
///
/// # Errors
///
/// - `StatsError::EmptyInput` for empty weights
/// - `StatsError::LengthMismatch` if data and weights differ in logical length
/// - `StatsError::ZeroTotalWeight` if no weight is positive
///
/// # Examples
/// ```
/// use stoch_stats::weighted::wmean;
/// let x = [1.0, 2.0, 10.0];
/// let w = [1.0, 1.0, 0.0];
/// assert_eq!(wmean(&x, &w).unwrap(), 1.5);
/// ```
pub fn wmean<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
) -> Result<f64, StatsError> {
    Ok(view(data, weights)?.running_mean(|x| x))
}

/// Unbiased weighted variance about the weighted mean.
///
/// # Errors
///
/// As [`wmean`], plus `StatsError::InsufficientData` with fewer than two
/// positive weights.
pub fn wvariance<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
) -> Result<f64, StatsError> {
    let v = view(data, weights)?;
    let m = v.running_mean(|x| x);
    wvariance_view(&v, m)
}

/// Unbiased weighted variance about a caller-supplied mean.
pub fn wvariance_m<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
    mean: f64,
) -> Result<f64, StatsError> {
    wvariance_view(&view(data, weights)?, mean)
}

fn wvariance_view(v: &WeightedView<'_, '_>, mean: f64) -> Result<f64, StatsError> {
    v.require_two_positive()?;
    Ok(v.running_mean(|x| (x - mean) * (x - mean)) * v.correction())
}

/// Unbiased weighted standard deviation, `sqrt(wvariance)`.
pub fn wsd<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
) -> Result<f64, StatsError> {
    wvariance(data, weights).map(f64::sqrt)
}

/// Unbiased weighted standard deviation about a caller-supplied mean.
pub fn wsd_m<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
    mean: f64,
) -> Result<f64, StatsError> {
    wvariance_m(data, weights, mean).map(f64::sqrt)
}

/// Weighted variance about a population mean known a priori,
/// `Σ wᵢ(xᵢ - μ)² / Σ wᵢ`.
pub fn wvariance_with_fixed_mean<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
    mean: f64,
) -> Result<f64, StatsError> {
    Ok(view(data, weights)?.running_mean(|x| (x - mean) * (x - mean)))
}

/// Weighted standard deviation about a population mean known a priori.
pub fn wsd_with_fixed_mean<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
    mean: f64,
) -> Result<f64, StatsError> {
    wvariance_with_fixed_mean(data, weights, mean).map(f64::sqrt)
}

/// Weighted total sum of squares `Σ wᵢ(xᵢ - x̄_w)²`.
pub fn wtss<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
) -> Result<f64, StatsError> {
    let v = view(data, weights)?;
    let m = v.running_mean(|x| x);
    Ok(wtss_view(&v, m))
}

/// Weighted total sum of squares about a caller-supplied mean.
pub fn wtss_m<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
    mean: f64,
) -> Result<f64, StatsError> {
    Ok(wtss_view(&view(data, weights)?, mean))
}

fn wtss_view(v: &WeightedView<'_, '_>, mean: f64) -> f64 {
    v.data
        .iter()
        .zip(v.weights.iter())
        .filter(|&(_, w)| w > 0.0)
        .map(|(x, w)| w * (x - mean) * (x - mean))
        .sum()
}

/// Weighted mean absolute deviation from the weighted mean.
pub fn wabsdev<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
) -> Result<f64, StatsError> {
    let v = view(data, weights)?;
    let m = v.running_mean(|x| x);
    Ok(v.running_mean(|x| (x - m).abs()))
}

/// Weighted mean absolute deviation from a caller-supplied mean.
pub fn wabsdev_m<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
    mean: f64,
) -> Result<f64, StatsError> {
    Ok(view(data, weights)?.running_mean(|x| (x - mean).abs()))
}

/// Weighted skewness, standardised by the unbiased weighted standard deviation.
pub fn wskew<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
) -> Result<f64, StatsError> {
    let v = view(data, weights)?;
    let m = v.running_mean(|x| x);
    let sd = wvariance_view(&v, m)?.sqrt();
    Ok(wskew_view(&v, m, sd))
}

/// Weighted skewness with caller-supplied mean and standard deviation.
pub fn wskew_m_sd<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
    mean: f64,
    sd: f64,
) -> Result<f64, StatsError> {
    Ok(wskew_view(&view(data, weights)?, mean, sd))
}

fn wskew_view(v: &WeightedView<'_, '_>, mean: f64, sd: f64) -> f64 {
    v.running_mean(|x| {
        let z = (x - mean) / sd;
        z * z * z
    })
}

/// Weighted excess kurtosis.
pub fn wkurtosis<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
) -> Result<f64, StatsError> {
    let v = view(data, weights)?;
    let m = v.running_mean(|x| x);
    let sd = wvariance_view(&v, m)?.sqrt();
    Ok(wkurtosis_view(&v, m, sd))
}

/// Weighted excess kurtosis with caller-supplied mean and standard deviation.
pub fn wkurtosis_m_sd<'a, 'b>(
    data: impl Into<Strided<'a>>,
    weights: impl Into<Strided<'b>>,
    mean: f64,
    sd: f64,
) -> Result<f64, StatsError> {
    Ok(wkurtosis_view(&view(data, weights)?, mean, sd))
}

fn wkurtosis_view(v: &WeightedView<'_, '_>, mean: f64, sd: f64) -> f64 {
    let avg = v.running_mean(|x| {
        let z = (x - mean) / sd;
        let z2 = z * z;
        z2 * z2
    });
    avg - 3.0
}

/// Unbiased weighted covariance of `x` and `y` under shared weights.
///
/// Each sequence is centred on its own weighted mean.
///
/// # Errors
///
/// As [`wvariance`], plus `StatsError::LengthMismatch` if `y` differs in
/// logical length from `x`.
///
/// # Examples
/// ```
/// use stoch_stats::weighted::{wcovariance, wvariance};
/// let x = [1.0, 2.0, 4.0, 7.0];
/// let w = [1.0, 2.0, 1.0, 0.5];
/// // cov(x, x) is the variance
/// let cov = wcovariance(&x, &x, &w).unwrap();
/// assert!((cov - wvariance(&x, &w).unwrap()).abs() < 1e-12);
/// ```
pub fn wcovariance<'a, 'b, 'c>(
    x: impl Into<Strided<'a>>,
    y: impl Into<Strided<'b>>,
    weights: impl Into<Strided<'c>>,
) -> Result<f64, StatsError> {
    let (x, y, weights) = (x.into(), y.into(), weights.into());
    let vx = WeightedView::new(x, weights)?;
    let vy = WeightedView::new(y, weights)?;
    vx.require_two_positive()?;

    let mean_x = vx.running_mean(|v| v);
    let mean_y = vy.running_mean(|v| v);

    let mut total = 0.0;
    let mut acc = 0.0;
    for ((a, b), w) in x.iter().zip(y.iter()).zip(weights.iter()) {
        if w > 0.0 {
            total += w;
            acc += ((a - mean_x) * (b - mean_y) - acc) * (w / total);
        }
    }
    Ok(acc * vx.correction())
}
