//! Two-sample comparisons under an equal-variance assumption.

use crate::moments::{mean, variance_m};
use stoch_core::types::{StatsError, Strided};

/// Pooled sample variance of two independent samples,
/// `((n₁ - 1)s₁² + (n₂ - 1)s₂²) / (n₁ + n₂ - 2)`.
///
/// # Errors
///
/// - `StatsError::EmptyInput` if either sample is empty
/// - `StatsError::InsufficientData` if either sample has one element
///
/// # Examples
/// ```
/// use stoch_stats::two_sample::pooled_variance;
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 6.0, 8.0];
/// // s₁² = 1, s₂² = 4
/// assert!((pooled_variance(&a, &b).unwrap() - 2.5).abs() < 1e-14);
/// ```
pub fn pooled_variance<'a, 'b>(
    x: impl Into<Strided<'a>>,
    y: impl Into<Strided<'b>>,
) -> Result<f64, StatsError> {
    let (x, y) = (x.into(), y.into());
    Ok(pooled(x, y)?.0)
}

/// Returns `(pooled variance, mean_x, mean_y, n_x, n_y)`.
fn pooled(x: Strided<'_>, y: Strided<'_>) -> Result<(f64, f64, f64, f64, f64), StatsError> {
    let n1 = x.require_at_least(2)? as f64;
    let n2 = y.require_at_least(2)? as f64;
    let m1 = mean(x)?;
    let m2 = mean(y)?;
    let v1 = variance_m(x, m1)?;
    let v2 = variance_m(y, m2)?;
    let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / (n1 + n2 - 2.0);
    Ok((pooled, m1, m2, n1, n2))
}

/// Student's t statistic for the difference of means,
/// `(x̄ - ȳ) / sqrt(s_p² (1/n₁ + 1/n₂))` with the pooled variance `s_p²`.
///
/// # Errors
///
/// As [`pooled_variance`].
///
/// # Examples
/// ```
/// use stoch_stats::two_sample::ttest;
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 6.0, 8.0];
/// let t = ttest(&a, &b).unwrap();
/// assert!((t - (-4.0 / (2.5_f64 * 2.0 / 3.0).sqrt())).abs() < 1e-12);
/// ```
pub fn ttest<'a, 'b>(
    x: impl Into<Strided<'a>>,
    y: impl Into<Strided<'b>>,
) -> Result<f64, StatsError> {
    let (pooled, m1, m2, n1, n2) = pooled(x.into(), y.into())?;
    Ok((m1 - m2) / (pooled * (1.0 / n1 + 1.0 / n2)).sqrt())
}
