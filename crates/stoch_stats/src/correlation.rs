//! Association measures between two paired sample sequences.
//!
//! Both sequences may carry their own stride; what must agree is the logical
//! length. Unequal lengths fail with `StatsError::LengthMismatch`.

use crate::moments::{bessel, running_mean};
use stoch_core::types::{StatsError, Strided};

/// Checks that `x` and `y` are paired and long enough for an `N - 1` formula.
fn paired_len(x: &Strided<'_>, y: &Strided<'_>) -> Result<usize, StatsError> {
    let n = x.require_same_len(y)?;
    if n < 2 {
        return Err(StatsError::InsufficientData { got: n, need: 2 });
    }
    Ok(n)
}

/// Sample covariance with `N - 1` denominator.
///
/// # Errors
///
/// - `StatsError::EmptyInput` if `x` is empty
/// - `StatsError::LengthMismatch` if the logical lengths differ
/// - `StatsError::InsufficientData` for a single pair
///
/// # Examples
/// ```
/// use stoch_stats::correlation::covariance;
/// let x = [1.0, 2.0, 3.0];
/// let y = [2.0, 4.0, 6.0];
/// assert!((covariance(&x, &y).unwrap() - 2.0).abs() < 1e-15);
/// ```
pub fn covariance<'a, 'b>(
    x: impl Into<Strided<'a>>,
    y: impl Into<Strided<'b>>,
) -> Result<f64, StatsError> {
    let (x, y) = (x.into(), y.into());
    paired_len(&x, &y)?;
    let mx = running_mean(&x, |v| v);
    let my = running_mean(&y, |v| v);
    covariance_m(x, y, mx, my)
}

/// Sample covariance about caller-supplied means.
pub fn covariance_m<'a, 'b>(
    x: impl Into<Strided<'a>>,
    y: impl Into<Strided<'b>>,
    mean_x: f64,
    mean_y: f64,
) -> Result<f64, StatsError> {
    let (x, y) = (x.into(), y.into());
    let n = paired_len(&x, &y)?;

    let mut acc = 0.0;
    for (i, (a, b)) in x.iter().zip(y.iter()).enumerate() {
        acc += ((a - mean_x) * (b - mean_y) - acc) / (i + 1) as f64;
    }
    Ok(acc * bessel(n))
}

/// Pearson correlation coefficient.
///
/// Single pass: the centred sums of squares and cross products are updated
/// alongside the running means.
///
/// A constant sequence has zero spread and yields NaN.
///
/// # Examples
/// ```
/// use stoch_stats::correlation::correlation;
/// let x = [1.0, 2.0, 3.0, 4.0];
/// let y = [8.0, 6.0, 4.0, 2.0];
/// assert!((correlation(&x, &y).unwrap() + 1.0).abs() < 1e-14);
/// ```
pub fn correlation<'a, 'b>(
    x: impl Into<Strided<'a>>,
    y: impl Into<Strided<'b>>,
) -> Result<f64, StatsError> {
    let (x, y) = (x.into(), y.into());
    paired_len(&x, &y)?;
    Ok(pearson(x.iter().zip(y.iter())))
}

/// Pearson correlation over already-validated pairs.
fn pearson(mut pairs: impl Iterator<Item = (f64, f64)>) -> f64 {
    let (mut mean_x, mut mean_y) = match pairs.next() {
        Some(first) => first,
        None => return f64::NAN,
    };
    let mut sum_xsq = 0.0;
    let mut sum_ysq = 0.0;
    let mut sum_cross = 0.0;

    for (i, (a, b)) in pairs.enumerate() {
        let k = (i + 1) as f64;
        let ratio = k / (k + 1.0);
        let dx = a - mean_x;
        let dy = b - mean_y;
        sum_xsq += dx * dx * ratio;
        sum_ysq += dy * dy * ratio;
        sum_cross += dx * dy * ratio;
        mean_x += dx / (k + 1.0);
        mean_y += dy / (k + 1.0);
    }

    sum_cross / (sum_xsq.sqrt() * sum_ysq.sqrt())
}

/// Spearman rank correlation.
///
/// Each sequence is replaced by its ranks (tied values share the mean of the
/// ranks they span) and the Pearson coefficient of the ranks is returned.
/// Allocates `O(n)` workspace for the ranks.
///
/// # Examples
/// ```
/// use stoch_stats::correlation::spearman;
/// // Monotone but non-linear
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [1.0, 8.0, 27.0, 64.0, 125.0];
/// assert!((spearman(&x, &y).unwrap() - 1.0).abs() < 1e-14);
/// ```
pub fn spearman<'a, 'b>(
    x: impl Into<Strided<'a>>,
    y: impl Into<Strided<'b>>,
) -> Result<f64, StatsError> {
    let (x, y) = (x.into(), y.into());
    paired_len(&x, &y)?;
    let rx = average_ranks(&x.to_vec());
    let ry = average_ranks(&y.to_vec());
    Ok(pearson(rx.into_iter().zip(ry)))
}

/// 1-based ranks of `values`; ties receive the average of their ranks.
pub(crate) fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end hold ranks start+1 ..= end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}
