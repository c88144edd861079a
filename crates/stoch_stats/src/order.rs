//! Order statistics: extrema, their positions, median and quantiles.
//!
//! Extrema propagate NaN: if the data contains a NaN the value result is NaN
//! and the index result is the position of the first NaN. On ties the first
//! occurrence wins. Indices are logical (they count strided elements).

use stoch_core::types::{StatsError, Strided};

/// Largest element.
///
/// # Examples
/// ```
/// use stoch_stats::order::max;
/// assert_eq!(max(&[3.0, 9.0, -1.0]).unwrap(), 9.0);
/// assert!(max(&[3.0, f64::NAN, 9.0]).unwrap().is_nan());
/// ```
pub fn max<'a>(data: impl Into<Strided<'a>>) -> Result<f64, StatsError> {
    let data = data.into();
    let idx = max_index(data)?;
    data.get(idx).ok_or(StatsError::EmptyInput)
}

/// Smallest element.
pub fn min<'a>(data: impl Into<Strided<'a>>) -> Result<f64, StatsError> {
    let data = data.into();
    let idx = min_index(data)?;
    data.get(idx).ok_or(StatsError::EmptyInput)
}

/// Smallest and largest element, `(min, max)`, in one pass.
pub fn minmax<'a>(data: impl Into<Strided<'a>>) -> Result<(f64, f64), StatsError> {
    let data = data.into();
    let (imin, imax) = minmax_index(data)?;
    match (data.get(imin), data.get(imax)) {
        (Some(lo), Some(hi)) => Ok((lo, hi)),
        _ => Err(StatsError::EmptyInput),
    }
}

/// Logical index of the largest element.
pub fn max_index<'a>(data: impl Into<Strided<'a>>) -> Result<usize, StatsError> {
    extremum_index(data.into(), |x, best| x > best)
}

/// Logical index of the smallest element.
pub fn min_index<'a>(data: impl Into<Strided<'a>>) -> Result<usize, StatsError> {
    extremum_index(data.into(), |x, best| x < best)
}

/// Logical indices of the smallest and largest element, `(imin, imax)`.
///
/// # Examples
/// ```
/// use stoch_stats::order::minmax_index;
/// assert_eq!(minmax_index(&[4.0, 1.0, 7.0, 1.0, 7.0]).unwrap(), (1, 2));
/// ```
pub fn minmax_index<'a>(data: impl Into<Strided<'a>>) -> Result<(usize, usize), StatsError> {
    let data = data.into();
    data.require_non_empty()?;

    let mut values = data.iter().enumerate();
    let (mut imin, mut imax, mut lo, mut hi) = match values.next() {
        Some((_, x)) if x.is_nan() => return Ok((0, 0)),
        Some((_, x)) => (0, 0, x, x),
        None => return Err(StatsError::EmptyInput),
    };
    for (i, x) in values {
        if x.is_nan() {
            return Ok((i, i));
        }
        if x < lo {
            lo = x;
            imin = i;
        }
        if x > hi {
            hi = x;
            imax = i;
        }
    }
    Ok((imin, imax))
}

fn extremum_index(data: Strided<'_>, better: impl Fn(f64, f64) -> bool) -> Result<usize, StatsError> {
    data.require_non_empty()?;
    let mut best_idx = 0;
    let mut best = f64::NAN;
    for (i, x) in data.iter().enumerate() {
        if x.is_nan() {
            return Ok(i);
        }
        if i == 0 || better(x, best) {
            best = x;
            best_idx = i;
        }
    }
    Ok(best_idx)
}

/// Returns `StatsError::Unsorted` at the first element smaller than its
/// predecessor.
fn require_sorted(data: &Strided<'_>) -> Result<(), StatsError> {
    let mut prev = f64::NEG_INFINITY;
    for (i, x) in data.iter().enumerate() {
        if x < prev {
            return Err(StatsError::Unsorted { index: i });
        }
        prev = x;
    }
    Ok(())
}

/// Median of data sorted in ascending order.
///
/// The middle element for odd length, the mean of the two middle elements
/// for even length.
///
/// # Errors
///
/// - `StatsError::EmptyInput` for an empty sequence
/// - `StatsError::Unsorted` if the data is not ascending
pub fn median_from_sorted_data<'a>(data: impl Into<Strided<'a>>) -> Result<f64, StatsError> {
    let data = data.into();
    let n = data.require_non_empty()?;
    require_sorted(&data)?;
    sorted_median(&data, n)
}

fn sorted_median(data: &Strided<'_>, n: usize) -> Result<f64, StatsError> {
    let lhs = (n - 1) / 2;
    let rhs = n / 2;
    match (data.get(lhs), data.get(rhs)) {
        (Some(a), Some(_)) if lhs == rhs => Ok(a),
        (Some(a), Some(b)) => Ok((a + b) / 2.0),
        _ => Err(StatsError::EmptyInput),
    }
}

/// Quantile of data sorted in ascending order.
///
/// Linear interpolation between the order statistics around position
/// `(N - 1) * p`.
///
/// # Errors
///
/// - `StatsError::EmptyInput` for an empty sequence
/// - `StatsError::InvalidProbability` if `p` is outside `[0, 1]`
/// - `StatsError::Unsorted` if the data is not ascending
///
/// # Examples
/// ```
/// use stoch_stats::order::quantile_from_sorted_data;
/// let data: Vec<f64> = (1..=10).map(f64::from).collect();
/// assert!((quantile_from_sorted_data(&data, 0.15).unwrap() - 2.35).abs() < 1e-12);
/// assert!((quantile_from_sorted_data(&data, 0.92).unwrap() - 9.28).abs() < 1e-12);
/// ```
pub fn quantile_from_sorted_data<'a>(
    data: impl Into<Strided<'a>>,
    p: f64,
) -> Result<f64, StatsError> {
    let data = data.into();
    let n = data.require_non_empty()?;
    if !(0.0..=1.0).contains(&p) {
        return Err(StatsError::InvalidProbability(p));
    }
    require_sorted(&data)?;

    let position = (n - 1) as f64 * p;
    let lhs = position.floor() as usize;
    let delta = position - lhs as f64;
    let lo = data.get(lhs).ok_or(StatsError::EmptyInput)?;
    if lhs + 1 >= n || delta == 0.0 {
        return Ok(lo);
    }
    let hi = data.get(lhs + 1).ok_or(StatsError::EmptyInput)?;
    Ok((1.0 - delta) * lo + delta * hi)
}

/// Median of unsorted data.
///
/// Sorts a private copy; the caller's data is untouched. NaN values sort
/// after every number.
pub fn median<'a>(data: impl Into<Strided<'a>>) -> Result<f64, StatsError> {
    let data = data.into();
    let n = data.require_non_empty()?;
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted_median(&Strided::contiguous(&sorted), n)
}
