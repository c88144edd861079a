//! Strided views over sample sequences.
//!
//! A [`Strided`] view bundles a borrowed slice with the stride at which its
//! elements participate in a computation. The stride is validated once, at
//! construction, so statistics never index outside the slice.

use super::error::StatsError;

/// Borrowed sample sequence in which every `stride`-th element participates.
///
/// The logical elements are those at indices `0, stride, 2 * stride, ...`
/// that lie inside the slice, so the logical length is
/// `ceil(data.len() / stride)`.
///
/// # Examples
/// ```
/// use stoch_core::types::Strided;
///
/// let data = [1.0, 10.0, 2.0, 20.0, 3.0, 30.0];
/// let evens = Strided::new(&data, 2).unwrap();
/// assert_eq!(evens.len(), 3);
/// assert_eq!(evens.iter().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
///
/// let odds = Strided::new(&data[1..], 2).unwrap();
/// assert_eq!(odds.get(2), Some(30.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strided<'a> {
    data: &'a [f64],
    stride: usize,
}

impl<'a> Strided<'a> {
    /// Creates a view over `data` taking every `stride`-th element.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidStride` if `stride == 0`.
    pub fn new(data: &'a [f64], stride: usize) -> Result<Self, StatsError> {
        if stride == 0 {
            return Err(StatsError::InvalidStride(stride));
        }
        Ok(Self { data, stride })
    }

    /// Creates a unit-stride view over `data`.
    #[inline]
    pub fn contiguous(data: &'a [f64]) -> Self {
        Self { data, stride: 1 }
    }

    /// Returns the stride of the view.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the number of logical elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len().div_ceil(self.stride)
    }

    /// Returns `true` if the view has no logical elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the `i`-th logical element, if any.
    #[inline]
    pub fn get(&self, i: usize) -> Option<f64> {
        i.checked_mul(self.stride)
            .and_then(|idx| self.data.get(idx))
            .copied()
    }

    /// Iterates over the logical elements.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = f64> + 'a {
        self.data.iter().step_by(self.stride).copied()
    }

    /// Returns the logical length, or `StatsError::EmptyInput` for an empty view.
    #[inline]
    pub fn require_non_empty(&self) -> Result<usize, StatsError> {
        match self.len() {
            0 => Err(StatsError::EmptyInput),
            n => Ok(n),
        }
    }

    /// Returns the logical length if it is at least `need`.
    ///
    /// # Errors
    ///
    /// - `StatsError::EmptyInput` for an empty view
    /// - `StatsError::InsufficientData` if `0 < len < need`
    pub fn require_at_least(&self, need: usize) -> Result<usize, StatsError> {
        let n = self.require_non_empty()?;
        if n < need {
            return Err(StatsError::InsufficientData { got: n, need });
        }
        Ok(n)
    }

    /// Checks that `other` has the same logical length and returns it.
    ///
    /// # Errors
    ///
    /// - `StatsError::EmptyInput` if `self` is empty
    /// - `StatsError::LengthMismatch` if the logical lengths differ
    pub fn require_same_len(&self, other: &Strided<'_>) -> Result<usize, StatsError> {
        let n = self.require_non_empty()?;
        let m = other.len();
        if n != m {
            return Err(StatsError::LengthMismatch {
                expected: n,
                found: m,
            });
        }
        Ok(n)
    }

    /// Copies the logical elements into a new vector.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

impl<'a> From<&'a [f64]> for Strided<'a> {
    fn from(data: &'a [f64]) -> Self {
        Self::contiguous(data)
    }
}

impl<'a> From<&'a Vec<f64>> for Strided<'a> {
    fn from(data: &'a Vec<f64>) -> Self {
        Self::contiguous(data.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for Strided<'a> {
    fn from(data: &'a [f64; N]) -> Self {
        Self::contiguous(data.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_stride_rejected() {
        let data = [1.0, 2.0];
        assert_eq!(
            Strided::new(&data, 0).unwrap_err(),
            StatsError::InvalidStride(0)
        );
    }

    #[test]
    fn test_logical_length_rounds_up() {
        let data = [0.0; 7];
        assert_eq!(Strided::new(&data, 1).unwrap().len(), 7);
        assert_eq!(Strided::new(&data, 2).unwrap().len(), 4);
        assert_eq!(Strided::new(&data, 3).unwrap().len(), 3);
        assert_eq!(Strided::new(&data, 7).unwrap().len(), 1);
        assert_eq!(Strided::new(&data, 100).unwrap().len(), 1);
    }

    #[test]
    fn test_get_and_iter_agree() {
        let data: Vec<f64> = (0..10).map(f64::from).collect();
        let view = Strided::new(&data, 3).unwrap();
        let collected = view.to_vec();
        assert_eq!(collected, vec![0.0, 3.0, 6.0, 9.0]);
        for (i, &x) in collected.iter().enumerate() {
            assert_eq!(view.get(i), Some(x));
        }
        assert_eq!(view.get(4), None);
        assert_eq!(view.get(usize::MAX), None);
    }

    #[test]
    fn test_empty_view() {
        let view = Strided::contiguous(&[]);
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
        assert_eq!(view.require_non_empty(), Err(StatsError::EmptyInput));
        assert_eq!(view.require_at_least(2), Err(StatsError::EmptyInput));
    }

    #[test]
    fn test_is_empty_agrees_with_len() {
        let cases: [(&[f64], usize); 4] = [(&[], 1), (&[], 4), (&[1.0], 3), (&[1.0, 2.0, 3.0], 2)];
        for (data, stride) in cases {
            let view = Strided::new(data, stride).unwrap();
            assert_eq!(view.is_empty(), view.len() == 0);
        }
    }

    #[test]
    fn test_require_at_least() {
        let data = [1.0];
        let view = Strided::from(&data);
        assert_eq!(
            view.require_at_least(2),
            Err(StatsError::InsufficientData { got: 1, need: 2 })
        );
        assert_eq!(view.require_at_least(1), Ok(1));
    }

    #[test]
    fn test_require_same_len() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [1.0, 2.0];
        let va = Strided::new(&a, 2).unwrap();
        let vb = Strided::from(&b);
        assert_eq!(va.require_same_len(&vb), Ok(2));

        let vc = Strided::from(&a);
        assert_eq!(
            vc.require_same_len(&vb),
            Err(StatsError::LengthMismatch {
                expected: 4,
                found: 2
            })
        );
    }
}
