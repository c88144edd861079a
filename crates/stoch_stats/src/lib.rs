//! # stoch_stats: Descriptive Statistics over Strided Sequences
//!
//! ## Statistics Layer Role
//!
//! stoch_stats sits directly on stoch_core and provides:
//! - Moments: mean, variance, standard deviation, total sum of squares,
//!   absolute deviation, skewness, excess kurtosis, lag-1 autocorrelation
//!   (`moments`)
//! - Association: covariance, Pearson and Spearman correlation (`correlation`)
//! - Weighted moments with effective-sample-size correction (`weighted`)
//! - Order statistics: extrema, their indices, median and quantiles (`order`)
//! - Two-sample tests: pooled variance and Student's t statistic (`two_sample`)
//!
//! Every function accepts anything that converts into a [`Strided`] view, so
//! plain slices, arrays and vectors work with unit stride. Degenerate inputs
//! are reported as [`StatsError`] values instead of producing NaN.
//!
//! ## Usage Examples
//!
//! ```rust
//! use stoch_stats::moments::{mean, variance};
//! use stoch_stats::Strided;
//!
//! let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! assert_eq!(mean(&data).unwrap(), 5.5);
//! assert!((variance(&data).unwrap() - 9.166_666_666_666_666).abs() < 1e-12);
//!
//! // Every second element: 1, 3, 5, 7, 9
//! let odd = Strided::new(&data, 2).unwrap();
//! assert_eq!(mean(odd).unwrap(), 5.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod correlation;
pub mod moments;
pub mod order;
pub mod two_sample;
pub mod weighted;

pub use stoch_core::types::{StatsError, Strided};
