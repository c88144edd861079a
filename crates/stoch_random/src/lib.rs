//! # stoch_random: Generators, Distributions and Quasirandom Sequences
//!
//! ## Sampling Layer Role
//!
//! stoch_random sits directly on stoch_core and provides:
//! - Seeded pseudo-random generators with exact state persistence and an
//!   explicit release lifecycle (`rng`)
//! - Continuous distribution families with densities, both-tail CDFs and
//!   quantiles (`distributions`)
//! - Low-discrepancy sequences for quasi-Monte Carlo (`qrng`)
//!
//! Distribution families implement `rand_distr::Distribution`, so they sample
//! from any `rand::Rng`; [`rng::Generator`] adds the lifecycle checks.
//!
//! ## Usage Examples
//!
//! ```rust
//! use stoch_random::distributions::{Cdf, Gamma};
//! use stoch_random::qrng::{QrngMethod, QuasiRandom};
//! use stoch_random::rng::{Generator, GeneratorKind};
//!
//! let mut rng = Generator::with_seed(GeneratorKind::Pcg64, 2024);
//! let gamma = Gamma::new(2.0, 1.5).unwrap();
//! let draws = rng.sample_n(&gamma, 1_000).unwrap();
//! assert!(draws.iter().all(|&x| x > 0.0));
//! assert!(gamma.cdf_lower(3.0) > 0.5);
//!
//! let mut halton = QuasiRandom::new(QrngMethod::Halton, 2).unwrap();
//! assert_eq!(halton.next_point().unwrap()[0], 0.5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod distributions;
pub mod qrng;
pub mod rng;

pub use stoch_core::types::{DistributionError, GeneratorError};
