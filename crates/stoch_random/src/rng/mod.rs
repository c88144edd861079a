//! # Seeded Pseudo-Random Generators
//!
//! This module provides the [`Generator`] type: a seeded pseudo-random
//! generator with an explicit lifecycle, exact state persistence and
//! lifecycle-checked sampling from any `rand_distr::Distribution`.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every kind is seeded from a `u64` and produces the
//!   same stream on every platform
//! - **Closed set of kinds**: [`GeneratorKind`] is an enum; there is no
//!   mutable registry to initialise
//! - **Explicit release**: [`Generator::release`] drops the engine, after
//!   which every operation reports `GeneratorError::Released`
//!
//! ## Module Structure
//!
//! - [`kind`]: The closed set of engine kinds
//! - [`generator`]: The generator, its draws and its state persistence
//!
//! ## Usage Example
//!
//! ```rust
//! use stoch_random::rng::{Generator, GeneratorKind};
//!
//! let mut rng = Generator::with_seed(GeneratorKind::ChaCha8, 7);
//! let die = rng.uniform_int(6).unwrap() + 1;
//! assert!((1..=6).contains(&die));
//!
//! let mut copy = rng.try_clone().unwrap();
//! assert_eq!(rng.get().unwrap(), copy.get().unwrap());
//! ```

pub mod generator;
pub mod kind;

pub use generator::Generator;
pub use kind::GeneratorKind;
