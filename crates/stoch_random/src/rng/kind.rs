//! The closed set of pseudo-random engine kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use stoch_core::types::GeneratorError;

/// Pseudo-random engine backing a [`Generator`](super::Generator).
///
/// Every kind is seedable from a `u64`, serialisable, and produces the same
/// sequence on every platform for a given seed.
///
/// # Examples
///
/// ```rust
/// use stoch_random::rng::GeneratorKind;
///
/// let kind: GeneratorKind = "chacha20".parse().unwrap();
/// assert_eq!(kind, GeneratorKind::ChaCha20);
/// assert_eq!(kind.name(), "chacha20");
/// assert_eq!(GeneratorKind::default(), GeneratorKind::Pcg64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    /// PCG XSH RR 64/32 (64-bit state).
    Pcg32,
    /// PCG XSL RR 128/64 (128-bit state).
    #[default]
    Pcg64,
    /// PCG XSL RR 128/64 with a multiplicative congruential base.
    Pcg64Mcg,
    /// ChaCha stream cipher, 8 rounds.
    ChaCha8,
    /// ChaCha stream cipher, 12 rounds.
    ChaCha12,
    /// ChaCha stream cipher, 20 rounds.
    ChaCha20,
}

impl GeneratorKind {
    /// Every available kind, in listing order.
    pub const ALL: [GeneratorKind; 6] = [
        GeneratorKind::Pcg32,
        GeneratorKind::Pcg64,
        GeneratorKind::Pcg64Mcg,
        GeneratorKind::ChaCha8,
        GeneratorKind::ChaCha12,
        GeneratorKind::ChaCha20,
    ];

    /// Stable lowercase name, used for parsing and in state blobs.
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorKind::Pcg32 => "pcg32",
            GeneratorKind::Pcg64 => "pcg64",
            GeneratorKind::Pcg64Mcg => "pcg64mcg",
            GeneratorKind::ChaCha8 => "chacha8",
            GeneratorKind::ChaCha12 => "chacha12",
            GeneratorKind::ChaCha20 => "chacha20",
        }
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            GeneratorKind::Pcg32 => "permuted congruential, 64-bit state, 32-bit output",
            GeneratorKind::Pcg64 => "permuted congruential, 128-bit state, 64-bit output",
            GeneratorKind::Pcg64Mcg => "permuted multiplicative congruential, 128-bit state",
            GeneratorKind::ChaCha8 => "ChaCha cipher stream, 8 rounds",
            GeneratorKind::ChaCha12 => "ChaCha cipher stream, 12 rounds",
            GeneratorKind::ChaCha20 => "ChaCha cipher stream, 20 rounds",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = GeneratorError;

    /// Case-insensitive lookup by [`GeneratorKind::name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        GeneratorKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| GeneratorError::UnknownKind(s.to_string()))
    }
}
