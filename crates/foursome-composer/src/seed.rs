use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for a reproducible compose run.
///
/// This is a 128-bit seed for the [`Pcg32`] generator that drives the
/// per-stratum shuffles. Composing the same roster against the same ledger
/// with the same seed always yields the same assignment, which lets a session
/// record say exactly how its teams were drawn.
///
/// Serialized (and parsed) as a 32-character hex string.
///
/// # Example
///
/// ```
/// use foursome_composer::ComposeSeed;
/// use rand::Rng as _;
///
/// let seed: ComposeSeed = rand::rng().random();
/// let parsed: ComposeSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComposeSeed([u8; 16]);

impl ComposeSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates the random number generator this seed describes.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for ComposeSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex characters")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for ComposeSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for ComposeSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ComposeSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<ComposeSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ComposeSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        ComposeSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use rand::RngCore as _;

    use super::*;

    #[test]
    fn test_known_value_sequential_bytes() {
        let seed = ComposeSeed::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

        let deserialized: ComposeSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_leading_zeros_are_kept() {
        let seed = ComposeSeed::from_bytes([0; 16]);
        assert_eq!(seed.to_string(), "00000000000000000000000000000000");
    }

    #[test]
    fn test_parse_accepts_uppercase() {
        let seed: ComposeSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
    }

    #[test]
    fn test_parse_errors() {
        // too short
        assert!("0123456789abcdef".parse::<ComposeSeed>().is_err());
        // 32 chars but not hex
        assert!("ghijklmnopqrstuvwxyzghijklmnopqr".parse::<ComposeSeed>().is_err());
        let err = serde_json::from_str::<ComposeSeed>("\"xyz\"").unwrap_err();
        assert!(err.to_string().contains("invalid seed"));
    }

    #[test]
    fn test_same_seed_same_stream() {
        let seed: ComposeSeed = rand::rng().random();
        let mut a = seed.rng();
        let mut b = seed.rng();
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
