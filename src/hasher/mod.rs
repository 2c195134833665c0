//! Hash algorithm resolution
//!
//! This module turns the `hasher` and `modulus` options into the fixed hashing
//! state a sampler keeps for its whole lifetime.
//!
//! # Algorithms
//!
//! - **murmur3_32**: MurmurHash3 x86 32-bit with seed 0 (fast, non-cryptographic)
//! - **md5**: MD5, narrowed to 32 bits
//! - **sha1**: SHA-1, narrowed to 32 bits
//!
//! MD5 and SHA-1 are used purely as deterministic bit mixers here; nothing
//! secret is protected by them. Algorithm choice changes which keys land in
//! the sample, not how many.
//!
//! # Narrowing
//!
//! Every algorithm produces a signed 32-bit value. Digests wider than 32 bits
//! keep their first four bytes, read little-endian. See [`HashAccumulator`].
//!
//! # Example
//!
//! ```
//! use hash_sampler::hasher::{HashAlgorithm, Modulus};
//!
//! let algorithm: HashAlgorithm = "md5".parse()?;
//! let modulus = Modulus::parse("7")?;
//!
//! let mut acc = algorithm.new_accumulator();
//! acc.put_bytes(b"row1");
//! assert!(modulus.divides(acc.finish()?));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod accumulator;

pub use accumulator::HashAccumulator;

use crate::config::{SamplerOptions, HASHER_OPTION, MODULUS_OPTION};
use crate::{Result, SamplerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Supported hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[serde(rename = "murmur3_32")]
    Murmur3_32,
    #[serde(rename = "md5")]
    Md5,
    #[serde(rename = "sha1")]
    Sha1,
}

impl HashAlgorithm {
    /// Every supported algorithm
    pub const ALL: [HashAlgorithm; 3] = [Self::Murmur3_32, Self::Md5, Self::Sha1];

    /// Option value naming this algorithm
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Murmur3_32 => "murmur3_32",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
        }
    }

    /// Create a fresh accumulator
    ///
    /// Accumulators are never shared; every acceptance test gets its own.
    pub fn new_accumulator(&self) -> HashAccumulator {
        HashAccumulator::new(*self)
    }
}

impl FromStr for HashAlgorithm {
    type Err = SamplerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == s)
            .ok_or_else(|| SamplerError::UnknownAlgorithm(s.to_string()))
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling modulus
///
/// Always strictly positive and never above `i32::MAX`, so any value read
/// from an option fits the same range a 32-bit signed integer does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Modulus(NonZeroU32);

impl Modulus {
    /// Parse a modulus option value
    ///
    /// The value must be a decimal 32-bit signed integer greater than zero.
    pub fn parse(value: &str) -> Result<Self> {
        let parsed = value
            .parse::<i32>()
            .map_err(|e| SamplerError::invalid(MODULUS_OPTION, value, e.to_string()))?;

        u32::try_from(parsed)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or_else(|| SamplerError::invalid(MODULUS_OPTION, value, "must be positive"))
    }

    /// Modulus as an integer
    pub fn get(&self) -> u32 {
        self.0.get()
    }

    /// Whether `hash` falls in the sample
    ///
    /// Uses the absolute value of the signed hash, which gives the same
    /// answer as a signed remainder test for every input, `i32::MIN`
    /// included.
    #[inline]
    pub fn divides(&self, hash: i32) -> bool {
        hash.unsigned_abs() % self.0.get() == 0
    }

    /// Long-run fraction of keys expected in the sample
    pub fn expected_rate(&self) -> f64 {
        1.0 / self.get() as f64
    }
}

impl TryFrom<u32> for Modulus {
    type Error = SamplerError;

    fn try_from(value: u32) -> Result<Self> {
        Self::parse(&value.to_string())
    }
}

impl From<Modulus> for u32 {
    fn from(modulus: Modulus) -> Self {
        modulus.get()
    }
}

impl fmt::Display for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved hashing state of a sampler
///
/// Derived once from the options at initialization and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashPolicy {
    pub algorithm: HashAlgorithm,
    pub modulus: Modulus,
}

impl HashPolicy {
    /// Resolve the algorithm and modulus from an option mapping
    ///
    /// Both options must be present whether or not validation ran first.
    pub fn from_options(options: &SamplerOptions) -> Result<Self> {
        let hasher = required(options, HASHER_OPTION)?;
        let modulus = required(options, MODULUS_OPTION)?;

        Ok(Self {
            algorithm: hasher.parse()?,
            modulus: Modulus::parse(modulus)?,
        })
    }

    /// Apply the modulus test to a finished hash
    #[inline]
    pub fn accepts(&self, hash: i32) -> bool {
        self.modulus.divides(hash)
    }
}

fn required<'a>(options: &'a SamplerOptions, name: &str) -> Result<&'a str> {
    options
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| SamplerError::MissingOption(name.to_string()))
}
