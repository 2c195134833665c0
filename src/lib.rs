//! hash-sampler - deterministic hash-based record sampling
//!
//! Selects a reproducible, roughly uniform subset of record keys for a sorted
//! key-value store. A key is in the sample when the hash of some part of it is
//! divisible by a configured modulus, so about `1 / modulus` of all keys are
//! selected and the same key is always selected (or not) the same way.
//!
//! # Architecture
//!
//! - **Configuration validation**: `hasher` and `modulus` options are checked
//!   before any hash state exists ([`config::validator`])
//! - **Hash resolution**: option values become a fixed algorithm and modulus
//!   ([`hasher`])
//! - **Acceptance**: a pluggable [`KeyHasher`] writes key bytes into a fresh
//!   accumulator and the modulus test decides ([`sampler`])

pub mod config;
pub mod error;
pub mod hasher;
pub mod output;
pub mod sampler;

// Re-export commonly used types
pub use config::SamplerConfiguration;
pub use error::SamplerError;
pub use hasher::{HashAccumulator, HashAlgorithm, HashPolicy, Modulus};
pub use sampler::{key_hasher_fn, HashSampler, KeyHasher, Sampler};

/// Result type used throughout hash-sampler
pub type Result<T> = std::result::Result<T, SamplerError>;
