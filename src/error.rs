//! Error types for sampler configuration and key hashing

use std::io;
use thiserror::Error;

/// Failures raised while configuring a sampler or evaluating a key.
///
/// None of these are ever folded into a "not sampled" answer: a key that
/// could not be hashed is an error, not a rejection.
#[derive(Debug, Error)]
pub enum SamplerError {
    /// A present option carries a malformed or out-of-range value.
    #[error("invalid value for {option}: {value} ({reason})")]
    InvalidConfiguration {
        option: String,
        value: String,
        reason: String,
    },

    /// A required option is absent at initialization time.
    #[error("{0} not specified")]
    MissingOption(String),

    /// The `hasher` option names an algorithm this crate does not provide.
    #[error("unknown hasher: {0}")]
    UnknownAlgorithm(String),

    /// The key-byte emitter failed while writing into the hash accumulator.
    #[error("failed to hash key: {0}")]
    HashComputationFailed(#[source] io::Error),
}

impl SamplerError {
    pub(crate) fn invalid(
        option: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfiguration {
            option: option.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Name of the option this error refers to, when there is one.
    pub fn option(&self) -> Option<&str> {
        match self {
            Self::InvalidConfiguration { option, .. } => Some(option.as_str()),
            Self::MissingOption(option) => Some(option.as_str()),
            Self::UnknownAlgorithm(_) => Some(crate::config::HASHER_OPTION),
            Self::HashComputationFailed(_) => None,
        }
    }
}
