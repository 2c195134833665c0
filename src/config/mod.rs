//! Configuration module
//!
//! Handles the sampler option mapping, TOML configuration files, CLI argument
//! parsing, and validation.
//!
//! A [`SamplerConfiguration`] is a flat string-to-string mapping plus the name
//! of the key-hashing policy it configures. Two option names are reserved by
//! the hashing core: [`HASHER_OPTION`] and [`MODULUS_OPTION`]. Every other
//! option belongs to the key hasher and passes through untouched.

pub mod cli;
pub mod toml;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Option selecting the hash algorithm
pub const HASHER_OPTION: &str = "hasher";

/// Option selecting the sampling modulus
pub const MODULUS_OPTION: &str = "modulus";

/// Options every hash sampler must be given before initialization
pub const REQUIRED_OPTIONS: [&str; 2] = [HASHER_OPTION, MODULUS_OPTION];

/// Accepted values for [`HASHER_OPTION`]
pub const VALID_HASHERS: [&str; 3] = ["murmur3_32", "md5", "sha1"];

/// Option mapping handed to validation and initialization
pub type SamplerOptions = BTreeMap<String, String>;

/// Sampler configuration
///
/// Constructed once by whoever loads configuration, then passed to validation
/// and initialization. Nothing in this crate mutates it afterwards.
///
/// # Example
///
/// ```
/// use hash_sampler::config::SamplerConfiguration;
///
/// let config = SamplerConfiguration::new("line")
///     .with_option("hasher", "murmur3_32")
///     .with_option("modulus", "1009");
///
/// assert_eq!(config.option("modulus"), Some("1009"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerConfiguration {
    /// Name of the key hasher this configuration is meant for
    pub sampler: String,
    /// Flat option mapping
    #[serde(default)]
    pub options: SamplerOptions,
}

impl SamplerConfiguration {
    /// Create an empty configuration for the named key hasher
    pub fn new(sampler: impl Into<String>) -> Self {
        Self {
            sampler: sampler.into(),
            options: SamplerOptions::new(),
        }
    }

    /// Add (or replace) a single option
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Add (or replace) several options at once
    pub fn with_options<I, K, V>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options
            .extend(options.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Look up a single option value
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    /// The full option mapping
    pub fn options(&self) -> &SamplerOptions {
        &self.options
    }
}

impl fmt::Display for SamplerConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.sampler)?;
        for (i, (name, value)) in self.options.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, "}}")
    }
}
