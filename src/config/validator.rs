//! Configuration validation
//!
//! Checks the options the hashing core owns. Runs before initialization so a
//! bad configuration is reported without building any hash state. Options
//! owned by a key hasher are skipped here and checked by
//! [`KeyHasher::validate_options`](crate::sampler::KeyHasher::validate_options).

use super::*;
use crate::hasher::Modulus;
use crate::{Result, SamplerError};
use tracing::debug;

/// Validate the hashing options of a configuration
///
/// Every entry is visited; `hasher` must name one of [`VALID_HASHERS`] and
/// `modulus` must be a strictly positive integer. Absent options are not an
/// error at this stage.
pub fn validate_options(options: &SamplerOptions) -> Result<()> {
    for (name, value) in options {
        match name.as_str() {
            HASHER_OPTION => validate_hasher(value)?,
            MODULUS_OPTION => validate_modulus(value)?,
            _ => {}
        }
    }

    debug!(options = options.len(), "hash sampler options validated");
    Ok(())
}

/// Validate a complete configuration
pub fn validate_config(config: &SamplerConfiguration) -> Result<()> {
    validate_options(config.options())
}

fn validate_hasher(value: &str) -> Result<()> {
    if !VALID_HASHERS.contains(&value) {
        return Err(SamplerError::invalid(
            HASHER_OPTION,
            value,
            format!("expected one of {}", VALID_HASHERS.join(", ")),
        ));
    }
    Ok(())
}

fn validate_modulus(value: &str) -> Result<()> {
    Modulus::parse(value).map(|_| ())
}
