//! TOML configuration file parsing
//!
//! A sampler configuration file names the key hasher and lists its options:
//!
//! ```toml
//! sampler = "field"
//!
//! [options]
//! hasher = "murmur3_32"
//! modulus = 1009
//! delimiter = ","
//! ```
//!
//! Option values may be strings, integers or booleans. They are turned into
//! strings on load, so the rest of the crate only ever sees a flat
//! string-to-string mapping.

use super::*;
use crate::config::cli::Cli;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawConfiguration {
    sampler: Option<String>,
    #[serde(default)]
    options: BTreeMap<String, OptionValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OptionValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl OptionValue {
    fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::Integer(i) => i.to_string(),
            Self::Boolean(b) => b.to_string(),
        }
    }
}

/// Default key hasher when a file does not name one
pub const DEFAULT_SAMPLER: &str = "line";

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<SamplerConfiguration> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<SamplerConfiguration> {
    let raw: RawConfiguration =
        ::toml::from_str(contents).context("Failed to parse TOML configuration")?;

    Ok(SamplerConfiguration {
        sampler: raw.sampler.unwrap_or_else(|| DEFAULT_SAMPLER.to_string()),
        options: raw
            .options
            .into_iter()
            .map(|(name, value)| (name, value.into_string()))
            .collect(),
    })
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: SamplerConfiguration) -> Result<SamplerConfiguration> {
    if let Some(ref sampler) = cli.sampler {
        config.sampler = sampler.clone();
    }
    if let Some(ref hasher) = cli.hasher {
        config.options.insert(HASHER_OPTION.to_string(), hasher.clone());
    }
    if let Some(ref modulus) = cli.modulus {
        config.options.insert(MODULUS_OPTION.to_string(), modulus.clone());
    }
    for option in &cli.options {
        let (name, value) = parse_option_arg(option)?;
        config.options.insert(name, value);
    }

    Ok(config)
}

/// Split a `name=value` option argument
pub fn parse_option_arg(arg: &str) -> Result<(String, String)> {
    let (name, value) = arg
        .split_once('=')
        .with_context(|| format!("Option must be in name=value form: {}", arg))?;

    if name.trim().is_empty() {
        anyhow::bail!("Option name must not be empty: {}", arg);
    }

    Ok((name.trim().to_string(), value.to_string()))
}
