//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON document
    Json,
}

/// hash-sampler - deterministic hash-based key sampling
///
/// Reads one key per line and prints the keys that fall in the sample.
#[derive(Parser, Debug)]
#[command(name = "hash-sampler")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input file with one key per line (reads stdin when omitted)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// TOML sampler configuration file
    #[arg(short = 'c', long, env = "HASH_SAMPLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Key hasher: line or field
    #[arg(long)]
    pub sampler: Option<String>,

    /// Hash algorithm: murmur3_32, md5, or sha1
    #[arg(long)]
    pub hasher: Option<String>,

    /// Sampling modulus; roughly 1 in N keys is selected
    #[arg(short = 'm', long, allow_hyphen_values = true)]
    pub modulus: Option<String>,

    /// Extra sampler option as name=value (repeatable)
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<String>,

    /// Number of threads used to evaluate keys (0 = rayon default)
    #[arg(short = 't', long, default_value = "0")]
    pub threads: usize,

    /// Print a summary instead of the selected keys
    #[arg(long)]
    pub summary: bool,

    /// Output format for the summary
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Validate the configuration and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log filter directive implied by the flags
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "warn"
        }
    }
}
