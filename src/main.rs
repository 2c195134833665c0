//! hash-sampler CLI entry point

use anyhow::{Context, Result};
use hash_sampler::config::cli::{Cli, OutputFormat};
use hash_sampler::config::toml::{merge_cli_with_config, parse_toml_file, DEFAULT_SAMPLER};
use hash_sampler::config::SamplerConfiguration;
use hash_sampler::output::{json, text, SampleSummary};
use hash_sampler::sampler::text::{key_hasher_for, TextKeyHasher};
use hash_sampler::HashSampler;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use tracing::{debug, info};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(&cli);

    let config = build_config(&cli)?;
    debug!(config = %config, "sampler configuration loaded");

    let key_hasher = key_hasher_for(&config).context("Configuration validation failed")?;
    HashSampler::validate_options(&key_hasher, &config)
        .context("Configuration validation failed")?;

    if cli.dry_run {
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    let sampler =
        HashSampler::init(key_hasher, &config).context("Failed to initialize sampler")?;

    let keys = read_keys(&cli)?;
    let decisions = evaluate(&sampler, &keys, cli.threads)?;
    let accepted = decisions.iter().filter(|&&d| d).count();
    info!(scanned = keys.len(), accepted, "sampling complete");

    if cli.summary {
        let summary = SampleSummary::new(
            sampler.sampler_name(),
            sampler.algorithm(),
            sampler.modulus(),
            keys.len() as u64,
            accepted as u64,
        );
        match cli.format {
            OutputFormat::Json => json::write_json_output(io::stdout().lock(), &summary)?,
            OutputFormat::Text => text::print_summary(&summary),
        }
        return Ok(());
    }

    let mut out = BufWriter::new(io::stdout().lock());
    for (key, _) in keys.iter().zip(&decisions).filter(|(_, d)| **d) {
        writeln!(out, "{}", key).context("Failed to write output")?;
    }
    out.flush().context("Failed to write output")?;

    Ok(())
}

fn init_logging(cli: &Cli) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Build the sampler configuration from the config file and CLI flags
fn build_config(cli: &Cli) -> Result<SamplerConfiguration> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => SamplerConfiguration::new(DEFAULT_SAMPLER),
    };

    merge_cli_with_config(cli, base)
}

/// Read one key per line from the input file or stdin
fn read_keys(cli: &Cli) -> Result<Vec<String>> {
    let reader: Box<dyn BufRead> = match cli.input {
        Some(ref path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input: {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    reader
        .lines()
        .map(|line| {
            line.map(|mut l| {
                if l.ends_with('\r') {
                    l.pop();
                }
                l
            })
        })
        .collect::<io::Result<Vec<_>>>()
        .context("Failed to read keys")
}

/// Run the acceptance test over every key in parallel
///
/// Results keep input order. The first hashing failure aborts the run.
fn evaluate(
    sampler: &HashSampler<TextKeyHasher>,
    keys: &[String],
    threads: usize,
) -> Result<Vec<bool>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build thread pool")?;

    let decisions = pool
        .install(|| {
            keys.par_iter()
                .map(|key| sampler.accept(key))
                .collect::<hash_sampler::Result<Vec<bool>>>()
        })
        .context("Sampling failed")?;

    Ok(decisions)
}
