//! JSON output formatting

use super::SampleSummary;
use anyhow::Context;
use std::io::Write;

/// Render a summary as pretty-printed JSON
pub fn summary_to_json(summary: &SampleSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

/// Write a summary as JSON followed by a newline
pub fn write_json_output<W: Write>(mut out: W, summary: &SampleSummary) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut out, summary).context("Failed to serialize summary")?;
    writeln!(out).context("Failed to write summary")?;
    Ok(())
}
