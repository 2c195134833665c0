//! Human-readable text output

use super::SampleSummary;
use std::fmt::Write;

/// Format a summary as an aligned text block
pub fn format_summary(summary: &SampleSummary) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "Sampler:  {}", summary.sampler);
    let _ = writeln!(out, "Hasher:   {}", summary.hasher);
    let _ = writeln!(out, "Modulus:  {}", summary.modulus);
    let _ = writeln!(out, "Scanned:  {}", format_number(summary.scanned));
    let _ = writeln!(
        out,
        "Accepted: {} ({:.4}%, expected {:.4}%)",
        format_number(summary.accepted),
        summary.observed_rate * 100.0,
        summary.expected_rate * 100.0
    );
    out
}

/// Print a summary to stdout
pub fn print_summary(summary: &SampleSummary) {
    print!("{}", format_summary(summary));
}

/// Format a count with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
