//! Output formatting
//!
//! Renders the result of a sampling run either as JSON or as plain text.

pub mod json;
pub mod text;

use crate::hasher::{HashAlgorithm, Modulus};
use serde::{Deserialize, Serialize};

/// Counts gathered over one sampling run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    /// Key hasher name
    pub sampler: String,
    pub hasher: HashAlgorithm,
    pub modulus: Modulus,
    /// Keys evaluated
    pub scanned: u64,
    /// Keys selected
    pub accepted: u64,
    /// `accepted / scanned`, 0 when nothing was scanned
    pub observed_rate: f64,
    /// `1 / modulus`
    pub expected_rate: f64,
}

impl SampleSummary {
    pub fn new(
        sampler: impl Into<String>,
        hasher: HashAlgorithm,
        modulus: Modulus,
        scanned: u64,
        accepted: u64,
    ) -> Self {
        let observed_rate = if scanned > 0 {
            accepted as f64 / scanned as f64
        } else {
            0.0
        };

        Self {
            sampler: sampler.into(),
            hasher,
            modulus,
            scanned,
            accepted,
            observed_rate,
            expected_rate: modulus.expected_rate(),
        }
    }
}
