//! Coverage prediction shown before a claim is submitted.

use serde::{Deserialize, Serialize};

/// Share of the claimed amount the plan pays, for every category
pub const COVERAGE_RATE: f64 = 0.8;
pub const PROCESSING_TIME: &str = "24 Hours";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Whole dollars, rounded down
    pub estimated_coverage: f64,
    pub processing_time: String,
}

impl Estimate {
    /// Covered share of `amount` as a percentage, 0 for a zero amount
    pub fn coverage_percent(&self, amount: f64) -> f64 {
        if amount > 0.0 {
            self.estimated_coverage / amount * 100.0
        } else {
            0.0
        }
    }
}

/// Flat 80% estimate. `amount` is expected to be finite and non-negative.
pub fn estimate(amount: f64) -> Estimate {
    Estimate {
        estimated_coverage: (amount * COVERAGE_RATE).floor(),
        processing_time: PROCESSING_TIME.to_string(),
    }
}
