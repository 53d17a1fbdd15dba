//! Q-Drift Metrics Module
//! ======================
//!
//! Summarizes a [`DistributionTable`] with three numbers:
//! - **Entropy**: Shannon entropy of the bucket frequencies (bits)
//! - **Bias**: signed skew toward collapse, `p(Collapsed) - p(Stable)`
//! - **Fragility**: three-band classification of `(entropy, bias)`
//!
//! All metrics are pure functions of the table.

use crate::decay::Bucket;
use crate::distribution::DistributionTable;
use qdrift_env::DriftError;
use serde::{Deserialize, Serialize};

/// Coarse fragility classification, ordered from least to most fragile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragilityLevel {
    Low,
    Medium,
    High,
}

impl FragilityLevel {
    /// Returns the level name.
    pub fn name(&self) -> &'static str {
        match self {
            FragilityLevel::Low => "low",
            FragilityLevel::Medium => "medium",
            FragilityLevel::High => "high",
        }
    }

    /// One-line status message for this level.
    pub fn verdict(&self) -> &'static str {
        match self {
            FragilityLevel::Low => "STABLE: System appears robust.",
            FragilityLevel::Medium => "WARNING: Moderate drift detected.",
            FragilityLevel::High => "CRITICAL: High structural fragility detected.",
        }
    }

    /// True for the level that should fail a CI gate.
    pub fn is_critical(&self) -> bool {
        matches!(self, FragilityLevel::High)
    }
}

impl std::fmt::Display for FragilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Metrics derived from one distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    /// Shannon entropy in bits, within `[0, log2(3)]`
    pub entropy_bits: f64,
    /// `p(Collapsed) - p(Stable)`, within `[-1, 1]`
    pub bias: f64,
    /// Band assigned from entropy and bias
    pub fragility_level: FragilityLevel,
}

// =============================================================================
// ENTROPY & BIAS
// =============================================================================

/// Largest entropy a table over [`Bucket::ALL`] can reach.
pub fn max_entropy_bits() -> f64 {
    (Bucket::COUNT as f64).log2()
}

/// Shannon entropy of the bucket frequencies in bits.
///
/// Uses `0 * log2(0) = 0`. Returns `0.0` for an empty table.
///
/// # Formula
/// ```text
/// H = -Σ p_i * log2(p_i)
/// ```
pub fn shannon_entropy(table: &DistributionTable) -> f64 {
    let total = table.total();
    if total == 0 {
        return 0.0;
    }

    let mut entropy = 0.0;
    for (_, count) in table.iter() {
        if count == 0 {
            continue;
        }
        let p = count as f64 / total as f64;
        entropy -= p * p.log2();
    }

    // Single-bucket tables produce -0.0; uniform tables can overshoot by an ulp
    if entropy <= 0.0 {
        0.0
    } else {
        entropy.min(max_entropy_bits())
    }
}

/// Signed skew toward collapse: `p(Collapsed) - p(Stable)`.
///
/// `-1.0` for an all-stable run, `+1.0` for an all-collapsed run.
pub fn collapse_bias(table: &DistributionTable) -> f64 {
    table.frequency(Bucket::Collapsed) - table.frequency(Bucket::Stable)
}

// =============================================================================
// FRAGILITY CLASSIFICATION
// =============================================================================

/// Cut points for the fragility bands.
///
/// A value strictly above a `*_medium` cut point raises the band to at
/// least Medium; strictly above `*_high` raises it to High. The final
/// level is the higher of the entropy band and the bias band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragilityThresholds {
    pub entropy_medium: f64,
    pub entropy_high: f64,
    pub bias_medium: f64,
    pub bias_high: f64,
}

impl Default for FragilityThresholds {
    fn default() -> Self {
        Self {
            entropy_medium: 0.4,
            entropy_high: 0.8,
            bias_medium: -0.5,
            bias_high: 0.5,
        }
    }
}

fn band(value: f64, medium: f64, high: f64) -> FragilityLevel {
    if value > high {
        FragilityLevel::High
    } else if value > medium {
        FragilityLevel::Medium
    } else {
        FragilityLevel::Low
    }
}

/// Derives [`MetricsResult`] from a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricsCalculator {
    thresholds: FragilityThresholds,
}

impl MetricsCalculator {
    /// Creates a calculator with custom cut points.
    pub fn new(thresholds: FragilityThresholds) -> Self {
        Self { thresholds }
    }

    /// Maps `(entropy, bias)` to a band. Monotone in both arguments.
    pub fn classify(&self, entropy_bits: f64, bias: f64) -> FragilityLevel {
        let t = &self.thresholds;
        let by_entropy = band(entropy_bits, t.entropy_medium, t.entropy_high);
        let by_bias = band(bias, t.bias_medium, t.bias_high);
        by_entropy.max(by_bias)
    }

    /// Computes entropy, bias, and fragility for a completed run.
    ///
    /// # Errors
    /// `DriftError::InvariantViolation` for an empty table; the runner
    /// guarantees at least one trial so this indicates corrupted input.
    pub fn compute(&self, table: &DistributionTable) -> Result<MetricsResult, DriftError> {
        if table.total() == 0 {
            return Err(DriftError::invariant("metrics requested for an empty distribution"));
        }

        let entropy_bits = shannon_entropy(table);
        let bias = collapse_bias(table);

        Ok(MetricsResult {
            entropy_bits,
            bias,
            fragility_level: self.classify(entropy_bits, bias),
        })
    }
}
