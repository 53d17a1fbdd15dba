//! Error types shared by the Q-Drift crates.

use thiserror::Error;

/// Errors that can abort a drift run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DriftError {
    /// Simulation count below one
    #[error("Simulations must be > 0 (got {0})")]
    InvalidSimulations(u64),

    /// Noise level outside `[0.0, 1.0]` or not finite
    #[error("Noise must be between 0.0 and 1.0 (got {0})")]
    InvalidNoise(f64),

    /// Internal state left its documented bounds; the run is unusable
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl DriftError {
    /// Creates an invariant violation error.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Returns true for errors raised while validating configuration.
    ///
    /// These are reported before any random draw occurs.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidSimulations(_) | Self::InvalidNoise(_))
    }
}
