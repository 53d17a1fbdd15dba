//! Validated run configuration.

use qdrift_env::DriftError;
use serde::{Deserialize, Serialize};

/// Default number of trials per run
pub const DEFAULT_SIMULATIONS: u64 = 1000;

/// Default noise level
pub const DEFAULT_NOISE: f64 = 0.3;

/// Immutable configuration for one analysis run.
///
/// Construct with [`SimulationConfig::new`]; invalid values never reach a
/// runner. Deserialization goes through the same validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSimulationConfig")]
pub struct SimulationConfig {
    simulations: u64,
    noise: f64,
    seed: Option<u64>,
}

/// Unvalidated wire shape of [`SimulationConfig`].
#[derive(Deserialize)]
struct RawSimulationConfig {
    simulations: u64,
    noise: f64,
    #[serde(default)]
    seed: Option<u64>,
}

impl TryFrom<RawSimulationConfig> for SimulationConfig {
    type Error = DriftError;

    fn try_from(raw: RawSimulationConfig) -> Result<Self, Self::Error> {
        Self::new(raw.simulations, raw.noise, raw.seed)
    }
}

impl SimulationConfig {
    /// Validates and builds a configuration.
    ///
    /// # Errors
    /// * `DriftError::InvalidSimulations` - `simulations < 1`
    /// * `DriftError::InvalidNoise` - `noise` not finite or outside `[0.0, 1.0]`
    pub fn new(simulations: u64, noise: f64, seed: Option<u64>) -> Result<Self, DriftError> {
        if simulations < 1 {
            return Err(DriftError::InvalidSimulations(simulations));
        }
        if !noise.is_finite() || !(0.0..=1.0).contains(&noise) {
            return Err(DriftError::InvalidNoise(noise));
        }
        Ok(Self {
            simulations,
            noise,
            seed,
        })
    }

    /// Number of trials to run.
    pub fn simulations(&self) -> u64 {
        self.simulations
    }

    /// Noise level in `[0.0, 1.0]`.
    pub fn noise(&self) -> f64 {
        self.noise
    }

    /// Seed for a reproducible run, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns a copy with a different noise level, revalidated.
    pub fn with_noise(&self, noise: f64) -> Result<Self, DriftError> {
        Self::new(self.simulations, noise, self.seed)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            simulations: DEFAULT_SIMULATIONS,
            noise: DEFAULT_NOISE,
            seed: None,
        }
    }
}
