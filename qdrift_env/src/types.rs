//! Common types for the Q-Drift environment abstraction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one analysis run.
///
/// Seeded runs derive their id from the run parameters so that a replay
/// carries the same id as the first run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Creates a new random RunId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a deterministic RunId from the parameters of a seeded run.
    pub fn from_parameters(seed: u64, noise: f64, simulations: u64) -> Self {
        let mixed_seed = seed ^ noise.to_bits().wrapping_mul(0x9e3779b97f4a7c15);
        let mixed_count = simulations.wrapping_mul(0x517cc1b727220a95) ^ seed.rotate_left(32);

        let mut bytes = [0u8; 16];
        bytes[0..8].copy_from_slice(&mixed_seed.to_le_bytes());
        bytes[8..16].copy_from_slice(&mixed_count.to_le_bytes());
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Show first 8 chars for readability
        write!(f, "{}", &self.0.to_string()[..8])
    }
}
