//! Decay Model
//! ===========
//!
//! Amplitude damping of a unit signal under noise. Each trial starts with
//! amplitude `1.0`, loses a noise-scaled, draw-dependent fraction of it,
//! and lands in one of three ordered buckets.
//!
//! # Formula
//! ```text
//! damping   = noise * (floor + (1 - floor) * draw)
//! amplitude = 1.0 - damping
//!
//! amplitude >  stable    => Stable
//! amplitude <  collapse  => Collapsed
//! otherwise              => Drifted
//! ```
//!
//! With the default constants (`floor = 0.5`, `stable = 0.75`,
//! `collapse = 0.45`):
//! - `noise = 0.0` always yields amplitude `1.0` (Stable)
//! - `noise = 1.0` yields amplitude in `(0.0, 0.5]`, Collapsed for `draw > 0.1`
//! - for a fixed draw, amplitude never increases as noise increases

use qdrift_env::DriftError;
use serde::{Deserialize, Serialize};

/// Amplitude every trial starts from
pub const INITIAL_AMPLITUDE: f64 = 1.0;

/// Outcome buckets, ordered from most to least stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Amplitude stayed above the stable threshold
    Stable,
    /// Amplitude between the two thresholds
    Drifted,
    /// Amplitude fell below the collapse threshold
    Collapsed,
}

impl Bucket {
    /// Every bucket in declaration order.
    pub const ALL: [Bucket; 3] = [Bucket::Stable, Bucket::Drifted, Bucket::Collapsed];

    /// Number of buckets.
    pub const COUNT: usize = 3;

    /// Returns the bucket name.
    pub fn name(&self) -> &'static str {
        match self {
            Bucket::Stable => "stable",
            Bucket::Drifted => "drifted",
            Bucket::Collapsed => "collapsed",
        }
    }

    /// Position of this bucket in [`Bucket::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Bucket::Stable => 0,
            Bucket::Drifted => 1,
            Bucket::Collapsed => 2,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    index: u64,
    amplitude: f64,
    bucket: Bucket,
}

impl TrialOutcome {
    /// Trial index (also the index of the draw it consumed).
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Attenuated amplitude in `[0.0, 1.0]`.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Bucket the amplitude was classified into.
    pub fn bucket(&self) -> Bucket {
        self.bucket
    }
}

// =============================================================================
// DECAY MODEL
// =============================================================================

/// Constants of the decay formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayThresholds {
    /// Minimum fraction of `noise` applied as damping (draw = 0)
    pub damping_floor: f64,
    /// Amplitudes strictly above this are Stable
    pub stable: f64,
    /// Amplitudes strictly below this are Collapsed
    pub collapse: f64,
}

impl Default for DecayThresholds {
    fn default() -> Self {
        Self {
            damping_floor: 0.5,
            stable: 0.75,
            collapse: 0.45,
        }
    }
}

/// Maps `(noise, draw)` to a classified [`TrialOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DecayModel {
    thresholds: DecayThresholds,
}

impl DecayModel {
    /// Creates a model with custom constants.
    ///
    /// Requires `0 <= damping_floor <= 1` and `0 <= collapse < stable <= 1`.
    pub fn new(thresholds: DecayThresholds) -> Result<Self, DriftError> {
        let DecayThresholds {
            damping_floor,
            stable,
            collapse,
        } = thresholds;

        if !(0.0..=1.0).contains(&damping_floor) {
            return Err(DriftError::invariant(format!(
                "damping floor {damping_floor} outside [0, 1]"
            )));
        }
        if !(0.0..=1.0).contains(&collapse) || !(0.0..=1.0).contains(&stable) || collapse >= stable {
            return Err(DriftError::invariant(format!(
                "thresholds must satisfy 0 <= collapse ({collapse}) < stable ({stable}) <= 1"
            )));
        }
        Ok(Self { thresholds })
    }

    /// Damping applied for a given noise level and draw.
    pub fn damping(&self, noise: f64, draw: f64) -> f64 {
        let floor = self.thresholds.damping_floor;
        noise * (floor + (1.0 - floor) * draw)
    }

    /// Classifies an amplitude.
    pub fn classify(&self, amplitude: f64) -> Bucket {
        if amplitude > self.thresholds.stable {
            Bucket::Stable
        } else if amplitude < self.thresholds.collapse {
            Bucket::Collapsed
        } else {
            Bucket::Drifted
        }
    }

    /// Runs one trial.
    ///
    /// # Errors
    /// `DriftError::InvariantViolation` if the draw is outside `[0, 1)` or the
    /// resulting amplitude is not a finite value in `[0, 1]`. The value is
    /// never clamped into range.
    pub fn evaluate(&self, index: u64, noise: f64, draw: f64) -> Result<TrialOutcome, DriftError> {
        if !(0.0..1.0).contains(&draw) {
            return Err(DriftError::invariant(format!(
                "trial {index}: draw {draw} outside [0, 1)"
            )));
        }

        let amplitude = INITIAL_AMPLITUDE - self.damping(noise, draw);
        if !amplitude.is_finite() || !(0.0..=INITIAL_AMPLITUDE).contains(&amplitude) {
            return Err(DriftError::invariant(format!(
                "trial {index}: amplitude {amplitude} outside [0, 1] (noise={noise}, draw={draw})"
            )));
        }

        Ok(TrialOutcome {
            index,
            amplitude,
            bucket: self.classify(amplitude),
        })
    }
}
