//! Q-Drift Core - Structural Fragility Under Probabilistic Drift
//!
//! This library measures how fragile a decision path is under noise:
//! 1. **Decay Model**: amplitude damping of a unit signal, classified into buckets
//! 2. **Distribution**: per-bucket outcome counts over many trials
//! 3. **Metrics**: Shannon entropy, collapse bias, and a fragility band
//!
//! The crate is pure computation. Randomness is injected through
//! [`qdrift_env::RandomSource`] and trial scheduling lives in `qdrift_sim`.

pub mod config;
pub mod decay;
pub mod distribution;
pub mod metrics;
pub mod report;

// Re-export key types for convenience
pub use config::SimulationConfig;
pub use decay::{Bucket, DecayModel, DecayThresholds, TrialOutcome};
pub use distribution::{DistributionBuilder, DistributionTable};
pub use metrics::{FragilityLevel, FragilityThresholds, MetricsCalculator, MetricsResult};
pub use report::{AnalysisReport, ReportAssembler, ENGINE_VERSION};
