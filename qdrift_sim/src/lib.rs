//! Q-Drift Deterministic Trial Harness
//!
//! This crate runs the [`qdrift_core`] decay model many times and turns the
//! outcomes into an [`AnalysisReport`](qdrift_core::AnalysisReport).
//!
//! # Core Principle: Index-to-Draw Binding
//!
//! Trial `i` always consumes draw `i` of the random source. Every source of
//! non-determinism is therefore reduced to a single 64-bit seed:
//! - **Sequential runs** walk the ChaCha stream in order
//! - **Parallel runs** fork the stream at each partition start
//!
//! Both produce the same distribution for the same seed.
//!
//! # Architecture
//!
//! ```text
//! SimulationConfig ──► SeededSource / OsEntropySource
//!                              │
//!                      ┌───────▼────────┐
//!                      │  TrialRunner   │  DecayModel per trial
//!                      └───────┬────────┘
//!                              │ DistributionTable
//!                      ┌───────▼────────┐
//!                      │MetricsCalculator│  entropy, bias, fragility
//!                      └───────┬────────┘
//!                              │
//!                       AnalysisReport ──► render / exporter
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use qdrift_sim::DriftEngine;
//! use qdrift_core::SimulationConfig;
//!
//! let config = SimulationConfig::new(1000, 0.4, Some(42))?;
//! let report = DriftEngine::new().analyze(&config)?;
//! println!("{}", report.verdict);
//! ```

mod engine;
pub mod exporter;
pub mod render;
mod runner;
mod source;
mod sweep;

pub use engine::DriftEngine;
pub use exporter::{read_report, to_json_pretty, write_report, ExportError};
pub use runner::{ExecutionMode, TrialRunner};
pub use source::SeededSource;
pub use sweep::NoiseSweep;
