//! Noise sweeps - the same seeded run repeated across a grid of noise levels.

use crate::engine::DriftEngine;

use qdrift_core::{AnalysisReport, SimulationConfig};
use qdrift_env::DriftError;
use tracing::info;

/// An evenly spaced grid of noise levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseSweep {
    /// First noise level
    pub from: f64,

    /// Last noise level (inclusive)
    pub to: f64,

    /// Number of grid points
    pub steps: usize,
}

impl Default for NoiseSweep {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            steps: 11,
        }
    }
}

impl NoiseSweep {
    /// Creates a sweep over `[from, to]` with `steps` points.
    pub fn new(from: f64, to: f64, steps: usize) -> Self {
        Self { from, to, steps }
    }

    /// Returns the grid points. Both endpoints are included exactly.
    pub fn levels(&self) -> Vec<f64> {
        match self.steps {
            0 => Vec::new(),
            1 => vec![self.from],
            steps => {
                let last = steps - 1;
                (0..steps)
                    .map(|i| {
                        if i == last {
                            self.to
                        } else {
                            self.from + (self.to - self.from) * i as f64 / last as f64
                        }
                    })
                    .collect()
            }
        }
    }

    /// Builds one validated config per grid point from `base`.
    ///
    /// Fails on the first out-of-range level, before any run starts.
    pub fn configs(&self, base: &SimulationConfig) -> Result<Vec<SimulationConfig>, DriftError> {
        self.levels()
            .into_iter()
            .map(|noise| base.with_noise(noise))
            .collect()
    }

    /// Runs the engine at every grid point.
    pub fn run(
        &self,
        engine: &DriftEngine,
        base: &SimulationConfig,
    ) -> Result<Vec<AnalysisReport>, DriftError> {
        let configs = self.configs(base)?;
        info!(
            "Sweeping noise {}..={} in {} steps (simulations={}, seed={:?})",
            self.from,
            self.to,
            configs.len(),
            base.simulations(),
            base.seed()
        );

        configs.iter().map(|config| engine.analyze(config)).collect()
    }
}
