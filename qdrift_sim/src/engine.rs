//! DriftEngine - drives one run from configuration to report.

use crate::runner::{ExecutionMode, TrialRunner};
use crate::source::SeededSource;

use qdrift_core::{AnalysisReport, MetricsCalculator, ReportAssembler, SimulationConfig};
use qdrift_env::{DriftError, OsEntropySource, RandomSource};
use tracing::{debug, info};

/// The analysis pipeline: source → runner → aggregator → metrics → report.
#[derive(Debug, Clone, Default)]
pub struct DriftEngine {
    /// Trial scheduling and decay model
    runner: TrialRunner,

    /// Entropy, bias, fragility
    calculator: MetricsCalculator,
}

impl DriftEngine {
    /// Creates an engine with default model, thresholds, and sequential execution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the trial runner.
    pub fn with_runner(mut self, runner: TrialRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Sets the execution mode of the current runner.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.runner = self.runner.with_mode(mode);
        self
    }

    /// Sets the metrics calculator.
    pub fn with_calculator(mut self, calculator: MetricsCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Runs an analysis, creating the random source the config asks for.
    ///
    /// Seeded configs get a [`SeededSource`]; unseeded configs draw from
    /// the OS entropy pool. The source lives only for this call.
    pub fn analyze(&self, config: &SimulationConfig) -> Result<AnalysisReport, DriftError> {
        match config.seed() {
            Some(seed) => {
                debug!("Deterministic mode enabled. Seed: {}", seed);
                self.analyze_with(config, &mut SeededSource::new(seed))
            }
            None => self.analyze_with(config, &mut OsEntropySource::new()),
        }
    }

    /// Runs an analysis against a caller-supplied source.
    pub fn analyze_with<S>(
        &self,
        config: &SimulationConfig,
        source: &mut S,
    ) -> Result<AnalysisReport, DriftError>
    where
        S: RandomSource + Sync,
    {
        let distribution = self.runner.run(config, source)?;
        let metrics = self.calculator.compute(&distribution)?;
        let report = ReportAssembler::assemble(config, &distribution, &metrics);

        info!(
            "Run {}: entropy={:.6} bias={:.6} fragility={}",
            report.run_id, metrics.entropy_bits, metrics.bias, metrics.fragility_level
        );

        Ok(report)
    }
}
