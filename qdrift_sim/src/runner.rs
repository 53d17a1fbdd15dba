//! Trial runner - executes the decay model once per trial.

use qdrift_core::{
    Bucket, DecayModel, DistributionBuilder, DistributionTable, SimulationConfig, TrialOutcome,
};
use qdrift_env::{DriftError, RandomSource};
use rayon::prelude::*;
use std::ops::Range;
use tracing::{debug, error, info};

/// Upper bound on ranges per rayon worker thread.
const PARTITIONS_PER_THREAD: usize = 4;

/// How trials are scheduled.
///
/// Both modes bind trial `i` to draw `i` of the source, so they produce
/// identical distributions for the same seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One trial after another on the calling thread
    #[default]
    Sequential,

    /// Contiguous index ranges evaluated on the rayon pool
    Parallel {
        /// Number of index ranges to split the run into
        partitions: usize,
    },
}

/// Runs `simulations` independent trials and aggregates their outcomes.
#[derive(Debug, Clone, Default)]
pub struct TrialRunner {
    /// Decay model evaluated per trial
    model: DecayModel,

    /// Scheduling strategy
    mode: ExecutionMode,
}

impl TrialRunner {
    /// Creates a sequential runner with the default decay model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the decay model.
    pub fn with_model(mut self, model: DecayModel) -> Self {
        self.model = model;
        self
    }

    /// Sets the execution mode.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Runs every trial and returns the frozen distribution.
    ///
    /// `SimulationConfig` cannot hold an invalid run, so no draw is taken
    /// for a configuration that was rejected. On success the source is left
    /// positioned after the last consumed draw, whichever mode ran.
    pub fn run<S>(&self, config: &SimulationConfig, source: &mut S) -> Result<DistributionTable, DriftError>
    where
        S: RandomSource + Sync,
    {
        info!(
            "Starting run: simulations={} noise={} seed={:?} mode={:?}",
            config.simulations(),
            config.noise(),
            source.seed(),
            self.mode
        );

        let result = match self.mode {
            ExecutionMode::Sequential => self.run_sequential(config, source),
            ExecutionMode::Parallel { partitions } => {
                let table = self.run_partitioned(config, source, partitions);
                *source = source.fork_at(config.simulations());
                table
            }
        };

        match &result {
            Ok(table) => info!(
                "Run complete: stable={} drifted={} collapsed={}",
                table.count(Bucket::Stable),
                table.count(Bucket::Drifted),
                table.count(Bucket::Collapsed)
            ),
            Err(e) => error!("Run aborted: {}", e),
        }

        result
    }

    /// Runs every trial sequentially and returns the individual outcomes.
    pub fn outcomes<S: RandomSource>(
        &self,
        config: &SimulationConfig,
        source: &mut S,
    ) -> Result<Vec<TrialOutcome>, DriftError> {
        (0..config.simulations())
            .map(|index| self.model.evaluate(index, config.noise(), source.next_unit()))
            .collect()
    }

    fn run_sequential<S: RandomSource>(
        &self,
        config: &SimulationConfig,
        source: &mut S,
    ) -> Result<DistributionTable, DriftError> {
        let builder = self.run_range(config.noise(), 0..config.simulations(), source)?;
        builder.freeze(config.simulations())
    }

    fn run_partitioned<S>(
        &self,
        config: &SimulationConfig,
        source: &S,
        partitions: usize,
    ) -> Result<DistributionTable, DriftError>
    where
        S: RandomSource + Sync,
    {
        let ranges = partition(config.simulations(), capped_partitions(partitions));
        debug!("Split {} trials into {} ranges", config.simulations(), ranges.len());

        let partials = ranges
            .into_par_iter()
            .map(|range| {
                let mut cursor = source.fork_at(range.start);
                let partial = self.run_range(config.noise(), range.clone(), &mut cursor);
                debug!("  range {}..{} done", range.start, range.end);
                partial
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = DistributionBuilder::new();
        for partial in &partials {
            builder.merge(partial);
        }
        builder.freeze(config.simulations())
    }

    /// Evaluates trials `range` with `source` positioned at `range.start`.
    fn run_range<S: RandomSource>(
        &self,
        noise: f64,
        range: Range<u64>,
        source: &mut S,
    ) -> Result<DistributionBuilder, DriftError> {
        let mut builder = DistributionBuilder::new();
        for index in range {
            let outcome = self.model.evaluate(index, noise, source.next_unit())?;
            builder.record(&outcome);
        }
        Ok(builder)
    }
}

/// Limits a requested partition count to what the rayon pool can use.
fn capped_partitions(requested: usize) -> usize {
    requested.min(rayon::current_num_threads().saturating_mul(PARTITIONS_PER_THREAD))
}

/// Splits `0..total` into at most `partitions` contiguous, non-empty ranges.
fn partition(total: u64, partitions: usize) -> Vec<Range<u64>> {
    let partitions = (partitions.max(1) as u64).min(total.max(1));
    let chunk = total.div_ceil(partitions);

    let mut ranges = Vec::with_capacity(partitions as usize);
    let mut start = 0;
    while start < total {
        let end = (start + chunk).min(total);
        ranges.push(start..end);
        start = end;
    }
    ranges
}
