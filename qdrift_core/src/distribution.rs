//! Distribution Aggregator
//!
//! Tabulates trial outcomes into the fixed bucket set declared by
//! [`Bucket::ALL`]. Buckets are never added or dropped based on data: a
//! bucket nobody landed in is reported with a zero count.

use crate::decay::{Bucket, TrialOutcome};
use qdrift_env::DriftError;
use serde::{Deserialize, Serialize};

/// Running per-bucket counts for an in-progress run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionBuilder {
    counts: [u64; Bucket::COUNT],
}

impl DistributionBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one trial outcome.
    pub fn record(&mut self, outcome: &TrialOutcome) {
        self.counts[outcome.bucket().index()] += 1;
    }

    /// Folds the counts of another builder into this one.
    ///
    /// Used to combine partitions of a parallel run.
    pub fn merge(&mut self, other: &DistributionBuilder) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    /// Number of outcomes recorded so far.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Produces the immutable table.
    ///
    /// # Errors
    /// `DriftError::InvariantViolation` if the recorded total differs from
    /// `expected_total` (the configured simulation count).
    pub fn freeze(self, expected_total: u64) -> Result<DistributionTable, DriftError> {
        let total = self.total();
        if total != expected_total {
            return Err(DriftError::invariant(format!(
                "distribution holds {total} outcomes, expected {expected_total}"
            )));
        }
        let [stable, drifted, collapsed] = self.counts;
        Ok(DistributionTable {
            stable,
            drifted,
            collapsed,
        })
    }
}

/// Final per-bucket counts of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionTable {
    stable: u64,
    drifted: u64,
    collapsed: u64,
}

impl DistributionTable {
    /// Builds a table from raw counts, e.g. when reloading an exported report.
    pub fn from_counts(stable: u64, drifted: u64, collapsed: u64) -> Self {
        Self {
            stable,
            drifted,
            collapsed,
        }
    }

    /// Count for one bucket.
    pub fn count(&self, bucket: Bucket) -> u64 {
        match bucket {
            Bucket::Stable => self.stable,
            Bucket::Drifted => self.drifted,
            Bucket::Collapsed => self.collapsed,
        }
    }

    /// Total number of trials.
    pub fn total(&self) -> u64 {
        self.stable + self.drifted + self.collapsed
    }

    /// Relative frequency of one bucket; `0.0` for an empty table.
    pub fn frequency(&self, bucket: Bucket) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(bucket) as f64 / total as f64
    }

    /// `(bucket, count)` pairs in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, u64)> + '_ {
        Bucket::ALL
            .into_iter()
            .map(move |bucket| (bucket, self.count(bucket)))
    }

    /// Bucket holding the most outcomes (earliest bucket wins ties).
    pub fn dominant(&self) -> Bucket {
        let mut best = Bucket::Stable;
        for (bucket, count) in self.iter() {
            if count > self.count(best) {
                best = bucket;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decay::DecayModel;

    fn outcome(bucket: Bucket) -> TrialOutcome {
        // Pick a (noise, draw) pair that lands in the requested bucket
        let model = DecayModel::default();
        let (noise, draw) = match bucket {
            Bucket::Stable => (0.0, 0.5),
            Bucket::Drifted => (0.5, 0.5),
            Bucket::Collapsed => (1.0, 0.5),
        };
        let outcome = model.evaluate(0, noise, draw).unwrap();
        assert_eq!(outcome.bucket(), bucket);
        outcome
    }

    #[test]
    fn test_empty_buckets_are_zero_filled() {
        let mut builder = DistributionBuilder::new();
        for _ in 0..5 {
            builder.record(&outcome(Bucket::Stable));
        }
        let table = builder.freeze(5).unwrap();

        assert_eq!(table.count(Bucket::Stable), 5);
        assert_eq!(table.count(Bucket::Drifted), 0);
        assert_eq!(table.count(Bucket::Collapsed), 0);
        assert_eq!(table.iter().count(), Bucket::COUNT);
    }

    #[test]
    fn test_freeze_rejects_total_mismatch() {
        let mut builder = DistributionBuilder::new();
        builder.record(&outcome(Bucket::Drifted));
        let err = builder.freeze(2).unwrap_err();
        assert!(matches!(err, DriftError::InvariantViolation(_)));
    }

    #[test]
    fn test_merge_adds_counts() {
        let mut left = DistributionBuilder::new();
        left.record(&outcome(Bucket::Stable));
        left.record(&outcome(Bucket::Collapsed));

        let mut right = DistributionBuilder::new();
        right.record(&outcome(Bucket::Collapsed));
        right.record(&outcome(Bucket::Drifted));

        left.merge(&right);
        let table = left.freeze(4).unwrap();
        assert_eq!(table.count(Bucket::Stable), 1);
        assert_eq!(table.count(Bucket::Drifted), 1);
        assert_eq!(table.count(Bucket::Collapsed), 2);
        assert_eq!(table.dominant(), Bucket::Collapsed);
    }

    #[test]
    fn test_frequency() {
        let mut builder = DistributionBuilder::new();
        builder.record(&outcome(Bucket::Stable));
        builder.record(&outcome(Bucket::Stable));
        builder.record(&outcome(Bucket::Stable));
        builder.record(&outcome(Bucket::Collapsed));
        let table = builder.freeze(4).unwrap();

        assert_eq!(table.frequency(Bucket::Stable), 0.75);
        assert_eq!(table.frequency(Bucket::Collapsed), 0.25);
        assert_eq!(table.frequency(Bucket::Drifted), 0.0);
    }

    #[test]
    fn test_serializes_every_bucket_key() {
        let table = DistributionBuilder::new().freeze(0).unwrap();
        let json = serde_json::to_value(table).unwrap();
        assert_eq!(json["stable"], 0);
        assert_eq!(json["drifted"], 0);
        assert_eq!(json["collapsed"], 0);
    }
}
