//! Production implementation of RandomSource backed by OS entropy.

use crate::RandomSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Unseeded random source keyed from the OS entropy pool.
///
/// This is the "real" implementation used when the caller supplies no
/// seed. Runs made with it are not reproducible.
pub struct OsEntropySource {
    /// Stream keyed from `getrandom`
    rng: ChaCha8Rng,
}

impl OsEntropySource {
    /// Creates a new source with a fresh OS-derived key.
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Default for OsEntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for OsEntropySource {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn fork_at(&self, _index: u64) -> Self {
        // No stream to seek in: every fork is freshly keyed
        Self::new()
    }

    fn seed(&self) -> Option<u64> {
        None
    }
}
