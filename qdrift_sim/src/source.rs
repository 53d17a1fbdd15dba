//! Seeded random source for reproducible drift runs.

use qdrift_env::RandomSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// ChaCha words consumed by one `f64` draw (one `next_u64`).
const WORDS_PER_DRAW: u128 = 2;

/// Reproducible random source backed by a seeded ChaCha8 stream.
///
/// Draw `i` is the `i`-th 64-bit value of the stream, mapped to `[0, 1)`.
/// Because ChaCha is seekable, [`RandomSource::fork_at`] can jump straight
/// to any draw, which lets runners split trials across workers.
#[derive(Clone)]
pub struct SeededSource {
    /// Master seed for this run
    seed: u64,

    /// Stream cursor
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Creates a new source at draw 0 of the stream for `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Number of draws consumed from the start of the stream.
    pub fn position(&self) -> u64 {
        (self.rng.get_word_pos() / WORDS_PER_DRAW) as u64
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn fork_at(&self, index: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_word_pos(index as u128 * WORDS_PER_DRAW);
        Self {
            seed: self.seed,
            rng,
        }
    }

    fn seed(&self) -> Option<u64> {
        Some(self.seed)
    }
}
