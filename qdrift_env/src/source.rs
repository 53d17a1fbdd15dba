//! Random source trait consumed by the trial runner.

/// The central interface for randomness in a drift run.
///
/// This trait abstracts the entropy origin so the engine can run
/// reproducibly (seeded ChaCha stream) or non-reproducibly (OS entropy).
///
/// # Implementations
///
/// - **Production**: `OsEntropySource` - keyed from the OS entropy pool
/// - **Replay**: `SeededSource` (qdrift_sim) - `ChaCha8Rng::seed_from_u64(seed)`
///
/// # Determinism
///
/// For a seeded source, draw `i` of a stream must be the same value whether
/// it is reached by calling `next_unit()` `i + 1` times or by `fork_at(i)`
/// followed by one `next_unit()`. Runners rely on this to partition trials
/// reproducibly. Unseeded sources have no stream to replay, so their forks
/// are only required to be independent.
pub trait RandomSource: Send + Sized {
    /// Returns the next uniform value in `[0, 1)` and advances the cursor.
    fn next_unit(&mut self) -> f64;

    /// Returns an independent cursor positioned at draw `index`.
    ///
    /// Unseeded sources may return a freshly keyed cursor instead.
    ///
    /// The receiver's own position is not affected.
    fn fork_at(&self, index: u64) -> Self;

    /// Returns the seed this stream was built from.
    ///
    /// Unseeded sources return `None`.
    fn seed(&self) -> Option<u64>;
}
