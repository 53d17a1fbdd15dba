//! Q-Drift Environment Abstraction Layer
//!
//! This crate isolates every source of non-determinism the drift engine
//! touches so that a run can be replayed from its seed alone:
//! - Randomness (`RandomSource::next_unit()`)
//! - Run identity (`RunId`)
//!
//! # Core Concept: One Draw Per Trial
//!
//! The engine consumes exactly one uniform draw per trial, in trial-index
//! order. A source can be forked at any draw index, which lets a runner
//! split the index range across workers and still reproduce the
//! sequential result bit for bit.
//!
//! # Example
//!
//! ```ignore
//! use qdrift_env::{RandomSource, OsEntropySource};
//!
//! let mut source = OsEntropySource::new();
//! let draw = source.next_unit();
//! assert!((0.0..1.0).contains(&draw));
//! ```

mod error;
mod os_impl;
mod source;
mod types;

pub use error::DriftError;
pub use os_impl::OsEntropySource;
pub use source::RandomSource;
pub use types::RunId;
