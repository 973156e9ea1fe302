//! Domain-agnostic local-search incubator.
//!
//! Maintains a population of search trajectories and, one round at a time,
//! decides where to spend effort: deepening a trajectory with a local
//! mutation, or seeding a new one from the population. Choices are drawn by
//! lottery, weighted by how likely each move is to pay off.
//!
//! - **Operators**: [`Mutator`](operators::Mutator) (local neighbor of one
//!   candidate) and [`Explorator`](operators::Explorator) (new candidate
//!   from the whole population).
//! - **Competition**: pairwise comparison of candidates with an explicit
//!   [`TiePolicy`](competition::TiePolicy).
//! - **Pool**: [`Tracker`](pool::Tracker)s recording convergence evidence
//!   per mutator, gathered in a [`TrackerPool`](pool::TrackerPool) that
//!   ranks and bounds them.
//! - **Incubator**: the lottery-scheduled round loop.
//!
//! # Architecture
//!
//! The crate knows nothing about candidates beyond what the operators and
//! the competition tell it. Candidates only need to be `Clone` (the
//! population is snapshotted for explorators) and `PartialEq` (lap
//! detection compares neighbors).

pub mod competition;
pub mod error;
pub mod incubator;
pub mod operators;
pub mod pool;

pub use error::{IncubatorError, Result};
