//! Population bookkeeping: trackers and the pool that owns them.
//!
//! A [`Tracker`] pairs one representative candidate with the convergence
//! evidence gathered for it under each mutator. The [`TrackerPool`] holds
//! every tracker, shares one competition among them, ranks their
//! representatives and enforces size bounds.
//!
//! # Optimality estimation
//!
//! A mutator that keeps failing to improve a representative is eventually
//! caught re-proposing a neighbor it already proposed: the tracker detects
//! these laps and turns their count into an optimality estimate in `[0, 1)`
//! that rises with every completed lap. Mutators that declare a
//! [`NeighboringLimit`](crate::operators::NeighboringLimit) are measured by
//! rejected neighbors instead.

mod ranking;
mod tracker;
mod tracker_pool;

pub use ranking::Ranking;
pub use tracker::{Contest, Tracker, TrackerId};
pub use tracker_pool::{OptimalityChecker, TrackerPool};
