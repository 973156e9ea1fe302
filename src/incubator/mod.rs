//! Lottery-scheduled incubation of a tracked population.
//!
//! Each call to [`Incubator::incubate`] runs exactly one round:
//!
//! 1. Snapshot the population and enumerate every feasible [`Action`]:
//!    one per (tracker, applicable mutator) pair and one per explorator
//!    applicable on the snapshot.
//! 2. Score each action's interest. Mutations are worth `1 - optimality`,
//!    steering effort toward trajectories that may still improve.
//!    Explorations are worth 1 below the minimum population size, and
//!    otherwise the lowest optimality over all (tracker, mutator) pairs, so
//!    they only become attractive once every trajectory looks converged.
//! 3. Draw one action with probability proportional to its interest.
//! 4. Execute it: a mutation challenges the tracker's representative, an
//!    exploration seeds a new tracker (evicting the worst when full).
//!
//! A round where no action has positive interest changes nothing and is
//! reported through [`Incubator::has_evolved`].

mod config;
mod lottery;
mod runner;

pub use config::IncubatorConfig;
pub use lottery::Lottery;
pub use runner::{Action, IncubationSummary, Incubator};
