//! Per-trajectory convergence tracking.

use crate::competition::{Competition, TiePolicy, Winner};
use crate::error::{IncubatorError, Result};
use crate::operators::{Mutator, NeighboringLimit, OperatorId};
use rand::RngCore;
use std::collections::HashMap;
use std::fmt;

/// Identity of a tracker inside its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackerId(pub(crate) u64);

impl fmt::Display for TrackerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tracker#{}", self.0)
    }
}

/// Result of one [`Tracker::compete`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contest {
    /// The representative beat the challenger and stays in place.
    Defended,
    /// The challenger became the new representative.
    Replaced,
}

/// Evidence gathered for one mutator against the current representative.
#[derive(Debug, Clone)]
struct LoopRecord<C> {
    /// Neighbor opening the current lap; `None` right after a lap closed.
    last_challenger: Option<C>,
    loops: u32,
    rejections: u64,
}

/// One search trajectory: a representative and its convergence evidence.
///
/// All evidence is discarded whenever the representative changes, since it
/// only describes the neighborhood of a fixed representative.
#[derive(Debug, Clone)]
pub struct Tracker<C> {
    id: TrackerId,
    representative: C,
    records: HashMap<OperatorId, LoopRecord<C>>,
}

impl<C> Tracker<C> {
    pub(crate) fn new(id: TrackerId, representative: C) -> Self {
        Self {
            id,
            representative,
            records: HashMap::new(),
        }
    }

    pub fn id(&self) -> TrackerId {
        self.id
    }

    /// The best candidate known to this trajectory.
    pub fn representative(&self) -> &C {
        &self.representative
    }

    pub(crate) fn into_representative(self) -> C {
        self.representative
    }

    /// Completed laps recorded for `mutator` against the representative.
    pub fn loop_count(&self, mutator: OperatorId) -> u32 {
        self.records.get(&mutator).map_or(0, |r| r.loops)
    }

    /// Neighbors generated by `mutator` that lost against the representative.
    pub fn rejections(&self, mutator: OperatorId) -> u64 {
        self.records.get(&mutator).map_or(0, |r| r.rejections)
    }

    /// Drops the evidence held for a mutator that is no longer registered.
    pub(crate) fn forget(&mut self, mutator: OperatorId) {
        self.records.remove(&mutator);
    }

    /// Drops all evidence while keeping the representative.
    pub(crate) fn reset(&mut self) {
        self.records.clear();
    }

    /// Confidence that no neighbor under `mutator` beats the representative.
    ///
    /// - `1` when the mutator is inapplicable to the representative;
    /// - `0` while no lap has been completed;
    /// - `(loops - 1) / loops` afterwards, rising toward 1 with each lap.
    ///
    /// Mutators declaring a [`NeighboringLimit`] are measured by rejected
    /// neighbors: `rejections / size` (capped at 1) for strict limits,
    /// `tanh(rejections / (2 * size))` for estimated ones.
    pub fn optimality_with(&self, id: OperatorId, mutator: &dyn Mutator<C>) -> f64 {
        if !mutator.is_applicable_on(&self.representative) {
            return 1.0;
        }
        match mutator.neighboring_limit() {
            Some(limit) => informed_optimality(self.rejections(id), limit),
            None => match self.loop_count(id) {
                0 => 0.0,
                loops => (loops - 1) as f64 / loops as f64,
            },
        }
    }

    /// Lets a neighbor generated by `mutator` challenge the representative.
    ///
    /// A surviving representative updates the lap evidence for `id`:
    ///
    /// - first rejection: the challenger opens a lap;
    /// - lap slot empty: the challenger opens the next lap;
    /// - same challenger as the lap opener: the lap closes (`loops += 1`);
    /// - different challenger: the lap stays open.
    ///
    /// A winning challenger becomes the representative and all evidence is
    /// cleared.
    pub fn compete(
        &mut self,
        id: OperatorId,
        mutator: &dyn Mutator<C>,
        competition: &dyn Competition<C>,
        ties: TiePolicy,
        rng: &mut dyn RngCore,
    ) -> Result<Contest>
    where
        C: PartialEq,
    {
        let challenger = mutator.generates(&self.representative, rng).ok_or_else(|| {
            IncubatorError::contract(format!(
                "mutator `{}` is applicable but produced no neighbor",
                mutator.name()
            ))
        })?;
        let outcome = competition.compare(&self.representative, &challenger)?;

        match ties.resolve(outcome, rng) {
            Winner::First => {
                self.record_rejection(id, challenger);
                tracing::debug!(
                    tracker = %self.id,
                    mutator = mutator.name(),
                    ?outcome,
                    loops = self.loop_count(id),
                    "representative defended"
                );
                Ok(Contest::Defended)
            }
            Winner::Second => {
                self.representative = challenger;
                self.records.clear();
                tracing::debug!(
                    tracker = %self.id,
                    mutator = mutator.name(),
                    ?outcome,
                    "representative replaced"
                );
                Ok(Contest::Replaced)
            }
        }
    }

    fn record_rejection(&mut self, id: OperatorId, challenger: C)
    where
        C: PartialEq,
    {
        match self.records.get_mut(&id) {
            None => {
                self.records.insert(
                    id,
                    LoopRecord {
                        last_challenger: Some(challenger),
                        loops: 0,
                        rejections: 1,
                    },
                );
            }
            Some(record) => {
                record.rejections += 1;
                match &record.last_challenger {
                    None => record.last_challenger = Some(challenger),
                    Some(opener) if *opener == challenger => {
                        record.loops += 1;
                        record.last_challenger = None;
                    }
                    Some(_) => {}
                }
            }
        }
    }
}

fn informed_optimality(rejections: u64, limit: NeighboringLimit) -> f64 {
    if limit.size == 0 {
        return 1.0;
    }
    let ratio = rejections as f64 / limit.size as f64;
    if limit.strict {
        ratio.min(1.0)
    } else {
        (ratio / 2.0).tanh()
    }
}
