//! The set of trackers sharing one competition.

use super::ranking::Ranking;
use super::tracker::{Contest, Tracker, TrackerId};
use crate::competition::{Competition, TiePolicy, Winner};
use crate::error::{IncubatorError, Result};
use crate::operators::{Explorator, Mutator, OperatorId};
use rand::RngCore;

/// External oracle certifying that a candidate is an optimum.
///
/// When it reports a representative as optimal, the pool rates that
/// representative as fully optimal under every mutator. Implemented for
/// every `Fn(&C) -> bool`.
pub trait OptimalityChecker<C> {
    fn is_optimal(&self, candidate: &C) -> bool;
}

impl<C, F: Fn(&C) -> bool> OptimalityChecker<C> for F {
    fn is_optimal(&self, candidate: &C) -> bool {
        self(candidate)
    }
}

/// Unordered collection of trackers mediated by a shared [`Competition`].
///
/// Sharing one competition keeps comparisons consistent across
/// trajectories, which is what makes [`ranking`](TrackerPool::ranking)
/// meaningful.
pub struct TrackerPool<C> {
    trackers: Vec<Tracker<C>>,
    competition: Box<dyn Competition<C>>,
    ties: TiePolicy,
    checker: Option<Box<dyn OptimalityChecker<C>>>,
    next_id: u64,
}

impl<C> TrackerPool<C> {
    /// Creates an empty pool resolving ties with [`TiePolicy::KeepFirst`].
    pub fn new(competition: impl Competition<C> + 'static) -> Self {
        Self {
            trackers: Vec::new(),
            competition: Box::new(competition),
            ties: TiePolicy::default(),
            checker: None,
            next_id: 0,
        }
    }

    pub fn with_tie_policy(mut self, ties: TiePolicy) -> Self {
        self.ties = ties;
        self
    }

    pub fn tie_policy(&self) -> TiePolicy {
        self.ties
    }

    pub fn set_tie_policy(&mut self, ties: TiePolicy) {
        self.ties = ties;
    }

    /// Installs an oracle short-circuiting optimality estimation.
    pub fn set_optimality_checker(&mut self, checker: impl OptimalityChecker<C> + 'static) {
        self.checker = Some(Box::new(checker));
    }

    pub fn clear_optimality_checker(&mut self) {
        self.checker = None;
    }

    /// Replaces the competition shared by every tracker.
    ///
    /// Convergence evidence was gathered under the previous comparison, so
    /// every tracker forgets it. Representatives are kept as they are.
    pub fn set_competition(&mut self, competition: impl Competition<C> + 'static) {
        self.competition = Box::new(competition);
        for tracker in &mut self.trackers {
            tracker.reset();
        }
        tracing::debug!(trackers = self.trackers.len(), "competition replaced, evidence reset");
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    /// Iterates over the trackers in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tracker<C>> {
        self.trackers.iter()
    }

    pub fn get(&self, id: TrackerId) -> Option<&Tracker<C>> {
        self.trackers.iter().find(|t| t.id() == id)
    }

    /// The current representative of every tracker.
    pub fn population(&self) -> impl Iterator<Item = &C> + '_ {
        self.trackers.iter().map(Tracker::representative)
    }

    /// Owned copy of the population, as handed to explorators.
    pub fn snapshot(&self) -> Vec<C>
    where
        C: Clone,
    {
        self.population().cloned().collect()
    }

    /// Starts a new trajectory from `candidate`, with no history.
    pub fn push(&mut self, candidate: C) -> TrackerId {
        let id = TrackerId(self.next_id);
        self.next_id += 1;
        self.trackers.push(Tracker::new(id, candidate));
        id
    }

    /// Starts a new trajectory seeded by `explorator` from `population`.
    pub fn push_explored(
        &mut self,
        explorator: &dyn Explorator<C>,
        population: &[C],
        rng: &mut dyn RngCore,
    ) -> TrackerId {
        let candidate = explorator.generates(population, rng);
        self.push(candidate)
    }

    /// Removes a tracker, returning its representative.
    pub fn remove(&mut self, id: TrackerId) -> Option<C> {
        let index = self.trackers.iter().position(|t| t.id() == id)?;
        Some(self.trackers.remove(index).into_representative())
    }

    /// Removes every tracker.
    pub fn clear(&mut self) {
        self.trackers.clear();
    }

    /// Discards the evidence held for `mutator` by every tracker.
    pub fn forget(&mut self, mutator: OperatorId) {
        for tracker in &mut self.trackers {
            tracker.forget(mutator);
        }
    }

    /// Optimality of `tracker` under `mutator`, honoring the optimality
    /// checker when one is installed.
    pub fn optimality(&self, tracker: &Tracker<C>, id: OperatorId, mutator: &dyn Mutator<C>) -> f64 {
        match &self.checker {
            Some(checker) if checker.is_optimal(tracker.representative()) => 1.0,
            _ => tracker.optimality_with(id, mutator),
        }
    }

    /// Runs one challenge of `mutator` against the representative of
    /// `tracker`.
    pub fn compete(
        &mut self,
        tracker: TrackerId,
        id: OperatorId,
        mutator: &dyn Mutator<C>,
        rng: &mut dyn RngCore,
    ) -> Result<Contest>
    where
        C: PartialEq,
    {
        let competition = &*self.competition;
        let ties = self.ties;
        let target = self
            .trackers
            .iter_mut()
            .find(|t| t.id() == tracker)
            .ok_or_else(|| IncubatorError::contract(format!("{tracker} is not in the pool")))?;
        target.compete(id, mutator, competition, ties, rng)
    }

    /// Lazy best-first ranking of the population.
    ///
    /// Each step folds the remaining representatives pairwise through the
    /// competition and yields the survivor, so exactly [`len`](Self::len)
    /// candidates come out in non-increasing order of quality.
    pub fn ranking<'a>(&'a mut self, rng: &'a mut dyn RngCore) -> Ranking<'a, C> {
        Ranking::new(self, rng)
    }

    /// Evicts the worst trackers until at most `n` remain.
    ///
    /// `n == 0` means unbounded and leaves the pool untouched. Returns the
    /// number of evicted trackers.
    pub fn reduce_to(&mut self, n: usize, rng: &mut dyn RngCore) -> Result<usize> {
        if n == 0 || self.trackers.len() <= n {
            return Ok(0);
        }

        let mut ranking = self.ranking(rng);
        for _ in 0..n {
            if let Some(kept) = ranking.next_id() {
                kept?;
            }
        }
        let evicted = ranking.into_remaining();
        self.trackers.retain(|t| !evicted.contains(&t.id()));

        tracing::debug!(kept = n, evicted = evicted.len(), "pool reduced");
        Ok(evicted.len())
    }

    pub(crate) fn ids(&self) -> Vec<TrackerId> {
        self.trackers.iter().map(Tracker::id).collect()
    }

    /// Which of two trackers holds the better representative.
    pub(crate) fn duel(
        &self,
        first: TrackerId,
        second: TrackerId,
        rng: &mut dyn RngCore,
    ) -> Result<Winner> {
        let (a, b) = match (self.get(first), self.get(second)) {
            (Some(a), Some(b)) => (a.representative(), b.representative()),
            _ => return Err(IncubatorError::contract("ranked tracker left the pool")),
        };
        let outcome = self.competition.compare(a, b)?;
        Ok(self.ties.resolve(outcome, rng))
    }
}

impl<'a, C> IntoIterator for &'a TrackerPool<C> {
    type Item = &'a Tracker<C>;
    type IntoIter = std::slice::Iter<'a, Tracker<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
