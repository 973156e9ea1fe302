//! Lazy best-first ranking over a tracker pool.

use super::tracker::TrackerId;
use super::tracker_pool::TrackerPool;
use crate::competition::Winner;
use crate::error::Result;
use rand::RngCore;

/// Best-first sequence of the pool's representatives.
///
/// Produced by [`TrackerPool::ranking`]. Every call to `next` runs a
/// knockout over the candidates not yet yielded, so the ranking is only as
/// consistent as the competition behind it. Dropping the sequence and
/// asking for a new one restarts from the full population.
pub struct Ranking<'a, C> {
    pool: &'a mut TrackerPool<C>,
    rng: &'a mut dyn RngCore,
    remaining: Vec<TrackerId>,
    last: Option<TrackerId>,
}

impl<'a, C> Ranking<'a, C> {
    pub(crate) fn new(pool: &'a mut TrackerPool<C>, rng: &'a mut dyn RngCore) -> Self {
        let remaining = pool.ids();
        Self {
            pool,
            rng,
            remaining,
            last: None,
        }
    }

    /// Evicts from the pool the tracker whose representative was yielded
    /// last, returning that representative.
    ///
    /// Returns `None` when nothing was yielded yet or it was already
    /// removed.
    pub fn remove(&mut self) -> Option<C> {
        let id = self.last.take()?;
        self.pool.remove(id)
    }

    /// Yields the tracker holding the best remaining representative.
    pub(crate) fn next_id(&mut self) -> Option<Result<TrackerId>> {
        if self.remaining.is_empty() {
            return None;
        }

        let mut best = 0;
        for challenger in 1..self.remaining.len() {
            let duel = self.pool.duel(
                self.remaining[best],
                self.remaining[challenger],
                &mut *self.rng,
            );
            match duel {
                Ok(Winner::First) => {}
                Ok(Winner::Second) => best = challenger,
                Err(err) => return Some(Err(err)),
            }
        }

        let id = self.remaining.remove(best);
        self.last = Some(id);
        Some(Ok(id))
    }

    /// Trackers not yielded yet.
    pub(crate) fn into_remaining(self) -> Vec<TrackerId> {
        self.remaining
    }
}

impl<C: Clone> Iterator for Ranking<'_, C> {
    type Item = Result<C>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = match self.next_id()? {
            Ok(id) => id,
            Err(err) => return Some(Err(err)),
        };
        self.pool
            .get(id)
            .map(|tracker| Ok(tracker.representative().clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining.len(), None)
    }
}
