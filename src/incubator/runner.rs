//! The incubation loop.

use super::config::{check_bounds, IncubatorConfig};
use super::lottery::Lottery;
use crate::competition::{Competition, Evaluator, EvaluatorCompetition, TiePolicy};
use crate::error::{IncubatorError, Result};
use crate::operators::{Explorator, Mutator, OperatorId};
use crate::pool::{OptimalityChecker, Ranking, TrackerId, TrackerPool};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One feasible move of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Challenge a tracker's representative with a neighbor from a mutator.
    Mutate {
        tracker: TrackerId,
        mutator: OperatorId,
    },
    /// Seed a new tracker from the population snapshot.
    Explore { explorator: OperatorId },
}

/// Result of [`Incubator::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncubationSummary {
    /// Rounds executed, including a final stalled one.
    pub rounds: usize,

    /// Rounds that executed an action.
    pub evolutions: usize,

    /// Whether the run stopped on a round with nothing to do.
    pub stalled: bool,

    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// Orchestrates mutators and explorators over a [`TrackerPool`].
///
/// The incubator is single-writer and synchronous: each
/// [`incubate`](Incubator::incubate) call selects and executes at most one
/// action before returning, and the caller decides the cadence.
///
/// # Examples
///
/// ```
/// use rand::RngCore;
/// use u_incubator::incubator::{Incubator, IncubatorConfig};
/// use u_incubator::operators::Mutator;
///
/// /// x -> 2x mod 10
/// struct Doubling;
///
/// impl Mutator<u32> for Doubling {
///     fn name(&self) -> &str { "doubling" }
///     fn is_applicable_on(&self, _x: &u32) -> bool { true }
///     fn generates(&self, x: &u32, _rng: &mut dyn RngCore) -> Option<u32> {
///         Some(x * 2 % 10)
///     }
/// }
///
/// let mut incubator: Incubator<u32> =
///     Incubator::minimizing(|x: &u32| *x, IncubatorConfig::default()).unwrap();
/// incubator.add_mutator(Doubling);
/// incubator.push(9).unwrap();
///
/// for _ in 0..5 {
///     incubator.incubate().unwrap();
/// }
/// assert_eq!(incubator.population().copied().collect::<Vec<_>>(), vec![2]);
/// ```
pub struct Incubator<C> {
    pool: TrackerPool<C>,
    mutators: Vec<(OperatorId, Box<dyn Mutator<C>>)>,
    explorators: Vec<(OperatorId, Box<dyn Explorator<C>>)>,
    min_size: usize,
    max_size: usize,
    rng: StdRng,
    next_operator: u64,
    evolved: bool,
    last_action: Option<Action>,
}

impl<C: Clone + PartialEq> Incubator<C> {
    /// Creates an incubator around `competition`.
    pub fn new(competition: impl Competition<C> + 'static, config: IncubatorConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        Ok(Self {
            pool: TrackerPool::new(competition).with_tie_policy(config.tie_policy),
            mutators: Vec::new(),
            explorators: Vec::new(),
            min_size: config.min_size,
            max_size: config.max_size,
            rng,
            next_operator: 0,
            evolved: false,
            last_action: None,
        })
    }

    /// Creates an incubator minimizing `evaluator`.
    pub fn minimizing<E>(evaluator: E, config: IncubatorConfig) -> Result<Self>
    where
        E: Evaluator<C> + 'static,
    {
        Self::new(EvaluatorCompetition::new(evaluator), config)
    }

    // ---- population ----

    /// Adds `candidate` as a new trajectory, then enforces the maximum size.
    pub fn push(&mut self, candidate: C) -> Result<()> {
        self.pool.push(candidate);
        self.pool.reduce_to(self.max_size, &mut self.rng)?;
        Ok(())
    }

    /// Current representative of every trajectory.
    pub fn population(&self) -> impl Iterator<Item = &C> + '_ {
        self.pool.population()
    }

    /// Best-first ranking of the population.
    pub fn get_best(&mut self) -> Ranking<'_, C> {
        self.pool.ranking(&mut self.rng)
    }

    pub fn pool(&self) -> &TrackerPool<C> {
        &self.pool
    }

    // ---- operators ----

    pub fn add_mutator(&mut self, mutator: impl Mutator<C> + 'static) -> OperatorId {
        let id = self.next_operator_id();
        self.mutators.push((id, Box::new(mutator)));
        id
    }

    /// Unregisters a mutator and discards the evidence gathered with it.
    pub fn remove_mutator(&mut self, id: OperatorId) -> Option<Box<dyn Mutator<C>>> {
        let index = self.mutators.iter().position(|(op, _)| *op == id)?;
        self.pool.forget(id);
        Some(self.mutators.remove(index).1)
    }

    pub fn mutators(&self) -> impl Iterator<Item = (OperatorId, &dyn Mutator<C>)> + '_ {
        self.mutators.iter().map(|(id, m)| (*id, &**m))
    }

    pub fn add_explorator(&mut self, explorator: impl Explorator<C> + 'static) -> OperatorId {
        let id = self.next_operator_id();
        self.explorators.push((id, Box::new(explorator)));
        id
    }

    pub fn remove_explorator(&mut self, id: OperatorId) -> Option<Box<dyn Explorator<C>>> {
        let index = self.explorators.iter().position(|(op, _)| *op == id)?;
        Some(self.explorators.remove(index).1)
    }

    pub fn explorators(&self) -> impl Iterator<Item = (OperatorId, &dyn Explorator<C>)> + '_ {
        self.explorators.iter().map(|(id, e)| (*id, &**e))
    }

    fn next_operator_id(&mut self) -> OperatorId {
        let id = OperatorId(self.next_operator);
        self.next_operator += 1;
        id
    }

    // ---- configuration ----

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Sets the diversification floor (0 = none).
    pub fn set_min_size(&mut self, n: usize) -> Result<()> {
        check_bounds(n, self.max_size)?;
        self.min_size = n;
        Ok(())
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Sets the population cap (0 = unbounded) and immediately evicts the
    /// worst trajectories beyond it.
    pub fn set_max_size(&mut self, n: usize) -> Result<()> {
        check_bounds(self.min_size, n)?;
        self.max_size = n;
        self.pool.reduce_to(n, &mut self.rng)?;
        Ok(())
    }

    pub fn set_tie_policy(&mut self, ties: TiePolicy) {
        self.pool.set_tie_policy(ties);
    }

    pub fn set_optimality_checker(&mut self, checker: impl OptimalityChecker<C> + 'static) {
        self.pool.set_optimality_checker(checker);
    }

    /// Switches to another competition; see [`TrackerPool::set_competition`].
    pub fn set_competition(&mut self, competition: impl Competition<C> + 'static) {
        self.pool.set_competition(competition);
    }

    // ---- incubation ----

    /// Whether the last round executed an action.
    pub fn has_evolved(&self) -> bool {
        self.evolved
    }

    /// Action executed by the last round, if any.
    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    /// Every feasible action of the next round with its interest, including
    /// those whose interest rules them out.
    pub fn actions(&self) -> Vec<(Action, f64)> {
        let snapshot = self.pool.snapshot();
        self.score_actions(&snapshot)
    }

    /// Runs one round: enumerate, score, draw, execute.
    ///
    /// A round with no action of positive interest leaves everything as is
    /// and clears [`has_evolved`](Self::has_evolved). Errors raised by the
    /// strategies abort the round and are returned unchanged.
    pub fn incubate(&mut self) -> Result<()> {
        self.evolved = false;
        self.last_action = None;

        let snapshot = self.pool.snapshot();
        let mut lottery = Lottery::new();
        for (action, interest) in self.score_actions(&snapshot) {
            lottery.enter(action, interest);
        }

        let Some(action) = lottery.into_draw(&mut self.rng) else {
            tracing::debug!(population = self.pool.len(), "round stalled: no action of interest");
            return Ok(());
        };
        tracing::debug!(?action, population = self.pool.len(), "action drawn");

        self.execute(action, &snapshot)?;
        self.evolved = true;
        self.last_action = Some(action);
        Ok(())
    }

    /// Calls [`incubate`](Self::incubate) up to `max_rounds` times, stopping
    /// early on the first stalled round.
    pub fn run(&mut self, max_rounds: usize) -> Result<IncubationSummary> {
        self.run_with_cancel(max_rounds, None)
    }

    /// Runs with an optional cancellation token, checked between rounds.
    pub fn run_with_cancel(
        &mut self,
        max_rounds: usize,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<IncubationSummary> {
        let mut summary = IncubationSummary {
            rounds: 0,
            evolutions: 0,
            stalled: false,
            cancelled: false,
        };

        while summary.rounds < max_rounds {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    summary.cancelled = true;
                    break;
                }
            }

            self.incubate()?;
            summary.rounds += 1;
            if !self.evolved {
                summary.stalled = true;
                break;
            }
            summary.evolutions += 1;
        }

        Ok(summary)
    }

    fn score_actions(&self, snapshot: &[C]) -> Vec<(Action, f64)> {
        let mut actions = Vec::new();

        for tracker in &self.pool {
            for (id, mutator) in &self.mutators {
                if !mutator.is_applicable_on(tracker.representative()) {
                    continue;
                }
                let interest = 1.0 - self.pool.optimality(tracker, *id, &**mutator);
                tracing::trace!(
                    tracker = %tracker.id(),
                    mutator = mutator.name(),
                    interest,
                    "mutation scored"
                );
                actions.push((
                    Action::Mutate {
                        tracker: tracker.id(),
                        mutator: *id,
                    },
                    interest,
                ));
            }
        }

        let mut exploration = None;
        for (id, explorator) in &self.explorators {
            if !explorator.is_applicable_on(snapshot) {
                continue;
            }
            let interest = *exploration.get_or_insert_with(|| self.exploration_interest());
            tracing::trace!(explorator = explorator.name(), interest, "exploration scored");
            actions.push((Action::Explore { explorator: *id }, interest));
        }

        actions
    }

    /// 1 below the diversification floor, else the lowest optimality over
    /// all (tracker, mutator) pairs; 1 when there are no such pairs.
    fn exploration_interest(&self) -> f64 {
        if self.pool.len() < self.min_size {
            return 1.0;
        }
        let mut interest = 1.0_f64;
        for tracker in &self.pool {
            for (id, mutator) in &self.mutators {
                interest = interest.min(self.pool.optimality(tracker, *id, &**mutator));
            }
        }
        interest
    }

    fn execute(&mut self, action: Action, snapshot: &[C]) -> Result<()> {
        match action {
            Action::Mutate { tracker, mutator } => {
                let (_, operator) = self
                    .mutators
                    .iter()
                    .find(|(id, _)| *id == mutator)
                    .ok_or_else(|| IncubatorError::contract(format!("{mutator} is not registered")))?;
                self.pool
                    .compete(tracker, mutator, &**operator, &mut self.rng)?;
            }
            Action::Explore { explorator } => {
                let (_, operator) = self
                    .explorators
                    .iter()
                    .find(|(id, _)| *id == explorator)
                    .ok_or_else(|| {
                        IncubatorError::contract(format!("{explorator} is not registered"))
                    })?;
                if self.max_size > 1 {
                    self.pool.reduce_to(self.max_size - 1, &mut self.rng)?;
                }
                let seeded = self
                    .pool
                    .push_explored(&**operator, snapshot, &mut self.rng);
                self.pool.reduce_to(self.max_size, &mut self.rng)?;
                tracing::debug!(
                    explorator = operator.name(),
                    tracker = %seeded,
                    population = self.pool.len(),
                    "trajectory seeded"
                );
            }
        }
        Ok(())
    }
}
