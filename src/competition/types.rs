//! Competition contract and tie resolution.

use crate::error::Result;
use rand::{Rng, RngCore};

/// Verdict of a competition between a first and a second candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The first candidate is strictly better.
    FirstWins,
    /// The second candidate is strictly better.
    SecondWins,
    /// Neither candidate is better than the other.
    Tie,
}

/// Which side survives once a tie has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    First,
    Second,
}

/// How a [`Outcome::Tie`] is turned into a [`Winner`].
///
/// The first side is always the incumbent: the tracker representative when
/// it meets a challenger, the current best when ranking the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TiePolicy {
    /// The incumbent survives a tie.
    #[default]
    KeepFirst,
    /// The newcomer replaces the incumbent on a tie, letting the search
    /// drift across plateaus.
    KeepSecond,
    /// A fair coin from the incubator's generator decides.
    Random,
}

impl TiePolicy {
    /// Resolves `outcome` into a winner, drawing from `rng` only for
    /// [`TiePolicy::Random`] ties.
    pub fn resolve(self, outcome: Outcome, rng: &mut dyn RngCore) -> Winner {
        match outcome {
            Outcome::FirstWins => Winner::First,
            Outcome::SecondWins => Winner::Second,
            Outcome::Tie => match self {
                TiePolicy::KeepFirst => Winner::First,
                TiePolicy::KeepSecond => Winner::Second,
                TiePolicy::Random => {
                    if rng.random_bool(0.5) {
                        Winner::First
                    } else {
                        Winner::Second
                    }
                }
            },
        }
    }
}

/// A binary policy selecting the better of two candidates.
///
/// Must be consistent for fixed inputs. Returning an error signals a
/// contract violation; it aborts the current round and reaches the caller
/// unchanged.
pub trait Competition<C> {
    /// Compares `first` against `second`.
    fn compare(&self, first: &C, second: &C) -> Result<Outcome>;
}

impl<C, T: Competition<C> + ?Sized> Competition<C> for Box<T> {
    fn compare(&self, first: &C, second: &C) -> Result<Outcome> {
        (**self).compare(first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_decisive_outcomes_ignore_policy() {
        let mut rng = StdRng::seed_from_u64(42);
        for policy in [TiePolicy::KeepFirst, TiePolicy::KeepSecond, TiePolicy::Random] {
            assert_eq!(policy.resolve(Outcome::FirstWins, &mut rng), Winner::First);
            assert_eq!(policy.resolve(Outcome::SecondWins, &mut rng), Winner::Second);
        }
    }

    #[test]
    fn test_deterministic_tie_policies() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            TiePolicy::KeepFirst.resolve(Outcome::Tie, &mut rng),
            Winner::First
        );
        assert_eq!(
            TiePolicy::KeepSecond.resolve(Outcome::Tie, &mut rng),
            Winner::Second
        );
        assert_eq!(TiePolicy::default(), TiePolicy::KeepFirst);
    }

    #[test]
    fn test_random_tie_policy_picks_both_sides() {
        let mut rng = StdRng::seed_from_u64(42);
        let firsts = (0..1000)
            .filter(|_| TiePolicy::Random.resolve(Outcome::Tie, &mut rng) == Winner::First)
            .count();
        assert!(
            (400..=600).contains(&firsts),
            "expected a fair coin, got {firsts}/1000 first wins"
        );
    }
}
