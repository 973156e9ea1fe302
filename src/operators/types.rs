//! Core traits for mutators and explorators.

use rand::RngCore;
use std::fmt;

/// Identity of an operator registered on an incubator.
///
/// Convergence evidence is keyed by this id rather than by the operator's
/// value: registering two structurally equal mutators yields two ids whose
/// evidence is tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperatorId(pub(crate) u64);

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op#{}", self.0)
    }
}

/// Declared size of a mutator's neighborhood.
///
/// A mutator that knows (or can estimate) how many neighbors must be
/// rejected before its input can be considered a local optimum declares it
/// through [`Mutator::neighboring_limit`]. Optimality is then derived from
/// the number of rejected neighbors instead of from cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighboringLimit {
    /// Number of neighbors to reject before the candidate is deemed optimal.
    pub size: u64,
    /// `true` when the neighborhood is finite and exactly `size` large, so
    /// rejecting `size` neighbors is conclusive. `false` makes `size` a
    /// soft estimate and optimality only approaches 1 asymptotically.
    pub strict: bool,
}

impl NeighboringLimit {
    /// A finite neighborhood of exactly `size` neighbors.
    pub fn strict(size: u64) -> Self {
        Self { size, strict: true }
    }

    /// A subjective estimate for large or infinite neighborhoods.
    pub fn estimated(size: u64) -> Self {
        Self {
            size,
            strict: false,
        }
    }
}

/// A unary operator proposing one neighbor of a candidate.
///
/// # Examples
///
/// ```
/// use rand::{Rng, RngCore};
/// use u_incubator::operators::Mutator;
///
/// struct Nudge;
///
/// impl Mutator<i64> for Nudge {
///     fn name(&self) -> &str {
///         "nudge"
///     }
///
///     fn is_applicable_on(&self, _candidate: &i64) -> bool {
///         true
///     }
///
///     fn generates(&self, candidate: &i64, rng: &mut dyn RngCore) -> Option<i64> {
///         Some(candidate + rng.random_range(-3..=3))
///     }
/// }
/// ```
pub trait Mutator<C> {
    /// Returns a human-readable name for this operator.
    fn name(&self) -> &str;

    /// Whether this mutator can produce a neighbor of `candidate`.
    ///
    /// An inapplicable mutator has nothing left to test, so the candidate
    /// is trivially optimal with respect to it.
    fn is_applicable_on(&self, candidate: &C) -> bool;

    /// Generates one neighbor of `candidate`.
    ///
    /// Only called when [`is_applicable_on`](Mutator::is_applicable_on)
    /// holds; returning `None` in that case is a contract violation.
    fn generates(&self, candidate: &C, rng: &mut dyn RngCore) -> Option<C>;

    /// Declared neighborhood size, if known. Defaults to `None`.
    fn neighboring_limit(&self) -> Option<NeighboringLimit> {
        None
    }
}

/// A population-level operator producing a new candidate.
///
/// Explorators see a snapshot taken at the start of the round, never a
/// population partially updated by the round itself.
pub trait Explorator<C> {
    /// Returns a human-readable name for this operator.
    fn name(&self) -> &str;

    /// Whether this explorator can work from `population`.
    fn is_applicable_on(&self, population: &[C]) -> bool;

    /// Generates a new candidate from `population`.
    fn generates(&self, population: &[C], rng: &mut dyn RngCore) -> C;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    struct Flip;

    impl Mutator<Vec<bool>> for Flip {
        fn name(&self) -> &str {
            "flip"
        }

        fn is_applicable_on(&self, candidate: &Vec<bool>) -> bool {
            !candidate.is_empty()
        }

        fn generates(&self, candidate: &Vec<bool>, rng: &mut dyn RngCore) -> Option<Vec<bool>> {
            let mut neighbor = candidate.clone();
            let i = rng.random_range(0..neighbor.len());
            neighbor[i] = !neighbor[i];
            Some(neighbor)
        }

        fn neighboring_limit(&self) -> Option<NeighboringLimit> {
            Some(NeighboringLimit::strict(8))
        }
    }

    #[test]
    fn test_mutator_through_trait_object() {
        let mutator: Box<dyn Mutator<Vec<bool>>> = Box::new(Flip);
        let mut rng = StdRng::seed_from_u64(42);
        let candidate = vec![false; 8];

        assert!(mutator.is_applicable_on(&candidate));
        assert!(!mutator.is_applicable_on(&Vec::new()));

        let neighbor = mutator.generates(&candidate, &mut rng).unwrap();
        let flipped = neighbor.iter().filter(|&&b| b).count();
        assert_eq!(flipped, 1);
    }

    #[test]
    fn test_neighboring_limit_constructors() {
        assert_eq!(
            NeighboringLimit::strict(10),
            NeighboringLimit {
                size: 10,
                strict: true
            }
        );
        assert!(!NeighboringLimit::estimated(10).strict);
        assert_eq!(Flip.neighboring_limit().map(|l| l.size), Some(8));
    }

    #[test]
    fn test_operator_id_display() {
        assert_eq!(OperatorId(7).to_string(), "op#7");
    }
}
