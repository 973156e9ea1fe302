//! Ready-made competitions built from an evaluator or a comparator.

use super::types::{Competition, Outcome};
use crate::error::{IncubatorError, Result};
use std::cmp::Ordering;

/// Assigns a comparable value to a candidate. Lower values are better.
///
/// Implemented for every `Fn(&C) -> V` with `V: PartialOrd`, so plain
/// closures can be used directly.
pub trait Evaluator<C> {
    /// The value type, typically `f64` or an integer.
    type Value: PartialOrd;

    /// Evaluates `candidate`.
    fn evaluate(&self, candidate: &C) -> Self::Value;
}

impl<C, V, F> Evaluator<C> for F
where
    F: Fn(&C) -> V,
    V: PartialOrd,
{
    type Value = V;

    fn evaluate(&self, candidate: &C) -> V {
        self(candidate)
    }
}

/// Minimizing competition over an [`Evaluator`].
///
/// Equal values tie. Values that cannot be ordered (such as `NaN`) are a
/// contract violation.
///
/// # Examples
///
/// ```
/// use u_incubator::competition::{Competition, EvaluatorCompetition, Outcome};
///
/// let competition = EvaluatorCompetition::new(|x: &i32| x.abs());
/// assert_eq!(competition.compare(&-1, &3).unwrap(), Outcome::FirstWins);
/// assert_eq!(competition.compare(&-3, &3).unwrap(), Outcome::Tie);
/// ```
#[derive(Debug, Clone)]
pub struct EvaluatorCompetition<E> {
    evaluator: E,
}

impl<E> EvaluatorCompetition<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    /// Returns the wrapped evaluator.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }
}

impl<C, E: Evaluator<C>> Competition<C> for EvaluatorCompetition<E> {
    fn compare(&self, first: &C, second: &C) -> Result<Outcome> {
        let a = self.evaluator.evaluate(first);
        let b = self.evaluator.evaluate(second);
        match a.partial_cmp(&b) {
            Some(ordering) => Ok(outcome_of(ordering)),
            None => Err(IncubatorError::contract(
                "evaluator returned incomparable values",
            )),
        }
    }
}

/// Competition over a caller-supplied total order; the candidate ordered
/// first (`Ordering::Less`) wins.
#[derive(Debug, Clone)]
pub struct ComparatorCompetition<F> {
    comparator: F,
}

impl<F> ComparatorCompetition<F> {
    pub fn new(comparator: F) -> Self {
        Self { comparator }
    }
}

impl<C, F> Competition<C> for ComparatorCompetition<F>
where
    F: Fn(&C, &C) -> Ordering,
{
    fn compare(&self, first: &C, second: &C) -> Result<Outcome> {
        Ok(outcome_of((self.comparator)(first, second)))
    }
}

fn outcome_of(ordering: Ordering) -> Outcome {
    match ordering {
        Ordering::Less => Outcome::FirstWins,
        Ordering::Greater => Outcome::SecondWins,
        Ordering::Equal => Outcome::Tie,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluator_minimizes() {
        let competition = EvaluatorCompetition::new(|x: &i32| *x);
        assert_eq!(competition.compare(&1, &2).unwrap(), Outcome::FirstWins);
        assert_eq!(competition.compare(&5, &2).unwrap(), Outcome::SecondWins);
        assert_eq!(competition.compare(&4, &4).unwrap(), Outcome::Tie);
    }

    #[test]
    fn test_evaluator_nan_is_contract_violation() {
        let competition = EvaluatorCompetition::new(|x: &f64| *x);
        let err = competition.compare(&f64::NAN, &1.0).unwrap_err();
        assert!(matches!(err, IncubatorError::ContractViolation(_)));
    }

    #[test]
    fn test_evaluator_on_derived_value() {
        // Shorter strings win.
        let competition = EvaluatorCompetition::new(|s: &String| s.len());
        let short = "ab".to_string();
        let long = "abcd".to_string();
        assert_eq!(competition.compare(&long, &short).unwrap(), Outcome::SecondWins);
    }

    #[test]
    fn test_comparator_reverse_order() {
        // Maximization through a reversed comparator.
        let competition = ComparatorCompetition::new(|a: &i32, b: &i32| b.cmp(a));
        assert_eq!(competition.compare(&9, &2).unwrap(), Outcome::FirstWins);
        assert_eq!(competition.compare(&2, &9).unwrap(), Outcome::SecondWins);
        assert_eq!(competition.compare(&3, &3).unwrap(), Outcome::Tie);
    }

    #[test]
    fn test_boxed_competition() {
        let boxed: Box<dyn Competition<i32>> = Box::new(EvaluatorCompetition::new(|x: &i32| *x));
        assert_eq!(boxed.compare(&0, &1).unwrap(), Outcome::FirstWins);
    }
}
