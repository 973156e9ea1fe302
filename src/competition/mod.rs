//! Pairwise comparison of candidates.
//!
//! A [`Competition`] decides which of two candidates is better, or declares
//! a tie. Ties are resolved by an explicit [`TiePolicy`] chosen by the
//! caller rather than by a hidden default.
//!
//! Two ready-made competitions cover the usual cases:
//!
//! - [`EvaluatorCompetition`]: scalar evaluation, lower value wins
//!   (minimization).
//! - [`ComparatorCompetition`]: caller-supplied total order.

mod evaluator;
mod types;

pub use evaluator::{ComparatorCompetition, Evaluator, EvaluatorCompetition};
pub use types::{Competition, Outcome, TiePolicy, Winner};
