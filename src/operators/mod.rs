//! Strategy contracts for candidate generation.
//!
//! Two kinds of operators feed the incubator:
//!
//! - **Mutators** act locally: given one candidate, they propose one
//!   neighbor. Each mutator defines its own neighborhood topology over the
//!   search space.
//! - **Explorators** act globally: given a snapshot of the whole
//!   population, they produce a new candidate that seeds a new search
//!   trajectory (random restarts, recombination, diversification).
//!
//! The incubator never inspects an operator beyond its declared
//! applicability and its generated output.

mod types;

pub use types::{Explorator, Mutator, NeighboringLimit, OperatorId};
