//! Weighted random selection over cumulative interest.

use rand::{Rng, RngCore};

/// Lottery where each ticket wins with probability proportional to its
/// interest.
///
/// Every ticket owns the half-open slice `[before, before + interest)` of
/// `[0, total)`. A draw picks a uniform point in `[0, total)` and returns
/// the ticket whose slice contains it, found by binary search over the
/// cumulative sums. Tickets with non-positive (or non-finite) interest are
/// never entered.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_incubator::incubator::Lottery;
///
/// let mut lottery = Lottery::new();
/// lottery.enter("mutate", 3.0);
/// lottery.enter("explore", 1.0);
/// lottery.enter("never", 0.0);
/// assert_eq!(lottery.len(), 2);
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let winner = lottery.draw(&mut rng).unwrap();
/// assert!(*winner == "mutate" || *winner == "explore");
/// ```
#[derive(Debug, Clone)]
pub struct Lottery<T> {
    tickets: Vec<(f64, T)>,
    total: f64,
}

impl<T> Default for Lottery<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Lottery<T> {
    pub fn new() -> Self {
        Self {
            tickets: Vec::new(),
            total: 0.0,
        }
    }

    /// Enters `item` with the given interest. Returns whether it was
    /// entered.
    pub fn enter(&mut self, item: T, interest: f64) -> bool {
        if !(interest > 0.0 && interest.is_finite()) {
            return false;
        }
        self.total += interest;
        self.tickets.push((self.total, item));
        true
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Sum of all entered interests.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Draws the winning ticket, or `None` if nothing was entered.
    pub fn draw(&self, rng: &mut dyn RngCore) -> Option<&T> {
        if self.tickets.is_empty() {
            return None;
        }
        let roll = rng.random_range(0.0..self.total);
        Some(self.pick(roll))
    }

    /// Consumes the lottery, returning the winning ticket.
    pub fn into_draw(mut self, rng: &mut dyn RngCore) -> Option<T> {
        if self.tickets.is_empty() {
            return None;
        }
        let roll = rng.random_range(0.0..self.total);
        let index = self.index_of(roll);
        Some(self.tickets.swap_remove(index).1)
    }

    fn pick(&self, roll: f64) -> &T {
        &self.tickets[self.index_of(roll)].1
    }

    /// Ceiling lookup: first ticket whose cumulative bound exceeds `roll`.
    fn index_of(&self, roll: f64) -> usize {
        let index = self.tickets.partition_point(|(bound, _)| *bound <= roll);
        index.min(self.tickets.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_lottery_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(42);
        let lottery: Lottery<u8> = Lottery::new();
        assert!(lottery.is_empty());
        assert!(lottery.draw(&mut rng).is_none());
        assert!(lottery.into_draw(&mut rng).is_none());
    }

    #[test]
    fn test_rejects_non_positive_interest() {
        let mut lottery = Lottery::new();
        assert!(!lottery.enter('a', 0.0));
        assert!(!lottery.enter('b', -1.0));
        assert!(!lottery.enter('c', f64::NAN));
        assert!(!lottery.enter('d', f64::INFINITY));
        assert!(lottery.enter('e', 0.5));
        assert_eq!(lottery.len(), 1);
        assert!((lottery.total() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_interval_boundaries() {
        let mut lottery = Lottery::new();
        lottery.enter('a', 1.0);
        lottery.enter('b', 2.0);
        lottery.enter('c', 1.0);

        assert_eq!(*lottery.pick(0.0), 'a');
        assert_eq!(*lottery.pick(0.999), 'a');
        assert_eq!(*lottery.pick(1.0), 'b');
        assert_eq!(*lottery.pick(2.5), 'b');
        assert_eq!(*lottery.pick(3.0), 'c');
        assert_eq!(*lottery.pick(3.999), 'c');
    }

    #[test]
    fn test_single_ticket_always_wins() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut lottery = Lottery::new();
        lottery.enter(7, 1e-9);
        for _ in 0..100 {
            assert_eq!(lottery.draw(&mut rng), Some(&7));
        }
    }

    #[test]
    fn test_frequencies_follow_interest() {
        let mut rng = StdRng::seed_from_u64(42);
        let weights = [1.0, 2.0, 3.0, 4.0];
        let mut lottery = Lottery::new();
        for (i, &w) in weights.iter().enumerate() {
            lottery.enter(i, w);
        }

        let draws = 100_000;
        let mut counts = [0usize; 4];
        for _ in 0..draws {
            counts[*lottery.draw(&mut rng).unwrap()] += 1;
        }

        let total: f64 = weights.iter().sum();
        for (i, &w) in weights.iter().enumerate() {
            let observed = counts[i] as f64 / draws as f64;
            let expected = w / total;
            assert!(
                (observed - expected).abs() < 0.01,
                "ticket {i}: observed {observed:.4}, expected {expected:.4}"
            );
        }
    }

    proptest! {
        #[test]
        fn prop_draw_only_entered_tickets(
            interests in proptest::collection::vec(-1.0f64..5.0, 1..20),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut lottery = Lottery::new();
            for (i, &interest) in interests.iter().enumerate() {
                lottery.enter(i, interest);
            }
            match lottery.draw(&mut rng) {
                Some(&i) => prop_assert!(interests[i] > 0.0),
                None => prop_assert!(interests.iter().all(|&w| w <= 0.0)),
            }
        }
    }
}
