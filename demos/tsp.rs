//! Travelling salesman on random cities.
//!
//! Tours are permutations of city indices. Two local mutators (relocation
//! and swap) polish each trajectory while two explorators (random tours
//! and order crossover) seed new ones once the trajectories look
//! converged. The population is capped at 5 tours.
//!
//! Run with `cargo run --example tsp -- [cities] [rounds] [seed]`.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::Arc;
use u_incubator::incubator::{Incubator, IncubatorConfig};
use u_incubator::operators::{Explorator, Mutator, NeighboringLimit};

#[derive(Debug, Clone, Copy)]
struct City {
    x: f64,
    y: f64,
}

impl City {
    fn distance(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Tour(Vec<usize>);

fn length(cities: &[City], tour: &Tour) -> f64 {
    let order = &tour.0;
    if order.len() < 2 {
        return 0.0;
    }
    order
        .iter()
        .zip(order.iter().cycle().skip(1))
        .map(|(&a, &b)| cities[a].distance(&cities[b]))
        .sum()
}

// ---- mutators ----

/// Moves one city elsewhere in the tour.
struct Relocation;

impl Mutator<Tour> for Relocation {
    fn name(&self) -> &str {
        "relocation"
    }

    fn is_applicable_on(&self, tour: &Tour) -> bool {
        tour.0.len() > 2
    }

    fn generates(&self, tour: &Tour, rng: &mut dyn RngCore) -> Option<Tour> {
        let n = tour.0.len();
        let from = rng.random_range(0..n);
        let mut to = rng.random_range(0..n - 1);
        if to >= from {
            to += 1;
        }
        let mut order = tour.0.clone();
        let city = order.remove(from);
        order.insert(to, city);
        Some(Tour(order))
    }
}

/// Exchanges two cities; declares its neighborhood size.
struct Swap {
    cities: usize,
}

impl Mutator<Tour> for Swap {
    fn name(&self) -> &str {
        "swap"
    }

    fn is_applicable_on(&self, tour: &Tour) -> bool {
        tour.0.len() > 3
    }

    fn generates(&self, tour: &Tour, rng: &mut dyn RngCore) -> Option<Tour> {
        let n = tour.0.len();
        let a = rng.random_range(0..n);
        let mut b = rng.random_range(0..n - 1);
        if b >= a {
            b += 1;
        }
        let mut order = tour.0.clone();
        order.swap(a, b);
        Some(Tour(order))
    }

    fn neighboring_limit(&self) -> Option<NeighboringLimit> {
        let n = self.cities as u64;
        Some(NeighboringLimit::estimated(n * n.saturating_sub(1) / 2))
    }
}

// ---- explorators ----

struct RandomTour {
    cities: usize,
}

impl Explorator<Tour> for RandomTour {
    fn name(&self) -> &str {
        "random-tour"
    }

    fn is_applicable_on(&self, _population: &[Tour]) -> bool {
        true
    }

    fn generates(&self, _population: &[Tour], rng: &mut dyn RngCore) -> Tour {
        let mut order: Vec<usize> = (0..self.cities).collect();
        order.shuffle(rng);
        Tour(order)
    }
}

/// Order crossover (OX) of two distinct tours of the population.
struct OrderCrossover;

impl Explorator<Tour> for OrderCrossover {
    fn name(&self) -> &str {
        "order-crossover"
    }

    fn is_applicable_on(&self, population: &[Tour]) -> bool {
        population.len() >= 2
    }

    fn generates(&self, population: &[Tour], rng: &mut dyn RngCore) -> Tour {
        let i = rng.random_range(0..population.len());
        let mut j = rng.random_range(0..population.len() - 1);
        if j >= i {
            j += 1;
        }
        let (first, second) = (&population[i].0, &population[j].0);

        let n = first.len();
        let mut a = rng.random_range(0..n);
        let mut b = rng.random_range(0..n);
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }

        let mut child = vec![usize::MAX; n];
        let mut taken = vec![false; n];
        for k in a..=b {
            child[k] = first[k];
            taken[first[k]] = true;
        }

        let mut fill = second.iter().copied().filter(|&c| !taken[c]);
        for slot in child.iter_mut().filter(|c| **c == usize::MAX) {
            if let Some(city) = fill.next() {
                *slot = city;
            }
        }
        Tour(child)
    }
}

type BoxError = Box<dyn std::error::Error>;

fn arg(args: &[String], index: usize, name: &str, default: u64) -> Result<u64, BoxError> {
    match args.get(index) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|err| format!("invalid {name} `{raw}`: {err}").into()),
    }
}

/// `[cities] [rounds] [seed]`, after the program name.
fn parse_args(args: &[String]) -> Result<(usize, usize, u64), BoxError> {
    let cities = arg(args, 1, "city count", 30)? as usize;
    if cities < 2 {
        return Err(format!("need at least 2 cities, got {cities}").into());
    }
    let rounds = arg(args, 2, "round count", 20_000)? as usize;
    let seed = arg(args, 3, "seed", 42)?;
    Ok((cities, rounds, seed))
}

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let (n, rounds, seed) = parse_args(&args)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let cities: Arc<Vec<City>> = Arc::new(
        (0..n)
            .map(|_| City {
                x: rng.random_range(0.0..100.0),
                y: rng.random_range(0.0..100.0),
            })
            .collect(),
    );

    let config = IncubatorConfig::default()
        .with_min_size(1)
        .with_max_size(5)
        .with_seed(seed);
    let evaluator = {
        let cities = Arc::clone(&cities);
        move |tour: &Tour| length(&cities, tour)
    };
    let mut incubator: Incubator<Tour> = Incubator::minimizing(evaluator, config)?;
    incubator.add_mutator(Relocation);
    incubator.add_mutator(Swap { cities: n });
    incubator.add_explorator(RandomTour { cities: n });
    incubator.add_explorator(OrderCrossover);

    let report = 10;
    for step in 1..=report {
        let summary = incubator.run(rounds / report)?;
        let best = incubator.get_best().next().transpose()?;
        if let Some(best) = best {
            tracing::info!(
                step,
                population = incubator.pool().len(),
                length = length(&cities, &best),
                "best tour"
            );
        }
        if summary.stalled {
            tracing::info!("nothing left to try");
            break;
        }
    }

    if let Some(best) = incubator.get_best().next().transpose()? {
        println!("best tour: {:?}", best.0);
        println!("length: {:.2}", length(&cities, &best));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        std::iter::once("tsp")
            .chain(values.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse_args(&args(&[])).unwrap(), (30, 20_000, 42));
        assert_eq!(parse_args(&args(&["8", "100"])).unwrap(), (8, 100, 42));
    }

    #[test]
    fn test_unparsable_argument_is_an_error() {
        let err = parse_args(&args(&["abc"])).unwrap_err();
        assert!(err.to_string().contains("city count `abc`"), "{err}");
        assert!(parse_args(&args(&["10", "-1"])).is_err());
    }

    #[test]
    fn test_too_few_cities_rejected() {
        assert!(parse_args(&args(&["0"])).is_err());
        assert!(parse_args(&args(&["1"])).is_err());
        assert!(parse_args(&args(&["2"])).is_ok());
    }

    #[test]
    fn test_crossover_keeps_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let population = vec![Tour(vec![0, 1, 2, 3, 4]), Tour(vec![4, 2, 0, 3, 1])];
        for _ in 0..50 {
            let mut child = OrderCrossover.generates(&population, &mut rng).0;
            child.sort_unstable();
            assert_eq!(child, vec![0, 1, 2, 3, 4]);
        }
    }
}
