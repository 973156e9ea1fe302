//! Criterion benchmarks for the incubation loop.
//!
//! Uses a synthetic integer sphere (minimize sum(x_i^2)) to measure pure
//! scheduling overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use u_incubator::competition::EvaluatorCompetition;
use u_incubator::incubator::{Incubator, IncubatorConfig, Lottery};
use u_incubator::operators::{Explorator, Mutator};
use u_incubator::pool::TrackerPool;

// ===========================================================================
// Integer sphere
// ===========================================================================

fn sphere(x: &Vec<i32>) -> i64 {
    x.iter().map(|&v| (v as i64) * (v as i64)).sum()
}

/// Moves one random coordinate by one step.
struct Step;

impl Mutator<Vec<i32>> for Step {
    fn name(&self) -> &str {
        "step"
    }

    fn is_applicable_on(&self, candidate: &Vec<i32>) -> bool {
        !candidate.is_empty()
    }

    fn generates(&self, candidate: &Vec<i32>, rng: &mut dyn RngCore) -> Option<Vec<i32>> {
        let mut next = candidate.clone();
        let i = rng.random_range(0..next.len());
        next[i] += if rng.random_bool(0.5) { 1 } else { -1 };
        Some(next)
    }
}

struct RandomPoint {
    dim: usize,
}

impl Explorator<Vec<i32>> for RandomPoint {
    fn name(&self) -> &str {
        "random-point"
    }

    fn is_applicable_on(&self, _population: &[Vec<i32>]) -> bool {
        true
    }

    fn generates(&self, _population: &[Vec<i32>], rng: &mut dyn RngCore) -> Vec<i32> {
        (0..self.dim).map(|_| rng.random_range(-20..=20)).collect()
    }
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_incubate_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("incubate_sphere");
    group.sample_size(10);

    for (dim, max_size, rounds) in [(5usize, 5usize, 500usize), (20, 10, 500), (50, 20, 300)] {
        group.bench_with_input(
            BenchmarkId::new(format!("d{}_m{}_r{}", dim, max_size, rounds), dim),
            &(dim, max_size, rounds),
            |b, &(dim, max_size, rounds)| {
                b.iter(|| {
                    let config = IncubatorConfig::default()
                        .with_min_size(1)
                        .with_max_size(max_size)
                        .with_seed(42);
                    let mut incubator: Incubator<Vec<i32>> =
                        Incubator::minimizing(sphere as fn(&Vec<i32>) -> i64, config).unwrap();
                    incubator.add_mutator(Step);
                    incubator.add_explorator(RandomPoint { dim });
                    let summary = incubator.run(black_box(rounds)).unwrap();
                    black_box(summary)
                })
            },
        );
    }
    group.finish();
}

fn bench_lottery_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("lottery_draw");

    for &n in &[10usize, 100, 1000] {
        let mut lottery = Lottery::new();
        for i in 0..n {
            lottery.enter(i, 1.0 + (i % 7) as f64);
        }
        let mut rng = StdRng::seed_from_u64(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &lottery, |b, l| {
            b.iter(|| black_box(l.draw(&mut rng).copied()))
        });
    }
    group.finish();
}

fn bench_pool_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_reduce");
    group.sample_size(10);

    for &n in &[20usize, 100, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(42);
                let mut pool: TrackerPool<i64> =
                    TrackerPool::new(EvaluatorCompetition::new(|x: &i64| *x));
                for _ in 0..n {
                    pool.push(rng.random_range(0..1_000_000i64));
                }
                let evicted = pool.reduce_to(black_box(n / 2), &mut rng).unwrap();
                black_box(evicted)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_incubate_sphere, bench_lottery_draw, bench_pool_reduce);
criterion_main!(benches);
