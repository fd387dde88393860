use criterion::{BenchmarkId, Criterion, criterion_group};
use itertools::Itertools;
use list_blend::{Blend, RoundRobin, allocate};
use rand::prelude::*;

fn random_percentages(rng: &mut StdRng, parts: usize) -> Vec<u32> {
    let mut cuts = (1..parts)
        .map(|_| rng.random_range(0..=100))
        .collect::<Vec<u32>>();
    cuts.push(0);
    cuts.push(100);
    cuts.sort_unstable();
    cuts.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

fn bench_allocate(c: &mut Criterion) {
    let source_counts = [2, 8, 32, 128, 512];
    let mut rng = StdRng::seed_from_u64(0);

    let mut group = c.benchmark_group("Allocate (random sizes)");
    for n_sources in source_counts.iter().copied() {
        let sizes = (0..n_sources)
            .map(|_| rng.random_range(0..2000))
            .collect::<Vec<usize>>();
        let percentages = random_percentages(&mut rng, n_sources);
        let result_size = sizes.iter().sum::<usize>() / 2;
        group.bench_function(BenchmarkId::new("allocate", n_sources), |b| {
            b.iter(|| allocate(&sizes, &percentages, result_size));
        });
    }
    group.finish();

    // Every other source is nearly empty, so there is a lot of shortfall to move around
    let mut group = c.benchmark_group("Allocate (shortfall)");
    for n_sources in source_counts.iter().copied() {
        let sizes = (0..n_sources)
            .map(|n| if n % 2 == 0 { 1 } else { 5000 })
            .collect::<Vec<usize>>();
        let percentages = vec![(100 / n_sources).max(1) as u32; n_sources];
        let result_size = 1000 * n_sources;
        group.bench_function(BenchmarkId::new("allocate", n_sources), |b| {
            b.iter(|| allocate(&sizes, &percentages, result_size));
        });
    }
    group.finish();
}

fn bench_interleave(c: &mut Criterion) {
    let n_els = 2_usize.pow(20);
    let vec = StdRng::seed_from_u64(0)
        .random_iter()
        .take(n_els)
        .collect::<Vec<u64>>();
    let half = n_els / 2;

    let mut group = c.benchmark_group("Two equal sources VS Itertools");
    group.bench_function("RoundRobin", |b| {
        b.iter(|| {
            RoundRobin::new(
                [vec[..half].iter().copied(), vec[half..].iter().copied()],
                [half, half],
            )
            .unwrap()
            .into_vec()
        });
    });
    group.bench_function("Itertools interleave", |b| {
        b.iter(|| {
            vec[..half]
                .iter()
                .copied()
                .interleave(vec[half..].iter().copied())
                .collect::<Vec<_>>()
        });
    });
    group.finish();

    let mut group = c.benchmark_group("Blend");
    for n_sources in [2, 8, 32, 128, 512] {
        let it_len = n_els / n_sources;
        let percentages = vec![(100 / n_sources).max(1) as u32; n_sources];
        group.bench_function(BenchmarkId::new("Blend", n_sources), |b| {
            b.iter(|| {
                Blend::new((0..n_sources).map(|n| &vec[n * it_len..(n + 1) * it_len]))
                    .percentages(percentages.iter().copied())
                    .result_size(n_els / 2)
                    .build()
                    .unwrap()
                    .into_vec()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_allocate, bench_interleave);
