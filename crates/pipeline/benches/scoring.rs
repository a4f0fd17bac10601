//! Benchmarks for the scoring engine
//!
//! Run with: cargo bench --package pipeline
//!
//! Scores synthetic batches of chart-like films.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use data_loader::FilmRecord;
use pipeline::ScoringEngine;

fn synthetic_batch(size: usize) -> Vec<FilmRecord> {
    (0..size)
        .map(|i| {
            FilmRecord::new(
                format!("Film {}", i + 1),
                9.3 - (i % 30) as f64 * 0.05,
                2_800_000 - (i as u64 * 9_973) % 2_500_000,
                (i % 13) as u32,
            )
        })
        .collect()
}

fn bench_score(c: &mut Criterion) {
    let engine = ScoringEngine::default();
    let mut group = c.benchmark_group("score");

    for size in [20usize, 250, 10_000] {
        let films = synthetic_batch(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &films, |b, films| {
            b.iter(|| {
                let board = engine.score(black_box(films)).unwrap();
                black_box(board)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_score);
criterion_main!(benches);
