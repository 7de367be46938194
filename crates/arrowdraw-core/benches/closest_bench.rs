//! Benchmarks for the closest-point search and the per-arrow pipeline.
//!
//! Run with: cargo bench -p arrowdraw-core

use arrowdraw_core::{ArrowPipeline, ArrowSpec, ClosestPointSolver, Rect, SearchStrategy};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Two `size`×`size` boxes side by side with a gap of `size`.
fn side_by_side(size: f64) -> (Rect, Rect) {
    (
        Rect::from_origin_size(0.0, 0.0, size, size),
        Rect::from_origin_size(size * 2.0, 0.0, size, size),
    )
}

/// Two `size`×`size` boxes touching at a corner region.
fn diagonal(size: f64) -> (Rect, Rect) {
    (
        Rect::from_origin_size(0.0, 0.0, size, size),
        Rect::from_origin_size(size * 1.5, size * 1.5, size, size),
    )
}

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest/solve");

    for size in [10.0, 50.0, 100.0, 200.0] {
        let (a, b) = side_by_side(size);
        for strategy in [SearchStrategy::Exhaustive, SearchStrategy::Pruned] {
            let solver = ClosestPointSolver::new(strategy);
            let label = format!("{strategy:?}").to_lowercase();
            group.bench_with_input(
                BenchmarkId::new(format!("side_by_side/{label}"), size as u32),
                &(a, b),
                |bench, (a, b)| bench.iter(|| black_box(solver.solve(a, b))),
            );
        }
    }

    for size in [10.0, 50.0, 100.0] {
        let (a, b) = diagonal(size);
        let solver = ClosestPointSolver::new(SearchStrategy::Pruned);
        group.bench_with_input(
            BenchmarkId::new("diagonal/pruned", size as u32),
            &(a, b),
            |bench, (a, b)| bench.iter(|| black_box(solver.solve(a, b))),
        );
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest/pipeline");
    let pipeline = ArrowPipeline::default();
    let spec = ArrowSpec::new("bench", "a", "b");

    for size in [20.0, 100.0] {
        let (a, b) = side_by_side(size);
        group.bench_with_input(
            BenchmarkId::new("compute", size as u32),
            &(a, b),
            |bench, (a, b)| bench.iter(|| black_box(pipeline.compute(&spec, a, b))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_solver, bench_pipeline);
criterion_main!(benches);
