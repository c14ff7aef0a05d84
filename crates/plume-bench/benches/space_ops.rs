//! Criterion micro-benchmarks for grid geometry and obstacle snapshots.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use plume_core::CellCoord;
use plume_space::{GridSpace, ObstacleMask, WorldPoint};
use plume_test_utils::fixtures::random_obstacles;

/// Benchmark: neighbours() on all 16K cells of a 128x128 grid.
fn bench_neighbours_16k(c: &mut Criterion) {
    let space = GridSpace::new(128, 128, 1.0, WorldPoint::ZERO).unwrap();

    c.bench_function("neighbours_16k", |b| {
        b.iter(|| {
            for coord in space.coords() {
                black_box(space.neighbours(coord));
            }
        });
    });
}

/// Benchmark: world_to_cell() for 10K points on an offset grid.
fn bench_world_to_cell(c: &mut Criterion) {
    let space = GridSpace::new(200, 200, 0.25, WorldPoint::new(-25.0, -25.0)).unwrap();
    let points: Vec<WorldPoint> = (0u64..10_000)
        .map(|i| {
            let x = (i.wrapping_mul(6364136223846793007) % 5000) as f64 / 100.0 - 25.0;
            let y = (i.wrapping_mul(1442695040888963407) % 5000) as f64 / 100.0 - 25.0;
            WorldPoint::new(x, y)
        })
        .collect();

    c.bench_function("world_to_cell_10k", |b| {
        b.iter(|| {
            for p in &points {
                black_box(space.world_to_cell(*p));
            }
        });
    });
}

/// Benchmark: snapshot a circular-collider oracle over 16K cells.
fn bench_snapshot_16k(c: &mut Criterion) {
    let space = GridSpace::new(128, 128, 0.5, WorldPoint::ZERO).unwrap();
    let centre = WorldPoint::new(32.0, 32.0);
    let oracle = |coord: CellCoord| space.cell_center(coord).distance(centre) < 10.0;

    c.bench_function("snapshot_16k", |b| {
        b.iter(|| black_box(ObstacleMask::snapshot(&space, &oracle)));
    });

    c.bench_function("random_obstacles_16k", |b| {
        b.iter(|| black_box(random_obstacles(&space, 0.2, 42, &[])));
    });
}

criterion_group!(
    benches,
    bench_neighbours_16k,
    bench_world_to_cell,
    bench_snapshot_16k,
);
criterion_main!(benches);
