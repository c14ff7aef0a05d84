//! Criterion benchmarks for full diffusion runs and their building blocks.

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use plume_bench::{reference_profile, stress_profile, wide_config};
use plume_core::PriorOutput;
use plume_engine::{
    reachable_cells, DiffusionConfig, ExpansionOrder, SchedulerConfig, StepScheduler,
};

fn bench_fill_orders_16k(c: &mut Criterion) {
    let profile = reference_profile(42);
    let mut group = c.benchmark_group("fill_16k");
    for (name, order) in [
        ("greedy", ExpansionOrder::GreedyNearest),
        ("layered", ExpansionOrder::LayeredWave),
        ("depth_first", ExpansionOrder::DepthFirstPath),
    ] {
        let config = wide_config(order);
        let mut engine = profile.engine();
        group.bench_function(name, |b| {
            b.iter(|| {
                engine.start(profile.origin, &config).unwrap();
                black_box(engine.run_to_completion());
            });
        });
    }
    group.finish();
}

fn bench_fixed_count_stress(c: &mut Criterion) {
    let profile = stress_profile(42);
    let config = DiffusionConfig::builder()
        .fixed_count(20_000)
        .decay_per_unit_distance(0.01)
        .build()
        .unwrap();
    let mut engine = profile.engine();

    c.bench_function("fixed_count_20k_of_262k", |b| {
        b.iter(|| {
            engine.start(profile.origin, &config).unwrap();
            black_box(engine.run_to_completion());
        });
    });
}

fn bench_single_step(c: &mut Criterion) {
    let profile = reference_profile(42);
    let config = wide_config(ExpansionOrder::GreedyNearest);
    let mut engine = profile.engine();

    c.bench_function("greedy_single_step", |b| {
        b.iter(|| {
            if !engine.is_running() {
                engine.start(profile.origin, &config).unwrap();
            }
            black_box(engine.step());
        });
    });
}

fn bench_reachable_count(c: &mut Criterion) {
    let profile = stress_profile(42);
    let origin = profile.space.index_of(profile.origin).unwrap();

    c.bench_function("reachable_cells_262k", |b| {
        b.iter(|| {
            black_box(reachable_cells(
                &profile.space,
                &profile.obstacles,
                origin,
                false,
            ));
        });
    });
}

fn bench_scheduler_frames(c: &mut Criterion) {
    let profile = reference_profile(42);
    let config = wide_config(ExpansionOrder::GreedyNearest);
    let frame = Duration::from_micros(16_667);

    c.bench_function("scheduler_60fps_until_settled", |b| {
        b.iter(|| {
            let mut scheduler =
                StepScheduler::new(profile.engine(), SchedulerConfig::default()).unwrap();
            scheduler
                .start_run(
                    profile.origin.x,
                    profile.origin.y,
                    &config,
                    PriorOutput::Discard,
                )
                .unwrap();
            let mut frames = 0u32;
            while scheduler.engine().is_running() {
                black_box(scheduler.advance(frame));
                frames += 1;
            }
            black_box(frames);
        });
    });
}

criterion_group!(
    benches,
    bench_fill_orders_16k,
    bench_fixed_count_stress,
    bench_single_step,
    bench_reachable_count,
    bench_scheduler_frames,
);
criterion_main!(benches);
