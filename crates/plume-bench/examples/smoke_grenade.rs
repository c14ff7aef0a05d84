//! A smoke grenade in a small room, driven at 60 fps.
//!
//! Demonstrates: world-space trigger → cell lookup → paced run → event
//! stream → reading the strength field and drift direction → restart.

use std::time::Duration;

use plume_core::{CellCoord, PriorOutput, RunEvent};
use plume_engine::{DiffusionConfig, DiffusionEngine, SchedulerConfig, StepScheduler};
use plume_space::{GridSpace, WorldPoint};

const ROOM: &str = "
####################
#..................#
#....####..........#
#....#.............#
#....#......###....#
#...........#......#
#...........#......#
####################
";

fn main() {
    println!("=== Plume Smoke Grenade Example ===\n");

    let rows: Vec<&str> = ROOM.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let height = rows.len() as u32;
    let width = rows[0].len() as u32;
    let grid = GridSpace::new(width, height, 0.5, WorldPoint::ZERO).unwrap();
    let walls = |c: CellCoord| {
        let row = rows[(height as i32 - 1 - c.y) as usize].as_bytes();
        row[c.x as usize] == b'#'
    };
    let engine = DiffusionEngine::with_oracle(grid, &walls);
    println!(
        "room: {}x{} cells, {} walls",
        width,
        height,
        engine.obstacles().obstacle_count()
    );

    let mut smoke = StepScheduler::new(engine, SchedulerConfig::default()).unwrap();
    let events = smoke.subscribe();
    let config = DiffusionConfig::builder()
        .strength_threshold(0.15)
        .decay_per_unit_distance(0.12)
        .build()
        .unwrap();

    // --- Grenade lands at a world position ---
    let landing = WorldPoint::new(1.6, 1.3);
    let cell = smoke.engine().space().world_to_cell(landing).unwrap();
    println!("grenade lands at {landing} -> cell {cell}");
    smoke
        .start_run(cell.x, cell.y, &config, PriorOutput::Discard)
        .unwrap();

    let frame = Duration::from_micros(16_667);
    let mut frames = 0;
    while smoke.engine().is_running() {
        let report = smoke.advance(frame);
        frames += 1;
        if frames % 10 == 0 {
            println!(
                "frame {frames:3}: +{} cells ({} total)",
                report.filled.len(),
                smoke.engine().field().visited_count()
            );
        }
    }

    let mut filled = 0;
    for event in events.try_iter() {
        match event {
            RunEvent::CellFilled(_) => filled += 1,
            RunEvent::Finished {
                cells_filled,
                reason,
                ..
            } => println!("\nsettled after {frames} frames: {cells_filled} cells, {reason:?}"),
            _ => {}
        }
    }
    assert_eq!(filled, smoke.engine().field().visited_count());

    // --- Render ---
    let engine = smoke.engine();
    for y in (0..height as i32).rev() {
        let line: String = (0..width as i32)
            .map(|x| {
                if engine.obstacles().is_blocked_at(CellCoord::new(x, y)) {
                    '#'
                } else {
                    match engine.strength(x, y) {
                        s if s >= 0.75 => '@',
                        s if s >= 0.5 => 'o',
                        s if s > 0.0 => '.',
                        _ => ' ',
                    }
                }
            })
            .collect();
        println!("{line}");
    }

    let drift = engine.flow_direction(cell.x + 2, cell.y);
    println!("\ndrift two cells east of the source: ({:.2}, {:.2})", drift.x, drift.y);

    // --- Second grenade replaces the first ---
    let handle = smoke
        .start_run(15, 2, &config, PriorOutput::Preserve)
        .unwrap();
    let summary = smoke.run_to_completion().unwrap();
    println!(
        "second grenade (run {}) filled {} cells",
        handle.id, summary.cells_filled
    );
}
