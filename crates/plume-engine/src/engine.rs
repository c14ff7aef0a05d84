//! The diffusion engine: one resumable run over a static grid.
//!
//! A run is an explicit state machine rather than a coroutine. Between
//! calls to [`DiffusionEngine::step`] every piece of run state (frontier,
//! discovered flags, strength field) is plain data owned by the engine, so
//! the host can read the field, cancel, or restart at any step boundary.

use std::time::Instant;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, warn};

use plume_core::{
    CellCoord, CellFilled, CompletionReason, ObstacleOracle, PriorOutput, RunEvent, RunId,
};
use plume_space::{CellField, CellIndex, Direction, GridSpace, ObstacleMask, SpaceError};

use crate::config::{ConfigError, CountLimitMode, DiffusionConfig, ExpansionOrder};
use crate::error::{InvalidStartReason, StartError};
use crate::flow::{flow_direction, FlowVector};
use crate::frontier::{Frontier, FrontierEntry};
use crate::metrics::RunMetrics;
use crate::reach::reachable_cells;
use crate::strength::StrengthField;

// ── Public run types ───────────────────────────────────────────────

/// Identifies a started run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunHandle {
    /// Unique (per engine) run id.
    pub id: RunId,
    /// The source cell.
    pub origin: CellCoord,
}

/// Coarse engine state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// No run has started since construction or the last clear.
    Idle,
    /// A run is in progress.
    Running,
    /// The last run was cancelled; its partial field persists.
    Cancelled,
    /// The last run finished on its own; its field persists.
    Complete,
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Stopped by its termination policy or an empty frontier.
    Completed(CompletionReason),
    /// Stopped by [`DiffusionEngine::cancel`], a clear, or a replacing start.
    Cancelled,
}

/// What a finished or cancelled run did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// The run.
    pub handle: RunHandle,
    /// Cells processed.
    pub cells_filled: usize,
    /// Waves started (layered order only).
    pub waves: u32,
    /// How it ended.
    pub outcome: RunOutcome,
}

/// Output of one [`DiffusionEngine::step`].
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    /// Cells processed by this step, in expansion order.
    pub filled: Vec<CellFilled>,
    /// Engine state after the step.
    pub status: RunStatus,
}

impl StepResult {
    /// Whether the run is still in progress after this step.
    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }
}

// ── Internal run state ─────────────────────────────────────────────

#[derive(Debug)]
struct ActiveRun {
    handle: RunHandle,
    config: DiffusionConfig,
    frontier: Frontier,
    filled: usize,
    waves: u32,
}

impl ActiveRun {
    fn budget_spent(&self) -> bool {
        self.config.cell_budget().is_some_and(|n| self.filled >= n)
    }

    fn summary(&self, outcome: RunOutcome) -> RunSummary {
        RunSummary {
            handle: self.handle,
            cells_filled: self.filled,
            waves: self.waves,
            outcome,
        }
    }
}

#[derive(Debug)]
enum RunState {
    Idle,
    Running(ActiveRun),
    Cancelled(RunSummary),
    Complete(RunSummary),
}

// ── DiffusionEngine ────────────────────────────────────────────────

/// Grid, obstacle snapshot, strength field and at most one active run.
///
/// # Examples
///
/// ```
/// use plume_core::CellCoord;
/// use plume_engine::{DiffusionConfig, DiffusionEngine, RunStatus};
/// use plume_space::{GridSpace, WorldPoint};
///
/// let grid = GridSpace::new(5, 5, 1.0, WorldPoint::ZERO).unwrap();
/// let mut engine = DiffusionEngine::without_obstacles(grid);
/// let config = DiffusionConfig::builder().fixed_count(5).build().unwrap();
///
/// engine.start(CellCoord::new(2, 2), &config).unwrap();
/// while engine.step().is_running() {}
///
/// assert_eq!(engine.status(), RunStatus::Complete);
/// assert_eq!(engine.field().visited_count(), 5);
/// assert_eq!(engine.strength(2, 2), 1.0);
/// ```
#[derive(Debug)]
pub struct DiffusionEngine {
    space: GridSpace,
    obstacles: ObstacleMask,
    field: StrengthField,
    discovered: CellField<bool>,
    below_threshold: CellField<bool>,
    distance: CellField<Option<f64>>,
    state: RunState,
    last_run: RunId,
    metrics: RunMetrics,
    subscribers: Vec<Sender<RunEvent>>,
}

impl DiffusionEngine {
    /// Build an engine over `space` with a prepared obstacle snapshot.
    ///
    /// Fails with [`SpaceError::ShapeMismatch`] if `obstacles` was built
    /// for a different grid.
    pub fn new(space: GridSpace, obstacles: ObstacleMask) -> Result<Self, SpaceError> {
        obstacles.check_shape(&space)?;
        Ok(Self::from_parts(space, obstacles))
    }

    /// Build an engine, snapshotting `oracle` once per cell.
    pub fn with_oracle(space: GridSpace, oracle: &impl ObstacleOracle) -> Self {
        let obstacles = ObstacleMask::snapshot(&space, oracle);
        Self::from_parts(space, obstacles)
    }

    /// Build an engine over an obstacle-free grid.
    pub fn without_obstacles(space: GridSpace) -> Self {
        let obstacles = ObstacleMask::empty(&space);
        Self::from_parts(space, obstacles)
    }

    fn from_parts(space: GridSpace, obstacles: ObstacleMask) -> Self {
        Self {
            field: StrengthField::new(&space),
            discovered: CellField::new(&space, false),
            below_threshold: CellField::new(&space, false),
            distance: CellField::new(&space, None),
            space,
            obstacles,
            state: RunState::Idle,
            last_run: RunId(0),
            metrics: RunMetrics::default(),
            subscribers: Vec::new(),
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Start a run at `origin`, discarding any prior output.
    ///
    /// Equivalent to [`start_with`](Self::start_with) with
    /// [`PriorOutput::Discard`].
    pub fn start(
        &mut self,
        origin: CellCoord,
        config: &DiffusionConfig,
    ) -> Result<RunHandle, StartError> {
        self.start_with(origin, config, PriorOutput::Discard)
    }

    /// Start a run at `origin`, cancelling any run in progress.
    ///
    /// Everything is validated before anything is touched: on error the
    /// current run (if any) continues and the field is unchanged. On
    /// success the field, discovered flags and metrics are reset and the
    /// origin is queued; the first [`step`](Self::step) processes it.
    ///
    /// # Errors
    ///
    /// - [`StartError::InvalidStart`] if `origin` is out of bounds or an
    ///   obstacle.
    /// - [`StartError::Config`] if `config` fails validation, or if it is
    ///   strict about a `FixedCount` budget the origin cannot reach.
    pub fn start_with(
        &mut self,
        origin: CellCoord,
        config: &DiffusionConfig,
        prior_output: PriorOutput,
    ) -> Result<RunHandle, StartError> {
        let index = self
            .space
            .index_of(origin)
            .ok_or_else(|| reject(origin, InvalidStartReason::OutOfBounds))?;
        if self.obstacles.is_blocked(index) {
            return Err(reject(origin, InvalidStartReason::Obstacle));
        }
        if let Err(e) = config.validate() {
            warn!("rejected run config: {e}");
            return Err(e.into());
        }
        if let (CountLimitMode::Strict, Some(requested)) =
            (config.count_limit, config.cell_budget())
        {
            let reachable = reachable_cells(
                &self.space,
                &self.obstacles,
                index,
                config.corner_cutting_allowed,
            );
            if requested > reachable {
                warn!("cell budget {requested} exceeds {reachable} cells reachable from {origin}");
                return Err(ConfigError::CellBudgetExceedsReachable {
                    requested,
                    reachable,
                }
                .into());
            }
        }

        self.cancel();
        self.reset_cells();
        self.metrics = RunMetrics::default();
        self.last_run = self.last_run.next();
        let handle = RunHandle {
            id: self.last_run,
            origin,
        };

        let mut frontier = Frontier::new(config.order);
        self.discovered[index] = true;
        frontier.push(FrontierEntry {
            coord: origin,
            index,
            distance: 0.0,
            via: None,
        });
        self.metrics.cells_discovered = 1;
        self.metrics.frontier_peak = 1;

        info!(
            "run {} started at {origin}: {:?}, {:?}, {:?}",
            handle.id, config.order, config.termination, config.metric
        );
        self.publish(RunEvent::Started {
            run: handle.id,
            origin,
            prior_output,
        });
        self.state = RunState::Running(ActiveRun {
            handle,
            config: config.clone(),
            frontier,
            filled: 0,
            waves: 0,
        });
        Ok(handle)
    }

    /// Advance the active run by one unit of work.
    ///
    /// One cell for greedy and depth-first order, one whole wave for
    /// layered order. Without an active run this does nothing and
    /// reports the current status.
    pub fn step(&mut self) -> StepResult {
        let mut run = match std::mem::replace(&mut self.state, RunState::Idle) {
            RunState::Running(run) => run,
            other => {
                self.state = other;
                return StepResult {
                    filled: Vec::new(),
                    status: self.status(),
                };
            }
        };

        let started = Instant::now();
        let mut filled = Vec::new();
        let done = match run.config.order {
            ExpansionOrder::GreedyNearest => self.step_nearest(&mut run, &mut filled),
            ExpansionOrder::LayeredWave => self.step_wave(&mut run, &mut filled),
            ExpansionOrder::DepthFirstPath => self.step_depth_first(&mut run, &mut filled),
        };
        let elapsed_us = started.elapsed().as_micros() as u64;
        self.metrics.steps += 1;
        self.metrics.last_step_us = elapsed_us;
        self.metrics.total_step_us += elapsed_us;

        self.state = match done {
            Some(reason) => self.finish(run, reason),
            None => RunState::Running(run),
        };
        StepResult {
            filled,
            status: self.status(),
        }
    }

    /// Step until the active run ends.
    ///
    /// Returns the summary of the run that ended, or of the last run if
    /// none was active; `None` if no run has happened since the last clear.
    pub fn run_to_completion(&mut self) -> Option<RunSummary> {
        while self.is_running() {
            self.step();
        }
        self.summary()
    }

    /// Stop the active run. Its partial field persists.
    ///
    /// A no-op unless a run is in progress.
    pub fn cancel(&mut self) {
        if !self.is_running() {
            return;
        }
        if let RunState::Running(run) = std::mem::replace(&mut self.state, RunState::Idle) {
            let summary = run.summary(RunOutcome::Cancelled);
            debug!(
                "run {} cancelled after {} cells",
                summary.handle.id, summary.cells_filled
            );
            self.publish(RunEvent::Cancelled {
                run: summary.handle.id,
                cells_filled: summary.cells_filled,
            });
            self.state = RunState::Cancelled(summary);
        }
    }

    /// Cancel any active run and reset every cell to unvisited, zero
    /// strength. Safe at any time; clearing twice is the same as once.
    pub fn clear(&mut self) {
        self.cancel();
        self.reset_cells();
        self.state = RunState::Idle;
        debug!("strength field cleared");
        self.publish(RunEvent::Cleared);
    }

    // ── Queries ────────────────────────────────────────────────

    /// Current coarse state.
    pub fn status(&self) -> RunStatus {
        match self.state {
            RunState::Idle => RunStatus::Idle,
            RunState::Running(_) => RunStatus::Running,
            RunState::Cancelled(_) => RunStatus::Cancelled,
            RunState::Complete(_) => RunStatus::Complete,
        }
    }

    /// Whether the last run finished on its own.
    pub fn is_complete(&self) -> bool {
        matches!(self.state, RunState::Complete(_))
    }

    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        matches!(self.state, RunState::Running(_))
    }

    /// Handle of the run in progress.
    pub fn active_run(&self) -> Option<RunHandle> {
        match &self.state {
            RunState::Running(run) => Some(run.handle),
            _ => None,
        }
    }

    /// Summary of the last run that finished or was cancelled.
    pub fn summary(&self) -> Option<RunSummary> {
        match &self.state {
            RunState::Cancelled(s) | RunState::Complete(s) => Some(*s),
            RunState::Idle | RunState::Running(_) => None,
        }
    }

    /// Number of frontier entries awaiting processing.
    pub fn frontier_len(&self) -> usize {
        match &self.state {
            RunState::Running(run) => run.frontier.len(),
            _ => 0,
        }
    }

    /// The grid.
    pub fn space(&self) -> &GridSpace {
        &self.space
    }

    /// The obstacle snapshot.
    pub fn obstacles(&self) -> &ObstacleMask {
        &self.obstacles
    }

    /// The strength field.
    pub fn field(&self) -> &StrengthField {
        &self.field
    }

    /// Strength at `(x, y)`; `0.0` if unvisited or out of bounds.
    pub fn strength(&self, x: i32, y: i32) -> f64 {
        self.field.strength(x, y)
    }

    /// Whether `(x, y)` was processed by the current or last run.
    pub fn is_visited(&self, x: i32, y: i32) -> bool {
        self.field.is_visited(x, y)
    }

    /// Whether `coord` has entered the frontier of the current or last run.
    pub fn is_discovered(&self, coord: CellCoord) -> bool {
        self.discovered.get(coord).copied().unwrap_or(false)
    }

    /// Distance from the origin recorded when `coord` was processed.
    pub fn distance_at(&self, coord: CellCoord) -> Option<f64> {
        self.distance.get(coord).copied().flatten()
    }

    /// Direction of increasing strength at `(x, y)`.
    ///
    /// Zero for out-of-bounds cells, obstacles, and flat regions.
    pub fn flow_direction(&self, x: i32, y: i32) -> FlowVector {
        let coord = CellCoord::new(x, y);
        match self.space.index_of(coord) {
            Some(idx) if !self.obstacles.is_blocked(idx) => flow_direction(&self.field, coord),
            _ => FlowVector::ZERO,
        }
    }

    /// Counters for the current or last run.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    // ── Events ─────────────────────────────────────────────────

    /// Subscribe to run events from now on.
    ///
    /// The channel is unbounded; dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<RunEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self, event: RunEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    // ── Expansion ──────────────────────────────────────────────

    fn step_nearest(
        &mut self,
        run: &mut ActiveRun,
        out: &mut Vec<CellFilled>,
    ) -> Option<CompletionReason> {
        let Some(entry) = run.frontier.pop() else {
            return Some(CompletionReason::FrontierExhausted);
        };
        out.push(self.fill(run, &entry));
        if run.budget_spent() {
            return Some(CompletionReason::BudgetReached);
        }
        self.expand_from_origin(run, entry.coord);
        self.note_frontier(run);
        run.frontier
            .is_empty()
            .then_some(CompletionReason::FrontierExhausted)
    }

    fn step_wave(
        &mut self,
        run: &mut ActiveRun,
        out: &mut Vec<CellFilled>,
    ) -> Option<CompletionReason> {
        let wave = run.frontier.take_wave();
        if wave.is_empty() {
            return Some(CompletionReason::FrontierExhausted);
        }
        run.waves += 1;
        self.metrics.waves = run.waves;
        debug!(
            "run {} wave {}: {} cells",
            run.handle.id,
            run.waves,
            wave.len()
        );
        for entry in &wave {
            out.push(self.fill(run, entry));
            if run.budget_spent() {
                return Some(CompletionReason::BudgetReached);
            }
            self.expand_from_origin(run, entry.coord);
        }
        self.note_frontier(run);
        run.frontier
            .is_empty()
            .then_some(CompletionReason::FrontierExhausted)
    }

    fn step_depth_first(
        &mut self,
        run: &mut ActiveRun,
        out: &mut Vec<CellFilled>,
    ) -> Option<CompletionReason> {
        let entry = loop {
            let Some(entry) = run.frontier.pop() else {
                return Some(CompletionReason::FrontierExhausted);
            };
            if self.field.is_filled(entry.index) {
                continue;
            }
            if let Some((parent, dir)) = entry.via {
                if !run.config.corner_cutting_allowed
                    && !self.flanks_reached(parent, dir, |i| self.field.is_filled(i))
                {
                    self.metrics.diagonals_gated += 1;
                    continue;
                }
            }
            break entry;
        };
        out.push(self.fill(run, &entry));
        if run.budget_spent() {
            return Some(CompletionReason::BudgetReached);
        }
        self.expand_along_path(run, &entry);
        self.note_frontier(run);
        run.frontier
            .is_empty()
            .then_some(CompletionReason::FrontierExhausted)
    }

    /// Queue the neighbours of `from`, measuring distance straight from
    /// the run's origin. Cells are marked discovered as they are queued.
    fn expand_from_origin(&mut self, run: &mut ActiveRun, from: CellCoord) {
        let origin = run.handle.origin;
        for (dir, idx) in self.space.neighbours(from) {
            if self.discovered[idx] || self.obstacles.is_blocked(idx) {
                continue;
            }
            if !run.config.corner_cutting_allowed
                && !self.flanks_reached(from, dir, |i| self.discovered[i])
            {
                self.metrics.diagonals_gated += 1;
                continue;
            }
            let coord = self.space.coord_of(idx);
            let distance = run.config.metric.distance(origin, coord);
            if !run.config.admits(distance) {
                self.note_dropped(idx);
                continue;
            }
            self.discovered[idx] = true;
            self.metrics.cells_discovered += 1;
            run.frontier.push(FrontierEntry {
                coord,
                index: idx,
                distance,
                via: None,
            });
        }
    }

    /// Push the neighbours of `entry` in reverse so the stack pops them in
    /// [`Direction::PATH_ORDER`]: N, S, E, W, NE, NW, SE, SW. Distance
    /// accumulates per hop; diagonals are gated later, when popped.
    fn expand_along_path(&mut self, run: &mut ActiveRun, entry: &FrontierEntry) {
        let neighbours = self
            .space
            .neighbours_in(entry.coord, &Direction::PATH_ORDER);
        for &(dir, idx) in neighbours.iter().rev() {
            if self.field.is_filled(idx) || self.obstacles.is_blocked(idx) {
                continue;
            }
            let distance = entry.distance + run.config.metric.step_length(dir);
            if !run.config.admits(distance) {
                self.note_dropped(idx);
                continue;
            }
            if !self.discovered[idx] {
                self.discovered[idx] = true;
                self.metrics.cells_discovered += 1;
            }
            run.frontier.push(FrontierEntry {
                coord: self.space.coord_of(idx),
                index: idx,
                distance,
                via: dir.is_diagonal().then_some((entry.coord, dir)),
            });
        }
    }

    /// For a diagonal step from `from`, whether both flanking orthogonal
    /// cells satisfy `reached`. Orthogonal steps always pass.
    fn flanks_reached(
        &self,
        from: CellCoord,
        dir: Direction,
        reached: impl Fn(CellIndex) -> bool,
    ) -> bool {
        let Some((a, b)) = dir.flanks() else {
            return true;
        };
        [a, b].into_iter().all(|flank| {
            let (dx, dy) = flank.offset();
            self.space
                .index_of(from.offset(dx, dy))
                .is_some_and(|i| reached(i))
        })
    }

    fn fill(&mut self, run: &mut ActiveRun, entry: &FrontierEntry) -> CellFilled {
        let strength = run.config.strength_at(entry.distance);
        self.field.set(entry.index, strength);
        self.distance[entry.index] = Some(entry.distance);
        run.filled += 1;
        self.metrics.cells_filled = run.filled;
        let event = CellFilled {
            run: run.handle.id,
            coord: entry.coord,
            strength,
            distance: entry.distance,
        };
        self.publish(RunEvent::CellFilled(event));
        event
    }

    fn note_dropped(&mut self, idx: CellIndex) {
        if !self.below_threshold[idx] {
            self.below_threshold[idx] = true;
            self.metrics.dropped_below_threshold += 1;
        }
    }

    fn note_frontier(&mut self, run: &ActiveRun) {
        self.metrics.frontier_peak = self.metrics.frontier_peak.max(run.frontier.len());
    }

    fn finish(&mut self, run: ActiveRun, reason: CompletionReason) -> RunState {
        let summary = run.summary(RunOutcome::Completed(reason));
        info!(
            "run {} finished: {} cells, {:?}",
            summary.handle.id, summary.cells_filled, reason
        );
        self.publish(RunEvent::Finished {
            run: summary.handle.id,
            cells_filled: summary.cells_filled,
            reason,
        });
        RunState::Complete(summary)
    }

    fn reset_cells(&mut self) {
        self.field.clear();
        self.discovered.fill(false);
        self.below_threshold.fill(false);
        self.distance.fill(None);
    }
}

fn reject(coord: CellCoord, reason: InvalidStartReason) -> StartError {
    warn!("rejected start at {coord}: cell is {reason}");
    StartError::InvalidStart { coord, reason }
}
