//! Run configuration, the strength model, and config errors.
//!
//! [`DiffusionConfig`] is plain data with public fields so hosts can keep
//! presets around and tweak them; [`DiffusionConfig::builder()`] is the
//! validated way to assemble one. [`DiffusionEngine::start`] validates
//! again, so a hand-built config can never start a malformed run.
//!
//! [`DiffusionEngine::start`]: crate::engine::DiffusionEngine::start

use std::error::Error;
use std::f64::consts::SQRT_2;
use std::fmt;

use plume_core::CellCoord;
use plume_space::Direction;

// ── Policy enums ───────────────────────────────────────────────────

/// The rule that stops a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TerminationPolicy {
    /// Stop once this many cells have been processed.
    FixedCount(usize),
    /// Never admit a cell whose undecayed-floor strength would fall below
    /// this value; stop when nothing admissible remains.
    StrengthThreshold(f64),
}

impl Default for TerminationPolicy {
    fn default() -> Self {
        Self::FixedCount(50)
    }
}

/// How distance from the source is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DistanceMetric {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// `|dx| + |dy|`.
    Manhattan,
}

impl DistanceMetric {
    /// Distance between two cells.
    pub fn distance(self, a: CellCoord, b: CellCoord) -> f64 {
        let dx = (i64::from(a.x) - i64::from(b.x)).abs();
        let dy = (i64::from(a.y) - i64::from(b.y)).abs();
        match self {
            Self::Euclidean => ((dx * dx + dy * dy) as f64).sqrt(),
            Self::Manhattan => (dx + dy) as f64,
        }
    }

    /// Length of a single hop in `dir`, used by path-accumulated distance.
    pub fn step_length(self, dir: Direction) -> f64 {
        match (self, dir.is_diagonal()) {
            (_, false) => 1.0,
            (Self::Euclidean, true) => SQRT_2,
            (Self::Manhattan, true) => 2.0,
        }
    }
}

/// The order in which the frontier is drained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpansionOrder {
    /// One cell per step, always the nearest to the origin.
    #[default]
    GreedyNearest,
    /// One whole breadth-first wave per step.
    LayeredWave,
    /// Depth-first flood, one cell per step, with distance accumulated
    /// hop by hop along the discovery path. Neighbours are followed in
    /// [`Direction::PATH_ORDER`], so a path dives north first. An
    /// approximation of true distance-from-origin; opt in only for its
    /// visual character.
    DepthFirstPath,
}

/// What to do when a `FixedCount` budget exceeds what can be reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CountLimitMode {
    /// Reject the run with [`ConfigError::CellBudgetExceedsReachable`].
    Strict,
    /// Run anyway and finish early with `FrontierExhausted`.
    #[default]
    Lenient,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`DiffusionConfig`] or a scheduler
/// configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `FixedCount(0)` can never fill anything.
    ZeroCellBudget,
    /// Decay is NaN, infinite, or negative.
    InvalidDecay {
        /// The invalid value.
        value: f64,
    },
    /// A strength parameter is NaN or infinite.
    InvalidStrength {
        /// Which parameter.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// The source itself would fall below the admission threshold.
    ThresholdAboveInitial {
        /// Configured initial strength.
        initial: f64,
        /// Configured minimum strength.
        min: f64,
    },
    /// Strict mode: the budget exceeds the cells reachable from the origin.
    CellBudgetExceedsReachable {
        /// The `FixedCount` budget.
        requested: usize,
        /// Non-obstacle cells connected to the origin.
        reachable: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCellBudget => write!(f, "cell budget must be at least 1"),
            Self::InvalidDecay { value } => {
                write!(f, "decay must be finite and >= 0, got {value}")
            }
            Self::InvalidStrength { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
            Self::ThresholdAboveInitial { initial, min } => {
                write!(f, "min_strength {min} exceeds initial_strength {initial}")
            }
            Self::CellBudgetExceedsReachable {
                requested,
                reachable,
            } => write!(
                f,
                "cell budget {requested} exceeds {reachable} reachable cells"
            ),
        }
    }
}

impl Error for ConfigError {}

// ── DiffusionConfig ────────────────────────────────────────────────

/// Parameters for a single diffusion run.
#[derive(Clone, Debug, PartialEq)]
pub struct DiffusionConfig {
    /// When the run stops. Default: `FixedCount(50)`.
    pub termination: TerminationPolicy,
    /// Distance model. Default: Euclidean.
    pub metric: DistanceMetric,
    /// Frontier discipline. Default: greedy nearest-first.
    pub order: ExpansionOrder,
    /// Strength at the source. Default: 1.0.
    pub initial_strength: f64,
    /// Strength lost per unit of distance. Default: 0.0.
    pub decay_per_unit_distance: f64,
    /// Lowest strength assigned under `FixedCount`. Default: 0.0.
    pub strength_floor: f64,
    /// Allow diagonal steps between two blocked orthogonals. Default: false.
    pub corner_cutting_allowed: bool,
    /// Budget handling under `FixedCount`. Default: lenient.
    pub count_limit: CountLimitMode,
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            termination: TerminationPolicy::default(),
            metric: DistanceMetric::default(),
            order: ExpansionOrder::default(),
            initial_strength: 1.0,
            decay_per_unit_distance: 0.0,
            strength_floor: 0.0,
            corner_cutting_allowed: false,
            count_limit: CountLimitMode::default(),
        }
    }
}

impl DiffusionConfig {
    /// Start a builder from the defaults.
    pub fn builder() -> DiffusionConfigBuilder {
        DiffusionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check the structural invariants that do not depend on the grid.
    ///
    /// The reachability check of [`CountLimitMode::Strict`] needs the grid
    /// and the origin, so it runs in the engine at start time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.termination == TerminationPolicy::FixedCount(0) {
            return Err(ConfigError::ZeroCellBudget);
        }
        let decay = self.decay_per_unit_distance;
        if !decay.is_finite() || decay < 0.0 {
            return Err(ConfigError::InvalidDecay { value: decay });
        }
        for (name, value) in [
            ("initial_strength", self.initial_strength),
            ("strength_floor", self.strength_floor),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidStrength { name, value });
            }
        }
        if let TerminationPolicy::StrengthThreshold(min) = self.termination {
            if !min.is_finite() {
                return Err(ConfigError::InvalidStrength {
                    name: "min_strength",
                    value: min,
                });
            }
            if self.initial_strength < min {
                return Err(ConfigError::ThresholdAboveInitial {
                    initial: self.initial_strength,
                    min,
                });
            }
        }
        Ok(())
    }

    /// The `FixedCount` budget, if any.
    pub fn cell_budget(&self) -> Option<usize> {
        match self.termination {
            TerminationPolicy::FixedCount(n) => Some(n),
            TerminationPolicy::StrengthThreshold(_) => None,
        }
    }

    /// Strength before flooring: `initial - d * decay`.
    pub fn raw_strength(&self, distance: f64) -> f64 {
        self.initial_strength - distance * self.decay_per_unit_distance
    }

    /// The floor applied to assigned strengths.
    pub fn floor(&self) -> f64 {
        match self.termination {
            TerminationPolicy::StrengthThreshold(min) => min,
            TerminationPolicy::FixedCount(_) => self.strength_floor,
        }
    }

    /// Strength assigned to a cell at `distance`.
    pub fn strength_at(&self, distance: f64) -> f64 {
        self.raw_strength(distance).max(self.floor())
    }

    /// Whether a cell at `distance` may enter the frontier at all.
    pub fn admits(&self, distance: f64) -> bool {
        match self.termination {
            TerminationPolicy::StrengthThreshold(min) => self.raw_strength(distance) >= min,
            TerminationPolicy::FixedCount(_) => true,
        }
    }
}

// ── DiffusionConfigBuilder ─────────────────────────────────────────

/// Builder for [`DiffusionConfig`].
///
/// No field is required; every setter overrides one default.
#[derive(Clone, Debug)]
pub struct DiffusionConfigBuilder {
    config: DiffusionConfig,
}

impl DiffusionConfigBuilder {
    /// Stop after `n` processed cells.
    pub fn fixed_count(mut self, n: usize) -> Self {
        self.config.termination = TerminationPolicy::FixedCount(n);
        self
    }

    /// Stop when no admissible cell with strength `>= min` remains.
    pub fn strength_threshold(mut self, min: f64) -> Self {
        self.config.termination = TerminationPolicy::StrengthThreshold(min);
        self
    }

    /// Set the termination policy directly.
    pub fn termination(mut self, termination: TerminationPolicy) -> Self {
        self.config.termination = termination;
        self
    }

    /// Set the distance metric (default: Euclidean).
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.config.metric = metric;
        self
    }

    /// Set the expansion order (default: greedy nearest-first).
    pub fn order(mut self, order: ExpansionOrder) -> Self {
        self.config.order = order;
        self
    }

    /// Set the source strength (default: 1.0).
    pub fn initial_strength(mut self, strength: f64) -> Self {
        self.config.initial_strength = strength;
        self
    }

    /// Set the decay per unit distance (default: 0.0). Must be finite and >= 0.
    pub fn decay_per_unit_distance(mut self, decay: f64) -> Self {
        self.config.decay_per_unit_distance = decay;
        self
    }

    /// Set the strength floor used under `FixedCount` (default: 0.0).
    pub fn strength_floor(mut self, floor: f64) -> Self {
        self.config.strength_floor = floor;
        self
    }

    /// Allow or forbid corner cutting (default: forbidden).
    pub fn corner_cutting_allowed(mut self, allowed: bool) -> Self {
        self.config.corner_cutting_allowed = allowed;
        self
    }

    /// Set the count-limit mode (default: lenient).
    pub fn count_limit(mut self, mode: CountLimitMode) -> Self {
        self.config.count_limit = mode;
        self
    }

    /// Validate and return the config.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] reported by [`DiffusionConfig::validate`].
    pub fn build(self) -> Result<DiffusionConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
