//! Scenario configuration.
//!
//! A [`ScenarioConfig`] is read once when a run is configured and never
//! mutated mid-run; changing anything requires a full reset.  `Default`
//! reproduces the "Medium Load" preset under CNP with seed 42.

use std::fmt;
use std::str::FromStr;

use crate::{ConfigError, ConfigResult};

/// Largest accepted `grid_size`.  Keeps every coordinate comfortably inside
/// `i32` arithmetic.
pub const MAX_GRID_SIZE: u32 = 4_096;

// ── OrderMode ─────────────────────────────────────────────────────────────────

/// How orders enter the system.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OrderMode {
    /// Exactly `order_count` orders are created when the run is configured.
    #[default]
    FixedOrders,
    /// One Bernoulli(`order_rate`) trial per tick.
    #[cfg_attr(feature = "serde", serde(alias = "probabilistic"))]
    DynamicOrders,
}

impl OrderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderMode::FixedOrders   => "fixed_orders",
            OrderMode::DynamicOrders => "dynamic_orders",
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed_orders" | "fixed"                   => Ok(OrderMode::FixedOrders),
            "dynamic_orders" | "dynamic" | "probabilistic" => Ok(OrderMode::DynamicOrders),
            other => Err(ConfigError::Unknown { what: "order mode", value: other.to_owned() }),
        }
    }
}

// ── Mechanism ─────────────────────────────────────────────────────────────────

/// Task-allocation mechanism selected for a run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mechanism {
    /// Contract Net Protocol: announce, bid, award.
    #[default]
    Cnp,
    /// Nearest pending order per robot, ascending robot id.
    Greedy,
    /// Global least-cost greedy matching.
    Centralized,
}

impl Mechanism {
    /// Every mechanism, in the order reports list them.
    pub const ALL: [Mechanism; 3] = [Mechanism::Cnp, Mechanism::Greedy, Mechanism::Centralized];

    /// Short machine name, used in file names and CSV columns.
    pub fn as_str(self) -> &'static str {
        match self {
            Mechanism::Cnp         => "cnp",
            Mechanism::Greedy      => "greedy",
            Mechanism::Centralized => "centralized",
        }
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mechanism {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cnp"         => Ok(Mechanism::Cnp),
            "greedy"      => Ok(Mechanism::Greedy),
            "centralized" => Ok(Mechanism::Centralized),
            other => Err(ConfigError::Unknown { what: "mechanism", value: other.to_owned() }),
        }
    }
}

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Robot and arbiter constants.  Rarely changed; grouped so scenario files
/// can omit them entirely.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tuning {
    /// Battery at or below this pre-empts any task and forces a recharge.
    /// Also the floor for assignment eligibility (must be strictly above).
    pub recharge_threshold: f64,
    /// CNP bidders must be strictly above this battery level.
    pub bid_threshold: f64,
    /// Battery gained per recharging tick.
    pub charge_rate: f64,
    /// Battery spent per committed cell move.
    pub move_cost: f64,
    /// Consecutive blocked ticks tolerated before a hard block is recorded.
    pub hard_block_threshold: u32,
    /// CNP announces every `cnp_interval` ticks.
    pub cnp_interval: u64,
    /// Weight of `(100 - battery)` in the centralized cost.
    pub battery_weight: f64,
    /// After a hard block, try a free side cell instead of the greedy step.
    pub sidestep: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            recharge_threshold:   20.0,
            bid_threshold:        30.0,
            charge_rate:          5.0,
            move_cost:            0.5,
            hard_block_threshold: 3,
            cnp_interval:         2,
            battery_weight:       0.1,
            sidestep:             true,
        }
    }
}

impl Tuning {
    fn validate(&self) -> ConfigResult<()> {
        let in_battery_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        // A full battery must clear the threshold or no robot is ever eligible.
        if !(self.recharge_threshold.is_finite() && (0.0..100.0).contains(&self.recharge_threshold)) {
            return Err(ConfigError::Tuning(format!(
                "recharge_threshold {} must lie in [0, 100)", self.recharge_threshold
            )));
        }
        if !in_battery_range(self.bid_threshold) {
            return Err(ConfigError::Tuning(format!(
                "bid_threshold {} must lie in [0, 100]", self.bid_threshold
            )));
        }
        if !(self.charge_rate.is_finite() && self.charge_rate > 0.0) {
            return Err(ConfigError::Tuning(format!(
                "charge_rate {} must be positive", self.charge_rate
            )));
        }
        if !(self.move_cost.is_finite() && self.move_cost >= 0.0) {
            return Err(ConfigError::Tuning(format!(
                "move_cost {} must be non-negative", self.move_cost
            )));
        }
        if !(self.battery_weight.is_finite() && self.battery_weight >= 0.0) {
            return Err(ConfigError::Tuning(format!(
                "battery_weight {} must be non-negative", self.battery_weight
            )));
        }
        if self.cnp_interval == 0 {
            return Err(ConfigError::Tuning("cnp_interval must be at least 1".to_owned()));
        }
        Ok(())
    }
}

// ── ScenarioConfig ────────────────────────────────────────────────────────────

/// Immutable per-run parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScenarioConfig {
    pub num_robots: u32,

    /// Side length of the square grid.
    pub grid_size: u32,

    /// The run finishes once this many ticks have been committed.
    pub max_steps: u64,

    pub order_mode: OrderMode,

    /// Orders created up front in [`OrderMode::FixedOrders`].
    pub order_count: u32,

    /// Per-tick order probability in [`OrderMode::DynamicOrders`].
    pub order_rate: f64,

    /// Restrict pickups and deliveries to a window around the cluster center.
    pub clustered_orders: bool,
    pub cluster_center_x: i32,
    pub cluster_center_y: i32,
    pub cluster_radius: u32,

    /// Tick at which one robot breaks permanently.
    pub robot_failure_step: Option<u64>,

    /// Which robot breaks.  `None` draws one from the run RNG.
    pub failure_robot: Option<u32>,

    pub mechanism: Mechanism,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    pub tuning: Tuning,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            num_robots:         5,
            grid_size:          20,
            max_steps:          200,
            order_mode:         OrderMode::FixedOrders,
            order_count:        30,
            order_rate:         0.3,
            clustered_orders:   false,
            cluster_center_x:   10,
            cluster_center_y:   10,
            cluster_radius:     5,
            robot_failure_step: None,
            failure_robot:      None,
            mechanism:          Mechanism::Cnp,
            seed:               42,
            tuning:             Tuning::default(),
        }
    }
}

impl ScenarioConfig {
    /// Reject scenarios that cannot be built.
    ///
    /// Out-of-grid cluster centers and failure robots are *not* errors: the
    /// former are clamped (see [`cluster_center`](Self::cluster_center)), the
    /// latter fall back to a randomly drawn robot.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid(self.grid_size));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge { got: self.grid_size, max: MAX_GRID_SIZE });
        }
        if self.num_robots == 0 {
            return Err(ConfigError::NoRobots);
        }
        if u64::from(self.num_robots) > self.cell_count() {
            return Err(ConfigError::TooManyRobots {
                robots: self.num_robots,
                cells:  self.cell_count(),
            });
        }
        if !(self.order_rate.is_finite() && (0.0..=1.0).contains(&self.order_rate)) {
            return Err(ConfigError::OrderRate(self.order_rate));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        self.tuning.validate()
    }

    /// Total number of cells on the grid.
    #[inline]
    pub fn cell_count(&self) -> u64 {
        u64::from(self.grid_size) * u64::from(self.grid_size)
    }

    /// Cluster center clamped into the grid.
    pub fn cluster_center(&self) -> (i32, i32) {
        let max = self.grid_size.saturating_sub(1) as i32;
        (
            self.cluster_center_x.clamp(0, max),
            self.cluster_center_y.clamp(0, max),
        )
    }

    /// Same scenario under a different mechanism.
    pub fn with_mechanism(mut self, mechanism: Mechanism) -> Self {
        self.mechanism = mechanism;
        self
    }
}
