//! Plain data row types written by output backends.

use wh_core::Mechanism;
use wh_robot::Robot;
use wh_sim::{MetricsSnapshot, RunSummary};

/// Model-level figures for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelRow {
    pub step:              u64,
    /// Orders completed so far (a running count, not a rate).
    pub throughput:        u64,
    pub active_orders:     u64,
    pub idle_robots:       u32,
    pub broken_robots:     u32,
    pub avg_battery:       f64,
    pub total_distance:    u64,
    pub total_conflicts:   u64,
    pub total_hard_blocks: u64,
}

impl From<&MetricsSnapshot> for ModelRow {
    fn from(m: &MetricsSnapshot) -> Self {
        Self {
            step:              m.step,
            throughput:        m.orders_completed,
            active_orders:     m.active_orders,
            idle_robots:       m.idle_robots,
            broken_robots:     m.broken_robots,
            avg_battery:       m.avg_battery,
            total_distance:    m.total_distance,
            total_conflicts:   m.total_conflicts,
            total_hard_blocks: m.hard_blocks,
        }
    }
}

/// One robot at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentRow {
    pub step:              u64,
    pub robot_id:          u32,
    pub battery:           f64,
    pub state:             &'static str,
    pub tasks_completed:   u32,
    pub distance_traveled: u64,
}

impl AgentRow {
    pub fn new(step: u64, robot: &Robot) -> Self {
        Self {
            step,
            robot_id:          robot.id.0,
            battery:           robot.battery,
            state:             robot.state.as_str(),
            tasks_completed:   robot.tasks_completed,
            distance_traveled: robot.distance_traveled,
        }
    }
}

/// One finished run in the suite summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub scenario:             String,
    pub mechanism:            Mechanism,
    pub generated:            u64,
    pub completed:            u64,
    pub throughput:           f64,
    pub efficiency:           f64,
    pub distance:             u64,
    pub fairness_variance:    f64,
    pub idle_time:            u64,
    pub attempted_conflicts:  u64,
    pub hard_blocks:          u64,
    pub total_conflicts:      u64,
    pub avg_completion_delay: f64,
    pub avg_battery_end:      f64,
}

impl SummaryRow {
    pub fn new(scenario: impl Into<String>, s: &RunSummary) -> Self {
        Self {
            scenario:             scenario.into(),
            mechanism:            s.mechanism,
            generated:            s.orders_generated,
            completed:            s.orders_completed,
            throughput:           s.throughput,
            efficiency:           s.efficiency,
            distance:             s.total_distance,
            fairness_variance:    s.fairness_variance,
            idle_time:            s.total_idle_time,
            attempted_conflicts:  s.attempted_conflicts,
            hard_blocks:          s.hard_blocks,
            total_conflicts:      s.total_conflicts,
            avg_completion_delay: s.avg_completion_delay,
            avg_battery_end:      s.avg_battery_end,
        }
    }
}
