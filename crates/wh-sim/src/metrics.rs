//! Per-tick metrics and the end-of-run summary.
//!
//! Every derived statistic (throughput, efficiency, fairness, averages) is
//! recomputed from the book and fleet on each call.  Nothing is carried
//! forward incrementally, so history entries cannot drift.

use wh_core::{Mechanism, Tick};
use wh_orders::OrderBook;
use wh_robot::Fleet;

/// One committed tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSnapshot {
    /// 0-based index of the tick this snapshot closes.
    pub step: u64,

    pub orders_generated: u64,
    pub orders_completed: u64,
    pub pending_orders:   u64,
    pub assigned_orders:  u64,
    /// `pending + assigned`.
    pub active_orders:    u64,

    pub total_distance: u64,
    pub avg_battery:    f64,

    /// Cumulative blocked move attempts.
    pub attempted_conflicts: u64,
    /// Cumulative hard-block occurrences.
    pub hard_blocks:         u64,
    /// `attempted_conflicts + hard_blocks`.
    pub total_conflicts:     u64,

    pub idle_robots:       u32,
    pub recharging_robots: u32,
    pub broken_robots:     u32,
    pub total_idle_time:   u64,

    /// Completed orders per elapsed tick.
    pub throughput: f64,
    /// Completed orders per cell travelled; 0 before any movement.
    pub efficiency: f64,
    /// Population variance of per-robot completed tasks.
    pub fairness_variance:    f64,
    pub avg_completion_delay: f64,
    pub avg_tasks_per_robot:  f64,
}

impl MetricsSnapshot {
    /// Compute the snapshot for the end of tick `tick`.
    pub fn compute(tick: Tick, book: &OrderBook, fleet: &Fleet) -> Self {
        let orders = book.counts();
        let robots = fleet.stats();
        let elapsed = tick.0 + 1;

        Self {
            step:                 tick.0,
            orders_generated:     book.generated(),
            orders_completed:     orders.completed,
            pending_orders:       orders.pending,
            assigned_orders:      orders.assigned,
            active_orders:        orders.pending + orders.assigned,
            total_distance:       robots.total_distance,
            avg_battery:          robots.avg_battery,
            attempted_conflicts:  robots.attempted_conflicts,
            hard_blocks:          robots.hard_blocks,
            total_conflicts:      robots.attempted_conflicts + robots.hard_blocks,
            idle_robots:          robots.idle,
            recharging_robots:    robots.recharging,
            broken_robots:        robots.broken,
            total_idle_time:      robots.total_idle_steps,
            throughput:           orders.completed as f64 / elapsed as f64,
            efficiency:           ratio(orders.completed, robots.total_distance),
            fairness_variance:    robots.tasks_variance,
            avg_completion_delay: book.mean_completion_delay(),
            avg_tasks_per_robot:  robots.avg_tasks,
        }
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

/// Append-only metrics history of one run.
#[derive(Clone, Debug, Default)]
pub struct MetricsCollector {
    history: Vec<MetricsSnapshot>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute and append the snapshot for `tick`.
    pub fn record(&mut self, tick: Tick, book: &OrderBook, fleet: &Fleet) -> &MetricsSnapshot {
        self.history.push(MetricsSnapshot::compute(tick, book, fleet));
        &self.history[self.history.len() - 1]
    }

    #[inline]
    pub fn history(&self) -> &[MetricsSnapshot] {
        &self.history
    }

    #[inline]
    pub fn last(&self) -> Option<&MetricsSnapshot> {
        self.history.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

/// Whole-run figures, one row of a mechanism comparison.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub mechanism: Mechanism,
    /// Ticks committed.
    pub steps: u64,

    pub orders_generated: u64,
    pub orders_completed: u64,
    pub throughput:       f64,
    pub efficiency:       f64,

    pub total_distance:         u64,
    pub avg_distance_per_robot: f64,
    pub total_idle_time:        u64,
    pub avg_idle_time:          f64,

    pub attempted_conflicts: u64,
    pub hard_blocks:         u64,
    pub total_conflicts:     u64,

    pub fairness_variance:    f64,
    pub avg_tasks_per_robot:  f64,
    pub avg_completion_delay: f64,
    pub avg_battery_end:      f64,
}

impl RunSummary {
    pub fn compute(mechanism: Mechanism, steps: u64, book: &OrderBook, fleet: &Fleet) -> Self {
        let orders = book.counts();
        let robots = fleet.stats();
        let n = fleet.len().max(1) as f64;

        Self {
            mechanism,
            steps,
            orders_generated:       book.generated(),
            orders_completed:       orders.completed,
            throughput:             ratio(orders.completed, steps),
            efficiency:             ratio(orders.completed, robots.total_distance),
            total_distance:         robots.total_distance,
            avg_distance_per_robot: robots.total_distance as f64 / n,
            total_idle_time:        robots.total_idle_steps,
            avg_idle_time:          robots.total_idle_steps as f64 / n,
            attempted_conflicts:    robots.attempted_conflicts,
            hard_blocks:            robots.hard_blocks,
            total_conflicts:        robots.attempted_conflicts + robots.hard_blocks,
            fairness_variance:      robots.tasks_variance,
            avg_tasks_per_robot:    robots.avg_tasks,
            avg_completion_delay:   book.mean_completion_delay(),
            avg_battery_end:        robots.avg_battery,
        }
    }
}
