//! The `Coordinator` tagged variant.

use tracing::trace;
use wh_core::{Mechanism, Tick, Tuning};

use crate::{Binding, OrderView, RobotView, centralized, cnp, greedy};

/// Task-allocation strategy, chosen once per run.
///
/// All variants share one contract: given pending orders and eligible
/// robots, return bindings in which no order and no robot appears twice.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Coordinator {
    /// Contract Net: announce/bid/award every `interval` ticks.
    Cnp { interval: u64, bid_threshold: f64 },
    /// Nearest pending order per robot, every tick.
    Greedy,
    /// Global least-cost pairs, every tick.
    Centralized { battery_weight: f64 },
}

impl Coordinator {
    pub fn new(mechanism: Mechanism, tuning: &Tuning) -> Self {
        match mechanism {
            Mechanism::Cnp => Coordinator::Cnp {
                interval:      tuning.cnp_interval,
                bid_threshold: tuning.bid_threshold,
            },
            Mechanism::Greedy => Coordinator::Greedy,
            Mechanism::Centralized => Coordinator::Centralized {
                battery_weight: tuning.battery_weight,
            },
        }
    }

    pub fn mechanism(&self) -> Mechanism {
        match self {
            Coordinator::Cnp { .. } => Mechanism::Cnp,
            Coordinator::Greedy => Mechanism::Greedy,
            Coordinator::Centralized { .. } => Mechanism::Centralized,
        }
    }

    /// Whether this coordinator may assign anything on tick `now`.
    #[inline]
    pub fn allocates_at(&self, now: Tick) -> bool {
        match *self {
            Coordinator::Cnp { interval, .. } => cnp::is_announcement(now, interval),
            Coordinator::Greedy | Coordinator::Centralized { .. } => true,
        }
    }

    /// Decide this tick's bindings.
    ///
    /// `pending` are unassigned orders and `idle` are robots eligible for a
    /// new task.  Inputs may arrive in any order; ties are broken by id.
    pub fn allocate(&self, pending: &[OrderView], idle: &[RobotView], now: Tick) -> Vec<Binding> {
        if pending.is_empty() || idle.is_empty() || !self.allocates_at(now) {
            return Vec::new();
        }
        let mut orders = pending.to_vec();
        orders.sort_by_key(|o| o.id);
        let mut robots = idle.to_vec();
        robots.sort_by_key(|r| r.id);

        let bindings = match *self {
            Coordinator::Cnp { bid_threshold, .. } => cnp::round(&orders, &robots, bid_threshold),
            Coordinator::Greedy => greedy::allocate(&orders, &robots),
            Coordinator::Centralized { battery_weight } => {
                centralized::allocate(&orders, &robots, battery_weight)
            }
        };
        trace!(
            mechanism = %self.mechanism(),
            %now,
            pending = orders.len(),
            idle = robots.len(),
            bound = bindings.len(),
            "allocation"
        );
        bindings
    }
}
