//! Centralized least-cost allocation.
//!
//! Every (order, robot) pair is priced at
//! `distance(robot, pickup) + weight · (100 − battery)`, and pairs are taken
//! cheapest first while both sides are still free.  This is greedy
//! minimum-cost matching, not an optimal assignment.

use wh_robot::FULL_BATTERY;

use crate::{Binding, OrderView, RobotView};

/// Price of sending `robot` to `order`.
#[inline]
pub fn cost(order: &OrderView, robot: &RobotView, battery_weight: f64) -> f64 {
    f64::from(robot.pos.manhattan(order.pickup)) + battery_weight * (FULL_BATTERY - robot.battery)
}

pub fn allocate(orders: &[OrderView], robots: &[RobotView], battery_weight: f64) -> Vec<Binding> {
    let mut pairs: Vec<(f64, usize, usize)> = Vec::with_capacity(orders.len() * robots.len());
    for (oi, order) in orders.iter().enumerate() {
        for (ri, robot) in robots.iter().enumerate() {
            pairs.push((cost(order, robot, battery_weight), oi, ri));
        }
    }
    // Ties: lowest order id, then lowest robot id.
    pairs.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then_with(|| orders[a.1].id.cmp(&orders[b.1].id))
            .then_with(|| robots[a.2].id.cmp(&robots[b.2].id))
    });

    let mut order_taken = vec![false; orders.len()];
    let mut robot_taken = vec![false; robots.len()];
    let limit = orders.len().min(robots.len());
    let mut bindings = Vec::with_capacity(limit);

    for (_, oi, ri) in pairs {
        if order_taken[oi] || robot_taken[ri] {
            continue;
        }
        order_taken[oi] = true;
        robot_taken[ri] = true;
        bindings.push(Binding::new(orders[oi].id, robots[ri].id));
        if bindings.len() == limit {
            break;
        }
    }
    bindings
}
