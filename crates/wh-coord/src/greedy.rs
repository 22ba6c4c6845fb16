//! Greedy nearest-neighbour allocation.
//!
//! Robots pick in ascending id order.  Each takes the pending order whose
//! pickup is closest (Manhattan), lowest order id on ties.  A claimed order
//! is invisible to later robots in the same tick.

use crate::{Binding, OrderView, RobotView};

/// `orders` and `robots` must be sorted ascending by id.
pub fn allocate(orders: &[OrderView], robots: &[RobotView]) -> Vec<Binding> {
    let mut claimed = vec![false; orders.len()];
    let mut bindings = Vec::with_capacity(orders.len().min(robots.len()));

    for robot in robots {
        // `min_by_key` keeps the first minimum: the lowest order id.
        let nearest = orders
            .iter()
            .enumerate()
            .filter(|(i, _)| !claimed[*i])
            .min_by_key(|(_, o)| robot.pos.manhattan(o.pickup));

        let Some((i, order)) = nearest else { break };
        claimed[i] = true;
        bindings.push(Binding::new(order.id, robot.id));
    }
    bindings
}
