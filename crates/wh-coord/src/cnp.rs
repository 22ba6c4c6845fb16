//! Contract Net Protocol rounds.
//!
//! On an announcement tick every pending order is announced in ascending id
//! order.  Each robot still in the bidder pool bids its Manhattan distance
//! to the pickup.  The lowest bid wins, lowest robot id on ties, and the
//! winner leaves the pool for the rest of the round.  Robots at or below
//! the bid threshold never enter the pool.

use wh_core::Tick;

use crate::{Binding, OrderView, RobotView};

/// `true` on ticks where a round is held.
#[inline]
pub fn is_announcement(now: Tick, interval: u64) -> bool {
    interval > 0 && now.0 % interval == 0
}

/// Run one round.  `orders` and `robots` must be sorted ascending by id.
pub fn round(orders: &[OrderView], robots: &[RobotView], bid_threshold: f64) -> Vec<Binding> {
    let mut pool: Vec<&RobotView> = robots.iter().filter(|r| r.battery > bid_threshold).collect();
    let mut awards = Vec::with_capacity(orders.len().min(pool.len()));

    for order in orders {
        if pool.is_empty() {
            break;
        }
        // `min_by_key` keeps the first minimum; the pool is in id order.
        let Some((slot, winner)) = pool
            .iter()
            .enumerate()
            .min_by_key(|(_, r)| r.pos.manhattan(order.pickup))
            .map(|(slot, r)| (slot, r.id))
        else {
            break;
        };
        pool.remove(slot);
        awards.push(Binding::new(order.id, winner));
    }
    awards
}
