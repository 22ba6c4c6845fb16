//! Read-only point-in-time view for rendering shells.

use wh_core::Mechanism;
use wh_grid::Pos;
use wh_orders::{Order, OrderState};
use wh_robot::Robot;

/// Orders grouped by lifecycle state, each group ascending by id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrdersView {
    pub pending:   Vec<Order>,
    pub assigned:  Vec<Order>,
    pub completed: Vec<Order>,
}

impl OrdersView {
    pub(crate) fn collect<'a>(orders: impl Iterator<Item = &'a Order>) -> Self {
        let mut view = Self::default();
        for order in orders {
            let bucket = match order.state {
                OrderState::Pending   => &mut view.pending,
                OrderState::Assigned  => &mut view.assigned,
                OrderState::Completed => &mut view.completed,
            };
            bucket.push(order.clone());
        }
        view
    }
}

/// Everything a dashboard needs to draw the floor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSnapshot {
    /// Ticks committed so far.
    pub step_count: u64,
    pub max_steps:  u64,
    pub finished:   bool,
    pub halted:     bool,
    pub mechanism:  Mechanism,
    pub grid_size:  u32,
    pub robots:     Vec<Robot>,
    pub orders:     OrdersView,
    pub shelves:    Vec<Pos>,
    pub stations:   Vec<Pos>,
}
