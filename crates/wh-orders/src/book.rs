//! The order book: sole owner of every `Order` in a run.
//!
//! Orders live in a `BTreeMap` keyed by id, so iteration is always in
//! ascending creation order.  A separate pending index keeps the hot
//! "what is unassigned?" query independent of how many orders are already
//! completed.

use std::collections::{BTreeMap, BTreeSet};

use wh_core::{InvariantViolation, OrderId, RobotId, Tick};
use wh_grid::Pos;

use crate::{Order, OrderState};

/// Orders per lifecycle state, counted by scanning the book.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderCounts {
    pub pending:   u64,
    pub assigned:  u64,
    pub completed: u64,
}

impl OrderCounts {
    #[inline]
    pub fn total(&self) -> u64 {
        self.pending + self.assigned + self.completed
    }
}

/// All orders of a run plus the pending index.
#[derive(Clone, Debug)]
pub struct OrderBook {
    orders:  BTreeMap<OrderId, Order>,
    pending: BTreeSet<OrderId>,
    next_id: u32,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// An empty book.  Order ids start at 1.
    pub fn new() -> Self {
        Self {
            orders:  BTreeMap::new(),
            pending: BTreeSet::new(),
            next_id: 1,
        }
    }

    /// Create a pending order and return its id.
    pub fn create(&mut self, pickup: Pos, delivery: Pos, now: Tick) -> OrderId {
        let id = OrderId(self.next_id);
        self.next_id += 1;
        self.orders.insert(id, Order::new(id, pickup, delivery, now));
        self.pending.insert(id);
        id
    }

    #[inline]
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// Every order, ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.values()
    }

    /// Pending orders, ascending by id.
    pub fn pending(&self) -> impl Iterator<Item = &Order> + '_ {
        self.pending.iter().filter_map(|id| self.orders.get(id))
    }

    #[inline]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of orders ever created.
    #[inline]
    pub fn generated(&self) -> u64 {
        u64::from(self.next_id - 1)
    }

    /// Bind a pending order to `robot`.
    ///
    /// # Errors
    ///
    /// [`InvariantViolation::DoubleAssignment`] if the order is not pending,
    /// [`InvariantViolation::UnknownOrder`] if it does not exist.  The book
    /// is unchanged on error.
    pub fn assign(&mut self, id: OrderId, robot: RobotId) -> Result<&Order, InvariantViolation> {
        let order = self.orders.get_mut(&id).ok_or(InvariantViolation::UnknownOrder(id))?;
        if order.state != OrderState::Pending {
            return Err(InvariantViolation::DoubleAssignment {
                order:    id,
                holder:   order.holder,
                claimant: robot,
            });
        }
        order.state = OrderState::Assigned;
        order.holder = Some(robot);
        self.pending.remove(&id);
        Ok(order)
    }

    /// Mark an order delivered by its holder.  Returns the completion delay.
    pub fn complete(
        &mut self,
        id: OrderId,
        robot: RobotId,
        now: Tick,
    ) -> Result<u64, InvariantViolation> {
        let order = self.held_mut(id, robot)?;
        order.state = OrderState::Completed;
        order.holder = None;
        order.completed_at = Some(now);
        Ok(now.since(order.created))
    }

    /// Return an interrupted order to the pending pool.
    ///
    /// The order keeps its id and creation tick, so its eventual completion
    /// delay includes the time lost to the interruption.
    pub fn release(&mut self, id: OrderId, robot: RobotId) -> Result<(), InvariantViolation> {
        let order = self.held_mut(id, robot)?;
        order.state = OrderState::Pending;
        order.holder = None;
        self.pending.insert(id);
        Ok(())
    }

    fn held_mut(&mut self, id: OrderId, robot: RobotId) -> Result<&mut Order, InvariantViolation> {
        let order = self.orders.get_mut(&id).ok_or(InvariantViolation::UnknownOrder(id))?;
        if order.state != OrderState::Assigned || order.holder != Some(robot) {
            return Err(InvariantViolation::OrderNotHeld { order: id, robot });
        }
        Ok(order)
    }

    /// Count orders per state.
    pub fn counts(&self) -> OrderCounts {
        let mut counts = OrderCounts::default();
        for order in self.orders.values() {
            match order.state {
                OrderState::Pending   => counts.pending += 1,
                OrderState::Assigned  => counts.assigned += 1,
                OrderState::Completed => counts.completed += 1,
            }
        }
        counts
    }

    /// Mean completion delay over completed orders, 0 when there are none.
    pub fn mean_completion_delay(&self) -> f64 {
        let (sum, n) = self
            .orders
            .values()
            .filter_map(Order::delay)
            .fold((0u64, 0u64), |(sum, n), d| (sum + d, n + 1));
        if n == 0 { 0.0 } else { sum as f64 / n as f64 }
    }

    /// Verify `generated == pending + assigned + completed` and that the
    /// pending index agrees with order states.
    pub fn check_conservation(&self) -> Result<OrderCounts, InvariantViolation> {
        let counts = self.counts();
        if counts.total() != self.generated() || counts.pending != self.pending.len() as u64 {
            return Err(InvariantViolation::OrderConservation {
                generated: self.generated(),
                tracked:   counts.total(),
            });
        }
        Ok(counts)
    }
}
