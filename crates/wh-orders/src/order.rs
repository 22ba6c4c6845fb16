//! The `Order` value entity.

use wh_core::{OrderId, RobotId, Tick};
use wh_grid::Pos;

/// Lifecycle state of an order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OrderState {
    #[default]
    Pending,
    Assigned,
    Completed,
}

impl OrderState {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderState::Pending   => "pending",
            OrderState::Assigned  => "assigned",
            OrderState::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to carry one item from a shelf to a station.
///
/// `pickup`, `delivery` and `created` are fixed at creation.  Only the
/// [`OrderBook`](crate::OrderBook) mutates the remaining fields.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub id:       OrderId,
    pub pickup:   Pos,
    pub delivery: Pos,
    /// Tick at which the order entered the book.
    pub created:  Tick,
    pub state:    OrderState,
    /// Robot currently carrying out the order (`Some` iff `Assigned`).
    pub holder:   Option<RobotId>,
    /// Tick of delivery (`Some` iff `Completed`).
    pub completed_at: Option<Tick>,
}

impl Order {
    pub(crate) fn new(id: OrderId, pickup: Pos, delivery: Pos, created: Tick) -> Self {
        Self {
            id,
            pickup,
            delivery,
            created,
            state:        OrderState::Pending,
            holder:       None,
            completed_at: None,
        }
    }

    /// `completion_step − creation_step` for completed orders.
    #[inline]
    pub fn delay(&self) -> Option<u64> {
        self.completed_at.map(|done| done.since(self.created))
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.state == OrderState::Pending
    }
}
