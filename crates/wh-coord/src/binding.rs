//! Allocator inputs and outputs.

use wh_core::{OrderId, RobotId};
use wh_grid::Pos;
use wh_orders::Order;
use wh_robot::Robot;

/// An exclusive (order, robot) pairing decided for this tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binding {
    pub order: OrderId,
    pub robot: RobotId,
}

impl Binding {
    #[inline]
    pub fn new(order: OrderId, robot: RobotId) -> Self {
        Self { order, robot }
    }
}

/// What an allocator needs to know about a pending order.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct OrderView {
    pub id:     OrderId,
    pub pickup: Pos,
}

impl From<&Order> for OrderView {
    fn from(o: &Order) -> Self {
        Self { id: o.id, pickup: o.pickup }
    }
}

/// What an allocator needs to know about an eligible robot.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RobotView {
    pub id:      RobotId,
    pub pos:     Pos,
    pub battery: f64,
}

impl From<&Robot> for RobotView {
    fn from(r: &Robot) -> Self {
        Self { id: r.id, pos: r.pos, battery: r.battery }
    }
}
