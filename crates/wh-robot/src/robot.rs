//! A single robot and its behavior state machine.
//!
//! Every transition is a method on [`Robot`]; callers never assign `state`
//! directly.  Methods that can drop a task return the dropped `OrderId` so
//! the order book stays the single owner of order state.

use wh_core::{OrderId, RobotId};
use wh_grid::Pos;

/// Battery capacity.  Robots start full and recharge up to this level.
pub const FULL_BATTERY: f64 = 100.0;

/// Behavior state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RobotState {
    #[default]
    Idle,
    MovingToPickup,
    MovingToDelivery,
    Recharging,
    /// Terminal.  Entered only through fault injection.
    Broken,
}

impl RobotState {
    pub fn as_str(self) -> &'static str {
        match self {
            RobotState::Idle             => "idle",
            RobotState::MovingToPickup   => "moving_to_pickup",
            RobotState::MovingToDelivery => "moving_to_delivery",
            RobotState::Recharging       => "recharging",
            RobotState::Broken           => "broken",
        }
    }

    /// Carrying out an order.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, RobotState::MovingToPickup | RobotState::MovingToDelivery)
    }
}

impl std::fmt::Display for RobotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened when a robot reached its target this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Arrival {
    /// Reached the pickup shelf; now heading for the delivery station.
    PickedUp(OrderId),
    /// Reached the delivery station; the order is done and the robot idle.
    Delivered(OrderId),
}

/// One warehouse robot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Robot {
    pub id:      RobotId,
    pub pos:     Pos,
    /// Charge in `[0, 100]`.
    pub battery: f64,
    pub state:   RobotState,
    /// Order being carried out.  A reference only; the book owns the order.
    pub current_order: Option<OrderId>,
    /// Cell the robot is heading for (pickup, then delivery).
    pub target: Option<Pos>,

    pub distance_traveled: u64,
    pub tasks_completed:   u32,
    /// Ticks this robot was blocked by another robot.
    pub conflict_count:    u64,
    pub hard_block_count:  u64,
    /// Consecutive blocked ticks; reset by any committed move.
    pub blocked_streak:    u32,
    /// Ticks spent idle without a task.
    pub idle_steps:        u64,
}

impl Robot {
    /// A fully charged idle robot at `pos`.
    pub fn new(id: RobotId, pos: Pos) -> Self {
        Self {
            id,
            pos,
            battery: FULL_BATTERY,
            state: RobotState::Idle,
            current_order: None,
            target: None,
            distance_traveled: 0,
            tasks_completed: 0,
            conflict_count: 0,
            hard_block_count: 0,
            blocked_streak: 0,
            idle_steps: 0,
        }
    }

    #[inline]
    pub fn is_broken(&self) -> bool {
        self.state == RobotState::Broken
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == RobotState::Idle
    }

    /// May receive a new order: idle and charged strictly above `threshold`.
    #[inline]
    pub fn is_eligible(&self, threshold: f64) -> bool {
        self.is_idle() && self.battery > threshold
    }

    /// Battery has fallen to `threshold` and the robot is not already
    /// charging or out of service.
    #[inline]
    pub fn needs_recharge(&self, threshold: f64) -> bool {
        !matches!(self.state, RobotState::Recharging | RobotState::Broken) && self.battery <= threshold
    }

    /// `idle → moving_to_pickup`.  Returns `false` (and changes nothing) if
    /// the robot is not idle.
    pub fn bind(&mut self, order: OrderId, pickup: Pos) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.state = RobotState::MovingToPickup;
        self.current_order = Some(order);
        self.target = Some(pickup);
        true
    }

    /// Enter `recharging`, abandoning any task.  Returns the abandoned order.
    pub fn start_recharge(&mut self) -> Option<OrderId> {
        self.state = RobotState::Recharging;
        self.target = None;
        self.current_order.take()
    }

    /// Apply one tick of charge.  Returns `true` when the battery is full
    /// and the robot has gone back to idle.
    pub fn charge(&mut self, rate: f64) -> bool {
        if self.state != RobotState::Recharging {
            return false;
        }
        self.battery = (self.battery + rate).min(FULL_BATTERY);
        if self.battery >= FULL_BATTERY {
            self.state = RobotState::Idle;
            return true;
        }
        false
    }

    /// Break permanently.  Returns the abandoned order.
    pub fn break_down(&mut self) -> Option<OrderId> {
        self.state = RobotState::Broken;
        self.target = None;
        self.blocked_streak = 0;
        self.current_order.take()
    }

    /// Whether this robot wants to move this tick.
    #[inline]
    pub fn wants_to_move(&self) -> bool {
        self.state.is_active() && self.target.is_some_and(|t| t != self.pos)
    }

    /// Commit a one-cell move.
    pub fn record_move(&mut self, to: Pos, cost: f64) {
        self.pos = to;
        self.distance_traveled += 1;
        self.battery = (self.battery - cost).max(0.0);
        self.blocked_streak = 0;
    }

    /// Record a blocked move.  Returns `true` exactly when the streak first
    /// exceeds `threshold`, i.e. once per hard-block occurrence.
    pub fn record_block(&mut self, threshold: u32) -> bool {
        self.conflict_count += 1;
        self.blocked_streak += 1;
        if self.blocked_streak == threshold + 1 {
            self.hard_block_count += 1;
            return true;
        }
        false
    }

    /// Streak is past the hard-block threshold.
    #[inline]
    pub fn is_hard_blocked(&self, threshold: u32) -> bool {
        self.blocked_streak > threshold
    }

    /// Advance the task if the robot stands on its target.
    ///
    /// `delivery` is the delivery cell of the current order; it becomes the
    /// new target after pickup.  At most one transition happens per call.
    pub fn arrive(&mut self, delivery: Pos) -> Option<Arrival> {
        if self.target != Some(self.pos) {
            return None;
        }
        let order = self.current_order?;
        match self.state {
            RobotState::MovingToPickup => {
                self.state = RobotState::MovingToDelivery;
                self.target = Some(delivery);
                Some(Arrival::PickedUp(order))
            }
            RobotState::MovingToDelivery => {
                self.state = RobotState::Idle;
                self.target = None;
                self.current_order = None;
                self.tasks_completed += 1;
                Some(Arrival::Delivered(order))
            }
            _ => None,
        }
    }
}
