//! Commit allocator output to the order book and fleet.

use std::collections::HashSet;

use wh_core::{InvariantViolation, RobotId};
use wh_orders::OrderBook;
use wh_robot::Fleet;

use crate::Binding;

/// Mark every bound order assigned and every bound robot moving to pickup.
///
/// Validation covers the whole batch before anything is written, so a bad
/// batch leaves book and fleet untouched.
///
/// # Errors
///
/// - [`InvariantViolation::DuplicateBinding`]: a robot appears twice.
/// - [`InvariantViolation::DoubleAssignment`]: an order appears twice or is
///   no longer pending.
/// - [`InvariantViolation::IneligibleRobot`]: the robot is not idle or is
///   at or below `recharge_threshold`.
/// - [`InvariantViolation::UnknownOrder`]: no such order.
pub fn apply_bindings(
    bindings: &[Binding],
    book: &mut OrderBook,
    fleet: &mut Fleet,
    recharge_threshold: f64,
) -> Result<(), InvariantViolation> {
    let mut robots: HashSet<RobotId> = HashSet::with_capacity(bindings.len());
    let mut orders = HashSet::with_capacity(bindings.len());

    for b in bindings {
        if !robots.insert(b.robot) {
            return Err(InvariantViolation::DuplicateBinding { robot: b.robot });
        }
        let order = book.get(b.order).ok_or(InvariantViolation::UnknownOrder(b.order))?;
        if !orders.insert(b.order) || !order.is_pending() {
            return Err(InvariantViolation::DoubleAssignment {
                order:    b.order,
                holder:   order.holder,
                claimant: b.robot,
            });
        }
        let robot = fleet.get(b.robot).ok_or(InvariantViolation::IneligibleRobot {
            robot: b.robot,
            order: b.order,
            state: "missing",
        })?;
        if !robot.is_eligible(recharge_threshold) {
            return Err(InvariantViolation::IneligibleRobot {
                robot: b.robot,
                order: b.order,
                state: robot.state.as_str(),
            });
        }
    }

    for b in bindings {
        commit(b, book, fleet)?;
    }
    Ok(())
}

/// Bind the robot, then mark the order assigned.  A refused bind leaves
/// both the order and the robot untouched.
pub(crate) fn commit(
    b: &Binding,
    book: &mut OrderBook,
    fleet: &mut Fleet,
) -> Result<(), InvariantViolation> {
    let pickup = book.get(b.order).ok_or(InvariantViolation::UnknownOrder(b.order))?.pickup;
    let robot = fleet.get_mut(b.robot).ok_or(InvariantViolation::IneligibleRobot {
        robot: b.robot,
        order: b.order,
        state: "missing",
    })?;
    if !robot.bind(b.order, pickup) {
        return Err(InvariantViolation::IneligibleRobot {
            robot: b.robot,
            order: b.order,
            state: robot.state.as_str(),
        });
    }
    book.assign(b.order, b.robot)?;
    Ok(())
}
