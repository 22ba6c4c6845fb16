//! Error taxonomy shared by every `wh-*` crate.
//!
//! Two classes only:
//!
//! - [`ConfigError`]: the caller handed us a scenario we cannot build.
//!   Recoverable; the shell turns it into a validation message.
//! - [`InvariantViolation`]: allocation or arbitration logic broke one of
//!   the engine's guarantees.  Programming-error class: the run halts and
//!   the violation is surfaced, never swallowed.
//!
//! Reaching `max_steps` or running out of pending orders is normal
//! termination and is reported through status fields, not errors.

use thiserror::Error;

use crate::{OrderId, RobotId};

/// Invalid scenario parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid size must be at least 1 (got {0})")]
    EmptyGrid(u32),

    #[error("grid size {got} exceeds the supported maximum of {max}")]
    GridTooLarge { got: u32, max: u32 },

    #[error("at least one robot is required")]
    NoRobots,

    #[error("{robots} robots do not fit on a grid of {cells} cells")]
    TooManyRobots { robots: u32, cells: u64 },

    #[error("order_rate must lie in [0, 1] (got {0})")]
    OrderRate(f64),

    #[error("max_steps must be at least 1")]
    ZeroSteps,

    #[error("invalid tuning: {0}")]
    Tuning(String),

    #[error("unknown {what} {value:?}")]
    Unknown { what: &'static str, value: String },
}

/// Shorthand result type for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A broken engine guarantee.  Carries enough context to locate the bug.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("{order} is not pending (held by {holder:?}) but was bound to {claimant}")]
    DoubleAssignment {
        order:    OrderId,
        holder:   Option<RobotId>,
        claimant: RobotId,
    },

    #[error("{robot} appears in more than one binding this tick")]
    DuplicateBinding { robot: RobotId },

    #[error("{robot} was bound to {order} while not eligible ({state})")]
    IneligibleRobot {
        robot: RobotId,
        order: OrderId,
        state: &'static str,
    },

    #[error("{0} does not exist in the order book")]
    UnknownOrder(OrderId),

    #[error("{robot} tried to release or complete {order}, which it does not hold")]
    OrderNotHeld { order: OrderId, robot: RobotId },

    #[error("{a} and {b} both occupy cell ({x}, {y})")]
    SharedCell { a: RobotId, b: RobotId, x: i32, y: i32 },

    #[error("{robot} battery {battery} is outside [0, 100]")]
    BatteryOutOfRange { robot: RobotId, battery: f64 },

    #[error("order counts do not add up: generated {generated}, tracked {tracked}")]
    OrderConservation { generated: u64, tracked: u64 },
}
