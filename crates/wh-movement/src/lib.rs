//! `wh-movement` — one cell per tick, no two robots per cell.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`intent`]  | `MoveIntent`, `plan_moves`: where each robot wants to go    |
//! | [`arbiter`] | `MovementArbiter`, `ArbitrationReport`: who actually moves  |
//!
//! # Two phases
//!
//! 1. **Plan** (optionally parallel with the `parallel` feature): each
//!    moving robot proposes one adjacent cell.  Proposals read a frozen view
//!    of occupancy and never touch robot state.
//! 2. **Commit** (sequential, ascending `RobotId`): the arbiter walks the
//!    proposals in id order.  A free, unreserved cell is taken and reserved;
//!    anything else is a conflict and the robot stays put.
//!
//! Shelves and stations are not obstacles.  Only robots block robots.

pub mod arbiter;
pub mod intent;

#[cfg(test)]
mod tests;

pub use arbiter::{ArbitrationReport, MovementArbiter};
pub use intent::{MoveIntent, plan_moves};
