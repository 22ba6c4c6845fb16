//! `wh-robot` — robots and the fleet that stores them.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`robot`]  | `Robot`, `RobotState`, `Arrival`: the per-robot state machine |
//! | [`fleet`]  | `Fleet` (id-indexed `Vec<Robot>`), `FleetStats`, placement  |
//!
//! # State machine
//!
//! ```text
//!            bind(order)              at pickup               at delivery
//!   idle ──────────────▶ to_pickup ─────────────▶ to_delivery ───────────▶ idle
//!    ▲                       │                         │
//!    │ battery = 100         └──── battery ≤ threshold ┴──▶ recharging
//!    └─────────────────────────────────────────────────────────┘
//!
//!   any state ── fault injection ──▶ broken   (terminal)
//! ```
//!
//! Leaving an active state for `recharging` or `broken` hands the held
//! order id back to the caller, which returns it to the order book.

pub mod fleet;
pub mod robot;

#[cfg(test)]
mod tests;

pub use fleet::{Fleet, FleetStats};
pub use robot::{Arrival, Robot, RobotState, FULL_BATTERY};
