//! `wh-orders` — pickup→delivery requests and their lifecycle.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`order`]     | `Order`, `OrderState`                                     |
//! | [`book`]      | `OrderBook` (`BTreeMap<OrderId, Order>`), `OrderCounts`   |
//! | [`generator`] | `OrderGenerator`: fixed batch or per-tick Bernoulli      |
//!
//! # Lifecycle
//!
//! ```text
//! pending ──assign(robot)──▶ assigned ──complete(robot)──▶ completed
//!    ▲                          │
//!    └──────release(robot)──────┘   (recharge or breakdown pre-empts the task)
//! ```
//!
//! The book owns every order.  Robots only hold an `OrderId`.  An assigned
//! order is never handed to a second robot; the only way back to `pending`
//! is an explicit release by its holder.

pub mod book;
pub mod generator;
pub mod order;

#[cfg(test)]
mod tests;

pub use book::{OrderBook, OrderCounts};
pub use generator::{Cluster, OrderGenerator};
pub use order::{Order, OrderState};
