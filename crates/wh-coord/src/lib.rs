//! `wh-coord` — who gets which order.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`binding`]     | `Binding`, `OrderView`, `RobotView`: allocator inputs/outputs |
//! | [`coordinator`] | `Coordinator` tagged variant and `allocate`               |
//! | [`greedy`]      | nearest-pending-order per robot                           |
//! | [`centralized`] | global least-cost pair matching                           |
//! | [`cnp`]         | Contract Net announce/bid/award rounds                    |
//! | [`apply`]       | `apply_bindings`: commit bindings to book and fleet      |
//!
//! # Design notes
//!
//! Allocation is split in two, mirroring the intent/apply split of the tick
//! loop:
//!
//! 1. **Decide** (pure): `Coordinator::allocate` sees read-only views of
//!    pending orders and eligible robots and returns bindings.  No state is
//!    touched, so each mechanism can be tested on plain slices.
//!
//! 2. **Commit** (checked): [`apply_bindings`] validates exclusivity and
//!    eligibility, then marks orders assigned and robots bound.  Any broken
//!    guarantee surfaces as an `InvariantViolation` instead of corrupting the
//!    run.

pub mod apply;
pub mod binding;
pub mod centralized;
pub mod cnp;
pub mod coordinator;
pub mod greedy;


pub use apply::apply_bindings;
pub use binding::{Binding, OrderView, RobotView};
pub use coordinator::Coordinator;
