//! `wh-grid` — static warehouse space and robot occupancy.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`pos`]       | `Pos`, Manhattan distance, greedy single-cell steps       |
//! | [`layout`]    | `GridLayout` (shelves, stations), `GridLayoutBuilder`     |
//! | [`occupancy`] | `Occupancy`: position → robot index with tick reservations |
//! | [`error`]     | `GridError`, `GridResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | Uses FxHash for the occupancy maps.                        |
//! | `serde`   | Derives `Serialize`/`Deserialize` on public types.         |
//!
//! Shelves and stations are position markers only.  They are never
//! obstacles: robots may pass through them, and only robot-robot occupancy
//! is ever checked.

pub mod error;
pub mod layout;
pub mod occupancy;
pub mod pos;


pub use error::{GridError, GridResult};
pub use layout::{GridLayout, GridLayoutBuilder};
pub use occupancy::Occupancy;
pub use pos::Pos;
