//! `wh-core` — foundational types for the warehouse coordination simulator.
//!
//! This crate is a dependency of every other `wh-*` crate.  It has no `wh-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `RobotId`, `OrderId`                                      |
//! | [`time`]    | `Tick`, `SimClock`                                        |
//! | [`rng`]     | `SimRng` (one per run)                                    |
//! | [`config`]  | `ScenarioConfig`, `OrderMode`, `Mechanism`, `Tuning`      |
//! | [`error`]   | `ConfigError`, `InvariantViolation`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required for loading scenario files and JSON snapshots.    |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Mechanism, OrderMode, ScenarioConfig, Tuning};
pub use error::{ConfigError, ConfigResult, InvariantViolation};
pub use ids::{OrderId, RobotId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
