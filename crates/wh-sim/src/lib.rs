//! `wh-sim` — the warehouse coordination engine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..max_steps:
//!   1 Faults      at robot_failure_step one robot breaks for good
//!   2 Orders      dynamic mode: one Bernoulli trial, at most one order
//!   3 Battery     robots at/below the threshold drop their task and
//!                 recharge; recharging robots gain charge_rate
//!   4 Allocate    Coordinator binds pending orders to eligible robots
//!   5 Plan        each moving robot proposes one adjacent cell
//!                 (parallel with the `parallel` feature)
//!   6 Arbitrate   proposals committed in ascending RobotId order
//!   7 Arrivals    pickups, deliveries, order completion
//!   8 Invariants  one robot per cell, batteries in range, orders conserved
//!   9 Metrics     one MetricsSnapshot appended to the history
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                       |
//! |------------|--------------------------------------------------------------|
//! | `parallel` | Rayon for phase 5 and for [`run_suite`] across runs.         |
//! | `fx-hash`  | FxHash occupancy index.                                      |
//! | `serde`    | `Serialize`/`Deserialize` on snapshots and summaries.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_core::ScenarioConfig;
//! use wh_sim::{Engine, NoopObserver};
//!
//! let mut engine = Engine::new(ScenarioConfig::default())?;
//! while !engine.is_finished() {
//!     let m = engine.step()?;
//!     println!("step {}: {} completed", m.step, m.orders_completed);
//! }
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod presets;
pub mod run;
pub mod snapshot;
pub mod suite;


pub use builder::RunBuilder;
pub use engine::Engine;
pub use error::{SimError, SimResult};
pub use metrics::{MetricsCollector, MetricsSnapshot, RunSummary};
pub use observer::{NoopObserver, RunObserver};
pub use presets::ScenarioPreset;
pub use run::Run;
pub use snapshot::{OrdersView, WorldSnapshot};
pub use suite::{FairnessFlag, SuiteReport, SuiteRun, run_all_mechanisms, run_suite, run_suite_with};
