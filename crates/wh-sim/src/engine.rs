//! Shell-facing engine: one configurable, resettable run.

use tracing::info;
use wh_core::{ConfigResult, ScenarioConfig};

use crate::{MetricsSnapshot, Run, SimResult, WorldSnapshot};

/// The operations a presentation shell drives: `configure`, `step`,
/// `reset`, `snapshot` and `metrics_history`.
///
/// The engine is a single logical stepper.  It holds exactly one [`Run`];
/// a shell serving several sessions keeps one `Engine` per session.
pub struct Engine {
    run: Run,
}

impl Engine {
    /// Build an engine for `config`.
    pub fn new(config: ScenarioConfig) -> ConfigResult<Self> {
        Ok(Self { run: Run::from_config(config)? })
    }

    /// Validate `config` and replace the current run with a fresh one at
    /// tick 0.  On error the current run is left untouched.
    pub fn configure(&mut self, config: ScenarioConfig) -> ConfigResult<()> {
        let run = Run::from_config(config)?;
        info!("engine reconfigured");
        self.run = run;
        Ok(())
    }

    /// Advance one tick.  See [`Run::step`].
    pub fn step(&mut self) -> SimResult<MetricsSnapshot> {
        self.run.step()
    }

    /// Back to tick 0 under the current config and seed.
    pub fn reset(&mut self) {
        self.run.reset();
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.run.snapshot()
    }

    pub fn metrics_history(&self) -> &[MetricsSnapshot] {
        self.run.metrics_history()
    }

    pub fn config(&self) -> &ScenarioConfig {
        self.run.config()
    }

    pub fn is_finished(&self) -> bool {
        self.run.is_finished()
    }

    /// The underlying run, for observers and summaries.
    pub fn run(&self) -> &Run {
        &self.run
    }
}
