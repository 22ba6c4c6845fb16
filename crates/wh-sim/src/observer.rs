//! Run observer trait for progress reporting and data collection.

use wh_core::Tick;
use wh_robot::Robot;

use crate::{MetricsSnapshot, RunSummary};

/// Callbacks invoked by [`Run::step_with`][crate::Run::step_with] and
/// [`Run::run_to_end`][crate::Run::run_to_end].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl RunObserver for Progress {
///     fn on_tick_end(&mut self, tick: Tick, m: &MetricsSnapshot) {
///         if tick.0 % 50 == 0 {
///             println!("{tick}: {}/{} orders", m.orders_completed, m.orders_generated);
///         }
///     }
/// }
/// ```
pub trait RunObserver {
    /// Called before any phase of the tick runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the tick's metrics were recorded.
    fn on_tick_end(&mut self, _tick: Tick, _metrics: &MetricsSnapshot) {}

    /// Per-robot state at the end of the tick, in ascending id order.
    fn on_snapshot(&mut self, _tick: Tick, _robots: &[Robot]) {}

    /// Called once by `run_to_end` after the final tick.
    fn on_run_end(&mut self, _summary: &RunSummary) {}
}

/// A [`RunObserver`] that does nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

impl<O: RunObserver + ?Sized> RunObserver for &mut O {
    fn on_tick_start(&mut self, tick: Tick) {
        (**self).on_tick_start(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, metrics: &MetricsSnapshot) {
        (**self).on_tick_end(tick, metrics);
    }

    fn on_snapshot(&mut self, tick: Tick, robots: &[Robot]) {
        (**self).on_snapshot(tick, robots);
    }

    fn on_run_end(&mut self, summary: &RunSummary) {
        (**self).on_run_end(summary);
    }
}
