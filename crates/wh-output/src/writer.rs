//! The `OutputWriter` trait implemented by per-run writers.

use crate::{AgentRow, ModelRow, OutputResult};

/// Sink for one run's time series.
///
/// Errors are returned here but swallowed by the observer bridge, which
/// keeps the first one for [`RunOutputObserver::take_error`][crate::RunOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one tick of model-level figures.
    fn write_model(&mut self, row: &ModelRow) -> OutputResult<()>;

    /// Write every robot's row for one tick.
    fn write_agents(&mut self, rows: &[AgentRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
