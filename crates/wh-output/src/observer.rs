//! `RunOutputObserver<W>` — bridges `RunObserver` to an `OutputWriter`.

use wh_core::Tick;
use wh_robot::Robot;
use wh_sim::{MetricsSnapshot, RunObserver, RunSummary};

use crate::row::{AgentRow, ModelRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`RunObserver`] that writes model and per-robot rows to any
/// [`OutputWriter`].
///
/// Errors from the writer are stored internally because `RunObserver`
/// methods have no return value.  After the run returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct RunOutputObserver<W: OutputWriter> {
    writer:     Option<W>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> RunOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Some(writer), last_error: None }
    }

    /// Wrap the result of opening a writer.  On error nothing is written
    /// and the open error is reported by `take_error`.
    ///
    /// Lets a suite observer factory, which cannot fail, open files.
    pub fn open(writer: OutputResult<W>) -> Self {
        match writer {
            Ok(w) => Self::new(w),
            Err(e) => Self { writer: None, last_error: Some(e) },
        }
    }

    /// Take the stored write error (if any) after the run returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.  `None` if it never opened.
    pub fn into_writer(self) -> Option<W> {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> RunObserver for RunOutputObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, metrics: &MetricsSnapshot) {
        let Some(writer) = self.writer.as_mut() else { return };
        let result = writer.write_model(&ModelRow::from(metrics));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, robots: &[Robot]) {
        let Some(writer) = self.writer.as_mut() else { return };
        let rows: Vec<AgentRow> = robots.iter().map(|r| AgentRow::new(tick.0, r)).collect();
        if !rows.is_empty() {
            let result = writer.write_agents(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _summary: &RunSummary) {
        let Some(writer) = self.writer.as_mut() else { return };
        let result = writer.finish();
        self.store_err(result);
    }
}
