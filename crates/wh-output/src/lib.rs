//! `wh-output` — CSV export for warehouse runs.
//!
//! | File                                   | One row per              |
//! |----------------------------------------|--------------------------|
//! | `model_<scenario>_<mechanism>.csv`     | tick                     |
//! | `agent_<scenario>_<mechanism>.csv`     | tick × robot             |
//! | `summary_scenarios_mechanisms.csv`     | scenario × mechanism run |
//!
//! Per-run files are written by [`CsvWriter`] through
//! [`RunOutputObserver`], which implements `wh_sim::RunObserver`.  The
//! suite summary is written once at the end with [`write_summary`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use wh_output::{CsvWriter, RunOutputObserver};
//!
//! let writer = CsvWriter::for_run(Path::new("./out"), "medium_load", Mechanism::Cnp)?;
//! let mut obs = RunOutputObserver::new(writer);
//! run.run_to_end(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use self::csv::{CsvWriter, SUMMARY_FILE, run_paths, write_summary};
pub use error::{OutputError, OutputResult};
pub use observer::RunOutputObserver;
pub use row::{AgentRow, ModelRow, SummaryRow};
pub use writer::OutputWriter;
