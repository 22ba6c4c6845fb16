//! CSV output backend.
//!
//! Each run gets two files in the output directory:
//! - `model_<scenario>_<mechanism>.csv`
//! - `agent_<scenario>_<mechanism>.csv`
//!
//! and a finished suite gets one `summary_scenarios_mechanisms.csv`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::info;
use wh_core::Mechanism;

use crate::writer::OutputWriter;
use crate::{AgentRow, ModelRow, OutputResult, SummaryRow};

/// File name of the suite summary table.
pub const SUMMARY_FILE: &str = "summary_scenarios_mechanisms.csv";

const MODEL_HEADER: [&str; 9] = [
    "Step",
    "Throughput",
    "Active_Orders",
    "Idle_Robots",
    "Broken_Robots",
    "Avg_Battery",
    "Total_Distance",
    "Total_Conflicts",
    "Total_Hard_Blocks",
];

const AGENT_HEADER: [&str; 6] =
    ["Step", "AgentID", "Battery", "State", "Tasks_Completed", "Distance_Traveled"];

const SUMMARY_HEADER: [&str; 14] = [
    "Scenario",
    "Mechanism",
    "Generated",
    "Completed",
    "Throughput",
    "Efficiency",
    "Distance",
    "Fairness_Var",
    "Idle_Time",
    "Attempted_Conflicts",
    "Hard_Blocks",
    "Total_Conflicts",
    "Avg_Completion_Delay",
    "Avg_Battery_End",
];

/// Writes one run's model and agent time series.
pub struct CsvWriter {
    model:    Writer<File>,
    agents:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two files for `scenario` (a slug
    /// such as `medium_load`) under `mechanism`, and write the headers.
    pub fn for_run(dir: &Path, scenario: &str, mechanism: Mechanism) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let (model_path, agent_path) = run_paths(dir, scenario, mechanism);

        let mut model = Writer::from_path(model_path)?;
        model.write_record(MODEL_HEADER)?;

        let mut agents = Writer::from_path(agent_path)?;
        agents.write_record(AGENT_HEADER)?;

        Ok(Self { model, agents, finished: false })
    }
}

/// `(model, agent)` file paths for one run.
pub fn run_paths(dir: &Path, scenario: &str, mechanism: Mechanism) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("model_{scenario}_{mechanism}.csv")),
        dir.join(format!("agent_{scenario}_{mechanism}.csv")),
    )
}

impl OutputWriter for CsvWriter {
    fn write_model(&mut self, row: &ModelRow) -> OutputResult<()> {
        self.model.write_record(&[
            row.step.to_string(),
            row.throughput.to_string(),
            row.active_orders.to_string(),
            row.idle_robots.to_string(),
            row.broken_robots.to_string(),
            row.avg_battery.to_string(),
            row.total_distance.to_string(),
            row.total_conflicts.to_string(),
            row.total_hard_blocks.to_string(),
        ])?;
        Ok(())
    }

    fn write_agents(&mut self, rows: &[AgentRow]) -> OutputResult<()> {
        for row in rows {
            self.agents.write_record(&[
                row.step.to_string(),
                row.robot_id.to_string(),
                row.battery.to_string(),
                row.state.to_owned(),
                row.tasks_completed.to_string(),
                row.distance_traveled.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.model.flush()?;
        self.agents.flush()?;
        Ok(())
    }
}

/// Write the suite summary table to `dir/summary_scenarios_mechanisms.csv`
/// and return its path.  Rows are written in the order given.
pub fn write_summary(dir: &Path, rows: &[SummaryRow]) -> OutputResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(SUMMARY_FILE);
    let mut w = Writer::from_path(&path)?;
    w.write_record(SUMMARY_HEADER)?;
    for row in rows {
        w.write_record(&[
            row.scenario.clone(),
            row.mechanism.as_str().to_uppercase(),
            row.generated.to_string(),
            row.completed.to_string(),
            format!("{:.4}", row.throughput),
            format!("{:.4}", row.efficiency),
            format!("{:.2}", row.distance as f64),
            format!("{:.2}", row.fairness_variance),
            row.idle_time.to_string(),
            row.attempted_conflicts.to_string(),
            row.hard_blocks.to_string(),
            row.total_conflicts.to_string(),
            format!("{:.2}", row.avg_completion_delay),
            format!("{:.2}", row.avg_battery_end),
        ])?;
    }
    w.flush()?;
    info!(path = %path.display(), rows = rows.len(), "summary written");
    Ok(path)
}
