//! warehouse: command-line driver for the warehouse coordination simulator.
//!
//! Runs one scenario under one mechanism, or the full preset × mechanism
//! suite, and writes the model, per-robot and summary CSV files.
//!
//! ```text
//! warehouse --scenario "Heavy Load" --mechanism greedy --out output
//! warehouse --config my_scenario.json --snapshot
//! warehouse --suite --out output
//! ```

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wh_core::{Mechanism, ScenarioConfig};
use wh_output::{CsvWriter, RunOutputObserver, SummaryRow, write_summary};
use wh_sim::{NoopObserver, Run, RunSummary, ScenarioPreset, run_suite_with};

#[derive(Parser, Debug)]
#[command(name = "warehouse", version, about = "Compare warehouse robot coordination mechanisms")]
struct Cli {
    /// Preset name or slug (e.g. "Heavy Load" or heavy_load).
    #[arg(long, default_value = "Medium Load")]
    scenario: String,

    /// Allocation mechanism: cnp, greedy or centralized.
    #[arg(long, default_value = "cnp")]
    mechanism: Mechanism,

    /// Load the scenario from a JSON file instead of a preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of ticks.
    #[arg(long)]
    steps: Option<u64>,

    /// Run every preset under every mechanism.
    #[arg(long)]
    suite: bool,

    /// Directory for CSV output.  Single runs write nothing without it.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the final world snapshot as JSON.
    #[arg(long)]
    snapshot: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if cli.suite {
        run_full_suite(&cli)
    } else {
        run_single(&cli)
    }
}

// ── Single run ────────────────────────────────────────────────────────────────

fn scenario_config(cli: &Cli) -> Result<(String, ScenarioConfig)> {
    let (name, mut config) = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading scenario file {}", path.display()))?;
            let config: ScenarioConfig = serde_json::from_str(&text)
                .with_context(|| format!("parsing scenario file {}", path.display()))?;
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("custom");
            (stem.to_owned(), config)
        }
        None => {
            let Some(preset) = ScenarioPreset::by_name(&cli.scenario) else {
                let known: Vec<_> = ScenarioPreset::all().iter().map(|p| p.name).collect();
                bail!("unknown scenario {:?}; known: {}", cli.scenario, known.join(", "));
            };
            (preset.slug(), preset.config)
        }
    };
    config.mechanism = cli.mechanism;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(steps) = cli.steps {
        config.max_steps = steps;
    }
    Ok((name, config))
}

fn run_single(cli: &Cli) -> Result<()> {
    let (name, config) = scenario_config(cli)?;
    let mut run = Run::from_config(config).context("invalid scenario")?;

    let t0 = Instant::now();
    let summary = match &cli.out {
        Some(dir) => {
            let writer = CsvWriter::for_run(dir, &name, cli.mechanism)
                .with_context(|| format!("opening output files in {}", dir.display()))?;
            let mut obs = RunOutputObserver::new(writer);
            let summary = run.run_to_end(&mut obs)?;
            if let Some(e) = obs.take_error() {
                return Err(e).context("writing run output");
            }
            summary
        }
        None => run.run_to_end(&mut NoopObserver)?,
    };
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "run complete");

    print_header();
    print_row(&name, &summary);

    if cli.snapshot {
        let json = serde_json::to_string_pretty(&run.snapshot()).context("serializing snapshot")?;
        println!("{json}");
    }
    Ok(())
}

// ── Suite ─────────────────────────────────────────────────────────────────────

fn run_full_suite(cli: &Cli) -> Result<()> {
    let out = cli.out.clone().unwrap_or_else(|| PathBuf::from("output"));
    let presets: Vec<ScenarioPreset> = ScenarioPreset::all()
        .into_iter()
        .map(|mut p| {
            if let Some(seed) = cli.seed {
                p.config.seed = seed;
            }
            if let Some(steps) = cli.steps {
                p.config.max_steps = steps;
            }
            p
        })
        .collect();

    let t0 = Instant::now();
    let mut report = run_suite_with(&presets, &Mechanism::ALL, |preset, mechanism| {
        RunOutputObserver::open(CsvWriter::for_run(&out, &preset.slug(), mechanism))
    })?;
    info!(
        runs = report.runs.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "suite complete"
    );

    for run in &mut report.runs {
        if let Some(e) = run.observer.take_error() {
            return Err(e).with_context(|| {
                format!("writing output for {} / {}", run.scenario, run.mechanism)
            });
        }
    }

    let rows: Vec<SummaryRow> =
        report.runs.iter().map(|r| SummaryRow::new(r.scenario, &r.summary)).collect();
    let path = write_summary(&out, &rows).context("writing suite summary")?;

    print_header();
    for run in &report.runs {
        print_row(run.scenario, &run.summary);
    }
    println!();
    for flag in report.fairness_flags() {
        warn!(scenario = flag.scenario, "CNP less fair than greedy");
        println!(
            "  {}: CNP fairness variance {:.2} > greedy {:.2}",
            flag.scenario, flag.cnp, flag.greedy
        );
    }
    println!("Summary written to {}", path.display());
    Ok(())
}

// ── Console table ─────────────────────────────────────────────────────────────

fn print_header() {
    println!(
        "{:<18} {:<12} {:>5} {:>5} {:>8} {:>8} {:>7} {:>6} {:>7}",
        "Scenario", "Mechanism", "Gen", "Done", "Thru", "Effic", "Dist", "Confl", "FairVar"
    );
    println!("{}", "-".repeat(86));
}

fn print_row(scenario: &str, s: &RunSummary) {
    println!(
        "{:<18} {:<12} {:>5} {:>5} {:>8.4} {:>8.4} {:>7} {:>6} {:>7.2}",
        scenario,
        s.mechanism.as_str(),
        s.orders_generated,
        s.orders_completed,
        s.throughput,
        s.efficiency,
        s.total_distance,
        s.total_conflicts,
        s.fairness_variance,
    );
}
