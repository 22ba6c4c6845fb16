//! Batch execution: every mechanism on one scenario, or a whole
//! preset × mechanism grid.
//!
//! Runs share no state, so with the `parallel` feature they are spread over
//! Rayon's thread pool.  Results always come back in input order
//! (preset-major, then mechanism) however they were scheduled.

use tracing::{info, warn};
use wh_core::{Mechanism, ScenarioConfig};

use crate::{NoopObserver, Run, RunObserver, RunSummary, ScenarioPreset, SimResult};

/// One finished run of a suite.
#[derive(Debug)]
pub struct SuiteRun<O> {
    pub scenario:  &'static str,
    pub mechanism: Mechanism,
    pub summary:   RunSummary,
    /// The observer that watched this run.
    pub observer:  O,
}

/// A scenario where Contract Net ended less fair than greedy.
#[derive(Clone, Debug, PartialEq)]
pub struct FairnessFlag {
    pub scenario: &'static str,
    pub cnp:      f64,
    pub greedy:   f64,
}

#[derive(Debug)]
pub struct SuiteReport<O> {
    pub runs: Vec<SuiteRun<O>>,
}

impl<O> SuiteReport<O> {
    pub fn get(&self, scenario: &str, mechanism: Mechanism) -> Option<&SuiteRun<O>> {
        self.runs.iter().find(|r| r.scenario == scenario && r.mechanism == mechanism)
    }

    /// Scenarios where CNP's final fairness variance exceeds greedy's.
    ///
    /// CNP is expected to balance load at least as well as greedy; each flag
    /// is a scenario where it did not.  Scenarios missing either mechanism
    /// are skipped.
    pub fn fairness_flags(&self) -> Vec<FairnessFlag> {
        let mut flags = Vec::new();
        for run in self.runs.iter().filter(|r| r.mechanism == Mechanism::Cnp) {
            let Some(greedy) = self.get(run.scenario, Mechanism::Greedy) else { continue };
            if run.summary.fairness_variance > greedy.summary.fairness_variance {
                flags.push(FairnessFlag {
                    scenario: run.scenario,
                    cnp:      run.summary.fairness_variance,
                    greedy:   greedy.summary.fairness_variance,
                });
            }
        }
        flags
    }
}

/// Run `config` to completion once per mechanism.
pub fn run_all_mechanisms(config: &ScenarioConfig) -> SimResult<Vec<(Mechanism, RunSummary)>> {
    let jobs: Vec<Mechanism> = Mechanism::ALL.to_vec();
    let run_one = |&mechanism: &Mechanism| -> SimResult<(Mechanism, RunSummary)> {
        let mut run = Run::from_config(config.clone().with_mechanism(mechanism))?;
        Ok((mechanism, run.run_to_end(&mut NoopObserver)?))
    };

    #[cfg(not(feature = "parallel"))]
    {
        jobs.iter().map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        jobs.par_iter().map(run_one).collect()
    }
}

/// [`run_suite_with`] without observers.
pub fn run_suite(
    presets:    &[ScenarioPreset],
    mechanisms: &[Mechanism],
) -> SimResult<SuiteReport<NoopObserver>> {
    run_suite_with(presets, mechanisms, |_, _| NoopObserver)
}

/// Run every preset under every mechanism.
///
/// `make_observer` is called once per run, e.g. to open that run's output
/// files.
pub fn run_suite_with<F, O>(
    presets:       &[ScenarioPreset],
    mechanisms:    &[Mechanism],
    make_observer: F,
) -> SimResult<SuiteReport<O>>
where
    F: Fn(&ScenarioPreset, Mechanism) -> O + Sync,
    O: RunObserver + Send,
{
    let jobs: Vec<(&ScenarioPreset, Mechanism)> = presets
        .iter()
        .flat_map(|p| mechanisms.iter().map(move |&m| (p, m)))
        .collect();
    info!(runs = jobs.len(), "suite started");

    let run_one = |&(preset, mechanism): &(&ScenarioPreset, Mechanism)| -> SimResult<SuiteRun<O>> {
        let mut observer = make_observer(preset, mechanism);
        let mut run = Run::from_config(preset.config.clone().with_mechanism(mechanism))?;
        let summary = run.run_to_end(&mut observer)?;
        info!(
            scenario = preset.name,
            %mechanism,
            completed = summary.orders_completed,
            throughput = summary.throughput,
            "suite run finished"
        );
        Ok(SuiteRun { scenario: preset.name, mechanism, summary, observer })
    };

    #[cfg(not(feature = "parallel"))]
    let runs: Vec<SuiteRun<O>> = jobs.iter().map(run_one).collect::<SimResult<_>>()?;

    #[cfg(feature = "parallel")]
    let runs: Vec<SuiteRun<O>> = {
        use rayon::prelude::*;
        jobs.par_iter().map(run_one).collect::<SimResult<_>>()?
    };

    let report = SuiteReport { runs };
    for flag in report.fairness_flags() {
        warn!(
            scenario = flag.scenario,
            cnp = flag.cnp,
            greedy = flag.greedy,
            "CNP fairness variance exceeds greedy"
        );
    }
    Ok(report)
}
