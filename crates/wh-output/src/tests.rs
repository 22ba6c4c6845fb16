//! Integration tests for wh-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;
    use wh_core::{Mechanism, RobotId};
    use wh_grid::Pos;
    use wh_robot::Robot;

    use crate::csv::{CsvWriter, SUMMARY_FILE, run_paths, write_summary};
    use crate::row::{AgentRow, ModelRow, SummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn model_row(step: u64) -> ModelRow {
        ModelRow {
            step,
            throughput:        step / 2,
            active_orders:     10,
            idle_robots:       1,
            broken_robots:     0,
            avg_battery:       97.5,
            total_distance:    step * 3,
            total_conflicts:   2,
            total_hard_blocks: 0,
        }
    }

    #[test]
    fn run_files_named_after_scenario_and_mechanism() {
        let dir = tmp();
        let _w = CsvWriter::for_run(dir.path(), "heavy_load", Mechanism::Greedy).unwrap();
        assert!(dir.path().join("model_heavy_load_greedy.csv").exists());
        assert!(dir.path().join("agent_heavy_load_greedy.csv").exists());
    }

    #[test]
    fn creates_missing_output_dir() {
        let dir = tmp();
        let nested = dir.path().join("a").join("b");
        let mut w = CsvWriter::for_run(&nested, "light_load", Mechanism::Cnp).unwrap();
        w.finish().unwrap();
        assert!(nested.join("model_light_load_cnp.csv").exists());
    }

    #[test]
    fn headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::for_run(dir.path(), "x", Mechanism::Cnp).unwrap();
        w.finish().unwrap();
        let (model, agent) = run_paths(dir.path(), "x", Mechanism::Cnp);
        assert_eq!(
            headers(&model),
            [
                "Step",
                "Throughput",
                "Active_Orders",
                "Idle_Robots",
                "Broken_Robots",
                "Avg_Battery",
                "Total_Distance",
                "Total_Conflicts",
                "Total_Hard_Blocks",
            ]
        );
        assert_eq!(
            headers(&agent),
            ["Step", "AgentID", "Battery", "State", "Tasks_Completed", "Distance_Traveled"]
        );
    }

    #[test]
    fn model_rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::for_run(dir.path(), "x", Mechanism::Centralized).unwrap();
        for step in 0..3 {
            w.write_model(&model_row(step)).unwrap();
        }
        w.finish().unwrap();

        let (model, _) = run_paths(dir.path(), "x", Mechanism::Centralized);
        let rows: Vec<_> =
            csv::Reader::from_path(model).unwrap().records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[2][0], "2");
        assert_eq!(&rows[2][1], "1");
        assert_eq!(&rows[2][5], "97.5");
        assert_eq!(&rows[2][6], "6");
    }

    #[test]
    fn agent_rows_carry_state_names() {
        let dir = tmp();
        let mut w = CsvWriter::for_run(dir.path(), "x", Mechanism::Cnp).unwrap();
        let mut broken = Robot::new(RobotId(1), Pos::new(3, 3));
        broken.break_down();
        let robots = [Robot::new(RobotId(0), Pos::new(0, 0)), broken];
        let rows: Vec<_> = robots.iter().map(|r| AgentRow::new(7, r)).collect();
        w.write_agents(&rows).unwrap();
        w.finish().unwrap();

        let (_, agent) = run_paths(dir.path(), "x", Mechanism::Cnp);
        let read: Vec<_> =
            csv::Reader::from_path(agent).unwrap().records().map(|r| r.unwrap()).collect();
        assert_eq!(read.len(), 2);
        assert_eq!(&read[0][0], "7");
        assert_eq!(&read[0][1], "0");
        assert_eq!(&read[0][2], "100");
        assert_eq!(&read[0][3], "idle");
        assert_eq!(&read[1][3], "broken");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::for_run(dir.path(), "x", Mechanism::Cnp).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn summary_formats_like_the_report_table() {
        let dir = tmp();
        let row = SummaryRow {
            scenario:             "Medium Load".to_owned(),
            mechanism:            Mechanism::Cnp,
            generated:            30,
            completed:            12,
            throughput:           0.06,
            efficiency:           0.123456,
            distance:             97,
            fairness_variance:    1.5,
            idle_time:            40,
            attempted_conflicts:  3,
            hard_blocks:          1,
            total_conflicts:      4,
            avg_completion_delay: 33.333,
            avg_battery_end:      71.25,
        };
        let path = write_summary(dir.path(), &[row]).unwrap();
        assert_eq!(path, dir.path().join(SUMMARY_FILE));

        assert_eq!(headers(&path)[0], "Scenario");
        assert_eq!(headers(&path).len(), 14);
        let read: Vec<_> =
            csv::Reader::from_path(&path).unwrap().records().map(|r| r.unwrap()).collect();
        assert_eq!(&read[0][0], "Medium Load");
        assert_eq!(&read[0][1], "CNP");
        assert_eq!(&read[0][4], "0.0600");
        assert_eq!(&read[0][5], "0.1235");
        assert_eq!(&read[0][6], "97.00");
        assert_eq!(&read[0][12], "33.33");
        assert_eq!(&read[0][13], "71.25");
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;
    use wh_core::{Mechanism, ScenarioConfig};
    use wh_sim::{Run, ScenarioPreset, run_suite_with};

    use crate::csv::{CsvWriter, run_paths};
    use crate::observer::RunOutputObserver;
    use crate::row::{AgentRow, ModelRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn config(steps: u64) -> ScenarioConfig {
        ScenarioConfig { max_steps: steps, ..ScenarioConfig::default() }
    }

    #[test]
    fn one_model_row_per_tick_and_one_agent_row_per_robot_tick() {
        let dir = tmp();
        let writer = CsvWriter::for_run(dir.path(), "medium_load", Mechanism::Cnp).unwrap();
        let mut obs = RunOutputObserver::new(writer);
        let mut run = Run::from_config(config(10)).unwrap();
        run.run_to_end(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let (model, agent) = run_paths(dir.path(), "medium_load", Mechanism::Cnp);
        let model_rows = csv::Reader::from_path(model).unwrap().records().count();
        let agent_rows = csv::Reader::from_path(agent).unwrap().records().count();
        assert_eq!(model_rows, 10);
        assert_eq!(agent_rows, 10 * 5);
    }

    #[test]
    fn model_rows_match_metrics_history() {
        let dir = tmp();
        let writer = CsvWriter::for_run(dir.path(), "m", Mechanism::Greedy).unwrap();
        let mut obs = RunOutputObserver::new(writer);
        let mut run =
            Run::from_config(config(20).with_mechanism(Mechanism::Greedy)).unwrap();
        run.run_to_end(&mut obs).unwrap();

        let (model, _) = run_paths(dir.path(), "m", Mechanism::Greedy);
        let rows: Vec<_> =
            csv::Reader::from_path(model).unwrap().records().map(|r| r.unwrap()).collect();
        let last = run.metrics_history().last().unwrap();
        assert_eq!(&rows[19][0], "19");
        assert_eq!(rows[19][1].parse::<u64>().unwrap(), last.orders_completed);
        assert_eq!(rows[19][6].parse::<u64>().unwrap(), last.total_distance);
    }

    /// Fails every write after the first `ok` calls.
    struct Flaky {
        ok:    u32,
        calls: u32,
    }

    impl OutputWriter for Flaky {
        fn write_model(&mut self, _row: &ModelRow) -> OutputResult<()> {
            self.calls += 1;
            if self.calls > self.ok {
                return Err(std::io::Error::other(format!("write {} failed", self.calls)).into());
            }
            Ok(())
        }
        fn write_agents(&mut self, _rows: &[AgentRow]) -> OutputResult<()> { Ok(()) }
        fn finish(&mut self) -> OutputResult<()> { Ok(()) }
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = RunOutputObserver::new(Flaky { ok: 2, calls: 0 });
        let mut run = Run::from_config(config(6)).unwrap();
        run.run_to_end(&mut obs).unwrap();

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("write 3 failed"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().unwrap().calls, 6);
    }

    #[test]
    fn open_error_reported_and_nothing_written() {
        let failed: OutputResult<Flaky> =
            Err(OutputError::Io(std::io::Error::other("cannot open")));
        let mut obs = RunOutputObserver::open(failed);
        let mut run = Run::from_config(config(3)).unwrap();
        run.run_to_end(&mut obs).unwrap();
        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.into_writer().is_none());
    }

    #[test]
    fn suite_writes_a_file_pair_per_run() {
        let dir = tmp();
        let mut preset = ScenarioPreset::by_name("Light Load").unwrap();
        preset.config.max_steps = 15;
        let mut report = run_suite_with(&[preset], &Mechanism::ALL, |p, m| {
            RunOutputObserver::open(CsvWriter::for_run(dir.path(), &p.slug(), m))
        })
        .unwrap();

        for run in &mut report.runs {
            assert!(run.observer.take_error().is_none());
        }
        for m in Mechanism::ALL {
            let (model, agent) = run_paths(dir.path(), "light_load", m);
            assert!(model.exists(), "{}", model.display());
            assert!(agent.exists(), "{}", agent.display());
        }
    }
}
