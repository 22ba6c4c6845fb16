//! The `Run` struct and its tick loop.

use tracing::{debug, error, info, trace, warn};
use wh_coord::{Coordinator, OrderView, RobotView, apply_bindings};
use wh_core::{
    ConfigError, ConfigResult, InvariantViolation, RobotId, ScenarioConfig, SimClock, SimRng, Tick,
};
use wh_grid::GridLayout;
use wh_movement::{MovementArbiter, plan_moves};
use wh_orders::{OrderBook, OrderGenerator};
use wh_robot::{Arrival, Fleet, RobotState};

use crate::{
    MetricsCollector, MetricsSnapshot, NoopObserver, OrdersView, RunObserver, RunSummary,
    SimError, SimResult, WorldSnapshot,
};

/// What one tick did, for the debug log.
#[derive(Default)]
struct TickReport {
    new_order:   bool,
    recharging:  u32,
    bound:       usize,
    moved:       u32,
    conflicts:   u32,
    hard_blocks: u32,
    delivered:   u32,
}

// ── Run ───────────────────────────────────────────────────────────────────────

/// One isolated simulation run.
///
/// A `Run` owns all of its state (layout, orders, robots, RNG, history) and
/// shares nothing with other runs, so any number of runs may execute on
/// different threads at once.  A single run is strictly sequential: `step`
/// takes `&mut self`.
///
/// Create via [`Run::from_config`] or [`RunBuilder`][crate::RunBuilder].
pub struct Run {
    config:      ScenarioConfig,
    layout:      GridLayout,
    clock:       SimClock,
    rng:         SimRng,
    book:        OrderBook,
    generator:   OrderGenerator,
    fleet:       Fleet,
    coordinator: Coordinator,
    arbiter:     MovementArbiter,
    metrics:     MetricsCollector,

    /// Hand-placed robots to restore on reset.  `None` means RNG placement.
    initial_fleet: Option<Fleet>,

    /// Set when a tick broke an invariant.  Cleared only by reset.
    halted: Option<(Tick, InvariantViolation)>,
}

impl Run {
    /// Validate `config` and build a run on the standard warehouse layout.
    pub fn from_config(config: ScenarioConfig) -> ConfigResult<Self> {
        config.validate()?;
        let size = config.grid_size;
        let layout =
            GridLayout::warehouse(size, size).map_err(|_| ConfigError::EmptyGrid(size))?;
        Ok(Self::assemble(config, layout, None))
    }

    /// Wire up a validated config.  Draws robot placement and the fixed
    /// order batch from a freshly seeded RNG, in that order.
    pub(crate) fn assemble(config: ScenarioConfig, layout: GridLayout, fleet: Option<Fleet>) -> Self {
        let coordinator = Coordinator::new(config.mechanism, &config.tuning);
        let generator = OrderGenerator::new(&config, &layout);
        let mut run = Self {
            clock: SimClock::new(config.max_steps),
            rng: SimRng::new(config.seed),
            book: OrderBook::new(),
            generator,
            fleet: Fleet::default(),
            coordinator,
            arbiter: MovementArbiter::new(),
            metrics: MetricsCollector::new(),
            initial_fleet: fleet,
            halted: None,
            config,
            layout,
        };
        run.populate();
        info!(
            mechanism = %run.config.mechanism,
            robots = run.fleet.len(),
            grid = run.config.grid_size,
            orders = run.book.generated(),
            seed = run.config.seed,
            "run configured"
        );
        run
    }

    fn populate(&mut self) {
        self.fleet = match &self.initial_fleet {
            Some(f) => f.clone(),
            None => Fleet::place(self.config.num_robots, &self.layout, &mut self.rng),
        };
        self.generator.seed(&mut self.book, &mut self.rng);
    }

    /// Return to tick 0 with the same config and seed, clearing history.
    pub fn reset(&mut self) {
        self.clock.rewind();
        self.rng = SimRng::new(self.config.seed);
        self.book = OrderBook::new();
        self.arbiter = MovementArbiter::new();
        self.metrics.clear();
        self.halted = None;
        self.populate();
        info!(seed = self.config.seed, "run reset");
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Advance one tick.
    ///
    /// Once the run is finished this is a no-op returning the last snapshot.
    ///
    /// # Errors
    ///
    /// [`SimError::Invariant`] if the tick broke an engine guarantee.  The
    /// run is then halted and every later call returns [`SimError::Halted`]
    /// until [`reset`](Self::reset).
    pub fn step(&mut self) -> SimResult<MetricsSnapshot> {
        self.step_with(&mut NoopObserver)
    }

    /// [`step`](Self::step) with observer callbacks.
    pub fn step_with<O: RunObserver>(&mut self, observer: &mut O) -> SimResult<MetricsSnapshot> {
        if let Some((tick, _)) = &self.halted {
            return Err(SimError::Halted { tick: *tick });
        }
        let now = self.clock.current_tick;
        if self.clock.is_finished() {
            return Ok(match self.metrics.last() {
                Some(last) => last.clone(),
                None => MetricsSnapshot::compute(now, &self.book, &self.fleet),
            });
        }

        observer.on_tick_start(now);
        if let Err(violation) = self.process_tick(now) {
            error!(%now, %violation, "invariant violated; run halted");
            self.halted = Some((now, violation.clone()));
            return Err(SimError::Invariant { tick: now, violation });
        }
        let snapshot = self.metrics.record(now, &self.book, &self.fleet).clone();
        self.clock.advance();

        observer.on_tick_end(now, &snapshot);
        observer.on_snapshot(now, self.fleet.as_slice());

        if self.clock.is_finished() {
            info!(
                steps = self.clock.step_count(),
                completed = snapshot.orders_completed,
                generated = snapshot.orders_generated,
                "run finished"
            );
        }
        Ok(snapshot)
    }

    /// Step until `max_steps` ticks are committed, then report the summary.
    pub fn run_to_end<O: RunObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        while !self.clock.is_finished() {
            self.step_with(observer)?;
        }
        let summary = self.summary();
        observer.on_run_end(&summary);
        Ok(summary)
    }

    /// Run at most `n` more ticks, stopping early at the end of the run.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: RunObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.clock.is_finished() {
                break;
            }
            self.step_with(observer)?;
        }
        Ok(())
    }

    /// Point-in-time view.  Does not touch engine state.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            step_count: self.clock.step_count(),
            max_steps:  self.config.max_steps,
            finished:   self.clock.is_finished(),
            halted:     self.halted.is_some(),
            mechanism:  self.config.mechanism,
            grid_size:  self.config.grid_size,
            robots:     self.fleet.as_slice().to_vec(),
            orders:     OrdersView::collect(self.book.iter()),
            shelves:    self.layout.shelves.clone(),
            stations:   self.layout.stations.clone(),
        }
    }

    /// Summary of the ticks committed so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary::compute(self.config.mechanism, self.clock.step_count(), &self.book, &self.fleet)
    }

    #[inline]
    pub fn metrics_history(&self) -> &[MetricsSnapshot] {
        self.metrics.history()
    }

    #[inline]
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[inline]
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    #[cfg(test)]
    pub(crate) fn fleet_mut(&mut self) -> &mut Fleet {
        &mut self.fleet
    }

    #[inline]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    #[inline]
    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Ticks committed so far.
    #[inline]
    pub fn step_count(&self) -> u64 {
        self.clock.step_count()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    /// The violation that halted the run, if any.
    pub fn halted(&self) -> Option<&InvariantViolation> {
        self.halted.as_ref().map(|(_, v)| v)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> Result<(), InvariantViolation> {
        let mut report = TickReport::default();

        // ── Phase 1: fault injection ──────────────────────────────────────
        if self.config.robot_failure_step == Some(now.0) {
            self.inject_failure(now)?;
        }

        // ── Phase 2: dynamic order generation ─────────────────────────────
        report.new_order = self.generator.tick(&mut self.book, &mut self.rng, now).is_some();

        // ── Phase 3: battery safety pre-empts tasks ───────────────────────
        let tuning = &self.config.tuning;
        for robot in self.fleet.iter_mut() {
            if robot.needs_recharge(tuning.recharge_threshold) {
                if let Some(order) = robot.start_recharge() {
                    self.book.release(order, robot.id)?;
                    warn!(robot = %robot.id, %order, battery = robot.battery, "recharge pre-empted task");
                } else {
                    debug!(robot = %robot.id, battery = robot.battery, "recharging");
                }
            }
            if robot.charge(tuning.charge_rate) {
                debug!(robot = %robot.id, "recharged");
            }
            if robot.state == RobotState::Recharging {
                report.recharging += 1;
            }
        }

        // ── Phase 4: allocation ───────────────────────────────────────────
        let pending: Vec<OrderView> = self.book.pending().map(OrderView::from).collect();
        let idle: Vec<RobotView> = self
            .fleet
            .eligible(tuning.recharge_threshold)
            .map(RobotView::from)
            .collect();
        let bindings = self.coordinator.allocate(&pending, &idle, now);
        apply_bindings(&bindings, &mut self.book, &mut self.fleet, tuning.recharge_threshold)?;
        report.bound = bindings.len();
        self.fleet.tally_idle();

        // ── Phase 5: intended moves ───────────────────────────────────────
        self.arbiter.rebuild(&self.fleet)?;
        let intents = plan_moves(self.fleet.as_slice(), &self.layout, self.arbiter.occupancy(), tuning);

        // ── Phase 6: arbitration + commit (sequential, ascending id) ──────
        let moves = self.arbiter.commit(&intents, &mut self.fleet, tuning);
        report.moved = moves.moved;
        report.conflicts = moves.conflicts;
        report.hard_blocks = moves.hard_blocks;

        // ── Phase 7: arrivals ─────────────────────────────────────────────
        for robot in self.fleet.iter_mut() {
            let Some(order_id) = robot.current_order else { continue };
            let delivery = self
                .book
                .get(order_id)
                .ok_or(InvariantViolation::UnknownOrder(order_id))?
                .delivery;
            match robot.arrive(delivery) {
                Some(Arrival::PickedUp(order)) => {
                    trace!(robot = %robot.id, %order, "picked up");
                }
                Some(Arrival::Delivered(order)) => {
                    let delay = self.book.complete(order, robot.id, now)?;
                    report.delivered += 1;
                    debug!(robot = %robot.id, %order, delay, "delivered");
                }
                None => {}
            }
        }

        // ── Phase 8: invariants ───────────────────────────────────────────
        self.arbiter.rebuild(&self.fleet)?;
        self.fleet.check_batteries()?;
        self.book.check_conservation()?;

        debug!(
            %now,
            new_order = report.new_order,
            recharging = report.recharging,
            bound = report.bound,
            moved = report.moved,
            conflicts = report.conflicts,
            hard_blocks = report.hard_blocks,
            delivered = report.delivered,
            "tick"
        );
        Ok(())
    }

    /// Break the configured robot, or one drawn from the run RNG when none
    /// is configured or the configured one cannot break.
    fn inject_failure(&mut self, now: Tick) -> Result<(), InvariantViolation> {
        let configured = self
            .config
            .failure_robot
            .map(RobotId)
            .filter(|&id| self.fleet.get(id).is_some_and(|r| !r.is_broken()));

        let target = match configured {
            Some(id) => Some(id),
            None => {
                let working = self.fleet.working();
                self.rng.choose(&working).copied()
            }
        };
        let Some(id) = target else {
            warn!(%now, "fault injection found no working robot");
            return Ok(());
        };
        let Some(robot) = self.fleet.get_mut(id) else { return Ok(()) };

        let dropped = robot.break_down();
        if let Some(order) = dropped {
            self.book.release(order, id)?;
        }
        warn!(robot = %id, %now, pos = %robot.pos, dropped = ?dropped, "robot broke down");
        Ok(())
    }
}
