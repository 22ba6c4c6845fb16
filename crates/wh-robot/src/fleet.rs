//! Fleet storage and placement.
//!
//! Robots are stored in a `Vec` indexed by `RobotId`: robot `i` lives at
//! `robots[i]`.  Iteration is therefore always in ascending id order, which
//! is the deterministic order every phase of a tick relies on.

use tracing::debug;
use wh_core::{InvariantViolation, RobotId, SimRng};
use wh_grid::{GridLayout, Pos};

use crate::{Robot, RobotState};

/// Robot counts per state plus fleet-wide aggregates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FleetStats {
    pub idle:       u32,
    pub moving:     u32,
    pub recharging: u32,
    pub broken:     u32,

    pub total_distance:      u64,
    pub total_tasks:         u64,
    pub total_idle_steps:    u64,
    pub attempted_conflicts: u64,
    pub hard_blocks:         u64,
    pub avg_battery:         f64,
    pub avg_tasks:           f64,
    /// Population variance of per-robot `tasks_completed`.
    pub tasks_variance:      f64,
}

#[derive(Clone, Debug, Default)]
pub struct Fleet {
    robots: Vec<Robot>,
}

impl Fleet {
    /// Place `count` robots on distinct cells.
    ///
    /// Cells that are neither shelf nor station are shuffled with `rng` and
    /// the first `count` are used.  Marker cells, in row-major order, are a
    /// fallback once the open cells run out.  At most `layout.cell_count()`
    /// robots are placed.
    pub fn place(count: u32, layout: &GridLayout, rng: &mut SimRng) -> Self {
        let mut cells = layout.open_cells();
        rng.shuffle(&mut cells);
        let open = cells.len();
        cells.extend(layout.cells().filter(|&c| layout.is_shelf(c) || layout.is_station(c)));

        let robots: Vec<Robot> = cells
            .into_iter()
            .take(count as usize)
            .enumerate()
            .map(|(i, pos)| Robot::new(RobotId(i as u32), pos))
            .collect();

        if robots.len() > open {
            debug!(on_markers = robots.len() - open, "robots placed on marker cells");
        }
        Self { robots }
    }

    /// Wrap pre-built robots.  Ids must equal their index.
    pub fn from_robots(robots: Vec<Robot>) -> Self {
        debug_assert!(robots.iter().enumerate().all(|(i, r)| r.id.index() == i));
        Self { robots }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.robots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    #[inline]
    pub fn get(&self, id: RobotId) -> Option<&Robot> {
        self.robots.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: RobotId) -> Option<&mut Robot> {
        self.robots.get_mut(id.index())
    }

    /// All robots, ascending by id.
    #[inline]
    pub fn as_slice(&self) -> &[Robot] {
        &self.robots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Robot> {
        self.robots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Robot> {
        self.robots.iter_mut()
    }

    /// `(id, position)` pairs for the occupancy index.
    pub fn positions(&self) -> impl Iterator<Item = (RobotId, Pos)> + '_ {
        self.robots.iter().map(|r| (r.id, r.pos))
    }

    /// Robots that may receive an order this tick.
    pub fn eligible(&self, threshold: f64) -> impl Iterator<Item = &Robot> + '_ {
        self.robots.iter().filter(move |r| r.is_eligible(threshold))
    }

    /// Ids of robots that have not broken down, ascending.
    pub fn working(&self) -> Vec<RobotId> {
        self.robots.iter().filter(|r| !r.is_broken()).map(|r| r.id).collect()
    }

    /// Count one idle tick for every robot still idle.
    pub fn tally_idle(&mut self) {
        for robot in self.robots.iter_mut().filter(|r| r.is_idle()) {
            robot.idle_steps += 1;
        }
    }

    /// Every battery lies in `[0, 100]`.
    pub fn check_batteries(&self) -> Result<(), InvariantViolation> {
        match self
            .robots
            .iter()
            .find(|r| !(0.0..=crate::FULL_BATTERY).contains(&r.battery))
        {
            Some(r) => Err(InvariantViolation::BatteryOutOfRange { robot: r.id, battery: r.battery }),
            None => Ok(()),
        }
    }

    /// Aggregate counters, computed fresh from robot state.
    pub fn stats(&self) -> FleetStats {
        let mut s = FleetStats::default();
        let mut battery_sum = 0.0;
        for r in &self.robots {
            match r.state {
                RobotState::Idle => s.idle += 1,
                RobotState::MovingToPickup | RobotState::MovingToDelivery => s.moving += 1,
                RobotState::Recharging => s.recharging += 1,
                RobotState::Broken => s.broken += 1,
            }
            s.total_distance += r.distance_traveled;
            s.total_tasks += u64::from(r.tasks_completed);
            s.total_idle_steps += r.idle_steps;
            s.attempted_conflicts += r.conflict_count;
            s.hard_blocks += r.hard_block_count;
            battery_sum += r.battery;
        }
        if !self.robots.is_empty() {
            let n = self.robots.len() as f64;
            s.avg_battery = battery_sum / n;
            s.avg_tasks = s.total_tasks as f64 / n;
            s.tasks_variance = self
                .robots
                .iter()
                .map(|r| {
                    let d = f64::from(r.tasks_completed) - s.avg_tasks;
                    d * d
                })
                .sum::<f64>()
                / n;
        }
        s
    }
}
