//! Sequential movement arbitration.

use tracing::{debug, warn};
use wh_core::{InvariantViolation, Tuning};
use wh_grid::Occupancy;
use wh_robot::Fleet;

use crate::MoveIntent;

/// Per-tick outcome of [`MovementArbiter::commit`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ArbitrationReport {
    pub moved:       u32,
    /// Moves refused because the cell was occupied or reserved.
    pub conflicts:   u32,
    /// Robots whose streak crossed the hard-block threshold this tick.
    pub hard_blocks: u32,
    pub sidesteps:   u32,
}

/// Owns the occupancy index and resolves intents into committed moves.
#[derive(Debug, Default)]
pub struct MovementArbiter {
    occupancy: Occupancy,
}

impl MovementArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupancy as of the last [`rebuild`](Self::rebuild) plus any moves
    /// committed since.
    #[inline]
    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    /// Re-index robot positions and clear reservations.
    ///
    /// # Errors
    ///
    /// [`InvariantViolation::SharedCell`] if two robots stand on one cell.
    pub fn rebuild(&mut self, fleet: &Fleet) -> Result<(), InvariantViolation> {
        self.occupancy
            .rebuild(fleet.positions())
            .map_err(|(a, b, p)| InvariantViolation::SharedCell { a, b, x: p.x, y: p.y })
    }

    /// Apply `intents` in ascending robot id order.
    ///
    /// A move commits when its destination is neither occupied nor already
    /// claimed this tick.  Otherwise the robot stays, its conflict count
    /// grows, and a hard block is recorded when its streak first passes
    /// `tuning.hard_block_threshold`.
    pub fn commit(
        &mut self,
        intents: &[MoveIntent],
        fleet:   &mut Fleet,
        tuning:  &Tuning,
    ) -> ArbitrationReport {
        let mut report = ArbitrationReport::default();
        let mut ordered: Vec<&MoveIntent> = intents.iter().collect();
        ordered.sort_by_key(|i| i.robot);

        for intent in ordered {
            let Some(robot) = fleet.get_mut(intent.robot) else { continue };
            if robot.is_broken() || robot.pos != intent.from {
                continue;
            }
            if self.occupancy.try_move(robot.id, intent.from, intent.to) {
                robot.record_move(intent.to, tuning.move_cost);
                report.moved += 1;
                if intent.sidestep {
                    report.sidesteps += 1;
                    debug!(robot = %robot.id, to = %intent.to, "sidestep");
                }
            } else {
                report.conflicts += 1;
                if robot.record_block(tuning.hard_block_threshold) {
                    report.hard_blocks += 1;
                    warn!(robot = %robot.id, pos = %robot.pos, "hard block");
                }
            }
        }
        report
    }
}
