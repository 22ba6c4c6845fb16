//! Intended-step computation.

use wh_core::{RobotId, Tuning};
use wh_grid::{GridLayout, Occupancy, Pos};
use wh_robot::Robot;

/// A robot's proposed move for this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct MoveIntent {
    pub robot: RobotId,
    pub from:  Pos,
    pub to:    Pos,
    /// `to` is a side cell chosen to escape a hard block rather than the
    /// greedy step toward the target.
    pub sidestep: bool,
}

/// Propose one move for every robot that wants to move.
///
/// The result is in ascending robot id order whichever way it was computed.
/// `occupancy` must reflect positions at the start of the tick.
pub fn plan_moves(
    robots:    &[Robot],
    layout:    &GridLayout,
    occupancy: &Occupancy,
    tuning:    &Tuning,
) -> Vec<MoveIntent> {
    #[cfg(not(feature = "parallel"))]
    {
        robots
            .iter()
            .filter_map(|r| intent_for(r, layout, occupancy, tuning))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        // Rayon keeps input order when collecting into a Vec.
        robots
            .par_iter()
            .filter_map(|r| intent_for(r, layout, occupancy, tuning))
            .collect()
    }
}

fn intent_for(
    robot:     &Robot,
    layout:    &GridLayout,
    occupancy: &Occupancy,
    tuning:    &Tuning,
) -> Option<MoveIntent> {
    if !robot.wants_to_move() {
        return None;
    }
    let target = robot.target?;

    if tuning.sidestep && robot.is_hard_blocked(tuning.hard_block_threshold) {
        if let Some(side) = sidestep(robot, layout, occupancy) {
            return Some(MoveIntent { robot: robot.id, from: robot.pos, to: side, sidestep: true });
        }
    }

    Some(MoveIntent {
        robot:    robot.id,
        from:     robot.pos,
        to:       robot.pos.step_toward(target),
        sidestep: false,
    })
}

/// First free in-bounds neighbour, scanning the four directions from an
/// offset that rotates with robot id and streak length so repeated attempts
/// and neighbouring robots try different sides.
fn sidestep(robot: &Robot, layout: &GridLayout, occupancy: &Occupancy) -> Option<Pos> {
    let dirs = robot.pos.neighbors4();
    let start = (robot.id.index() + robot.blocked_streak as usize) % dirs.len();
    (0..dirs.len())
        .map(|k| dirs[(start + k) % dirs.len()])
        .find(|&p| layout.in_bounds(p) && !occupancy.is_occupied(p))
}
