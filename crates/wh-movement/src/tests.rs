//! Unit tests for wh-movement.

#[cfg(test)]
mod arbiter_tests {
    use wh_core::{InvariantViolation, OrderId, RobotId, Tuning};
    use wh_grid::{GridLayoutBuilder, GridLayout, Pos};
    use wh_robot::{Fleet, Robot, RobotState};

    use crate::{MovementArbiter, plan_moves};

    fn open_floor(size: u32) -> GridLayout {
        GridLayoutBuilder::new(size, size)
            .shelf(Pos::new(0, 0))
            .station(Pos::new(size as i32 - 1, size as i32 - 1))
            .build()
            .unwrap()
    }

    fn heading(id: u32, from: Pos, to: Pos) -> Robot {
        let mut r = Robot::new(RobotId(id), from);
        r.bind(OrderId(id + 1), to);
        r
    }

    fn tick(
        arbiter: &mut MovementArbiter,
        fleet:   &mut Fleet,
        layout:  &GridLayout,
        tuning:  &Tuning,
    ) -> crate::ArbitrationReport {
        arbiter.rebuild(fleet).unwrap();
        let intents = plan_moves(fleet.as_slice(), layout, arbiter.occupancy(), tuning);
        arbiter.commit(&intents, fleet, tuning)
    }

    #[test]
    fn lower_id_wins_contested_cell() {
        let layout = open_floor(10);
        let tuning = Tuning::default();
        // Both step into (5, 5): robot 0 from the left, robot 1 from the right.
        let mut fleet = Fleet::from_robots(vec![
            heading(0, Pos::new(4, 5), Pos::new(8, 5)),
            heading(1, Pos::new(6, 5), Pos::new(2, 5)),
        ]);
        let mut arbiter = MovementArbiter::new();
        let report = tick(&mut arbiter, &mut fleet, &layout, &tuning);

        assert_eq!(report.moved, 1);
        assert_eq!(report.conflicts, 1);
        let r0 = fleet.get(RobotId(0)).unwrap();
        let r1 = fleet.get(RobotId(1)).unwrap();
        assert_eq!(r0.pos, Pos::new(5, 5));
        assert_eq!(r0.distance_traveled, 1);
        assert_eq!(r0.battery, 99.5);
        assert_eq!(r1.pos, Pos::new(6, 5));
        assert_eq!(r1.conflict_count, 1);
        assert_eq!(r1.distance_traveled, 0);
    }

    #[test]
    fn occupied_cell_blocks_even_if_occupant_would_leave_later() {
        let layout = open_floor(10);
        let tuning = Tuning::default();
        // Robot 0 wants robot 1's cell; robot 1 moves away afterwards.
        let mut fleet = Fleet::from_robots(vec![
            heading(0, Pos::new(2, 2), Pos::new(5, 2)),
            heading(1, Pos::new(3, 2), Pos::new(6, 2)),
        ]);
        let mut arbiter = MovementArbiter::new();
        tick(&mut arbiter, &mut fleet, &layout, &tuning);
        assert_eq!(fleet.get(RobotId(0)).unwrap().pos, Pos::new(2, 2));
        assert_eq!(fleet.get(RobotId(1)).unwrap().pos, Pos::new(4, 2));
        assert_eq!(fleet.get(RobotId(0)).unwrap().conflict_count, 1);
    }

    #[test]
    fn no_shared_cells_after_commit() {
        let layout = open_floor(12);
        let tuning = Tuning::default();
        let center = Pos::new(6, 6);
        let mut fleet = Fleet::from_robots(vec![
            heading(0, Pos::new(6, 2), center),
            heading(1, Pos::new(6, 10), center),
            heading(2, Pos::new(2, 6), center),
            heading(3, Pos::new(10, 6), center),
        ]);
        let mut arbiter = MovementArbiter::new();
        for _ in 0..20 {
            tick(&mut arbiter, &mut fleet, &layout, &tuning);
            let mut cells: Vec<Pos> = fleet.iter().map(|r| r.pos).collect();
            cells.sort();
            cells.dedup();
            assert_eq!(cells.len(), 4);
        }
    }

    #[test]
    fn stationary_and_broken_robots_do_not_move() {
        let layout = open_floor(6);
        let tuning = Tuning::default();
        let mut broken = heading(0, Pos::new(1, 1), Pos::new(4, 1));
        broken.break_down();
        let idle = Robot::new(RobotId(1), Pos::new(3, 3));
        let mut fleet = Fleet::from_robots(vec![broken, idle]);
        let mut arbiter = MovementArbiter::new();
        let report = tick(&mut arbiter, &mut fleet, &layout, &tuning);
        assert_eq!(report, Default::default());
        assert_eq!(fleet.get(RobotId(0)).unwrap().state, RobotState::Broken);
        assert_eq!(fleet.get(RobotId(0)).unwrap().pos, Pos::new(1, 1));
    }

    #[test]
    fn hard_block_recorded_after_threshold() {
        let layout = open_floor(6);
        let tuning = Tuning { sidestep: false, ..Tuning::default() };
        // Robot 1 parks (idle) directly in robot 0's path.
        let mut fleet = Fleet::from_robots(vec![
            heading(0, Pos::new(1, 2), Pos::new(4, 2)),
            Robot::new(RobotId(1), Pos::new(2, 2)),
        ]);
        let mut arbiter = MovementArbiter::new();
        let hard: Vec<u32> = (0..6)
            .map(|_| tick(&mut arbiter, &mut fleet, &layout, &tuning).hard_blocks)
            .collect();
        assert_eq!(hard, [0, 0, 0, 1, 0, 0]);
        let r0 = fleet.get(RobotId(0)).unwrap();
        assert_eq!(r0.conflict_count, 6);
        assert_eq!(r0.hard_block_count, 1);
        assert_eq!(r0.pos, Pos::new(1, 2));
    }

    #[test]
    fn sidestep_escapes_parked_robot() {
        let layout = open_floor(6);
        let tuning = Tuning::default();
        let mut fleet = Fleet::from_robots(vec![
            heading(0, Pos::new(1, 2), Pos::new(4, 2)),
            Robot::new(RobotId(1), Pos::new(2, 2)),
        ]);
        let mut arbiter = MovementArbiter::new();
        // Four blocked ticks reach the hard block; the fifth sidesteps.
        let sidesteps: Vec<u32> = (0..5)
            .map(|_| tick(&mut arbiter, &mut fleet, &layout, &tuning).sidesteps)
            .collect();
        assert_eq!(sidesteps, [0, 0, 0, 0, 1]);
        let r0 = fleet.get(RobotId(0)).unwrap();
        assert_eq!(r0.hard_block_count, 1);
        // Rotation starts at +x (occupied) and settles on −x.
        assert_eq!(r0.pos, Pos::new(0, 2));
        assert_eq!(r0.blocked_streak, 0);
        assert_eq!(r0.distance_traveled, 1);
    }

    #[test]
    fn rebuild_detects_shared_cell() {
        let mut fleet = Fleet::from_robots(vec![
            Robot::new(RobotId(0), Pos::new(1, 1)),
            Robot::new(RobotId(1), Pos::new(1, 1)),
        ]);
        let err = MovementArbiter::new().rebuild(&fleet).unwrap_err();
        assert_eq!(err, InvariantViolation::SharedCell { a: RobotId(0), b: RobotId(1), x: 1, y: 1 });
        fleet.get_mut(RobotId(1)).unwrap().pos = Pos::new(2, 1);
        assert!(MovementArbiter::new().rebuild(&fleet).is_ok());
    }
}

#[cfg(test)]
mod intent_tests {
    use wh_core::{OrderId, RobotId, Tuning};
    use wh_grid::{GridLayoutBuilder, Occupancy, Pos};
    use wh_robot::Robot;

    use crate::plan_moves;

    #[test]
    fn intents_reduce_x_first_and_keep_id_order() {
        let layout = GridLayoutBuilder::new(8, 8)
            .shelf(Pos::new(0, 0))
            .station(Pos::new(7, 7))
            .build()
            .unwrap();
        let mut robots: Vec<Robot> = (0..3).map(|i| Robot::new(RobotId(i), Pos::new(i as i32, 3))).collect();
        robots[0].bind(OrderId(1), Pos::new(5, 6));
        robots[2].bind(OrderId(2), Pos::new(2, 0));

        let intents = plan_moves(&robots, &layout, &Occupancy::new(), &Tuning::default());
        assert_eq!(intents.len(), 2);
        assert_eq!((intents[0].robot, intents[0].to), (RobotId(0), Pos::new(1, 3)));
        assert_eq!((intents[1].robot, intents[1].to), (RobotId(2), Pos::new(2, 2)));
        assert!(intents.iter().all(|i| !i.sidestep));
    }
}
