//! Unit tests for wh-robot.

#[cfg(test)]
mod robot_tests {
    use wh_core::{OrderId, RobotId};
    use wh_grid::Pos;

    use crate::{Arrival, Robot, RobotState};

    fn robot_at(x: i32, y: i32) -> Robot {
        Robot::new(RobotId(0), Pos::new(x, y))
    }

    #[test]
    fn new_robot_is_idle_and_full() {
        let r = robot_at(3, 4);
        assert_eq!(r.state, RobotState::Idle);
        assert_eq!(r.battery, 100.0);
        assert!(r.current_order.is_none());
        assert!(r.is_eligible(20.0));
    }

    #[test]
    fn eligibility_requires_battery_strictly_above_threshold() {
        let mut r = robot_at(0, 0);
        r.battery = 20.0;
        assert!(!r.is_eligible(20.0));
        r.battery = 20.5;
        assert!(r.is_eligible(20.0));
    }

    #[test]
    fn bind_only_from_idle() {
        let mut r = robot_at(0, 0);
        assert!(r.bind(OrderId(1), Pos::new(2, 2)));
        assert_eq!(r.state, RobotState::MovingToPickup);
        assert_eq!(r.target, Some(Pos::new(2, 2)));
        assert!(!r.bind(OrderId(2), Pos::new(5, 5)));
        assert_eq!(r.current_order, Some(OrderId(1)));
    }

    #[test]
    fn full_task_cycle() {
        let mut r = robot_at(2, 1);
        r.bind(OrderId(7), Pos::new(2, 2));
        assert_eq!(r.arrive(Pos::new(1, 1)), None);

        r.record_move(Pos::new(2, 2), 0.5);
        assert_eq!(r.arrive(Pos::new(1, 1)), Some(Arrival::PickedUp(OrderId(7))));
        assert_eq!(r.state, RobotState::MovingToDelivery);
        assert_eq!(r.target, Some(Pos::new(1, 1)));

        r.record_move(Pos::new(1, 2), 0.5);
        r.record_move(Pos::new(1, 1), 0.5);
        assert_eq!(r.arrive(Pos::new(1, 1)), Some(Arrival::Delivered(OrderId(7))));
        assert_eq!(r.state, RobotState::Idle);
        assert_eq!(r.tasks_completed, 1);
        assert_eq!(r.distance_traveled, 3);
        assert_eq!(r.battery, 98.5);
        assert!(r.current_order.is_none());
    }

    #[test]
    fn pickup_on_current_cell_happens_without_moving() {
        let mut r = robot_at(2, 2);
        r.bind(OrderId(1), Pos::new(2, 2));
        assert!(!r.wants_to_move());
        assert_eq!(r.arrive(Pos::new(0, 0)), Some(Arrival::PickedUp(OrderId(1))));
        assert!(r.wants_to_move());
    }

    #[test]
    fn recharge_drops_task_and_returns_to_idle_at_full() {
        let mut r = robot_at(0, 0);
        r.bind(OrderId(3), Pos::new(5, 5));
        r.battery = 19.0;
        assert!(r.needs_recharge(20.0));
        assert_eq!(r.start_recharge(), Some(OrderId(3)));
        assert_eq!(r.state, RobotState::Recharging);
        assert!(r.target.is_none());
        assert!(!r.needs_recharge(20.0));

        let mut ticks = 0;
        while !r.charge(5.0) {
            ticks += 1;
            assert_eq!(r.state, RobotState::Recharging);
        }
        // 19 → 24 → … → 99 → 100: 17 charging ticks.
        assert_eq!(ticks + 1, 17);
        assert_eq!(r.battery, 100.0);
        assert_eq!(r.state, RobotState::Idle);
    }

    #[test]
    fn idle_robot_at_threshold_recharges_too() {
        let mut r = robot_at(0, 0);
        r.battery = 20.0;
        assert!(r.needs_recharge(20.0));
        assert_eq!(r.start_recharge(), None);
    }

    #[test]
    fn broken_is_terminal() {
        let mut r = robot_at(0, 0);
        r.bind(OrderId(4), Pos::new(3, 0));
        assert_eq!(r.break_down(), Some(OrderId(4)));
        assert!(r.is_broken());
        assert!(!r.wants_to_move());
        assert!(!r.bind(OrderId(5), Pos::new(1, 0)));
        assert!(!r.charge(5.0));
        r.battery = 0.0;
        assert!(!r.needs_recharge(20.0));
    }

    #[test]
    fn battery_never_negative() {
        let mut r = robot_at(0, 0);
        r.battery = 0.2;
        r.record_move(Pos::new(1, 0), 0.5);
        assert_eq!(r.battery, 0.0);
    }

    #[test]
    fn hard_block_counted_once_per_streak() {
        let mut r = robot_at(0, 0);
        let hits: Vec<bool> = (0..6).map(|_| r.record_block(3)).collect();
        assert_eq!(hits, [false, false, false, true, false, false]);
        assert_eq!(r.conflict_count, 6);
        assert_eq!(r.hard_block_count, 1);
        assert!(r.is_hard_blocked(3));

        r.record_move(Pos::new(1, 0), 0.5);
        assert_eq!(r.blocked_streak, 0);
        for _ in 0..4 {
            r.record_block(3);
        }
        assert_eq!(r.hard_block_count, 2);
    }
}

#[cfg(test)]
mod fleet_tests {
    use std::collections::HashSet;

    use wh_core::{InvariantViolation, RobotId, SimRng};
    use wh_grid::{GridLayout, GridLayoutBuilder, Pos};

    use crate::{Fleet, Robot, RobotState};

    #[test]
    fn placement_uses_distinct_open_cells() {
        let layout = GridLayout::warehouse(20, 20).unwrap();
        let fleet = Fleet::place(15, &layout, &mut SimRng::new(42));
        assert_eq!(fleet.len(), 15);
        let cells: HashSet<Pos> = fleet.iter().map(|r| r.pos).collect();
        assert_eq!(cells.len(), 15);
        assert!(fleet.iter().all(|r| !layout.is_shelf(r.pos) && !layout.is_station(r.pos)));
        assert!(fleet.iter().enumerate().all(|(i, r)| r.id == RobotId(i as u32)));
    }

    #[test]
    fn placement_is_seed_deterministic() {
        let layout = GridLayout::warehouse(20, 20).unwrap();
        let a: Vec<Pos> = Fleet::place(5, &layout, &mut SimRng::new(7)).iter().map(|r| r.pos).collect();
        let b: Vec<Pos> = Fleet::place(5, &layout, &mut SimRng::new(7)).iter().map(|r| r.pos).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn placement_spills_onto_markers_when_crowded() {
        let layout = GridLayoutBuilder::new(2, 2)
            .shelf(Pos::new(0, 0))
            .station(Pos::new(1, 1))
            .build()
            .unwrap();
        let fleet = Fleet::place(4, &layout, &mut SimRng::new(1));
        let cells: HashSet<Pos> = fleet.iter().map(|r| r.pos).collect();
        assert_eq!(cells.len(), 4);
        // The two open cells are used first.
        assert!(fleet.iter().take(2).all(|r| !layout.is_shelf(r.pos) && !layout.is_station(r.pos)));
    }

    #[test]
    fn stats_aggregate_counts_and_variance() {
        let mut robots: Vec<Robot> = (0..4).map(|i| Robot::new(RobotId(i), Pos::new(i as i32, 0))).collect();
        robots[0].tasks_completed = 4;
        robots[1].tasks_completed = 2;
        robots[1].state = RobotState::Recharging;
        robots[2].state = RobotState::Broken;
        robots[3].state = RobotState::MovingToPickup;
        robots[0].distance_traveled = 10;
        robots[3].distance_traveled = 5;
        robots[0].battery = 50.0;

        let stats = Fleet::from_robots(robots).stats();
        assert_eq!((stats.idle, stats.moving, stats.recharging, stats.broken), (1, 1, 1, 1));
        assert_eq!(stats.total_distance, 15);
        assert_eq!(stats.total_tasks, 6);
        assert_eq!(stats.avg_tasks, 1.5);
        // tasks = [4, 2, 0, 0], mean 1.5 → (6.25 + 0.25 + 2.25 + 2.25) / 4
        assert!((stats.tasks_variance - 2.75).abs() < 1e-12);
        assert_eq!(stats.avg_battery, 87.5);
    }

    #[test]
    fn eligible_filters_state_and_battery() {
        let mut robots: Vec<Robot> = (0..3).map(|i| Robot::new(RobotId(i), Pos::new(i as i32, 0))).collect();
        robots[1].battery = 15.0;
        robots[2].state = RobotState::Broken;
        let fleet = Fleet::from_robots(robots);
        let ids: Vec<RobotId> = fleet.eligible(20.0).map(|r| r.id).collect();
        assert_eq!(ids, [RobotId(0)]);
        assert_eq!(fleet.working(), [RobotId(0), RobotId(1)]);
    }

    #[test]
    fn tally_idle_counts_only_idle_robots() {
        let mut robots: Vec<Robot> = (0..2).map(|i| Robot::new(RobotId(i), Pos::new(i as i32, 0))).collect();
        robots[1].state = RobotState::MovingToDelivery;
        let mut fleet = Fleet::from_robots(robots);
        fleet.tally_idle();
        fleet.tally_idle();
        assert_eq!(fleet.stats().total_idle_steps, 2);
        assert_eq!(fleet.get(RobotId(0)).unwrap().idle_steps, 2);
    }

    #[test]
    fn battery_out_of_range_is_a_violation() {
        let mut fleet = Fleet::from_robots(vec![Robot::new(RobotId(0), Pos::new(0, 0))]);
        assert!(fleet.check_batteries().is_ok());
        fleet.get_mut(RobotId(0)).unwrap().battery = 101.0;
        assert_eq!(
            fleet.check_batteries(),
            Err(InvariantViolation::BatteryOutOfRange { robot: RobotId(0), battery: 101.0 })
        );
    }
}
