//! Unit tests for wh-orders.

#[cfg(test)]
mod book_tests {
    use wh_core::{InvariantViolation, OrderId, RobotId, Tick};
    use wh_grid::Pos;

    use crate::{OrderBook, OrderState};

    fn book_with(n: u32) -> OrderBook {
        let mut book = OrderBook::new();
        for i in 0..n {
            book.create(Pos::new(i as i32, 0), Pos::new(0, 9), Tick(0));
        }
        book
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut book = OrderBook::new();
        let a = book.create(Pos::new(1, 1), Pos::new(2, 2), Tick(0));
        let b = book.create(Pos::new(1, 1), Pos::new(2, 2), Tick(3));
        assert_eq!(a, OrderId(1));
        assert_eq!(b, OrderId(2));
        assert_eq!(book.generated(), 2);
        assert_eq!(book.get(b).unwrap().created, Tick(3));
    }

    #[test]
    fn pending_iterates_ascending() {
        let mut book = book_with(4);
        book.assign(OrderId(2), RobotId(0)).unwrap();
        let ids: Vec<_> = book.pending().map(|o| o.id).collect();
        assert_eq!(ids, [OrderId(1), OrderId(3), OrderId(4)]);
    }

    #[test]
    fn assigned_order_cannot_be_reassigned() {
        let mut book = book_with(1);
        book.assign(OrderId(1), RobotId(0)).unwrap();
        let err = book.assign(OrderId(1), RobotId(1)).unwrap_err();
        assert_eq!(
            err,
            InvariantViolation::DoubleAssignment {
                order:    OrderId(1),
                holder:   Some(RobotId(0)),
                claimant: RobotId(1),
            }
        );
        assert_eq!(book.get(OrderId(1)).unwrap().holder, Some(RobotId(0)));
    }

    #[test]
    fn unknown_order_is_reported() {
        let mut book = book_with(1);
        assert_eq!(
            book.assign(OrderId(7), RobotId(0)).unwrap_err(),
            InvariantViolation::UnknownOrder(OrderId(7))
        );
    }

    #[test]
    fn complete_records_delay() {
        let mut book = OrderBook::new();
        let id = book.create(Pos::new(0, 0), Pos::new(1, 1), Tick(4));
        book.assign(id, RobotId(2)).unwrap();
        assert_eq!(book.complete(id, RobotId(2), Tick(19)).unwrap(), 15);
        let order = book.get(id).unwrap();
        assert_eq!(order.state, OrderState::Completed);
        assert_eq!(order.holder, None);
        assert_eq!(order.delay(), Some(15));
        assert_eq!(book.mean_completion_delay(), 15.0);
    }

    #[test]
    fn only_holder_may_complete_or_release() {
        let mut book = book_with(1);
        book.assign(OrderId(1), RobotId(0)).unwrap();
        assert!(matches!(
            book.complete(OrderId(1), RobotId(1), Tick(5)),
            Err(InvariantViolation::OrderNotHeld { .. })
        ));
        assert!(matches!(
            book.release(OrderId(1), RobotId(1)),
            Err(InvariantViolation::OrderNotHeld { .. })
        ));
    }

    #[test]
    fn release_returns_order_to_pool_keeping_creation_tick() {
        let mut book = OrderBook::new();
        let id = book.create(Pos::new(0, 0), Pos::new(1, 1), Tick(2));
        book.assign(id, RobotId(0)).unwrap();
        book.release(id, RobotId(0)).unwrap();
        assert!(book.get(id).unwrap().is_pending());
        assert_eq!(book.pending_len(), 1);

        book.assign(id, RobotId(1)).unwrap();
        assert_eq!(book.complete(id, RobotId(1), Tick(10)).unwrap(), 8);
    }

    #[test]
    fn counts_are_conserved_through_lifecycle() {
        let mut book = book_with(5);
        book.assign(OrderId(1), RobotId(0)).unwrap();
        book.assign(OrderId(2), RobotId(1)).unwrap();
        book.complete(OrderId(1), RobotId(0), Tick(3)).unwrap();
        let counts = book.check_conservation().unwrap();
        assert_eq!((counts.pending, counts.assigned, counts.completed), (3, 1, 1));
        assert_eq!(counts.total(), book.generated());
    }

    #[test]
    fn mean_delay_is_zero_without_completions() {
        assert_eq!(book_with(3).mean_completion_delay(), 0.0);
    }
}

#[cfg(test)]
mod generator_tests {
    use wh_core::{OrderMode, ScenarioConfig, SimRng, Tick};
    use wh_grid::{GridLayout, Pos};

    use crate::{OrderBook, OrderGenerator};

    fn fixed(count: u32) -> ScenarioConfig {
        ScenarioConfig { order_mode: OrderMode::FixedOrders, order_count: count, ..Default::default() }
    }

    fn dynamic(rate: f64) -> ScenarioConfig {
        ScenarioConfig { order_mode: OrderMode::DynamicOrders, order_rate: rate, ..Default::default() }
    }

    #[test]
    fn fixed_mode_creates_whole_batch_at_tick_zero() {
        let layout = GridLayout::warehouse(20, 20).unwrap();
        let generator = OrderGenerator::new(&fixed(30), &layout);
        let mut book = OrderBook::new();
        let mut rng = SimRng::new(1);

        assert_eq!(generator.seed(&mut book, &mut rng), 30);
        assert_eq!(book.generated(), 30);
        assert!(book.iter().all(|o| o.created == Tick::ZERO));
        assert!(book.iter().all(|o| layout.is_shelf(o.pickup) && layout.is_station(o.delivery)));

        for t in 0..50 {
            assert!(generator.tick(&mut book, &mut rng, Tick(t)).is_none());
        }
        assert_eq!(book.generated(), 30);
    }

    #[test]
    fn dynamic_mode_seeds_nothing() {
        let layout = GridLayout::warehouse(20, 20).unwrap();
        let generator = OrderGenerator::new(&dynamic(0.5), &layout);
        let mut book = OrderBook::new();
        assert_eq!(generator.seed(&mut book, &mut SimRng::new(1)), 0);
        assert_eq!(book.generated(), 0);
    }

    #[test]
    fn dynamic_rate_extremes() {
        let layout = GridLayout::warehouse(20, 20).unwrap();
        let mut rng = SimRng::new(9);

        let never = OrderGenerator::new(&dynamic(0.0), &layout);
        let mut book = OrderBook::new();
        for t in 0..100 {
            never.tick(&mut book, &mut rng, Tick(t));
        }
        assert_eq!(book.generated(), 0);

        let always = OrderGenerator::new(&dynamic(1.0), &layout);
        for t in 0..100 {
            let id = always.tick(&mut book, &mut rng, Tick(t)).unwrap();
            assert_eq!(book.get(id).unwrap().created, Tick(t));
        }
        assert_eq!(book.generated(), 100);
    }

    #[test]
    fn same_seed_same_orders() {
        let layout = GridLayout::warehouse(20, 20).unwrap();
        let generator = OrderGenerator::new(&dynamic(0.4), &layout);
        let run = |seed| {
            let mut book = OrderBook::new();
            let mut rng = SimRng::new(seed);
            for t in 0..200 {
                generator.tick(&mut book, &mut rng, Tick(t));
            }
            book.iter().map(|o| (o.created, o.pickup, o.delivery)).collect::<Vec<_>>()
        };
        assert_eq!(run(5), run(5));
        assert_ne!(run(5), run(6));
    }

    #[test]
    fn clustered_pickups_stay_in_window() {
        let layout = GridLayout::warehouse(20, 20).unwrap();
        let cfg = ScenarioConfig {
            clustered_orders: true,
            cluster_center_x: 10,
            cluster_center_y: 10,
            cluster_radius:   5,
            order_count:      50,
            ..fixed(50)
        };
        let generator = OrderGenerator::new(&cfg, &layout);
        let mut book = OrderBook::new();
        generator.seed(&mut book, &mut SimRng::new(3));

        let center = Pos::new(10, 10);
        assert!(book.iter().all(|o| o.pickup.within_window(center, 5)));
        // No station lies within the window, so every delivery goes to the
        // nearest one: (18, 18) at distance 16.
        assert_eq!(generator.delivery_candidates(), [Pos::new(18, 18)]);
        assert!(book.iter().all(|o| o.delivery == Pos::new(18, 18)));
    }

    #[test]
    fn empty_cluster_window_falls_back_to_nearest_shelf() {
        let layout = GridLayout::warehouse(20, 20).unwrap();
        let cfg = ScenarioConfig {
            clustered_orders: true,
            cluster_center_x: 0,
            cluster_center_y: 0,
            cluster_radius:   0,
            ..fixed(5)
        };
        let generator = OrderGenerator::new(&cfg, &layout);
        assert_eq!(generator.pickup_candidates(), [Pos::new(2, 2)]);
        assert_eq!(generator.delivery_candidates(), [Pos::new(1, 1)]);
    }

    #[test]
    fn cluster_center_outside_grid_is_clamped() {
        let layout = GridLayout::warehouse(20, 20).unwrap();
        let cfg = ScenarioConfig {
            clustered_orders: true,
            cluster_center_x: 500,
            cluster_center_y: -40,
            cluster_radius:   1,
            ..fixed(1)
        };
        let generator = OrderGenerator::new(&cfg, &layout);
        assert_eq!(generator.cluster().unwrap().center, Pos::new(19, 0));
        assert_eq!(generator.delivery_candidates(), [Pos::new(18, 1)]);
    }
}
