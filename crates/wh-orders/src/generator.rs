//! Scenario-driven order creation.
//!
//! Two modes:
//!
//! - **Fixed**: `order_count` orders are created once, at tick 0, before
//!   the first step.
//! - **Dynamic**: each tick runs one Bernoulli trial with probability
//!   `order_rate`; success creates a single order stamped with that tick.
//!
//! Pickups are drawn uniformly from the shelf candidates and deliveries from
//! the station candidates.  With clustering enabled the candidates are the
//! markers inside the square window around the cluster center; an empty
//! window falls back to the single marker nearest the center.

use tracing::debug;
use wh_core::{OrderId, OrderMode, ScenarioConfig, SimRng, Tick};
use wh_grid::{GridLayout, Pos};

use crate::OrderBook;

/// Spatial restriction applied to order endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    pub center: Pos,
    pub radius: u32,
}

/// Creates orders according to the scenario's [`OrderMode`].
///
/// Candidate endpoint lists are resolved once at construction.
#[derive(Clone, Debug)]
pub struct OrderGenerator {
    mode:       OrderMode,
    count:      u32,
    rate:       f64,
    cluster:    Option<Cluster>,
    pickups:    Vec<Pos>,
    deliveries: Vec<Pos>,
}

impl OrderGenerator {
    pub fn new(config: &ScenarioConfig, layout: &GridLayout) -> Self {
        let cluster = config.clustered_orders.then(|| {
            let (x, y) = config.cluster_center();
            Cluster { center: Pos::new(x, y), radius: config.cluster_radius }
        });
        let (pickups, deliveries) = match cluster {
            Some(c) => (
                or_nearest(layout.shelves_near(c.center, c.radius), layout.nearest_shelf(c.center)),
                or_nearest(layout.stations_near(c.center, c.radius), layout.nearest_station(c.center)),
            ),
            None => (layout.shelves.clone(), layout.stations.clone()),
        };
        Self {
            mode: config.order_mode,
            count: config.order_count,
            rate: config.order_rate,
            cluster,
            pickups,
            deliveries,
        }
    }

    #[inline]
    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    #[inline]
    pub fn cluster(&self) -> Option<Cluster> {
        self.cluster
    }

    /// Shelves a pickup may be drawn from.
    pub fn pickup_candidates(&self) -> &[Pos] {
        &self.pickups
    }

    /// Stations a delivery may be drawn from.
    pub fn delivery_candidates(&self) -> &[Pos] {
        &self.deliveries
    }

    /// Populate a fresh book.  Fixed mode creates the whole batch at tick 0;
    /// dynamic mode creates nothing.  Returns the number of orders created.
    pub fn seed(&self, book: &mut OrderBook, rng: &mut SimRng) -> u32 {
        if self.mode != OrderMode::FixedOrders {
            return 0;
        }
        let mut created = 0;
        for _ in 0..self.count {
            if self.create_one(book, rng, Tick::ZERO).is_some() {
                created += 1;
            }
        }
        debug!(created, "fixed order batch created");
        created
    }

    /// Per-tick generation.  Only dynamic mode ever creates orders here.
    pub fn tick(&self, book: &mut OrderBook, rng: &mut SimRng, now: Tick) -> Option<OrderId> {
        if self.mode != OrderMode::DynamicOrders {
            return None;
        }
        if !rng.gen_bool(self.rate) {
            return None;
        }
        let id = self.create_one(book, rng, now)?;
        debug!(%id, %now, "dynamic order created");
        Some(id)
    }

    fn create_one(&self, book: &mut OrderBook, rng: &mut SimRng, now: Tick) -> Option<OrderId> {
        let pickup = *rng.choose(&self.pickups)?;
        let delivery = *rng.choose(&self.deliveries)?;
        Some(book.create(pickup, delivery, now))
    }
}

fn or_nearest(window: Vec<Pos>, nearest: Option<Pos>) -> Vec<Pos> {
    if window.is_empty() {
        nearest.into_iter().collect()
    } else {
        window
    }
}
