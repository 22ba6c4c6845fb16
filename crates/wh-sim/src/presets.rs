//! Named scenario presets for mechanism comparisons.

use wh_core::{OrderMode, ScenarioConfig};

/// A named scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioPreset {
    pub name:   &'static str,
    pub config: ScenarioConfig,
}

impl ScenarioPreset {
    fn new(name: &'static str, config: ScenarioConfig) -> Self {
        Self { name, config }
    }

    /// The seven standard scenarios in suite order.
    pub fn all() -> Vec<ScenarioPreset> {
        let base = ScenarioConfig::default();
        vec![
            Self::new("Light Load", ScenarioConfig { order_count: 10, ..base.clone() }),
            Self::new("Medium Load", base.clone()),
            Self::new("Heavy Load", ScenarioConfig { order_count: 50, ..base.clone() }),
            Self::new("Robot Failure", ScenarioConfig { robot_failure_step: Some(80), ..base.clone() }),
            Self::new("Clustered Orders", ScenarioConfig { clustered_orders: true, ..base.clone() }),
            Self::new(
                "Dynamic Orders",
                ScenarioConfig {
                    order_mode: OrderMode::DynamicOrders,
                    order_rate: 0.4,
                    ..base.clone()
                },
            ),
            Self::new(
                "Congestion Test",
                ScenarioConfig {
                    num_robots:       12,
                    grid_size:        12,
                    order_count:      40,
                    ..base
                },
            ),
        ]
    }

    /// Look up a preset by display name or slug, ignoring case
    /// (`"Heavy Load"`, `"heavy load"`, `"heavy_load"`).
    pub fn by_name(name: &str) -> Option<ScenarioPreset> {
        let wanted = slugify(name.trim());
        Self::all().into_iter().find(|p| p.slug() == wanted)
    }

    /// File-name form of the name: lower case, spaces as underscores.
    pub fn slug(&self) -> String {
        slugify(self.name)
    }
}

fn slugify(name: &str) -> String {
    name.to_lowercase().replace([' ', '-'], "_")
}
