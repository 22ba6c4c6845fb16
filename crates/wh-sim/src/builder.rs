//! Fluent builder for constructing a [`Run`] with a custom floor plan or
//! hand-placed robots.

use std::collections::HashSet;

use wh_core::{InvariantViolation, RobotId, ScenarioConfig, Tick};
use wh_grid::{GridError, GridLayout, Pos};
use wh_robot::{Fleet, Robot};

use crate::{Run, SimError, SimResult};

/// Fluent builder for [`Run`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                                      |
/// |-------------------------|----------------------------------------------|
/// | `.layout(l)`            | `GridLayout::warehouse(grid_size, grid_size)` |
/// | `.robot_positions(v)`   | RNG placement on open cells                  |
///
/// # Example
///
/// ```rust,ignore
/// let layout = GridLayoutBuilder::new(5, 5).shelf(Pos::new(2, 2)).station(Pos::new(4, 4)).build()?;
/// let mut run = RunBuilder::new(config)
///     .layout(layout)
///     .robot_positions(vec![Pos::new(1, 2), Pos::new(3, 2)])
///     .build()?;
/// ```
pub struct RunBuilder {
    config:    ScenarioConfig,
    layout:    Option<GridLayout>,
    positions: Option<Vec<Pos>>,
}

impl RunBuilder {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config, layout: None, positions: None }
    }

    /// Use a custom floor plan.  Its width must equal `grid_size`.
    pub fn layout(mut self, layout: GridLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Place robot `i` at `positions[i]` instead of drawing cells from the
    /// RNG.  Must be length `num_robots`.
    pub fn robot_positions(mut self, positions: Vec<Pos>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Validate inputs and return a run at tick 0.
    pub fn build(self) -> SimResult<Run> {
        self.config.validate()?;
        let size = self.config.grid_size;

        let layout = match self.layout {
            Some(l) => {
                if l.width != size || l.height != size {
                    return Err(SimError::LayoutMismatch {
                        grid_size: size,
                        width:     l.width,
                        height:    l.height,
                    });
                }
                l
            }
            None => GridLayout::warehouse(size, size)?,
        };

        let fleet = match self.positions {
            Some(positions) => Some(fleet_at(&positions, &layout, self.config.num_robots as usize)?),
            None => None,
        };

        Ok(Run::assemble(self.config, layout, fleet))
    }
}

fn fleet_at(positions: &[Pos], layout: &GridLayout, expected: usize) -> SimResult<Fleet> {
    if positions.len() != expected {
        return Err(SimError::RobotCountMismatch {
            expected,
            got:  positions.len(),
            what: "robot positions",
        });
    }
    let mut seen: HashSet<Pos> = HashSet::with_capacity(positions.len());
    for (i, &p) in positions.iter().enumerate() {
        if !layout.in_bounds(p) {
            return Err(GridError::OutOfBounds {
                x: p.x,
                y: p.y,
                width: layout.width,
                height: layout.height,
            }
            .into());
        }
        if !seen.insert(p) {
            let first = positions.iter().position(|&q| q == p).unwrap_or(i);
            return Err(SimError::Invariant {
                tick:      Tick::ZERO,
                violation: InvariantViolation::SharedCell {
                    a: RobotId(first as u32),
                    b: RobotId(i as u32),
                    x: p.x,
                    y: p.y,
                },
            });
        }
    }
    Ok(Fleet::from_robots(
        positions
            .iter()
            .enumerate()
            .map(|(i, &p)| Robot::new(RobotId(i as u32), p))
            .collect(),
    ))
}
