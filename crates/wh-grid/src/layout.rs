//! Static warehouse layout: grid bounds plus shelf and station markers.
//!
//! # Standard layout
//!
//! [`GridLayout::warehouse`] reproduces the reference floor plan:
//!
//! - **Shelves** sit in aisles inside a 2-cell margin.  Columns start at
//!   `x = 2` every 3 cells and come in pairs (`x`, `x + 1`); rows start at
//!   `y = 2` every 3 cells.
//! - **Stations** are the four cells inset one from each corner, clamped
//!   into the grid and deduplicated on tiny grids.
//!
//! A grid too small to hold any aisle gets a single shelf at its centre so
//! order generation always has a pickup source.
//!
//! Markers are created once and never mutated.

use std::collections::HashSet;

use crate::{GridError, GridResult, Pos};

/// Immutable warehouse floor: bounds, shelves (pickup sources) and stations
/// (delivery sinks).
///
/// Do not construct directly; use [`GridLayout::warehouse`] or
/// [`GridLayoutBuilder`].
#[derive(Clone, Debug)]
pub struct GridLayout {
    pub width:  u32,
    pub height: u32,

    /// Shelf positions in creation order.  Index order is the tie-break
    /// order for nearest-shelf queries.
    pub shelves: Vec<Pos>,

    /// Station positions in creation order.
    pub stations: Vec<Pos>,

    shelf_set:   HashSet<Pos>,
    station_set: HashSet<Pos>,
}

impl GridLayout {
    /// Build the standard layout for a `width × height` grid.
    pub fn warehouse(width: u32, height: u32) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }
        let (w, h) = (width as i32, height as i32);

        let mut builder = GridLayoutBuilder::new(width, height);

        for x in (2..w - 2).step_by(3) {
            for y in (2..h - 2).step_by(3) {
                builder = builder.shelf(Pos::new(x, y));
                if x + 1 < w - 2 {
                    builder = builder.shelf(Pos::new(x + 1, y));
                }
            }
        }
        if builder.shelves.is_empty() {
            builder = builder.shelf(Pos::new(w / 2, h / 2));
        }

        let clamp = |x: i32, y: i32| Pos::new(x.clamp(0, w - 1), y.clamp(0, h - 1));
        for corner in [
            clamp(1, 1),
            clamp(w - 2, 1),
            clamp(1, h - 2),
            clamp(w - 2, h - 2),
        ] {
            if !builder.stations.contains(&corner) {
                builder = builder.station(corner);
            }
        }

        builder.build()
    }

    // ── Bounds ────────────────────────────────────────────────────────────

    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    #[inline]
    pub fn cell_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Every cell in row-major order (y outer, x inner).
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| Pos::new(x, y)))
    }

    /// Cells that are neither shelf nor station, row-major.
    pub fn open_cells(&self) -> Vec<Pos> {
        self.cells()
            .filter(|&p| !self.is_shelf(p) && !self.is_station(p))
            .collect()
    }

    /// In-bounds cardinal neighbours of `pos` in `Pos::neighbors4` order.
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        pos.neighbors4().into_iter().filter(move |&p| self.in_bounds(p))
    }

    // ── Markers ───────────────────────────────────────────────────────────

    #[inline]
    pub fn is_shelf(&self, pos: Pos) -> bool {
        self.shelf_set.contains(&pos)
    }

    #[inline]
    pub fn is_station(&self, pos: Pos) -> bool {
        self.station_set.contains(&pos)
    }

    /// Shelves inside the square window of `radius` around `center`.
    pub fn shelves_near(&self, center: Pos, radius: u32) -> Vec<Pos> {
        window(&self.shelves, center, radius)
    }

    /// Stations inside the square window of `radius` around `center`.
    pub fn stations_near(&self, center: Pos, radius: u32) -> Vec<Pos> {
        window(&self.stations, center, radius)
    }

    /// Shelf closest to `to` (Manhattan), lowest index on ties.
    pub fn nearest_shelf(&self, to: Pos) -> Option<Pos> {
        nearest(&self.shelves, to)
    }

    /// Station closest to `to` (Manhattan), lowest index on ties.
    pub fn nearest_station(&self, to: Pos) -> Option<Pos> {
        nearest(&self.stations, to)
    }
}

fn window(points: &[Pos], center: Pos, radius: u32) -> Vec<Pos> {
    points
        .iter()
        .copied()
        .filter(|p| p.within_window(center, radius))
        .collect()
}

fn nearest(points: &[Pos], to: Pos) -> Option<Pos> {
    // `min_by_key` keeps the first minimum, i.e. the lowest index.
    points.iter().copied().min_by_key(|p| p.manhattan(to))
}

// ── GridLayoutBuilder ─────────────────────────────────────────────────────────

/// Incrementally assembles a [`GridLayout`] with custom markers.
///
/// Used by tests and by shells that want a floor plan other than the
/// standard aisles.
///
/// ```rust
/// use wh_grid::{GridLayoutBuilder, Pos};
///
/// let layout = GridLayoutBuilder::new(5, 5)
///     .shelf(Pos::new(2, 2))
///     .station(Pos::new(0, 0))
///     .build()
///     .unwrap();
/// assert!(layout.is_shelf(Pos::new(2, 2)));
/// ```
pub struct GridLayoutBuilder {
    width:    u32,
    height:   u32,
    shelves:  Vec<Pos>,
    stations: Vec<Pos>,
}

impl GridLayoutBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, shelves: Vec::new(), stations: Vec::new() }
    }

    pub fn shelf(mut self, pos: Pos) -> Self {
        self.shelves.push(pos);
        self
    }

    pub fn station(mut self, pos: Pos) -> Self {
        self.stations.push(pos);
        self
    }

    /// Validate bounds and marker presence and freeze the layout.
    pub fn build(self) -> GridResult<GridLayout> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }
        let in_bounds =
            |p: &Pos| p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height;
        if let Some(p) = self.shelves.iter().chain(&self.stations).find(|p| !in_bounds(p)) {
            return Err(GridError::OutOfBounds { x: p.x, y: p.y, width, height });
        }
        if self.shelves.is_empty() {
            return Err(GridError::Missing("shelves"));
        }
        if self.stations.is_empty() {
            return Err(GridError::Missing("stations"));
        }

        Ok(GridLayout {
            width,
            height,
            shelf_set:   self.shelves.iter().copied().collect(),
            station_set: self.stations.iter().copied().collect(),
            shelves:     self.shelves,
            stations:    self.stations,
        })
    }
}
