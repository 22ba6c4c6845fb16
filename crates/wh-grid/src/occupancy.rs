//! Per-tick robot occupancy index.
//!
//! Maps each occupied cell to the robot standing on it, giving O(1)
//! "is this cell taken?" queries for the movement arbiter.  The index is
//! rebuilt from robot positions at the start of every arbitration pass and
//! then updated incrementally as moves commit.
//!
//! Cells entered this tick are additionally marked *reserved*.  The
//! reservation is transient: [`Occupancy::rebuild`] clears it.

use wh_core::RobotId;

use crate::Pos;

#[cfg(not(feature = "fx-hash"))]
type PosMap<V> = std::collections::HashMap<Pos, V>;
#[cfg(feature = "fx-hash")]
type PosMap<V> = rustc_hash::FxHashMap<Pos, V>;

#[cfg(not(feature = "fx-hash"))]
type PosSet = std::collections::HashSet<Pos>;
#[cfg(feature = "fx-hash")]
type PosSet = rustc_hash::FxHashSet<Pos>;

/// Position → robot index plus "reserved this tick" marks.
#[derive(Default, Debug, Clone)]
pub struct Occupancy {
    cells:    PosMap<RobotId>,
    reserved: PosSet,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything and index `robots` afresh.
    ///
    /// # Errors
    ///
    /// Returns `(first, second, cell)` for the first pair of robots found on
    /// the same cell.  The index is left holding the first robot.
    pub fn rebuild<I>(&mut self, robots: I) -> Result<(), (RobotId, RobotId, Pos)>
    where
        I: IntoIterator<Item = (RobotId, Pos)>,
    {
        self.cells.clear();
        self.reserved.clear();
        for (robot, pos) in robots {
            if let Some(other) = self.place(robot, pos) {
                return Err((other, robot, pos));
            }
        }
        Ok(())
    }

    /// Record `robot` at `pos`.  If another robot already holds the cell it
    /// is left in place and returned.
    pub fn place(&mut self, robot: RobotId, pos: Pos) -> Option<RobotId> {
        match self.cells.get(&pos) {
            Some(&other) if other != robot => Some(other),
            _ => {
                self.cells.insert(pos, robot);
                None
            }
        }
    }

    /// Move `robot` from `from` to `to` if `to` is neither occupied nor
    /// reserved.  On success the destination becomes reserved for the rest
    /// of the tick.
    pub fn try_move(&mut self, robot: RobotId, from: Pos, to: Pos) -> bool {
        if self.cells.contains_key(&to) || self.reserved.contains(&to) {
            return false;
        }
        if self.cells.get(&from) == Some(&robot) {
            self.cells.remove(&from);
        }
        self.cells.insert(to, robot);
        self.reserved.insert(to);
        true
    }

    #[inline]
    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.cells.contains_key(&pos)
    }

    /// Number of occupied cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
