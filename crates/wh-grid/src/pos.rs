//! Grid coordinates and Manhattan geometry.

use std::fmt;

/// A cell coordinate.  `(0, 0)` is the top-left corner.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance `|dx| + |dy|`.
    #[inline]
    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The single adjacent cell that reduces the distance to `target`,
    /// closing the x gap before the y gap.  Returns `self` at the target.
    pub fn step_toward(self, target: Pos) -> Pos {
        if self.x != target.x {
            Pos::new(self.x + (target.x - self.x).signum(), self.y)
        } else if self.y != target.y {
            Pos::new(self.x, self.y + (target.y - self.y).signum())
        } else {
            self
        }
    }

    /// The four cardinal neighbours in fixed order: +x, −x, +y, −y.
    #[inline]
    pub fn neighbors4(self) -> [Pos; 4] {
        [
            Pos::new(self.x + 1, self.y),
            Pos::new(self.x - 1, self.y),
            Pos::new(self.x, self.y + 1),
            Pos::new(self.x, self.y - 1),
        ]
    }

    /// `true` if `other` is exactly one cardinal step away.
    #[inline]
    pub fn is_adjacent(self, other: Pos) -> bool {
        self.manhattan(other) == 1
    }

    /// Square-window test: `|dx| <= radius && |dy| <= radius`.
    #[inline]
    pub fn within_window(self, center: Pos, radius: u32) -> bool {
        self.x.abs_diff(center.x) <= radius && self.y.abs_diff(center.y) <= radius
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Self {
        Pos::new(x, y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
