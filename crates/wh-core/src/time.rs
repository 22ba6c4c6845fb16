//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  One tick advances
//! every phase of the engine exactly once; there is no wall-clock mapping.
//! `SimClock` tracks the tick about to be processed and the run's end.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Drives the step loop: which tick is next and when the run is over.
///
/// `current_tick` is the tick the next `step()` will process, so it doubles
/// as the number of ticks already committed (`step_count`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The next tick to process.
    pub current_tick: Tick,
    /// Exclusive upper bound: the run is finished once `current_tick`
    /// reaches it.
    pub end_tick: Tick,
}

impl SimClock {
    /// A clock at tick 0 that finishes after `max_steps` ticks.
    pub fn new(max_steps: u64) -> Self {
        Self {
            current_tick: Tick::ZERO,
            end_tick:     Tick(max_steps),
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Number of ticks committed so far.
    #[inline]
    pub fn step_count(&self) -> u64 {
        self.current_tick.0
    }

    /// `true` once `step_count >= max_steps`.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.current_tick >= self.end_tick
    }

    /// Rewind to tick 0, keeping the end tick.
    pub fn rewind(&mut self) {
        self.current_tick = Tick::ZERO;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.current_tick, self.end_tick)
    }
}
