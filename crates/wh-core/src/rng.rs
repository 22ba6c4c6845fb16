//! Deterministic run-level RNG wrapper.
//!
//! # Determinism strategy
//!
//! Every run owns exactly one `SimRng`, seeded from `ScenarioConfig::seed`
//! at configure/reset time.  All randomness in the engine (robot placement,
//! order generation, fault-injection target) is drawn from it in a fixed
//! phase order, so the same seed and config always replay the same history.
//! Nothing reads an ambient or thread-local generator.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Run-level RNG.
///
/// Used only from the single-writer parts of a tick.  Parallel suite runs
/// each construct their own `SimRng`; instances are never shared.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
