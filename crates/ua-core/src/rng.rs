//! Deterministic per-brain RNG.
//!
//! # Determinism strategy
//!
//! Each brain owns its own independent `SmallRng`.  When brains are managed
//! by a scheduler, seed them as:
//!
//!   seed = global_seed XOR (brain_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive brain IDs uniformly across the seed space.
//! This means:
//!
//! - Brains never share RNG state, so tie-break draws in one agent can never
//!   perturb another agent's behavior.
//! - Adding or removing agents does not disturb the seeds of existing agents —
//!   runs are reproducible even as populations grow.
//! - All RNG calls are local to the owning brain; no synchronisation needed
//!   should ticks ever be distributed across worker threads.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::BrainId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-brain deterministic RNG.
///
/// Used for two things only: tie-breaking among equal-score decisions and
/// choosing the action under the `Random` run policy.
pub struct BrainRng(SmallRng);

impl BrainRng {
    /// Seed directly from a raw value.  Use for standalone brains and tests.
    pub fn seeded(seed: u64) -> Self {
        BrainRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed deterministically from a run-wide seed and a brain ID.
    pub fn for_brain(global_seed: u64, brain: BrainId) -> Self {
        let seed = global_seed ^ (brain.0 as u64).wrapping_mul(MIXING_CONSTANT);
        BrainRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Pick a uniformly random index into a collection of length `len`.
    ///
    /// # Panics
    /// Panics if `len` is zero.
    #[inline]
    pub fn pick_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    /// Choose a random element from a slice.  Returns `None` if empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
