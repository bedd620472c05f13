//! Process-wide simulation RNG.
//!
//! The flock uses a single random stream, seeded once from
//! [`FlockConfig::seed`](crate::FlockConfig::seed) when the population is
//! built.  It feeds two consumers only, both of which run between ticks on
//! the orchestrating thread:
//!
//! - the initial velocity of every added agent (uniform in the unit ball),
//! - the victim index of `RemoveRandomAgent`.
//!
//! The force and integration stages never draw random numbers, so the
//! parallel passes need no RNG state at all.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.
///
/// Used only in single-threaded contexts.  Reseeding mid-run is not
/// supported: build a new store instead.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform sample from the closed unit ball (rejection sampling).
    ///
    /// The acceptance rate is π/6 ≈ 52 %, so the expected number of draws
    /// is just under two triples.
    pub fn inside_unit_sphere(&mut self) -> Vec3 {
        loop {
            let v = Vec3::new(
                self.0.gen_range(-1.0f32..=1.0),
                self.0.gen_range(-1.0f32..=1.0),
                self.0.gen_range(-1.0f32..=1.0),
            );
            if v.length_squared() <= 1.0 {
                return v;
            }
        }
    }

    /// Uniform index in `0..len`, or `None` when `len == 0`.
    #[inline]
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.gen_range(0..len))
    }
}
