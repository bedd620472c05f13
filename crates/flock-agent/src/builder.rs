//! Fluent builder for constructing `AgentStore` + `SimRng` in one step.
//!
//! # Usage
//!
//! ```rust
//! use flock_agent::AgentStoreBuilder;
//! use glam::Vec3;
//!
//! let (store, mut rng) = AgentStoreBuilder::new(100, /*seed=*/ 1)
//!     .place(Vec3::new(2.0, 0.0, 0.0), Vec3::X)
//!     .build();
//!
//! assert_eq!(store.len(), 101);
//! // Keep `rng`: later additions draw from the same stream.
//! let _ = rng.inside_unit_sphere();
//! ```

use flock_core::SimRng;
use glam::Vec3;

use crate::AgentStore;

/// Fluent builder for [`AgentStore`] + [`SimRng`].
///
/// The random agents are created first (at the origin, unit-ball
/// velocities, in index order `0..count`), then any explicitly placed
/// agents in the order they were given.
pub struct AgentStoreBuilder {
    count:    usize,
    seed:     u64,
    placed:   Vec<(Vec3, Vec3)>,
    headroom: usize,
}

impl AgentStoreBuilder {
    /// Create a builder for `count` random agents using `seed` as the seed of
    /// the process-wide RNG stream.
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed, placed: Vec::new(), headroom: 0 }
    }

    /// Append an agent at `position` moving with `velocity`.
    pub fn place(mut self, position: Vec3, velocity: Vec3) -> Self {
        self.placed.push((position, velocity));
        self
    }

    /// Pre-allocate room for `additional` agents beyond the initial ones, so
    /// early `add` calls do not reallocate.
    pub fn headroom(mut self, additional: usize) -> Self {
        self.headroom = additional;
        self
    }

    /// Construct the store and hand back the RNG so the stream continues.
    pub fn build(self) -> (AgentStore, SimRng) {
        let mut rng = SimRng::new(self.seed);
        let mut store = AgentStore::with_capacity(self.count + self.placed.len() + self.headroom);

        for _ in 0..self.count {
            store.spawn(&mut rng);
        }
        for (position, velocity) in self.placed {
            store.insert(position, velocity);
        }

        (store, rng)
    }
}
