//! Fluent builder for constructing a [`Sim`].

use flock_agent::{AgentStore, AgentStoreBuilder};
use flock_core::{FlockConfig, SimRng};

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Inputs
///
/// | Method                 | Default                                              |
/// |------------------------|------------------------------------------------------|
/// | `new(config)`          | required                                             |
/// | `.agents(store, rng)`  | `config.initial_population` agents at the origin, seeded from `config.seed` |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(FlockConfig::default()).build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config: FlockConfig,
    agents: Option<(AgentStore, SimRng)>,
}

impl SimBuilder {
    pub fn new(config: FlockConfig) -> Self {
        Self { config, agents: None }
    }

    /// Start from an existing population instead of spawning
    /// `initial_population` agents.  `rng` feeds later additions.
    pub fn agents(mut self, store: AgentStore, rng: SimRng) -> Self {
        self.agents = Some((store, rng));
        self
    }

    /// Validate the configuration and build the [`Sim`].
    ///
    /// # Errors
    ///
    /// - [`SimError::Core`][crate::SimError::Core] if the configuration is
    ///   rejected by [`FlockConfig::validate`].
    /// - [`SimError::ThreadPool`][crate::SimError::ThreadPool] if a private
    ///   pool was requested and could not be created.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let config = self.config;
        let (agents, rng) = match self.agents {
            Some(parts) => parts,
            None => AgentStoreBuilder::new(config.initial_population, config.seed).build(),
        };

        #[cfg(feature = "parallel")]
        let pool = match config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| crate::SimError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };

        #[cfg(not(feature = "parallel"))]
        {
            if config.num_threads.is_some() {
                tracing::debug!("num_threads ignored: built without the `parallel` feature");
            }
        }

        tracing::info!(
            population = agents.len(),
            threads = ?config.num_threads,
            "flock simulation ready"
        );

        #[allow(unused_mut)]
        let mut sim = Sim::from_parts(config, agents, rng);
        #[cfg(feature = "parallel")]
        {
            sim.pool = pool;
        }
        Ok(sim)
    }
}
