//! The `Sim` struct and its tick loop.

use flock_agent::{AgentError, AgentLanes, AgentStore, Removal};
use flock_core::{AgentId, FlockConfig, SimClock, SimRng, Tick};
use flock_stage::{
    IntegrateReport, OctantCounts, apply_boundary, apply_flock, apply_integrate, count_octants,
};

use crate::command::{CommandQueue, PopulationCommand, RemoveTarget};
use crate::{SimObserver, SimResult};

// ── TickReport ────────────────────────────────────────────────────────────────

/// What happened during one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// The tick that was just processed.
    pub tick: Tick,

    /// Step length used, in seconds.
    pub dt: f32,

    /// Agents that went through the stages (before population commands).
    pub population: usize,

    /// Octant counts over the post-integration positions of those agents.
    pub octants: OctantCounts,

    /// Agents whose velocity had no direction and fell back to a default heading.
    pub degenerate: usize,

    /// Index of the agent appended by a queued `AddAgent`, if any.
    pub added: Option<AgentId>,

    /// Result of a queued removal, if one was applied.
    pub removed: Option<Removal>,

    /// Queued removals that could not be applied (empty store, stale index).
    pub rejected: usize,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each tick runs four stages over every agent, each finishing before the
/// next starts:
///
/// 1. **BoundaryForce**: wall repulsion into `acceleration`.
/// 2. **FlockForce**: separation, alignment and cohesion into `acceleration`.
/// 3. **Integrator**: speed-clamped velocity update, move, face heading,
///    clear `acceleration`.
/// 4. **OctantCounter**: classify positions into eight counters.
///
/// Population commands queued with [`Sim::request`] are applied after the
/// counters, add first then remove.  Direct [`Sim::add_agent`] /
/// [`Sim::remove_agent`] calls take `&mut self`, so they can never overlap a
/// running stage.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (bounds, weights, speed limits, …).
    pub config: FlockConfig,

    /// Simulation clock: tracks the current tick and elapsed seconds.
    pub clock: SimClock,

    agents:  AgentStore,
    rng:     SimRng,
    octants: OctantCounts,
    pending: CommandQueue,

    /// Private stage pool when `config.num_threads` is set.
    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl Sim {
    pub(crate) fn from_parts(
        config: FlockConfig,
        agents: AgentStore,
        rng:    SimRng,
    ) -> Self {
        Self {
            config,
            clock: SimClock::new(),
            agents,
            rng,
            octants: OctantCounts::default(),
            pending: CommandQueue::default(),
            #[cfg(feature = "parallel")]
            pool: None,
        }
    }

    // ── Readouts ──────────────────────────────────────────────────────────

    /// Read-only agent state.
    #[inline]
    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    /// Current number of agents.
    #[inline]
    pub fn population(&self) -> usize {
        self.agents.len()
    }

    /// Counts from the most recent tick (all zero before the first tick).
    #[inline]
    pub fn octants(&self) -> OctantCounts {
        self.octants
    }

    /// `true` if population commands are waiting for the end of the tick.
    #[inline]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Queue a population change for the end of the next tick.
    ///
    /// Returns `false` if it coalesced with a pending command of the same
    /// kind.
    pub fn request(&mut self, command: PopulationCommand) -> bool {
        let fresh = self.pending.push(command);
        if !fresh {
            tracing::trace!(?command, "population command coalesced");
        }
        fresh
    }

    /// Append one agent at the origin with a random unit-ball velocity.
    pub fn add_agent(&mut self) -> AgentId {
        let id = self.agents.spawn(&mut self.rng);
        tracing::debug!(agent = %id, population = self.agents.len(), "agent added");
        id
    }

    /// Swap-remove the agent at `id`.
    pub fn remove_agent(&mut self, id: AgentId) -> SimResult<Removal> {
        let removal = self.agents.remove(id)?;
        tracing::debug!(
            agent = %id,
            visual = %removal.visual(),
            population = self.agents.len(),
            "agent removed"
        );
        Ok(removal)
    }

    /// Swap-remove a uniformly chosen agent.
    pub fn remove_random_agent(&mut self) -> SimResult<Removal> {
        let len = self.agents.len();
        let index = self
            .rng
            .pick_index(len)
            .ok_or(AgentError::IndexOutOfRange { index: 0, len })?;
        self.remove_agent(AgentId(index as u32))
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance one tick using `config.dt`.
    pub fn step(&mut self) -> TickReport {
        self.step_with(self.config.dt)
    }

    /// Advance one tick of `dt` seconds.
    pub fn step_with(&mut self, dt: f32) -> TickReport {
        self.tick(dt, |_| {})
    }

    /// One tick.  `staged` sees the agents after the four stages and before
    /// the queued population commands, the same state `TickReport` describes.
    fn tick(&mut self, dt: f32, staged: impl FnOnce(&AgentStore)) -> TickReport {
        let now = self.clock.current_tick;
        let population = self.agents.len();

        let (octants, integrate) = self.run_stages(dt);
        self.octants = octants;
        if integrate.degenerate > 0 {
            tracing::debug!(
                tick = %now,
                count = integrate.degenerate,
                "velocity had no direction; used fallback heading"
            );
        }

        staged(&self.agents);
        let (added, removed, rejected) = self.apply_pending(now);
        self.clock.advance(dt);

        tracing::trace!(tick = %now, population, total = octants.total(), "tick done");

        TickReport {
            tick: now,
            dt,
            population,
            octants,
            degenerate: integrate.degenerate,
            added,
            removed,
            rejected,
        }
    }

    /// Run the simulation from the current tick to `config.total_ticks`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        let end = Tick(self.config.total_ticks);
        while self.clock.current_tick < end {
            self.observed_step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores
    /// `total_ticks`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.observed_step(observer);
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn observed_step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let interval = self.config.output_interval_ticks;
        let snapshot = interval > 0 && now.0 % interval == 0;
        let report = self.tick(self.config.dt, |agents| {
            if snapshot {
                observer.on_snapshot(now, agents);
            }
        });
        observer.on_tick_end(&report);
    }

    /// The four stages, in order, on the private pool if one was built.
    fn run_stages(&mut self, dt: f32) -> (OctantCounts, IntegrateReport) {
        let config = &self.config;
        let agents = &mut self.agents;

        let mut stages = move || {
            let AgentLanes { position, velocity, acceleration, transforms } = agents.lanes_mut();

            apply_boundary(position, acceleration, &config.boundary, &config.walls);
            apply_flock(position, velocity, acceleration, &config.flock);
            let integrate = apply_integrate(
                AgentLanes {
                    position:     &mut *position,
                    velocity:     &mut *velocity,
                    acceleration: &mut *acceleration,
                    transforms:   &mut *transforms,
                },
                &config.speed,
                dt,
            );
            (count_octants(position), integrate)
        };

        #[cfg(feature = "parallel")]
        {
            if let Some(pool) = &self.pool {
                return pool.install(stages);
            }
        }

        stages()
    }

    /// Drain the command queue: add first, then remove.
    fn apply_pending(&mut self, now: Tick) -> (Option<AgentId>, Option<Removal>, usize) {
        let (add, remove) = self.pending.take();

        let added = if add { Some(self.add_agent()) } else { None };

        let mut rejected = 0;
        let removed = match remove {
            None => None,
            Some(target) => {
                let result = match target {
                    RemoveTarget::Random   => self.remove_random_agent(),
                    RemoveTarget::Agent(id) => self.remove_agent(id),
                };
                match result {
                    Ok(removal) => Some(removal),
                    Err(e) => {
                        tracing::warn!(tick = %now, "queued removal ignored: {e}");
                        rejected += 1;
                        None
                    }
                }
            }
        };

        (added, removed, rejected)
    }
}
