//! Simulation observer trait for diagnostics and data collection.

use flock_agent::AgentStore;
use flock_core::Tick;

use crate::TickReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: octant readout
///
/// ```rust,ignore
/// struct Readout;
///
/// impl SimObserver for Readout {
///     fn on_tick_end(&mut self, report: &TickReport) {
///         println!("instance num: {}", report.population);
///         println!("{}", report.octants);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any stage runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick's stages and population commands are done.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to every agent.
    ///
    /// Fires inside the tick, after the stages and before queued population
    /// commands, so the agents match the tick's `TickReport::population` and
    /// `octants`.  Runs before [`on_tick_end`][Self::on_tick_end].
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
