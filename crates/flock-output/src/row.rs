//! Plain data row types written by output backends.

use flock_core::{AgentId, Tick};
use flock_agent::AgentSnapshot;
use flock_stage::OctantCounts;

/// Octant readout for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OctantCountRow {
    pub tick:       u64,
    pub population: u64,
    /// In `Octant::ALL` order.
    pub counts:     [u32; 8],
}

impl OctantCountRow {
    pub fn new(tick: Tick, population: usize, counts: &OctantCounts) -> Self {
        Self { tick: tick.0, population: population as u64, counts: *counts.as_array() }
    }
}

/// Kinematic state of one agent at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub tick:      u64,
    pub agent_id:  u32,
    pub visual_id: u64,
    pub position:  [f32; 3],
    pub velocity:  [f32; 3],
}

impl AgentSnapshotRow {
    pub fn new(tick: Tick, id: AgentId, agent: &AgentSnapshot) -> Self {
        Self {
            tick:      tick.0,
            agent_id:  id.0,
            visual_id: agent.transform.visual.0,
            position:  agent.position.to_array(),
            velocity:  agent.velocity.to_array(),
        }
    }
}
