//! Population commands issued by the input side.

use flock_core::AgentId;

/// A population change requested from outside the simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PopulationCommand {
    /// Append one agent at the origin with a random velocity.
    AddAgent,
    /// Swap-remove a uniformly chosen agent.
    RemoveRandomAgent,
    /// Swap-remove the agent currently at this index.
    RemoveAgent(AgentId),
}

/// Which agent a pending removal targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RemoveTarget {
    Random,
    Agent(AgentId),
}

/// Commands waiting for the end of the current tick.
///
/// Edge-triggered: at most one add and one remove are applied per tick.
/// Repeated adds coalesce; a later remove replaces an earlier one.  They
/// are applied add first, then remove, so "add, then remove the new last
/// index" works within a single tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandQueue {
    add:    bool,
    remove: Option<RemoveTarget>,
}

impl CommandQueue {
    /// Queue `command`.  Returns `false` if it coalesced with (or replaced)
    /// a command of the same kind already pending this tick.
    pub fn push(&mut self, command: PopulationCommand) -> bool {
        match command {
            PopulationCommand::AddAgent => !std::mem::replace(&mut self.add, true),
            PopulationCommand::RemoveRandomAgent => {
                self.remove.replace(RemoveTarget::Random).is_none()
            }
            PopulationCommand::RemoveAgent(id) => {
                self.remove.replace(RemoveTarget::Agent(id)).is_none()
            }
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.add && self.remove.is_none()
    }

    /// Drain the queue, returning `(add, remove)`.
    pub fn take(&mut self) -> (bool, Option<RemoveTarget>) {
        let taken = std::mem::take(self);
        (taken.add, taken.remove)
    }
}
