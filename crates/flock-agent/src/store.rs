//! Core agent storage: `AgentStore` (SoA buffers) and `AgentLanes` (the
//! split borrow handed to the stage passes).
//!
//! # Why private `Vec`s?
//!
//! Every buffer must stay exactly `len()` long, and index `i` must describe
//! the same agent in all four of them.  Only the store itself changes
//! lengths (`add`, `insert`, `remove`); everyone else gets slices.  The
//! stages receive an [`AgentLanes`] of fixed-length slices, so no pass can
//! grow or shrink a buffer, and because `lanes_mut` borrows the store
//! mutably, no population change can happen while a pass holds the lanes:
//!
//! ```ignore
//! // flock-sim tick (simplified):
//! let lanes = sim.agents.lanes_mut();
//! apply_boundary(lanes.position, lanes.acceleration, &volume, &walls);
//! // sim.agents.remove(..) here would not compile: `lanes` is still live.
//! ```

use flock_core::{AgentId, SimRng, Transform, VisualId};
use glam::Vec3;

use crate::{AgentError, AgentResult};

// ── AgentSnapshot / Removal ───────────────────────────────────────────────────

/// A copy of one agent's full state.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub position:     Vec3,
    pub velocity:     Vec3,
    pub acceleration: Vec3,
    pub transform:    Transform,
}

/// Outcome of a swap-remove.
///
/// Any external reference keyed by `AgentId` must be refreshed from this:
/// `removed.transform.visual` is gone for good, and if `moved_from` is
/// `Some(last)`, the agent formerly at `last` now lives at the removed index.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Removal {
    /// The index that was vacated (and possibly refilled).
    pub index:      AgentId,
    pub removed:    AgentSnapshot,
    pub moved_from: Option<AgentId>,
}

impl Removal {
    /// Visual handle of the agent that no longer exists.
    #[inline]
    pub fn visual(&self) -> VisualId {
        self.removed.transform.visual
    }
}

// ── AgentLanes ────────────────────────────────────────────────────────────────

/// Disjoint, fixed-length views of every buffer.
///
/// All four slices have the same length.  Passes destructure this to take
/// shared borrows of what they read and exclusive borrows of what they
/// write.
pub struct AgentLanes<'a> {
    pub position:     &'a mut [Vec3],
    pub velocity:     &'a mut [Vec3],
    pub acceleration: &'a mut [Vec3],
    pub transforms:   &'a mut [Transform],
}

impl AgentLanes<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        self.position.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// The `AgentId` value is the index into every buffer:
///
/// ```ignore
/// let p = store.positions()[agent.index()];  // O(1), cache-friendly
/// ```
#[derive(Clone, Debug)]
pub struct AgentStore {
    position:     Vec<Vec3>,
    velocity:     Vec<Vec3>,
    acceleration: Vec<Vec3>,
    transforms:   Vec<Transform>,

    /// Next handle to mint.  Never rewinds, so handles are never reused.
    next_visual: VisualId,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Empty store with room for `capacity` agents in every buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            position:     Vec::with_capacity(capacity),
            velocity:     Vec::with_capacity(capacity),
            acceleration: Vec::with_capacity(capacity),
            transforms:   Vec::with_capacity(capacity),
            next_visual:  VisualId(0),
        }
    }

    /// Number of agents.  Equals the length of every buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.position.len()
    }

    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.len() as u32).map(AgentId)
    }

    // ── Population changes ────────────────────────────────────────────────

    /// Append an agent at the origin with the given velocity and zero
    /// acceleration.  Returns its index.
    pub fn add(&mut self, velocity: Vec3) -> AgentId {
        self.insert(Vec3::ZERO, velocity)
    }

    /// Append an agent at `position` with `velocity` and zero acceleration.
    pub fn insert(&mut self, position: Vec3, velocity: Vec3) -> AgentId {
        let id = AgentId(self.len() as u32);
        let visual = self.next_visual;
        self.next_visual = visual.next();

        self.position.push(position);
        self.velocity.push(velocity);
        self.acceleration.push(Vec3::ZERO);
        self.transforms.push(Transform { position, ..Transform::at_origin(visual) });
        self.debug_assert_coherent();
        id
    }

    /// Append an agent at the origin with a velocity sampled uniformly from
    /// the unit ball.
    pub fn spawn(&mut self, rng: &mut SimRng) -> AgentId {
        let velocity = rng.inside_unit_sphere();
        self.add(velocity)
    }

    /// Swap-remove the agent at `id`.
    ///
    /// The last agent's data overwrites slot `id` in every buffer and the
    /// population shrinks by one.
    ///
    /// # Errors
    ///
    /// [`AgentError::IndexOutOfRange`] if `id >= len()` (including an empty
    /// store).  The store is left untouched.
    pub fn remove(&mut self, id: AgentId) -> AgentResult<Removal> {
        let len = self.len();
        let index = id.index();
        if index >= len {
            return Err(AgentError::IndexOutOfRange { index, len });
        }
        let last = len - 1;

        let removed = AgentSnapshot {
            position:     self.position.swap_remove(index),
            velocity:     self.velocity.swap_remove(index),
            acceleration: self.acceleration.swap_remove(index),
            transform:    self.transforms.swap_remove(index),
        };
        self.debug_assert_coherent();

        Ok(Removal {
            index: id,
            removed,
            moved_from: (index != last).then_some(AgentId(last as u32)),
        })
    }

    // ── Read access ───────────────────────────────────────────────────────

    /// Full state of one agent, or `None` if `id` is out of range.
    pub fn get(&self, id: AgentId) -> Option<AgentSnapshot> {
        let i = id.index();
        (i < self.len()).then(|| AgentSnapshot {
            position:     self.position[i],
            velocity:     self.velocity[i],
            acceleration: self.acceleration[i],
            transform:    self.transforms[i],
        })
    }

    /// Index currently holding the agent bound to `visual`.  O(n).
    pub fn find_visual(&self, visual: VisualId) -> Option<AgentId> {
        self.transforms
            .iter()
            .position(|t| t.visual == visual)
            .map(|i| AgentId(i as u32))
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.position
    }

    #[inline]
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocity
    }

    #[inline]
    pub fn accelerations(&self) -> &[Vec3] {
        &self.acceleration
    }

    /// Per-agent transforms for the rendering side.
    #[inline]
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    // ── Write access ──────────────────────────────────────────────────────

    /// Split the store into disjoint fixed-length slices for a stage pass.
    pub fn lanes_mut(&mut self) -> AgentLanes<'_> {
        AgentLanes {
            position:     &mut self.position,
            velocity:     &mut self.velocity,
            acceleration: &mut self.acceleration,
            transforms:   &mut self.transforms,
        }
    }

    /// Place an existing agent at `position`, moving its transform with it.
    ///
    /// # Errors
    ///
    /// [`AgentError::IndexOutOfRange`] if `id >= len()`.
    pub fn set_position(&mut self, id: AgentId, position: Vec3) -> AgentResult<()> {
        let len = self.len();
        let i = id.index();
        if i >= len {
            return Err(AgentError::IndexOutOfRange { index: i, len });
        }
        self.position[i] = position;
        self.transforms[i].position = position;
        Ok(())
    }

    // ── Invariants ────────────────────────────────────────────────────────

    #[inline]
    fn debug_assert_coherent(&self) {
        debug_assert_eq!(self.position.len(), self.velocity.len());
        debug_assert_eq!(self.position.len(), self.acceleration.len());
        debug_assert_eq!(self.position.len(), self.transforms.len());
    }
}

impl Default for AgentStore {
    fn default() -> Self {
        Self::new()
    }
}
