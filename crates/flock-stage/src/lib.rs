//! `flock-stage`: the four per-tick passes of the flock simulator.
//!
//! # Crate layout
//!
//! | Module        | Pass            | Reads               | Writes                         |
//! |---------------|-----------------|---------------------|--------------------------------|
//! | [`boundary`]  | BoundaryForce   | position            | acceleration (additive)        |
//! | [`flock`]     | FlockForce      | position, velocity  | acceleration (additive)        |
//! | [`integrate`] | Integrator      | all lanes           | position, velocity, transform; clears acceleration |
//! | [`octant`]    | OctantCounter   | position            | returns `OctantCounts`         |
//!
//! Each pass is a plain function over slices: one work item per agent
//! index, and each item writes only its own slot.  Ordering between passes
//! is the caller's job (see `flock-sim`); a pass returns only after every
//! item has finished.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                               |
//! |------------|------------------------------------------------------|
//! | `parallel` | Runs every pass as a Rayon parallel iterator.        |

pub mod boundary;
pub mod flock;
pub mod integrate;
pub mod octant;

#[cfg(test)]
mod tests;

pub use boundary::{apply_boundary, face_push, wall_accel};
pub use flock::{apply_flock, flock_accel};
pub use integrate::{IntegrateReport, apply_integrate, integrate_agent};
pub use octant::{Octant, OctantCounts, count_octants};
