//! `flock-core`: foundational types for the `flock` boids simulator.
//!
//! This crate is a dependency of every other `flock-*` crate.  It has no
//! `flock-*` dependencies and few external ones (`glam`, `rand`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                     |
//! |-----------------|--------------------------------------------------------------|
//! | [`ids`]         | `AgentId` (dense index), `VisualId` (stable render handle)   |
//! | [`time`]        | `Tick`, `SimClock`                                           |
//! | [`rng`]         | `SimRng` (process-wide stream)                               |
//! | [`config`]      | `FlockConfig`, `BoundaryVolume`, `WallRepulsion`, `FlockParams`, `SpeedLimit` |
//! | [`transform`]   | `Transform`, `look_rotation`                                 |
//! | [`error`]       | `FlockError`, `FlockResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod transform;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{BoundaryVolume, FlockConfig, FlockParams, SpeedLimit, WallRepulsion};
pub use error::{FlockError, FlockResult};
pub use ids::{AgentId, VisualId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
pub use transform::{Transform, look_rotation};

pub use glam::{Quat, Vec3};
