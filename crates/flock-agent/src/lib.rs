//! `flock-agent`: Structure-of-Arrays agent storage for the `flock` simulator.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`store`]   | `AgentStore`, `AgentLanes`, `AgentSnapshot`, `Removal`         |
//! | [`builder`] | `AgentStoreBuilder` (fluent construction)                      |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `AgentSnapshot`.      |

pub mod builder;
pub mod error;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use error::{AgentError, AgentResult};
pub use store::{AgentLanes, AgentSnapshot, AgentStore, Removal};
