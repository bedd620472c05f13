//! `flock-sim`: tick loop orchestrator for the `flock` simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Boundary   wall repulsion into acceleration
//!   ② Flock      separation + alignment + cohesion into acceleration
//!   ③ Integrate  clamp speed, move, face heading, clear acceleration
//!   ④ Octants    count agents per sign octant
//!   ⑤ Commands   queued AddAgent, then queued RemoveRandomAgent / RemoveAgent
//! ```
//!
//! Stages ①–④ each run over every agent (in parallel with the `parallel`
//! feature) and complete before the next begins.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the stages on Rayon's thread pool (default).      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use flock_core::FlockConfig;
//! use flock_sim::{NoopObserver, PopulationCommand, SimBuilder};
//!
//! let mut sim = SimBuilder::new(FlockConfig::default()).build()?;
//! sim.request(PopulationCommand::AddAgent);
//! sim.run(&mut NoopObserver);
//! println!("{}", sim.octants());
//! ```

pub mod builder;
pub mod command;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use command::{CommandQueue, PopulationCommand, RemoveTarget};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, TickReport};
