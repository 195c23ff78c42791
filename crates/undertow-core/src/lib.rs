//! # Undertow Core
//!
//! Deterministic simulation core for Undertow, a two-player vessel duel
//! with self-guided torpedoes.
//!
//! This crate holds the motion model, the player helm, and the homing
//! guidance. It performs no I/O and installs no logging subscriber; a front
//! end supplies commands and a clock and draws the resulting snapshots.
//!
//! ## Architecture
//!
//! - **Kinematics**: degree-based bodies with friction ([`kinematics`])
//! - **Entities**: vessels and torpedoes composed around a body ([`entity`])
//! - **Control**: helm, launch gate, targeting, homing ([`control`])
//! - **Simulation**: the fixed per-tick phase order ([`simulation`])
//!
//! ## Usage
//!
//! ```
//! use undertow_core::{HelmCommand, SessionConfig, Simulation, TickInput};
//!
//! let mut sim = Simulation::from_config(&SessionConfig::reference())?;
//! let shooter = sim.arena().vessel_ids()[0];
//!
//! let report = sim.step(1000, &TickInput::new().with(shooter, HelmCommand::FIRE));
//! assert_eq!(report.launched.len(), 1);
//!
//! let snapshot = sim.snapshot();
//! assert_eq!(snapshot.entities.len(), 3);
//! # Ok::<(), undertow_core::SimError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod config;
pub mod control;
pub mod entity;
pub mod error;
pub mod kinematics;
pub mod simulation;
pub mod snapshot;

pub use arena::Arena;
pub use config::{SessionConfig, Tuning, VesselSpec};
pub use control::{HelmBinding, HelmCommand, KeyCode};
pub use entity::{EntityId, EntityTag, Identity};
pub use error::{ConfigError, Result, SimError};
pub use simulation::{LaunchRecord, Simulation, TickInput, TickReport};
pub use snapshot::{EntitySnapshot, Snapshot};

#[cfg(test)]
mod tests;
