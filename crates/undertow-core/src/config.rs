//! Session configuration and tuning constants.
//!
//! Every struct here deserialises with `#[serde(default)]` where a sensible
//! default exists, so a config file only needs to name what it changes. The
//! defaults reproduce the reference two-vessel session.
//!
//! # Example
//!
//! ```
//! use undertow_core::config::SessionConfig;
//!
//! let config = SessionConfig::reference();
//! assert_eq!(config.vessels.len(), 2);
//! assert!(config.validate().is_ok());
//! ```

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::control::{HelmBinding, KeyCode};
use crate::entity::Identity;
use crate::error::{ConfigError, Result};
use crate::kinematics::Handling;

/// Fractional speed loss per tick for every body ("water friction").
pub const DEFAULT_FRICTION: f32 = 0.05;

/// Nominal update rate of the reference session, in ticks per second.
pub const DEFAULT_TICK_RATE: u32 = 60;

/// Distance ahead of the vessel, along its heading, at which torpedoes spawn.
pub const DEFAULT_LAUNCH_OFFSET: f32 = 32.0;

/// Tuning for player vessels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HullTuning {
    /// Speed change per accelerate/decelerate command
    pub acceleration_step: f32,
    /// Degrees turned per turn command
    pub agility: f32,
    /// Minimum time between launches, milliseconds
    pub reload_ms: u64,
}

impl Default for HullTuning {
    fn default() -> Self {
        Self {
            acceleration_step: 0.15,
            agility: 1.0,
            reload_ms: 1000,
        }
    }
}

impl HullTuning {
    /// Thrust and turn authority for a vessel body.
    #[must_use]
    pub const fn handling(&self) -> Handling {
        Handling {
            acceleration_step: self.acceleration_step,
            agility: self.agility,
        }
    }
}

/// Tuning for homing torpedoes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorpedoTuning {
    /// Thrust added every tick
    pub acceleration_step: f32,
    /// Degrees turned per guidance decision
    pub agility: f32,
    /// Spawn distance ahead of the launching vessel
    pub launch_offset: f32,
    /// Sprite pivot offset for the presentation layer
    pub pivot: Vec2,
    /// Despawn torpedoes after this many homing ticks. `None` keeps them forever.
    pub max_age_ticks: Option<u64>,
}

impl Default for TorpedoTuning {
    fn default() -> Self {
        Self {
            acceleration_step: 0.35,
            agility: 5.0,
            launch_offset: DEFAULT_LAUNCH_OFFSET,
            pivot: Vec2::new(32.0, 15.0),
            max_age_ticks: None,
        }
    }
}

impl TorpedoTuning {
    /// Thrust and turn authority for a torpedo body.
    #[must_use]
    pub const fn handling(&self) -> Handling {
        Handling {
            acceleration_step: self.acceleration_step,
            agility: self.agility,
        }
    }
}

/// All physical tuning for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Friction coefficient shared by every body, in (0, 1)
    pub friction: f32,
    /// Vessel tuning
    pub hull: HullTuning,
    /// Torpedo tuning
    pub torpedo: TorpedoTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
            hull: HullTuning::default(),
            torpedo: TorpedoTuning::default(),
        }
    }
}

impl Tuning {
    /// Checks that every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when friction lies outside (0, 1) or
    /// a parameter is not finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(ConfigError::FrictionOutOfRange(self.friction).into());
        }
        let finite = [
            ("hull.acceleration_step", self.hull.acceleration_step),
            ("hull.agility", self.hull.agility),
            ("torpedo.acceleration_step", self.torpedo.acceleration_step),
            ("torpedo.agility", self.torpedo.agility),
            ("torpedo.launch_offset", self.torpedo.launch_offset),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteParameter(name).into());
            }
        }
        Ok(())
    }
}

/// Construction parameters for one vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselSpec {
    /// Identity token, unique within the session
    pub identity: Identity,
    /// Initial position
    pub origin: Vec2,
    /// Initial heading in degrees
    #[serde(default)]
    pub heading: f32,
    /// Sprite pivot offset; stored for the presentation layer only
    #[serde(default)]
    pub pivot: Vec2,
    /// Keys for turn-left, turn-right, accelerate, decelerate, fire
    pub binding: HelmBinding,
}

/// Construction parameters for a whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Physical tuning
    #[serde(default)]
    pub tuning: Tuning,
    /// Vessels, spawned in this order
    pub vessels: Vec<VesselSpec>,
}

impl SessionConfig {
    /// The reference two-vessel session.
    ///
    /// Vessel 1 starts at (64, 64) on the arrow keys with `m` to fire; vessel 2
    /// starts at (640, 640) on `a`/`d`/`w`/`s` with `q` to fire. Key codes are
    /// SDL keycodes.
    #[must_use]
    pub fn reference() -> Self {
        const PIVOT: Vec2 = Vec2::new(55.0, 32.0);
        Self {
            tuning: Tuning::default(),
            vessels: vec![
                VesselSpec {
                    identity: Identity::new(1),
                    origin: Vec2::new(64.0, 64.0),
                    heading: 0.0,
                    pivot: PIVOT,
                    binding: HelmBinding::from_distinct([
                        KeyCode::new(1_073_741_904),
                        KeyCode::new(1_073_741_903),
                        KeyCode::new(1_073_741_906),
                        KeyCode::new(1_073_741_905),
                        KeyCode::new(u32::from(b'm')),
                    ]),
                },
                VesselSpec {
                    identity: Identity::new(2),
                    origin: Vec2::new(640.0, 640.0),
                    heading: 0.0,
                    pivot: PIVOT,
                    binding: HelmBinding::from_distinct([
                        KeyCode::new(u32::from(b'a')),
                        KeyCode::new(u32::from(b'd')),
                        KeyCode::new(u32::from(b'w')),
                        KeyCode::new(u32::from(b's')),
                        KeyCode::new(u32::from(b'q')),
                    ]),
                },
            ],
        }
    }

    /// Validates tuning and vessel identities.
    ///
    /// Bindings are validated when they are built or deserialised, so they
    /// need no check here.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` on bad tuning or a repeated identity.
    pub fn validate(&self) -> Result<()> {
        self.tuning.validate()?;
        let mut seen = BTreeSet::new();
        for spec in &self.vessels {
            if !seen.insert(spec.identity) {
                return Err(ConfigError::DuplicateIdentity(spec.identity).into());
            }
        }
        Ok(())
    }
}
