//! Component structs for the two entity roles.
//!
//! The component structs hold all state for a particular role. Each owns its
//! [`KinematicBody`] exclusively; shared collections are reached through the
//! arena, never stored here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{Tuning, VesselSpec};
use crate::control::{HelmBinding, HomingController, LaunchPolicy};
use crate::entity::{EntityId, Identity};
use crate::error::Result;
use crate::kinematics::KinematicBody;

/// Components for Vessel entities.
///
/// Vessels are created once at session setup and live for the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselComponents {
    /// Player identity token
    pub identity: Identity,
    /// Physical state
    pub body: KinematicBody,
    /// Sprite pivot offset; carried for the presentation layer only
    pub pivot: Vec2,
    /// Key-to-command binding, validated at construction
    pub binding: HelmBinding,
    /// Reload gate for torpedo launches
    pub launcher: LaunchPolicy,
}

impl VesselComponents {
    /// Builds vessel components from a spec, at rest.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`](crate::SimError::InvalidConfiguration)
    /// if the tuning is degenerate.
    pub fn from_spec(spec: &VesselSpec, tuning: &Tuning) -> Result<Self> {
        tuning.validate()?;
        Ok(Self {
            identity: spec.identity,
            body: KinematicBody::new(
                spec.origin,
                spec.heading,
                0.0,
                tuning.hull.handling(),
                tuning.friction,
            ),
            pivot: spec.pivot,
            binding: spec.binding.clone(),
            launcher: LaunchPolicy::new(tuning.hull.reload_ms),
        })
    }
}

/// Components for Torpedo entities.
///
/// Torpedoes are created by a successful launch and, unless the optional
/// lifetime limit is configured, update forever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorpedoComponents {
    /// Identity token of the launching vessel
    pub owner: Identity,
    /// Entity that launched this torpedo
    pub launched_by: EntityId,
    /// Physical state
    pub body: KinematicBody,
    /// Sprite pivot offset; carried for the presentation layer only
    pub pivot: Vec2,
    /// Guidance state and bound target
    pub guidance: HomingController,
    /// Homing updates completed
    pub age_ticks: u64,
}
