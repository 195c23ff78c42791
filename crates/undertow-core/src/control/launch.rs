//! Reload-gated torpedo launches.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arena::Arena;
use crate::config::Tuning;
use crate::control::homing::HomingController;
use crate::control::targeting::nearest_vessel;
use crate::entity::{EntityId, TorpedoComponents};
use crate::error::{Result, SimError};
use crate::kinematics::{advance, KinematicBody};

/// Cooldown gate on a vessel's launcher.
///
/// The gate is open when `now_ms >= last_launch_ms + reload_ms`. The last
/// launch time starts at zero, so the first launch is possible once the
/// clock reaches one reload period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchPolicy {
    reload_ms: u64,
    last_launch_ms: u64,
}

impl LaunchPolicy {
    /// Creates a gate that has never fired.
    #[must_use]
    pub const fn new(reload_ms: u64) -> Self {
        Self {
            reload_ms,
            last_launch_ms: 0,
        }
    }

    /// Minimum time between launches.
    #[must_use]
    pub const fn reload_ms(&self) -> u64 {
        self.reload_ms
    }

    /// Time of the last successful launch.
    #[must_use]
    pub const fn last_launch_ms(&self) -> u64 {
        self.last_launch_ms
    }

    /// Whether a launch at `now_ms` would pass the gate.
    #[must_use]
    pub const fn is_ready(&self, now_ms: u64) -> bool {
        now_ms >= self.last_launch_ms.saturating_add(self.reload_ms)
    }

    /// Marks a launch at `now_ms`.
    pub fn record(&mut self, now_ms: u64) {
        self.last_launch_ms = now_ms;
    }
}

/// Attempts a launch from `vessel_id` at `now_ms`.
///
/// When the gate is open, builds a torpedo 32 units (the configured launch
/// offset) ahead of the vessel with its heading and speed, binds the nearest
/// other vessel as target, and records the launch on the vessel. The torpedo
/// is returned, not spawned: the caller merges it into the arena once the
/// current update pass is over.
///
/// A closed gate is not an error and yields `Ok(None)` with no state change.
///
/// # Errors
///
/// - [`SimError::UnknownEntity`] if `vessel_id` is not a vessel.
/// - [`SimError::NoTargetAvailable`] if no other vessel exists. The launcher
///   is left untouched, so a later attempt can still succeed.
pub fn launch(
    arena: &mut Arena,
    vessel_id: EntityId,
    now_ms: u64,
    tuning: &Tuning,
) -> Result<Option<TorpedoComponents>> {
    let vessel = arena
        .get(vessel_id)
        .and_then(|entity| entity.as_vessel())
        .ok_or(SimError::UnknownEntity(vessel_id))?;

    if !vessel.launcher.is_ready(now_ms) {
        return Ok(None);
    }

    let owner = vessel.identity;
    let spawn_at = vessel.body.position
        + advance(Vec2::ZERO, tuning.torpedo.launch_offset, vessel.body.heading);
    let body = KinematicBody::new(
        spawn_at,
        vessel.body.heading,
        vessel.body.speed,
        tuning.torpedo.handling(),
        tuning.friction,
    );

    let target = nearest_vessel(arena, vessel_id)?;

    if let Some(vessel) = arena.get_mut(vessel_id).and_then(|e| e.as_vessel_mut()) {
        vessel.launcher.record(now_ms);
    }

    debug!(
        vessel = %vessel_id,
        %owner,
        target_id = %target,
        x = spawn_at.x,
        y = spawn_at.y,
        now_ms,
        "torpedo launched"
    );

    Ok(Some(TorpedoComponents {
        owner,
        launched_by: vessel_id,
        body,
        pivot: tuning.torpedo.pivot,
        guidance: HomingController::new(target),
        age_ticks: 0,
    }))
}
