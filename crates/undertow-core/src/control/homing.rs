//! Bang-bang homing guidance.
//!
//! A torpedo binds one target at launch and never re-selects. Every tick the
//! controller thrusts, measures the bearing error to the target, turns one
//! agility step toward it, then lets the body integrate. There is no
//! dead-band: an error of exactly zero still produces a left turn, so a
//! torpedo on a perfect intercept course weaves around it.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::entity::EntityId;
use crate::kinematics::{bearing_error, KinematicBody, TurnDirection};

/// Guidance phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuidanceState {
    /// Target bound at launch, no update run yet
    Armed,
    /// Steering every tick
    Homing,
}

/// Guidance controller owned by a torpedo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomingController {
    target: EntityId,
    state: GuidanceState,
    target_lost: bool,
}

impl HomingController {
    /// Creates an armed controller bound to `target`.
    #[must_use]
    pub const fn new(target: EntityId) -> Self {
        Self {
            target,
            state: GuidanceState::Armed,
            target_lost: false,
        }
    }

    /// The bound target.
    #[must_use]
    pub const fn target(&self) -> EntityId {
        self.target
    }

    /// Current guidance phase.
    #[must_use]
    pub const fn state(&self) -> GuidanceState {
        self.state
    }

    /// Whether the last update could not resolve the target.
    #[must_use]
    pub const fn is_target_lost(&self) -> bool {
        self.target_lost
    }

    /// Turn decision for a bearing error in `[0, 360)`.
    ///
    /// Errors above 180° put the target on the right.
    #[must_use]
    pub fn steer(error: f32) -> TurnDirection {
        if error > 180.0 {
            TurnDirection::Right
        } else {
            TurnDirection::Left
        }
    }

    /// Runs one guidance tick on `body`.
    ///
    /// `target_position` is the bound target's current position, or `None`
    /// if it no longer resolves. Without a target the body still thrusts and
    /// integrates but does not turn. Returns the turn taken, if any.
    pub fn update(
        &mut self,
        body: &mut KinematicBody,
        target_position: Option<Vec2>,
    ) -> Option<TurnDirection> {
        self.state = GuidanceState::Homing;
        body.accelerate();

        let turn = match target_position {
            Some(target) => {
                self.target_lost = false;
                let direction = Self::steer(bearing_error(body.position, body.heading, target));
                body.turn(direction);
                Some(direction)
            }
            None => {
                if !self.target_lost {
                    warn!(target_id = %self.target, "homing target no longer resolves");
                    self.target_lost = true;
                }
                None
            }
        };

        body.integrate();
        turn
    }
}
