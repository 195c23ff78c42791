//! Test helper functions for setting up sessions and entities.

use glam::Vec2;

use crate::config::{SessionConfig, Tuning, VesselSpec};
use crate::control::{HelmBinding, HelmCommand, HomingController, KeyCode};
use crate::entity::{EntityId, Identity, TorpedoComponents, VesselComponents};
use crate::kinematics::{bearing_error, KinematicBody};
use crate::simulation::{Simulation, TickInput, TickReport};

// =============================================================================
// Scenario Setup
// =============================================================================

/// A vessel spec at `origin` facing 0° with keys `key_base..key_base + 5`.
pub fn vessel_spec(identity: u32, origin: Vec2, key_base: u32) -> VesselSpec {
    let keys: Vec<KeyCode> = (key_base..key_base + 5).map(KeyCode::new).collect();
    VesselSpec {
        identity: Identity::new(identity),
        origin,
        heading: 0.0,
        pivot: Vec2::new(55.0, 32.0),
        binding: HelmBinding::try_from(keys).expect("consecutive keys are distinct"),
    }
}

/// Shooter (identity 1) at the origin and target (identity 2) at (100, 0).
pub fn duel_config() -> SessionConfig {
    SessionConfig {
        tuning: Tuning::default(),
        vessels: vec![
            vessel_spec(1, Vec2::ZERO, 1),
            vessel_spec(2, Vec2::new(100.0, 0.0), 11),
        ],
    }
}

/// Builds the duel session and returns it with (shooter, target).
pub fn duel() -> (Simulation, EntityId, EntityId) {
    let sim = Simulation::from_config(&duel_config()).expect("duel config is valid");
    let ids = sim.arena().vessel_ids();
    (sim, ids[0], ids[1])
}

/// Milliseconds at `tick` for a 60 Hz session.
pub fn now_ms(tick: u64) -> u64 {
    tick * 1000 / 60
}

/// Fires from `vessel` at `now`, asserting exactly one torpedo came out.
pub fn fire(sim: &mut Simulation, vessel: EntityId, now: u64) -> EntityId {
    let report = sim.step(now, &TickInput::new().with(vessel, HelmCommand::FIRE));
    assert_eq!(report.launched.len(), 1, "expected one launch: {report:?}");
    report.launched[0].torpedo
}

/// Steps with no commands, `ticks` times, continuing the clock from `sim`.
pub fn run_idle(sim: &mut Simulation, ticks: u64) -> Vec<TickReport> {
    (0..ticks)
        .map(|_| {
            let tick = sim.tick();
            sim.step(now_ms(tick), &TickInput::new())
        })
        .collect()
}

// =============================================================================
// Entity Factory Functions
// =============================================================================

/// Reference-tuned vessel components at the origin.
pub fn reference_vessel(identity: u32) -> VesselComponents {
    reference_vessel_at(identity, Vec2::ZERO)
}

/// Reference-tuned vessel components at `position`.
pub fn reference_vessel_at(identity: u32, position: Vec2) -> VesselComponents {
    let spec = vessel_spec(identity, position, identity * 10);
    VesselComponents::from_spec(&spec, &Tuning::default()).expect("default tuning is valid")
}

/// Reference-tuned torpedo at rest at the origin, bound to `target`.
pub fn reference_torpedo(owner: u32, launched_by: EntityId, target: EntityId) -> TorpedoComponents {
    let tuning = Tuning::default();
    TorpedoComponents {
        owner: Identity::new(owner),
        launched_by,
        body: KinematicBody::new(
            Vec2::ZERO,
            0.0,
            0.0,
            tuning.torpedo.handling(),
            tuning.friction,
        ),
        pivot: tuning.torpedo.pivot,
        guidance: HomingController::new(target),
        age_ticks: 0,
    }
}

// =============================================================================
// State Accessors
// =============================================================================

/// Body of any entity; panics if missing.
pub fn body_of(sim: &Simulation, id: EntityId) -> KinematicBody {
    *sim.arena().get(id).expect("entity exists").body()
}

/// Torpedo components; panics if `id` is not a live torpedo.
pub fn torpedo_of(sim: &Simulation, id: EntityId) -> &TorpedoComponents {
    sim.arena()
        .get(id)
        .and_then(|e| e.as_torpedo())
        .expect("torpedo exists")
}

/// Bearing error of `torpedo` to its bound target, folded into (-180, 180].
pub fn signed_error(sim: &Simulation, torpedo: EntityId) -> f32 {
    let t = torpedo_of(sim, torpedo);
    let target = sim
        .arena()
        .position(t.guidance.target())
        .expect("target exists");
    let error = bearing_error(t.body.position, t.body.heading, target);
    if error > 180.0 {
        error - 360.0
    } else {
        error
    }
}
