//! Simulation module with the fixed per-tick phase order.
//!
//! `Simulation::step` runs one tick in these phases:
//!
//! 1. **HELM**: every vessel, in id order, applies its command set. A FIRE
//!    command runs the launch policy against the vessel's pre-move state and
//!    parks the new torpedo in a pending buffer.
//! 2. **VESSEL KINEMATICS**: every vessel applies friction, then advances.
//! 3. **MERGE**: pending torpedoes are spawned into the arena.
//! 4. **HOMING**: every torpedo, including those just merged, steers toward
//!    its target's post-move position.
//! 5. **LIFETIME**: torpedoes past the configured age are removed. Off
//!    unless `max_age_ticks` is set.
//! 6. **ADVANCE**: the tick counter moves on.
//!
//! No collection is mutated while it is being iterated: phases walk a
//! collected id list and re-resolve each entity.
//!
//! # Example
//!
//! ```
//! use undertow_core::config::SessionConfig;
//! use undertow_core::simulation::{Simulation, TickInput};
//!
//! let mut sim = Simulation::from_config(&SessionConfig::reference())?;
//! for tick in 0..10u64 {
//!     sim.step(tick * 1000 / 60, &TickInput::new());
//! }
//!
//! assert_eq!(sim.tick(), 10);
//! # Ok::<(), undertow_core::SimError>(())
//! ```

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, trace, warn};

use crate::arena::Arena;
use crate::config::{SessionConfig, Tuning, VesselSpec};
use crate::control::{apply_helm, launch, HelmCommand, KeyCode};
use crate::entity::{EntityId, EntityInner, Identity, TorpedoComponents, VesselComponents};
use crate::error::{ConfigError, Result, SimError};
use crate::snapshot::Snapshot;

// =============================================================================
// Tick input
// =============================================================================

/// Helm commands for one tick, keyed by vessel.
///
/// Vessels without an entry get an empty command set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    commands: BTreeMap<EntityId, HelmCommand>,
}

impl TickInput {
    /// Creates an input where no vessel receives a command.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the command set for `vessel`.
    pub fn set(&mut self, vessel: EntityId, command: HelmCommand) {
        self.commands.insert(vessel, command);
    }

    /// Adds `command` to whatever `vessel` already has this tick.
    pub fn add(&mut self, vessel: EntityId, command: HelmCommand) {
        *self.commands.entry(vessel).or_default() |= command;
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, vessel: EntityId, command: HelmCommand) -> Self {
        self.set(vessel, command);
        self
    }

    /// Command set for `vessel`.
    #[must_use]
    pub fn command_for(&self, vessel: EntityId) -> HelmCommand {
        self.commands.get(&vessel).copied().unwrap_or_default()
    }

    /// Returns true if no vessel has a non-empty command.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.values().all(|c| c.is_empty())
    }

    /// Maps one shared set of pressed keys through every vessel's binding.
    ///
    /// All vessels read the same keyboard state; each picks out its own keys.
    #[must_use]
    pub fn from_pressed_keys(arena: &Arena, pressed: &BTreeSet<KeyCode>) -> Self {
        let commands = arena
            .vessels()
            .map(|(id, vessel)| (id, vessel.binding.resolve(pressed)))
            .filter(|(_, command)| !command.is_empty())
            .collect();
        Self { commands }
    }
}

// =============================================================================
// Tick report
// =============================================================================

/// A torpedo spawned during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchRecord {
    /// Launching vessel
    pub vessel: EntityId,
    /// The new torpedo
    pub torpedo: EntityId,
}

/// Outcome of one [`Simulation::step`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Tick that was executed
    pub tick: u64,
    /// Torpedoes launched this tick, in vessel order
    pub launched: Vec<LaunchRecord>,
    /// Launch attempts that failed
    pub rejected: Vec<SimError>,
    /// Torpedoes removed by the lifetime limit
    pub expired: Vec<EntityId>,
}

// =============================================================================
// Simulation
// =============================================================================

/// Session orchestrator: owns the arena and the tuning it runs under.
#[derive(Debug, Clone)]
pub struct Simulation {
    arena: Arena,
    tuning: Tuning,
}

impl Simulation {
    /// Creates an empty session.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the tuning is degenerate.
    pub fn new(tuning: Tuning) -> Result<Self> {
        tuning.validate()?;
        Ok(Self {
            arena: Arena::new(),
            tuning,
        })
    }

    /// Creates a session and spawns every configured vessel, in order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the config fails validation.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        config.validate()?;
        let mut sim = Self::new(config.tuning)?;
        for spec in &config.vessels {
            sim.add_vessel(spec)?;
        }
        info!(
            vessels = config.vessels.len(),
            friction = config.tuning.friction,
            reload_ms = config.tuning.hull.reload_ms,
            "session ready"
        );
        Ok(sim)
    }

    /// Spawns a vessel at rest.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if another vessel already carries the
    /// same identity.
    pub fn add_vessel(&mut self, spec: &VesselSpec) -> Result<EntityId> {
        if self
            .arena
            .vessels()
            .any(|(_, vessel)| vessel.identity == spec.identity)
        {
            return Err(ConfigError::DuplicateIdentity(spec.identity).into());
        }
        let components = VesselComponents::from_spec(spec, &self.tuning)?;
        let id = self.arena.spawn(EntityInner::Vessel(components));
        debug!(vessel = %id, identity = %spec.identity, "vessel spawned");
        Ok(id)
    }

    /// Finds the vessel carrying `identity`.
    #[must_use]
    pub fn vessel_by_identity(&self, identity: Identity) -> Option<EntityId> {
        self.arena
            .vessels()
            .find(|(_, vessel)| vessel.identity == identity)
            .map(|(id, _)| id)
    }

    /// Executes one tick at time `now_ms`.
    ///
    /// `now_ms` only feeds the launch gate and must not go backwards.
    pub fn step(&mut self, now_ms: u64, input: &TickInput) -> TickReport {
        let tick = self.arena.current_tick();
        let mut report = TickReport {
            tick,
            ..TickReport::default()
        };

        // HELM
        let mut pending: Vec<(EntityId, TorpedoComponents)> = Vec::new();
        for id in self.arena.vessel_ids() {
            let command = input.command_for(id);
            let Some(vessel) = self.arena.get_mut(id).and_then(|e| e.as_vessel_mut()) else {
                continue;
            };
            if !apply_helm(&mut vessel.body, command) {
                continue;
            }
            match launch(&mut self.arena, id, now_ms, &self.tuning) {
                Ok(Some(torpedo)) => pending.push((id, torpedo)),
                Ok(None) => {}
                Err(err) => {
                    warn!(vessel = %id, error = %err, "launch rejected");
                    report.rejected.push(err);
                }
            }
        }

        // VESSEL KINEMATICS
        for entity in self.arena.entities_sorted_mut() {
            if let Some(vessel) = entity.as_vessel_mut() {
                vessel.body.integrate();
            }
        }

        // MERGE
        for (vessel, torpedo) in pending {
            let torpedo = self.arena.spawn(EntityInner::Torpedo(torpedo));
            report.launched.push(LaunchRecord { vessel, torpedo });
        }

        // HOMING
        for id in self.arena.torpedo_ids() {
            let Some(target) = self
                .arena
                .get(id)
                .and_then(|e| e.as_torpedo())
                .map(|t| t.guidance.target())
            else {
                continue;
            };
            let target_position = self
                .arena
                .get(target)
                .filter(|e| e.is_vessel())
                .map(|e| e.body().position);
            if let Some(torpedo) = self.arena.get_mut(id).and_then(|e| e.as_torpedo_mut()) {
                torpedo.guidance.update(&mut torpedo.body, target_position);
                torpedo.age_ticks += 1;
            }
        }

        // LIFETIME
        if let Some(max_age) = self.tuning.torpedo.max_age_ticks {
            let expired: Vec<EntityId> = self
                .arena
                .torpedoes()
                .filter(|(_, t)| t.age_ticks >= max_age)
                .map(|(id, _)| id)
                .collect();
            for id in expired {
                self.arena.despawn(id);
                debug!(torpedo = %id, max_age, "torpedo expired");
                report.expired.push(id);
            }
        }

        // ADVANCE
        self.arena.advance_tick();
        trace!(
            tick,
            now_ms,
            entities = self.arena.entity_count(),
            launched = report.launched.len(),
            "tick complete"
        );
        report
    }

    /// Captures the presentation state after the last step.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.arena)
    }

    /// Returns a read-only reference to the arena.
    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Returns a mutable reference to the arena.
    ///
    /// Meant for setup and for tests; avoid mutating mid-session.
    #[must_use]
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// The tuning this session runs under.
    #[must_use]
    pub const fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Number of ticks executed so far.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.arena.current_tick()
    }
}

// =============================================================================
// Tests
// =============================================================================
