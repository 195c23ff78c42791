//! Scripted command timelines.
//!
//! A script is a JSON list of entries. Each entry holds a command set on one
//! vessel for the half-open tick range `from_tick..to_tick`:
//!
//! ```json
//! [
//!   { "identity": 1, "from_tick": 0, "to_tick": 90, "commands": "ACCELERATE" },
//!   { "identity": 1, "from_tick": 60, "to_tick": 61, "commands": "FIRE | TURN_LEFT" }
//! ]
//! ```
//!
//! Overlapping entries for the same vessel are OR-ed together.

use std::ops::Range;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use undertow_core::{EntityId, HelmCommand, Identity, Simulation, TickInput};

/// One scripted command span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub identity: Identity,
    pub from_tick: u64,
    pub to_tick: u64,
    pub commands: HelmCommand,
}

/// A full script as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub entries: Vec<ScriptEntry>,
}

impl Script {
    /// Binds every entry to a vessel of `sim`.
    ///
    /// Fails on an identity no vessel carries, or on a reversed range.
    pub fn resolve(&self, sim: &Simulation) -> Result<Timeline> {
        let mut spans = Vec::with_capacity(self.entries.len());
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.from_tick > entry.to_tick {
                bail!(
                    "script entry {index}: from_tick {} is after to_tick {}",
                    entry.from_tick,
                    entry.to_tick
                );
            }
            let Some(vessel) = sim.vessel_by_identity(entry.identity) else {
                bail!("script entry {index}: no vessel with identity {}", entry.identity);
            };
            spans.push(Span {
                vessel,
                ticks: entry.from_tick..entry.to_tick,
                commands: entry.commands,
            });
        }
        Ok(Timeline { spans })
    }
}

#[derive(Debug, Clone)]
struct Span {
    vessel: EntityId,
    ticks: Range<u64>,
    commands: HelmCommand,
}

/// A script bound to entity ids, ready to produce per-tick input.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    spans: Vec<Span>,
}

impl Timeline {
    /// Commands active at `tick`.
    pub fn input_for(&self, tick: u64) -> TickInput {
        let mut input = TickInput::new();
        for span in self.spans.iter().filter(|s| s.ticks.contains(&tick)) {
            input.add(span.vessel, span.commands);
        }
        input
    }

    /// Last tick any span covers, if any.
    pub fn last_tick(&self) -> Option<u64> {
        self.spans
            .iter()
            .filter(|s| !s.ticks.is_empty())
            .map(|s| s.ticks.end - 1)
            .max()
    }
}
