//! Presentation snapshots.
//!
//! A [`Snapshot`] is everything a renderer needs to draw a tick: where each
//! entity is, which way it points, which player it belongs to, and the pivot
//! its sprite rotates around. Rotation and compositing themselves happen in
//! the presentation layer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::entity::{Entity, EntityId, EntityInner, EntityTag, Identity};

/// Drawable state of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Entity id
    pub id: EntityId,
    /// Vessel or torpedo
    pub tag: EntityTag,
    /// Player identity, shared by a vessel and its torpedoes
    pub identity: Identity,
    /// World position
    pub position: Vec2,
    /// Heading in degrees, as stored (not normalised)
    pub heading: f32,
    /// Sprite pivot offset
    pub pivot: Vec2,
}

impl From<&Entity> for EntitySnapshot {
    fn from(entity: &Entity) -> Self {
        let pivot = match entity.inner() {
            EntityInner::Vessel(vessel) => vessel.pivot,
            EntityInner::Torpedo(torpedo) => torpedo.pivot,
        };
        let body = entity.body();
        Self {
            id: entity.id(),
            tag: entity.tag(),
            identity: entity.inner().identity(),
            position: body.position,
            heading: body.heading,
            pivot,
        }
    }
}

/// Drawable state of the whole arena, in id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Ticks executed when the snapshot was taken
    pub tick: u64,
    /// Every entity, vessels first
    pub entities: Vec<EntitySnapshot>,
}

impl Snapshot {
    /// Captures the arena as it is now.
    #[must_use]
    pub fn capture(arena: &Arena) -> Self {
        Self {
            tick: arena.current_tick(),
            entities: arena.entities_sorted().map(EntitySnapshot::from).collect(),
        }
    }

    /// Entities with the given tag.
    pub fn with_tag(&self, tag: EntityTag) -> impl Iterator<Item = &EntitySnapshot> + '_ {
        self.entities.iter().filter(move |e| e.tag == tag)
    }
}
