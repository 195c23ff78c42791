//! Arena module for the vessel/torpedo simulation.
//!
//! The Arena is the container for all entities in a session. It provides:
//! - Entity storage with deterministic iteration order (`BTreeMap`)
//! - Entity lifecycle management (spawn/despawn)
//! - Role-filtered views over vessels and torpedoes
//! - Simulation tick tracking
//!
//! # Determinism
//!
//! Entity IDs are monotonically increasing and never reused. Because vessels
//! are spawned at session setup, every vessel id is smaller than every
//! torpedo id, and id order doubles as the update order.
//!
//! # Example
//!
//! ```
//! use undertow_core::arena::Arena;
//! use undertow_core::config::SessionConfig;
//! use undertow_core::entity::{EntityInner, VesselComponents};
//! use glam::Vec2;
//!
//! let config = SessionConfig::reference();
//! let mut arena = Arena::new();
//! for spec in &config.vessels {
//!     let components = VesselComponents::from_spec(spec, &config.tuning)?;
//!     arena.spawn(EntityInner::Vessel(components));
//! }
//!
//! let ids: Vec<_> = arena.entity_ids_sorted().collect();
//! assert_eq!(ids.len(), 2);
//! assert_eq!(arena.position(ids[1]), Some(Vec2::new(640.0, 640.0)));
//! # Ok::<(), undertow_core::SimError>(())
//! ```

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityInner, TorpedoComponents, VesselComponents};

/// Session arena containing every vessel and torpedo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Monotonically increasing entity ID counter.
    next_id: u64,
    /// Entity storage with deterministic iteration order.
    entities: BTreeMap<EntityId, Entity>,
    /// Current simulation tick.
    tick: u64,
}

impl Arena {
    /// Creates a new empty arena at tick 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entities: BTreeMap::new(),
            tick: 0,
        }
    }

    /// Spawns a new entity and returns its freshly assigned ID.
    pub fn spawn(&mut self, inner: EntityInner) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, Entity::new(id, inner));
        id
    }

    /// Removes an entity, returning it if it existed.
    ///
    /// Torpedoes bound to a removed vessel keep its id and see the lookup
    /// fail from then on.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    /// Returns a reference to an entity by ID.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Returns a mutable reference to an entity by ID.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Current position of an entity of either role.
    #[must_use]
    pub fn position(&self, id: EntityId) -> Option<Vec2> {
        self.entities.get(&id).map(|e| e.body().position)
    }

    /// Returns an iterator over entity IDs in sorted order.
    pub fn entity_ids_sorted(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// Returns an iterator over entities in sorted order.
    pub fn entities_sorted(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Returns an iterator over mutable entities in sorted order.
    pub fn entities_sorted_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities.values_mut()
    }

    /// Vessels in id order.
    pub fn vessels(&self) -> impl Iterator<Item = (EntityId, &VesselComponents)> + '_ {
        self.entities
            .iter()
            .filter_map(|(id, e)| e.as_vessel().map(|v| (*id, v)))
    }

    /// Torpedoes in id order.
    pub fn torpedoes(&self) -> impl Iterator<Item = (EntityId, &TorpedoComponents)> + '_ {
        self.entities
            .iter()
            .filter_map(|(id, e)| e.as_torpedo().map(|t| (*id, t)))
    }

    /// Vessel ids in id order, collected so the caller may mutate the arena.
    #[must_use]
    pub fn vessel_ids(&self) -> Vec<EntityId> {
        self.vessels().map(|(id, _)| id).collect()
    }

    /// Torpedo ids in id order, collected so the caller may mutate the arena.
    #[must_use]
    pub fn torpedo_ids(&self) -> Vec<EntityId> {
        self.torpedoes().map(|(id, _)| id).collect()
    }

    /// Returns the number of entities in the arena.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the arena has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the current simulation tick.
    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Advances the simulation tick counter.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityTag;
    use crate::tests::{reference_torpedo, reference_vessel, reference_vessel_at};

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn new_arena_is_empty() {
            let arena = Arena::new();
            assert!(arena.is_empty());
            assert_eq!(arena.entity_count(), 0);
            assert_eq!(arena.current_tick(), 0);
        }

        #[test]
        fn spawn_assigns_monotonic_ids() {
            let mut arena = Arena::new();
            let a = arena.spawn(EntityInner::Vessel(reference_vessel(1)));
            let b = arena.spawn(EntityInner::Vessel(reference_vessel(2)));
            assert!(a < b);
            assert_eq!(arena.entity_count(), 2);
        }

        #[test]
        fn despawned_ids_are_not_reused() {
            let mut arena = Arena::new();
            let a = arena.spawn(EntityInner::Vessel(reference_vessel(1)));
            let removed = arena.despawn(a).unwrap();
            assert_eq!(removed.id(), a);
            assert!(arena.get(a).is_none());

            let b = arena.spawn(EntityInner::Vessel(reference_vessel(2)));
            assert_ne!(a, b);
            assert!(arena.position(a).is_none());
        }

        #[test]
        fn despawn_missing_is_none() {
            let mut arena = Arena::new();
            assert!(arena.despawn(EntityId::new(9)).is_none());
        }

        #[test]
        fn advance_tick_increments() {
            let mut arena = Arena::new();
            arena.advance_tick();
            arena.advance_tick();
            assert_eq!(arena.current_tick(), 2);
        }
    }

    mod view_tests {
        use super::*;

        fn mixed() -> (Arena, EntityId, EntityId, EntityId) {
            let mut arena = Arena::new();
            let v1 = arena.spawn(EntityInner::Vessel(reference_vessel_at(1, Vec2::ZERO)));
            let v2 = arena.spawn(EntityInner::Vessel(reference_vessel_at(
                2,
                Vec2::new(50.0, 60.0),
            )));
            let t = arena.spawn(EntityInner::Torpedo(reference_torpedo(1, v1, v2)));
            (arena, v1, v2, t)
        }

        #[test]
        fn role_views_split_entities() {
            let (arena, v1, v2, t) = mixed();
            assert_eq!(arena.vessel_ids(), vec![v1, v2]);
            assert_eq!(arena.torpedo_ids(), vec![t]);
        }

        #[test]
        fn sorted_iteration_matches_ids() {
            let (arena, v1, v2, t) = mixed();
            let ids: Vec<_> = arena.entity_ids_sorted().collect();
            assert_eq!(ids, vec![v1, v2, t]);
            let tags: Vec<_> = arena.entities_sorted().map(Entity::tag).collect();
            assert_eq!(
                tags,
                vec![EntityTag::Vessel, EntityTag::Vessel, EntityTag::Torpedo]
            );
        }

        #[test]
        fn position_reads_either_role() {
            let (arena, _, v2, t) = mixed();
            assert_eq!(arena.position(v2), Some(Vec2::new(50.0, 60.0)));
            assert!(arena.position(t).is_some());
        }

        #[test]
        fn mutation_through_sorted_iter() {
            let (mut arena, v1, _, _) = mixed();
            for entity in arena.entities_sorted_mut() {
                if let Some(vessel) = entity.as_vessel_mut() {
                    vessel.body.speed = 1.0;
                }
            }
            assert_eq!(arena.get(v1).unwrap().body().speed, 1.0);
        }
    }

    mod serialization_tests {
        use super::*;

        #[test]
        fn arena_roundtrip_preserves_ids() {
            let mut arena = Arena::new();
            arena.spawn(EntityInner::Vessel(reference_vessel(1)));
            arena.spawn(EntityInner::Vessel(reference_vessel(2)));
            arena.advance_tick();

            let json = serde_json::to_string(&arena).unwrap();
            let mut back: Arena = serde_json::from_str(&json).unwrap();
            assert_eq!(back, arena);

            // The id counter survives, so new ids keep increasing.
            let next = back.spawn(EntityInner::Vessel(reference_vessel(3)));
            assert_eq!(next, EntityId::new(2));
        }
    }
}
