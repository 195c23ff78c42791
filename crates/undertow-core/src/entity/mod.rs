//! Entity types for the vessel/torpedo simulation.
//!
//! This module provides:
//! - [`EntityId`]: Unique identifier for entities within an arena
//! - [`Identity`]: Player identity token shared by a vessel and its torpedoes
//! - [`EntityTag`]: Role classification, used for uniform presentation iteration
//! - [`EntityInner`]: Type-safe storage for role-specific components
//! - [`Entity`]: The complete entity container
//!
//! # Composition
//!
//! Both roles own a [`KinematicBody`] and add a small control component next
//! to it: vessels carry a helm binding and a launcher, torpedoes carry a
//! homing controller. The physics core never needs to treat the two roles
//! polymorphically.
//!
//! # Example
//!
//! ```
//! use undertow_core::config::SessionConfig;
//! use undertow_core::entity::{Entity, EntityId, EntityInner, EntityTag, VesselComponents};
//!
//! let config = SessionConfig::reference();
//! let components = VesselComponents::from_spec(&config.vessels[0], &config.tuning)?;
//! let vessel = Entity::new(EntityId::new(7), EntityInner::Vessel(components));
//!
//! assert_eq!(vessel.id().as_u64(), 7);
//! assert_eq!(vessel.tag(), EntityTag::Vessel);
//! # Ok::<(), undertow_core::SimError>(())
//! ```

pub mod components;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::kinematics::KinematicBody;

pub use components::{TorpedoComponents, VesselComponents};

/// Unique identifier for an entity.
///
/// Entity IDs are assigned monotonically by the arena and are never reused,
/// so a stale ID can only ever fail to resolve, never alias another entity.
///
/// # Example
///
/// ```
/// use undertow_core::entity::EntityId;
///
/// let id1 = EntityId::new(1);
/// let id2 = EntityId::new(2);
///
/// assert!(id1 < id2);
/// assert_eq!(id1.as_u64(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Player identity token.
///
/// Fixed when a vessel is created; every torpedo it launches carries the
/// same token. The presentation layer uses it to pick per-player assets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(u32);

impl Identity {
    /// Creates a new identity token.
    #[must_use]
    pub const fn new(token: u32) -> Self {
        Self(token)
    }

    /// Returns the raw token.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entity role tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    /// Player-driven vessel
    Vessel,
    /// Self-guided torpedo
    Torpedo,
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vessel => write!(f, "Vessel"),
            Self::Torpedo => write!(f, "Torpedo"),
        }
    }
}

/// Type-safe storage for role-specific components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityInner {
    /// Vessel components (body, helm binding, launcher)
    Vessel(VesselComponents),
    /// Torpedo components (body, homing controller)
    Torpedo(TorpedoComponents),
}

impl EntityInner {
    /// Returns the corresponding `EntityTag` for this inner storage.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        match self {
            Self::Vessel(_) => EntityTag::Vessel,
            Self::Torpedo(_) => EntityTag::Torpedo,
        }
    }

    /// Returns the kinematic body regardless of role.
    #[must_use]
    pub const fn body(&self) -> &KinematicBody {
        match self {
            Self::Vessel(c) => &c.body,
            Self::Torpedo(c) => &c.body,
        }
    }

    /// Returns the identity token regardless of role.
    #[must_use]
    pub const fn identity(&self) -> Identity {
        match self {
            Self::Vessel(c) => c.identity,
            Self::Torpedo(c) => c.owner,
        }
    }

    /// Returns a reference to the vessel components, if this is a vessel.
    #[must_use]
    pub const fn as_vessel(&self) -> Option<&VesselComponents> {
        match self {
            Self::Vessel(components) => Some(components),
            Self::Torpedo(_) => None,
        }
    }

    /// Returns a mutable reference to the vessel components, if this is a vessel.
    #[must_use]
    pub fn as_vessel_mut(&mut self) -> Option<&mut VesselComponents> {
        match self {
            Self::Vessel(components) => Some(components),
            Self::Torpedo(_) => None,
        }
    }

    /// Returns a reference to the torpedo components, if this is a torpedo.
    #[must_use]
    pub const fn as_torpedo(&self) -> Option<&TorpedoComponents> {
        match self {
            Self::Torpedo(components) => Some(components),
            Self::Vessel(_) => None,
        }
    }

    /// Returns a mutable reference to the torpedo components, if this is a torpedo.
    #[must_use]
    pub fn as_torpedo_mut(&mut self) -> Option<&mut TorpedoComponents> {
        match self {
            Self::Torpedo(components) => Some(components),
            Self::Vessel(_) => None,
        }
    }
}

/// A complete entity in the simulation.
///
/// The tag is derived from the inner storage, so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    inner: EntityInner,
}

impl Entity {
    /// Creates a new entity with the given ID and components.
    #[must_use]
    pub const fn new(id: EntityId, inner: EntityInner) -> Self {
        Self { id, inner }
    }

    /// Returns the entity's unique identifier.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the entity's role tag.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        self.inner.tag()
    }

    /// Returns a reference to the entity's inner component storage.
    #[must_use]
    pub const fn inner(&self) -> &EntityInner {
        &self.inner
    }

    /// Returns a mutable reference to the entity's inner component storage.
    #[must_use]
    pub fn inner_mut(&mut self) -> &mut EntityInner {
        &mut self.inner
    }

    /// Returns the entity's kinematic body.
    #[must_use]
    pub const fn body(&self) -> &KinematicBody {
        self.inner.body()
    }

    /// Returns `true` if this entity is a vessel.
    #[must_use]
    pub const fn is_vessel(&self) -> bool {
        matches!(self.inner, EntityInner::Vessel(_))
    }

    /// Returns `true` if this entity is a torpedo.
    #[must_use]
    pub const fn is_torpedo(&self) -> bool {
        matches!(self.inner, EntityInner::Torpedo(_))
    }

    /// Returns the vessel components if this is a vessel, `None` otherwise.
    #[must_use]
    pub const fn as_vessel(&self) -> Option<&VesselComponents> {
        self.inner.as_vessel()
    }

    /// Returns mutable vessel components if this is a vessel, `None` otherwise.
    #[must_use]
    pub fn as_vessel_mut(&mut self) -> Option<&mut VesselComponents> {
        self.inner.as_vessel_mut()
    }

    /// Returns the torpedo components if this is a torpedo, `None` otherwise.
    #[must_use]
    pub const fn as_torpedo(&self) -> Option<&TorpedoComponents> {
        self.inner.as_torpedo()
    }

    /// Returns mutable torpedo components if this is a torpedo, `None` otherwise.
    #[must_use]
    pub fn as_torpedo_mut(&mut self) -> Option<&mut TorpedoComponents> {
        self.inner.as_torpedo_mut()
    }
}
