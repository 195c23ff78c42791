//! Nearest-vessel target selection.

use glam::Vec2;

use crate::arena::Arena;
use crate::entity::EntityId;
use crate::error::{Result, SimError};

/// Picks the candidate closest to `origin` by squared distance.
///
/// `requester` is skipped wherever it appears among the candidates. Ties go
/// to the first minimal candidate in iteration order.
///
/// # Errors
///
/// Returns [`SimError::NoTargetAvailable`] when no candidate other than the
/// requester exists.
///
/// # Example
///
/// ```
/// use undertow_core::control::select_nearest;
/// use undertow_core::entity::EntityId;
/// use glam::Vec2;
///
/// let candidates = [
///     (EntityId::new(0), Vec2::new(0.0, 0.0)),
///     (EntityId::new(1), Vec2::new(10.0, 0.0)),
///     (EntityId::new(2), Vec2::new(3.0, 4.0)),
/// ];
/// let picked = select_nearest(EntityId::new(0), Vec2::ZERO, candidates)?;
/// assert_eq!(picked, EntityId::new(2));
/// # Ok::<(), undertow_core::SimError>(())
/// ```
pub fn select_nearest<I>(requester: EntityId, origin: Vec2, candidates: I) -> Result<EntityId>
where
    I: IntoIterator<Item = (EntityId, Vec2)>,
{
    let mut best: Option<(EntityId, f32)> = None;
    for (id, position) in candidates {
        if id == requester {
            continue;
        }
        let distance_sq = origin.distance_squared(position);
        match best {
            Some((_, best_sq)) if distance_sq >= best_sq => {}
            _ => best = Some((id, distance_sq)),
        }
    }
    best.map(|(id, _)| id)
        .ok_or(SimError::NoTargetAvailable { requester })
}

/// Selects the vessel nearest to `requester` among all vessels in the arena.
///
/// # Errors
///
/// Returns [`SimError::UnknownEntity`] if `requester` is not a vessel, or
/// [`SimError::NoTargetAvailable`] if it is the only one.
pub fn nearest_vessel(arena: &Arena, requester: EntityId) -> Result<EntityId> {
    let origin = arena
        .get(requester)
        .filter(|entity| entity.is_vessel())
        .map(|entity| entity.body().position)
        .ok_or(SimError::UnknownEntity(requester))?;

    select_nearest(
        requester,
        origin,
        arena
            .vessels()
            .map(|(id, vessel)| (id, vessel.body.position)),
    )
}
