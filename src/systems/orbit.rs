//! Satellites circling a parent entity.

use bevy::prelude::*;

use crate::components::{BoundingBox, Orbit, Position, Remove};

use super::FrameClock;

/// Centre of the parent's bounding box, or its position when it has none.
fn pivot(position: &Position, bounds: Option<&BoundingBox>) -> Vec2 {
    bounds.map_or(position.as_vec2(), |bbox| {
        Vec2::new(
            position.x + bbox.x + bbox.width / 2.0,
            position.y + bbox.y + bbox.height / 2.0,
        )
    })
}

/// Advances each satellite around its parent.
///
/// Satellites whose parent no longer exists are flagged for removal.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn orbit_children(
    clock: Res<FrameClock>,
    parents: Query<(&Position, Option<&BoundingBox>), Without<Orbit>>,
    mut satellites: Query<(
        Entity,
        &mut Orbit,
        &mut Position,
        Option<&BoundingBox>,
        Option<&mut Remove>,
    )>,
) {
    for (entity, mut orbit, mut position, bounds, remove) in &mut satellites {
        let Ok((parent_position, parent_bounds)) = parents.get(orbit.parent) else {
            if let Some(mut marker) = remove {
                if !marker.should_remove {
                    log::debug!("orbit parent {:?} of {entity:?} is gone", orbit.parent);
                    marker.should_remove = true;
                }
            }
            continue;
        };
        orbit.angle = orbit.speed.mul_add(clock.dt, orbit.angle) % std::f32::consts::TAU;
        let centre = pivot(parent_position, parent_bounds);
        let offset = Vec2::from_angle(orbit.angle) * orbit.radius;
        let half = bounds.map_or(Vec2::ZERO, |bbox| Vec2::new(bbox.width, bbox.height) / 2.0);
        let target = centre + offset - half;
        position.x = target.x;
        position.y = target.y;
    }
}
