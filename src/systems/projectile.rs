//! Projectile motion and deferred projectile spawning.
//!
//! Systems that want to fire push a [`ProjectileRequest`] into the
//! [`ProjectileInbox`]. The exclusive [`spawn_requested_projectiles`] system
//! drains it through the entity builder later in the same tick, so no system
//! spawns while iterating a query.

use bevy::prelude::*;

use crate::assets::AssetRegistry;
use crate::builder::{EntityBuilder, ProjectileSpec, VelocitySpec};
use crate::components::{BoundingBox, Position, Projectile, ProjectileMovement, Remove, Velocity};
use crate::constants::{ARC_GRAVITY, WAVE_PERIOD, WAVE_SPEED};
use crate::error::{ConfigError, FactoryError};
use crate::level::CollisionMap;

use super::FrameClock;

/// A projectile to spawn, centred on `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileRequest {
    pub origin: Vec2,
    pub velocity: Vec2,
    pub spec: ProjectileSpec,
}

/// Projectile requests awaiting the spawn pass.
#[derive(Resource, Default, Debug)]
pub struct ProjectileInbox {
    requests: Vec<ProjectileRequest>,
}

impl ProjectileInbox {
    pub fn push(&mut self, request: ProjectileRequest) {
        self.requests.push(request);
    }

    pub fn extend<I>(&mut self, requests: I)
    where
        I: IntoIterator<Item = ProjectileRequest>,
    {
        self.requests.extend(requests);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, ProjectileRequest> {
        self.requests.drain(..)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.requests.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Ages projectiles, detonates expired fuses, retires projectiles that
/// have left the level and applies each movement policy to the velocity.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn update_projectiles(
    clock: Res<FrameClock>,
    level: Option<Res<CollisionMap>>,
    mut projectiles: Query<(
        &mut Projectile,
        &mut Velocity,
        &Position,
        Option<&BoundingBox>,
        Option<&mut Remove>,
    )>,
) {
    let dt = clock.dt;
    let area = level
        .as_deref()
        .map(|map| Rect::from_corners(Vec2::ZERO, map.extent()));
    for (mut projectile, mut velocity, position, bounds, remove) in &mut projectiles {
        projectile.lifetime += dt;
        let detonated =
            projectile.detonate_time > 0.0 && projectile.lifetime >= projectile.detonate_time;
        let escaped = area.is_some_and(|extent| outside(extent, body(position, bounds)));
        if detonated || escaped {
            if let Some(mut marker) = remove {
                marker.should_remove = true;
            }
            continue;
        }
        match projectile.movement {
            ProjectileMovement::Normal => accelerate(&mut velocity, projectile.acceleration * dt),
            ProjectileMovement::Arc => velocity.dy += ARC_GRAVITY * dt,
            ProjectileMovement::Wave => {
                projectile.wave_timer += dt;
                if projectile.wave_timer >= WAVE_PERIOD {
                    projectile.wave_timer = 0.0;
                    projectile.wave_up = !projectile.wave_up;
                }
                velocity.dy = if projectile.wave_up {
                    WAVE_SPEED
                } else {
                    -WAVE_SPEED
                };
            }
        }
    }
}

fn body(position: &Position, bounds: Option<&BoundingBox>) -> Rect {
    let origin = position.as_vec2();
    let size = bounds.map_or(Vec2::ZERO, |found| Vec2::new(found.width, found.height));
    Rect::from_corners(origin, origin + size)
}

/// True when `body` shares no point with `area`.
fn outside(area: Rect, body: Rect) -> bool {
    body.max.x < area.min.x
        || body.min.x > area.max.x
        || body.max.y < area.min.y
        || body.min.y > area.max.y
}

/// Adds `amount` of speed along the current heading.
fn accelerate(velocity: &mut Velocity, amount: f32) {
    if amount.abs() < f32::EPSILON {
        return;
    }
    let heading = Vec2::new(velocity.dx, velocity.dy).normalize_or_zero();
    velocity.dx += heading.x * amount;
    velocity.dy += heading.y * amount;
}

/// Builds every queued projectile. Requests that fail are logged and
/// dropped.
pub fn spawn_requested_projectiles(world: &mut World) {
    let Some(mut inbox) = world.get_resource_mut::<ProjectileInbox>() else {
        return;
    };
    if inbox.is_empty() {
        return;
    }
    let requests: Vec<_> = inbox.drain().collect();
    for request in requests {
        if let Err(err) = spawn_projectile(world, request) {
            log::error!("dropping projectile request: {err}");
        }
    }
}

fn spawn_projectile(world: &mut World, request: ProjectileRequest) -> Result<Entity, FactoryError> {
    let region = world
        .get_resource::<AssetRegistry>()
        .ok_or(ConfigError::MissingRegistry)?
        .texture(&request.spec.texture_key)?;
    let key = request.spec.texture_key.clone();
    let speed = request.velocity.length();
    let entity = EntityBuilder::new()
        .projectile(request.spec)
        .position(
            request.origin.x - region.width / 2.0,
            request.origin.y - region.height / 2.0,
        )
        .velocity(VelocitySpec {
            dx: request.velocity.x,
            dy: request.velocity.y,
            speed,
        })
        .bounding_box(region.width, region.height)
        .texture(key, region)
        .remove()
        .build(world)?;
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Vec2::new(3.0, 4.0), 5.0, Vec2::new(6.0, 8.0))]
    #[case(Vec2::ZERO, 5.0, Vec2::ZERO)]
    fn acceleration_follows_heading(#[case] start: Vec2, #[case] amount: f32, #[case] expected: Vec2) {
        let mut velocity = Velocity {
            dx: start.x,
            dy: start.y,
            speed: 0.0,
        };
        accelerate(&mut velocity, amount);
        assert!((velocity.dx - expected.x).abs() < 1e-5);
        assert!((velocity.dy - expected.y).abs() < 1e-5);
    }

    fn flying_world(level: Option<CollisionMap>) -> World {
        let mut world = World::new();
        world.insert_resource(FrameClock {
            dt: 0.05,
            ..FrameClock::default()
        });
        if let Some(map) = level {
            world.insert_resource(map);
        }
        world
    }

    fn shot(world: &mut World, x: f32, movement: ProjectileMovement) -> Entity {
        world
            .spawn((
                Projectile {
                    movement,
                    ..Projectile::default()
                },
                Velocity {
                    dx: 30.0,
                    dy: 0.0,
                    speed: 30.0,
                },
                Position::new(x, 20.0),
                BoundingBox::sized(3.0, 3.0),
                Remove::default(),
            ))
            .id()
    }

    fn flagged(world: &World, entity: Entity) -> bool {
        world
            .get::<Remove>(entity)
            .is_some_and(|marker| marker.should_remove)
    }

    #[rstest]
    #[case(100.0, false)]
    #[case(238.0, false)]
    #[case(260.0, true)]
    #[case(-10.0, true)]
    fn projectiles_leaving_the_level_are_removed(#[case] x: f32, #[case] expected: bool) {
        let mut world = flying_world(Some(CollisionMap {
            tile_size: 8,
            width: 30,
            height: 17,
            objects: Vec::new(),
        }));
        let entity = shot(&mut world, x, ProjectileMovement::Normal);
        let mut schedule = Schedule::default();
        schedule.add_systems(update_projectiles);
        schedule.run(&mut world);
        assert_eq!(flagged(&world, entity), expected);
    }

    #[rstest]
    fn projectiles_without_a_level_are_never_culled() {
        let mut world = flying_world(None);
        let entity = shot(&mut world, -1000.0, ProjectileMovement::Normal);
        let mut schedule = Schedule::default();
        schedule.add_systems(update_projectiles);
        schedule.run(&mut world);
        assert!(!flagged(&world, entity));
    }

    #[rstest]
    fn wave_flips_vertical_direction_each_period() {
        let mut world = flying_world(None);
        let entity = shot(&mut world, 0.0, ProjectileMovement::Wave);
        let mut schedule = Schedule::default();
        schedule.add_systems(update_projectiles);
        let mut heading = Vec::new();
        for _ in 0..8 {
            schedule.run(&mut world);
            heading.extend(world.get::<Velocity>(entity).map(|found| found.dy));
        }
        let first = heading.first().copied().unwrap_or_default();
        let last = heading.last().copied().unwrap_or_default();
        assert!((first.abs() - WAVE_SPEED).abs() < f32::EPSILON);
        assert!(first * last < 0.0, "wave never turned: {heading:?}");
        let turns = heading
            .windows(2)
            .filter(|pair| pair.first().zip(pair.get(1)).is_some_and(|(a, b)| a * b < 0.0))
            .count();
        assert_eq!(turns, 1);
    }

    #[rstest]
    fn inbox_drains_in_order() {
        let mut inbox = ProjectileInbox::default();
        let first = ProjectileRequest {
            origin: Vec2::ZERO,
            velocity: Vec2::X,
            spec: ProjectileSpec::default(),
        };
        let second = ProjectileRequest {
            origin: Vec2::ONE,
            ..first.clone()
        };
        inbox.extend([first.clone(), second.clone()]);
        assert_eq!(inbox.len(), 2);
        let drained: Vec<_> = inbox.drain().collect();
        assert_eq!(drained, vec![first, second]);
        assert!(inbox.is_empty());
    }
}
