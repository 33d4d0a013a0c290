//! Gravity, integration and enemy locomotion.

use bevy::prelude::*;

use crate::components::{
    Activation, BackAndForth, Enemy, EnemyMovement, Facing, Gravity, Player, Position,
    PreviousPosition, Velocity,
};

use super::FrameClock;

/// Records where each entity started the tick.
pub fn store_previous_positions(mut query: Query<(&Position, &mut PreviousPosition)>) {
    for (position, mut previous) in &mut query {
        previous.x = position.x;
        previous.y = position.y;
    }
}

/// Accelerates falling entities, never past their terminal velocity.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn apply_gravity(clock: Res<FrameClock>, mut query: Query<(&Gravity, &mut Velocity)>) {
    for (gravity, mut velocity) in &mut query {
        let dy = gravity.gravity.mul_add(clock.dt, velocity.dy);
        velocity.dy = dy.max(gravity.terminal_velocity);
    }
}

/// Integrates positions and turns patrolling entities around.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn move_entities(
    clock: Res<FrameClock>,
    mut query: Query<(&mut Position, &mut Velocity, Option<&mut BackAndForth>)>,
) {
    let dt = clock.dt;
    for (mut position, mut velocity, route) in &mut query {
        position.x = velocity.dx.mul_add(dt, position.x);
        position.y = velocity.dy.mul_add(dt, position.y);
        let Some(mut patrol) = route else {
            continue;
        };
        patrol.travelled += Vec2::new(velocity.dx, velocity.dy).length() * dt;
        if patrol.distance > 0.0 && patrol.travelled >= patrol.distance {
            patrol.travelled = 0.0;
            velocity.dx = -velocity.dx;
            velocity.dy = -velocity.dy;
        }
    }
}

/// Steers active walking enemies.
///
/// Chargers run at the player. Patrollers start moving in their patrol's
/// preferred direction, or along their facing when they have no patrol, and
/// are then left to [`move_entities`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn enemy_motion(
    player: Query<&Position, With<Player>>,
    mut enemies: Query<
        (
            &Enemy,
            &Activation,
            &Position,
            &mut Velocity,
            Option<&mut Facing>,
            Option<&BackAndForth>,
        ),
        Without<Player>,
    >,
) {
    let target = player.single().ok().map(|found| found.x);
    for (enemy, activation, position, mut velocity, facing, patrol) in &mut enemies {
        if !activation.active {
            continue;
        }
        match enemy.movement {
            EnemyMovement::Charge => {
                let Some(x) = target else {
                    continue;
                };
                let right = x >= position.x;
                velocity.dx = if right { velocity.speed } else { -velocity.speed };
                if let Some(mut current) = facing {
                    current.right = right;
                }
            }
            EnemyMovement::BackAndForth => {
                if velocity.dx.abs() < f32::EPSILON {
                    let positive = patrol.map_or_else(
                        || facing.as_deref().is_some_and(|current| current.right),
                        |route| route.positive,
                    );
                    velocity.dx = if positive { velocity.speed } else { -velocity.speed };
                }
            }
            EnemyMovement::None | EnemyMovement::Orbit => {}
        }
    }
}
