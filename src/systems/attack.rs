//! Enemy projectile volleys.

use bevy::prelude::*;

use crate::builder::ProjectileSpec;
use crate::components::{
    Activation, Attack, Enemy, EnemyAttackType, Facing, Player, Position, ProjectileMovement,
    SpriteTexture,
};
use crate::constants::{ARC_LIFT, DEFAULT_KNOCKBACK, SPRAY_SPREAD};

use super::{FrameClock, ProjectileInbox, ProjectileRequest};

/// Horizontal direction an enemy fires in: its facing when it has one,
/// otherwise towards the player, otherwise left.
fn aim(position: Vec2, facing: Option<&Facing>, player: Option<Vec2>) -> f32 {
    if let Some(current) = facing {
        return current.sign();
    }
    match player {
        Some(target) if target.x > position.x => 1.0,
        _ => -1.0,
    }
}

/// Velocities and movement policies of one volley.
fn volley(kind: EnemyAttackType, direction: f32, speed: f32) -> Vec<(Vec2, ProjectileMovement)> {
    let forward = Vec2::new(direction * speed, 0.0);
    match kind {
        EnemyAttackType::None => Vec::new(),
        EnemyAttackType::ShootOne | EnemyAttackType::ShootAndQuake => {
            vec![(forward, ProjectileMovement::Normal)]
        }
        EnemyAttackType::SprayThree => [-SPRAY_SPREAD, 0.0, SPRAY_SPREAD]
            .into_iter()
            .map(|angle| (Vec2::from_angle(angle).rotate(forward), ProjectileMovement::Normal))
            .collect(),
        EnemyAttackType::ArcTwo => [1.0, 0.5]
            .into_iter()
            .map(|share| {
                (
                    Vec2::new(forward.x * share, speed * ARC_LIFT),
                    ProjectileMovement::Arc,
                )
            })
            .collect(),
    }
}

/// Advances attack timers of active shooters and queues their volleys.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn enemy_attack(
    clock: Res<FrameClock>,
    mut inbox: ResMut<ProjectileInbox>,
    player: Query<&Position, With<Player>>,
    mut shooters: Query<(
        &Enemy,
        &mut Attack,
        &Activation,
        &Position,
        Option<&SpriteTexture>,
        Option<&Facing>,
    )>,
) {
    let target = player.single().ok().map(|found| found.as_vec2());
    for (enemy, mut attack, activation, position, texture, facing) in &mut shooters {
        if !activation.active || enemy.attack_type.volley() == 0 {
            continue;
        }
        attack.timer += clock.dt;
        if attack.timer < attack.rate {
            continue;
        }
        attack.timer = 0.0;

        let half = texture.map_or(Vec2::ZERO, |sprite| Vec2::new(sprite.width, sprite.height) / 2.0);
        let origin = position.as_vec2() + half;
        let direction = aim(origin, facing, target);
        let shots = volley(enemy.attack_type, direction, attack.projectile_speed);
        log::debug!(
            "{:?} fires {} `{}`",
            enemy.kind,
            shots.len(),
            attack.projectile_texture
        );
        inbox.extend(shots.into_iter().map(|(velocity, movement)| ProjectileRequest {
            origin,
            velocity,
            spec: ProjectileSpec {
                damage: attack.damage,
                knockback: DEFAULT_KNOCKBACK,
                enemy: true,
                detonate_time: attack.detonate_time,
                acceleration: attack.projectile_acceleration,
                movement,
                texture_key: attack.projectile_texture.clone(),
                collides_with_terrain: true,
            },
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EnemyAttackType::ShootOne)]
    #[case(EnemyAttackType::SprayThree)]
    #[case(EnemyAttackType::ArcTwo)]
    #[case(EnemyAttackType::ShootAndQuake)]
    fn volley_sizes_match_pattern(#[case] kind: EnemyAttackType) {
        assert_eq!(volley(kind, 1.0, 45.0).len(), kind.volley());
    }

    #[rstest]
    fn spray_keeps_speed() {
        for (velocity, _) in volley(EnemyAttackType::SprayThree, -1.0, 200.0) {
            assert!((velocity.length() - 200.0).abs() < 1e-3);
            assert!(velocity.x < 0.0);
        }
    }

    #[rstest]
    #[case(None, Some(Vec2::new(50.0, 0.0)), 1.0)]
    #[case(None, Some(Vec2::new(-50.0, 0.0)), -1.0)]
    #[case(None, None, -1.0)]
    #[case(Some(Facing { right: true }), Some(Vec2::new(-50.0, 0.0)), 1.0)]
    fn aim_prefers_facing(
        #[case] facing: Option<Facing>,
        #[case] player: Option<Vec2>,
        #[case] expected: f32,
    ) {
        let direction = aim(Vec2::ZERO, facing.as_ref(), player);
        assert!((direction - expected).abs() < f32::EPSILON);
    }
}
