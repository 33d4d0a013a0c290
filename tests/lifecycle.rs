//! Entity lifecycle: builder defaults, hit point bounds, removal and pool
//! reuse.

use bevy::prelude::*;
use rstest::rstest;
use sigil::components::{
    Attack, EnemyAttackType, EnemyType, Gravity, Health, Remove, SpriteTexture, Velocity,
};
use sigil::constants::{
    DEFAULT_ATTACK_DAMAGE, DEFAULT_ATTACK_RATE, DEFAULT_GRAVITY, DEFAULT_SPEED,
    DEFAULT_TERMINAL_VELOCITY,
};
use sigil::factory::{spawn_enemy, SpawnRect};
use sigil::pool::ComponentPool;
use sigil::systems::cleanup_removed;
use sigil::{AttackSpec, EnemySpec, EntityBuilder, GravitySpec, TextureRegion, VelocitySpec};

const REGION: TextureRegion = TextureRegion {
    width: 8.0,
    height: 8.0,
};

fn shooter(world: &mut World, x: f32) -> Entity {
    EntityBuilder::new()
        .enemy(EnemySpec::new(EnemyType::Summation).attacking(EnemyAttackType::ShootOne))
        .position(x, 20.0)
        .velocity(VelocitySpec::default())
        .gravity(GravitySpec::default())
        .bounding_box(8.0, 8.0)
        .health(3)
        .texture("e_sum", REGION)
        .attack(AttackSpec::default())
        .remove()
        .build(world)
        .unwrap_or_else(|e| panic!("shooter build failed: {e}"))
}

#[rstest]
fn built_entities_carry_documented_defaults() {
    let mut world = test_utils::pooled_world(0.0);
    let entity = shooter(&mut world, 0.0);

    let velocity = world.get::<Velocity>(entity).copied();
    assert_eq!(velocity.map(|found| found.speed), Some(DEFAULT_SPEED));
    let gravity = world.get::<Gravity>(entity).copied();
    assert_eq!(
        gravity.map(|found| (found.gravity, found.terminal_velocity, found.collide_with_map)),
        Some((DEFAULT_GRAVITY, DEFAULT_TERMINAL_VELOCITY, true))
    );
    let attack = world.get::<Attack>(entity).cloned();
    assert_eq!(
        attack.map(|found| (found.damage, found.rate, found.projectile_texture)),
        Some((DEFAULT_ATTACK_DAMAGE, DEFAULT_ATTACK_RATE, "p_dot".to_owned()))
    );
    let health = world.get::<Health>(entity).copied();
    assert_eq!(health, Some(Health::full(3)));
}

#[rstest]
fn released_records_return_in_default_state() {
    let mut world = test_utils::pooled_world(0.0);
    let entity = shooter(&mut world, 0.0);
    if let Some(mut attack) = world.get_mut::<Attack>(entity) {
        attack.timer = 1.5;
        attack.projectile_texture.push_str("_scratch");
    }
    if let Some(mut remove) = world.get_mut::<Remove>(entity) {
        remove.should_remove = true;
    }

    cleanup_removed(&mut world);
    assert!(world.get_entity(entity).is_err());

    let mut attacks = world.resource_mut::<ComponentPool<Attack>>();
    assert_eq!(attacks.idle(), 1);
    assert_eq!(attacks.acquire(), Attack::default());
    let mut textures = world.resource_mut::<ComponentPool<SpriteTexture>>();
    assert_eq!(textures.acquire(), SpriteTexture::default());
}

#[rstest]
fn reused_records_carry_only_new_values() {
    let mut world = test_utils::pooled_world(0.0);
    let first = shooter(&mut world, 0.0);
    if let Some(mut remove) = world.get_mut::<Remove>(first) {
        remove.should_remove = true;
    }
    cleanup_removed(&mut world);

    let second = EntityBuilder::new()
        .position(1.0, 1.0)
        .texture("p_dot", TextureRegion { width: 3.0, height: 3.0 })
        .build(&mut world)
        .unwrap_or_else(|e| panic!("build failed: {e}"));
    let texture = world.get::<SpriteTexture>(second).cloned();
    assert_eq!(
        texture,
        Some(SpriteTexture {
            key: "p_dot".to_owned(),
            width: 3.0,
            height: 3.0,
            visible: true,
        })
    );
    let (acquired, reused) = world.resource::<ComponentPool<SpriteTexture>>().stats();
    assert_eq!((acquired, reused), (2, 1));
}

#[rstest]
fn removing_a_parent_removes_its_satellites() {
    let mut world = test_utils::pooled_world(0.0);
    let spawned = spawn_enemy(
        &mut world,
        EnemyType::Percent,
        SpawnRect::new(0.0, 0.0, 16.0, 16.0),
        true,
    )
    .unwrap_or_else(|e| panic!("{e}"));
    let parent = spawned.first().copied().unwrap_or(Entity::PLACEHOLDER);
    if let Some(mut remove) = world.get_mut::<Remove>(parent) {
        remove.should_remove = true;
    }
    cleanup_removed(&mut world);
    for entity in spawned {
        assert!(world.get_entity(entity).is_err(), "{entity:?} survived");
    }
}

#[rstest]
fn hit_points_stay_in_bounds_and_dead_enemies_vanish() {
    let mut app = test_utils::sigil_app(0.05);
    let enemy = shooter(app.world_mut(), 200.0);
    let healthy = shooter(app.world_mut(), 100.0);
    if let Some(mut health) = app.world_mut().get_mut::<Health>(healthy) {
        health.hp = 99;
    }
    if let Some(mut health) = app.world_mut().get_mut::<Health>(enemy) {
        health.hp = -4;
    }
    app.update();
    assert!(app.world().get_entity(enemy).is_err());
    let capped = app.world().get::<Health>(healthy).map(|health| health.hp);
    assert_eq!(capped, Some(3));
}
