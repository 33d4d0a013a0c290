//! Enemy archetype table.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::assets::TextureRegion;
use crate::builder::{AttackSpec, EnemySpec, EntityBuilder, GravitySpec, VelocitySpec};
use crate::components::{EnemyAttackType, EnemyMovement, EnemyType, Tint};
use crate::config::PlayerData;
use crate::constants::{
    ALWAYS_ACTIVE, DEFAULT_ATTACK_DAMAGE, DEFAULT_ATTACK_RATE, DEFAULT_ATTACK_TEXTURE,
    DEFAULT_PROJECTILE_SPEED, DEFAULT_SPEED, ORBIT_SUFFIX, PERCENT_ORBIT_RADIUS,
    PERCENT_ORBIT_SPEED, PERCENT_SATELLITES,
};
use crate::error::FactoryError;

use super::{registry, SpawnRect, Spawned};

/// How a recipe sizes its bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxSize {
    Fixed { width: f32, height: f32 },
    /// The texture region shrunk by the given insets.
    FromTexture { inset_width: f32, inset_height: f32 },
}

impl BoxSize {
    #[must_use]
    pub fn resolve(self, region: TextureRegion) -> (f32, f32) {
        match self {
            Self::Fixed { width, height } => (width, height),
            Self::FromTexture {
                inset_width,
                inset_height,
            } => (
                (region.width - inset_width).max(0.0),
                (region.height - inset_height).max(0.0),
            ),
        }
    }
}

/// Source of an enemy's contact and projectile damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackDamage {
    Fixed(i32),
    /// As much as the player's full health.
    PlayerHp,
}

/// Parameters of one enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyRecipe {
    pub activation: f32,
    pub movement: EnemyMovement,
    pub attack_type: EnemyAttackType,
    pub damage: AttackDamage,
    pub attack_rate: f32,
    pub projectile_speed: f32,
    pub projectile_texture: &'static str,
    pub detonate_time: f32,
    pub projectile_acceleration: f32,
    pub health: i32,
    pub size: BoxSize,
    pub speed: f32,
    pub gravity: Option<GravitySpec>,
    pub status_effect: bool,
    /// Whether the spawn facing is recorded.
    pub faces: bool,
    pub visible: bool,
    pub jump: Option<f32>,
    pub knockback: bool,
    pub explode: bool,
    pub corporeal: Option<f32>,
    pub trap: bool,
    pub block: bool,
    /// Texture looked up instead of the archetype's own key.
    pub texture_variant: Option<&'static str>,
}

const BASE: EnemyRecipe = EnemyRecipe {
    activation: ALWAYS_ACTIVE,
    movement: EnemyMovement::None,
    attack_type: EnemyAttackType::None,
    damage: AttackDamage::Fixed(DEFAULT_ATTACK_DAMAGE),
    attack_rate: DEFAULT_ATTACK_RATE,
    projectile_speed: DEFAULT_PROJECTILE_SPEED,
    projectile_texture: DEFAULT_ATTACK_TEXTURE,
    detonate_time: 0.0,
    projectile_acceleration: 0.0,
    health: 1,
    size: BoxSize::Fixed {
        width: 8.0,
        height: 8.0,
    },
    speed: DEFAULT_SPEED,
    gravity: Some(GravitySpec::STANDARD),
    status_effect: true,
    faces: true,
    visible: true,
    jump: None,
    knockback: false,
    explode: false,
    corporeal: None,
    trap: false,
    block: false,
    texture_variant: None,
};

const fn sized(width: f32, height: f32) -> BoxSize {
    BoxSize::Fixed { width, height }
}

/// Recipe for `kind`, or `None` for the `None` sentinel.
#[must_use]
pub const fn enemy_recipe(kind: EnemyType) -> Option<EnemyRecipe> {
    let recipe = match kind {
        EnemyType::None => return None,
        EnemyType::EConstant => EnemyRecipe {
            activation: 150.0,
            attack_rate: 1.5,
            health: 1000,
            size: sized(7.0, 7.0),
            ..BASE
        },
        EnemyType::SquareRoot => EnemyRecipe {
            activation: 75.0,
            movement: EnemyMovement::Charge,
            damage: AttackDamage::Fixed(3),
            health: 3,
            size: sized(10.0, 8.0),
            speed: 60.0,
            ..BASE
        },
        EnemyType::Exists => EnemyRecipe {
            activation: 90.0,
            movement: EnemyMovement::Charge,
            damage: AttackDamage::PlayerHp,
            health: 2,
            size: sized(9.0, 13.0),
            speed: 75.0,
            ..BASE
        },
        EnemyType::Summation => EnemyRecipe {
            activation: 120.0,
            attack_type: EnemyAttackType::ShootOne,
            damage: AttackDamage::Fixed(2),
            projectile_texture: "p_dot4",
            attack_rate: 2.5,
            health: 2,
            size: sized(10.0, 13.0),
            ..BASE
        },
        EnemyType::BigPi => EnemyRecipe {
            activation: 120.0,
            attack_type: EnemyAttackType::ShootOne,
            damage: AttackDamage::Fixed(4),
            projectile_texture: "p_big_ll",
            attack_rate: 1.4,
            health: 4,
            size: sized(11.0, 13.0),
            ..BASE
        },
        EnemyType::In => EnemyRecipe {
            activation: 100.0,
            attack_type: EnemyAttackType::ShootOne,
            projectile_texture: "p_xor",
            attack_rate: 2.0,
            detonate_time: 2.0,
            health: 3,
            size: sized(11.0, 11.0),
            ..BASE
        },
        EnemyType::BigOmega => EnemyRecipe {
            activation: 150.0,
            attack_type: EnemyAttackType::SprayThree,
            damage: AttackDamage::Fixed(2),
            projectile_texture: "p_cup",
            attack_rate: 2.5,
            projectile_speed: 200.0,
            health: 3,
            size: sized(12.0, 13.0),
            faces: false,
            ..BASE
        },
        EnemyType::NaturalJoin => EnemyRecipe {
            activation: 100.0,
            movement: EnemyMovement::BackAndForth,
            damage: AttackDamage::Fixed(2),
            projectile_texture: "p_ltimes",
            explode: true,
            health: 4,
            size: sized(9.0, 7.0),
            speed: 30.0,
            knockback: true,
            ..BASE
        },
        EnemyType::BigPhi => EnemyRecipe {
            activation: 200.0,
            attack_type: EnemyAttackType::ShootAndQuake,
            damage: AttackDamage::Fixed(4),
            projectile_texture: "p_alpha",
            attack_rate: 1.5,
            projectile_speed: 60.0,
            explode: true,
            health: 10,
            size: sized(14.0, 16.0),
            jump: Some(150.0),
            ..BASE
        },
        EnemyType::Percent => EnemyRecipe {
            activation: 120.0,
            movement: EnemyMovement::BackAndForth,
            visible: false,
            health: 20,
            size: sized(10.0, 10.0),
            speed: 20.0,
            jump: Some(120.0),
            gravity: Some(GravitySpec::new(-480.0, -240.0)),
            knockback: true,
            ..BASE
        },
        EnemyType::Nabla => EnemyRecipe {
            activation: 140.0,
            damage: AttackDamage::Fixed(4),
            health: 1,
            gravity: Some(GravitySpec {
                gravity: -1200.0,
                terminal_velocity: -160.0,
                collide_with_map: false,
            }),
            size: BoxSize::FromTexture {
                inset_width: 4.0,
                inset_height: 0.0,
            },
            status_effect: false,
            faces: false,
            ..BASE
        },
        EnemyType::CIntegral => EnemyRecipe {
            activation: 120.0,
            attack_type: EnemyAttackType::ArcTwo,
            damage: AttackDamage::Fixed(4),
            projectile_texture: "p_succ",
            attack_rate: 2.0,
            projectile_speed: 80.0,
            projectile_acceleration: 80.0,
            corporeal: Some(2.0),
            health: 5,
            size: sized(8.0, 16.0),
            ..BASE
        },
        EnemyType::Because => EnemyRecipe {
            activation: 120.0,
            movement: EnemyMovement::BackAndForth,
            damage: AttackDamage::Fixed(2),
            projectile_texture: "p_because",
            projectile_speed: 60.0,
            trap: true,
            health: 100,
            size: sized(14.0, 12.0),
            speed: 20.0,
            texture_variant: Some("e_because0"),
            ..BASE
        },
        EnemyType::Block => EnemyRecipe {
            block: true,
            health: 15,
            gravity: None,
            ..BASE
        },
    };
    Some(recipe)
}

/// Spawns one enemy of `kind` at `rect`.
///
/// `Percent` also spawns its ring of orbiting satellites; the parent is
/// always the first entry of the returned list.
///
/// # Errors
/// Returns [`FactoryError::Config`] when a texture or colour is missing,
/// before anything is spawned, and [`FactoryError::Build`] when a recipe
/// produced an inconsistent entity.
pub fn spawn_enemy(
    world: &mut World,
    kind: EnemyType,
    rect: SpawnRect,
    facing_right: bool,
) -> Result<Spawned, FactoryError> {
    let Some(recipe) = enemy_recipe(kind) else {
        return Ok(Spawned::new());
    };
    let key = format!("e_{}", kind.type_str());
    let orbit_key = format!("{key}{ORBIT_SUFFIX}");
    let (region, tint, orbit_region) = {
        let assets = registry(world)?;
        let region = assets.texture(recipe.texture_variant.unwrap_or(key.as_str()))?;
        let tint = assets.color(&key)?;
        let orbit_region = if kind == EnemyType::Percent {
            Some(assets.texture(&orbit_key)?)
        } else {
            None
        };
        (region, tint, orbit_region)
    };
    let damage = match recipe.damage {
        AttackDamage::Fixed(amount) => amount,
        AttackDamage::PlayerHp => world
            .get_resource::<PlayerData>()
            .map_or_else(|| PlayerData::default().hp, |data| data.hp),
    };

    let (width, height) = recipe.size.resolve(region);
    let mut spec = EnemySpec::new(kind)
        .moving(recipe.movement)
        .attacking(recipe.attack_type);
    if !recipe.visible {
        spec = spec.hidden();
    }
    let mut builder = EntityBuilder::new()
        .enemy(spec)
        .activation(recipe.activation)
        .attack(AttackSpec {
            damage,
            rate: recipe.attack_rate,
            projectile_speed: recipe.projectile_speed,
            projectile_texture: recipe.projectile_texture.to_owned(),
            detonate_time: recipe.detonate_time,
            projectile_acceleration: recipe.projectile_acceleration,
        })
        .color(tint)
        .health(recipe.health)
        .bounding_box(width, height)
        .position(rect.x, rect.y)
        .velocity(VelocitySpec::with_speed(recipe.speed))
        .texture(key.as_str(), region)
        .remove();
    if recipe.status_effect {
        builder = builder.status_effect();
    }
    if recipe.faces {
        builder = builder.direction(facing_right);
    }
    if let Some(gravity) = recipe.gravity {
        builder = builder.gravity(gravity);
    }
    if let Some(impulse) = recipe.jump {
        builder = builder.jump(impulse);
    }
    if let Some(incorporeal_time) = recipe.corporeal {
        builder = builder.corporeal(incorporeal_time);
    }
    if recipe.knockback {
        builder = builder.knockback();
    }
    if recipe.explode {
        builder = builder.explode();
    }
    if recipe.trap {
        builder = builder.trap();
    }
    if recipe.block {
        builder = builder.block();
    }

    let parent = builder.build(world)?;
    let mut spawned = vec![parent];
    if let Some(satellite_region) = orbit_region {
        spawn_satellites(world, parent, rect, &orbit_key, satellite_region, tint, &mut spawned)?;
    }
    log::debug!(
        "spawned enemy `{}` as {} entities",
        kind.type_str(),
        spawned.len()
    );
    Ok(spawned)
}

/// Evenly spaced satellites around `parent`, starting one step past zero so
/// the last one sits at angle zero.
fn spawn_satellites(
    world: &mut World,
    parent: Entity,
    rect: SpawnRect,
    key: &str,
    region: TextureRegion,
    tint: Tint,
    spawned: &mut Spawned,
) -> Result<(), FactoryError> {
    let count = f32::from(PERCENT_SATELLITES);
    for step in 1..=PERCENT_SATELLITES {
        let angle = TAU * f32::from(step % PERCENT_SATELLITES) / count;
        let child = EntityBuilder::new()
            .enemy(
                EnemySpec::new(EnemyType::Percent)
                    .moving(EnemyMovement::Orbit)
                    .hidden(),
            )
            .activation(150.0)
            .attack(AttackSpec::default())
            .color(tint)
            .health(1)
            .bounding_box(6.0, 6.0)
            .position(rect.x, rect.y)
            .velocity(VelocitySpec::default())
            .texture(key, region)
            .orbit(parent, angle, PERCENT_ORBIT_SPEED, PERCENT_ORBIT_RADIUS)
            .remove()
            .build(world)?;
        spawned.push(child);
    }
    Ok(())
}
