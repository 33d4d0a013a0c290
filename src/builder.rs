//! Staged entity assembly.
//!
//! [`EntityBuilder`] collects component attachments in any order and only
//! touches the world in [`EntityBuilder::build`], which validates that every
//! component group implied by the attachments is present. `build` consumes
//! the builder, so a builder cannot be finalised twice.
//!
//! ```
//! use bevy::prelude::*;
//! use sigil::builder::{EntityBuilder, VelocitySpec};
//!
//! let mut world = World::new();
//! let entity = EntityBuilder::new()
//!     .position(16.0, 32.0)
//!     .velocity(VelocitySpec::default())
//!     .bounding_box(4.0, 4.0)
//!     .build(&mut world);
//! assert!(entity.is_ok());
//! ```

use bevy::prelude::*;

use crate::assets::TextureRegion;
use crate::components::{
    AccelerationGate, Activation, Attack, BackAndForth, Block, BoundingBox, BoundingCircle, Clamp,
    Corporeal, DamageBoost, Enemy, EnemyAttackType, EnemyMovement, EnemyType, Explode, Facing,
    ForceField, Gravity, Health, HealthPack, InvertSwitch, Jump, Knockback, MapEntity,
    MapEntityType, Mirror, MovingPlatform, Orbit, Orientation, Player, PlayerState, Portal,
    Position, PreviousPosition, Projectile, ProjectileMovement, Remove, SpriteTexture,
    SquareSwitch, StatusEffect, Tint, ToggleTile, Trap, Velocity,
};
use crate::constants::{
    ALWAYS_ACTIVE, DEFAULT_ATTACK_DAMAGE, DEFAULT_ATTACK_RATE, DEFAULT_ATTACK_TEXTURE,
    DEFAULT_GRAVITY, DEFAULT_KNOCKBACK, DEFAULT_PROJECTILE_SPEED, DEFAULT_SPEED,
    DEFAULT_TERMINAL_VELOCITY,
};
use crate::error::BuildError;
use crate::pool::{acquire_into, Poolable};

/// Velocity parameters. The default moves nowhere at [`DEFAULT_SPEED`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocitySpec {
    pub dx: f32,
    pub dy: f32,
    pub speed: f32,
}

impl Default for VelocitySpec {
    fn default() -> Self {
        Self {
            dx: 0.0,
            dy: 0.0,
            speed: DEFAULT_SPEED,
        }
    }
}

impl VelocitySpec {
    #[must_use]
    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn moving(dx: f32, dy: f32) -> Self {
        Self {
            dx,
            dy,
            ..Self::default()
        }
    }
}

/// Gravity parameters. The default is the standard fall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitySpec {
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub collide_with_map: bool,
}

impl GravitySpec {
    /// The standard fall, colliding with the map.
    pub const STANDARD: Self = Self {
        gravity: DEFAULT_GRAVITY,
        terminal_velocity: DEFAULT_TERMINAL_VELOCITY,
        collide_with_map: true,
    };

    #[must_use]
    pub const fn new(gravity: f32, terminal_velocity: f32) -> Self {
        Self {
            gravity,
            terminal_velocity,
            collide_with_map: true,
        }
    }
}

impl Default for GravitySpec {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Attack parameters. The default fires single-damage dots.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackSpec {
    pub damage: i32,
    pub rate: f32,
    pub projectile_speed: f32,
    pub projectile_texture: String,
    pub detonate_time: f32,
    pub projectile_acceleration: f32,
}

impl Default for AttackSpec {
    fn default() -> Self {
        Self {
            damage: DEFAULT_ATTACK_DAMAGE,
            rate: DEFAULT_ATTACK_RATE,
            projectile_speed: DEFAULT_PROJECTILE_SPEED,
            projectile_texture: DEFAULT_ATTACK_TEXTURE.to_owned(),
            detonate_time: 0.0,
            projectile_acceleration: 0.0,
        }
    }
}

/// Enemy identity and behaviour selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemySpec {
    pub kind: EnemyType,
    pub movement: EnemyMovement,
    pub attack_type: EnemyAttackType,
    pub visible: bool,
}

impl EnemySpec {
    #[must_use]
    pub const fn new(kind: EnemyType) -> Self {
        Self {
            kind,
            movement: EnemyMovement::None,
            attack_type: EnemyAttackType::None,
            visible: true,
        }
    }

    #[must_use]
    pub const fn moving(mut self, movement: EnemyMovement) -> Self {
        self.movement = movement;
        self
    }

    #[must_use]
    pub const fn attacking(mut self, attack_type: EnemyAttackType) -> Self {
        self.attack_type = attack_type;
        self
    }

    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Projectile parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSpec {
    pub damage: i32,
    pub knockback: f32,
    pub enemy: bool,
    pub detonate_time: f32,
    pub acceleration: f32,
    pub movement: ProjectileMovement,
    pub texture_key: String,
    pub collides_with_terrain: bool,
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self {
            damage: DEFAULT_ATTACK_DAMAGE,
            knockback: DEFAULT_KNOCKBACK,
            enemy: false,
            detonate_time: 0.0,
            acceleration: 0.0,
            movement: ProjectileMovement::Normal,
            texture_key: DEFAULT_ATTACK_TEXTURE.to_owned(),
            collides_with_terrain: true,
        }
    }
}

/// Behaviour payload of a map entity; at most one per entity.
#[derive(Debug, Clone, PartialEq)]
enum Mechanism {
    MovingPlatform,
    Portal(Portal),
    Clamp(Clamp),
    HealthPack(HealthPack),
    Mirror(Mirror),
    SquareSwitch(SquareSwitch),
    ToggleTile(ToggleTile),
    ForceField(ForceField),
    DamageBoost(DamageBoost),
    InvertSwitch,
    AccelerationGate(AccelerationGate),
}

/// Enemy-only traits without parameters beyond a single value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Traits {
    jump: Option<f32>,
    knockback: Option<f32>,
    corporeal: Option<f32>,
    explode: bool,
    trap: bool,
    block: bool,
}

/// Collects attachments for one entity.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct EntityBuilder {
    position: Option<Position>,
    velocity: Option<Velocity>,
    gravity: Option<Gravity>,
    bounding_box: Option<BoundingBox>,
    bounding_circle: Option<BoundingCircle>,
    facing: Option<Facing>,
    texture: Option<SpriteTexture>,
    tint: Option<Tint>,
    remove: bool,
    activation: Option<Activation>,
    back_and_forth: Option<BackAndForth>,
    health: Option<Health>,
    status_effect: bool,
    enemy: Option<EnemySpec>,
    attack: Option<AttackSpec>,
    orbit: Option<Orbit>,
    traits: Traits,
    map_entity: Option<MapEntity>,
    mechanism: Option<Mechanism>,
    projectile: Option<ProjectileSpec>,
    player: bool,
}

impl EntityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    pub const fn velocity(mut self, spec: VelocitySpec) -> Self {
        self.velocity = Some(Velocity {
            dx: spec.dx,
            dy: spec.dy,
            speed: spec.speed,
        });
        self
    }

    pub const fn gravity(mut self, spec: GravitySpec) -> Self {
        self.gravity = Some(Gravity {
            gravity: spec.gravity,
            terminal_velocity: spec.terminal_velocity,
            collide_with_map: spec.collide_with_map,
        });
        self
    }

    /// Box anchored at the entity's position.
    pub const fn bounding_box(mut self, width: f32, height: f32) -> Self {
        self.bounding_box = Some(BoundingBox::sized(width, height));
        self
    }

    /// Box offset from the entity's position.
    pub const fn bounding_box_at(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.bounding_box = Some(BoundingBox {
            x,
            y,
            width,
            height,
        });
        self
    }

    pub const fn bounding_circle(mut self, x: f32, y: f32, radius: f32) -> Self {
        self.bounding_circle = Some(BoundingCircle { x, y, radius });
        self
    }

    pub const fn direction(mut self, facing_right: bool) -> Self {
        self.facing = Some(Facing {
            right: facing_right,
        });
        self
    }

    pub fn texture(mut self, key: impl Into<String>, region: TextureRegion) -> Self {
        self.texture = Some(SpriteTexture {
            key: key.into(),
            width: region.width,
            height: region.height,
            visible: true,
        });
        self
    }

    pub const fn color(mut self, tint: Tint) -> Self {
        self.tint = Some(tint);
        self
    }

    /// Allows the cleanup system to destroy the entity.
    pub const fn remove(mut self) -> Self {
        self.remove = true;
        self
    }

    /// Proximity trigger; [`ALWAYS_ACTIVE`] starts active.
    pub fn activation(mut self, range: f32) -> Self {
        self.activation = Some(Activation::new(range));
        self
    }

    pub fn always_active(self) -> Self {
        self.activation(ALWAYS_ACTIVE)
    }

    pub const fn back_and_forth(mut self, distance: f32, positive: bool) -> Self {
        self.back_and_forth = Some(BackAndForth {
            distance,
            travelled: 0.0,
            positive,
        });
        self
    }

    /// Full health of `max_hp`.
    pub const fn health(mut self, max_hp: i32) -> Self {
        self.health = Some(Health::full(max_hp));
        self
    }

    pub const fn status_effect(mut self) -> Self {
        self.status_effect = true;
        self
    }

    pub const fn enemy(mut self, spec: EnemySpec) -> Self {
        self.enemy = Some(spec);
        self
    }

    pub fn attack(mut self, spec: AttackSpec) -> Self {
        self.attack = Some(spec);
        self
    }

    /// Circles `parent` starting at `angle` radians.
    pub const fn orbit(mut self, parent: Entity, angle: f32, speed: f32, radius: f32) -> Self {
        self.orbit = Some(Orbit {
            parent,
            angle,
            speed,
            radius,
        });
        self
    }

    pub const fn jump(mut self, impulse: f32) -> Self {
        self.traits.jump = Some(impulse);
        self
    }

    /// Knockback at [`DEFAULT_KNOCKBACK`].
    pub const fn knockback(mut self) -> Self {
        self.traits.knockback = Some(DEFAULT_KNOCKBACK);
        self
    }

    pub const fn explode(mut self) -> Self {
        self.traits.explode = true;
        self
    }

    pub const fn corporeal(mut self, incorporeal_time: f32) -> Self {
        self.traits.corporeal = Some(incorporeal_time);
        self
    }

    pub const fn trap(mut self) -> Self {
        self.traits.trap = true;
        self
    }

    pub const fn block(mut self) -> Self {
        self.traits.block = true;
        self
    }

    pub const fn map_entity(
        mut self,
        kind: MapEntityType,
        projectile_collidable: bool,
        map_collidable: bool,
    ) -> Self {
        self.map_entity = Some(MapEntity {
            kind,
            projectile_collidable,
            map_collidable,
        });
        self
    }

    pub fn moving_platform(mut self) -> Self {
        self.mechanism = Some(Mechanism::MovingPlatform);
        self
    }

    pub fn portal(mut self, id: i32, target: i32) -> Self {
        self.mechanism = Some(Mechanism::Portal(Portal { id, target }));
        self
    }

    pub fn clamp(mut self, right: bool, rect: Rect, acceleration: f32, back_velocity: f32) -> Self {
        self.mechanism = Some(Mechanism::Clamp(Clamp {
            right,
            rect,
            acceleration,
            back_velocity,
        }));
        self
    }

    pub fn health_pack(mut self, regen: i32, regen_time: f32) -> Self {
        self.mechanism = Some(Mechanism::HealthPack(HealthPack { regen, regen_time }));
        self
    }

    pub fn mirror(mut self, orientation: impl Into<String>) -> Self {
        self.mechanism = Some(Mechanism::Mirror(Mirror {
            orientation: Orientation(orientation.into()),
        }));
        self
    }

    pub fn square_switch(mut self, target_id: i32) -> Self {
        self.mechanism = Some(Mechanism::SquareSwitch(SquareSwitch {
            target_id,
            on: true,
        }));
        self
    }

    pub fn toggle_tile(mut self, id: i32, rect: Rect) -> Self {
        self.mechanism = Some(Mechanism::ToggleTile(ToggleTile { id, rect }));
        self
    }

    pub fn force_field(mut self, duration: f32) -> Self {
        self.mechanism = Some(Mechanism::ForceField(ForceField { duration }));
        self
    }

    pub fn damage_boost(mut self, damage: i32, duration: f32) -> Self {
        self.mechanism = Some(Mechanism::DamageBoost(DamageBoost { damage, duration }));
        self
    }

    pub fn invert_switch(mut self) -> Self {
        self.mechanism = Some(Mechanism::InvertSwitch);
        self
    }

    pub fn acceleration_gate(mut self, boost: f32, orientation: impl Into<String>) -> Self {
        self.mechanism = Some(Mechanism::AccelerationGate(AccelerationGate {
            boost,
            orientation: Orientation(orientation.into()),
        }));
        self
    }

    pub fn projectile(mut self, spec: ProjectileSpec) -> Self {
        self.projectile = Some(spec);
        self
    }

    pub const fn player(mut self) -> Self {
        self.player = true;
        self
    }

    /// Checks that every implied component group is present and every
    /// parameter is in range.
    ///
    /// # Errors
    /// Returns the first [`BuildError`] found.
    pub fn validate(&self) -> Result<(), BuildError> {
        let role = self.role();
        require(self.position.is_some(), role, "position")?;

        if self.enemy.is_some() {
            require(self.velocity.is_some(), "enemy", "velocity")?;
            require(self.bounding_box.is_some(), "enemy", "a bounding box")?;
            require(self.health.is_some(), "enemy", "health")?;
            require(self.texture.is_some(), "enemy", "a texture")?;
        }
        if self.map_entity.is_some() {
            require(
                self.bounding_box.is_some() || self.bounding_circle.is_some(),
                "map entity",
                "a bounding shape",
            )?;
            require(self.texture.is_some(), "map entity", "a texture")?;
        }
        if self.projectile.is_some() {
            require(self.velocity.is_some(), "projectile", "velocity")?;
            require(self.bounding_box.is_some(), "projectile", "a bounding box")?;
        }
        if self.player {
            require(self.health.is_some(), "player", "health")?;
            require(self.velocity.is_some(), "player", "velocity")?;
            require(self.bounding_box.is_some(), "player", "a bounding box")?;
            require(self.texture.is_some(), "player", "a texture")?;
        }
        require(
            self.gravity.is_none() || self.velocity.is_some(),
            "gravity",
            "velocity",
        )?;
        require(self.orbit.is_none() || self.enemy.is_some(), "orbit", "an enemy")?;
        require(self.attack.is_none() || self.enemy.is_some(), "attack", "an enemy")?;
        require(
            !self.status_effect || self.texture.is_some(),
            "status effect",
            "a texture",
        )?;
        require(
            self.mechanism.is_none() || self.map_entity.is_some(),
            "map mechanism",
            "a map entity",
        )?;
        require(
            self.back_and_forth.is_none() || self.velocity.is_some(),
            "back-and-forth",
            "velocity",
        )?;

        self.validate_parameters()
    }

    fn validate_parameters(&self) -> Result<(), BuildError> {
        if let Some(health) = self.health {
            if health.max_hp <= 0 {
                return Err(invalid("health", format!("max_hp {} must be positive", health.max_hp)));
            }
        }
        if let Some(bounds) = self.bounding_box {
            if bounds.width < 0.0 || bounds.height < 0.0 {
                return Err(invalid(
                    "bounding box",
                    format!("size {}x{} is negative", bounds.width, bounds.height),
                ));
            }
        }
        if let Some(circle) = self.bounding_circle {
            if circle.radius < 0.0 {
                return Err(invalid("bounding circle", format!("radius {} is negative", circle.radius)));
            }
        }
        if let Some(activation) = self.activation {
            if activation.range < 0.0 && !activation.is_unconditional() {
                return Err(invalid("activation", format!("range {} is negative", activation.range)));
            }
        }
        if let Some(attack) = &self.attack {
            if attack.rate <= 0.0 {
                return Err(invalid("attack", format!("rate {} must be positive", attack.rate)));
            }
        }
        Ok(())
    }

    fn role(&self) -> &'static str {
        if self.player {
            "player"
        } else if self.enemy.is_some() {
            "enemy"
        } else if self.map_entity.is_some() {
            "map entity"
        } else if self.projectile.is_some() {
            "projectile"
        } else {
            "entity"
        }
    }

    /// Validates, then spawns the entity with pooled component records.
    ///
    /// # Errors
    /// Returns a [`BuildError`] without touching `world` when validation
    /// fails.
    pub fn build(self, world: &mut World) -> Result<Entity, BuildError> {
        self.validate()?;
        let role = self.role();
        let entity = world.spawn_empty().id();

        if let Some(position) = self.position {
            attach(world, entity, position);
            attach(
                world,
                entity,
                PreviousPosition {
                    x: position.x,
                    y: position.y,
                },
            );
        }
        attach_opt(world, entity, self.velocity);
        attach_opt(world, entity, self.gravity);
        attach_opt(world, entity, self.bounding_box);
        attach_opt(world, entity, self.bounding_circle);
        attach_opt(world, entity, self.facing);
        attach_opt(world, entity, self.tint);
        attach_opt(world, entity, self.activation);
        attach_opt(world, entity, self.back_and_forth);
        attach_opt(world, entity, self.health);
        attach_opt(world, entity, self.orbit);
        if self.remove {
            attach(world, entity, Remove::default());
        }
        if self.status_effect {
            attach(world, entity, StatusEffect::default());
        }
        if let Some(mut texture) = self.texture {
            if let Some(spec) = self.enemy {
                texture.visible = spec.visible;
            }
            attach(world, entity, texture);
        }
        if let Some(spec) = self.enemy {
            attach(
                world,
                entity,
                Enemy {
                    kind: spec.kind,
                    movement: spec.movement,
                    attack_type: spec.attack_type,
                },
            );
        }
        if let Some(spec) = self.attack {
            attach(
                world,
                entity,
                Attack {
                    damage: spec.damage,
                    rate: spec.rate,
                    projectile_speed: spec.projectile_speed,
                    projectile_texture: spec.projectile_texture,
                    detonate_time: spec.detonate_time,
                    projectile_acceleration: spec.projectile_acceleration,
                    timer: 0.0,
                },
            );
        }
        attach_traits(world, entity, self.traits);
        attach_opt(world, entity, self.map_entity);
        if let Some(mechanism) = self.mechanism {
            attach_mechanism(world, entity, mechanism);
        }
        if let Some(spec) = self.projectile {
            attach(
                world,
                entity,
                Projectile {
                    damage: spec.damage,
                    knockback: spec.knockback,
                    enemy: spec.enemy,
                    detonate_time: spec.detonate_time,
                    acceleration: spec.acceleration,
                    movement: spec.movement,
                    texture_key: spec.texture_key,
                    collides_with_terrain: spec.collides_with_terrain,
                    ..Projectile::default()
                },
            );
        }
        if self.player {
            attach(world, entity, Player);
            attach(world, entity, PlayerState::default());
            if !self.status_effect {
                attach(world, entity, StatusEffect::default());
            }
        }

        if let Some(position) = self.position {
            log::debug!("spawned {role} {entity:?} at ({}, {})", position.x, position.y);
        }
        Ok(entity)
    }
}

fn require(present: bool, component: &'static str, requires: &'static str) -> Result<(), BuildError> {
    if present {
        Ok(())
    } else {
        Err(BuildError::MissingComponent {
            component,
            requires,
        })
    }
}

const fn invalid(component: &'static str, detail: String) -> BuildError {
    BuildError::InvalidParameter { component, detail }
}

fn attach<T: Component + Poolable + Clone>(world: &mut World, entity: Entity, value: T) {
    let record = acquire_into(world, value);
    world.entity_mut(entity).insert(record);
}

fn attach_opt<T: Component + Poolable + Clone>(world: &mut World, entity: Entity, value: Option<T>) {
    if let Some(record) = value {
        attach(world, entity, record);
    }
}

fn attach_traits(world: &mut World, entity: Entity, traits: Traits) {
    attach_opt(world, entity, traits.jump.map(|impulse| Jump { impulse }));
    attach_opt(
        world,
        entity,
        traits.knockback.map(|strength| Knockback { strength }),
    );
    attach_opt(
        world,
        entity,
        traits
            .corporeal
            .map(|incorporeal_time| Corporeal { incorporeal_time }),
    );
    if traits.explode {
        attach(world, entity, Explode);
    }
    if traits.trap {
        attach(world, entity, Trap);
    }
    if traits.block {
        attach(world, entity, Block);
    }
}

fn attach_mechanism(world: &mut World, entity: Entity, mechanism: Mechanism) {
    match mechanism {
        Mechanism::MovingPlatform => attach(world, entity, MovingPlatform),
        Mechanism::Portal(portal) => attach(world, entity, portal),
        Mechanism::Clamp(clamp) => attach(world, entity, clamp),
        Mechanism::HealthPack(pack) => attach(world, entity, pack),
        Mechanism::Mirror(mirror) => attach(world, entity, mirror),
        Mechanism::SquareSwitch(switch) => attach(world, entity, switch),
        Mechanism::ToggleTile(tile) => attach(world, entity, tile),
        Mechanism::ForceField(field) => attach(world, entity, field),
        Mechanism::DamageBoost(boost) => attach(world, entity, boost),
        Mechanism::InvertSwitch => attach(world, entity, InvertSwitch),
        Mechanism::AccelerationGate(gate) => attach(world, entity, gate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::init_pools;
    use crate::pool::ComponentPool;
    use rstest::{fixture, rstest};

    #[fixture]
    fn world() -> World {
        let mut world = World::new();
        init_pools(&mut world);
        world
    }

    fn region() -> TextureRegion {
        TextureRegion {
            width: 8.0,
            height: 8.0,
        }
    }

    fn minimal_enemy() -> EntityBuilder {
        EntityBuilder::new()
            .enemy(EnemySpec::new(EnemyType::SquareRoot))
            .position(0.0, 0.0)
            .velocity(VelocitySpec::default())
            .bounding_box(8.0, 8.0)
            .health(3)
            .texture("e_sqrt", region())
    }

    #[rstest]
    fn velocity_defaults_to_documented_speed(mut world: World) {
        let entity = minimal_enemy()
            .build(&mut world)
            .unwrap_or_else(|e| panic!("build failed: {e}"));
        let velocity = world
            .get::<Velocity>(entity)
            .unwrap_or_else(|| panic!("velocity missing"));
        assert!((velocity.speed - DEFAULT_SPEED).abs() < f32::EPSILON);
    }

    #[rstest]
    fn gravity_defaults_to_documented_fall(mut world: World) {
        let entity = minimal_enemy()
            .gravity(GravitySpec::default())
            .build(&mut world)
            .unwrap_or_else(|e| panic!("build failed: {e}"));
        let gravity = world
            .get::<Gravity>(entity)
            .unwrap_or_else(|| panic!("gravity missing"));
        assert!((gravity.gravity - DEFAULT_GRAVITY).abs() < f32::EPSILON);
        assert!((gravity.terminal_velocity - DEFAULT_TERMINAL_VELOCITY).abs() < f32::EPSILON);
    }

    #[rstest]
    #[case::no_velocity(
        EntityBuilder::new()
            .enemy(EnemySpec::new(EnemyType::In))
            .position(0.0, 0.0)
            .bounding_box(8.0, 8.0)
            .health(3)
            .texture("e_in", region()),
        "enemy",
        "velocity"
    )]
    #[case::gravity_without_velocity(
        EntityBuilder::new().position(0.0, 0.0).gravity(GravitySpec::default()),
        "gravity",
        "velocity"
    )]
    #[case::status_without_texture(
        EntityBuilder::new().position(0.0, 0.0).status_effect(),
        "status effect",
        "a texture"
    )]
    #[case::orbit_without_enemy(
        EntityBuilder::new().position(0.0, 0.0).orbit(Entity::PLACEHOLDER, 0.0, 1.0, 1.0),
        "orbit",
        "an enemy"
    )]
    #[case::map_entity_without_shape(
        EntityBuilder::new()
            .position(0.0, 0.0)
            .map_entity(MapEntityType::Portal, false, false)
            .texture("curly_brace_portal", region()),
        "map entity",
        "a bounding shape"
    )]
    fn missing_groups_are_rejected(
        mut world: World,
        #[case] builder: EntityBuilder,
        #[case] component: &'static str,
        #[case] requires: &'static str,
    ) {
        let before = world.entities().len();
        let result = builder.build(&mut world);
        assert_eq!(
            result,
            Err(BuildError::MissingComponent {
                component,
                requires
            })
        );
        assert_eq!(world.entities().len(), before);
    }

    #[rstest]
    fn missing_position_is_rejected(mut world: World) {
        let result = EntityBuilder::new().bounding_box(1.0, 1.0).build(&mut world);
        assert_eq!(
            result,
            Err(BuildError::MissingComponent {
                component: "entity",
                requires: "position"
            })
        );
    }

    #[rstest]
    #[case(EntityBuilder::new().position(0.0, 0.0).bounding_box(-1.0, 4.0))]
    #[case(minimal_enemy().health(0))]
    #[case(EntityBuilder::new().position(0.0, 0.0).activation(-3.0))]
    fn out_of_range_parameters_are_rejected(mut world: World, #[case] builder: EntityBuilder) {
        assert!(matches!(
            builder.build(&mut world),
            Err(BuildError::InvalidParameter { .. })
        ));
    }

    #[rstest]
    fn always_active_starts_active(mut world: World) {
        let entity = EntityBuilder::new()
            .position(0.0, 0.0)
            .always_active()
            .build(&mut world)
            .unwrap_or_else(|e| panic!("build failed: {e}"));
        let activation = world
            .get::<Activation>(entity)
            .unwrap_or_else(|| panic!("activation missing"));
        assert!(activation.active);
    }

    #[rstest]
    fn build_draws_from_pools(mut world: World) {
        world
            .resource_mut::<ComponentPool<SpriteTexture>>()
            .release(SpriteTexture {
                key: "stale".to_owned(),
                ..SpriteTexture::default()
            });
        let entity = minimal_enemy()
            .build(&mut world)
            .unwrap_or_else(|e| panic!("build failed: {e}"));
        let texture = world
            .get::<SpriteTexture>(entity)
            .unwrap_or_else(|| panic!("texture missing"));
        assert_eq!(texture.key, "e_sqrt");
        let pool = world.resource::<ComponentPool<SpriteTexture>>();
        assert_eq!(pool.stats(), (1, 1));
    }

    #[rstest]
    fn previous_position_starts_at_position(mut world: World) {
        let entity = EntityBuilder::new()
            .position(3.0, 4.0)
            .build(&mut world)
            .unwrap_or_else(|e| panic!("build failed: {e}"));
        assert_eq!(
            world.get::<PreviousPosition>(entity),
            Some(&PreviousPosition { x: 3.0, y: 4.0 })
        );
    }
}
