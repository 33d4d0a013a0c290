//! ECS component types.
//!
//! Every record here is a plain data struct. Behaviour comes from which
//! records an entity carries and from the systems in [`crate::systems`]. All
//! of them are poolable; see [`crate::pool`].

mod enemy;
mod map_entity;
mod player;
mod projectile;
mod spatial;
mod vitals;

pub use enemy::{
    Attack, Block, Corporeal, Enemy, EnemyAttackType, EnemyMovement, EnemyType, Explode, Jump,
    Knockback, Orbit, Trap,
};
pub use map_entity::{
    AccelerationGate, Clamp, DamageBoost, ForceField, HealthPack, InvertSwitch, MapEntity,
    MapEntityType, Mirror, MovingPlatform, Orientation, Portal, SquareSwitch, ToggleTile,
};
pub use player::{Player, PlayerState};
pub use projectile::{Projectile, ProjectileMovement};
pub use spatial::{
    Activation, BackAndForth, BoundingBox, BoundingCircle, Facing, Gravity, Position,
    PreviousPosition, Remove, SpriteTexture, Tint, Velocity,
};
pub use vitals::{Health, StatusEffect, StatusEffectKind};

pooled_components! {
    Position,
    PreviousPosition,
    Velocity,
    Gravity,
    BoundingBox,
    BoundingCircle,
    Facing,
    SpriteTexture,
    Tint,
    Remove,
    Activation,
    BackAndForth,
    Health,
    StatusEffect,
    Enemy,
    Attack,
    Orbit,
    Jump,
    Knockback,
    Explode,
    Corporeal,
    Trap,
    Block,
    MapEntity,
    MovingPlatform,
    Portal,
    Clamp,
    HealthPack,
    Mirror,
    SquareSwitch,
    ToggleTile,
    ForceField,
    DamageBoost,
    InvertSwitch,
    AccelerationGate,
    Projectile,
    Player,
    PlayerState,
}
