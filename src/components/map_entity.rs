//! Map hazards and mechanisms.

use bevy::prelude::*;

use crate::pool::Poolable;

/// Closed set of map entity archetypes, named in map data by
/// [`Self::type_str`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MapEntityType {
    #[default]
    None,
    MovingPlatform,
    TemporaryPlatform,
    Portal,
    Clamp,
    HealthPack,
    Mirror,
    GravitySwitch,
    SquareSwitch,
    ToggleTile,
    ForceField,
    DamageBoost,
    InvertSwitch,
    AccelerationGate,
}

impl MapEntityType {
    /// Every spawnable archetype, `None` excluded.
    pub const ALL: [Self; 13] = [
        Self::MovingPlatform,
        Self::TemporaryPlatform,
        Self::Portal,
        Self::Clamp,
        Self::HealthPack,
        Self::Mirror,
        Self::GravitySwitch,
        Self::SquareSwitch,
        Self::ToggleTile,
        Self::ForceField,
        Self::DamageBoost,
        Self::InvertSwitch,
        Self::AccelerationGate,
    ];

    #[must_use]
    pub const fn type_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::MovingPlatform => "moving_platform",
            Self::TemporaryPlatform => "temporary_platform",
            Self::Portal => "portal",
            Self::Clamp => "clamp",
            Self::HealthPack => "health_pack",
            Self::Mirror => "mirror",
            Self::GravitySwitch => "gravity_switch",
            Self::SquareSwitch => "square_switch",
            Self::ToggleTile => "toggle_tile",
            Self::ForceField => "force_field",
            Self::DamageBoost => "damage_boost",
            Self::InvertSwitch => "invert_switch",
            Self::AccelerationGate => "acceleration_gate",
        }
    }

    /// Looks up an archetype by its type string. The empty string is `None`.
    #[must_use]
    pub fn from_type_str(name: &str) -> Option<Self> {
        if name.is_empty() {
            return Some(Self::None);
        }
        Self::ALL.into_iter().find(|kind| kind.type_str() == name)
    }
}

/// Tags a map entity and its collision participation.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapEntity {
    pub kind: MapEntityType,
    /// Projectiles test against this entity.
    pub projectile_collidable: bool,
    /// Other entities resolve against this one like a tile.
    pub map_collidable: bool,
}

/// Platform that carries entities standing on it.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovingPlatform;

/// Two-way teleporter.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Portal {
    pub id: i32,
    pub target: i32,
}

/// One jaw of a closing clamp.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Clamp {
    /// Whether this is the right-hand jaw.
    pub right: bool,
    /// Span the jaws close over, in world coordinates.
    pub rect: Rect,
    pub acceleration: f32,
    pub back_velocity: f32,
}

/// Pickup that restores health over time.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct HealthPack {
    pub regen: i32,
    /// Seconds the regeneration is spread over.
    pub regen_time: f32,
}

/// Orientation suffix shared by mirrors and acceleration gates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Orientation(pub String);

/// Surface that reflects projectiles.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Mirror {
    pub orientation: Orientation,
}

/// Switch that toggles every tile sharing `target_id`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquareSwitch {
    pub target_id: i32,
    pub on: bool,
}

/// Tile toggled by a [`SquareSwitch`].
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ToggleTile {
    pub id: i32,
    /// Collision rectangle, inset from the drawn tile.
    pub rect: Rect,
}

/// Barrier that blocks projectiles for a while.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ForceField {
    pub duration: f32,
}

/// Pickup granting bonus projectile damage.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageBoost {
    pub damage: i32,
    pub duration: f32,
}

/// Switch that inverts the player's controls.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvertSwitch;

/// Gate that boosts anything passing through.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AccelerationGate {
    pub boost: f32,
    pub orientation: Orientation,
}

impl Poolable for MapEntity {}
impl Poolable for MovingPlatform {}
impl Poolable for Portal {}
impl Poolable for Clamp {}
impl Poolable for HealthPack {}
impl Poolable for SquareSwitch {}
impl Poolable for ToggleTile {}
impl Poolable for ForceField {}
impl Poolable for DamageBoost {}
impl Poolable for InvertSwitch {}

impl Poolable for Mirror {
    fn reset(&mut self) {
        self.orientation.0.clear();
    }
}

impl Poolable for AccelerationGate {
    fn reset(&mut self) {
        self.boost = 0.0;
        self.orientation.0.clear();
    }
}
