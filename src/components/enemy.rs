//! Enemy archetypes and the records their recipes attach.

use bevy::prelude::*;

use crate::pool::Poolable;

/// Closed set of enemy archetypes. Map data names them by [`Self::type_str`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EnemyType {
    #[default]
    None,
    EConstant,
    SquareRoot,
    Exists,
    Summation,
    BigPi,
    In,
    BigOmega,
    NaturalJoin,
    BigPhi,
    Percent,
    Nabla,
    CIntegral,
    Because,
    Block,
}

impl EnemyType {
    /// Every spawnable archetype, `None` excluded.
    pub const ALL: [Self; 14] = [
        Self::EConstant,
        Self::SquareRoot,
        Self::Exists,
        Self::Summation,
        Self::BigPi,
        Self::In,
        Self::BigOmega,
        Self::NaturalJoin,
        Self::BigPhi,
        Self::Percent,
        Self::Nabla,
        Self::CIntegral,
        Self::Because,
        Self::Block,
    ];

    /// Stable lowercase name used in map data and asset keys.
    #[must_use]
    pub const fn type_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::EConstant => "e",
            Self::SquareRoot => "sqrt",
            Self::Exists => "exists",
            Self::Summation => "sum",
            Self::BigPi => "big_pi",
            Self::In => "in",
            Self::BigOmega => "big_omega",
            Self::NaturalJoin => "natural_join",
            Self::BigPhi => "big_phi",
            Self::Percent => "percent",
            Self::Nabla => "nabla",
            Self::CIntegral => "c_integral",
            Self::Because => "because",
            Self::Block => "block",
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

/// How an active enemy moves on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnemyMovement {
    #[default]
    None,
    /// Runs at the player at full speed.
    Charge,
    /// Walks along its facing, turning at ledges and walls.
    BackAndForth,
    /// Circles a parent enemy; see [`Orbit`].
    Orbit,
}

/// Projectile pattern an active enemy fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnemyAttackType {
    #[default]
    None,
    ShootOne,
    SprayThree,
    ArcTwo,
    ShootAndQuake,
}

impl EnemyAttackType {
    /// Number of projectiles released per volley.
    #[must_use]
    pub const fn volley(self) -> usize {
        match self {
            Self::None => 0,
            Self::ShootOne | Self::ShootAndQuake => 1,
            Self::ArcTwo => 2,
            Self::SprayThree => 3,
        }
    }
}

/// Marks an entity as an enemy of a given archetype.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Enemy {
    pub kind: EnemyType,
    pub movement: EnemyMovement,
    pub attack_type: EnemyAttackType,
}

/// Contact damage and projectile parameters.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Attack {
    pub damage: i32,
    /// Seconds between volleys.
    pub rate: f32,
    pub projectile_speed: f32,
    pub projectile_texture: String,
    /// Fuse for fired projectiles, `0.0` for none.
    pub detonate_time: f32,
    pub projectile_acceleration: f32,
    /// Seconds accumulated towards the next volley.
    pub timer: f32,
}

/// Circular motion around a parent enemy.
///
/// `parent` is a weak reference: the child never keeps the parent alive and
/// must check it still exists before use.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub parent: Entity,
    pub angle: f32,
    /// Radians per second.
    pub speed: f32,
    pub radius: f32,
}

impl Default for Orbit {
    fn default() -> Self {
        Self {
            parent: Entity::PLACEHOLDER,
            angle: 0.0,
            speed: 0.0,
            radius: 0.0,
        }
    }
}

/// Vertical launch speed used when the entity jumps.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Jump {
    pub impulse: f32,
}

/// Push applied to whatever this entity hits.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Knockback {
    pub strength: f32,
}

/// Bursts into particles on death.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Explode;

/// Periodically phases out of collision.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Corporeal {
    /// Seconds spent incorporeal per phase.
    pub incorporeal_time: f32,
}

/// Holds the player in place on contact.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trap;

/// Solid obstacle the player can stand on.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Block;

impl Poolable for Enemy {}
impl Poolable for Orbit {}
impl Poolable for Jump {}
impl Poolable for Knockback {}
impl Poolable for Explode {}
impl Poolable for Corporeal {}
impl Poolable for Trap {}
impl Poolable for Block {}

impl Poolable for Attack {
    fn reset(&mut self) {
        self.damage = 0;
        self.rate = 0.0;
        self.projectile_speed = 0.0;
        self.projectile_texture.clear();
        self.detonate_time = 0.0;
        self.projectile_acceleration = 0.0;
        self.timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn type_strings_round_trip() {
        for kind in EnemyType::ALL {
            assert_eq!(EnemyType::from_type_str(kind.type_str()), Some(kind));
        }
    }

    #[rstest]
    #[case("", Some(EnemyType::None))]
    #[case("theta", None)]
    fn unusual_type_strings(#[case] name: &str, #[case] expected: Option<EnemyType>) {
        assert_eq!(EnemyType::from_type_str(name), expected);
    }

    #[rstest]
    fn attack_reset_matches_default() {
        let mut attack = Attack {
            damage: 4,
            rate: 1.5,
            projectile_speed: 60.0,
            projectile_texture: "p_alpha".to_owned(),
            detonate_time: 2.0,
            projectile_acceleration: 80.0,
            timer: 0.7,
        };
        attack.reset();
        assert_eq!(attack, Attack::default());
    }
}
