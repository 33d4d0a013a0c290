//! Projectile record.

use bevy::prelude::*;

use crate::pool::Poolable;

/// Velocity update policy applied each tick by the projectile system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectileMovement {
    /// Straight line, optionally accelerating along its heading.
    #[default]
    Normal,
    /// Ballistic arc under projectile gravity.
    Arc,
    /// Zig-zag that flips vertical direction on a fixed period.
    Wave,
}

/// A fired projectile.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Projectile {
    pub damage: i32,
    pub knockback: f32,
    /// Fired by an enemy rather than the player.
    pub enemy: bool,
    /// Seconds after which the projectile bursts, `0.0` for never.
    pub detonate_time: f32,
    /// Speed gained per second along the heading.
    pub acceleration: f32,
    pub movement: ProjectileMovement,
    /// Seconds since spawn.
    pub lifetime: f32,
    pub texture_key: String,
    pub collides_with_terrain: bool,
    pub wave_timer: f32,
    /// Whether the wave is currently heading up.
    pub wave_up: bool,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            damage: 0,
            knockback: 0.0,
            enemy: false,
            detonate_time: 0.0,
            acceleration: 0.0,
            movement: ProjectileMovement::Normal,
            lifetime: 0.0,
            texture_key: String::new(),
            collides_with_terrain: true,
            wave_timer: 0.0,
            wave_up: false,
        }
    }
}

impl Poolable for Projectile {
    fn reset(&mut self) {
        let mut key = std::mem::take(&mut self.texture_key);
        key.clear();
        *self = Self {
            texture_key: key,
            ..Self::default()
        };
    }
}
