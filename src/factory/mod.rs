//! Archetype recipes turning a type tag and a map rectangle into entities.
//!
//! Each archetype enum is dispatched through a closed `match` to exactly one
//! recipe. Recipes resolve every texture and colour up front, so a missing
//! asset aborts the spawn before anything reaches the world.

mod enemy;
mod map_entity;
mod properties;

use bevy::prelude::*;
use serde::Deserialize;

use crate::assets::AssetRegistry;
use crate::error::ConfigError;

pub use enemy::{enemy_recipe, spawn_enemy, AttackDamage, BoxSize, EnemyRecipe};
pub use map_entity::spawn_map_entity;
pub use properties::MapProperties;

/// Entities created by one factory call, parent first.
pub type Spawned = Vec<Entity>;

/// Object rectangle read from the map, lower-left origin.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SpawnRect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

fn registry(world: &World) -> Result<&AssetRegistry, ConfigError> {
    world
        .get_resource::<AssetRegistry>()
        .ok_or(ConfigError::MissingRegistry)
}
