//! Level files and the synchronous level loader.
//!
//! A level is a JSON document with four object layers. Loading happens on a
//! `&mut World` before the first tick: the player, every enemy and every
//! map entity are built through the factories, and the collision rectangles
//! are stored in the [`CollisionMap`] resource for the external collision
//! layer.
//!
//! ```json
//! {
//!   "tile_size": 8, "width": 30, "height": 17,
//!   "layers": {
//!     "player": [{ "x": 16, "y": 16, "width": 7, "height": 7 }],
//!     "enemy": [{ "x": 64, "y": 16, "width": 8, "height": 8,
//!                 "properties": { "type": "sqrt", "facingRight": false } }]
//!   }
//! }
//! ```

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::assets::AssetRegistry;
use crate::builder::{EntityBuilder, GravitySpec, VelocitySpec};
use crate::components::{recycle_components, EnemyType, MapEntityType, StatusEffectKind};
use crate::config::PlayerData;
use crate::constants::{
    HP_BAR_BACKDROP_KEY, HP_BAR_BACKGROUND_KEY, HP_BAR_FILL_KEY, STATUS_EFFECT_KEY_PREFIX,
};
use crate::error::{ConfigError, FactoryError};
use crate::factory::{spawn_enemy, spawn_map_entity, MapProperties, SpawnRect, Spawned};

/// Texture and colour key of the player sprite.
pub const PLAYER_KEY: &str = "player";

const OBJECT_TYPE: &str = "type";
const ENEMY_FACING_RIGHT: &str = "facingRight";
const COLLISION_DAMAGE: &str = "damage";
const DEFAULT_OBJECT_TYPE: &str = "ground";

/// A rectangle object with its property bag.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LevelObject {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub properties: MapProperties,
}

impl LevelObject {
    #[must_use]
    pub const fn rect(&self) -> SpawnRect {
        SpawnRect::new(self.x, self.y, self.width, self.height)
    }
}

/// Object layers of a level. Absent layers are empty.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LevelLayers {
    /// The first rectangle is the player spawn.
    pub player: Vec<LevelObject>,
    pub collision: Vec<LevelObject>,
    pub enemy: Vec<LevelObject>,
    pub entity: Vec<LevelObject>,
}

/// A parsed level file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LevelMap {
    pub tile_size: u32,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    #[serde(default)]
    pub layers: LevelLayers,
}

impl LevelMap {
    /// Parses a level from JSON text. `origin` names the source in errors.
    ///
    /// # Errors
    /// Returns [`ConfigError::Json`] when the text is not a valid level.
    pub fn from_json(origin: &str, text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: origin.to_owned(),
            source,
        })
    }

    /// Reads a level file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] or [`ConfigError::Json`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&path.display().to_string(), &text)
    }
}

/// Static collision rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionObject {
    pub rect: Rect,
    /// Surface type tag, `ground` unless the map says otherwise.
    pub kind: String,
    /// Contact damage, zero for plain terrain.
    pub damage: i32,
}

/// Terrain of the loaded level, consumed by the external collision layer.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct CollisionMap {
    pub tile_size: u32,
    pub width: u32,
    pub height: u32,
    pub objects: Vec<CollisionObject>,
}

impl CollisionMap {
    /// Level size in world units.
    #[must_use]
    pub fn extent(&self) -> Vec2 {
        let tile = f32::from(u16::try_from(self.tile_size).unwrap_or(u16::MAX));
        let width = f32::from(u16::try_from(self.width).unwrap_or(u16::MAX));
        let height = f32::from(u16::try_from(self.height).unwrap_or(u16::MAX));
        Vec2::new(width * tile, height * tile)
    }
}

/// What [`load_level`] created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelSummary {
    pub player: Option<Entity>,
    /// Enemy entities, satellites included.
    pub enemies: usize,
    pub map_entities: usize,
    pub collision_objects: usize,
}

/// Overlay textures every level needs.
fn overlay_keys() -> impl Iterator<Item = String> {
    [HP_BAR_BACKDROP_KEY, HP_BAR_BACKGROUND_KEY, HP_BAR_FILL_KEY]
        .into_iter()
        .map(str::to_owned)
        .chain(
            [StatusEffectKind::Slow, StatusEffectKind::Stun]
                .into_iter()
                .map(|effect| format!("{STATUS_EFFECT_KEY_PREFIX}{}", effect.tag())),
        )
}

fn validate_overlays(world: &World) -> Result<(), ConfigError> {
    let assets = world
        .get_resource::<AssetRegistry>()
        .ok_or(ConfigError::MissingRegistry)?;
    for key in overlay_keys() {
        assets.texture(&key)?;
    }
    Ok(())
}

/// Builds the player at `spawn` from the [`PlayerData`] resource.
///
/// # Errors
/// Fails when the player texture or colour is missing or the data yields an
/// invalid entity.
pub fn spawn_player(world: &mut World, spawn: Vec2) -> Result<Entity, FactoryError> {
    let data = world
        .get_resource::<PlayerData>()
        .cloned()
        .unwrap_or_default();
    let (region, tint) = {
        let assets = world
            .get_resource::<AssetRegistry>()
            .ok_or(ConfigError::MissingRegistry)?;
        (assets.texture(PLAYER_KEY)?, assets.color(PLAYER_KEY)?)
    };
    let entity = EntityBuilder::new()
        .player()
        .position(spawn.x, spawn.y)
        .velocity(VelocitySpec::with_speed(data.speed))
        .gravity(GravitySpec::default())
        .bounding_box(data.width, data.height)
        .direction(true)
        .texture(PLAYER_KEY, region)
        .color(tint)
        .health(data.hp)
        .status_effect()
        .build(world)?;
    Ok(entity)
}

fn collision_objects(layer: &[LevelObject]) -> Result<Vec<CollisionObject>, ConfigError> {
    layer
        .iter()
        .map(|object| {
            Ok(CollisionObject {
                rect: object.rect().to_rect(),
                kind: object
                    .properties
                    .str_or(OBJECT_TYPE, DEFAULT_OBJECT_TYPE)?
                    .to_owned(),
                damage: object.properties.int_or(COLLISION_DAMAGE, 0)?,
            })
        })
        .collect()
}

fn spawn_objects(
    world: &mut World,
    map: &LevelMap,
    summary: &mut LevelSummary,
    spawned: &mut Spawned,
) -> Result<(), FactoryError> {
    let spawn = map
        .layers
        .player
        .first()
        .ok_or(ConfigError::MissingPlayerSpawn)?;
    let player = spawn_player(world, Vec2::new(spawn.x, spawn.y))?;
    spawned.push(player);
    summary.player = Some(player);

    for object in &map.layers.enemy {
        let name = object.properties.str_or(OBJECT_TYPE, "")?;
        let kind = EnemyType::from_type_str(name).ok_or_else(|| ConfigError::UnknownArchetype {
            layer: "enemy",
            name: name.to_owned(),
        })?;
        let facing_right = object.properties.bool_or(ENEMY_FACING_RIGHT, true)?;
        let entities = spawn_enemy(world, kind, object.rect(), facing_right)?;
        summary.enemies += entities.len();
        spawned.extend(entities);
    }

    for object in &map.layers.entity {
        let name = object.properties.str_or(OBJECT_TYPE, "")?;
        let kind =
            MapEntityType::from_type_str(name).ok_or_else(|| ConfigError::UnknownArchetype {
                layer: "entity",
                name: name.to_owned(),
            })?;
        let entities = spawn_map_entity(world, kind, object.rect(), &object.properties)?;
        summary.map_entities += entities.len();
        spawned.extend(entities);
    }
    Ok(())
}

/// Populates `world` from `map`.
///
/// The load is all-or-nothing: on error every entity created so far returns
/// its components to their pools and is despawned, and [`CollisionMap`] is
/// left as it was.
///
/// # Errors
/// Returns the first configuration or build error encountered.
pub fn load_level(world: &mut World, map: &LevelMap) -> Result<LevelSummary, FactoryError> {
    let result = try_load(world, map);
    if let Err(err) = &result {
        log::error!("level load failed: {err}");
    }
    result
}

fn try_load(world: &mut World, map: &LevelMap) -> Result<LevelSummary, FactoryError> {
    validate_overlays(world)?;
    let objects = collision_objects(&map.layers.collision)?;

    let mut summary = LevelSummary {
        collision_objects: objects.len(),
        ..LevelSummary::default()
    };
    let mut spawned = Spawned::new();
    if let Err(err) = spawn_objects(world, map, &mut summary, &mut spawned) {
        for entity in spawned {
            recycle_components(world, entity);
            world.despawn(entity);
        }
        return Err(err);
    }

    world.insert_resource(CollisionMap {
        tile_size: map.tile_size,
        width: map.width,
        height: map.height,
        objects,
    });
    log::info!(
        "loaded {}x{} level: {} enemies, {} map entities, {} collision rects",
        map.width,
        map.height,
        summary.enemies,
        summary.map_entities,
        summary.collision_objects
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn layers_default_to_empty() {
        let map = LevelMap::from_json("inline", r#"{ "tile_size": 8, "width": 4, "height": 2 }"#)
            .unwrap_or_else(|e| panic!("parse failed: {e}"));
        assert!(map.layers.enemy.is_empty());
        assert_eq!(map.tile_size, 8);
    }

    #[rstest]
    fn collision_properties_have_defaults() {
        let layer = vec![
            LevelObject {
                width: 8.0,
                height: 8.0,
                ..LevelObject::default()
            },
            LevelObject {
                properties: MapProperties::new().with("type", "spike").with("damage", 2),
                ..LevelObject::default()
            },
        ];
        let objects = collision_objects(&layer).unwrap_or_else(|e| panic!("{e}"));
        let tags: Vec<_> = objects
            .iter()
            .map(|object| (object.kind.as_str(), object.damage))
            .collect();
        assert_eq!(tags, vec![("ground", 0), ("spike", 2)]);
    }

    #[rstest]
    fn overlay_keys_cover_both_effects() {
        let keys: Vec<_> = overlay_keys().collect();
        assert!(keys.contains(&"status_effect_slow".to_owned()));
        assert!(keys.contains(&"status_effect_stun".to_owned()));
        assert_eq!(keys.len(), 5);
    }

    #[rstest]
    fn extent_is_tiles_times_size() {
        let map = CollisionMap {
            tile_size: 8,
            width: 30,
            height: 17,
            objects: Vec::new(),
        };
        assert_eq!(map.extent(), Vec2::new(240.0, 136.0));
    }
}
