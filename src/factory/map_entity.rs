//! Map entity recipes.

use bevy::prelude::*;

use crate::assets::TextureRegion;
use crate::builder::{EntityBuilder, VelocitySpec};
use crate::components::MapEntityType;
use crate::constants::{BRACKET_LEFT, BRACKET_RIGHT, TOGGLE_OFF, TOGGLE_ON};
use crate::error::{ConfigError, FactoryError};

use super::{registry, MapProperties, SpawnRect, Spawned};

/// Which collision passes test against the entity.
#[derive(Debug, Clone, Copy)]
struct Collides {
    projectiles: bool,
    map: bool,
}

impl Collides {
    const NOTHING: Self = Self {
        projectiles: false,
        map: false,
    };
    const PROJECTILES: Self = Self {
        projectiles: true,
        map: false,
    };
    const EVERYTHING: Self = Self {
        projectiles: true,
        map: true,
    };
}

fn lookup(world: &World, key: &str) -> Result<TextureRegion, ConfigError> {
    registry(world)?.texture(key)
}

/// Builder pre-loaded with the attachments nearly every map entity shares.
fn standard(
    kind: MapEntityType,
    collides: Collides,
    key: &str,
    region: TextureRegion,
    rect: SpawnRect,
) -> EntityBuilder {
    EntityBuilder::new()
        .map_entity(kind, collides.projectiles, collides.map)
        .bounding_box(region.width, region.height)
        .position(rect.x, rect.y)
        .velocity(VelocitySpec::default())
        .texture(key, region)
}

/// Spawns the map entity `kind` over `rect`, reading overrides from `props`.
///
/// `Clamp` produces its two jaws, left first. `None` spawns nothing.
///
/// # Errors
/// Returns [`FactoryError::Config`] for missing assets, missing required
/// properties or mistyped properties, and [`FactoryError::Build`] when a
/// recipe produced an inconsistent entity.
pub fn spawn_map_entity(
    world: &mut World,
    kind: MapEntityType,
    rect: SpawnRect,
    props: &MapProperties,
) -> Result<Spawned, FactoryError> {
    let spawned = match kind {
        MapEntityType::None => return Ok(Spawned::new()),
        MapEntityType::MovingPlatform => moving_platform(world, rect, props)?,
        MapEntityType::TemporaryPlatform => {
            let region = lookup(world, "approx")?;
            vec![standard(kind, Collides::NOTHING, "approx", region, rect)
                .remove()
                .build(world)?]
        }
        MapEntityType::Portal => {
            let region = lookup(world, "curly_brace_portal")?;
            let id = props.required_int("id")?;
            let target = props.required_int("target")?;
            vec![
                standard(kind, Collides::NOTHING, "curly_brace_portal", region, rect)
                    .bounding_box(region.width - 4.0, region.height - 4.0)
                    .portal(id, target)
                    .build(world)?,
            ]
        }
        MapEntityType::Clamp => clamp(world, rect, props)?,
        MapEntityType::HealthPack => {
            let region = lookup(world, "health_pack")?;
            let regen = props.int_or("regen", 0)?;
            let regen_time = props.float_or("time", 0.0)?;
            vec![standard(kind, Collides::NOTHING, "health_pack", region, rect)
                .health_pack(regen, regen_time)
                .remove()
                .build(world)?]
        }
        MapEntityType::Mirror => {
            let orientation = props.str_or("or", "v")?;
            let key = format!("between_{orientation}");
            let region = lookup(world, &key)?;
            vec![standard(kind, Collides::NOTHING, &key, region, rect)
                .mirror(orientation)
                .build(world)?]
        }
        MapEntityType::GravitySwitch => {
            let key = format!("updownarrow{TOGGLE_OFF}");
            let region = lookup(world, &key)?;
            vec![standard(kind, Collides::PROJECTILES, &key, region, rect).build(world)?]
        }
        MapEntityType::SquareSwitch => {
            let key = format!("square_switch{TOGGLE_ON}");
            let region = lookup(world, &key)?;
            let target_id = props.required_int("targetId")?;
            vec![standard(kind, Collides::EVERYTHING, &key, region, rect)
                .square_switch(target_id)
                .build(world)?]
        }
        MapEntityType::ToggleTile => {
            let region = lookup(world, "toggle_square")?;
            let id = props.required_int("id")?;
            let x0 = rect.x + 0.5;
            let y0 = rect.y + 0.5;
            let inset = Rect::new(x0, y0, x0 + region.width - 1.5, y0 + region.height - 1.5);
            vec![standard(kind, Collides::EVERYTHING, "toggle_square", region, rect)
                .toggle_tile(id, inset)
                .build(world)?]
        }
        MapEntityType::ForceField => force_field(world, rect, props)?,
        MapEntityType::DamageBoost => {
            let region = lookup(world, "damage_boost")?;
            let duration = props.float_or("duration", 5.0)?;
            let damage = props.int_or("damage", 0)?;
            vec![standard(kind, Collides::NOTHING, "damage_boost", region, rect)
                .damage_boost(damage, duration)
                .build(world)?]
        }
        MapEntityType::InvertSwitch => {
            let region = lookup(world, "invert_switch")?;
            vec![
                standard(kind, Collides::EVERYTHING, "invert_switch", region, rect)
                    .invert_switch()
                    .build(world)?,
            ]
        }
        MapEntityType::AccelerationGate => {
            let boost = props.float_or("boost", 0.0)?;
            let orientation = props.str_or("or", "v")?;
            let key = format!("agate_{orientation}");
            let region = lookup(world, &key)?;
            vec![standard(kind, Collides::NOTHING, &key, region, rect)
                .acceleration_gate(boost, orientation)
                .build(world)?]
        }
    };
    log::debug!(
        "spawned map entity `{}` as {} entities",
        kind.type_str(),
        spawned.len()
    );
    Ok(spawned)
}

/// Platform patrolling `dist` along `(dx, dy)`, textured by its width in
/// eight-pixel tiles.
fn moving_platform(
    world: &mut World,
    rect: SpawnRect,
    props: &MapProperties,
) -> Result<Spawned, FactoryError> {
    let dx = props.float_or("dx", 0.0)?;
    let dy = props.float_or("dy", 0.0)?;
    let dist = props.float_or("dist", 0.0)?;
    let tiles = (rect.width / 8.0).ceil().max(1.0);
    let key = format!("{}{tiles}", MapEntityType::MovingPlatform.type_str());
    let region = lookup(world, &key)?;
    let platform = standard(
        MapEntityType::MovingPlatform,
        Collides::PROJECTILES,
        &key,
        region,
        rect,
    )
    .moving_platform()
    .back_and_forth(dist, dx > 0.0)
    .velocity(VelocitySpec::moving(dx, dy))
    .build(world)?;
    Ok(vec![platform])
}

/// The two jaws of a clamp, the right one flush with the rectangle's right
/// edge.
fn clamp(world: &mut World, rect: SpawnRect, props: &MapProperties) -> Result<Spawned, FactoryError> {
    let prefix = props.str_or("texture", "square_bracket")?;
    let acceleration = props.float_or("accel", 144.0)?;
    let back_velocity = props.float_or("backVel", 10.0)?;
    let left_key = format!("{prefix}{BRACKET_LEFT}");
    let right_key = format!("{prefix}{BRACKET_RIGHT}");
    let left_region = lookup(world, &left_key)?;
    let right_region = lookup(world, &right_key)?;
    let span = rect.to_rect();

    let left = standard(
        MapEntityType::Clamp,
        Collides::PROJECTILES,
        &left_key,
        left_region,
        rect,
    )
    .clamp(false, span, acceleration, back_velocity)
    .build(world)?;
    let right_rect = SpawnRect {
        x: rect.x + rect.width - right_region.width,
        ..rect
    };
    let right = standard(
        MapEntityType::Clamp,
        Collides::PROJECTILES,
        &right_key,
        right_region,
        right_rect,
    )
    .clamp(true, span, acceleration, back_velocity)
    .build(world)?;
    Ok(vec![left, right])
}

/// Circular field sized by the object's width in sixteen-pixel steps above
/// thirty-two.
fn force_field(
    world: &mut World,
    rect: SpawnRect,
    props: &MapProperties,
) -> Result<Spawned, FactoryError> {
    let duration = props.float_or("duration", 0.0)?;
    let size = ((rect.width - 32.0) / 16.0).floor().max(0.0) + 1.0;
    let key = format!("forcefield{size}");
    let region = lookup(world, &key)?;
    let center = rect.center();
    let field = EntityBuilder::new()
        .map_entity(MapEntityType::ForceField, false, false)
        .force_field(duration)
        .bounding_circle(center.x, center.y, rect.width / 2.0)
        .position(rect.x, rect.y)
        .texture(key, region)
        .build(world)?;
    Ok(vec![field])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetRegistry;
    use crate::components::{init_pools, BoundingCircle, Clamp, Portal, Position, SpriteTexture};
    use rstest::{fixture, rstest};

    #[fixture]
    fn world() -> World {
        let mut world = World::new();
        init_pools(&mut world);
        let mut assets = AssetRegistry::default();
        for key in [
            "moving_platform2",
            "approx",
            "curly_brace_portal",
            "square_bracket_left",
            "square_bracket_right",
            "health_pack",
            "between_v",
            "between_h",
            "updownarrow_off",
            "square_switch_on",
            "toggle_square",
            "forcefield1",
            "forcefield3",
            "damage_boost",
            "invert_switch",
            "agate_v",
        ] {
            assets.insert_texture(key, 8.0, 8.0);
        }
        world.insert_resource(assets);
        world
    }

    fn required_props() -> MapProperties {
        MapProperties::new()
            .with("id", 1)
            .with("target", 2)
            .with("targetId", 3)
    }

    #[rstest]
    fn every_archetype_spawns(mut world: World) {
        let props = required_props();
        for kind in MapEntityType::ALL {
            let spawned = spawn_map_entity(&mut world, kind, SpawnRect::new(0.0, 0.0, 16.0, 16.0), &props)
                .unwrap_or_else(|e| panic!("{kind:?} failed: {e}"));
            assert!(!spawned.is_empty(), "{kind:?} spawned nothing");
        }
    }

    #[rstest]
    fn portal_reads_required_ids(mut world: World) {
        let spawned = spawn_map_entity(
            &mut world,
            MapEntityType::Portal,
            SpawnRect::default(),
            &required_props(),
        )
        .unwrap_or_else(|e| panic!("portal failed: {e}"));
        let portal = spawned.first().and_then(|entity| world.get::<Portal>(*entity));
        assert_eq!(portal, Some(&Portal { id: 1, target: 2 }));
    }

    #[rstest]
    #[case(MapEntityType::Portal, "id")]
    #[case(MapEntityType::SquareSwitch, "targetId")]
    #[case(MapEntityType::ToggleTile, "id")]
    fn missing_required_property_is_fatal(
        mut world: World,
        #[case] kind: MapEntityType,
        #[case] key: &str,
    ) {
        let result = spawn_map_entity(&mut world, kind, SpawnRect::default(), &MapProperties::new());
        assert!(matches!(
            result,
            Err(FactoryError::Config(ConfigError::MissingProperty(missing))) if missing == key
        ));
    }

    #[rstest]
    fn mirror_orientation_selects_texture(mut world: World) {
        let props = MapProperties::new().with("or", "h");
        let spawned = spawn_map_entity(&mut world, MapEntityType::Mirror, SpawnRect::default(), &props)
            .unwrap_or_else(|e| panic!("mirror failed: {e}"));
        let key = spawned
            .first()
            .and_then(|entity| world.get::<SpriteTexture>(*entity))
            .map(|texture| texture.key.clone());
        assert_eq!(key.as_deref(), Some("between_h"));
    }

    #[rstest]
    fn clamp_jaws_bracket_the_rectangle(mut world: World) {
        let spawned = spawn_map_entity(
            &mut world,
            MapEntityType::Clamp,
            SpawnRect::new(10.0, 0.0, 40.0, 8.0),
            &MapProperties::new().with("accel", 200.0),
        )
        .unwrap_or_else(|e| panic!("clamp failed: {e}"));
        let [left, right] = spawned.as_slice() else {
            panic!("clamp should spawn two jaws, got {}", spawned.len());
        };
        let right_x = world.get::<Position>(*right).map(|position| position.x);
        assert_eq!(right_x, Some(42.0));
        let jaws: Vec<_> = [left, right]
            .iter()
            .filter_map(|entity| world.get::<Clamp>(**entity))
            .map(|clamp| (clamp.right, clamp.acceleration, clamp.back_velocity))
            .collect();
        assert_eq!(jaws, vec![(false, 200.0, 10.0), (true, 200.0, 10.0)]);
    }

    #[rstest]
    fn force_field_size_follows_width(mut world: World) {
        let spawned = spawn_map_entity(
            &mut world,
            MapEntityType::ForceField,
            SpawnRect::new(0.0, 0.0, 64.0, 64.0),
            &MapProperties::new(),
        )
        .unwrap_or_else(|e| panic!("force field failed: {e}"));
        let entity = spawned.first().copied().unwrap_or(Entity::PLACEHOLDER);
        assert_eq!(
            world.get::<SpriteTexture>(entity).map(|texture| texture.key.as_str()),
            Some("forcefield3")
        );
        assert_eq!(
            world.get::<BoundingCircle>(entity),
            Some(&BoundingCircle {
                x: 32.0,
                y: 32.0,
                radius: 32.0
            })
        );
    }

    #[rstest]
    fn none_spawns_nothing(mut world: World) {
        let spawned = spawn_map_entity(
            &mut world,
            MapEntityType::None,
            SpawnRect::default(),
            &MapProperties::new(),
        )
        .unwrap_or_else(|e| panic!("none failed: {e}"));
        assert!(spawned.is_empty());
    }
}
