//! Shared fixtures for Sigil's integration tests.
//!
//! [`default_registry`] knows every key the factories and overlays can ask
//! for, so tests only register assets themselves when they want a miss.

use bevy::prelude::*;
use sigil::components::{init_pools, EnemyType, StatusEffectKind, Tint};
use sigil::config::{PlayerData, SigilSettings};
use sigil::constants::{
    HP_BAR_BACKDROP_KEY, HP_BAR_BACKGROUND_KEY, HP_BAR_FILL_KEY, STATUS_EFFECT_KEY_PREFIX,
};
use sigil::systems::FrameClock;
use sigil::{AssetRegistry, SigilPlugin};

/// Side length of every fixture texture without a size of its own.
pub const TEXTURE_SIZE: f32 = 8.0;

const SIZED: &[(&str, f32, f32)] = &[
    ("player", 7.0, 7.0),
    ("e_percent_orbit", 6.0, 6.0),
    ("p_dot", 3.0, 3.0),
];

const PROJECTILES: &[&str] = &[
    "p_dot", "p_dot4", "p_big_ll", "p_xor", "p_cup", "p_ltimes", "p_alpha", "p_succ",
    "p_because",
];

const MAP_TEXTURES: &[&str] = &[
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
    "damage_boost",
    "invert_switch",
    "agate_v",
    "agate_h",
];

/// Registry containing every asset the content can reference.
#[must_use]
pub fn default_registry() -> AssetRegistry {
    let mut assets = AssetRegistry::default();
    let overlays = [HP_BAR_BACKDROP_KEY, HP_BAR_BACKGROUND_KEY, HP_BAR_FILL_KEY]
        .into_iter()
        .map(str::to_owned)
        .chain(
            [StatusEffectKind::Slow, StatusEffectKind::Stun]
                .into_iter()
                .map(|effect| format!("{STATUS_EFFECT_KEY_PREFIX}{}", effect.tag())),
        );
    for key in overlays {
        assets.insert_texture(key, 1.0, 1.0);
    }
    for kind in EnemyType::ALL {
        let key = format!("e_{}", kind.type_str());
        assets.insert_texture(key.as_str(), TEXTURE_SIZE, TEXTURE_SIZE);
        assets.insert_color(key, Tint::default());
    }
    assets.insert_texture("e_because0", TEXTURE_SIZE, TEXTURE_SIZE);
    for key in PROJECTILES.iter().chain(MAP_TEXTURES) {
        assets.insert_texture(*key, TEXTURE_SIZE, TEXTURE_SIZE);
    }
    for tiles in 1..=8 {
        assets.insert_texture(format!("moving_platform{tiles}"), TEXTURE_SIZE, TEXTURE_SIZE);
        assets.insert_texture(format!("forcefield{tiles}"), TEXTURE_SIZE, TEXTURE_SIZE);
    }
    for (key, width, height) in SIZED {
        assets.insert_texture(*key, *width, *height);
    }
    assets.insert_color("player", Tint::default());
    assets
}

/// Bare world with pools, the default registry and a clock ticking `dt`.
#[must_use]
pub fn pooled_world(dt: f32) -> World {
    let mut world = World::new();
    init_pools(&mut world);
    world.insert_resource(default_registry());
    world.insert_resource(PlayerData::default());
    world.insert_resource(FrameClock {
        dt,
        ..FrameClock::default()
    });
    world
}

/// Headless app running the full plugin with a fixed `dt` per update.
#[must_use]
pub fn sigil_app(dt: f32) -> App {
    let mut app = App::new();
    app.insert_resource(default_registry());
    app.insert_resource(SigilSettings::fixed(dt));
    app.add_plugins(SigilPlugin);
    app
}

/// Runs `ticks` updates.
pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}
