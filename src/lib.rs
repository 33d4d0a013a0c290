//! Entity composition core for a 2D action platformer.
//!
//! Sigil assembles every gameplay entity from a fluent [`EntityBuilder`],
//! turns map objects into archetypes through the [`factory`] recipes and
//! runs the per-tick systems that need nothing beyond the ECS: activation,
//! status overlays, health, player state, movement, projectiles and
//! cleanup. Rendering, collision response and input live outside the crate
//! and talk to it through resources such as [`systems::OverlayBatch`],
//! [`level::CollisionMap`] and [`systems::PlayerIntent`].
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use sigil::{AssetRegistry, SigilPlugin};
//!
//! let mut app = App::new();
//! app.insert_resource(AssetRegistry::default());
//! app.add_plugins(SigilPlugin);
//! app.update();
//! ```

#[macro_use]
mod macros;

pub mod assets;
pub mod builder;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod factory;
pub mod level;
pub mod logging;
mod plugin;
pub mod pool;
pub mod systems;
pub mod viewport;

pub use assets::{AssetRegistry, TextureRegion};
pub use builder::{
    AttackSpec, EnemySpec, EntityBuilder, GravitySpec, ProjectileSpec, VelocitySpec,
};
pub use config::{PlayerData, SigilSettings};
pub use error::{BuildError, ConfigError, FactoryError};
pub use level::{load_level, CollisionMap, LevelMap, LevelSummary};
pub use logging::init as init_logging;
pub use plugin::SigilPlugin;
pub use viewport::Viewport;

pub mod prelude {
    //! Prelude exports used by the binary and tests.
    //!
    //! ```rust,no_run
    //! use sigil::prelude::*;
    //! ```

    pub use crate::components::*;
    pub use crate::factory::{spawn_enemy, spawn_map_entity, MapProperties, SpawnRect};
    pub use crate::systems::{FrameClock, OverlayBatch, PlayerIntent, ProjectileInbox};
    pub use crate::{
        load_level, AssetRegistry, EntityBuilder, LevelMap, PlayerData, SigilPlugin,
        SigilSettings,
    };
}
