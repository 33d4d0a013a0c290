//! Shared fixture for behavioural tests that tick the full plugin.

use std::sync::MutexGuard;

use bevy::prelude::*;
use sigil::components::Gravity;
use sigil::level::spawn_player;

use crate::thread_safe_app::{lock_app, share, SharedApp, ThreadSafeApp};

/// An app running [`sigil::SigilPlugin`] at a fixed step with a player that
/// stays where tests put it.
#[derive(Debug, Clone)]
pub struct SigilFixture {
    app: SharedApp,
    pub player: Entity,
}

impl SigilFixture {
    /// Builds the app and spawns a weightless player at `spawn`.
    pub fn new(dt: f32, spawn: Vec2) -> Self {
        let mut app = test_utils::sigil_app(dt);
        let player = spawn_player(app.world_mut(), spawn)
            .unwrap_or_else(|e| panic!("player spawn failed: {e}"));
        app.world_mut().entity_mut(player).remove::<Gravity>();
        Self {
            app: share(app),
            player,
        }
    }

    /// Locks the underlying `App` for direct inspection or mutation.
    pub fn app_guard(&self) -> MutexGuard<'_, ThreadSafeApp> {
        lock_app(&self.app)
    }

    /// Runs `ticks` updates.
    pub fn tick(&self, ticks: usize) {
        let mut app = self.app_guard();
        test_utils::run_ticks(&mut app, ticks);
    }

    /// Runs `f` against the world.
    pub fn with_world<R>(&self, f: impl FnOnce(&mut World) -> R) -> R {
        let mut app = self.app_guard();
        f(app.world_mut())
    }

    /// Reads a copy of `T` from `entity`.
    pub fn get<T: Component + Clone>(&self, entity: Entity) -> Option<T> {
        self.with_world(|world| world.get::<T>(entity).cloned())
    }
}
