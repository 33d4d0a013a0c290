//! Bevy plugin wiring the gameplay systems into the schedule.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::info;

use crate::components::init_pools;
use crate::config::{PlayerData, SigilSettings};
use crate::systems::{
    activate_in_range, advance_frame_clock, apply_gravity, cleanup_removed, clear_overlay_batch,
    enemy_attack, enemy_motion, expire_status_effects, health_system, move_entities,
    orbit_children, player_system, render_status_overlays, spawn_requested_projectiles,
    store_previous_positions, update_projectiles, DeathDialog, FrameClock, OverlayBatch,
    PlayerDied, PlayerIntent, PlayerTimers, ProjectileInbox,
};
use crate::viewport::Viewport;

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_player_death(event: On<PlayerDied>) {
    info!("death dialog shown for {:?}", event.event().player);
}

/// Installs component pools, runtime resources and the per-tick system
/// chain.
///
/// Resources already present (an [`AssetRegistry`](crate::AssetRegistry),
/// tuned [`PlayerData`] or [`SigilSettings`]) are left untouched.
#[derive(Default)]
pub struct SigilPlugin;

impl Plugin for SigilPlugin {
    fn build(&self, app: &mut App) {
        init_pools(app.world_mut());
        app.init_resource::<FrameClock>()
            .init_resource::<SigilSettings>()
            .init_resource::<OverlayBatch>()
            .init_resource::<ProjectileInbox>()
            .init_resource::<PlayerTimers>()
            .init_resource::<DeathDialog>()
            .init_resource::<PlayerIntent>()
            .init_resource::<PlayerData>()
            .init_resource::<Viewport>();

        app.add_observer(log_player_death);

        app.add_systems(
            Update,
            (
                advance_frame_clock,
                clear_overlay_batch,
                store_previous_positions,
                apply_gravity,
                update_projectiles,
                enemy_motion,
                move_entities,
                orbit_children,
                health_system,
                activate_in_range,
                player_system,
                enemy_attack,
                spawn_requested_projectiles,
                expire_status_effects,
                render_status_overlays,
                cleanup_removed,
            )
                .chain(),
        );
    }
}
