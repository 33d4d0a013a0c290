//! Per-tick gameplay systems.
//!
//! [`crate::SigilPlugin`] chains these in a fixed order. Each is also
//! exposed so tests can run any subset on a bare [`bevy::prelude::World`].

mod activation;
mod attack;
mod cleanup;
mod clock;
mod health;
mod movement;
mod orbit;
mod player;
mod projectile;
mod status_render;

pub use activation::activate_in_range;
pub use attack::enemy_attack;
pub use cleanup::cleanup_removed;
pub use clock::{advance_frame_clock, FrameClock};
pub use health::health_system;
pub use movement::{apply_gravity, enemy_motion, move_entities, store_previous_positions};
pub use orbit::orbit_children;
pub use player::{player_system, DeathDialog, PlayerDied, PlayerIntent, PlayerTimers};
pub use projectile::{
    spawn_requested_projectiles, update_projectiles, ProjectileInbox, ProjectileRequest,
};
pub use status_render::{
    clear_overlay_batch, expire_status_effects, render_status_overlays, BarLayer, OverlayBatch,
    OverlayDraw, OverlayKind,
};
