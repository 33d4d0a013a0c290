//! Health-bar and status-icon overlays.
//!
//! The system does not draw. It emits [`OverlayDraw`] records into the
//! [`OverlayBatch`] resource, which the external renderer drains each frame.
//! For any one entity a tick produces either the three bar layers or the
//! status icon, never both.

use bevy::prelude::*;

use crate::components::{
    Health, Player, Position, Projectile, SpriteTexture, StatusEffect, StatusEffectKind,
};
use crate::constants::{
    HEALTH_BAR_HEIGHT, HP_BAR_BACKDROP_KEY, HP_BAR_BACKGROUND_KEY, HP_BAR_FILL_KEY,
    HP_BAR_VISIBLE_DURATION, HP_BAR_VISIBLE_DURATION_WITH_SE, HP_BAR_X_OFFSET, HP_BAR_Y_OFFSET,
    SE_SIZE, SE_Y_OFFSET, STATUS_EFFECT_KEY_PREFIX,
};
use crate::viewport::Viewport;

use super::FrameClock;

/// Layer of a health bar, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarLayer {
    Backdrop,
    Background,
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    HealthBar(BarLayer),
    StatusIcon(StatusEffectKind),
}

/// One textured quad for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayDraw {
    pub owner: Entity,
    pub kind: OverlayKind,
    pub texture_key: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Overlay quads emitted during the current tick.
#[derive(Resource, Debug, Default)]
pub struct OverlayBatch {
    draws: Vec<OverlayDraw>,
}

impl OverlayBatch {
    pub fn push(&mut self, draw: OverlayDraw) {
        self.draws.push(draw);
    }

    pub fn clear(&mut self) {
        self.draws.clear();
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, OverlayDraw> {
        self.draws.drain(..)
    }

    #[must_use]
    pub fn draws(&self) -> &[OverlayDraw] {
        &self.draws
    }

    /// Draws emitted for `owner`.
    pub fn for_owner(&self, owner: Entity) -> impl Iterator<Item = &OverlayDraw> + '_ {
        self.draws.iter().filter(move |draw| draw.owner == owner)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

/// Empties the batch at the start of a tick.
pub fn clear_overlay_batch(mut batch: ResMut<OverlayBatch>) {
    batch.clear();
}

/// Counts down active status effects.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn expire_status_effects(clock: Res<FrameClock>, mut effects: Query<&mut StatusEffect>) {
    for mut status in &mut effects {
        if status.has_effect() {
            status.tick(clock.dt);
        }
    }
}

type OverlayFilter = (Or<(With<StatusEffect>, With<Health>)>, Without<Projectile>);

/// Opens health-bar windows on damage and emits this tick's overlay quads.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn render_status_overlays(
    clock: Res<FrameClock>,
    viewport: Res<Viewport>,
    mut batch: ResMut<OverlayBatch>,
    mut query: Query<
        (
            Entity,
            &Position,
            Option<&SpriteTexture>,
            Option<&mut Health>,
            Option<&mut StatusEffect>,
            Has<Player>,
        ),
        OverlayFilter,
    >,
) {
    for (entity, position, texture, mut health, effect, is_player) in &mut query {
        let size = texture.map_or(Vec2::ZERO, |sprite| Vec2::new(sprite.width, sprite.height));
        let hit = health.as_mut().is_some_and(|record| {
            let changed = record.hp_change;
            if changed {
                record.hp_change = false;
            }
            changed && record.hp > 0 && !is_player
        });
        let Some(mut status) = effect else {
            continue;
        };
        if hit {
            status.open_health_bar();
        }

        if status.start_health_bar {
            status.render_timer += clock.dt;
            let fraction = health.as_deref().map_or(0.0, Health::fraction);
            emit_health_bar(&mut batch, &viewport, entity, *position, size, fraction);
            let window = if status.has_effect() {
                HP_BAR_VISIBLE_DURATION_WITH_SE
            } else {
                HP_BAR_VISIBLE_DURATION
            };
            if status.render_timer >= window {
                status.start_health_bar = false;
                status.render_timer = 0.0;
            }
        } else if status.has_effect() {
            emit_status_icon(&mut batch, &viewport, entity, *position, size, status.effect);
        }
    }
}

fn emit_health_bar(
    batch: &mut OverlayBatch,
    viewport: &Viewport,
    owner: Entity,
    position: Position,
    size: Vec2,
    fraction: f32,
) {
    let x = position.x - HP_BAR_X_OFFSET;
    let y = position.y + size.y + HP_BAR_Y_OFFSET;
    if !viewport.within_camera(x, y) {
        return;
    }
    let max_width = HP_BAR_X_OFFSET.mul_add(2.0, size.x) - 2.0;
    let layers = [
        (
            BarLayer::Backdrop,
            HP_BAR_BACKDROP_KEY,
            x,
            y,
            HP_BAR_X_OFFSET.mul_add(2.0, size.x),
            HEALTH_BAR_HEIGHT + 2.0,
        ),
        (
            BarLayer::Background,
            HP_BAR_BACKGROUND_KEY,
            x + 1.0,
            y + 1.0,
            max_width,
            HEALTH_BAR_HEIGHT,
        ),
        (
            BarLayer::Fill,
            HP_BAR_FILL_KEY,
            x + 1.0,
            y + 1.0,
            max_width * fraction,
            HEALTH_BAR_HEIGHT,
        ),
    ];
    for (layer, key, layer_x, layer_y, width, height) in layers {
        batch.push(OverlayDraw {
            owner,
            kind: OverlayKind::HealthBar(layer),
            texture_key: key.to_owned(),
            x: layer_x,
            y: layer_y,
            width,
            height,
        });
    }
}

fn emit_status_icon(
    batch: &mut OverlayBatch,
    viewport: &Viewport,
    owner: Entity,
    position: Position,
    size: Vec2,
    effect: StatusEffectKind,
) {
    let x = position.x + (size.x - SE_SIZE) / 2.0;
    let y = position.y + size.y + SE_Y_OFFSET;
    if !viewport.within_camera(x, y) {
        return;
    }
    batch.push(OverlayDraw {
        owner,
        kind: OverlayKind::StatusIcon(effect),
        texture_key: format!("{STATUS_EFFECT_KEY_PREFIX}{}", effect.tag()),
        x,
        y,
        width: SE_SIZE,
        height: SE_SIZE,
    });
}
