//! Health and status effect records.

use bevy::prelude::*;

use crate::pool::Poolable;

/// Integer hit points.
///
/// Every mutation goes through the methods below, which keep
/// `0 <= hp <= max_hp` and raise `hp_change`. The status render system is
/// the only consumer that clears the flag.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
    pub hp_change: bool,
}

impl Health {
    /// Full health at `max_hp`.
    #[must_use]
    pub const fn full(max_hp: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            hp_change: false,
        }
    }

    /// Subtracts `amount`, flooring at zero.
    pub fn damage(&mut self, amount: i32) {
        self.set_hp(self.hp.saturating_sub(amount));
    }

    /// Adds `amount`, capping at `max_hp`.
    pub fn heal(&mut self, amount: i32) {
        self.set_hp(self.hp.saturating_add(amount));
    }

    /// Sets `hp` clamped into range and flags the change.
    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp.max(0));
        self.hp_change = true;
    }

    /// Fraction of health remaining, `0.0` when `max_hp` is not positive.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "Hit point totals are far below f32's exact integer range."
        )]
        let ratio = self.hp as f32 / self.max_hp as f32;
        ratio.clamp(0.0, 1.0)
    }
}

/// Effects an entity can be under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusEffectKind {
    #[default]
    None,
    Slow,
    Stun,
}

impl StatusEffectKind {
    /// Tag used to build the overlay icon key.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Slow => "slow",
            Self::Stun => "stun",
        }
    }
}

/// Current status effect and the state of its overlay window.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct StatusEffect {
    pub effect: StatusEffectKind,
    /// Seconds left before `effect` returns to `None`.
    pub duration: f32,
    /// Whether a health-bar window is currently open.
    pub start_health_bar: bool,
    /// Seconds the open window has been shown.
    pub render_timer: f32,
}

impl StatusEffect {
    /// Starts `effect` for `duration` seconds, restarting the overlay timer.
    pub fn apply(&mut self, effect: StatusEffectKind, duration: f32) {
        self.effect = effect;
        self.duration = duration;
        self.render_timer = 0.0;
    }

    /// Opens a health-bar window from the beginning.
    pub fn open_health_bar(&mut self) {
        self.start_health_bar = true;
        self.render_timer = 0.0;
    }

    /// Counts down the active effect, clearing it when time runs out.
    pub fn tick(&mut self, dt: f32) {
        if self.effect == StatusEffectKind::None {
            return;
        }
        self.duration -= dt;
        if self.duration <= 0.0 {
            self.effect = StatusEffectKind::None;
            self.duration = 0.0;
        }
    }

    #[must_use]
    pub fn has_effect(&self) -> bool {
        self.effect != StatusEffectKind::None
    }
}

impl Poolable for Health {}
impl Poolable for StatusEffect {}
