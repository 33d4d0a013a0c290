//! Runtime configuration resources.
//!
//! [`PlayerData`] mirrors the player data file shipped with the game and may
//! be partially specified: absent keys keep their defaults. [`SigilSettings`]
//! controls frame timing and is normally left at its default outside tests.

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::constants::DELTA_TIME_BOUND;
use crate::error::ConfigError;

/// Player tuning read from `player.json`.
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerData {
    pub hp: i32,
    /// Seconds between player shots.
    pub shoot_delay: f32,
    pub speed: f32,
    pub jump_impulse: f32,
    pub width: f32,
    pub height: f32,
    pub projectile_speed: f32,
    pub projectile_damage: i32,
    pub projectile_knockback: f32,
    pub projectile_texture: String,
    /// Fraction of speed lost while slowed.
    pub slow_percentage: f32,
    pub slow_duration: f32,
    pub stun_duration: f32,
}

impl Default for PlayerData {
    fn default() -> Self {
        Self {
            hp: 8,
            shoot_delay: 0.3,
            speed: 35.0,
            jump_impulse: 160.0,
            width: 7.0,
            height: 7.0,
            projectile_speed: 80.0,
            projectile_damage: 1,
            projectile_knockback: 75.0,
            projectile_texture: "p_dot".to_owned(),
            slow_percentage: 0.4,
            slow_duration: 2.0,
            stun_duration: 2.0,
        }
    }
}

impl PlayerData {
    /// Reads player data from a JSON file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] or [`ConfigError::Json`] when the file
    /// cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Frame timing controls.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SigilSettings {
    /// Largest delta time a single tick may simulate.
    pub max_frame_dt: f32,
    /// Replaces the measured frame time when set. Used by tests and replays.
    pub fixed_dt: Option<f32>,
}

impl Default for SigilSettings {
    fn default() -> Self {
        Self {
            max_frame_dt: DELTA_TIME_BOUND,
            fixed_dt: None,
        }
    }
}

impl SigilSettings {
    /// Settings that simulate exactly `dt` seconds per tick.
    #[must_use]
    pub fn fixed(dt: f32) -> Self {
        Self {
            max_frame_dt: dt.max(DELTA_TIME_BOUND),
            fixed_dt: Some(dt),
        }
    }
}
