//! Player marker and mutable player state.

use bevy::prelude::*;

use crate::pool::Poolable;

/// Marks the single player entity.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Player;

/// Flags toggled by gameplay and read by the player system.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub can_shoot: bool,
    /// Units of health owed by the current healing session.
    pub healing: i32,
    /// Seconds a healing session lasts.
    pub heal_time: f32,
    /// Raised by pickups to begin a healing session.
    pub start_healing: bool,
    pub dead: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            can_shoot: true,
            healing: 0,
            heal_time: 0.0,
            start_healing: false,
            dead: false,
        }
    }
}

impl PlayerState {
    /// Starts a session delivering `units` of health over `seconds`.
    pub fn begin_healing(&mut self, units: i32, seconds: f32) {
        self.healing = units;
        self.heal_time = seconds;
        self.start_healing = units > 0;
    }
}

impl Poolable for Player {}
impl Poolable for PlayerState {}
