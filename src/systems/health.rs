//! Health clamping and death detection.

use bevy::prelude::*;

use crate::components::{Health, Player, PlayerState, Remove};

/// Clamps hit points and flags entities that ran out of them.
///
/// Non-player entities are marked for removal. The player is pinned at zero
/// and marked dead instead.
pub fn health_system(
    mut query: Query<(
        &mut Health,
        Option<&mut Remove>,
        Option<&mut PlayerState>,
        Has<Player>,
    )>,
) {
    for (mut health, remove, state, is_player) in &mut query {
        let clamped = health.hp.clamp(0, health.max_hp.max(0));
        if clamped != health.hp {
            health.hp = clamped;
        }
        if health.hp > 0 {
            continue;
        }
        if is_player {
            if let Some(mut player_state) = state {
                if !player_state.dead {
                    log::debug!("player hit points exhausted");
                    player_state.dead = true;
                }
            }
        } else if let Some(mut marker) = remove {
            marker.should_remove = true;
        }
    }
}
