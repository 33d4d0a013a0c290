//! Proximity activation.

use bevy::prelude::*;

use crate::components::{Activation, Player, Position};

/// Activates dormant entities once the player comes within range.
///
/// Activation is one-way: this system never clears `active`. Without a
/// player it does nothing.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn activate_in_range(
    player: Query<&Position, With<Player>>,
    mut dormant: Query<(Entity, &Position, &mut Activation), Without<Player>>,
) {
    let Ok(player_position) = player.single() else {
        return;
    };
    let origin = player_position.as_vec2();
    for (entity, position, mut activation) in &mut dormant {
        if activation.active || activation.is_unconditional() {
            continue;
        }
        if origin.distance(position.as_vec2()) <= activation.range {
            activation.active = true;
            log::debug!("{entity:?} activated at range {}", activation.range);
        }
    }
}
