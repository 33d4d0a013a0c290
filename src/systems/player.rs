//! Player cooldowns, healing sessions, intents and death.

use bevy::prelude::*;

use crate::builder::ProjectileSpec;
use crate::components::{
    Facing, Health, Player, PlayerState, Position, SpriteTexture, StatusEffect, StatusEffectKind,
    Velocity,
};
use crate::config::PlayerData;

use super::{FrameClock, ProjectileInbox, ProjectileRequest};

/// Timers owned by the player system.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerTimers {
    pub shoot: f32,
    /// Time since the last per-unit heal.
    pub heal: f32,
    /// Time since the healing session began.
    pub total_heal: f32,
    /// Units delivered by the current session.
    pub units_delivered: i32,
}

/// Death dialog state. The external UI reads `displayed`.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeathDialog {
    pub displayed: bool,
    /// Times the dialog has been opened.
    pub shown_count: u32,
}

impl DeathDialog {
    /// Opens the dialog. Returns `false` if it was already open.
    pub const fn show(&mut self) -> bool {
        if self.displayed {
            return false;
        }
        self.displayed = true;
        self.shown_count += 1;
        true
    }
}

/// Input for the current tick, written by the input layer.
///
/// `jump` and `shoot` are consumed by [`player_system`].
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerIntent {
    /// Horizontal direction in `[-1, 1]`. `None` leaves velocity alone.
    pub move_x: Option<f32>,
    pub jump: bool,
    pub shoot: bool,
}

/// Triggered once when the player dies.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDied {
    pub player: Entity,
}

type PlayerItems<'a> = (
    Entity,
    &'a mut PlayerState,
    &'a mut Health,
    &'a Position,
    &'a mut Velocity,
    Option<&'a mut Facing>,
    Option<&'a StatusEffect>,
    Option<&'a SpriteTexture>,
);

/// Runs the player's per-tick state machine.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
#[expect(
    clippy::too_many_arguments,
    reason = "Bevy systems take each resource they touch as a parameter."
)]
pub fn player_system(
    mut commands: Commands,
    clock: Res<FrameClock>,
    data: Res<PlayerData>,
    mut timers: ResMut<PlayerTimers>,
    mut dialog: ResMut<DeathDialog>,
    mut intent: ResMut<PlayerIntent>,
    mut inbox: ResMut<ProjectileInbox>,
    mut players: Query<PlayerItems<'_>, With<Player>>,
) {
    let Ok((entity, mut state, mut health, position, mut velocity, mut facing, status, texture)) =
        players.single_mut()
    else {
        return;
    };
    let dt = clock.dt;

    if !state.can_shoot {
        timers.shoot += dt;
        if timers.shoot >= data.shoot_delay {
            state.can_shoot = true;
            timers.shoot = 0.0;
        }
    }

    tick_healing(&mut state, &mut health, &mut timers, dt);

    if state.dead {
        if dialog.show() {
            log::info!("player {entity:?} died");
            commands.trigger(PlayerDied { player: entity });
        }
        return;
    }

    let effect = status.map_or(StatusEffectKind::None, |current| current.effect);
    let stunned = effect == StatusEffectKind::Stun;
    if let Some(direction) = intent.move_x {
        let factor = match effect {
            StatusEffectKind::Stun => 0.0,
            StatusEffectKind::Slow => 1.0 - data.slow_percentage,
            StatusEffectKind::None => 1.0,
        };
        velocity.dx = direction.clamp(-1.0, 1.0) * data.speed * factor;
        if let Some(current) = facing.as_mut() {
            if direction > 0.0 {
                current.right = true;
            } else if direction < 0.0 {
                current.right = false;
            }
        }
    }
    if std::mem::take(&mut intent.jump) && !stunned {
        velocity.dy = data.jump_impulse;
    }

    if std::mem::take(&mut intent.shoot) && state.can_shoot && !stunned {
        let sign = facing.as_deref().map_or(1.0, |current| current.sign());
        let half = texture.map_or(Vec2::ZERO, |sprite| {
            Vec2::new(sprite.width, sprite.height) / 2.0
        });
        inbox.push(ProjectileRequest {
            origin: position.as_vec2() + half,
            velocity: Vec2::new(sign * data.projectile_speed, 0.0),
            spec: ProjectileSpec {
                damage: data.projectile_damage,
                knockback: data.projectile_knockback,
                enemy: false,
                texture_key: data.projectile_texture.clone(),
                ..ProjectileSpec::default()
            },
        });
        state.can_shoot = false;
        timers.shoot = 0.0;
    }
}

/// Delivers exactly `state.healing` units over `state.heal_time` seconds.
fn tick_healing(state: &mut PlayerState, health: &mut Health, timers: &mut PlayerTimers, dt: f32) {
    if state.healing == 0 || !state.start_healing {
        return;
    }
    let owed = state.healing;
    timers.heal += dt;
    timers.total_heal += dt;

    let interval = state.heal_time / f32::from(i16::try_from(owed).unwrap_or(i16::MAX));
    if timers.heal >= interval && timers.units_delivered < owed - 1 {
        health.heal(1);
        timers.units_delivered += 1;
        timers.heal = 0.0;
    }

    if timers.total_heal >= state.heal_time {
        let remaining = (owed - timers.units_delivered).max(1);
        debug_assert!(
            timers.units_delivered + remaining <= owed.max(1),
            "healing session over-delivered"
        );
        health.heal(remaining);
        log::debug!("healing session delivered {owed} units");
        *timers = PlayerTimers {
            shoot: timers.shoot,
            ..PlayerTimers::default()
        };
        state.start_healing = false;
        state.healing = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn run_session(units: i32, seconds: f32, dt: f32) -> (i32, usize) {
        let mut state = PlayerState::default();
        let mut health = Health::full(100);
        health.hp = 10;
        let mut timers = PlayerTimers::default();
        state.begin_healing(units, seconds);
        let mut ticks = 0;
        while state.start_healing && ticks < 1000 {
            tick_healing(&mut state, &mut health, &mut timers, dt);
            ticks += 1;
        }
        (health.hp - 10, ticks)
    }

    #[rstest]
    #[case(4, 2.0, 0.1)]
    #[case(4, 2.0, 0.33)]
    #[case(1, 0.5, 0.05)]
    #[case(7, 1.0, 0.05)]
    fn session_delivers_exactly_owed_units(
        #[case] units: i32,
        #[case] seconds: f32,
        #[case] dt: f32,
    ) {
        let (healed, _) = run_session(units, seconds, dt);
        assert_eq!(healed, units);
    }

    #[rstest]
    fn session_ends_at_heal_time() {
        let (_, ticks) = run_session(4, 2.0, 0.1);
        assert!((19..=21).contains(&ticks), "took {ticks} ticks");
    }

    #[rstest]
    fn dialog_opens_once() {
        let mut dialog = DeathDialog::default();
        assert!(dialog.show());
        assert!(!dialog.show());
        assert_eq!(dialog.shown_count, 1);
    }
}
