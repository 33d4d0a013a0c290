//! Behavioural tests for the player system: healing sessions, shooting and
//! the death dialog.

#[path = "support/thread_safe_app.rs"]
mod thread_safe_app;

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

#[path = "support/sigil_fixture.rs"]
mod sigil_fixture;

use bevy::prelude::*;
use rspec::block::Context as Scenario;
use rspec::block::Suite;
use rspec_runner::run_serial;
use rstest::rstest;
use sigil::components::{Health, PlayerState, Projectile};
use sigil::systems::{DeathDialog, PlayerIntent};
use sigil_fixture::SigilFixture;

fn start_healing(fixture: &SigilFixture, hp: i32, units: i32, seconds: f32) {
    fixture.with_world(|world| {
        if let Some(mut health) = world.get_mut::<Health>(fixture.player) {
            health.hp = hp;
        }
        if let Some(mut state) = world.get_mut::<PlayerState>(fixture.player) {
            state.begin_healing(units, seconds);
        }
    });
}

fn hp(fixture: &SigilFixture) -> i32 {
    fixture
        .get::<Health>(fixture.player)
        .map_or(-1, |health| health.hp)
}

#[rstest]
#[case::fine_steps(0.1, 25)]
#[case::coarse_steps(0.33, 10)]
fn healing_delivers_exactly_owed_units(#[case] dt: f32, #[case] ticks: usize) {
    let fixture = SigilFixture::new(dt, Vec2::ZERO);
    start_healing(&fixture, 2, 4, 2.0);
    fixture.tick(ticks);
    assert_eq!(hp(&fixture), 6);
    let state = fixture.get::<PlayerState>(fixture.player);
    assert_eq!(state.map(|found| found.start_healing), Some(false));
}

#[rstest]
fn healing_is_spread_over_the_session() {
    let fixture = SigilFixture::new(0.1, Vec2::ZERO);
    start_healing(&fixture, 2, 4, 2.0);
    fixture.tick(10);
    let midway = hp(&fixture);
    assert!((3..6).contains(&midway), "hp after one second: {midway}");
}

#[derive(Debug, Clone)]
struct DeathFixture {
    base: SigilFixture,
}

impl DeathFixture {
    fn projectile_count(&self) -> usize {
        self.base.with_world(|world| {
            world
                .query_filtered::<Entity, With<Projectile>>()
                .iter(world)
                .count()
        })
    }

    fn dialog(&self) -> DeathDialog {
        self.base
            .with_world(|world| world.get_resource::<DeathDialog>().copied().unwrap_or_default())
    }
}

fn death_suite() -> Suite<DeathFixture> {
    let fixture = DeathFixture {
        base: SigilFixture::new(0.05, Vec2::new(40.0, 40.0)),
    };
    rspec::given(
        "a living player",
        fixture,
        |scenario: &mut Scenario<DeathFixture>| {
            scenario.when("the player shoots", |ctx| {
                ctx.before_each(|state| {
                    state.base.with_world(|world| {
                        world.resource_mut::<PlayerIntent>().shoot = true;
                    });
                    state.base.tick(1);
                });
                ctx.then("one player projectile exists", |state| {
                    assert_eq!(state.projectile_count(), 1);
                });
                ctx.then("the intent was consumed", |state| {
                    let intent = state.base.with_world(|world| *world.resource::<PlayerIntent>());
                    assert!(!intent.shoot);
                });
            });

            scenario.when("the player's hit points run out", |ctx| {
                ctx.before_each(|state| {
                    state.base.with_world(|world| {
                        if let Some(mut health) = world.get_mut::<Health>(state.base.player) {
                            health.damage(100);
                        }
                    });
                    state.base.tick(3);
                });
                ctx.then("the player is marked dead", |state| {
                    let dead = state
                        .base
                        .get::<PlayerState>(state.base.player)
                        .map(|found| found.dead);
                    assert_eq!(dead, Some(true));
                });
                ctx.then("the death dialog opened exactly once", |state| {
                    let dialog = state.dialog();
                    assert!(dialog.displayed);
                    assert_eq!(dialog.shown_count, 1);
                });
            });
        },
    )
}

#[test]
fn player_shoots_then_dies() {
    run_serial(&death_suite());
}
