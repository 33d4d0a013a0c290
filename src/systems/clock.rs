//! Bounded per-tick delta time.

use bevy::prelude::*;

use crate::config::SigilSettings;

/// Simulation time for the current tick.
///
/// Every gameplay system reads `dt` from here rather than from [`Time`], so
/// a long frame never advances the simulation by more than
/// [`SigilSettings::max_frame_dt`].
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    /// Seconds simulated this tick.
    pub dt: f32,
    /// Seconds simulated since startup.
    pub elapsed: f32,
    pub tick: u64,
}

/// Samples the frame time, applies the fixed override and the bound.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn advance_frame_clock(
    time: Option<Res<Time>>,
    settings: Res<SigilSettings>,
    mut clock: ResMut<FrameClock>,
) {
    let measured = time.map_or(0.0, |frame_time| frame_time.delta_secs());
    let requested = settings.fixed_dt.unwrap_or(measured);
    let bound = settings.max_frame_dt.max(f32::EPSILON);
    clock.dt = requested.clamp(0.0, bound);
    clock.elapsed += clock.dt;
    clock.tick += 1;
}
