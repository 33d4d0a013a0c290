//! Placement, motion and presentation records shared by every archetype.

use bevy::prelude::*;

use crate::pool::Poolable;

/// Authoritative world position of an entity's lower-left corner.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Position at the start of the current tick, used for sweeps and
/// interpolation.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PreviousPosition {
    pub x: f32,
    pub y: f32,
}

/// Linear velocity plus the entity's nominal movement speed.
///
/// `speed` is a magnitude that movement logic scales direction by; `dx` and
/// `dy` are the current per-second displacement.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
    pub speed: f32,
}

/// Constant downward acceleration with a fall speed cap.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    /// Acceleration applied to `Velocity::dy`, negative is down.
    pub gravity: f32,
    /// Most negative `dy` gravity may produce.
    pub terminal_velocity: f32,
    /// Whether the collision layer resolves this entity against map tiles.
    pub collide_with_map: bool,
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            gravity: 0.0,
            terminal_velocity: 0.0,
            collide_with_map: true,
        }
    }
}

/// Axis-aligned box in entity-local coordinates.
///
/// `width` and `height` are never negative; the builder rejects such boxes.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    #[must_use]
    pub const fn sized(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }
}

/// Circular bounds in world coordinates, used by force fields.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingCircle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Horizontal facing.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Facing {
    pub right: bool,
}

impl Facing {
    /// `1.0` when facing right, `-1.0` otherwise.
    #[must_use]
    pub const fn sign(self) -> f32 {
        if self.right {
            1.0
        } else {
            -1.0
        }
    }
}

/// Texture region the external renderer draws for this entity.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct SpriteTexture {
    /// Registry key the region was resolved from.
    pub key: String,
    pub width: f32,
    pub height: f32,
    /// Hidden sprites still collide and update; the renderer skips them.
    pub visible: bool,
}

/// RGBA colour multiplied into the sprite, each channel in `0.0..=1.0`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Tint(pub [f32; 4]);

impl Default for Tint {
    fn default() -> Self {
        Self([1.0; 4])
    }
}

/// Destruction marker consumed by the cleanup system.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Remove {
    pub should_remove: bool,
}

/// Proximity trigger. A range of [`crate::constants::ALWAYS_ACTIVE`] means
/// the entity is active from creation.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Activation {
    pub range: f32,
    pub active: bool,
}

impl Default for Activation {
    fn default() -> Self {
        Self {
            range: crate::constants::ALWAYS_ACTIVE,
            active: true,
        }
    }
}

impl Activation {
    /// Trigger with the given range, already active when the range is the
    /// always-active sentinel.
    #[must_use]
    pub fn new(range: f32) -> Self {
        let mut activation = Self {
            range,
            active: false,
        };
        activation.active = activation.is_unconditional();
        activation
    }

    /// Whether the range is the always-active sentinel.
    #[must_use]
    pub fn is_unconditional(&self) -> bool {
        (self.range - crate::constants::ALWAYS_ACTIVE).abs() < f32::EPSILON
    }
}

/// Patrol along the current velocity that reverses after `distance` units.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct BackAndForth {
    pub distance: f32,
    /// Distance covered since the last reversal.
    pub travelled: f32,
    /// Whether the patrol initially heads towards positive x.
    pub positive: bool,
}

impl Poolable for Position {}
impl Poolable for PreviousPosition {}
impl Poolable for Velocity {}
impl Poolable for Gravity {}
impl Poolable for BoundingBox {}
impl Poolable for BoundingCircle {}
impl Poolable for Facing {}
impl Poolable for Tint {}
impl Poolable for Remove {}
impl Poolable for Activation {}
impl Poolable for BackAndForth {}

impl Poolable for SpriteTexture {
    fn reset(&mut self) {
        self.key.clear();
        self.width = 0.0;
        self.height = 0.0;
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn activation_defaults_to_always_active() {
        let activation = Activation::default();
        assert!(activation.is_unconditional());
        assert!(activation.active);
        assert_eq!(activation, Activation::new(crate::constants::ALWAYS_ACTIVE));
    }

    #[rstest]
    fn texture_reset_matches_default() {
        let mut texture = SpriteTexture {
            key: "e_big_phi".to_owned(),
            width: 14.0,
            height: 16.0,
            visible: true,
        };
        texture.reset();
        assert_eq!(texture, SpriteTexture::default());
    }

    #[rstest]
    #[case(true, 1.0)]
    #[case(false, -1.0)]
    fn facing_sign(#[case] right: bool, #[case] expected: f32) {
        assert!((Facing { right }.sign() - expected).abs() < f32::EPSILON);
    }
}
