//! Camera-relative visibility for overlay culling.

use bevy::prelude::*;

/// The visible world rectangle, kept up to date by the external camera.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World coordinates of the view centre.
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Vec2::new(120.0, 67.5),
            width: 240.0,
            height: 135.0,
        }
    }
}

impl Viewport {
    /// Whether the world point `(x, y)` lies inside the view, edges included.
    #[must_use]
    pub fn within_camera(&self, x: f32, y: f32) -> bool {
        let half = Vec2::new(self.width, self.height) / 2.0;
        let min = self.center - half;
        let max = self.center + half;
        (min.x..=max.x).contains(&x) && (min.y..=max.y).contains(&y)
    }
}
