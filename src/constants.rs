//! Game tuning constants shared across the builder, factory and systems.
//!
//! Values reproduce the tuning of the shipped levels; anything a map or
//! the player data file can override lives in [`crate::config`] instead.

/// Upper bound applied to every frame's delta time, in seconds.
pub const DELTA_TIME_BOUND: f32 = 1.0 / 20.0;

/// Horizontal speed used when a recipe attaches velocity without a speed.
pub const DEFAULT_SPEED: f32 = 25.0;
/// Downward acceleration used when a recipe attaches gravity without values.
pub const DEFAULT_GRAVITY: f32 = -360.0;
/// Fall speed cap paired with [`DEFAULT_GRAVITY`].
pub const DEFAULT_TERMINAL_VELOCITY: f32 = -180.0;

/// Activation range sentinel meaning "active from creation".
pub const ALWAYS_ACTIVE: f32 = -1.0;

pub const DEFAULT_ATTACK_DAMAGE: i32 = 1;
pub const DEFAULT_ATTACK_RATE: f32 = 2.0;
pub const DEFAULT_PROJECTILE_SPEED: f32 = 45.0;
pub const DEFAULT_ATTACK_TEXTURE: &str = "p_dot";
pub const DEFAULT_KNOCKBACK: f32 = 75.0;

/// Seconds a health bar stays visible after a hit.
pub const HP_BAR_VISIBLE_DURATION: f32 = 2.0;
/// Shortened window used when a status icon competes for the same slot.
pub const HP_BAR_VISIBLE_DURATION_WITH_SE: f32 = 0.4;
pub const HEALTH_BAR_HEIGHT: f32 = 1.0;
pub const HP_BAR_X_OFFSET: f32 = 2.0;
pub const HP_BAR_Y_OFFSET: f32 = 3.0;

/// Edge length of a status effect icon.
pub const SE_SIZE: f32 = 5.0;
pub const SE_Y_OFFSET: f32 = 2.0;

/// Overlay texture keys that must exist before any level loads.
pub const HP_BAR_BACKDROP_KEY: &str = "black";
pub const HP_BAR_BACKGROUND_KEY: &str = "hp_bar_bg_color";
pub const HP_BAR_FILL_KEY: &str = "hp_bar_color";
pub const STATUS_EFFECT_KEY_PREFIX: &str = "status_effect_";

/// Texture suffix of the orbiting satellites of a multi-part enemy.
pub const ORBIT_SUFFIX: &str = "_orbit";
pub const BRACKET_LEFT: &str = "_left";
pub const BRACKET_RIGHT: &str = "_right";
pub const TOGGLE_ON: &str = "_on";
pub const TOGGLE_OFF: &str = "_off";

/// Number of satellites spawned around a `Percent` enemy.
pub const PERCENT_SATELLITES: u16 = 5;
pub const PERCENT_ORBIT_SPEED: f32 = 2.0;
pub const PERCENT_ORBIT_RADIUS: f32 = 15.0;

/// Vertical pull applied to arcing projectiles.
pub const ARC_GRAVITY: f32 = -120.0;
/// Seconds between vertical flips of a waving projectile.
pub const WAVE_PERIOD: f32 = 0.25;
/// Vertical speed of a waving projectile.
pub const WAVE_SPEED: f32 = 30.0;
/// Angle between neighbouring shots of a three-way spray, in radians.
pub const SPRAY_SPREAD: f32 = 0.3;
/// Initial lift given to arcing shots, as a fraction of projectile speed.
pub const ARC_LIFT: f32 = 0.8;
