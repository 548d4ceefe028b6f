//! Monster Shooter - a side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, firing, contacts, win/loss)
//! - `audio`: Sound playback requests and background music
//! - `scene`: Game / game-over scene presentation
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod audio;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::App;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Scene dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Sprite sizes
    pub const PLAYER_SIZE: Vec2 = Vec2::new(54.0, 80.0);
    pub const MONSTER_SIZE: Vec2 = Vec2::new(80.0, 100.0);
    pub const PROJECTILE_SIZE: Vec2 = Vec2::new(20.0, 20.0);

    /// Seconds between monster spawns
    pub const SPAWN_INTERVAL: f32 = 1.0;
    /// Monster traversal duration range (seconds); shorter is faster
    pub const MONSTER_MIN_DURATION: f32 = 2.0;
    pub const MONSTER_MAX_DURATION: f32 = 4.0;

    /// Distance a projectile is aimed along its direction (guaranteed off-screen)
    pub const PROJECTILE_RANGE: f32 = 1000.0;
    /// Time for a projectile to reach its far target
    pub const PROJECTILE_DURATION: f32 = 2.0;

    /// Win when monsters destroyed exceeds this
    pub const WIN_THRESHOLD: u32 = 30;

    /// Game-over scene hold time before a new session starts
    pub const GAME_OVER_HOLD: f32 = 3.0;
    /// Flip transition length
    pub const TRANSITION_DURATION: f32 = 0.5;
}

/// Normalize a vector, or `None` when it has zero (or non-finite) length
#[inline]
pub fn checked_normalize(v: Vec2) -> Option<Vec2> {
    v.try_normalize()
}

/// Linear interpolation between two points, `t` clamped to [0, 1]
#[inline]
pub fn lerp_point(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Point `distance` units from `origin` along `direction`
#[inline]
pub fn project_along(origin: Vec2, direction: Vec2, distance: f32) -> Vec2 {
    origin + direction * distance
}
