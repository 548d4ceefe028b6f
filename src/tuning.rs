//! Data-driven game balance
//!
//! Defaults mirror `consts`; the settings file can override any field.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Upper bound for any length (points) or duration (seconds)
pub const MAX_TUNING_VALUE: f32 = 1.0e6;

/// Gameplay tuning for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Scene size in points
    pub screen_size: Vec2,
    pub player_size: Vec2,
    pub monster_size: Vec2,
    pub projectile_size: Vec2,
    /// Seconds between monster spawns
    pub spawn_interval: f32,
    /// Monster traversal duration range (seconds)
    pub monster_min_duration: f32,
    pub monster_max_duration: f32,
    /// Projectile aim distance and flight time
    pub projectile_range: f32,
    pub projectile_duration: f32,
    /// Session is won once destroyed monsters exceed this
    pub win_threshold: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_size: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            player_size: PLAYER_SIZE,
            monster_size: MONSTER_SIZE,
            projectile_size: PROJECTILE_SIZE,
            spawn_interval: SPAWN_INTERVAL,
            monster_min_duration: MONSTER_MIN_DURATION,
            monster_max_duration: MONSTER_MAX_DURATION,
            projectile_range: PROJECTILE_RANGE,
            projectile_duration: PROJECTILE_DURATION,
            win_threshold: WIN_THRESHOLD,
        }
    }
}

impl Tuning {
    /// Player anchor: 10% in from the left edge, vertically centred
    pub fn player_position(&self) -> Vec2 {
        Vec2::new(self.screen_size.x * 0.1, self.screen_size.y * 0.5)
    }

    /// Valid range for a monster's Y so it stays fully on screen
    pub fn monster_y_range(&self) -> (f32, f32) {
        let half = self.monster_size.y / 2.0;
        let hi = (self.screen_size.y - half).max(half);
        (half, hi)
    }

    /// Repair out-of-range values after loading from disk
    ///
    /// Every length and duration must be finite, positive and at most
    /// `MAX_TUNING_VALUE`; anything else falls back to its default.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !valid_extent(self.screen_size) {
            log::warn!("Invalid screen size {:?}, using default", self.screen_size);
            self.screen_size = defaults.screen_size;
        }
        for (size, default, name) in [
            (&mut self.player_size, defaults.player_size, "player"),
            (&mut self.monster_size, defaults.monster_size, "monster"),
            (&mut self.projectile_size, defaults.projectile_size, "projectile"),
        ] {
            if !valid_extent(*size) {
                log::warn!("Invalid {} size {:?}, using default", name, size);
                *size = default;
            }
        }
        for (value, default, name) in [
            (&mut self.spawn_interval, defaults.spawn_interval, "spawn_interval"),
            (
                &mut self.monster_min_duration,
                defaults.monster_min_duration,
                "monster_min_duration",
            ),
            (&mut self.projectile_range, defaults.projectile_range, "projectile_range"),
            (
                &mut self.projectile_duration,
                defaults.projectile_duration,
                "projectile_duration",
            ),
        ] {
            if !valid_value(*value) {
                log::warn!("Invalid {} {}, using default", name, value);
                *value = default;
            }
        }
        if !valid_value(self.monster_max_duration)
            || self.monster_max_duration < self.monster_min_duration
        {
            log::warn!(
                "Invalid monster_max_duration {}, using {}",
                self.monster_max_duration,
                self.monster_min_duration
            );
            self.monster_max_duration = self.monster_min_duration;
        }
        self
    }
}

fn valid_value(value: f32) -> bool {
    value.is_finite() && value > 0.0 && value <= MAX_TUNING_VALUE
}

fn valid_extent(size: Vec2) -> bool {
    valid_value(size.x) && valid_value(size.y)
}
