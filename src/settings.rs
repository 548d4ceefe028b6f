//! Game settings and preferences
//!
//! Loaded from an optional JSON file at startup. Never written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute all audio
    pub muted: bool,
    /// Directory holding sound resources
    pub asset_dir: PathBuf,

    // === Session ===
    /// Fixed RNG seed (None = derive from clock)
    pub seed: Option<u64>,
    /// Autopilot plays the game (attract/demo mode)
    pub idle_mode: bool,

    /// Gameplay balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            asset_dir: PathBuf::from("assets/sounds"),

            seed: None,
            idle_mode: false,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Clamp volumes and repair tuning values
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.tuning = self.tuning.sanitized();
        self
    }

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}", path.display(), e);
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Seed for the first session
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
