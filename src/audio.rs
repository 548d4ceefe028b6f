//! Audio playback requests
//!
//! The simulation only says *what* should sound. `AudioManager` turns that
//! into playback requests (resource + volume) for whatever output backend the
//! frontend owns, and keeps the looping background track.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Background music resource
pub const BACKGROUND_MUSIC: &str = "background-music-aac.caf";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player fires (plays even when the shot is rejected)
    Fire,
}

impl SoundEffect {
    /// Resource file for this effect
    pub fn resource_name(&self) -> &'static str {
        match self {
            SoundEffect::Fire => "pew-pew-lei.caf",
        }
    }
}

/// Audio failures. None of these are fatal to gameplay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// Resource not found under the asset directory
    MissingAsset { path: PathBuf },
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::MissingAsset { path } => {
                write!(f, "audio asset not found: {}", path.display())
            }
        }
    }
}

impl std::error::Error for AudioError {}

/// A request for the output backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackRequest {
    pub resource: PathBuf,
    /// Effective volume (0.0 - 1.0)
    pub volume: f32,
    /// Loop indefinitely
    pub looping: bool,
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    asset_dir: PathBuf,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music: Option<PlaybackRequest>,
    pending: Vec<PlaybackRequest>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        Self {
            asset_dir: settings.asset_dir.clone(),
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            music: None,
            pending: Vec::new(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.refresh_music_volume();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.refresh_music_volume();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.refresh_music_volume();
    }

    fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    fn refresh_music_volume(&mut self) {
        let vol = self.effective_music_volume();
        if let Some(music) = &mut self.music {
            music.volume = vol;
        }
    }

    /// Play a one-shot sound effect. Returns false when silenced.
    pub fn play(&mut self, effect: SoundEffect) -> bool {
        let volume = self.effective_sfx_volume();
        if volume <= 0.0 {
            return false;
        }
        self.pending.push(PlaybackRequest {
            resource: self.asset_dir.join(effect.resource_name()),
            volume,
            looping: false,
        });
        true
    }

    /// Start the looping background track. Starting it again is a no-op.
    pub fn start_music(&mut self, track: &str) -> Result<(), AudioError> {
        if self.music.is_some() {
            return Ok(());
        }
        let path = self.asset_dir.join(track);
        if !path.is_file() {
            return Err(AudioError::MissingAsset { path });
        }
        let request = PlaybackRequest {
            resource: path,
            volume: self.effective_music_volume(),
            looping: true,
        };
        log::info!("Background music: {}", request.resource.display());
        self.pending.push(request.clone());
        self.music = Some(request);
        Ok(())
    }

    /// Currently looping track, if any
    pub fn music(&self) -> Option<&PlaybackRequest> {
        self.music.as_ref()
    }

    /// Take all requests queued since the last call
    pub fn drain_requests(&mut self) -> Vec<PlaybackRequest> {
        std::mem::take(&mut self.pending)
    }
}
