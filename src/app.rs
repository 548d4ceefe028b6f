//! Application shell: scenes, audio and the fixed-step frame loop
//!
//! Owns the audio handle and the scene director. Each frame is split into
//! fixed simulation steps; simulation events are forwarded to audio and
//! returned to the caller for rendering/UI.

use crate::audio::{AudioManager, BACKGROUND_MUSIC};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::scene::{Scene, SceneDirector};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

pub struct App {
    pub director: SceneDirector,
    pub audio: AudioManager,
    idle_mode: bool,
    accumulator: f32,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let mut audio = AudioManager::new(settings);
        if let Err(e) = audio.start_music(BACKGROUND_MUSIC) {
            log::warn!("{} - continuing without music", e);
        }

        let seed = settings.resolve_seed();
        let session = GameState::with_tuning(seed, settings.tuning.clone());

        Self {
            director: SceneDirector::new(session),
            audio,
            idle_mode: settings.idle_mode,
            accumulator: 0.0,
        }
    }

    /// Run one fixed simulation step
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if let Some(state) = self.director.session_mut() {
            let input = if self.idle_mode && !input.idle_mode {
                TickInput {
                    idle_mode: true,
                    ..input.clone()
                }
            } else {
                input.clone()
            };
            tick(state, &input, SIM_DT);
            events = state.drain_events();
        }

        for event in &events {
            if let GameEvent::Sound { effect } = event {
                self.audio.play(*effect);
            }
        }

        self.director.update(SIM_DT);
        events
    }

    /// Advance by a frame of wall-clock time
    ///
    /// Input is applied on the first fixed step only. Steps beyond
    /// `MAX_SUBSTEPS` are dropped.
    pub fn frame(&mut self, frame_dt: f32, input: &TickInput) -> Vec<GameEvent> {
        self.accumulator += frame_dt.max(0.0);

        let mut events = Vec::new();
        let mut steps = 0;
        let idle = TickInput::default();
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            let step_input = if steps == 0 { input } else { &idle };
            events.extend(self.step(step_input));
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::warn!("Frame took too long, dropping {:.3}s of simulation", self.accumulator);
            self.accumulator = 0.0;
        }
        events
    }

    /// True while gameplay (not the game-over screen) is presented
    pub fn is_playing(&self) -> bool {
        matches!(self.director.scene(), Scene::Playing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Outcome;
    use glam::Vec2;
    use std::path::PathBuf;

    fn settings() -> Settings {
        Settings {
            seed: Some(42),
            asset_dir: PathBuf::from("/nonexistent/sounds"),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_music_does_not_stop_play() {
        let mut app = App::new(&settings());
        assert!(app.audio.music().is_none());
        app.step(&TickInput::default());
        assert!(app.is_playing());
    }

    #[test]
    fn test_fire_sound_reaches_audio() {
        let mut app = App::new(&settings());
        app.audio.drain_requests();

        // Backward shot: rejected, still audible
        let events = app.step(&TickInput::tap(Vec2::new(0.0, 300.0)));
        assert!(events.iter().any(|e| matches!(e, GameEvent::ShotRejected { .. })));
        assert_eq!(app.audio.drain_requests().len(), 1);
    }

    #[test]
    fn test_frame_runs_fixed_steps() {
        let mut app = App::new(&settings());
        app.frame(SIM_DT * 3.5, &TickInput::default());
        match app.director.scene() {
            Scene::Playing(state) => assert_eq!(state.time_ticks, 3),
            Scene::GameOver(_) => panic!("session should still be running"),
        }
    }

    #[test]
    fn test_frame_caps_substeps() {
        let mut app = App::new(&settings());
        app.frame(10.0, &TickInput::default());
        match app.director.scene() {
            Scene::Playing(state) => assert_eq!(state.time_ticks, MAX_SUBSTEPS as u64),
            Scene::GameOver(_) => panic!("session should still be running"),
        }
    }

    #[test]
    fn test_session_cycle_reports_end() {
        let mut app = App::new(&settings());
        let mut ended = None;
        for _ in 0..(60 * 10) {
            for event in app.step(&TickInput::default()) {
                if let GameEvent::SessionEnded { outcome, .. } = event {
                    ended = Some(outcome);
                }
            }
            if !app.is_playing() {
                break;
            }
        }
        assert_eq!(ended, Some(Outcome::Lost));
        assert!(!app.is_playing());
    }
}
