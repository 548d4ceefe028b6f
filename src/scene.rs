//! Scene presentation: gameplay and the end-of-session screen
//!
//! A finished session is replaced by a game-over scene; after a short hold
//! the director presents a brand new session.

use serde::{Deserialize, Serialize};

use crate::consts::{GAME_OVER_HOLD, TRANSITION_DURATION};
use crate::sim::{GameState, Outcome};
use crate::tuning::Tuning;

/// Visual effect used when swapping scenes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transition {
    /// Instant cut
    None,
    /// Horizontal flip over `duration` seconds
    FlipHorizontal { duration: f32 },
}

impl Transition {
    pub fn flip() -> Self {
        Transition::FlipHorizontal {
            duration: TRANSITION_DURATION,
        }
    }
}

/// End-of-session screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOverScene {
    pub outcome: Outcome,
    pub monsters_destroyed: u32,
    /// Seconds left before a new session starts
    pub remaining: f32,
}

impl GameOverScene {
    pub fn new(outcome: Outcome, monsters_destroyed: u32) -> Self {
        Self {
            outcome,
            monsters_destroyed,
            remaining: GAME_OVER_HOLD,
        }
    }

    pub fn message(&self) -> &'static str {
        match self.outcome {
            Outcome::Won => "You Won!",
            _ => "You Lose :[",
        }
    }
}

/// The scene currently on screen
#[derive(Debug, Clone)]
pub enum Scene {
    Playing(Box<GameState>),
    GameOver(GameOverScene),
}

/// Owns the current scene and records the last transition for the frontend
#[derive(Debug)]
pub struct SceneDirector {
    scene: Scene,
    last_transition: Transition,
    sessions_started: u32,
    /// Seed and tuning of the most recent session
    seed: u64,
    tuning: Tuning,
}

impl SceneDirector {
    pub fn new(session: GameState) -> Self {
        log::info!("Session 1 started (seed {})", session.seed);
        Self {
            seed: session.seed,
            tuning: session.tuning.clone(),
            scene: Scene::Playing(Box::new(session)),
            last_transition: Transition::None,
            sessions_started: 1,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The running session, if gameplay is on screen
    pub fn session_mut(&mut self) -> Option<&mut GameState> {
        match &mut self.scene {
            Scene::Playing(state) => Some(state.as_mut()),
            Scene::GameOver(_) => None,
        }
    }

    pub fn last_transition(&self) -> Transition {
        self.last_transition
    }

    pub fn sessions_started(&self) -> u32 {
        self.sessions_started
    }

    /// Replace the current scene
    pub fn present(&mut self, scene: Scene, transition: Transition) {
        match &scene {
            Scene::Playing(state) => {
                self.sessions_started += 1;
                self.seed = state.seed;
                self.tuning = state.tuning.clone();
                log::info!(
                    "Session {} started (seed {})",
                    self.sessions_started,
                    state.seed
                );
            }
            Scene::GameOver(over) => log::info!("{}", over.message()),
        }
        self.scene = scene;
        self.last_transition = transition;
    }

    /// Advance scene-level timers
    ///
    /// A finished session is handed off to the game-over scene, and an
    /// expired game-over scene to a fresh session.
    pub fn update(&mut self, dt: f32) {
        let next = match &mut self.scene {
            Scene::Playing(state) if state.outcome().is_terminal() => Some(Scene::GameOver(
                GameOverScene::new(state.outcome(), state.monsters_destroyed()),
            )),
            Scene::Playing(_) => None,
            Scene::GameOver(over) => {
                over.remaining -= dt;
                (over.remaining <= 0.0).then(|| {
                    Scene::Playing(Box::new(GameState::with_tuning(
                        self.seed.wrapping_add(1),
                        self.tuning.clone(),
                    )))
                })
            }
        };
        if let Some(scene) = next {
            self.present(scene, Transition::flip());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(GameOverScene::new(Outcome::Won, 31).message(), "You Won!");
        assert_eq!(GameOverScene::new(Outcome::Lost, 4).message(), "You Lose :[");
    }

    #[test]
    fn test_in_progress_session_stays() {
        let mut director = SceneDirector::new(GameState::new(10));
        director.update(1.0);
        assert!(matches!(director.scene(), Scene::Playing(_)));
        assert_eq!(director.last_transition(), Transition::None);
    }

    #[test]
    fn test_lost_session_goes_to_game_over_then_restarts() {
        let mut director = SceneDirector::new(GameState::new(10));
        director.session_mut().unwrap().record_breach();

        director.update(0.1);
        match director.scene() {
            Scene::GameOver(over) => {
                assert_eq!(over.outcome, Outcome::Lost);
                assert_eq!(over.remaining, GAME_OVER_HOLD);
            }
            Scene::Playing(_) => panic!("expected game over"),
        }
        assert_eq!(director.last_transition(), Transition::flip());

        director.update(1.0);
        assert!(matches!(director.scene(), Scene::GameOver(_)));
        director.update(2.0);

        match director.scene() {
            Scene::Playing(state) => {
                assert_eq!(state.seed, 11);
                assert_eq!(state.outcome(), Outcome::InProgress);
                assert_eq!(state.monsters_destroyed(), 0);
            }
            Scene::GameOver(_) => panic!("expected a new session"),
        }
        assert_eq!(director.sessions_started(), 2);
    }

    #[test]
    fn test_restart_keeps_tuning() {
        let tuning = Tuning {
            win_threshold: 4,
            ..Default::default()
        };
        let mut director = SceneDirector::new(GameState::with_tuning(1, tuning));
        director.session_mut().unwrap().record_breach();
        director.update(0.0);
        director.update(GAME_OVER_HOLD);
        assert_eq!(director.session_mut().unwrap().tuning.win_threshold, 4);
    }
}
