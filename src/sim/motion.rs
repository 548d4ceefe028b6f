//! Motion plans: move to a point over a duration, then complete
//!
//! A plan is a small state machine owned by its entity. `advance` moves it
//! toward `Arrived`; `cancel` voids it so its completion never runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::lerp_point;

/// What happens once an entity reaches its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Completion {
    /// Entity reached the far edge unimpeded (monster breach)
    ReachedEdge,
    /// Nothing; the entity just despawns
    Despawn,
}

/// Lifecycle of a motion plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    Moving,
    Arrived,
    Cancelled,
}

/// Linear move from `start` to `target` over `duration` seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionPlan {
    pub start: Vec2,
    pub target: Vec2,
    pub duration: f32,
    pub elapsed: f32,
    pub completion: Completion,
    pub state: MotionState,
}

impl MotionPlan {
    pub fn new(start: Vec2, target: Vec2, duration: f32, completion: Completion) -> Self {
        Self {
            start,
            target,
            duration: duration.max(f32::EPSILON),
            elapsed: 0.0,
            completion,
            state: MotionState::Moving,
        }
    }

    /// Fraction of the move completed, 0..=1
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Position along the path at the current progress
    pub fn position(&self) -> Vec2 {
        lerp_point(self.start, self.target, self.progress())
    }

    /// Average speed along the path
    pub fn velocity(&self) -> Vec2 {
        (self.target - self.start) / self.duration
    }

    pub fn is_moving(&self) -> bool {
        self.state == MotionState::Moving
    }

    /// Advance by `dt`. Returns the completion exactly once, on arrival.
    pub fn advance(&mut self, dt: f32) -> Option<Completion> {
        if self.state != MotionState::Moving {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.state = MotionState::Arrived;
            return Some(self.completion);
        }
        None
    }

    /// Void the plan. A cancelled plan never completes.
    pub fn cancel(&mut self) {
        if self.state == MotionState::Moving {
            self.state = MotionState::Cancelled;
        }
    }
}
