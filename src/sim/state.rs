//! Game state and core simulation types
//!
//! One `GameState` is one play session. All gameplay mutation goes through
//! `tick`; nothing here touches rendering or audio output directly.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::PhysicsBody;
use super::motion::MotionPlan;
use super::spawner::SpawnTimer;
use crate::audio::SoundEffect;
use crate::tuning::Tuning;

/// Session outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Monster,
    Projectile,
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing both
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// A sprite with a physics body and a motion plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Position before the last motion step (for swept contact tests)
    pub prev_pos: Vec2,
    pub size: Vec2,
    pub body: PhysicsBody,
    pub motion: MotionPlan,
}

impl Entity {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Bounds used for contact detection; swept over the last step when precise
    pub fn contact_bounds(&self) -> Aabb {
        let current = self.bounds();
        if self.body.precise {
            current.union(&Aabb::from_center(self.prev_pos, self.size))
        } else {
            current
        }
    }

    /// Destroyed or finished entities are no longer part of the scene
    pub fn is_active(&self) -> bool {
        self.motion.is_moving()
    }
}

/// Reasons a fire input produced no projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Target is behind the player
    BackwardAim,
    /// Target equals the player position
    DegenerateAim,
}

/// Events emitted by the simulation for audio, UI and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Sound to play now
    Sound { effect: SoundEffect },
    MonsterSpawned { id: u32, y: f32, duration: f32 },
    ProjectileFired { id: u32, direction: Vec2 },
    ShotRejected { reason: RejectReason },
    MonsterDestroyed { monster: u32, projectile: u32 },
    /// Monster crossed the left edge unimpeded
    MonsterBreached { id: u32 },
    SessionEnded { outcome: Outcome, monsters_destroyed: u32 },
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Player anchor (fixed at screen-left)
    pub player_pos: Vec2,
    /// Active entities (sorted by id for determinism)
    pub entities: Vec<Entity>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub spawn_timer: SpawnTimer,
    /// Pairs reported as touching on the last contact pass (lower id first)
    pub touching: BTreeSet<(u32, u32)>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    monsters_destroyed: u32,
    outcome: Outcome,
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player_pos: tuning.player_position(),
            spawn_timer: SpawnTimer::new(tuning.spawn_interval),
            tuning,
            entities: Vec::new(),
            time_ticks: 0,
            touching: BTreeSet::new(),
            events: Vec::new(),
            monsters_destroyed: 0,
            outcome: Outcome::InProgress,
            next_id: 1,
        }
    }

    pub fn monsters_destroyed(&self) -> u32 {
        self.monsters_destroyed
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an entity to the scene. Ignored once the session has ended.
    pub fn add_entity(&mut self, entity: Entity) -> bool {
        if self.outcome.is_terminal() {
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Remove an entity from the scene
    pub fn remove_entity(&mut self, id: u32) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        self.touching.retain(|&(a, b)| a != id && b != id);
        Some(self.entities.remove(idx))
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Count a destroyed monster; wins once the count exceeds the threshold
    pub fn record_kill(&mut self) {
        if self.outcome.is_terminal() {
            return;
        }
        self.monsters_destroyed += 1;
        if self.monsters_destroyed > self.tuning.win_threshold {
            self.end_session(Outcome::Won);
        }
    }

    /// A monster got past the player
    pub fn record_breach(&mut self) {
        if self.outcome.is_terminal() {
            return;
        }
        self.end_session(Outcome::Lost);
    }

    fn end_session(&mut self, outcome: Outcome) {
        self.outcome = outcome;
        self.spawn_timer.stop();
        log::info!(
            "Session {:?} with {} monsters destroyed after {} ticks",
            outcome,
            self.monsters_destroyed,
            self.time_ticks
        );
        self.emit(GameEvent::SessionEnded {
            outcome,
            monsters_destroyed: self.monsters_destroyed,
        });
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.entities.sort_by_key(|e| e.id);
    }
}
