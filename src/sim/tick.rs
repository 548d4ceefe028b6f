//! Fixed timestep simulation tick
//!
//! Phase order per tick: input, contacts, motion, spawns. Win/loss is
//! decided inside the phases; once a session ends the remaining phases
//! are skipped and later ticks do nothing.

use glam::Vec2;

use super::motion::Completion;
use super::state::{EntityKind, GameEvent, GameState};
use super::{collision, firing, spawner};

/// Autopilot fires at most once per this many ticks
const AUTOPILOT_FIRE_TICKS: u64 = 15;

/// A single touch point in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub id: u64,
    pub point: Vec2,
}

/// Input events for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Touches that started this tick (no gameplay effect)
    pub touches_began: Vec<Touch>,
    /// Touches that ended this tick; each one fires
    pub touches_ended: Vec<Touch>,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Input with a single tap released at `point`
    pub fn tap(point: Vec2) -> Self {
        Self {
            touches_ended: vec![Touch { id: 0, point }],
            ..Default::default()
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.outcome().is_terminal() {
        return;
    }
    state.time_ticks += 1;

    // 1. Input
    for touch in &input.touches_began {
        log::trace!("Touch {} began at {:?}", touch.id, touch.point);
    }
    let mut targets: Vec<Vec2> = input.touches_ended.iter().map(|t| t.point).collect();
    if input.idle_mode {
        targets.extend(autopilot_target(state));
    }
    // Each touch stands alone; a rejected shot does not stop the rest
    for target in targets {
        if let Err(e) = firing::fire(state, target) {
            log::trace!("Touch at {:?} did not fire: {}", target, e);
        }
    }

    // 2. Contacts
    collision::run(state);
    if state.outcome().is_terminal() {
        return;
    }

    // 3. Motion and arrivals
    advance_motion(state, dt);
    if state.outcome().is_terminal() {
        return;
    }

    // 4. Spawns
    spawner::run(state, dt);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Step every moving entity along its plan and run completions
fn advance_motion(state: &mut GameState, dt: f32) {
    let mut arrived = Vec::new();
    for entity in &mut state.entities {
        if !entity.motion.is_moving() {
            continue;
        }
        entity.prev_pos = entity.pos;
        let completion = entity.motion.advance(dt);
        entity.pos = entity.motion.position();
        if let Some(completion) = completion {
            arrived.push((entity.id, completion));
        }
    }

    for (id, completion) in arrived {
        // Removal first: the plan runs completion then removes itself
        if state.remove_entity(id).is_none() {
            continue;
        }
        if completion == Completion::ReachedEdge && !state.outcome().is_terminal() {
            log::debug!("Monster {} reached the edge", id);
            state.emit(GameEvent::MonsterBreached { id });
            state.record_breach();
        }
    }
}

/// Where the autopilot wants to shoot this tick, if anywhere
///
/// Leads the monster closest to the player by the projectile flight time.
fn autopilot_target(state: &GameState) -> Option<Vec2> {
    if state.time_ticks % AUTOPILOT_FIRE_TICKS != 0 {
        return None;
    }
    let origin = state.player_pos;
    let projectile_speed = state.tuning.projectile_range / state.tuning.projectile_duration;

    state
        .entities
        .iter()
        .filter(|e| e.kind == EntityKind::Monster && e.is_active())
        .filter(|e| e.pos.x > origin.x + e.size.x)
        .min_by(|a, b| a.pos.x.partial_cmp(&b.pos.x).unwrap_or(std::cmp::Ordering::Equal))
        .map(|monster| {
            let flight = (monster.pos - origin).length() / projectile_speed;
            monster.pos + monster.motion.velocity() * flight
        })
        .filter(|target| target.x > origin.x)
}
