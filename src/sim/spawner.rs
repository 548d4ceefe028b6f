//! Monster spawning on a fixed repeating interval

use glam::Vec2;
use rand::Rng;

use super::body::PhysicsBody;
use super::motion::{Completion, MotionPlan};
use super::state::{Entity, EntityKind, GameEvent, GameState};

/// Repeat-forever trigger. Fires on its first step, then once per interval.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    interval: f32,
    until_next: f32,
    running: bool,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(f32::EPSILON),
            until_next: 0.0,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop for good; a stopped timer never fires again
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance by `dt`, returning how many spawns are due
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.running {
            return 0;
        }
        self.until_next -= dt;
        let mut due = 0;
        while self.until_next <= 0.0 {
            due += 1;
            self.until_next += self.interval;
        }
        due
    }
}

/// Spawn one monster just off the right edge, heading for just off the left
///
/// Returns the new entity id, or `None` if the session has already ended.
pub fn spawn_monster(state: &mut GameState) -> Option<u32> {
    if state.outcome().is_terminal() {
        return None;
    }

    let size = state.tuning.monster_size;
    let half = size / 2.0;
    let (y_min, y_max) = state.tuning.monster_y_range();
    let y = state.rng.random_range(y_min..=y_max);
    let duration = state
        .rng
        .random_range(state.tuning.monster_min_duration..=state.tuning.monster_max_duration);

    let start = Vec2::new(state.tuning.screen_size.x + half.x, y);
    let target = Vec2::new(-half.x, y);

    let id = state.next_entity_id();
    state.add_entity(Entity {
        id,
        kind: EntityKind::Monster,
        pos: start,
        prev_pos: start,
        size,
        body: PhysicsBody::monster(),
        motion: MotionPlan::new(start, target, duration, Completion::ReachedEdge),
    });
    log::debug!("Monster {} spawned at y={:.1}, crossing in {:.2}s", id, y, duration);
    state.emit(GameEvent::MonsterSpawned { id, y, duration });
    Some(id)
}

/// Advance the spawn timer and create any monsters that are due
pub fn run(state: &mut GameState, dt: f32) {
    let due = state.spawn_timer.advance(dt);
    for _ in 0..due {
        if spawn_monster(state).is_none() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::body::Category;
    use crate::sim::state::Outcome;
    use proptest::prelude::*;

    #[test]
    fn test_timer_fires_immediately_then_per_interval() {
        let mut timer = SpawnTimer::new(1.0);
        assert_eq!(timer.advance(0.25), 1);
        assert_eq!(timer.advance(0.25), 0);
        assert_eq!(timer.advance(0.25), 0);
        assert_eq!(timer.advance(0.25), 1);
        assert_eq!(timer.advance(2.0), 2);
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = SpawnTimer::new(1.0);
        timer.stop();
        assert_eq!(timer.advance(10.0), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_spawned_monster_setup() {
        let mut state = GameState::new(7);
        let id = spawn_monster(&mut state).unwrap();
        let monster = state.entity(id).unwrap();

        assert_eq!(monster.kind, EntityKind::Monster);
        assert_eq!(monster.pos.x, 800.0 + 40.0);
        assert_eq!(monster.motion.target, Vec2::new(-40.0, monster.pos.y));
        assert_eq!(monster.body.category, Category::MONSTER);
        assert_eq!(monster.body.contact_test, Category::PROJECTILE);
        assert_eq!(monster.body.collision, Category::NONE);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::MonsterSpawned { id: spawned, .. }) if *spawned == id
        ));
    }

    #[test]
    fn test_no_spawn_after_session_end() {
        let mut state = GameState::new(7);
        state.record_breach();
        assert_eq!(state.outcome(), Outcome::Lost);
        assert!(spawn_monster(&mut state).is_none());
        run(&mut state, 5.0);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_run_spawns_one_per_second() {
        let mut state = GameState::new(3);
        for _ in 0..(60 * 3) {
            run(&mut state, SIM_DT);
        }
        // t=0, 1, 2 (and possibly 3 within float tolerance)
        let spawned = state.count(EntityKind::Monster);
        assert!((3..=4).contains(&spawned), "spawned {}", spawned);
    }

    proptest! {
        #[test]
        fn prop_spawn_within_bounds(seed in any::<u64>()) {
            let mut state = GameState::new(seed);
            let (y_min, y_max) = state.tuning.monster_y_range();
            for _ in 0..16 {
                let id = spawn_monster(&mut state).unwrap();
                let monster = state.entity(id).unwrap();
                prop_assert!(monster.pos.y >= y_min && monster.pos.y <= y_max);
                prop_assert!(monster.motion.duration >= 2.0 && monster.motion.duration <= 4.0);
            }
        }
    }
}
