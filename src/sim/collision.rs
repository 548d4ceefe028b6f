//! Contact detection and resolution
//!
//! Detection reports contact-begin pairs between bodies whose masks ask for
//! it. Resolution decides what a contact means: a monster touched by a
//! projectile destroys both and counts toward the win.

use super::body::Category;
use super::state::{GameEvent, GameState};

/// Find pairs that started touching since the last pass
///
/// Pairs are `(lower id, higher id)`, returned in ascending order. Pairs that
/// were already touching on the previous pass are not reported again.
pub fn detect_contacts(state: &mut GameState) -> Vec<(u32, u32)> {
    let mut current = std::collections::BTreeSet::new();

    let active: Vec<_> = state.entities.iter().filter(|e| e.is_active()).collect();
    for (i, a) in active.iter().enumerate() {
        let a_bounds = a.contact_bounds();
        for b in &active[i + 1..] {
            if !a.body.tests_contact_with(&b.body) {
                continue;
            }
            if a_bounds.overlaps(&b.contact_bounds()) {
                current.insert((a.id.min(b.id), a.id.max(b.id)));
            }
        }
    }

    let begun: Vec<_> = current.difference(&state.touching).copied().collect();
    state.touching = current;
    begun
}

/// Resolve a single contact-begin event
///
/// Returns true when the pair was a monster/projectile hit. The pair order
/// does not matter.
pub fn resolve_contact(state: &mut GameState, a: u32, b: u32) -> bool {
    if state.outcome().is_terminal() {
        return false;
    }

    // Either side may already be gone from an earlier contact this tick
    let (Some(body_a), Some(body_b)) = (
        state.entity(a).filter(|e| e.is_active()).map(|e| e.body),
        state.entity(b).filter(|e| e.is_active()).map(|e| e.body),
    ) else {
        return false;
    };

    // Lower category first
    let (first, second) = if body_a.category <= body_b.category {
        ((a, body_a), (b, body_b))
    } else {
        ((b, body_b), (a, body_a))
    };

    let hit = first.1.category.intersects(Category::MONSTER)
        && second.1.category.intersects(Category::PROJECTILE);
    if !hit {
        return false;
    }

    let (monster, projectile) = (first.0, second.0);
    for id in [monster, projectile] {
        if let Some(entity) = state.entity_mut(id) {
            entity.motion.cancel();
        }
        state.remove_entity(id);
    }
    log::debug!("Projectile {} destroyed monster {}", projectile, monster);
    state.emit(GameEvent::MonsterDestroyed {
        monster,
        projectile,
    });
    state.record_kill();
    true
}

/// Detect and resolve all contacts for this tick
pub fn run(state: &mut GameState) {
    for (a, b) in detect_contacts(state) {
        resolve_contact(state, a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::PhysicsBody;
    use crate::sim::motion::{Completion, MotionPlan};
    use crate::sim::state::{Entity, EntityKind, Outcome};
    use glam::Vec2;

    fn place(state: &mut GameState, kind: EntityKind, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        let (size, body) = match kind {
            EntityKind::Monster => (state.tuning.monster_size, PhysicsBody::monster()),
            EntityKind::Projectile => (state.tuning.projectile_size, PhysicsBody::projectile()),
        };
        state.add_entity(Entity {
            id,
            kind,
            pos,
            prev_pos: pos,
            size,
            body,
            motion: MotionPlan::new(pos, pos - Vec2::new(100.0, 0.0), 1.0, Completion::Despawn),
        });
        id
    }

    #[test]
    fn test_resolve_is_commutative() {
        for swap in [false, true] {
            let mut state = GameState::new(1);
            let monster = place(&mut state, EntityKind::Monster, Vec2::new(400.0, 300.0));
            let projectile = place(&mut state, EntityKind::Projectile, Vec2::new(400.0, 300.0));

            let (a, b) = if swap { (projectile, monster) } else { (monster, projectile) };
            assert!(resolve_contact(&mut state, a, b));
            assert!(state.entities.is_empty());
            assert_eq!(state.monsters_destroyed(), 1);
            assert!(state.events.contains(&GameEvent::MonsterDestroyed {
                monster,
                projectile
            }));
        }
    }

    #[test]
    fn test_same_category_is_noop() {
        let mut state = GameState::new(1);
        let m1 = place(&mut state, EntityKind::Monster, Vec2::new(400.0, 300.0));
        let m2 = place(&mut state, EntityKind::Monster, Vec2::new(400.0, 300.0));

        assert!(!resolve_contact(&mut state, m1, m2));
        assert_eq!(state.entities.len(), 2);
        assert_eq!(state.monsters_destroyed(), 0);
    }

    #[test]
    fn test_none_category_is_noop() {
        let mut state = GameState::new(1);
        let monster = place(&mut state, EntityKind::Monster, Vec2::new(400.0, 300.0));
        let scenery = place(&mut state, EntityKind::Projectile, Vec2::new(400.0, 300.0));
        state.entity_mut(scenery).unwrap().body.category = Category::NONE;

        assert!(!resolve_contact(&mut state, monster, scenery));
        assert_eq!(state.monsters_destroyed(), 0);
    }

    #[test]
    fn test_one_projectile_two_monsters_counts_once() {
        let mut state = GameState::new(1);
        place(&mut state, EntityKind::Monster, Vec2::new(400.0, 300.0));
        place(&mut state, EntityKind::Monster, Vec2::new(410.0, 300.0));
        place(&mut state, EntityKind::Projectile, Vec2::new(405.0, 300.0));

        run(&mut state);
        assert_eq!(state.monsters_destroyed(), 1);
        assert_eq!(state.count(EntityKind::Monster), 1);
        assert_eq!(state.count(EntityKind::Projectile), 0);
    }

    #[test]
    fn test_contact_reported_once() {
        let mut state = GameState::new(1);
        let m1 = place(&mut state, EntityKind::Monster, Vec2::new(400.0, 300.0));
        let p = place(&mut state, EntityKind::Projectile, Vec2::new(400.0, 300.0));

        assert_eq!(detect_contacts(&mut state), vec![(m1, p)]);
        assert!(detect_contacts(&mut state).is_empty());
    }

    #[test]
    fn test_monsters_do_not_contact_each_other() {
        let mut state = GameState::new(1);
        place(&mut state, EntityKind::Monster, Vec2::new(400.0, 300.0));
        place(&mut state, EntityKind::Monster, Vec2::new(400.0, 300.0));
        assert!(detect_contacts(&mut state).is_empty());
    }

    #[test]
    fn test_precise_body_swept_through_monster() {
        let mut state = GameState::new(1);
        let monster = place(&mut state, EntityKind::Monster, Vec2::new(400.0, 300.0));
        let projectile = place(&mut state, EntityKind::Projectile, Vec2::new(600.0, 300.0));
        // Jumped clean over the monster in one step
        state.entity_mut(projectile).unwrap().prev_pos = Vec2::new(200.0, 300.0);

        assert_eq!(detect_contacts(&mut state), vec![(monster, projectile)]);

        state.entity_mut(projectile).unwrap().body.precise = false;
        state.touching.clear();
        assert!(detect_contacts(&mut state).is_empty());
    }

    #[test]
    fn test_no_resolution_after_session_end() {
        let mut state = GameState::new(1);
        let monster = place(&mut state, EntityKind::Monster, Vec2::new(400.0, 300.0));
        let projectile = place(&mut state, EntityKind::Projectile, Vec2::new(400.0, 300.0));
        state.record_breach();

        assert!(!resolve_contact(&mut state, monster, projectile));
        assert_eq!(state.monsters_destroyed(), 0);
        assert_eq!(state.outcome(), Outcome::Lost);
    }
}
