//! Aiming and firing projectiles from the player

use std::fmt;

use glam::Vec2;

use super::body::PhysicsBody;
use super::motion::{Completion, MotionPlan};
use super::state::{Entity, EntityKind, GameEvent, GameState, RejectReason};
use crate::audio::SoundEffect;
use crate::{checked_normalize, project_along};

/// Why a fire input did not launch a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireError {
    /// Shots only travel rightward from the player
    BackwardAim,
    /// Target is exactly on the player; no direction to fire in
    DegenerateAim,
    /// Session already ended
    SessionOver,
}

impl fmt::Display for FireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FireError::BackwardAim => write!(f, "target is behind the player"),
            FireError::DegenerateAim => write!(f, "target coincides with the player"),
            FireError::SessionOver => write!(f, "session has ended"),
        }
    }
}

impl std::error::Error for FireError {}

/// Unit aim direction from `from` toward `to`
///
/// Rejects targets behind `from` and zero-length offsets.
pub fn aim_direction(from: Vec2, to: Vec2) -> Result<Vec2, FireError> {
    let offset = to - from;
    if offset.x < 0.0 {
        return Err(FireError::BackwardAim);
    }
    checked_normalize(offset).ok_or(FireError::DegenerateAim)
}

/// Fire a projectile from the player toward `target`
///
/// The firing sound is emitted before any validation, so rejected shots
/// still make a sound.
pub fn fire(state: &mut GameState, target: Vec2) -> Result<u32, FireError> {
    if state.outcome().is_terminal() {
        return Err(FireError::SessionOver);
    }

    state.emit(GameEvent::Sound {
        effect: SoundEffect::Fire,
    });

    let origin = state.player_pos;
    let direction = match aim_direction(origin, target) {
        Ok(direction) => direction,
        Err(err) => {
            let reason = match err {
                FireError::BackwardAim => RejectReason::BackwardAim,
                FireError::DegenerateAim => RejectReason::DegenerateAim,
                FireError::SessionOver => return Err(err),
            };
            log::debug!("Shot at {:?} rejected: {}", target, err);
            state.emit(GameEvent::ShotRejected { reason });
            return Err(err);
        }
    };

    let far_target = project_along(origin, direction, state.tuning.projectile_range);
    let id = state.next_entity_id();
    state.add_entity(Entity {
        id,
        kind: EntityKind::Projectile,
        pos: origin,
        prev_pos: origin,
        size: state.tuning.projectile_size,
        body: PhysicsBody::projectile(),
        motion: MotionPlan::new(
            origin,
            far_target,
            state.tuning.projectile_duration,
            Completion::Despawn,
        ),
    });
    state.emit(GameEvent::ProjectileFired { id, direction });
    Ok(id)
}
