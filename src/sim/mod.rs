//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod firing;
pub mod motion;
pub mod spawner;
pub mod state;
pub mod tick;

pub use body::{Category, PhysicsBody};
pub use collision::{detect_contacts, resolve_contact};
pub use firing::{FireError, aim_direction, fire};
pub use motion::{Completion, MotionPlan, MotionState};
pub use spawner::{SpawnTimer, spawn_monster};
pub use state::{Aabb, Entity, EntityKind, GameEvent, GameState, Outcome, RejectReason};
pub use tick::{TickInput, Touch, tick};
