//! Physics bodies and collision-category masks
//!
//! Categories are single-bit flags. A body's `contact_test` mask lists the
//! categories it reports contacts against; `collision` lists categories it
//! is physically pushed back by (always empty here: contact-only bodies).

use std::ops::{BitAnd, BitOr};

use serde::{Deserialize, Serialize};

/// Bitset of collision categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Category(u32);

impl Category {
    pub const NONE: Category = Category(0);
    pub const MONSTER: Category = Category(0b01);
    pub const PROJECTILE: Category = Category(0b10);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if any bit is shared
    pub const fn intersects(self, other: Category) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitAnd for Category {
    type Output = Category;

    fn bitand(self, rhs: Category) -> Category {
        Category(self.0 & rhs.0)
    }
}

impl BitOr for Category {
    type Output = Category;

    fn bitor(self, rhs: Category) -> Category {
        Category(self.0 | rhs.0)
    }
}

/// Physics properties attached to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicsBody {
    /// What this body is
    pub category: Category,
    /// Categories that generate contact notifications with this body
    pub contact_test: Category,
    /// Categories this body physically collides with
    pub collision: Category,
    /// Moved by the simulation (not static scenery)
    pub dynamic: bool,
    /// Continuous (swept) contact detection for small, fast bodies
    pub precise: bool,
}

impl PhysicsBody {
    pub fn monster() -> Self {
        Self {
            category: Category::MONSTER,
            contact_test: Category::PROJECTILE,
            collision: Category::NONE,
            dynamic: true,
            precise: false,
        }
    }

    pub fn projectile() -> Self {
        Self {
            category: Category::PROJECTILE,
            contact_test: Category::MONSTER,
            collision: Category::NONE,
            dynamic: true,
            precise: true,
        }
    }

    /// Whether a contact between these two bodies should be reported
    pub fn tests_contact_with(&self, other: &PhysicsBody) -> bool {
        self.contact_test.intersects(other.category) || other.contact_test.intersects(self.category)
    }
}
