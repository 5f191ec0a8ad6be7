//! Two-resource inventory.

use blockyard_core::Resource;
use serde::{Deserialize, Serialize};

/// Wood and stone counters.
///
/// Counts only change through [`Inventory::credit`] and
/// [`Inventory::try_spend`], so they can never go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    wood: u32,
    stone: u32,
}

impl Inventory {
    /// Empty inventory.
    #[must_use]
    pub const fn new() -> Self {
        Self { wood: 0, stone: 0 }
    }

    /// Inventory holding the given counts.
    #[must_use]
    pub const fn with_counts(wood: u32, stone: u32) -> Self {
        Self { wood, stone }
    }

    /// Wood count.
    #[inline]
    #[must_use]
    pub const fn wood(&self) -> u32 {
        self.wood
    }

    /// Stone count.
    #[inline]
    #[must_use]
    pub const fn stone(&self) -> u32 {
        self.stone
    }

    /// Count of one resource.
    #[must_use]
    pub const fn count(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Wood => self.wood,
            Resource::Stone => self.stone,
        }
    }

    /// Add one unit.
    pub fn credit(&mut self, resource: Resource) {
        let slot = self.slot_mut(resource);
        *slot = slot.saturating_add(1);
    }

    /// Remove one unit if any is held. Returns false, leaving the count
    /// untouched, when the count is zero.
    pub fn try_spend(&mut self, resource: Resource) -> bool {
        let slot = self.slot_mut(resource);
        match slot.checked_sub(1) {
            Some(rest) => {
                *slot = rest;
                true
            }
            None => false,
        }
    }

    fn slot_mut(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Wood => &mut self.wood,
            Resource::Stone => &mut self.stone,
        }
    }
}

impl std::fmt::Display for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Wood: {} | Stone: {}", self.wood, self.stone)
    }
}
