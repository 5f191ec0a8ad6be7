//! Hooks for the UI collaborator.

use blockyard_core::Resource;

use crate::inventory::Inventory;

/// Receives state changes the UI shows.
///
/// Every method defaults to doing nothing, so an observer only overrides
/// what it displays.
pub trait GameObserver {
    /// Counts changed after a mine or a placement.
    fn inventory_changed(&mut self, _inventory: &Inventory) {}

    /// The build kind was toggled.
    fn build_kind_changed(&mut self, _kind: Resource) {}

    /// The inventory screen opened (`true`) or closed.
    fn inventory_screen_changed(&mut self, _open: bool) {}

    /// The pointer was captured (`true`) or released.
    fn pointer_lock_changed(&mut self, _locked: bool) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {}
