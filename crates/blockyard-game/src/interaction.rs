//! Mining and placement.
//!
//! Both act on the block under the crosshair, found by casting the view ray
//! through a [`RayQuery`]. Gameplay failures are outcome variants rather
//! than errors. A miss, an occupied or forbidden target cell, or an empty
//! inventory leaves the world and inventory untouched.

use blockyard_core::{cell_center, BlockKind, Resource};
use blockyard_physics::{PhysicsConfig, PlayerState, RayQuery, RaycastHit};
use blockyard_world::{BlockHandle, Damage, WorldGrid};
use glam::Vec3;
use tracing::{debug, trace};

use crate::config::InteractionConfig;
use crate::inventory::Inventory;

/// Result of a mining action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MineOutcome {
    /// No live block was targeted.
    NoTarget,
    /// The block took a hit and survives.
    Damaged {
        /// Kind of the block hit.
        kind: BlockKind,
        /// Hits left.
        remaining: u32,
    },
    /// The block was removed.
    Destroyed {
        /// Kind of the removed block.
        kind: BlockKind,
        /// Resource added to the inventory, if any.
        credited: Option<Resource>,
    },
}

impl MineOutcome {
    /// Resource added to the inventory by this hit, if any.
    #[must_use]
    pub const fn credited(&self) -> Option<Resource> {
        match self {
            Self::Destroyed { credited, .. } => *credited,
            Self::NoTarget | Self::Damaged { .. } => None,
        }
    }
}

/// Result of a placement action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaceOutcome {
    /// No live block was targeted.
    NoTarget,
    /// The target cell overlaps the player's body.
    InsidePlayer {
        /// Rejected block center.
        target: Vec3,
    },
    /// A live block already sits in the target cell.
    Occupied {
        /// Center of the occupied cell.
        target: Vec3,
    },
    /// None of the selected resource is held.
    OutOfStock {
        /// Resource that was needed.
        resource: Resource,
    },
    /// A block was created and one unit spent.
    Placed {
        /// New block.
        handle: BlockHandle,
        /// Center of the new block.
        position: Vec3,
        /// Resource spent.
        resource: Resource,
    },
}

impl PlaceOutcome {
    /// Returns true if a block was created.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }
}

/// Hit the targeted block once.
///
/// A block whose durability reaches zero is removed and its yield, if any,
/// credited. Water has zero durability, so one hit removes it and credits
/// nothing.
pub fn mine(
    grid: &mut WorldGrid,
    inventory: &mut Inventory,
    hit: Option<&RaycastHit>,
) -> MineOutcome {
    let Some(hit) = hit else {
        return MineOutcome::NoTarget;
    };
    let Some(kind) = grid.kind(hit.handle) else {
        trace!(handle = ?hit.handle, "Mine target is no longer in the grid");
        return MineOutcome::NoTarget;
    };

    match grid.damage(hit.handle) {
        Some(Damage::Remaining(remaining)) => {
            trace!(kind = kind.name(), remaining, "Block damaged");
            MineOutcome::Damaged { kind, remaining }
        }
        Some(Damage::Destroyed(record)) => {
            let credited = record.kind.yields();
            if let Some(resource) = credited {
                inventory.credit(resource);
            }
            debug!(
                kind = record.kind.name(),
                position = ?record.position,
                ?credited,
                "Block mined"
            );
            MineOutcome::Destroyed {
                kind: record.kind,
                credited,
            }
        }
        None => MineOutcome::NoTarget,
    }
}

/// Placement rules derived from the interaction and body configuration.
#[derive(Debug, Clone)]
pub struct InteractionEngine {
    config: InteractionConfig,
    block_size: f32,
    surface_y: f32,
    player_height: f32,
}

impl InteractionEngine {
    /// Create an engine for a world whose top terrain layer is centered at
    /// `surface_y`.
    #[must_use]
    pub fn new(config: InteractionConfig, physics: &PhysicsConfig, surface_y: f32) -> Self {
        Self {
            config,
            block_size: physics.block_size,
            surface_y,
            player_height: physics.player_height,
        }
    }

    /// Get the configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Block under the crosshair, within reach.
    pub fn target(&self, query: &impl RayQuery, player: &PlayerState) -> Option<RaycastHit> {
        query.cast_ray(&player.view_ray(), self.config.reach)
    }

    /// Center of the cell a placement against `hit` would fill.
    ///
    /// The hit point is pushed half a block out along the face normal and
    /// snapped to the center of the cell it lands in, on the hit block's
    /// lattice. Placing on top of the surface layer snaps the new block flush
    /// onto it, since terrain sits half a block off the structure's lattice.
    /// Returns `None` if the hit block is gone.
    #[must_use]
    pub fn placement_target(&self, grid: &WorldGrid, hit: &RaycastHit) -> Option<Vec3> {
        let block = grid.get(hit.handle)?;
        let pushed = hit.point + hit.normal * (self.block_size / 2.0);
        let mut target = cell_center(pushed, block.position, self.block_size);

        if hit.normal.y > 0.0 && (block.position.y - self.surface_y).abs() < 0.1 {
            target.y = self.surface_y + self.block_size;
        }
        Some(target)
    }

    /// Returns true if a block centered at `target` would bury the player
    /// whose eye is at `eye`.
    #[must_use]
    pub fn in_forbidden_zone(&self, target: Vec3, eye: Vec3) -> bool {
        let half_block = self.block_size / 2.0;
        (target.x - eye.x).abs() < half_block
            && (target.z - eye.z).abs() < half_block
            && target.y > eye.y - self.player_height / 2.0
            && target.y < eye.y + self.config.forbidden_zone_head_room
    }

    /// Place the player's selected kind against the targeted face.
    pub fn place(
        &self,
        grid: &mut WorldGrid,
        inventory: &mut Inventory,
        player: &PlayerState,
        hit: Option<&RaycastHit>,
    ) -> PlaceOutcome {
        let Some(target) = hit.and_then(|hit| self.placement_target(grid, hit)) else {
            return PlaceOutcome::NoTarget;
        };
        if self.in_forbidden_zone(target, player.position) {
            trace!(?target, "Placement inside player rejected");
            return PlaceOutcome::InsidePlayer { target };
        }
        if grid.find_at(target).is_some() {
            trace!(?target, "Placement into occupied cell rejected");
            return PlaceOutcome::Occupied { target };
        }

        let resource = player.selected_build_kind;
        if !inventory.try_spend(resource) {
            trace!(resource = resource.label(), "Placement without stock rejected");
            return PlaceOutcome::OutOfStock { resource };
        }

        let handle = grid.insert(resource.block_kind(), target);
        debug!(resource = resource.label(), position = ?target, "Block placed");
        PlaceOutcome::Placed {
            handle,
            position: target,
            resource,
        }
    }
}
