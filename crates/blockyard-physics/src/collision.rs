//! Point-versus-block collision for the player body.
//!
//! The player is tested as a single reference point (the eye) against each
//! solid block with an asymmetric band: horizontally within half a block plus
//! 70% of the player's half-width, vertically from one block above the block
//! center down to one player height below it. Every query scans all blocks.

use blockyard_world::{BlockRecord, WorldGrid};
use glam::Vec3;

use crate::config::PhysicsConfig;

/// Share of the player's half-width that counts toward horizontal overlap.
const HALF_WIDTH_FACTOR: f32 = 0.7;

/// Collision queries for one grid and player body.
#[derive(Clone, Copy)]
pub struct Collider<'a> {
    grid: &'a WorldGrid,
    config: &'a PhysicsConfig,
}

impl<'a> Collider<'a> {
    /// Create a collider over `grid` using the body in `config`.
    #[must_use]
    pub const fn new(grid: &'a WorldGrid, config: &'a PhysicsConfig) -> Self {
        Self { grid, config }
    }

    /// Returns true if a player at `position` overlaps the block's band,
    /// ignoring solidity.
    #[must_use]
    pub fn overlaps(&self, position: Vec3, block: &BlockRecord) -> bool {
        let reach =
            self.config.block_size / 2.0 + self.config.player_half_width * HALF_WIDTH_FACTOR;
        let dy = position.y - block.position.y;

        (position.x - block.position.x).abs() < reach
            && (position.z - block.position.z).abs() < reach
            && dy < self.config.block_size
            && dy > -self.config.player_height
    }

    /// Returns true if `block` is solid and overlaps a player at `position`.
    #[inline]
    #[must_use]
    pub fn collides(&self, position: Vec3, block: &BlockRecord) -> bool {
        block.is_solid() && self.overlaps(position, block)
    }

    /// Returns true if any solid block collides with a player at `position`.
    #[must_use]
    pub fn check(&self, position: Vec3) -> bool {
        self.grid
            .solid_blocks()
            .any(|(_, block)| self.overlaps(position, block))
    }

    /// Test evenly spaced points from `from` (exclusive) to `to` (inclusive).
    ///
    /// Moves shorter than `min_sweep_distance` never collide.
    #[must_use]
    pub fn swept(&self, from: Vec3, to: Vec3) -> bool {
        if from.distance(to) < self.config.min_sweep_distance {
            return false;
        }
        let samples = self.config.swept_samples.max(1);
        (1..=samples).any(|i| {
            let t = i as f32 / samples as f32;
            self.check(from.lerp(to, t))
        })
    }

    /// Returns true if every block overlapping `position` is non-solid.
    #[must_use]
    pub fn passable(&self, position: Vec3) -> bool {
        self.grid
            .iter()
            .filter(|(_, block)| self.overlaps(position, block))
            .all(|(_, block)| !block.is_solid())
    }
}
