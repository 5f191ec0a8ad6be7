//! Ray queries against placed blocks.

use blockyard_core::Ray;
use blockyard_world::{BlockHandle, BlockRecord, WorldGrid};
use glam::Vec3;

/// Result of a raycast against blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Block that was hit
    pub handle: BlockHandle,
    /// World-space point where the ray enters the block
    pub point: Vec3,
    /// Outward normal of the entered face
    pub normal: Vec3,
    /// Distance from the ray origin
    pub distance: f32,
}

/// Nearest-hit ray query.
///
/// This is the seam to the picking collaborator: the interaction engine only
/// needs the nearest block along a ray, whoever computes it.
pub trait RayQuery {
    /// Nearest block the ray enters within `max_distance`.
    fn cast_ray(&self, ray: &Ray, max_distance: f32) -> Option<RaycastHit>;
}

/// Brute-force ray query over every block in a [`WorldGrid`].
///
/// Blocks whose box contains the ray origin are skipped. Among blocks at the
/// same distance the one with the lowest [`BlockRecord::sequence`] wins, so
/// ties resolve in insertion order even after slots have been reused.
#[derive(Clone, Copy)]
pub struct GridRaycaster<'a> {
    grid: &'a WorldGrid,
    block_size: f32,
    solid_only: bool,
}

impl<'a> GridRaycaster<'a> {
    /// Query every block, including non-solid ones.
    #[must_use]
    pub const fn new(grid: &'a WorldGrid, block_size: f32) -> Self {
        Self {
            grid,
            block_size,
            solid_only: false,
        }
    }

    /// Restrict the query to blocks that take part in collision.
    #[must_use]
    pub const fn solid_only(mut self) -> Self {
        self.solid_only = true;
        self
    }

    fn accepts(&self, record: &BlockRecord) -> bool {
        !self.solid_only || record.is_solid()
    }
}

impl RayQuery for GridRaycaster<'_> {
    fn cast_ray(&self, ray: &Ray, max_distance: f32) -> Option<RaycastHit> {
        let mut nearest: Option<(BlockHandle, f32, u64, Vec3)> = None;

        for (handle, record) in self.grid.iter() {
            if !self.accepts(record) {
                continue;
            }
            let Some(entry) = record.bounds(self.block_size).ray_entry(ray) else {
                continue;
            };
            if entry.distance > max_distance {
                continue;
            }
            let key = (entry.distance, record.sequence());
            if nearest.map_or(true, |(_, best, seq, _)| key < (best, seq)) {
                nearest = Some((handle, entry.distance, record.sequence(), entry.normal));
            }
        }

        nearest.map(|(handle, distance, _, normal)| RaycastHit {
            handle,
            point: ray.at(distance),
            normal,
            distance,
        })
    }
}
