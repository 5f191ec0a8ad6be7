//! Grid alignment for block positions.
//!
//! Blocks are unit cubes whose horizontal centers sit on integer coordinates.
//! Vertical centers follow the layer they belong to: terrain layers use
//! half-integer heights (`-1.5`, `-2.5`, ...) while the prebuilt structure
//! uses whole numbers. Positions are therefore stored as `Vec3` rather than
//! as integer cells.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A vertical column of the world grid, addressed by integer X/Z.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub z: i32,
}

impl GridCell {
    /// Create a new column address
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Column shifted by the given offsets
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// Returns true if both coordinates are strictly farther than `margin`
    /// from the origin axes.
    #[inline]
    pub const fn is_beyond(self, margin: i32) -> bool {
        self.x.abs() > margin && self.z.abs() > margin
    }

    /// Block center in this column at height `y`
    #[inline]
    pub fn at(self, y: f32) -> Vec3 {
        Vec3::new(self.x as f32, y, self.z as f32)
    }
}

impl From<Vec3> for GridCell {
    fn from(v: Vec3) -> Self {
        Self::new(v.x.floor() as i32, v.z.floor() as i32)
    }
}

/// Center of the cell containing `point`, on the lattice of block centers
/// that passes through `anchor`.
///
/// Anchoring on an existing block keeps the result on that block's layer:
/// terrain sits on half-integer heights, the structure on whole ones.
#[inline]
pub fn cell_center(point: Vec3, anchor: Vec3, block_size: f32) -> Vec3 {
    anchor + ((point - anchor) / block_size + 0.5).floor() * block_size
}
