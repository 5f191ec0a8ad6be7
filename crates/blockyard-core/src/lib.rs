//! Core types, math, and traits for the Blockyard sandbox.
//!
//! This crate provides the foundational types used throughout the workspace:
//! - The fixed block catalog ([`BlockKind`], [`BlockProps`])
//! - The two collectable resources ([`Resource`])
//! - Grid alignment helpers
//! - Ray and box math
//! - Common error types

pub mod coords;
pub mod error;
pub mod math;
pub mod types;

pub use coords::{cell_center, GridCell};
pub use error::{Error, Result};
pub use math::{Aabb, Ray, RayEntry};
pub use types::{BlockKind, BlockProps, Resource};

/// World-wide constants
pub mod constants {
    /// Edge length of a block.
    pub const BLOCK_SIZE: f32 = 1.0;
    /// Half the edge length of a block.
    pub const HALF_BLOCK: f32 = BLOCK_SIZE / 2.0;
    /// Center height of the top terrain layer (grass, or water in the river).
    pub const SURFACE_Y: f32 = -1.5;
    /// Side length of the square generated world, in blocks.
    pub const WORLD_SIZE: i32 = 32;
}
