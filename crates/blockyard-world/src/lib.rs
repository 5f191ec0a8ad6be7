//! Block storage and one-shot world generation for the Blockyard sandbox.

pub mod generation;
pub mod grid;

pub use generation::{GenerationConfig, GenerationStats, StructureConfig, WorldGenerator};
pub use grid::{BlockHandle, BlockRecord, Damage, InstanceData, WorldGrid};

/// World seed for procedural generation.
pub type WorldSeed = u64;
