//! Procedural world population.
//!
//! Generation runs once, over a square of `world_size` columns centered on
//! the origin. Placements are additive: nothing checks whether a cell is
//! already taken, so rock outcrops and windows layer on top of existing
//! blocks.

use blockyard_core::constants::{SURFACE_Y, WORLD_SIZE};
use blockyard_core::{BlockKind, Error, GridCell, Result};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::grid::WorldGrid;
use crate::WorldSeed;

/// Prebuilt house placement and dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureConfig {
    /// X of the footprint's first column.
    pub origin_x: i32,
    /// Z of the footprint's first column (the door wall).
    pub origin_z: i32,
    /// Footprint extent along X.
    pub width: i32,
    /// Footprint extent along Z.
    pub length: i32,
    /// Wall height; the roof sits at this Y.
    pub height: i32,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            origin_x: 8,
            origin_z: 8,
            width: 7,
            length: 7,
            height: 4,
        }
    }
}

/// World generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Seed for the random content.
    pub seed: WorldSeed,
    /// Side length of the generated square, in columns. Must be even.
    pub world_size: i32,
    /// Columns with `|x| < river_half_width` become river.
    pub river_half_width: i32,
    /// Center height of the top terrain layer.
    pub surface_y: f32,
    /// Chance of a rock outcrop per terrain column.
    pub rock_chance: f64,
    /// Outcrops and scattered clusters need `|x|` and `|z|` above this.
    pub rock_margin: i32,
    /// Neighbor stones tried around each outcrop.
    pub rock_neighbor_attempts: u32,
    /// Chance each non-center neighbor attempt places a stone.
    pub rock_neighbor_chance: f64,
    /// Chance of a tree per terrain column.
    pub tree_chance: f64,
    /// Trees need `|x|` and `|z|` above this.
    pub tree_margin: i32,
    /// Rock clusters scattered after the terrain pass.
    pub scattered_clusters: u32,
    /// The prebuilt house.
    pub structure: StructureConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            world_size: WORLD_SIZE,
            river_half_width: 3,
            surface_y: SURFACE_Y,
            rock_chance: 0.03,
            rock_margin: 5,
            rock_neighbor_attempts: 3,
            rock_neighbor_chance: 0.7,
            tree_chance: 0.02,
            tree_margin: 8,
            scattered_clusters: 20,
            structure: StructureConfig::default(),
        }
    }
}

impl GenerationConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.world_size <= 0 || self.world_size % 2 != 0 {
            return Err(Error::InvalidConfig(format!(
                "world_size must be positive and even, got {}",
                self.world_size
            )));
        }
        for (name, chance) in [
            ("rock_chance", self.rock_chance),
            ("rock_neighbor_chance", self.rock_neighbor_chance),
            ("tree_chance", self.tree_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {chance}"
                )));
            }
        }
        let s = &self.structure;
        if s.width < 3 || s.length < 3 || s.height < 3 {
            return Err(Error::InvalidConfig(format!(
                "structure must be at least 3x3x3, got {}x{}x{}",
                s.width, s.length, s.height
            )));
        }
        Ok(())
    }
}

/// Counts of what a generation pass placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// River columns (water over sand).
    pub river_columns: u32,
    /// Terrain columns (grass, dirt, stone).
    pub terrain_columns: u32,
    /// Rock outcrops grown on terrain columns.
    pub outcrops: u32,
    /// Trees grown.
    pub trees: u32,
    /// Scattered clusters that passed the margin check.
    pub clusters: u32,
    /// Blocks removed to open the doorway.
    pub door_blocks_removed: u32,
    /// Blocks live after generation.
    pub total_blocks: usize,
}

/// One-shot world populator.
pub struct WorldGenerator {
    config: GenerationConfig,
    rng: StdRng,
}

impl WorldGenerator {
    /// Create a generator, validating the configuration.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self { config, rng })
    }

    /// Create a generator with default configuration.
    pub fn with_seed(seed: WorldSeed) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config: GenerationConfig {
                seed,
                ..Default::default()
            },
        }
    }

    /// Get the generation configuration.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Populate `grid`: terrain pass, scattered clusters, then the house.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn generate(&mut self, grid: &mut WorldGrid) -> GenerationStats {
        let mut stats = GenerationStats::default();
        let half = self.config.world_size / 2;

        for x in -half..half {
            for z in -half..half {
                self.populate_column(grid, GridCell::new(x, z), &mut stats);
            }
        }

        for _ in 0..self.config.scattered_clusters {
            self.scatter_cluster(grid, &mut stats);
        }

        self.build_structure(grid, &mut stats);

        stats.total_blocks = grid.len();
        info!(
            seed = self.config.seed,
            blocks = stats.total_blocks,
            outcrops = stats.outcrops,
            trees = stats.trees,
            clusters = stats.clusters,
            "World generated"
        );
        stats
    }

    fn populate_column(
        &mut self,
        grid: &mut WorldGrid,
        cell: GridCell,
        stats: &mut GenerationStats,
    ) {
        let surface = self.config.surface_y;

        if cell.x.abs() < self.config.river_half_width {
            grid.insert(BlockKind::Water, cell.at(surface));
            grid.insert(BlockKind::Sand, cell.at(surface - 1.0));
            stats.river_columns += 1;
            return;
        }

        grid.insert(BlockKind::Grass, cell.at(surface));
        grid.insert(BlockKind::Dirt, cell.at(surface - 1.0));
        grid.insert(BlockKind::Stone, cell.at(surface - 2.0));
        stats.terrain_columns += 1;

        // Chance rolls precede the margin checks on every terrain column.
        if self.rng.gen_bool(self.config.rock_chance) && cell.is_beyond(self.config.rock_margin) {
            self.grow_outcrop(grid, cell);
            stats.outcrops += 1;
        }

        if self.rng.gen_bool(self.config.tree_chance) && cell.is_beyond(self.config.tree_margin) {
            self.grow_tree(grid, cell);
            stats.trees += 1;
        }
    }

    fn grow_outcrop(&mut self, grid: &mut WorldGrid, cell: GridCell) {
        let surface = self.config.surface_y;
        let height = self.rng.gen_range(1..=2);
        self.stack(grid, BlockKind::Stone, cell, height);

        for _ in 0..self.config.rock_neighbor_attempts {
            let neighbor = self.random_neighbor(cell);
            if neighbor == cell {
                continue;
            }
            if self.rng.gen_bool(self.config.rock_neighbor_chance) {
                grid.insert(BlockKind::Stone, neighbor.at(surface));
            }
        }
        debug!(x = cell.x, z = cell.z, height, "Rock outcrop");
    }

    fn grow_tree(&mut self, grid: &mut WorldGrid, cell: GridCell) {
        let surface = self.config.surface_y;
        let trunk_height = self.rng.gen_range(4..=6);
        self.stack(grid, BlockKind::Wood, cell, trunk_height);

        // 5x5x3 canopy directly above the trunk, minus the four corner columns.
        let canopy_base = surface + trunk_height as f32;
        for lx in -2..=2_i32 {
            for lz in -2..=2_i32 {
                if lx.abs() == 2 && lz.abs() == 2 {
                    continue;
                }
                for ly in 0..3 {
                    grid.insert(
                        BlockKind::Leaves,
                        cell.offset(lx, lz).at(canopy_base + ly as f32),
                    );
                }
            }
        }
        debug!(x = cell.x, z = cell.z, trunk_height, "Tree");
    }

    fn scatter_cluster(&mut self, grid: &mut WorldGrid, stats: &mut GenerationStats) {
        let size = self.config.world_size;
        let half = size / 2;
        let center = GridCell::new(
            self.rng.gen_range(0..size) - half,
            self.rng.gen_range(0..size) - half,
        );
        if !center.is_beyond(self.config.rock_margin) {
            return;
        }

        let pieces = self.rng.gen_range(2..=4);
        for _ in 0..pieces {
            let spot = self.random_neighbor(center);
            let height = self.rng.gen_range(1..=2);
            self.stack(grid, BlockKind::Stone, spot, height);
        }
        stats.clusters += 1;
    }

    fn build_structure(&self, grid: &mut WorldGrid, stats: &mut GenerationStats) {
        let StructureConfig {
            origin_x: ox,
            origin_z: oz,
            width: w,
            length: l,
            height: h,
        } = self.config.structure;
        let block = |x: i32, y: i32, z: i32| Vec3::new(x as f32, y as f32, z as f32);

        for x in ox..ox + w {
            for z in oz..oz + l {
                grid.insert(BlockKind::Wood, block(x, -1, z));
            }
        }

        for y in 0..h {
            for x in ox..ox + w {
                grid.insert(BlockKind::Wood, block(x, y, oz));
                grid.insert(BlockKind::Wood, block(x, y, oz + l - 1));
            }
            for z in oz + 1..oz + l - 1 {
                grid.insert(BlockKind::Wood, block(ox, y, z));
                grid.insert(BlockKind::Wood, block(ox + w - 1, y, z));
            }
        }

        // The doorway keeps its bottom block as a step.
        let door_x = ox + w / 2;
        for y in 1..3 {
            if grid.remove_first_at(block(door_x, y, oz)).is_some() {
                stats.door_blocks_removed += 1;
            }
        }

        // Windows are layered over the wall blocks already at these cells.
        let window_y = 2;
        for (x, z) in [
            (ox + 2, oz),
            (ox + w - 3, oz),
            (ox, oz + 2),
            (ox, oz + l - 3),
            (ox + w - 1, oz + 2),
            (ox + w - 1, oz + l - 3),
        ] {
            grid.insert(BlockKind::Water, block(x, window_y, z));
        }

        for x in ox - 1..ox + w + 1 {
            for z in oz - 1..oz + l + 1 {
                grid.insert(BlockKind::Wood, block(x, h, z));
            }
        }
    }

    /// Stack `height` blocks upward from the surface layer.
    fn stack(&self, grid: &mut WorldGrid, kind: BlockKind, cell: GridCell, height: i32) {
        let surface = self.config.surface_y;
        for y in 0..height {
            grid.insert(kind, cell.at(surface + y as f32));
        }
    }

    /// A cell in the 3x3 neighborhood of `cell`, center included.
    fn random_neighbor(&mut self, cell: GridCell) -> GridCell {
        cell.offset(self.rng.gen_range(-1..=1), self.rng.gen_range(-1..=1))
    }
}
