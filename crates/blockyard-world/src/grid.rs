//! Arena storage for placed blocks.
//!
//! Every live block is one slot holding its kind, position, and remaining
//! durability together. Removed slots go on a free list and are reused by the
//! next insert; a per-slot generation counter makes handles to removed blocks
//! go stale instead of aliasing the new occupant. Because slots are reused,
//! slot order is not insertion order. Each record carries an insertion
//! sequence number, and "first" always means lowest sequence.

use blockyard_core::{Aabb, BlockKind, Error, Result};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Stable reference to a block in a [`WorldGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockHandle {
    index: u32,
    generation: u32,
}

impl BlockHandle {
    /// Slot index inside the arena.
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }
}

/// A live block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockRecord {
    /// Catalog kind
    pub kind: BlockKind,
    /// Center of the block
    pub position: Vec3,
    /// Hits left before the block is destroyed
    pub durability: u32,
    sequence: u64,
}

impl BlockRecord {
    /// Create a block with the full durability of its kind.
    pub fn new(kind: BlockKind, position: Vec3) -> Self {
        Self {
            kind,
            position,
            durability: kind.durability(),
            sequence: 0,
        }
    }

    /// Insertion order within the grid; earlier blocks have lower values.
    #[inline]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns true if this block takes part in collision.
    #[inline]
    pub const fn is_solid(&self) -> bool {
        self.kind.is_solid()
    }

    /// Bounding box of the block for the given edge length.
    #[inline]
    pub fn bounds(&self, block_size: f32) -> Aabb {
        Aabb::cube(self.position, block_size)
    }
}

/// Result of hitting a block once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Damage {
    /// The block survived with this much durability left.
    Remaining(u32),
    /// The block broke and was removed from the grid.
    Destroyed(BlockRecord),
}

/// Per-block record handed to the renderer for instanced drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct InstanceData {
    /// Block center
    pub position: [f32; 3],
    /// RGBA color from the catalog
    pub color: [u8; 4],
}

#[derive(Debug, Clone)]
enum Slot {
    Occupied {
        generation: u32,
        record: BlockRecord,
    },
    Vacant {
        generation: u32,
        next_free: Option<u32>,
    },
}

/// The set of live blocks.
///
/// Lookups are by handle; spatial queries are linear scans. Two blocks may
/// share a position: generation layers blocks without checking for overlap.
#[derive(Debug, Clone, Default)]
pub struct WorldGrid {
    slots: Vec<Slot>,
    free_head: Option<u32>,
    len: usize,
    next_sequence: u64,
}

impl WorldGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty grid with room for `capacity` blocks.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
            next_sequence: 0,
        }
    }

    /// Number of live blocks.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the grid holds no blocks.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Add a block with the full durability of its kind.
    pub fn insert(&mut self, kind: BlockKind, position: Vec3) -> BlockHandle {
        let record = BlockRecord {
            sequence: self.next_sequence,
            ..BlockRecord::new(kind, position)
        };
        self.next_sequence += 1;
        self.len += 1;

        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index as usize];
            let Slot::Vacant {
                generation,
                next_free,
            } = *slot
            else {
                unreachable!("free list points at an occupied slot");
            };
            self.free_head = next_free;
            let generation = generation.wrapping_add(1);
            *slot = Slot::Occupied { generation, record };
            return BlockHandle { index, generation };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot::Occupied {
            generation: 0,
            record,
        });
        BlockHandle {
            index,
            generation: 0,
        }
    }

    /// Remove a block, returning its last state.
    ///
    /// Returns `None` for stale or unknown handles.
    pub fn remove(&mut self, handle: BlockHandle) -> Option<BlockRecord> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        match *slot {
            Slot::Occupied { generation, record } if generation == handle.generation => {
                *slot = Slot::Vacant {
                    generation,
                    next_free: self.free_head,
                };
                self.free_head = Some(handle.index);
                self.len -= 1;
                Some(record)
            }
            _ => None,
        }
    }

    /// Get a live block.
    pub fn get(&self, handle: BlockHandle) -> Option<&BlockRecord> {
        match self.slots.get(handle.index as usize)? {
            Slot::Occupied { generation, record } if *generation == handle.generation => {
                Some(record)
            }
            _ => None,
        }
    }

    /// Get a live block, failing with [`Error::NotFound`] for stale handles.
    pub fn try_get(&self, handle: BlockHandle) -> Result<&BlockRecord> {
        self.get(handle)
            .ok_or_else(|| Error::NotFound(format!("block {handle:?}")))
    }

    fn get_mut(&mut self, handle: BlockHandle) -> Option<&mut BlockRecord> {
        match self.slots.get_mut(handle.index as usize)? {
            Slot::Occupied { generation, record } if *generation == handle.generation => {
                Some(record)
            }
            _ => None,
        }
    }

    /// Check if the handle refers to a live block.
    #[inline]
    pub fn contains(&self, handle: BlockHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Kind of a live block.
    #[inline]
    pub fn kind(&self, handle: BlockHandle) -> Option<BlockKind> {
        self.get(handle).map(|record| record.kind)
    }

    /// Remaining durability of a live block.
    #[inline]
    pub fn durability(&self, handle: BlockHandle) -> Option<u32> {
        self.get(handle).map(|record| record.durability)
    }

    /// Returns true if the handle refers to a live solid block.
    ///
    /// Unknown handles count as non-solid.
    #[inline]
    pub fn is_solid(&self, handle: BlockHandle) -> bool {
        self.get(handle).is_some_and(BlockRecord::is_solid)
    }

    /// Hit a block once.
    ///
    /// Durability drops by one; at zero the block is removed. Kinds that start
    /// with zero durability break on the first hit. Returns `None` for stale
    /// handles.
    pub fn damage(&mut self, handle: BlockHandle) -> Option<Damage> {
        let record = self.get_mut(handle)?;
        let remaining = record.durability.saturating_sub(1);
        if remaining > 0 {
            record.durability = remaining;
            return Some(Damage::Remaining(remaining));
        }
        self.remove(handle).map(Damage::Destroyed)
    }

    /// Find the earliest-inserted block centered exactly at `position`.
    pub fn find_at(&self, position: Vec3) -> Option<BlockHandle> {
        self.iter()
            .filter(|(_, record)| record.position == position)
            .min_by_key(|(_, record)| record.sequence)
            .map(|(handle, _)| handle)
    }

    /// Remove the earliest-inserted block centered exactly at `position`.
    pub fn remove_first_at(&mut self, position: Vec3) -> Option<BlockRecord> {
        let handle = self.find_at(position)?;
        self.remove(handle)
    }

    /// Count blocks centered exactly at `position`.
    pub fn count_at(&self, position: Vec3) -> usize {
        self.iter()
            .filter(|(_, record)| record.position == position)
            .count()
    }

    /// Iterate over live blocks in slot order, which is not insertion order
    /// once slots have been reused.
    pub fn iter(&self) -> impl Iterator<Item = (BlockHandle, &BlockRecord)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| match slot {
            Slot::Occupied { generation, record } => Some((
                BlockHandle {
                    index: index as u32,
                    generation: *generation,
                },
                record,
            )),
            Slot::Vacant { .. } => None,
        })
    }

    /// Iterate over live solid blocks.
    pub fn solid_blocks(&self) -> impl Iterator<Item = (BlockHandle, &BlockRecord)> + '_ {
        self.iter().filter(|(_, record)| record.is_solid())
    }

    /// Remove every block.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    /// Snapshot of every live block for instanced rendering.
    pub fn instance_data(&self) -> Vec<InstanceData> {
        self.iter()
            .map(|(_, record)| InstanceData {
                position: record.position.to_array(),
                color: record.kind.props().rgba(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_uses_catalog_durability() {
        let mut grid = WorldGrid::new();
        let stone = grid.insert(BlockKind::Stone, Vec3::new(1.0, -1.5, 2.0));
        let water = grid.insert(BlockKind::Water, Vec3::new(0.0, -1.5, 2.0));

        assert_eq!(grid.len(), 2);
        assert_eq!(grid.durability(stone), Some(7));
        assert_eq!(grid.durability(water), Some(0));
        assert_eq!(grid.kind(stone), Some(BlockKind::Stone));
        assert!(grid.is_solid(stone));
        assert!(!grid.is_solid(water));
    }

    #[test]
    fn removed_handle_goes_stale() {
        let mut grid = WorldGrid::new();
        let first = grid.insert(BlockKind::Dirt, Vec3::ZERO);
        assert!(grid.remove(first).is_some());
        assert!(grid.remove(first).is_none());

        // The freed slot is reused with a new generation.
        let second = grid.insert(BlockKind::Wood, Vec3::X);
        assert_eq!(second.index(), first.index());
        assert_ne!(second, first);
        assert!(grid.get(first).is_none());
        assert!(!grid.is_solid(first));
        assert!(grid.try_get(first).is_err());
        assert_eq!(grid.kind(second), Some(BlockKind::Wood));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn free_list_reuses_most_recent_first() {
        let mut grid = WorldGrid::new();
        let handles: Vec<_> = (0..4)
            .map(|i| grid.insert(BlockKind::Sand, Vec3::new(i as f32, 0.0, 0.0)))
            .collect();
        grid.remove(handles[1]);
        grid.remove(handles[3]);

        assert_eq!(grid.insert(BlockKind::Stone, Vec3::Y).index(), 3);
        assert_eq!(grid.insert(BlockKind::Stone, Vec3::Y).index(), 1);
        assert_eq!(grid.insert(BlockKind::Stone, Vec3::Y).index(), 4);
        assert_eq!(grid.len(), 5);
    }

    #[test]
    fn damage_counts_down_then_removes() {
        let mut grid = WorldGrid::new();
        let leaves = grid.insert(BlockKind::Leaves, Vec3::ZERO);

        assert_eq!(grid.damage(leaves), Some(Damage::Remaining(1)));
        match grid.damage(leaves) {
            Some(Damage::Destroyed(record)) => assert_eq!(record.kind, BlockKind::Leaves),
            other => panic!("expected destruction, got {other:?}"),
        }
        assert!(grid.is_empty());
        assert_eq!(grid.damage(leaves), None);
    }

    #[test]
    fn zero_durability_breaks_on_first_hit() {
        let mut grid = WorldGrid::new();
        let water = grid.insert(BlockKind::Water, Vec3::ZERO);
        assert!(matches!(grid.damage(water), Some(Damage::Destroyed(_))));
        assert!(!grid.contains(water));
    }

    #[test]
    fn duplicates_coexist_and_first_is_removed() {
        let mut grid = WorldGrid::new();
        let pos = Vec3::new(11.0, 1.0, 8.0);
        let wood = grid.insert(BlockKind::Wood, pos);
        let water = grid.insert(BlockKind::Water, pos);
        assert_eq!(grid.count_at(pos), 2);
        assert_eq!(grid.find_at(pos), Some(wood));

        let removed = grid.remove_first_at(pos).expect("a block at pos");
        assert_eq!(removed.kind, BlockKind::Wood);
        assert_eq!(grid.find_at(pos), Some(water));
        assert!(grid.remove_first_at(Vec3::new(50.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn first_at_position_follows_insertion_not_slot() {
        let mut grid = WorldGrid::new();
        let pos = Vec3::new(12.0, 2.0, 8.0);
        let filler = grid.insert(BlockKind::Dirt, Vec3::new(11.0, 1.0, 8.0));
        let wall = grid.insert(BlockKind::Wood, pos);
        grid.remove(filler);
        // The window reuses the filler's earlier slot.
        let window = grid.insert(BlockKind::Water, pos);
        assert_eq!(window.index(), filler.index());

        let wall_seq = grid.get(wall).map(BlockRecord::sequence);
        let window_seq = grid.get(window).map(BlockRecord::sequence);
        assert!(wall_seq < window_seq);

        assert_eq!(grid.find_at(pos), Some(wall));
        assert_eq!(
            grid.remove_first_at(pos).map(|record| record.kind),
            Some(BlockKind::Wood)
        );
        assert_eq!(grid.find_at(pos), Some(window));
    }

    #[test]
    fn solid_blocks_skip_water() {
        let mut grid = WorldGrid::new();
        grid.insert(BlockKind::Water, Vec3::ZERO);
        grid.insert(BlockKind::Sand, Vec3::NEG_Y);
        let solid: Vec<_> = grid.solid_blocks().map(|(_, r)| r.kind).collect();
        assert_eq!(solid, vec![BlockKind::Sand]);
    }

    #[test]
    fn instance_data_layout() {
        assert_eq!(std::mem::size_of::<InstanceData>(), 16);

        let mut grid = WorldGrid::new();
        let gone = grid.insert(BlockKind::Stone, Vec3::ZERO);
        grid.insert(BlockKind::Grass, Vec3::new(3.0, -1.5, 4.0));
        grid.remove(gone);

        let data = grid.instance_data();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].position, [3.0, -1.5, 4.0]);
        assert_eq!(data[0].color, [0x57, 0xA6, 0x4E, 255]);
        assert_eq!(bytemuck::cast_slice::<_, u8>(&data).len(), 16);
    }
}
