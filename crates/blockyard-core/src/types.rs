//! Block catalog and resource types.

use serde::{Deserialize, Serialize};

/// Kind of a placed block.
///
/// The catalog is fixed: every variant has an entry in [`BlockKind::props`],
/// so lookup can never fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockKind {
    /// Grass surface block
    Grass = 0,
    /// Dirt block under the grass
    Dirt = 1,
    /// Stone block
    Stone = 2,
    /// Tree trunk and building material
    Wood = 3,
    /// Tree canopy block
    Leaves = 4,
    /// Water surface and window openings
    Water = 5,
    /// River bed block
    Sand = 6,
}

impl BlockKind {
    /// Every kind in catalog order.
    pub const ALL: [Self; 7] = [
        Self::Grass,
        Self::Dirt,
        Self::Stone,
        Self::Wood,
        Self::Leaves,
        Self::Water,
        Self::Sand,
    ];

    /// Look up the static properties for this kind.
    #[inline]
    #[must_use]
    pub fn props(self) -> &'static BlockProps {
        &CATALOG[self as usize]
    }

    /// Starting durability of a freshly created block.
    #[inline]
    #[must_use]
    pub fn durability(self) -> u32 {
        self.props().durability
    }

    /// Returns true if blocks of this kind take part in collision.
    ///
    /// Water is the only non-solid kind; solidity never depends on how
    /// damaged an instance is.
    #[inline]
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !matches!(self, Self::Water)
    }

    /// Resource credited to the inventory when a block of this kind is mined.
    #[must_use]
    pub const fn yields(self) -> Option<Resource> {
        match self {
            Self::Wood | Self::Leaves => Some(Resource::Wood),
            Self::Water => None,
            Self::Grass | Self::Dirt | Self::Stone | Self::Sand => Some(Resource::Stone),
        }
    }

    /// Lowercase name, used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grass => "grass",
            Self::Dirt => "dirt",
            Self::Stone => "stone",
            Self::Wood => "wood",
            Self::Leaves => "leaves",
            Self::Water => "water",
            Self::Sand => "sand",
        }
    }
}

/// Static render and physical properties of a block kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockProps {
    /// Base color (RGB, 0-255)
    pub color: [u8; 3],
    /// Whether the block is drawn with alpha blending
    pub transparent: bool,
    /// Opacity in `[0, 1]`, only meaningful when `transparent` is set
    pub opacity: f32,
    /// Hits needed to mine the block. Zero marks a kind that never blocks
    /// movement.
    pub durability: u32,
}

impl BlockProps {
    const fn opaque(rgb: u32, durability: u32) -> Self {
        Self {
            color: rgb_bytes(rgb),
            transparent: false,
            opacity: 1.0,
            durability,
        }
    }

    /// Color with alpha as RGBA bytes.
    #[must_use]
    pub fn rgba(&self) -> [u8; 4] {
        let alpha = (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.color[0], self.color[1], self.color[2], alpha]
    }
}

const fn rgb_bytes(rgb: u32) -> [u8; 3] {
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8]
}

/// Catalog indexed by `BlockKind as usize`.
static CATALOG: [BlockProps; 7] = [
    BlockProps::opaque(0x0057_A64E, 3),
    BlockProps::opaque(0x008B_4513, 3),
    BlockProps::opaque(0x0088_8888, 7),
    BlockProps::opaque(0x0099_6633, 5),
    BlockProps::opaque(0x0033_AA33, 2),
    BlockProps {
        color: rgb_bytes(0x0033_33FF),
        transparent: true,
        opacity: 0.6,
        durability: 0,
    },
    BlockProps::opaque(0x00E2_C47D, 3),
];

/// A collectable resource. Doubles as the player's selected build kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Credited by wood and leaves, spent on wood blocks
    #[default]
    Wood,
    /// Credited by every other non-water kind, spent on stone blocks
    Stone,
}

impl Resource {
    /// The block kind created when this resource is placed.
    #[inline]
    #[must_use]
    pub const fn block_kind(self) -> BlockKind {
        match self {
            Self::Wood => BlockKind::Wood,
            Self::Stone => BlockKind::Stone,
        }
    }

    /// The other build kind.
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Wood => Self::Stone,
            Self::Stone => Self::Wood,
        }
    }

    /// Display label shown by the UI for the selected build kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Stone => "Stone",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_total() {
        for kind in BlockKind::ALL {
            let props = kind.props();
            assert!((0.0..=1.0).contains(&props.opacity));
        }
    }

    #[test]
    fn catalog_durability() {
        assert_eq!(BlockKind::Grass.durability(), 3);
        assert_eq!(BlockKind::Dirt.durability(), 3);
        assert_eq!(BlockKind::Stone.durability(), 7);
        assert_eq!(BlockKind::Wood.durability(), 5);
        assert_eq!(BlockKind::Leaves.durability(), 2);
        assert_eq!(BlockKind::Water.durability(), 0);
        assert_eq!(BlockKind::Sand.durability(), 3);
    }

    #[test]
    fn only_water_is_non_solid() {
        for kind in BlockKind::ALL {
            assert_eq!(kind.is_solid(), kind != BlockKind::Water, "{}", kind.name());
        }
    }

    #[test]
    fn water_is_transparent() {
        let water = BlockKind::Water.props();
        assert!(water.transparent);
        assert_eq!(water.color, [0x33, 0x33, 0xFF]);
        assert_eq!(water.rgba()[3], 153);
        assert_eq!(BlockKind::Stone.props().rgba(), [0x88, 0x88, 0x88, 255]);
    }

    #[test]
    fn mining_yields() {
        assert_eq!(BlockKind::Wood.yields(), Some(Resource::Wood));
        assert_eq!(BlockKind::Leaves.yields(), Some(Resource::Wood));
        assert_eq!(BlockKind::Grass.yields(), Some(Resource::Stone));
        assert_eq!(BlockKind::Sand.yields(), Some(Resource::Stone));
        assert_eq!(BlockKind::Water.yields(), None);
    }

    #[test]
    fn build_kind_toggle() {
        let kind = Resource::default();
        assert_eq!(kind, Resource::Wood);
        assert_eq!(kind.toggled(), Resource::Stone);
        assert_eq!(kind.toggled().toggled(), Resource::Wood);
        assert_eq!(Resource::Stone.block_kind(), BlockKind::Stone);
    }
}
