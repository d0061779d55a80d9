//! Block registry: maps compact [`BlockId`] values to their [`BlockDef`] properties.
//!
//! The registry is a fixed table built once at startup. Air is always ID 0 so that
//! zero-initialized chunk memory represents empty space. Unknown IDs resolve to Air.

use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Compact identifier stored inside every voxel cell (1 byte).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u8);

impl BlockId {
    pub const AIR: Self = Self(0);
    pub const STONE: Self = Self(1);
    pub const DIRT: Self = Self(2);
    pub const GRASS: Self = Self(3);
    pub const WOOD: Self = Self(4);
    pub const LEAVES: Self = Self(5);
    pub const SAND: Self = Self(6);
    pub const WATER: Self = Self(7);
    pub const GLASS: Self = Self(8);
    pub const BRICK: Self = Self(9);
    pub const IRON: Self = Self(10);
    pub const GOLD: Self = Self(11);
    pub const DIAMOND: Self = Self(12);
    pub const PLANKS: Self = Self(13);
    pub const COBBLESTONE: Self = Self(14);
    pub const WOOL: Self = Self(15);
    pub const TORCH: Self = Self(16);
    pub const WORKBENCH: Self = Self(17);
    pub const FURNACE: Self = Self(18);
    pub const CHEST: Self = Self(19);

    /// Returns `true` for the reserved empty-space ID.
    pub fn is_air(self) -> bool {
        self.0 == 0
    }
}

/// Linear RGB color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color3 {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Expands to RGBA with the given alpha.
    pub fn with_alpha(self, a: f32) -> [f32; 4] {
        [self.r, self.g, self.b, a]
    }
}

/// Full descriptor for a block type.
#[derive(Clone, Debug)]
pub struct BlockDef {
    /// The ID this definition is registered under.
    pub id: BlockId,
    /// Display name (e.g. "Stone", "Iron Ore").
    pub name: &'static str,
    /// Whether entities collide with this block.
    pub solid: bool,
    /// Whether light and sight pass through this block.
    pub transparent: bool,
    /// Whether this block is the meshed liquid (faces between two cells of it are culled).
    pub liquid: bool,
    /// Resistance to mining.
    pub hardness: f32,
    /// Base face color.
    pub color: Color3,
    /// Color of the +Y face, when it differs from the base color.
    pub top_color: Option<Color3>,
    /// Self-illumination color.
    pub emissive: Option<Color3>,
    /// Light emission level (0 = none, 15 = max).
    pub light_level: u8,
    /// Maximum inventory stack size (0 = not an item).
    pub stack_size: u8,
    /// Seconds needed to break the block by hand.
    pub break_time: f32,
    /// Item credited when the block is broken, if any.
    pub drops: Option<BlockId>,
}

/// Compact constructor used by the built-in table.
#[allow(clippy::too_many_arguments)]
const fn def(
    id: BlockId,
    name: &'static str,
    solid: bool,
    transparent: bool,
    hardness: f32,
    color: Color3,
    light_level: u8,
    stack_size: u8,
    break_time: f32,
    drops: Option<BlockId>,
) -> BlockDef {
    BlockDef {
        id,
        name,
        solid,
        transparent,
        liquid: false,
        hardness,
        color,
        top_color: None,
        emissive: None,
        light_level,
        stack_size,
        break_time,
        drops,
    }
}

fn builtin_defs() -> Vec<BlockDef> {
    use BlockId as B;
    vec![
        def(B::AIR, "Air", false, true, 0.0, Color3::BLACK, 0, 0, 0.0, None),
        def(B::STONE, "Stone", true, false, 5.0, Color3::new(0.5, 0.5, 0.5), 0, 64, 1.5, Some(B::COBBLESTONE)),
        def(B::DIRT, "Dirt", true, false, 2.0, Color3::new(0.45, 0.3, 0.18), 0, 64, 0.5, Some(B::DIRT)),
        BlockDef {
            top_color: Some(Color3::new(0.25, 0.55, 0.2)),
            ..def(B::GRASS, "Grass", true, false, 2.0, Color3::new(0.35, 0.25, 0.15), 0, 64, 0.6, Some(B::DIRT))
        },
        def(B::WOOD, "Wood", true, false, 3.0, Color3::new(0.4, 0.28, 0.12), 0, 64, 1.0, Some(B::WOOD)),
        def(B::LEAVES, "Leaves", true, true, 1.0, Color3::new(0.15, 0.45, 0.12), 0, 64, 0.3, None),
        def(B::SAND, "Sand", true, false, 2.0, Color3::new(0.85, 0.78, 0.55), 0, 64, 0.5, Some(B::SAND)),
        BlockDef {
            liquid: true,
            ..def(B::WATER, "Water", false, true, 0.0, Color3::new(0.15, 0.3, 0.7), 0, 0, 0.0, None)
        },
        def(B::GLASS, "Glass", true, true, 1.0, Color3::new(0.8, 0.85, 0.9), 0, 64, 0.3, None),
        def(B::BRICK, "Brick", true, false, 6.0, Color3::new(0.6, 0.25, 0.18), 0, 64, 2.0, Some(B::BRICK)),
        def(B::IRON, "Iron Ore", true, false, 8.0, Color3::new(0.55, 0.5, 0.45), 0, 64, 3.0, Some(B::IRON)),
        def(B::GOLD, "Gold Ore", true, false, 8.0, Color3::new(0.75, 0.65, 0.2), 0, 64, 3.0, Some(B::GOLD)),
        def(B::DIAMOND, "Diamond Ore", true, false, 10.0, Color3::new(0.3, 0.75, 0.8), 1, 64, 5.0, Some(B::DIAMOND)),
        def(B::PLANKS, "Planks", true, false, 3.0, Color3::new(0.6, 0.45, 0.22), 0, 64, 0.8, Some(B::PLANKS)),
        def(B::COBBLESTONE, "Cobblestone", true, false, 6.0, Color3::new(0.4, 0.4, 0.4), 0, 64, 1.5, Some(B::COBBLESTONE)),
        def(B::WOOL, "Wool", true, false, 1.0, Color3::new(0.9, 0.9, 0.88), 0, 64, 0.3, Some(B::WOOL)),
        BlockDef {
            emissive: Some(Color3::new(0.9, 0.6, 0.1)),
            ..def(B::TORCH, "Torch", false, true, 0.0, Color3::new(0.9, 0.7, 0.2), 14, 64, 0.1, Some(B::TORCH))
        },
        BlockDef {
            top_color: Some(Color3::new(0.5, 0.35, 0.2)),
            ..def(B::WORKBENCH, "Workbench", true, false, 3.0, Color3::new(0.55, 0.38, 0.15), 0, 1, 1.0, Some(B::WORKBENCH))
        },
        def(B::FURNACE, "Furnace", true, false, 5.0, Color3::new(0.45, 0.45, 0.45), 3, 1, 2.0, Some(B::FURNACE)),
        def(B::CHEST, "Chest", true, false, 3.0, Color3::new(0.5, 0.35, 0.1), 0, 1, 1.0, Some(B::CHEST)),
    ]
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps [`BlockId`] → [`BlockDef`] with O(1) lookup by index and
/// O(1) reverse lookup by name.
///
/// There is no mutation API: the table is fixed for the lifetime of the registry.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    /// Dense array where `index == BlockId.0`.
    defs: Vec<BlockDef>,
    /// Reverse lookup: name → ID.
    name_to_id: HashMap<&'static str, BlockId>,
}

impl BlockRegistry {
    /// Creates the registry with the built-in block table.
    pub fn new() -> Self {
        let defs = builtin_defs();
        debug_assert!(defs.iter().enumerate().all(|(i, d)| d.id.0 as usize == i));
        let name_to_id = defs.iter().map(|d| (d.name, d.id)).collect();
        Self { defs, name_to_id }
    }

    /// Returns the definition for `id`, or Air's definition for unknown IDs.
    pub fn get(&self, id: BlockId) -> &BlockDef {
        self.defs.get(id.0 as usize).unwrap_or(&self.defs[0])
    }

    /// Returns `true` iff the block is solid and not transparent.
    ///
    /// Unknown IDs are treated like Air (not opaque).
    pub fn is_opaque(&self, id: BlockId) -> bool {
        self.defs
            .get(id.0 as usize)
            .is_some_and(|def| def.solid && !def.transparent)
    }

    /// Returns `true` if the block is the special-cased liquid.
    pub fn is_liquid(&self, id: BlockId) -> bool {
        self.defs.get(id.0 as usize).is_some_and(|def| def.liquid)
    }

    /// Every defined block type except Air, in ID order.
    pub fn all_block_types(&self) -> impl Iterator<Item = &BlockDef> {
        self.defs.iter().skip(1)
    }

    /// Returns the ID for a named block type, or `None` if not found.
    pub fn lookup_by_name(&self, name: &str) -> Option<BlockId> {
        self.name_to_id.get(name).copied()
    }

    /// Returns the total number of defined types (including Air).
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns `true` if only Air is defined.
    pub fn is_empty(&self) -> bool {
        self.defs.len() <= 1
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
