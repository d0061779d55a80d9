//! Tree placement: per-column seeded rolls and trunk/canopy stamping.

use claw_voxel::{BlockId, CHUNK_SIZE, Chunk};
use rand::Rng;

use crate::seed::{TREE_SALT, column_rng};

/// Leaf ring radii from the bottom of the canopy upward.
pub const CANOPY_RADII: [i32; 3] = [2, 2, 1];

/// Tree sparseness and size.
#[derive(Clone, Debug)]
pub struct TreeParams {
    /// A column grows a tree when its roll in `[0, 1)` exceeds this.
    pub threshold: f64,
    /// Shortest trunk, in blocks.
    pub trunk_min: u32,
    /// Tallest trunk, in blocks (inclusive).
    pub trunk_max: u32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            threshold: 0.97,
            trunk_min: 4,
            trunk_max: 6,
        }
    }
}

/// Decides where trees grow and writes them into chunks.
pub struct TreePlacer {
    seed: u64,
    params: TreeParams,
}

impl TreePlacer {
    pub fn new(seed: u64, params: TreeParams) -> Self {
        Self { seed, params }
    }

    /// Rolls the world column `(wx, wz)`. Returns the trunk height when a tree
    /// grows there.
    ///
    /// The roll depends only on the seed and the global column, so every chunk
    /// stacked on the column sees the same tree.
    pub fn roll(&self, wx: i32, wz: i32) -> Option<u32> {
        let mut rng = column_rng(self.seed, TREE_SALT, wx, wz);
        if rng.random::<f64>() <= self.params.threshold {
            return None;
        }
        let lo = self.params.trunk_min.min(self.params.trunk_max);
        let hi = self.params.trunk_min.max(self.params.trunk_max);
        Some(rng.random_range(lo..=hi))
    }

    /// Total height of a tree with the given trunk, from its first trunk cell
    /// to the top of the canopy.
    pub fn tree_height(trunk: u32) -> i32 {
        trunk as i32 + CANOPY_RADII.len() as i32 - 1
    }

    /// Stamps a tree whose first trunk cell is at local `(lx, base_y, lz)`.
    ///
    /// `base_y` may lie outside the chunk; cells above or below it are clipped.
    /// The trunk overwrites whatever it meets. Leaves only fill Air and never
    /// leave the chunk's x/z bounds.
    pub fn place(&self, chunk: &mut Chunk, lx: i32, base_y: i32, lz: i32, trunk: u32) {
        for dy in 0..trunk as i32 {
            chunk.set(lx, base_y + dy, lz, BlockId::WOOD);
        }

        let size = CHUNK_SIZE as i32;
        let leaf_base = base_y + trunk as i32 - 1;
        for (dy, &r) in CANOPY_RADII.iter().enumerate() {
            let y = leaf_base + dy as i32;
            for dz in -r..=r {
                for dx in -r..=r {
                    let (x, z) = (lx + dx, lz + dz);
                    if !(0..size).contains(&x) || !(0..size).contains(&z) {
                        continue;
                    }
                    if chunk.get(x, y, z).is_air() {
                        chunk.set(x, y, z, BlockId::LEAVES);
                    }
                }
            }
        }
    }
}
