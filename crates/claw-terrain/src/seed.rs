//! Deterministic seeded generation utilities.
//!
//! Derives per-column RNGs from the world seed and a world column, and hashes
//! chunk contents for determinism checks.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use claw_voxel::Chunk;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Salt separating the tree field from any other per-column random stream.
pub const TREE_SALT: u64 = 200;

/// Derive a u64 seed for a world column from the world seed.
///
/// Uses SipHash (via std's `DefaultHasher`) to combine the world seed, a
/// stream `salt`, and the global column into a well-distributed u64. Because
/// only global coordinates go in, every chunk stacked on the column derives
/// the same value.
pub fn derive_column_seed(world_seed: u64, salt: u64, wx: i32, wz: i32) -> u64 {
    let mut hasher = DefaultHasher::new();
    world_seed.hash(&mut hasher);
    salt.hash(&mut hasher);
    wx.hash(&mut hasher);
    wz.hash(&mut hasher);
    hasher.finish()
}

/// Derive a deterministic RNG for one world column.
pub fn column_rng(world_seed: u64, salt: u64, wx: i32, wz: i32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_column_seed(world_seed, salt, wx, wz))
}

/// Narrow a world seed to the 32-bit seed the `noise` crate accepts, offset
/// by a per-field amount so fields stay decorrelated.
pub fn noise_seed(world_seed: u64, offset: u32) -> u32 {
    ((world_seed ^ (world_seed >> 32)) as u32).wrapping_add(offset)
}

/// Hash the contents of a chunk for determinism comparison.
pub fn hash_chunk(chunk: &Chunk) -> u64 {
    let mut hasher = DefaultHasher::new();
    chunk.coord().hash(&mut hasher);
    for block in chunk.blocks() {
        block.0.hash(&mut hasher);
    }
    hasher.finish()
}
