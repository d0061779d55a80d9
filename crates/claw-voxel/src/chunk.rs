//! Fixed-size 16×16×16 voxel chunk with bounds-checked access and a remesh flag.
//!
//! Voxels are stored as one [`BlockId`] per cell in a flat array indexed
//! `x + 16·y + 256·z` (x varies fastest). Out-of-range local access never
//! panics: reads return Air and writes are ignored.

use crate::coords::ChunkCoord;
use crate::registry::BlockId;

/// Side length of a chunk in voxels.
pub const CHUNK_SIZE: usize = 16;

/// Total number of voxels in a chunk (16³).
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

/// A 16³ block of voxels with a "needs remesh" flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    coord: ChunkCoord,
    /// Flat per-voxel storage, always `CHUNK_VOLUME` long.
    blocks: Box<[BlockId]>,
    /// Block data changed since the chunk's geometry was last built.
    dirty: bool,
}

impl Chunk {
    /// Creates a chunk filled with Air.
    ///
    /// New chunks start dirty: they have never been meshed.
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![BlockId::AIR; CHUNK_VOLUME].into_boxed_slice(),
            dirty: true,
        }
    }

    /// Creates a dirty chunk from raw storage. The caller guarantees the length.
    pub(crate) fn from_blocks(coord: ChunkCoord, blocks: Box<[BlockId]>) -> Self {
        debug_assert_eq!(blocks.len(), CHUNK_VOLUME);
        Self {
            coord,
            blocks,
            dirty: true,
        }
    }

    /// The chunk's grid coordinate.
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Returns the block at local `(x, y, z)`, or Air if any coordinate is
    /// outside `[0, 16)`.
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockId {
        match Self::index(x, y, z) {
            Some(i) => self.blocks[i],
            None => BlockId::AIR,
        }
    }

    /// Writes the block at local `(x, y, z)` and marks the chunk dirty.
    ///
    /// No-op if any coordinate is outside `[0, 16)`.
    pub fn set(&mut self, x: i32, y: i32, z: i32, block: BlockId) {
        let Some(i) = Self::index(x, y, z) else {
            tracing::trace!(chunk = %self.coord, x, y, z, "Chunk::set out of bounds ignored");
            return;
        };
        self.blocks[i] = block;
        self.dirty = true;
    }

    /// Overwrites every voxel with `block` and marks the chunk dirty.
    pub fn fill(&mut self, block: BlockId) {
        self.blocks.fill(block);
        self.dirty = true;
    }

    /// Returns `true` iff every cell is Air.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.is_air())
    }

    /// Returns `true` if the chunk needs its geometry rebuilt.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flags the chunk for remeshing without touching its data.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clears the remesh flag.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Raw voxel storage in index order.
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// Converts local coordinates to a flat index, or `None` when out of range.
    fn index(x: i32, y: i32, z: i32) -> Option<usize> {
        let size = CHUNK_SIZE as i32;
        if !(0..size).contains(&x) || !(0..size).contains(&y) || !(0..size).contains(&z) {
            return None;
        }
        Some(x as usize + y as usize * CHUNK_SIZE + z as usize * CHUNK_SIZE * CHUNK_SIZE)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
