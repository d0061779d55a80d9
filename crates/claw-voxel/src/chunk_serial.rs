//! Raw persisted chunk format.
//!
//! ## Binary Layout
//!
//! Exactly [`CHUNK_VOLUME`] (4096) bytes, one per voxel, in storage index order
//! `x + 16·y + 256·z`. Each byte is a raw [`BlockId`]. There is no header:
//! the chunk coordinate travels separately as the storage key.

use crate::chunk::{CHUNK_VOLUME, Chunk};
use crate::coords::ChunkCoord;
use crate::registry::BlockId;

/// Errors that can occur during chunk deserialization.
#[derive(Debug, thiserror::Error)]
pub enum ChunkDecodeError {
    /// The buffer is not exactly one byte per voxel.
    #[error("chunk buffer has {actual} bytes, expected exactly {expected}")]
    LengthMismatch {
        /// Required byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },
}

impl Chunk {
    /// Serializes the voxel array to its raw 4096-byte form.
    pub fn serialize(&self) -> Vec<u8> {
        self.blocks().iter().map(|b| b.0).collect()
    }

    /// Rebuilds a chunk from its raw 4096-byte form.
    ///
    /// The result is dirty so it gets meshed. Buffers of any other length are
    /// rejected rather than truncated or padded.
    pub fn deserialize(coord: ChunkCoord, data: &[u8]) -> Result<Self, ChunkDecodeError> {
        if data.len() != CHUNK_VOLUME {
            return Err(ChunkDecodeError::LengthMismatch {
                expected: CHUNK_VOLUME,
                actual: data.len(),
            });
        }
        let blocks = data.iter().map(|&b| BlockId(b)).collect();
        Ok(Chunk::from_blocks(coord, blocks))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::CHUNK_SIZE;

    #[test]
    fn test_serialized_length() {
        let chunk = Chunk::new(ChunkCoord::new(0, 0, 0));
        assert_eq!(chunk.serialize().len(), CHUNK_VOLUME);
    }

    #[test]
    fn test_roundtrip_preserves_every_voxel() {
        let coord = ChunkCoord::new(2, 1, -4);
        let mut chunk = Chunk::new(coord);
        for z in 0..CHUNK_SIZE as i32 {
            for y in 0..CHUNK_SIZE as i32 {
                for x in 0..CHUNK_SIZE as i32 {
                    chunk.set(x, y, z, BlockId(((x * 7 + y * 3 + z) % 20) as u8));
                }
            }
        }

        let bytes = chunk.serialize();
        let restored = Chunk::deserialize(coord, &bytes).expect("valid buffer");

        assert_eq!(restored.coord(), coord);
        for z in 0..CHUNK_SIZE as i32 {
            for y in 0..CHUNK_SIZE as i32 {
                for x in 0..CHUNK_SIZE as i32 {
                    assert_eq!(restored.get(x, y, z), chunk.get(x, y, z), "at ({x}, {y}, {z})");
                }
            }
        }
    }

    #[test]
    fn test_byte_order_matches_index_layout() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0, 0));
        chunk.set(3, 0, 0, BlockId::STONE);
        chunk.set(0, 1, 0, BlockId::DIRT);
        chunk.set(0, 0, 1, BlockId::GRASS);
        let bytes = chunk.serialize();
        assert_eq!(bytes[3], 1);
        assert_eq!(bytes[16], 2);
        assert_eq!(bytes[256], 3);
    }

    #[test]
    fn test_deserialized_chunk_is_dirty() {
        let bytes = vec![1u8; CHUNK_VOLUME];
        let chunk = Chunk::deserialize(ChunkCoord::new(0, 0, 0), &bytes).expect("valid buffer");
        assert!(chunk.is_dirty());
        assert_eq!(chunk.get(15, 15, 15), BlockId::STONE);
    }

    #[test]
    fn test_short_buffer_rejected() {
        let result = Chunk::deserialize(ChunkCoord::new(0, 0, 0), &[0u8; 100]);
        assert!(matches!(
            result,
            Err(ChunkDecodeError::LengthMismatch {
                expected: CHUNK_VOLUME,
                actual: 100
            })
        ));
    }

    #[test]
    fn test_long_buffer_rejected() {
        let result = Chunk::deserialize(ChunkCoord::new(0, 0, 0), &vec![0u8; CHUNK_VOLUME + 1]);
        assert!(result.is_err());
    }
}
