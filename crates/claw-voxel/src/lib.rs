//! Voxel storage: block registry, fixed-size chunks, chunk coordinates, and the raw chunk codec.

pub mod chunk;
pub mod chunk_serial;
pub mod coords;
pub mod registry;

pub use chunk::{CHUNK_SIZE, CHUNK_VOLUME, Chunk};
pub use chunk_serial::ChunkDecodeError;
pub use coords::{ChunkCoord, ChunkKeyError, LocalPos, world_to_chunk};
pub use registry::{BlockDef, BlockId, BlockRegistry, Color3};
