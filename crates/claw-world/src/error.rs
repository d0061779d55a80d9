//! World and storage error types.

use std::path::PathBuf;

use claw_voxel::{ChunkCoord, ChunkDecodeError, ChunkKeyError};

/// Errors returned by [`crate::ChunkManager`] operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The chunk owning the target voxel is not loaded.
    #[error("chunk {0} is not loaded")]
    ChunkNotLoaded(ChunkCoord),

    /// Persisted chunk bytes could not be decoded.
    #[error("failed to decode chunk {coord}: {source}")]
    Decode {
        coord: ChunkCoord,
        #[source]
        source: ChunkDecodeError,
    },
}

/// Errors that can occur when reading or writing the on-disk chunk store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem access failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A chunk file name is not a valid chunk key.
    #[error("malformed chunk file {path}: {source}")]
    Key {
        path: PathBuf,
        #[source]
        source: ChunkKeyError,
    },

    /// Failed to parse the world metadata file.
    #[error("failed to parse world meta: {0}")]
    ParseMeta(#[source] ron::error::SpannedError),

    /// Failed to serialize the world metadata.
    #[error("failed to serialize world meta: {0}")]
    SerializeMeta(#[source] ron::Error),

    /// A saved chunk could not be installed into the world.
    #[error("failed to restore saved chunk: {0}")]
    Restore(#[source] WorldError),
}
