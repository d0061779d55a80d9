//! The streamed voxel world: chunk ownership, edits, remeshing and saves.
//!
//! [`ChunkManager`] is the entry point. Rendering and persistence are kept
//! behind the [`ChunkRenderer`] trait and the [`ChunkStore`] respectively.

mod chunk_manager;
mod error;
mod query;
mod renderer;
mod settings;
mod storage;

pub use chunk_manager::{ChunkManager, LoadStats};
pub use error::{StorageError, WorldError};
pub use query::{WorldEdit, WorldQuery};
pub use renderer::{ChunkRenderer, MeshHandle, NullRenderer, RenderEvent, RetainedMeshes};
pub use settings::{WorldSettings, terrain_params};
pub use storage::{ChunkStore, WorldMeta};
