//! Chunk surface meshing: per-face visibility culling and geometry snapshots.

pub mod chunk_mesh;
pub mod face_direction;
pub mod invalidation;
pub mod mesher;
pub mod visibility;

pub use chunk_mesh::{ChunkMesh, MeshVertex, QuadInfo};
pub use face_direction::FaceDirection;
pub use invalidation::{MeshInvalidator, neighbor_coord};
pub use mesher::{TRANSPARENT_ALPHA, face_color, mesh_chunk};
pub use visibility::{
    VisibleFaces, compute_visible_faces, count_visible_faces, face_exposed, is_meshable,
};
