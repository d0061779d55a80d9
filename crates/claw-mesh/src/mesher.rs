//! Per-face surface mesher: one quad per exposed voxel face, no merging.

use claw_voxel::{BlockId, BlockRegistry, CHUNK_SIZE, Chunk};
use glam::Vec3;

use crate::chunk_mesh::ChunkMesh;
use crate::face_direction::FaceDirection;
use crate::visibility::compute_visible_faces;

/// Alpha written for blocks flagged transparent.
pub const TRANSPARENT_ALPHA: f32 = 0.6;

/// Color of `block`'s face in `direction`, including alpha.
///
/// The +Y face uses the block's top color when one is defined.
pub fn face_color(registry: &BlockRegistry, block: BlockId, direction: FaceDirection) -> [f32; 4] {
    let def = registry.get(block);
    let rgb = match (direction, def.top_color) {
        (FaceDirection::PosY, Some(top)) => top,
        _ => def.color,
    };
    let alpha = if def.transparent { TRANSPARENT_ALPHA } else { 1.0 };
    rgb.with_alpha(alpha)
}

/// Builds the world-space geometry of every exposed face in `chunk`.
///
/// `neighbor` resolves blocks outside the chunk by world coordinate. Returns
/// `None` when the chunk has no visible face, telling the caller to drop any
/// geometry it previously built for this chunk.
pub fn mesh_chunk<F>(chunk: &Chunk, registry: &BlockRegistry, neighbor: F) -> Option<ChunkMesh>
where
    F: Fn(i32, i32, i32) -> BlockId,
{
    let faces = compute_visible_faces(chunk, registry, neighbor);
    let origin = chunk.coord().origin().as_vec3();
    let mut mesh = ChunkMesh::new();

    for (idx, visible) in faces.iter().enumerate() {
        if visible.count() == 0 {
            continue;
        }
        let x = idx % CHUNK_SIZE;
        let y = (idx / CHUNK_SIZE) % CHUNK_SIZE;
        let z = idx / (CHUNK_SIZE * CHUNK_SIZE);
        let block = chunk.blocks()[idx];
        let voxel_origin = origin + Vec3::new(x as f32, y as f32, z as f32);

        for dir in visible.iter() {
            mesh.push_face(dir, voxel_origin, face_color(registry, block, dir));
        }
    }

    if mesh.is_empty() {
        tracing::trace!(chunk = %chunk.coord(), "chunk has no visible faces");
        return None;
    }
    tracing::trace!(chunk = %chunk.coord(), quads = mesh.quad_count(), "chunk meshed");
    Some(mesh)
}
