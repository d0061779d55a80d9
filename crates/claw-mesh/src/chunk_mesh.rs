//! Immutable geometry snapshot produced by the surface mesher.

use glam::Vec3;

use crate::face_direction::FaceDirection;

/// A single world-space vertex, laid out for direct buffer upload.
///
/// Layout (40 bytes total):
///   - `[0..12]`  position `[f32; 3]`
///   - `[12..24]` normal `[f32; 3]` (flat per face)
///   - `[24..40]` color `[f32; 4]` (RGB plus transparency-derived alpha)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(MeshVertex, [u8; 40]);

/// Metadata for a single emitted face, used for statistics and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadInfo {
    /// Which face direction this quad belongs to.
    pub direction: FaceDirection,
}

/// Visible-face geometry of one chunk.
///
/// Every quad contributes four vertices and six indices (two triangles).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertex buffer.
    pub vertices: Vec<MeshVertex>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
    /// One entry per emitted quad.
    pub quads: Vec<QuadInfo>,
}

impl ChunkMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes one unit face of the voxel whose minimum corner is `origin`.
    pub fn push_face(&mut self, direction: FaceDirection, origin: Vec3, color: [f32; 4]) {
        let normal = direction.normal();
        let base = self.vertices.len() as u32;

        for corner in direction.corners() {
            self.vertices.push(MeshVertex {
                position: (origin + corner).to_array(),
                normal,
                color,
            });
        }

        // Corners are already wound outward, so both triangles share one order.
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        self.quads.push(QuadInfo { direction });
    }

    /// Returns `true` if no face was emitted.
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Returns the total number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Returns the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Counts the number of quads emitted for a specific face direction.
    pub fn count_quads_for_direction(&self, direction: FaceDirection) -> usize {
        self.quads
            .iter()
            .filter(|q| q.direction == direction)
            .count()
    }

    /// Vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Flattened position buffer (`x, y, z` per vertex).
    pub fn positions(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.position).collect()
    }

    /// Flattened normal buffer (`x, y, z` per vertex).
    pub fn normals(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.normal).collect()
    }

    /// Flattened color buffer (`r, g, b, a` per vertex).
    pub fn colors(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.color).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    #[test]
    fn test_empty_mesh() {
        let mesh = ChunkMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertices.len(), 0);
        assert_eq!(mesh.indices.len(), 0);
        assert_eq!(mesh.quad_count(), 0);
    }

    #[test]
    fn test_push_single_face() {
        let mut mesh = ChunkMesh::new();
        mesh.push_face(FaceDirection::PosY, Vec3::ZERO, WHITE);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.quad_count(), 1);
    }

    #[test]
    fn test_face_positions_are_offset_by_origin() {
        let mut mesh = ChunkMesh::new();
        mesh.push_face(FaceDirection::PosY, Vec3::new(16.0, 3.0, -5.0), WHITE);
        for v in &mesh.vertices {
            assert_eq!(v.position[1], 4.0, "top face sits one above the voxel origin");
            assert!((16.0..=17.0).contains(&v.position[0]));
            assert!((-5.0..=-4.0).contains(&v.position[2]));
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_indices_reference_their_own_quad() {
        let mut mesh = ChunkMesh::new();
        mesh.push_face(FaceDirection::PosX, Vec3::ZERO, WHITE);
        mesh.push_face(FaceDirection::NegZ, Vec3::ONE, WHITE);
        assert_eq!(&mesh.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_count_quads_by_direction() {
        let mut mesh = ChunkMesh::new();
        mesh.push_face(FaceDirection::PosY, Vec3::ZERO, WHITE);
        mesh.push_face(FaceDirection::PosY, Vec3::X, WHITE);
        mesh.push_face(FaceDirection::NegY, Vec3::ZERO, WHITE);
        assert_eq!(mesh.count_quads_for_direction(FaceDirection::PosY), 2);
        assert_eq!(mesh.count_quads_for_direction(FaceDirection::NegY), 1);
        assert_eq!(mesh.count_quads_for_direction(FaceDirection::PosX), 0);
    }

    #[test]
    fn test_byte_views_match_buffer_sizes() {
        let mut mesh = ChunkMesh::new();
        mesh.push_face(FaceDirection::NegX, Vec3::ZERO, [0.5, 0.5, 0.5, 0.6]);
        assert_eq!(mesh.vertex_bytes().len(), 4 * 40);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }

    #[test]
    fn test_flat_accessors() {
        let mut mesh = ChunkMesh::new();
        mesh.push_face(FaceDirection::PosZ, Vec3::ZERO, [0.1, 0.2, 0.3, 0.6]);
        assert_eq!(mesh.positions().len(), 12);
        assert_eq!(mesh.normals().len(), 12);
        let colors = mesh.colors();
        assert_eq!(colors.len(), 16);
        assert_eq!(&colors[..4], &[0.1, 0.2, 0.3, 0.6]);
    }
}
