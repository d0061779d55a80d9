//! Visible face detection: determines which voxel faces are exposed and need geometry.

use claw_voxel::{BlockId, BlockRegistry, CHUNK_SIZE, CHUNK_VOLUME, Chunk};

use crate::face_direction::FaceDirection;

/// Bitmask indicating which of a voxel's 6 faces are visible.
///
/// Bit 0 = +X, Bit 1 = −X, Bit 2 = +Y, Bit 3 = −Y, Bit 4 = +Z, Bit 5 = −Z.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibleFaces(pub u8);

impl VisibleFaces {
    /// No faces visible.
    pub const NONE: Self = Self(0);
    /// All six faces visible.
    pub const ALL: Self = Self(0b0011_1111);

    /// Returns `true` if the face in the given direction is visible.
    pub fn is_visible(self, direction: FaceDirection) -> bool {
        self.0 & (1 << direction as u8) != 0
    }

    /// Marks the face in the given direction as visible.
    pub fn set_visible(&mut self, direction: FaceDirection) {
        self.0 |= 1 << direction as u8;
    }

    /// Returns the number of visible faces (0–6).
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Visible directions in [`FaceDirection::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = FaceDirection> {
        FaceDirection::ALL
            .into_iter()
            .filter(move |&dir| self.is_visible(dir))
    }
}

/// Returns `true` if `block` produces any geometry at all.
///
/// Only solid blocks and the liquid are meshed; non-solid decorations such as
/// torches are left to other renderers.
pub fn is_meshable(registry: &BlockRegistry, block: BlockId) -> bool {
    if block.is_air() {
        return false;
    }
    let def = registry.get(block);
    def.solid || def.liquid
}

/// Decides whether the face of `block` toward `neighbor` is exposed.
///
/// A face is hidden behind an opaque neighbor. A liquid never shows a face
/// against the same liquid, which removes internal surfaces of water bodies.
pub fn face_exposed(registry: &BlockRegistry, block: BlockId, neighbor: BlockId) -> bool {
    if registry.is_opaque(neighbor) {
        return false;
    }
    !(registry.is_liquid(block) && neighbor == block)
}

/// Computes per-voxel visible-face bitmasks for a chunk.
///
/// Neighbors inside the chunk are read from its own storage. Offsets that
/// leave `[0, 16)` are resolved through `neighbor` with **world** coordinates,
/// so the caller can reach into adjacent chunks.
///
/// Returns a flat `Vec` of length `CHUNK_VOLUME`, indexed the same way as
/// [`Chunk`] (x varies fastest: `x + y * SIZE + z * SIZE * SIZE`).
pub fn compute_visible_faces<F>(
    chunk: &Chunk,
    registry: &BlockRegistry,
    neighbor: F,
) -> Vec<VisibleFaces>
where
    F: Fn(i32, i32, i32) -> BlockId,
{
    let size = CHUNK_SIZE as i32;
    let origin = chunk.coord().origin();
    let mut result = vec![VisibleFaces::NONE; CHUNK_VOLUME];

    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                let block = chunk.get(x, y, z);
                if !is_meshable(registry, block) {
                    continue;
                }

                let mut faces = VisibleFaces::NONE;
                for dir in FaceDirection::ALL {
                    let (nx, ny, nz) = dir.offset(x, y, z);
                    let inside = (0..size).contains(&nx)
                        && (0..size).contains(&ny)
                        && (0..size).contains(&nz);
                    let neighbor_block = if inside {
                        chunk.get(nx, ny, nz)
                    } else {
                        neighbor(origin.x + nx, origin.y + ny, origin.z + nz)
                    };

                    if face_exposed(registry, block, neighbor_block) {
                        faces.set_visible(dir);
                    }
                }

                let idx = (x + y * size + z * size * size) as usize;
                result[idx] = faces;
            }
        }
    }

    result
}

/// Counts the total number of visible faces in a visibility array.
pub fn count_visible_faces(faces: &[VisibleFaces]) -> u32 {
    faces.iter().map(|vf| vf.count()).sum()
}
