//! Determines which chunks need remeshing after a voxel edit.

use claw_voxel::{CHUNK_SIZE, ChunkCoord, LocalPos};

use crate::FaceDirection;

/// Computes the chunks whose meshes an edit can affect.
pub struct MeshInvalidator;

impl MeshInvalidator {
    /// Returns the chunks to mark dirty after a voxel is edited at `local`
    /// within `edited`.
    ///
    /// The edited chunk itself is always first. An axis neighbor is added only
    /// when the edit lies on the face it shares with that neighbor (local
    /// coordinate 0 or 15), since only then can its boundary faces change.
    pub fn invalidate(edited: ChunkCoord, local: LocalPos) -> Vec<ChunkCoord> {
        let last = CHUNK_SIZE - 1;
        let [x, y, z] = local;
        let mut dirty = vec![edited];

        let on_face = [
            (x == last, FaceDirection::PosX),
            (x == 0, FaceDirection::NegX),
            (y == last, FaceDirection::PosY),
            (y == 0, FaceDirection::NegY),
            (z == last, FaceDirection::PosZ),
            (z == 0, FaceDirection::NegZ),
        ];
        for (hit, dir) in on_face {
            if hit {
                dirty.push(neighbor_coord(edited, dir));
            }
        }

        dirty
    }
}

/// Returns the coordinate of the chunk across the given face.
pub fn neighbor_coord(coord: ChunkCoord, dir: FaceDirection) -> ChunkCoord {
    let d = dir.delta();
    coord.offset(d.x, d.y, d.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> ChunkCoord {
        ChunkCoord::new(0, 0, 0)
    }

    #[test]
    fn test_voxel_change_invalidates_own_mesh() {
        let dirty = MeshInvalidator::invalidate(origin(), [8, 8, 8]);
        assert_eq!(dirty[0], origin());
    }

    #[test]
    fn test_interior_change_does_not_invalidate_neighbors() {
        let dirty = MeshInvalidator::invalidate(origin(), [1, 14, 7]);
        assert_eq!(dirty, vec![origin()]);
    }

    #[test]
    fn test_boundary_change_invalidates_exactly_one_neighbor() {
        let cases = [
            ([0, 8, 8], origin().offset(-1, 0, 0)),
            ([15, 8, 8], origin().offset(1, 0, 0)),
            ([8, 0, 8], origin().offset(0, -1, 0)),
            ([8, 15, 8], origin().offset(0, 1, 0)),
            ([8, 8, 0], origin().offset(0, 0, -1)),
            ([8, 8, 15], origin().offset(0, 0, 1)),
        ];
        for (local, expected) in cases {
            let dirty = MeshInvalidator::invalidate(origin(), local);
            assert_eq!(dirty, vec![origin(), expected], "edit at {local:?}");
        }
    }

    #[test]
    fn test_corner_edit_invalidates_three_face_neighbors() {
        let c = ChunkCoord::new(2, 0, -3);
        let dirty = MeshInvalidator::invalidate(c, [0, 15, 0]);
        assert_eq!(dirty.len(), 4);
        assert!(dirty.contains(&c.offset(-1, 0, 0)));
        assert!(dirty.contains(&c.offset(0, 1, 0)));
        assert!(dirty.contains(&c.offset(0, 0, -1)));
    }

    #[test]
    fn test_neighbor_coord_follows_face_delta() {
        assert_eq!(
            neighbor_coord(origin(), FaceDirection::NegY),
            ChunkCoord::new(0, -1, 0)
        );
    }
}
