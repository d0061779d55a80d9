//! The six cardinal directions a voxel face can point.

use glam::{IVec3, Vec3};

/// One of the six cardinal directions a voxel face can point.
///
/// The `repr(u8)` discriminant doubles as the bit index inside [`crate::VisibleFaces`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FaceDirection {
    /// +X direction.
    PosX = 0,
    /// −X direction.
    NegX = 1,
    /// +Y direction.
    PosY = 2,
    /// −Y direction.
    NegY = 3,
    /// +Z direction.
    PosZ = 4,
    /// −Z direction.
    NegZ = 5,
}

impl FaceDirection {
    /// All six directions in order.
    pub const ALL: [FaceDirection; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    /// Unit step toward the neighbor across this face.
    pub fn delta(self) -> IVec3 {
        match self {
            Self::PosX => IVec3::X,
            Self::NegX => IVec3::NEG_X,
            Self::PosY => IVec3::Y,
            Self::NegY => IVec3::NEG_Y,
            Self::PosZ => IVec3::Z,
            Self::NegZ => IVec3::NEG_Z,
        }
    }

    /// Returns the unit normal as `[f32; 3]` for this face direction.
    pub fn normal(self) -> [f32; 3] {
        self.delta().as_vec3().to_array()
    }

    /// Returns the neighbor coordinate offset for this direction.
    pub fn offset(self, x: i32, y: i32, z: i32) -> (i32, i32, i32) {
        let d = self.delta();
        (x + d.x, y + d.y, z + d.z)
    }

    /// The four corners of this face on a unit cube at the origin.
    ///
    /// Ordered so that triangles `(0, 1, 2)` and `(0, 2, 3)` wind consistently
    /// when viewed from outside the cube.
    pub fn corners(self) -> [Vec3; 4] {
        let c = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);
        match self {
            Self::PosX => [c(1., 0., 0.), c(1., 1., 0.), c(1., 1., 1.), c(1., 0., 1.)],
            Self::NegX => [c(0., 0., 1.), c(0., 1., 1.), c(0., 1., 0.), c(0., 0., 0.)],
            Self::PosY => [c(0., 1., 1.), c(1., 1., 1.), c(1., 1., 0.), c(0., 1., 0.)],
            Self::NegY => [c(0., 0., 0.), c(1., 0., 0.), c(1., 0., 1.), c(0., 0., 1.)],
            Self::PosZ => [c(0., 0., 1.), c(1., 0., 1.), c(1., 1., 1.), c(0., 1., 1.)],
            Self::NegZ => [c(1., 0., 0.), c(0., 0., 0.), c(0., 1., 0.), c(1., 1., 0.)],
        }
    }

    /// Returns the opposite face direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::PosX => Self::NegX,
            Self::NegX => Self::PosX,
            Self::PosY => Self::NegY,
            Self::NegY => Self::PosY,
            Self::PosZ => Self::NegZ,
            Self::NegZ => Self::PosZ,
        }
    }

    /// Returns the direction index (0–5).
    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_directions_unique() {
        for (i, a) in FaceDirection::ALL.iter().enumerate() {
            for (j, b) in FaceDirection::ALL.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_offset_pos_x() {
        assert_eq!(FaceDirection::PosX.offset(5, 10, 15), (6, 10, 15));
    }

    #[test]
    fn test_offset_negative_result() {
        assert_eq!(FaceDirection::NegX.offset(0, 0, 0), (-1, 0, 0));
    }

    #[test]
    fn test_opposite_cancels_delta() {
        for dir in FaceDirection::ALL {
            assert_eq!(dir.delta() + dir.opposite().delta(), IVec3::ZERO);
        }
    }

    #[test]
    fn test_corners_lie_on_face_plane() {
        for dir in FaceDirection::ALL {
            let n = Vec3::from_array(dir.normal());
            // Plane offset: 1 for positive faces, 0 for negative faces.
            let plane = if n.x + n.y + n.z > 0.0 { 1.0 } else { 0.0 };
            for corner in dir.corners() {
                assert_eq!(corner.dot(n.abs()), plane, "{dir:?} corner {corner}");
            }
        }
    }

    #[test]
    fn test_corner_winding_faces_outward() {
        for dir in FaceDirection::ALL {
            let [a, b, c, _] = dir.corners();
            let winding = (b - a).cross(c - a).normalize();
            assert_eq!(winding.to_array(), dir.normal(), "{dir:?} winds inward");
        }
    }
}
