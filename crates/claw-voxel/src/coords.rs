//! Chunk-grid coordinates and the world → chunk mapping.

use std::fmt;
use std::str::FromStr;

use glam::IVec3;

use crate::chunk::CHUNK_SIZE;

/// Identifies a chunk's position on the chunk grid.
///
/// The coordinate triple is the in-memory map key. Its [`Display`](fmt::Display)
/// form `"cx,cy,cz"` is the canonical external storage key and parses back via
/// [`FromStr`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    pub fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    /// Returns the coordinate of the chunk offset by `(dx, dy, dz)`.
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }

    /// World-space voxel coordinate of this chunk's `(0, 0, 0)` corner.
    pub fn origin(self) -> IVec3 {
        IVec3::new(self.cx, self.cy, self.cz) * CHUNK_SIZE as i32
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.cx, self.cy, self.cz)
    }
}

/// A chunk key string that is not of the form `"cx,cy,cz"`.
#[derive(Debug, thiserror::Error)]
#[error("invalid chunk key {0:?}: expected \"cx,cy,cz\"")]
pub struct ChunkKeyError(pub String);

impl FromStr for ChunkCoord {
    type Err = ChunkKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(|p| p.trim().parse::<i32>());
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(cx)), Some(Ok(cy)), Some(Ok(cz)), None) => Ok(Self { cx, cy, cz }),
            _ => Err(ChunkKeyError(s.to_string())),
        }
    }
}

/// Local voxel position inside a chunk; every component is in `[0, CHUNK_SIZE)`.
pub type LocalPos = [usize; 3];

/// Splits a world voxel coordinate into its owning chunk and local position.
///
/// Uses floor division, so negative coordinates map into the chunk below with a
/// non-negative local index (e.g. `-1` → chunk `-1`, local `15`).
pub fn world_to_chunk(wx: i32, wy: i32, wz: i32) -> (ChunkCoord, LocalPos) {
    let size = CHUNK_SIZE as i32;
    let coord = ChunkCoord::new(wx.div_euclid(size), wy.div_euclid(size), wz.div_euclid(size));
    let local = [
        wx.rem_euclid(size) as usize,
        wy.rem_euclid(size) as usize,
        wz.rem_euclid(size) as usize,
    ];
    (coord, local)
}
