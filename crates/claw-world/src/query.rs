//! Narrow world interfaces handed to simulation and rendering code.
//!
//! Consumers take `&impl WorldQuery` or `&mut impl WorldEdit` explicitly
//! instead of reaching for a shared global world.

use claw_voxel::{BlockId, BlockRegistry};

/// Read-only voxel queries.
pub trait WorldQuery {
    /// Block at a world voxel; Air when the owning chunk is not loaded.
    fn block(&self, wx: i32, wy: i32, wz: i32) -> BlockId;

    /// One above the topmost non-Air cell of the column, or 0.
    fn surface_y(&self, wx: i32, wz: i32) -> i32;

    /// Block definitions backing this world.
    fn registry(&self) -> &BlockRegistry;

    /// Returns `true` if the voxel blocks sight and movement.
    fn is_opaque_at(&self, wx: i32, wy: i32, wz: i32) -> bool {
        self.registry().is_opaque(self.block(wx, wy, wz))
    }
}

/// Voxel edits with domain outcomes rather than errors.
pub trait WorldEdit: WorldQuery {
    /// Writes `block` only if the target is Air. Returns whether it was placed.
    fn place(&mut self, wx: i32, wy: i32, wz: i32, block: BlockId) -> bool;

    /// Clears a non-Air target and returns what was there.
    fn remove(&mut self, wx: i32, wy: i32, wz: i32) -> Option<BlockId>;
}
