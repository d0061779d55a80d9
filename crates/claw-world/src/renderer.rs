//! Seam between the chunk manager and whatever draws chunk geometry.
//!
//! The manager owns the handle map and decides when a chunk's geometry is
//! installed, replaced or dropped. The renderer only turns meshes into
//! handles and releases them when told to.

use claw_mesh::ChunkMesh;
use claw_voxel::ChunkCoord;
use rustc_hash::FxHashMap;

/// Rendering collaborator driven by [`crate::ChunkManager`].
pub trait ChunkRenderer {
    /// Opaque per-chunk geometry handle.
    type Handle;

    /// Installs `mesh` for `coord`. `previous` is the chunk's old handle, if
    /// any, which the renderer may reuse or release.
    fn upload(
        &mut self,
        coord: ChunkCoord,
        mesh: ChunkMesh,
        previous: Option<Self::Handle>,
    ) -> Self::Handle;

    /// Releases the geometry behind `handle`.
    fn dispose(&mut self, coord: ChunkCoord, handle: Self::Handle);
}

/// Renderer that discards every mesh. Used for headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl ChunkRenderer for NullRenderer {
    type Handle = ();

    fn upload(&mut self, _coord: ChunkCoord, _mesh: ChunkMesh, _previous: Option<()>) {}

    fn dispose(&mut self, _coord: ChunkCoord, _handle: ()) {}
}

/// One call the manager made into a [`RetainedMeshes`] renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderEvent {
    Upload(ChunkCoord),
    Dispose(ChunkCoord),
}

/// Handle issued by [`RetainedMeshes`]: a monotonically increasing upload id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Renderer that keeps the latest mesh of every chunk in memory.
///
/// Useful for exporting geometry and for observing which chunks the manager
/// remeshes.
#[derive(Debug, Default)]
pub struct RetainedMeshes {
    meshes: FxHashMap<ChunkCoord, ChunkMesh>,
    events: Vec<RenderEvent>,
    next_id: u64,
}

impl RetainedMeshes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mesh of `coord`, if it has one.
    pub fn mesh(&self, coord: ChunkCoord) -> Option<&ChunkMesh> {
        self.meshes.get(&coord)
    }

    /// Number of chunks with live geometry.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Total quads across all live meshes.
    pub fn total_quads(&self) -> usize {
        self.meshes.values().map(ChunkMesh::quad_count).sum()
    }

    /// Calls received since the last [`Self::take_events`].
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Drains the recorded calls.
    pub fn take_events(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }
}

impl ChunkRenderer for RetainedMeshes {
    type Handle = MeshHandle;

    fn upload(
        &mut self,
        coord: ChunkCoord,
        mesh: ChunkMesh,
        _previous: Option<MeshHandle>,
    ) -> MeshHandle {
        self.meshes.insert(coord, mesh);
        self.events.push(RenderEvent::Upload(coord));
        self.next_id += 1;
        MeshHandle(self.next_id)
    }

    fn dispose(&mut self, coord: ChunkCoord, _handle: MeshHandle) {
        self.meshes.remove(&coord);
        self.events.push(RenderEvent::Dispose(coord));
    }
}
