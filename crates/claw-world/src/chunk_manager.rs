//! Central owner for all loaded chunks and their rendered geometry.
//!
//! The [`ChunkManager`] streams chunks in and out around a center column,
//! resolves world-space block queries across chunk seams, propagates
//! dirtiness to boundary neighbors on edits and drives remeshing. Chunk
//! storage uses an [`FxHashMap`] keyed by [`ChunkCoord`].

use claw_config::Config;
use claw_mesh::{FaceDirection, MeshInvalidator, mesh_chunk, neighbor_coord};
use claw_terrain::{TerrainGenerator, TerrainParams};
use claw_voxel::{BlockId, BlockRegistry, Chunk, ChunkCoord, world_to_chunk};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::WorldError;
use crate::query::{WorldEdit, WorldQuery};
use crate::renderer::{ChunkRenderer, NullRenderer};
use crate::settings::{WorldSettings, terrain_params};

/// What a [`ChunkManager::load_around`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Chunks created and filled by the terrain generator.
    pub generated: usize,
    /// Chunks dropped for leaving the load radius.
    pub evicted: usize,
    /// Dirty chunks run through the mesher.
    pub remeshed: usize,
}

/// Owns every loaded chunk and decides when chunk geometry is rebuilt.
///
/// This is the single authority for which chunks exist in memory. Callers
/// never get a mutable handle to a chunk; all edits go through
/// [`ChunkManager::set_block`] and friends so dirtiness stays correct.
pub struct ChunkManager<R: ChunkRenderer = NullRenderer> {
    settings: WorldSettings,
    registry: BlockRegistry,
    generator: TerrainGenerator,
    chunks: FxHashMap<ChunkCoord, Chunk>,
    meshes: FxHashMap<ChunkCoord, R::Handle>,
    renderer: R,
}

impl ChunkManager<NullRenderer> {
    /// Headless manager with default terrain.
    pub fn new(settings: WorldSettings) -> Self {
        Self::with_renderer(settings, TerrainParams::default(), NullRenderer)
    }
}

impl<R: ChunkRenderer> ChunkManager<R> {
    /// Creates an empty manager. The terrain seed is taken from `settings`.
    pub fn with_renderer(settings: WorldSettings, terrain: TerrainParams, renderer: R) -> Self {
        let generator = TerrainGenerator::new(TerrainParams {
            seed: settings.seed,
            ..terrain
        });
        Self {
            settings,
            registry: BlockRegistry::new(),
            generator,
            chunks: FxHashMap::default(),
            meshes: FxHashMap::default(),
            renderer,
        }
    }

    /// Creates an empty manager from the `world` and `terrain` config sections.
    pub fn from_config(config: &Config, renderer: R) -> Self {
        Self::with_renderer(WorldSettings::from(config), terrain_params(config), renderer)
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Loads every chunk within the render distance of the column containing
    /// `(center_x, center_z)`, evicts everything else, then remeshes.
    ///
    /// The needed set is a square of `2 * radius + 1` chunks per side, stacked
    /// `height_chunks` high from chunk y = 0 (see [`WorldSettings`] for caps).
    pub fn load_around(&mut self, center_x: f64, center_z: f64) -> LoadStats {
        let (center, _) = world_to_chunk(center_x.floor() as i32, 0, center_z.floor() as i32);
        let rd = self.settings.chunk_radius();
        let height = self.settings.height_chunks();
        let mut stats = LoadStats::default();

        let mut needed = FxHashSet::default();
        for cx in center.cx - rd..=center.cx + rd {
            for cz in center.cz - rd..=center.cz + rd {
                for cy in 0..height {
                    let coord = ChunkCoord::new(cx, cy, cz);
                    needed.insert(coord);
                    if !self.chunks.contains_key(&coord) {
                        self.chunks.insert(coord, self.generator.generate(coord));
                        stats.generated += 1;
                    }
                }
            }
        }

        let stale: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|coord| !needed.contains(*coord))
            .copied()
            .collect();
        for coord in stale {
            self.chunks.remove(&coord);
            if let Some(handle) = self.meshes.remove(&coord) {
                self.renderer.dispose(coord, handle);
            }
            stats.evicted += 1;
        }

        stats.remeshed = self.remesh_dirty();
        tracing::debug!(
            center = %center,
            generated = stats.generated,
            evicted = stats.evicted,
            remeshed = stats.remeshed,
            loaded = self.chunks.len(),
            "load_around"
        );
        stats
    }

    /// Block at a world voxel. Air when the owning chunk is not loaded.
    pub fn get_block(&self, wx: i32, wy: i32, wz: i32) -> BlockId {
        block_at(&self.chunks, wx, wy, wz)
    }

    /// Writes a block and remeshes everything the edit can affect.
    ///
    /// Besides the owning chunk, each loaded axis neighbor whose shared face
    /// the edit touches (local coordinate 0 or 15) is marked dirty.
    pub fn set_block(&mut self, wx: i32, wy: i32, wz: i32, block: BlockId) -> Result<(), WorldError> {
        let (coord, local) = world_to_chunk(wx, wy, wz);
        let chunk = self
            .chunks
            .get_mut(&coord)
            .ok_or(WorldError::ChunkNotLoaded(coord))?;
        chunk.set(local[0] as i32, local[1] as i32, local[2] as i32, block);

        for neighbor in MeshInvalidator::invalidate(coord, local).into_iter().skip(1) {
            if let Some(chunk) = self.chunks.get_mut(&neighbor) {
                chunk.mark_dirty();
            }
        }
        tracing::trace!(wx, wy, wz, block = block.0, chunk = %coord, "set_block");

        self.remesh_dirty();
        Ok(())
    }

    /// Places `block` only if the target is currently Air.
    pub fn place_block(&mut self, wx: i32, wy: i32, wz: i32, block: BlockId) -> bool {
        if !self.get_block(wx, wy, wz).is_air() {
            return false;
        }
        self.set_block(wx, wy, wz, block).is_ok()
    }

    /// Clears a non-Air target and returns the block that was there.
    pub fn remove_block(&mut self, wx: i32, wy: i32, wz: i32) -> Option<BlockId> {
        let previous = self.get_block(wx, wy, wz);
        if previous.is_air() {
            return None;
        }
        self.set_block(wx, wy, wz, BlockId::AIR).ok()?;
        Some(previous)
    }

    /// Scans the column down from the world top. Returns one above the first
    /// non-Air cell, or 0 if the whole column is Air.
    pub fn get_surface_y(&self, wx: i32, wz: i32) -> i32 {
        (0..=self.settings.top_y())
            .rev()
            .find(|&y| !self.get_block(wx, y, wz).is_air())
            .map_or(0, |y| y + 1)
    }

    /// Every loaded chunk, in no particular order.
    pub fn loaded_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Coordinates of every loaded chunk, sorted.
    pub fn loaded_coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort_unstable();
        coords
    }

    /// Read-only access to a loaded chunk.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Number of currently loaded chunks.
    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    /// Geometry handle currently installed for `coord`.
    pub fn mesh_handle(&self, coord: ChunkCoord) -> Option<&R::Handle> {
        self.meshes.get(&coord)
    }

    /// Installs persisted chunk bytes at `coord`, replacing any loaded chunk.
    ///
    /// The chunk is meshed on the next remesh pass; loaded neighbors are
    /// flagged as well since their boundary faces may change.
    pub fn load_chunk(&mut self, coord: ChunkCoord, bytes: &[u8]) -> Result<(), WorldError> {
        let chunk = Chunk::deserialize(coord, bytes)
            .map_err(|source| WorldError::Decode { coord, source })?;
        self.chunks.insert(coord, chunk);

        for dir in FaceDirection::ALL {
            if let Some(neighbor) = self.chunks.get_mut(&neighbor_coord(coord, dir)) {
                neighbor.mark_dirty();
            }
        }
        tracing::debug!(chunk = %coord, "loaded persisted chunk");
        Ok(())
    }

    /// Rebuilds geometry for every dirty chunk. Returns how many were processed.
    ///
    /// A chunk whose mesh comes back empty has its old handle disposed. The
    /// dirty flag is cleared either way. Chunks are processed in coordinate
    /// order so renderer calls are reproducible.
    pub fn remesh_dirty(&mut self) -> usize {
        let mut dirty: Vec<ChunkCoord> = self
            .chunks
            .iter()
            .filter(|(_, chunk)| chunk.is_dirty())
            .map(|(coord, _)| *coord)
            .collect();
        dirty.sort_unstable();

        for &coord in &dirty {
            let Some(chunk) = self.chunks.get(&coord) else {
                continue;
            };
            let mesh = mesh_chunk(chunk, &self.registry, |x, y, z| block_at(&self.chunks, x, y, z));

            let previous = self.meshes.remove(&coord);
            match mesh {
                Some(mesh) => {
                    let handle = self.renderer.upload(coord, mesh, previous);
                    self.meshes.insert(coord, handle);
                }
                None => {
                    if let Some(handle) = previous {
                        self.renderer.dispose(coord, handle);
                    }
                }
            }

            if let Some(chunk) = self.chunks.get_mut(&coord) {
                chunk.clear_dirty();
            }
        }

        dirty.len()
    }

    /// Disposes every geometry handle and drops all chunks.
    pub fn dispose(&mut self) {
        for (coord, handle) in self.meshes.drain() {
            self.renderer.dispose(coord, handle);
        }
        self.chunks.clear();
        tracing::debug!("chunk manager disposed");
    }
}

impl<R: ChunkRenderer> WorldQuery for ChunkManager<R> {
    fn block(&self, wx: i32, wy: i32, wz: i32) -> BlockId {
        self.get_block(wx, wy, wz)
    }

    fn surface_y(&self, wx: i32, wz: i32) -> i32 {
        self.get_surface_y(wx, wz)
    }

    fn registry(&self) -> &BlockRegistry {
        &self.registry
    }
}

impl<R: ChunkRenderer> WorldEdit for ChunkManager<R> {
    fn place(&mut self, wx: i32, wy: i32, wz: i32, block: BlockId) -> bool {
        self.place_block(wx, wy, wz, block)
    }

    fn remove(&mut self, wx: i32, wy: i32, wz: i32) -> Option<BlockId> {
        self.remove_block(wx, wy, wz)
    }
}

/// Resolves a world voxel against the loaded chunk map.
fn block_at(chunks: &FxHashMap<ChunkCoord, Chunk>, wx: i32, wy: i32, wz: i32) -> BlockId {
    let (coord, local) = world_to_chunk(wx, wy, wz);
    chunks
        .get(&coord)
        .map_or(BlockId::AIR, |chunk| {
            chunk.get(local[0] as i32, local[1] as i32, local[2] as i32)
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
