//! Chunk terrain generation: heightmap columns, layered fill, ores and trees.
//!
//! Everything is a function of the world seed and global voxel coordinates,
//! so a chunk comes out identical no matter when, or next to what, it is
//! generated.

use claw_voxel::{BlockId, CHUNK_SIZE, Chunk, ChunkCoord};

use crate::heightmap::{HeightmapParams, HeightmapSampler};
use crate::ore::{OreDistributor, default_ore_distributions};
use crate::tree::{TreeParams, TreePlacer};

/// Tunable terrain shape.
#[derive(Clone, Debug)]
pub struct TerrainParams {
    /// World seed; determines every noise field.
    pub seed: u64,
    /// Lowest possible surface height.
    pub base_height: i32,
    /// Surface height range above `base_height`.
    pub hill_amplitude: i32,
    /// Cells above the surface and at or below this are Water.
    pub water_level: i32,
    /// Heightmap octaves.
    pub octaves: u32,
    /// Heightmap base frequency, in cycles per voxel.
    pub frequency: f64,
    /// Dirt cells beneath the surface cell.
    pub dirt_depth: i32,
    /// Ores need to be strictly deeper than this below the surface.
    pub ore_min_depth: i32,
    /// Ore noise frequency per voxel.
    pub vein_scale: f64,
    pub iron_threshold: f64,
    pub gold_threshold: f64,
    pub diamond_threshold: f64,
    pub trees: TreeParams,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 42,
            base_height: 4,
            hill_amplitude: 8,
            water_level: 3,
            octaves: 4,
            frequency: 0.04,
            dirt_depth: 3,
            ore_min_depth: 5,
            vein_scale: 0.12,
            iron_threshold: 0.70,
            gold_threshold: 0.78,
            diamond_threshold: 0.83,
            trees: TreeParams::default(),
        }
    }
}

/// Fills chunks from the seeded terrain fields.
pub struct TerrainGenerator {
    params: TerrainParams,
    heightmap: HeightmapSampler,
    ores: OreDistributor,
    trees: TreePlacer,
}

impl TerrainGenerator {
    pub fn new(params: TerrainParams) -> Self {
        let heightmap = HeightmapSampler::new(HeightmapParams {
            seed: params.seed,
            octaves: params.octaves,
            base_frequency: params.frequency,
            ..Default::default()
        });
        let ores = OreDistributor::new(
            params.seed,
            params.ore_min_depth,
            params.vein_scale,
            default_ore_distributions(
                params.iron_threshold,
                params.gold_threshold,
                params.diamond_threshold,
            ),
        );
        let trees = TreePlacer::new(params.seed, params.trees.clone());
        Self {
            params,
            heightmap,
            ores,
            trees,
        }
    }

    /// Default terrain shape for `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(TerrainParams {
            seed,
            ..Default::default()
        })
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Surface height of world column `(wx, wz)`: `base + floor(h * amplitude)`.
    pub fn surface_height(&self, wx: i32, wz: i32) -> i32 {
        let h = self.heightmap.sample(wx as f64, wz as f64);
        self.params.base_height + (h * self.params.hill_amplitude as f64).floor() as i32
    }

    /// Block of the layered column fill at world height `wy`, before ores
    /// and trees.
    pub fn column_block(&self, wy: i32, surface: i32) -> BlockId {
        let water = self.params.water_level;
        if wy > surface {
            if wy <= water { BlockId::WATER } else { BlockId::AIR }
        } else if wy == surface {
            if surface <= water { BlockId::SAND } else { BlockId::GRASS }
        } else if wy >= surface - self.params.dirt_depth {
            BlockId::DIRT
        } else {
            BlockId::STONE
        }
    }

    /// Generates the chunk at `coord`.
    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::new(coord);
        self.populate(&mut chunk);
        chunk
    }

    /// Writes terrain into `chunk`, which is expected to be all Air.
    ///
    /// Columns are filled first; trees go in a second pass so canopy writes
    /// do not depend on column order.
    pub fn populate(&self, chunk: &mut Chunk) {
        let size = CHUNK_SIZE as i32;
        let origin = chunk.coord().origin();
        let mut surfaces = [[0i32; CHUNK_SIZE]; CHUNK_SIZE];

        for lz in 0..size {
            for lx in 0..size {
                let (wx, wz) = (origin.x + lx, origin.z + lz);
                let surface = self.surface_height(wx, wz);
                surfaces[lz as usize][lx as usize] = surface;

                for ly in 0..size {
                    let wy = origin.y + ly;
                    let mut block = self.column_block(wy, surface);
                    if block == BlockId::STONE {
                        block = self.ores.sample_ore(wx, wy, wz, surface).unwrap_or(block);
                    }
                    if !block.is_air() {
                        chunk.set(lx, ly, lz, block);
                    }
                }
            }
        }

        let mut planted = 0u32;
        for lz in 0..size {
            for lx in 0..size {
                let surface = surfaces[lz as usize][lx as usize];
                if surface <= self.params.water_level {
                    continue;
                }
                let Some(trunk) = self.trees.roll(origin.x + lx, origin.z + lz) else {
                    continue;
                };
                let base_y = surface + 1 - origin.y;
                if base_y >= size || base_y + TreePlacer::tree_height(trunk) < 0 {
                    continue;
                }
                self.trees.place(chunk, lx, base_y, lz, trunk);
                planted += 1;
            }
        }

        tracing::trace!(chunk = %chunk.coord(), trees = planted, "chunk terrain generated");
    }
}

/// Generates one chunk with the default terrain shape.
pub fn generate_chunk(seed: u64, coord: ChunkCoord) -> Chunk {
    TerrainGenerator::with_seed(seed).generate(coord)
}
