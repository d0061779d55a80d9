//! Procedural terrain generation: fBm heightmap, layered columns, ore veins and trees.

mod generator;
mod heightmap;
mod ore;
mod seed;
mod tree;

pub use generator::{TerrainGenerator, TerrainParams, generate_chunk};
pub use heightmap::{HeightmapParams, HeightmapSampler};
pub use ore::{OreDistribution, OreDistributor, default_ore_distributions};
pub use seed::{column_rng, derive_column_seed, hash_chunk, noise_seed};
pub use tree::{CANOPY_RADII, TreeParams, TreePlacer};
