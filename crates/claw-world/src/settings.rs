//! Conversion from the persisted configuration into world and terrain settings.

use claw_config::{Config, MAX_RENDER_DISTANCE, MAX_WORLD_HEIGHT_CHUNKS};
use claw_terrain::{TerrainParams, TreeParams};

/// World extent and seed used by [`crate::ChunkManager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldSettings {
    /// Seed for every terrain noise field.
    pub seed: u64,
    /// Horizontal chunk radius kept loaded around the center.
    pub render_distance: u32,
    /// Vertical extent in chunks, starting at chunk y = 0.
    pub world_height_chunks: u32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            render_distance: 3,
            world_height_chunks: 2,
        }
    }
}

impl WorldSettings {
    /// Horizontal load radius in chunks, capped at [`MAX_RENDER_DISTANCE`].
    pub fn chunk_radius(&self) -> i32 {
        self.render_distance.min(MAX_RENDER_DISTANCE) as i32
    }

    /// Vertical extent in chunks, capped at [`MAX_WORLD_HEIGHT_CHUNKS`].
    pub fn height_chunks(&self) -> i32 {
        self.world_height_chunks.min(MAX_WORLD_HEIGHT_CHUNKS) as i32
    }

    /// Highest world Y that can hold a block.
    pub fn top_y(&self) -> i32 {
        self.height_chunks() * claw_voxel::CHUNK_SIZE as i32 - 1
    }
}

impl From<&Config> for WorldSettings {
    fn from(config: &Config) -> Self {
        Self {
            seed: config.world.seed,
            render_distance: config.world.render_distance,
            world_height_chunks: config.world.world_height_chunks,
        }
    }
}

/// Terrain parameters described by `config`.
pub fn terrain_params(config: &Config) -> TerrainParams {
    let t = &config.terrain;
    TerrainParams {
        seed: config.world.seed,
        base_height: t.base_height,
        hill_amplitude: t.hill_amplitude,
        water_level: t.water_level,
        octaves: t.octaves,
        frequency: t.frequency,
        dirt_depth: t.dirt_depth,
        ore_min_depth: t.ore_min_depth,
        vein_scale: t.vein_scale,
        iron_threshold: t.iron_threshold,
        gold_threshold: t.gold_threshold,
        diamond_threshold: t.diamond_threshold,
        trees: TreeParams {
            threshold: t.tree_threshold,
            trunk_min: t.trunk_min,
            trunk_max: t.trunk_max,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_default_settings() {
        let config = Config::default();
        assert_eq!(WorldSettings::from(&config), WorldSettings::default());
    }

    #[test]
    fn test_terrain_params_follow_config() {
        let mut config = Config::default();
        config.world.seed = 7;
        config.terrain.water_level = 6;
        config.terrain.tree_threshold = 0.5;

        let params = terrain_params(&config);
        assert_eq!(params.seed, 7);
        assert_eq!(params.water_level, 6);
        assert_eq!(params.trees.threshold, 0.5);
        assert_eq!(params.base_height, TerrainParams::default().base_height);
    }

    #[test]
    fn test_top_y() {
        assert_eq!(WorldSettings::default().top_y(), 31);
    }

    #[test]
    fn test_oversized_extent_is_capped() {
        let settings = WorldSettings {
            seed: 1,
            render_distance: u32::MAX,
            world_height_chunks: u32::MAX,
        };
        assert_eq!(settings.chunk_radius(), MAX_RENDER_DISTANCE as i32);
        assert_eq!(settings.height_chunks(), MAX_WORLD_HEIGHT_CHUNKS as i32);
        assert_eq!(settings.top_y(), MAX_WORLD_HEIGHT_CHUNKS as i32 * 16 - 1);
    }
}
