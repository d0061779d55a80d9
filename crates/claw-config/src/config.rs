//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World extent and seed.
    pub world: WorldConfig,
    /// Terrain shape.
    pub terrain: TerrainConfig,
    /// Save location and autosave behaviour.
    pub storage: StorageConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// World configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for every terrain noise field.
    pub seed: u64,
    /// Horizontal chunk radius kept loaded around the center.
    pub render_distance: u32,
    /// Vertical world extent in chunks.
    pub world_height_chunks: u32,
}

/// Terrain generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Lowest possible surface height.
    pub base_height: i32,
    /// Surface height range above `base_height`.
    pub hill_amplitude: i32,
    /// Highest Y filled with water.
    pub water_level: i32,
    /// Heightmap octaves.
    pub octaves: u32,
    /// Heightmap base frequency.
    pub frequency: f64,
    /// Dirt layer thickness under the surface block.
    pub dirt_depth: i32,
    /// Minimum depth below the surface for ore veins.
    pub ore_min_depth: i32,
    /// Ore noise frequency.
    pub vein_scale: f64,
    pub iron_threshold: f64,
    pub gold_threshold: f64,
    pub diamond_threshold: f64,
    /// Per-column roll a tree must beat (0.0 - 1.0).
    pub tree_threshold: f64,
    pub trunk_min: u32,
    pub trunk_max: u32,
}

/// Save configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// World save directory. `None` keeps the world in memory only.
    pub save_dir: Option<PathBuf>,
    /// Save every loaded chunk at the end of a session.
    pub autosave: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            render_distance: 3,
            world_height_chunks: 2,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
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
            tree_threshold: 0.97,
            trunk_min: 4,
            trunk_max: 6,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Largest accepted `world.render_distance`.
pub const MAX_RENDER_DISTANCE: u32 = 32;
/// Largest accepted `world.world_height_chunks`.
pub const MAX_WORLD_HEIGHT_CHUNKS: u32 = 16;

// --- Load / Save / Reload ---

/// `<platform config dir>/claw`, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("claw"))
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Rejects settings the world cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        if !(1..=MAX_WORLD_HEIGHT_CHUNKS).contains(&w.world_height_chunks) {
            return Err(ConfigError::Invalid(format!(
                "world.world_height_chunks ({}) must be within 1..={MAX_WORLD_HEIGHT_CHUNKS}",
                w.world_height_chunks
            )));
        }
        if w.render_distance > MAX_RENDER_DISTANCE {
            return Err(ConfigError::Invalid(format!(
                "world.render_distance ({}) exceeds {MAX_RENDER_DISTANCE}",
                w.render_distance
            )));
        }
        let t = &self.terrain;
        if !(t.iron_threshold < t.gold_threshold && t.gold_threshold < t.diamond_threshold) {
            return Err(ConfigError::Invalid(format!(
                "ore thresholds must rise iron ({}) < gold ({}) < diamond ({})",
                t.iron_threshold, t.gold_threshold, t.diamond_threshold
            )));
        }
        if t.trunk_min > t.trunk_max {
            return Err(ConfigError::Invalid(format!(
                "terrain.trunk_min ({}) exceeds terrain.trunk_max ({})",
                t.trunk_min, t.trunk_max
            )));
        }
        if !(0.0..=1.0).contains(&t.tree_threshold) {
            return Err(ConfigError::Invalid(format!(
                "terrain.tree_threshold ({}) must be within 0.0..=1.0",
                t.tree_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(!ron_str.is_empty());
        assert!(ron_str.contains("seed: 42"));
        assert!(ron_str.contains("water_level: 3"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.storage.save_dir = Some(PathBuf::from("saves/alpha"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        // Config missing the `terrain` section entirely
        let ron_str = "(world: (seed: 7), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.render_distance, 3);
        assert_eq!(config.terrain, TerrainConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        // RON with #[serde(default)] and deny_unknown_fields not set should accept this
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.world.seed = 9001;
        config.world.render_distance = 5;
        config.storage.autosave = true;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").is_file());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.terrain.water_level = 6;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_some());
        assert_eq!(result.unwrap().terrain.water_level, 6);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_ron_comments_preserved() {
        let ron_str = "// This is a comment\n(\n  // Another comment\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_rejects_flat_world() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.world.world_height_chunks = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_trunk_range() {
        let mut config = Config::default();
        config.terrain.trunk_min = 7;
        config.terrain.trunk_max = 5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_unordered_ore_thresholds() {
        let mut config = Config::default();
        config.terrain.iron_threshold = 0.95;
        config.terrain.diamond_threshold = 0.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut tied = Config::default();
        tied.terrain.gold_threshold = tied.terrain.diamond_threshold;
        assert!(matches!(tied.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_caps_world_extent() {
        let mut config = Config::default();
        config.world.render_distance = MAX_RENDER_DISTANCE;
        config.world.world_height_chunks = MAX_WORLD_HEIGHT_CHUNKS;
        assert!(config.validate().is_ok());

        config.world.render_distance = u32::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.world.render_distance = 3;
        config.world.world_height_chunks = MAX_WORLD_HEIGHT_CHUNKS + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.ron"),
            "(world: (world_height_chunks: 0))",
        )
        .unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::Invalid(_))
        ));
    }
}
