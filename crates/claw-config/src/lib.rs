//! Configuration for the voxel world.
//!
//! Settings persist to disk as `config.ron`. Missing sections and fields fall
//! back to defaults and unknown fields are ignored, so old and new files both
//! load. Command-line flags override the loaded values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, MAX_RENDER_DISTANCE, MAX_WORLD_HEIGHT_CHUNKS, StorageConfig, TerrainConfig,
    WorldConfig, default_config_dir,
};
pub use error::ConfigError;
