//! Headless voxel world session.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p claw-demo -- --seed 7 --save-dir ./world` to stream
//! terrain along a path, edit a block at the surface and save the result.

use std::path::PathBuf;

use clap::Parser;
use claw_config::{CliArgs, Config, default_config_dir};
use claw_voxel::BlockId;
use claw_world::{
    ChunkManager, ChunkStore, RetainedMeshes, StorageError, WorldEdit, WorldMeta, WorldQuery,
};
use tracing::{error, info, warn};

/// World-space distance between `load_around` centers on the walk.
const WALK_STEP: f64 = 24.0;
/// Number of `load_around` calls along the walk.
const WALK_STEPS: u32 = 8;
/// Simulated seconds per walk step.
const STEP_SECONDS: f64 = 30.0;
/// Simulated seconds per in-world day.
const DAY_SECONDS: f64 = 600.0;

type World = ChunkManager<RetainedMeshes>;

/// Installs saved chunks and returns the previous session's metadata.
fn restore_session(store: &ChunkStore, world: &mut World) -> Result<Option<WorldMeta>, StorageError> {
    let meta = store.load_meta()?;
    if let Some(meta) = &meta
        && meta.seed != world.settings().seed
    {
        warn!(
            saved_seed = meta.seed,
            seed = world.settings().seed,
            "save was generated with a different seed; unsaved chunks will not match"
        );
    }
    let restored = store.restore_into(world)?;
    info!(restored, root = %store.root().display(), "Restored world save");
    Ok(meta)
}

/// Streams chunks along +X and returns the final center.
fn demonstrate_streaming(world: &mut World) -> (f64, f64) {
    let mut center = (0.0, 0.0);
    for step in 0..WALK_STEPS {
        center = (step as f64 * WALK_STEP, step as f64 * WALK_STEP * 0.5);
        let stats = world.load_around(center.0, center.1);
        info!(
            step,
            x = center.0,
            z = center.1,
            generated = stats.generated,
            evicted = stats.evicted,
            remeshed = stats.remeshed,
            loaded = world.loaded_count(),
            "Streamed chunks"
        );
    }
    info!(
        meshes = world.renderer().mesh_count(),
        quads = world.renderer().total_quads(),
        "Walk finished"
    );
    center
}

/// Reports the column under `(x, z)` through the read-only query trait.
fn describe_column(world: &impl WorldQuery, x: i32, z: i32) {
    let top = world.surface_y(x, z);
    let surface = world.block(x, top - 1, z);
    let def = world.registry().get(surface);
    info!(x, z, surface_y = top, block = def.name, "Column");
}

/// Places and removes a block on top of the column at `(x, z)`.
fn demonstrate_edit(world: &mut impl WorldEdit, x: i32, z: i32) {
    let y = world.surface_y(x, z);
    if !world.place(x, y, z, BlockId::PLANKS) {
        warn!(x, y, z, "Could not place planks at the surface");
        return;
    }
    info!(x, y, z, surface_y = world.surface_y(x, z), "Placed planks");

    match world.remove(x, y, z) {
        Some(block) => info!(x, y, z, removed = block.0, "Removed block"),
        None => warn!(x, y, z, "Nothing to remove"),
    }
}

fn save_session(
    store: &ChunkStore,
    world: &World,
    previous: Option<&WorldMeta>,
) -> Result<(), StorageError> {
    let elapsed = previous.map_or(0.0, |m| m.elapsed) + f64::from(WALK_STEPS) * STEP_SECONDS;
    let meta = WorldMeta::new(world.settings().seed, elapsed, (elapsed / DAY_SECONDS) as u32);
    store.save_all(world.loaded_chunks())?;
    store.save_meta(&meta)?;
    info!(elapsed, day_count = meta.day_count, "Saved world meta");
    Ok(())
}

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from(".claw"));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);
    if let Err(e) = config.validate() {
        eprintln!("{e}, using defaults");
        config = Config::default();
    }

    let log_dir = config_dir.join("logs");
    claw_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
    info!(seed = config.world.seed, config_dir = %config_dir.display(), "Starting session");

    let mut world = ChunkManager::from_config(&config, RetainedMeshes::new());

    let store = config.storage.save_dir.as_ref().and_then(|dir| {
        ChunkStore::open(dir)
            .map_err(|e| error!("Failed to open world save: {e}"))
            .ok()
    });
    let previous = store.as_ref().and_then(|store| {
        restore_session(store, &mut world)
            .map_err(|e| error!("Failed to restore world save: {e}"))
            .ok()
            .flatten()
    });

    let (cx, cz) = demonstrate_streaming(&mut world);
    let (x, z) = (cx.floor() as i32, cz.floor() as i32);
    describe_column(&world, x, z);
    demonstrate_edit(&mut world, x, z);

    if let Some(store) = &store
        && config.storage.autosave
        && let Err(e) = save_session(store, &world, previous.as_ref())
    {
        error!("Failed to save world: {e}");
    }

    world.dispose();
    info!("Session finished");
}
