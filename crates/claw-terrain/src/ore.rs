//! Ore distribution for underground stone.
//!
//! A single 3D noise field, seeded independently of the heightmap, is sampled
//! at each deep stone voxel. Ores are nested bands of that field: a voxel
//! becomes the rarest ore whose threshold it exceeds.

use claw_voxel::BlockId;
use noise::{NoiseFn, Simplex};

use crate::seed::noise_seed;

/// Seed offset of the ore field relative to the world seed.
pub const ORE_SEED_OFFSET: u32 = 500;

/// Configuration for a single ore type.
#[derive(Clone, Debug)]
pub struct OreDistribution {
    /// The block this ore places.
    pub ore_type: BlockId,
    /// Human-readable name for logging/debugging.
    pub name: String,
    /// Normalized noise value the voxel must exceed. Range: \[0.0, 1.0\].
    /// Higher threshold = rarer ore.
    pub noise_threshold: f64,
}

/// Distributes ore veins in subsurface stone using 3D noise.
pub struct OreDistributor {
    noise: Simplex,
    /// Spatial scale of veins (noise frequency per voxel).
    vein_scale: f64,
    /// Ores only appear strictly deeper than this below the surface.
    min_depth: i32,
    /// Sorted strictest threshold first.
    ores: Vec<OreDistribution>,
}

impl OreDistributor {
    /// Create a distributor for `seed` with the given ore bands.
    ///
    /// The bands are reordered strictest-first so that a voxel above several
    /// thresholds resolves to the rarest ore.
    pub fn new(seed: u64, min_depth: i32, vein_scale: f64, mut ores: Vec<OreDistribution>) -> Self {
        ores.sort_by(|a, b| b.noise_threshold.total_cmp(&a.noise_threshold));
        Self {
            noise: Simplex::new(noise_seed(seed, ORE_SEED_OFFSET)),
            vein_scale,
            min_depth,
            ores,
        }
    }

    /// Maps a normalized field value to the ore it selects, if any.
    pub fn classify(&self, value: f64) -> Option<BlockId> {
        self.ores
            .iter()
            .find(|ore| value > ore.noise_threshold)
            .map(|ore| ore.ore_type)
    }

    /// Normalized `[0, 1]` field value at a world voxel.
    pub fn field(&self, wx: i32, wy: i32, wz: i32) -> f64 {
        let raw = self.noise.get([
            wx as f64 * self.vein_scale,
            wy as f64 * self.vein_scale,
            wz as f64 * self.vein_scale,
        ]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Ore (if any) that replaces stone at world voxel `(wx, wy, wz)` in a
    /// column whose surface is at `surface_y`.
    pub fn sample_ore(&self, wx: i32, wy: i32, wz: i32, surface_y: i32) -> Option<BlockId> {
        if surface_y - wy <= self.min_depth {
            return None;
        }
        self.classify(self.field(wx, wy, wz))
    }

    /// Count the number of registered ore types.
    pub fn ore_count(&self) -> usize {
        self.ores.len()
    }
}

/// Iron, gold and diamond bands with the given thresholds.
pub fn default_ore_distributions(iron: f64, gold: f64, diamond: f64) -> Vec<OreDistribution> {
    vec![
        OreDistribution {
            ore_type: BlockId::IRON,
            name: "iron".into(),
            noise_threshold: iron,
        },
        OreDistribution {
            ore_type: BlockId::GOLD,
            name: "gold".into(),
            noise_threshold: gold,
        },
        OreDistribution {
            ore_type: BlockId::DIAMOND,
            name: "diamond".into(),
            noise_threshold: diamond,
        },
    ]
}
