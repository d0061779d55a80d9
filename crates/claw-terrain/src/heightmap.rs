//! Multi-octave fractal Brownian motion (fBm) heightmap sampler.
//!
//! Composites octaves of smoothed value noise into a single normalized value
//! per world column.

use noise::{NoiseFn, Value};

use crate::seed::noise_seed;

/// Per-octave seed stride, so every octave samples an independent lattice.
const OCTAVE_SEED_STRIDE: u32 = 1000;

/// Configuration for multi-octave fBm noise used in heightmap generation.
#[derive(Clone, Debug)]
pub struct HeightmapParams {
    /// World seed for deterministic generation.
    pub seed: u64,
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub persistence: f64,
    /// Frequency of the first (lowest) octave, in cycles per voxel.
    /// Default: 0.04 (one lattice cell every 25 voxels).
    pub base_frequency: f64,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            seed: 42,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 0.04,
        }
    }
}

/// Generates normalized terrain height values using fBm over value noise.
///
/// Each octave doubles in frequency and halves in amplitude; the sum is
/// divided by the total amplitude so the result stays in `[0, 1]`.
pub struct HeightmapSampler {
    octaves: Vec<Value>,
    params: HeightmapParams,
}

impl HeightmapSampler {
    /// Create a new sampler with the given parameters.
    pub fn new(params: HeightmapParams) -> Self {
        let octaves = (0..params.octaves)
            .map(|i| Value::new(noise_seed(params.seed, i.wrapping_mul(OCTAVE_SEED_STRIDE))))
            .collect();
        Self { octaves, params }
    }

    /// Sample the heightmap at a world column. Returns a value in `[0, 1]`.
    pub fn sample(&self, wx: f64, wz: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = 1.0;

        for noise in &self.octaves {
            let raw = noise.get([wx * frequency, wz * frequency]);
            total += to_unit(raw) * amplitude;

            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        let max = self.max_amplitude();
        if max <= 0.0 {
            return 0.0;
        }
        (total / max).clamp(0.0, 1.0)
    }

    /// Sum of all octave amplitudes (geometric series, first term 1).
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = 1.0;
        for _ in 0..self.params.octaves {
            sum += amp;
            amp *= self.params.persistence;
        }
        sum
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &HeightmapParams {
        &self.params
    }
}

/// Maps a raw noise value from `[-1, 1]` to `[0, 1]`.
fn to_unit(v: f64) -> f64 {
    ((v + 1.0) * 0.5).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_determinism_same_seed_same_coord() {
        let sampler_a = HeightmapSampler::new(HeightmapParams::default());
        let sampler_b = HeightmapSampler::new(HeightmapParams::default());

        let h1 = sampler_a.sample(100.0, 200.0);
        let h2 = sampler_b.sample(100.0, 200.0);
        assert_eq!(h1, h2, "Same seed + same coord must produce identical height");
    }

    #[test]
    fn test_different_seeds_produce_different_fields() {
        let sampler_a = HeightmapSampler::new(HeightmapParams {
            seed: 1,
            ..Default::default()
        });
        let sampler_b = HeightmapSampler::new(HeightmapParams {
            seed: 999,
            ..Default::default()
        });

        let differs = (0..64).any(|i| {
            let x = i as f64 * 7.3;
            (sampler_a.sample(x, x * 0.5) - sampler_b.sample(x, x * 0.5)).abs() > EPSILON
        });
        assert!(differs, "Different seeds should produce different heights");
    }

    #[test]
    fn test_height_within_unit_range() {
        let sampler = HeightmapSampler::new(HeightmapParams::default());
        for x in -50..50 {
            for z in -50..50 {
                let h = sampler.sample(x as f64 * 3.0, z as f64 * 3.0);
                assert!((0.0..=1.0).contains(&h), "Height {h} outside [0, 1] at ({x}, {z})");
            }
        }
    }

    #[test]
    fn test_neighboring_columns_change_smoothly() {
        let sampler = HeightmapSampler::new(HeightmapParams::default());
        for i in 0..2_000 {
            let x = i as f64 * 0.25;
            let delta = (sampler.sample(x + 0.25, 3.0) - sampler.sample(x, 3.0)).abs();
            assert!(delta < 0.25, "Discontinuity at x={x}: delta={delta}");
        }
    }

    #[test]
    fn test_max_amplitude_calculation() {
        let sampler = HeightmapSampler::new(HeightmapParams::default());
        assert!((sampler.max_amplitude() - 1.875).abs() < EPSILON);
    }

    #[test]
    fn test_zero_octaves_returns_zero() {
        let sampler = HeightmapSampler::new(HeightmapParams {
            octaves: 0,
            ..Default::default()
        });
        assert_eq!(sampler.sample(12.0, 34.0), 0.0);
    }
}
