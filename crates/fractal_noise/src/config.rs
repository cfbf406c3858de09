//! # Noise Configuration
//!
//! Fractal parameters for [`NoiseGenerator`](crate::NoiseGenerator),
//! loadable from TOML:
//!
//! ```toml
//! num_octaves = 6
//! persistence = 0.45
//! lacunarity = 2.0
//! noise_scale = 32.0
//! seed = 1234
//!
//! [offset_range]
//! min = -5000.0
//! max = 5000.0
//! ```
//!
//! Omitted keys fall back to [`NoiseConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NoiseError, NoiseResult};
use crate::noise::NoiseSeed;

/// Default number of octaves.
pub const DEFAULT_NUM_OCTAVES: usize = 4;
/// Default amplitude decay per octave.
pub const DEFAULT_PERSISTENCE: f32 = 0.5;
/// Default frequency growth per octave.
pub const DEFAULT_LACUNARITY: f32 = 2.0;
/// Default divisor applied to input coordinates.
pub const DEFAULT_NOISE_SCALE: f32 = 10.0;
/// Largest accepted octave count. Past this, amplitudes and frequencies
/// fall outside what `f32` can represent for any useful persistence.
pub const MAX_OCTAVES: usize = 64;
/// Default lower bound for octave offsets.
pub const DEFAULT_OFFSET_MIN: f32 = -1e4;
/// Default upper bound for octave offsets.
pub const DEFAULT_OFFSET_MAX: f32 = 1e4;

/// Half-open range `[min, max)` octave offsets are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OffsetRange {
    /// Inclusive lower bound.
    pub min: f32,
    /// Exclusive upper bound.
    pub max: f32,
}

impl OffsetRange {
    /// Creates a new offset range.
    #[inline]
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Checks that both bounds and their span are finite and `min < max`.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidOffsetRange`] otherwise.
    pub fn validate(&self) -> NoiseResult<()> {
        if self.min < self.max && (self.max - self.min).is_finite() {
            Ok(())
        } else {
            Err(NoiseError::InvalidOffsetRange {
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl Default for OffsetRange {
    fn default() -> Self {
        Self::new(DEFAULT_OFFSET_MIN, DEFAULT_OFFSET_MAX)
    }
}

/// Configuration for a [`NoiseGenerator`](crate::NoiseGenerator).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseConfig {
    /// Number of octaves summed per sample.
    pub num_octaves: usize,
    /// Amplitude multiplier applied after each octave.
    pub persistence: f32,
    /// Frequency multiplier applied after each octave.
    pub lacunarity: f32,
    /// Input coordinates are divided by this before sampling.
    pub noise_scale: f32,
    /// Range octave offsets are drawn from.
    pub offset_range: OffsetRange,
    /// Seed of the offset random stream.
    pub seed: NoiseSeed,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            num_octaves: DEFAULT_NUM_OCTAVES,
            persistence: DEFAULT_PERSISTENCE,
            lacunarity: DEFAULT_LACUNARITY,
            noise_scale: DEFAULT_NOISE_SCALE,
            offset_range: OffsetRange::default(),
            seed: NoiseSeed::default(),
        }
    }
}

impl NoiseConfig {
    /// Sets the octave count.
    #[must_use]
    pub const fn with_octaves(mut self, num_octaves: usize) -> Self {
        self.num_octaves = num_octaves;
        self
    }

    /// Sets the persistence.
    #[must_use]
    pub const fn with_persistence(mut self, persistence: f32) -> Self {
        self.persistence = persistence;
        self
    }

    /// Sets the lacunarity.
    #[must_use]
    pub const fn with_lacunarity(mut self, lacunarity: f32) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    /// Sets the noise scale.
    #[must_use]
    pub const fn with_scale(mut self, noise_scale: f32) -> Self {
        self.noise_scale = noise_scale;
        self
    }

    /// Sets the offset range.
    #[must_use]
    pub const fn with_offset_range(mut self, offset_range: OffsetRange) -> Self {
        self.offset_range = offset_range;
        self
    }

    /// Sets the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: NoiseSeed) -> Self {
        self.seed = seed;
        self
    }

    /// Checks every parameter the sampler depends on.
    ///
    /// # Errors
    ///
    /// - [`NoiseError::InvalidOctaves`] if `num_octaves` is 0 or above [`MAX_OCTAVES`]
    /// - [`NoiseError::InvalidScale`] if `noise_scale` is not a finite positive number
    /// - [`NoiseError::NonFiniteParameter`] if persistence or lacunarity is NaN/Inf
    /// - [`NoiseError::InvalidOffsetRange`] if the offset range is empty or non-finite
    pub fn validate(&self) -> NoiseResult<()> {
        validate_fractal(
            self.num_octaves,
            self.persistence,
            self.lacunarity,
            self.noise_scale,
        )?;
        self.offset_range.validate()
    }

    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::ConfigParse`] on malformed TOML or unknown keys,
    /// or any error from [`NoiseConfig::validate`].
    pub fn from_toml_str(text: &str) -> NoiseResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::ConfigIo`] if the file cannot be read, otherwise
    /// the errors of [`NoiseConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> NoiseResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| NoiseError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Validates the four fractal parameters accepted by `configure`.
pub(crate) fn validate_fractal(
    num_octaves: usize,
    persistence: f32,
    lacunarity: f32,
    noise_scale: f32,
) -> NoiseResult<()> {
    if num_octaves == 0 || num_octaves > MAX_OCTAVES {
        return Err(NoiseError::InvalidOctaves(num_octaves));
    }
    if !(noise_scale.is_finite() && noise_scale > 0.0) {
        return Err(NoiseError::InvalidScale(noise_scale));
    }
    if !persistence.is_finite() {
        return Err(NoiseError::NonFiniteParameter {
            name: "persistence",
            value: persistence,
        });
    }
    if !lacunarity.is_finite() {
        return Err(NoiseError::NonFiniteParameter {
            name: "lacunarity",
            value: lacunarity,
        });
    }
    Ok(())
}
