//! # Fractal Perlin Noise
//!
//! Classic 2D gradient noise summed over several octaves.
//!
//! ## Determinism Guarantee
//!
//! Randomness only enters through the per-octave offsets, which are drawn
//! when the generator is built or reconfigured. Sampling never touches the
//! random stream, so for a fixed configuration and offsets
//! [`NoiseGenerator::sample2d`] is a pure function of its inputs.
//!
//! ## Gradients
//!
//! Only four diagonal gradients are used, selected by the low two bits of
//! the corner hash. A single octave therefore stays within `[-1, 1]`.

use std::fmt;

use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{validate_fractal, NoiseConfig, OffsetRange};
use crate::error::{NoiseError, NoiseResult};
use crate::permutation::{PermutationTable, LATTICE_MASK};

/// Largest magnitude a single octave can reach.
pub const SINGLE_OCTAVE_BOUND: f32 = 1.0;

/// Seed for the octave-offset random stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoiseSeed(u64);

impl NoiseSeed {
    /// Creates a new seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Default for NoiseSeed {
    fn default() -> Self {
        Self(0x5EED_CAFE_BABE)
    }
}

/// A 2D point or offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Vec2 {
    /// Creates a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// Multi-octave 2D Perlin noise generator.
///
/// # Example
///
/// ```rust
/// use fractal_noise::{NoiseConfig, NoiseGenerator, NoiseSeed};
///
/// let mut noise = NoiseGenerator::new(NoiseConfig::default().with_seed(NoiseSeed::new(42)))?;
///
/// let height = noise.sample2d(12.5, 80.25);
/// assert!(height.abs() <= noise.amplitude_bound());
///
/// // Switch to a rougher field; offsets are redrawn for the new octave count.
/// noise.configure(6, 0.6, 2.0, 25.0)?;
/// assert_eq!(noise.offsets().len(), 6);
/// # Ok::<(), fractal_noise::NoiseError>(())
/// ```
#[derive(Clone)]
pub struct NoiseGenerator {
    /// Active parameters.
    config: NoiseConfig,
    /// The permutation table.
    perm_table: PermutationTable,
    /// One offset per octave.
    offsets: Vec<Vec2>,
    /// Source of offsets; advanced only by (re)configuration.
    rng: ChaCha8Rng,
}

impl NoiseGenerator {
    /// Creates a generator and draws its octave offsets from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns any error from [`NoiseConfig::validate`].
    pub fn new(config: NoiseConfig) -> NoiseResult<Self> {
        config.validate().map_err(report)?;

        tracing::debug!(
            "Noise generator created: {} octaves, persistence {}, lacunarity {}, scale {}, seed {:#x}",
            config.num_octaves,
            config.persistence,
            config.lacunarity,
            config.noise_scale,
            config.seed.value()
        );

        Ok(Self::seeded(config))
    }

    /// Creates a generator with caller-supplied octave offsets.
    ///
    /// The random stream is still seeded from `config.seed` and is used by
    /// later calls to [`configure`](Self::configure).
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::OffsetCountMismatch`] if `offsets.len()` differs
    /// from `config.num_octaves`, or any error from [`NoiseConfig::validate`].
    pub fn with_offsets(config: NoiseConfig, offsets: Vec<Vec2>) -> NoiseResult<Self> {
        config.validate().map_err(report)?;
        if offsets.len() != config.num_octaves {
            return Err(report(NoiseError::OffsetCountMismatch {
                expected: config.num_octaves,
                actual: offsets.len(),
            }));
        }

        Ok(Self {
            config,
            perm_table: PermutationTable::reference(),
            offsets,
            rng: ChaCha8Rng::seed_from_u64(config.seed.value()),
        })
    }

    /// Replaces the fractal parameters and redraws every octave offset.
    ///
    /// The random stream continues from where it was; it is not reseeded.
    /// On error the generator is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`NoiseError::InvalidOctaves`] if `num_octaves` is 0 or above [`MAX_OCTAVES`](crate::config::MAX_OCTAVES)
    /// - [`NoiseError::InvalidScale`] if `noise_scale` is not finite and positive
    /// - [`NoiseError::NonFiniteParameter`] if persistence or lacunarity is NaN/Inf
    pub fn configure(
        &mut self,
        num_octaves: usize,
        persistence: f32,
        lacunarity: f32,
        noise_scale: f32,
    ) -> NoiseResult<()> {
        validate_fractal(num_octaves, persistence, lacunarity, noise_scale).map_err(report)?;

        self.config.num_octaves = num_octaves;
        self.config.persistence = persistence;
        self.config.lacunarity = lacunarity;
        self.config.noise_scale = noise_scale;
        self.regenerate_offsets();
        Ok(())
    }

    /// Like [`configure`](Self::configure), but takes a whole configuration,
    /// including a new offset range.
    ///
    /// `config.seed` is ignored; use [`reseed`](Self::reseed) to restart the
    /// random stream.
    ///
    /// # Errors
    ///
    /// Returns any error from [`NoiseConfig::validate`].
    pub fn apply(&mut self, config: NoiseConfig) -> NoiseResult<()> {
        config.validate().map_err(report)?;

        self.config = NoiseConfig {
            seed: self.config.seed,
            ..config
        };
        self.regenerate_offsets();
        Ok(())
    }

    /// Restarts the random stream from `seed` and redraws the offsets.
    pub fn reseed(&mut self, seed: NoiseSeed) {
        self.rng = ChaCha8Rng::seed_from_u64(seed.value());
        self.config.seed = seed;
        self.regenerate_offsets();
    }

    /// Samples 1D noise. Identical to `sample2d(x, 0.0)`.
    #[inline]
    #[must_use]
    pub fn sample1d(&self, x: f32) -> f32 {
        self.sample2d(x, 0.0)
    }

    /// Samples fractal 2D noise.
    ///
    /// # Returns
    ///
    /// A value within `±`[`amplitude_bound`](Self::amplitude_bound).
    #[must_use]
    pub fn sample2d(&self, x: f32, y: f32) -> f32 {
        let scaled_x = x / self.config.noise_scale;
        let scaled_y = y / self.config.noise_scale;

        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut total = 0.0;

        for offset in &self.offsets {
            let sample_x = frequency * scaled_x + offset.x;
            let sample_y = frequency * scaled_y + offset.y;
            total += amplitude * self.perlin(sample_x, sample_y);
            amplitude *= self.config.persistence;
            frequency *= self.config.lacunarity;
        }

        total
    }

    /// Samples fractal 2D noise at a point.
    #[inline]
    #[must_use]
    pub fn sample_vec2(&self, point: Vec2) -> f32 {
        self.sample2d(point.x, point.y)
    }

    /// Returns the active configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Returns the current octave offsets, one per octave.
    #[inline]
    #[must_use]
    pub fn offsets(&self) -> &[Vec2] {
        &self.offsets
    }

    /// Returns the configured octave count.
    #[inline]
    #[must_use]
    pub fn num_octaves(&self) -> usize {
        self.config.num_octaves
    }

    /// Largest magnitude [`sample2d`](Self::sample2d) can return.
    ///
    /// This is the geometric sum of the octave amplitudes times
    /// [`SINGLE_OCTAVE_BOUND`]; callers can divide by it to normalise.
    #[must_use]
    pub fn amplitude_bound(&self) -> f32 {
        let persistence = self.config.persistence.abs();
        let mut amplitude = 1.0;
        let mut bound = 0.0;
        for _ in 0..self.config.num_octaves {
            bound += amplitude;
            amplitude *= persistence;
        }
        bound * SINGLE_OCTAVE_BOUND
    }

    /// Seeds the stream and draws offsets. `config` must already be valid.
    fn seeded(config: NoiseConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed.value());
        let offsets = draw_offsets(&mut rng, config.num_octaves, config.offset_range);
        Self {
            config,
            perm_table: PermutationTable::reference(),
            offsets,
            rng,
        }
    }

    fn regenerate_offsets(&mut self) {
        self.offsets = draw_offsets(
            &mut self.rng,
            self.config.num_octaves,
            self.config.offset_range,
        );

        if self.config.persistence.abs() >= 1.0 {
            tracing::warn!(
                "Noise persistence {} does not decay; higher octaves dominate",
                self.config.persistence
            );
        }
        if self.config.lacunarity <= 0.0 {
            tracing::warn!(
                "Noise lacunarity {} is not positive; octaves will not gain detail",
                self.config.lacunarity
            );
        }
        tracing::debug!(
            "Noise generator reconfigured: {} octaves, persistence {}, lacunarity {}, scale {}",
            self.config.num_octaves,
            self.config.persistence,
            self.config.lacunarity,
            self.config.noise_scale
        );
    }

    /// Single-octave Perlin noise.
    #[inline]
    fn perlin(&self, x: f32, y: f32) -> f32 {
        let floor_x = x.floor();
        let floor_y = y.floor();

        // Unit square in the grid, wrapped by 256
        let xi = lattice_index(floor_x);
        let yi = lattice_index(floor_y);

        // Position inside the unit square
        let xf = x - floor_x;
        let yf = y - floor_y;

        let u = fade(xf);
        let v = fade(yf);

        let perm = &self.perm_table;
        let hash_00 = perm.get(perm.get(xi) + yi);
        let hash_01 = perm.get(perm.get(xi) + yi + 1);
        let hash_10 = perm.get(perm.get(xi + 1) + yi);
        let hash_11 = perm.get(perm.get(xi + 1) + yi + 1);

        let d_00 = grad(hash_00, xf, yf);
        let d_01 = grad(hash_01, xf, yf - 1.0);
        let d_10 = grad(hash_10, xf - 1.0, yf);
        let d_11 = grad(hash_11, xf - 1.0, yf - 1.0);

        lerp(lerp(d_00, d_10, u), lerp(d_01, d_11, u), v)
    }
}

impl Default for NoiseGenerator {
    fn default() -> Self {
        Self::seeded(NoiseConfig::default())
    }
}

impl fmt::Debug for NoiseGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseGenerator")
            .field("config", &self.config)
            .field("offsets", &self.offsets)
            .finish_non_exhaustive()
    }
}

/// Sends a rejected configuration to the diagnostics sink and hands it back.
fn report(err: NoiseError) -> NoiseError {
    tracing::error!("Rejected noise configuration: {}", err);
    err
}

/// Draws `count` offsets uniformly from `range`. The range must be valid.
fn draw_offsets(rng: &mut ChaCha8Rng, count: usize, range: OffsetRange) -> Vec<Vec2> {
    let dist = Uniform::new(range.min, range.max);
    (0..count)
        .map(|_| {
            let x = dist.sample(rng);
            let y = dist.sample(rng);
            Vec2::new(x, y)
        })
        .collect()
}

/// Wraps a floored coordinate into `0..256`.
///
/// Masking the two's-complement integer is Euclidean modulo 256, so
/// negative cells wrap the same way positive ones do.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lattice_index(floored: f32) -> usize {
    ((floored as i64) & LATTICE_MASK) as usize
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// Dot product with one of four diagonal gradients.
///
/// Only the low two bits of the hash nibble matter: `00 → x+y`,
/// `01 → -x+y`, `10 → x-y`, `11 → -x-y`.
#[inline]
fn grad(hash: usize, x: f32, y: f32) -> f32 {
    match hash & 0b11 {
        0b00 => x + y,
        0b01 => -x + y,
        0b10 => x - y,
        _ => -x - y,
    }
}
