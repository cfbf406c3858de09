//! # Shared Noise Handle
//!
//! An init/release facade around [`NoiseGenerator`] for callers that want one
//! generator reachable from many places (e.g. a `static`).
//!
//! Sampling takes a read lock and may run on many threads at once.
//! `init`, `release` and `configure` take the write lock, so a
//! reconfiguration never overlaps a sample.

use parking_lot::{const_rwlock, RwLock};

use crate::config::NoiseConfig;
use crate::error::{NoiseError, NoiseResult};
use crate::noise::NoiseGenerator;

/// Lockable, optionally-initialized [`NoiseGenerator`].
///
/// ```rust
/// use fractal_noise::{NoiseConfig, SharedNoise};
///
/// static TERRAIN_NOISE: SharedNoise = SharedNoise::new();
///
/// TERRAIN_NOISE.init(NoiseConfig::default())?;
/// let height = TERRAIN_NOISE.sample2d(4.0, 9.5)?;
/// assert!(height.is_finite());
///
/// TERRAIN_NOISE.release();
/// assert!(TERRAIN_NOISE.sample1d(1.0).is_err());
/// # Ok::<(), fractal_noise::NoiseError>(())
/// ```
#[derive(Debug, Default)]
pub struct SharedNoise {
    generator: RwLock<Option<NoiseGenerator>>,
}

impl SharedNoise {
    /// Creates an uninitialized handle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generator: const_rwlock(None),
        }
    }

    /// Builds a fresh generator, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns any error from [`NoiseGenerator::new`]; the previous generator
    /// is kept in that case.
    pub fn init(&self, config: NoiseConfig) -> NoiseResult<()> {
        let generator = NoiseGenerator::new(config)?;
        let previous = self.generator.write().replace(generator);
        if previous.is_some() {
            tracing::debug!("Shared noise generator re-initialized");
        }
        Ok(())
    }

    /// Drops the generator. Later samples fail until [`init`](Self::init).
    pub fn release(&self) {
        if self.generator.write().take().is_some() {
            tracing::debug!("Shared noise generator released");
        }
    }

    /// Returns `true` between [`init`](Self::init) and [`release`](Self::release).
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.generator.read().is_some()
    }

    /// See [`NoiseGenerator::configure`].
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::NotInitialized`] if there is no generator, or any
    /// error from [`NoiseGenerator::configure`].
    pub fn configure(
        &self,
        num_octaves: usize,
        persistence: f32,
        lacunarity: f32,
        noise_scale: f32,
    ) -> NoiseResult<()> {
        self.generator
            .write()
            .as_mut()
            .ok_or_else(not_initialized)?
            .configure(num_octaves, persistence, lacunarity, noise_scale)
    }

    /// See [`NoiseGenerator::sample1d`].
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::NotInitialized`] if there is no generator.
    pub fn sample1d(&self, x: f32) -> NoiseResult<f32> {
        self.with_generator(|noise| noise.sample1d(x))
    }

    /// See [`NoiseGenerator::sample2d`].
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::NotInitialized`] if there is no generator.
    pub fn sample2d(&self, x: f32, y: f32) -> NoiseResult<f32> {
        self.with_generator(|noise| noise.sample2d(x, y))
    }

    /// Runs `f` against the generator under a read lock.
    ///
    /// Useful to sample a whole grid without re-locking per sample.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::NotInitialized`] if there is no generator.
    pub fn with_generator<T>(&self, f: impl FnOnce(&NoiseGenerator) -> T) -> NoiseResult<T> {
        let guard = self.generator.read();
        let noise = guard.as_ref().ok_or_else(not_initialized)?;
        Ok(f(noise))
    }
}

fn not_initialized() -> NoiseError {
    tracing::error!("Shared noise generator used before initialization");
    NoiseError::NotInitialized
}
