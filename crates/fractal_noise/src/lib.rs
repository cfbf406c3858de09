//! # Fractal Noise
//!
//! Deterministic multi-octave Perlin noise for terrain and texture synthesis.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same seed and configuration, same field
//! 2. **Owned state**: no hidden globals; [`SharedNoise`] when one is wanted
//! 3. **Typed failures**: bad parameters are a [`NoiseError`], never a NaN
//!
//! ## Core Components
//!
//! - `NoiseGenerator`: permutation table, octave offsets, fractal sampling
//! - `NoiseConfig`: octave count, persistence, lacunarity, scale, seed
//! - `SharedNoise`: lockable init/release facade
//!
//! ## Example
//!
//! ```rust
//! use fractal_noise::{NoiseConfig, NoiseGenerator, NoiseSeed};
//!
//! let config = NoiseConfig::default().with_seed(NoiseSeed::new(12345));
//! let noise = NoiseGenerator::new(config)?;
//!
//! let mut heights = vec![0.0f32; 64 * 64];
//! for (i, height) in heights.iter_mut().enumerate() {
//!     let (x, y) = ((i % 64) as f32, (i / 64) as f32);
//!     *height = noise.sample2d(x, y);
//! }
//! assert!(heights.iter().all(|h| h.abs() <= noise.amplitude_bound()));
//! # Ok::<(), fractal_noise::NoiseError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod noise;
pub mod permutation;
pub mod shared;

pub use config::{NoiseConfig, OffsetRange, MAX_OCTAVES};
pub use error::{NoiseError, NoiseResult};
pub use noise::{NoiseGenerator, NoiseSeed, Vec2, SINGLE_OCTAVE_BOUND};
pub use permutation::PermutationTable;
pub use shared::SharedNoise;
