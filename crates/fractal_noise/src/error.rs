//! # Noise Error Types
//!
//! All errors that can occur while configuring or sampling noise.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the noise generator.
#[derive(Error, Debug)]
pub enum NoiseError {
    /// Octave count outside `1..=MAX_OCTAVES`.
    #[error("invalid octave count: {0} (must be between 1 and {})", crate::config::MAX_OCTAVES)]
    InvalidOctaves(usize),

    /// Input coordinates are divided by the scale.
    #[error("invalid noise scale: {0} (must be finite and greater than 0)")]
    InvalidScale(f32),

    /// Persistence or lacunarity is NaN or infinite.
    #[error("parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Offsets are drawn from the half-open range `[min, max)`.
    #[error("invalid offset range [{min}, {max})")]
    InvalidOffsetRange {
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },

    /// Injected offsets do not match the configured octave count.
    #[error("expected {expected} octave offsets, got {actual}")]
    OffsetCountMismatch {
        /// Configured number of octaves.
        expected: usize,
        /// Number of offsets supplied.
        actual: usize,
    },

    /// Shared generator used before `init` or after `release`.
    #[error("noise generator not initialized")]
    NotInitialized,

    /// Configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("cannot read configuration {}: {source}", .path.display())]
    ConfigIo {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for noise operations.
pub type NoiseResult<T> = Result<T, NoiseError>;
