//! # Heightmap Grid Tests
//!
//! End-to-end: build a generator the way a terrain tool would and sample a
//! full grid.

use fractal_noise::{NoiseConfig, NoiseGenerator, NoiseSeed, SharedNoise};

const GRID: usize = 128;

fn sample_grid(noise: &NoiseGenerator) -> Vec<f32> {
    let mut heights = Vec::with_capacity(GRID * GRID);
    for y in 0..GRID {
        for x in 0..GRID {
            heights.push(noise.sample2d(x as f32, y as f32));
        }
    }
    heights
}

/// Test: Default configuration over a 128x128 grid stays finite and bounded.
#[test]
fn test_default_grid_bounded_and_finite() {
    let config = NoiseConfig::default().with_seed(NoiseSeed::new(42));
    let noise = NoiseGenerator::new(config).expect("valid config");
    let heights = sample_grid(&noise);

    assert_eq!(heights.len(), GRID * GRID);
    let bound = noise.amplitude_bound();
    for (i, &h) in heights.iter().enumerate() {
        assert!(h.is_finite(), "non-finite height at index {i}");
        assert!((-2.0..=2.0).contains(&h), "height {h} outside [-2, 2] at index {i}");
        assert!(h.abs() <= bound + 1e-5, "height {h} exceeds bound {bound}");
    }

    let min = heights.iter().copied().fold(f32::INFINITY, f32::min);
    let max = heights.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    println!("Height range: [{min:.3}, {max:.3}]");
    assert!(max - min > 0.5, "grid is nearly flat: [{min}, {max}]");
}

/// Test: Neighbouring pixels are close; the field is smooth at pixel scale.
#[test]
fn test_grid_is_smooth() {
    let noise = NoiseGenerator::new(NoiseConfig::default().with_seed(NoiseSeed::new(7)))
        .expect("valid config");
    let heights = sample_grid(&noise);

    let mut max_step = 0.0_f32;
    for y in 0..GRID {
        for x in 1..GRID {
            let step = (heights[y * GRID + x] - heights[y * GRID + x - 1]).abs();
            max_step = max_step.max(step);
        }
    }
    println!("Largest neighbour step: {max_step:.4}");
    assert!(max_step < 1.5, "neighbour step {max_step} too large");
}

/// Test: The same seed reproduces the grid exactly.
#[test]
fn test_grid_reproducible() {
    let config = NoiseConfig::default().with_seed(NoiseSeed::new(99));
    let first = sample_grid(&NoiseGenerator::new(config).expect("valid config"));
    let second = sample_grid(&NoiseGenerator::new(config).expect("valid config"));
    assert_eq!(first, second);
}

/// Test: A TOML file drives the same generator as the equivalent code config.
#[test]
fn test_grid_from_toml_file() {
    let path = std::env::temp_dir().join(format!(
        "fractal_noise_grid_test_{}.toml",
        std::process::id()
    ));
    std::fs::write(
        &path,
        "num_octaves = 5\npersistence = 0.45\nnoise_scale = 32.0\nseed = 314\n",
    )
    .expect("temp dir writable");

    let loaded = NoiseConfig::from_toml_file(&path);
    std::fs::remove_file(&path).expect("temp file removable");
    let loaded = loaded.expect("valid config file");

    let expected = NoiseConfig::default()
        .with_octaves(5)
        .with_persistence(0.45)
        .with_scale(32.0)
        .with_seed(NoiseSeed::new(314));
    assert_eq!(loaded, expected);

    let from_file = sample_grid(&NoiseGenerator::new(loaded).expect("valid config"));
    let from_code = sample_grid(&NoiseGenerator::new(expected).expect("valid config"));
    assert_eq!(from_file, from_code);
}

/// Test: The shared handle samples the same grid as an owned generator.
#[test]
fn test_shared_grid_matches_owned() {
    let config = NoiseConfig::default().with_seed(NoiseSeed::new(42));
    let shared = SharedNoise::new();
    shared.init(config).expect("valid config");

    let owned = sample_grid(&NoiseGenerator::new(config).expect("valid config"));
    let via_shared = shared.with_generator(sample_grid).expect("initialized");
    assert_eq!(owned, via_shared);
}
