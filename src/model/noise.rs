//! Injectable noise sources for the prediction perturbation.

use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;

/// Standard deviation of the relative prediction noise.
pub const DEFAULT_NOISE_STD: f64 = 0.1;

/// Source of the relative perturbation `n` applied as `raw * (1 + n)`.
///
/// The engine draws exactly one sample per prediction.
pub trait NoiseSource {
    /// Draws the next relative noise sample.
    fn sample(&mut self) -> f64;
}

/// Zero-mean Gaussian noise with a fixed standard deviation.
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    /// Standard deviation of the relative noise (0.1 = ±10% at one sigma).
    pub std_dev: f64,

    rng: StdRng,
}

impl GaussianNoise {
    /// Creates a seeded noise source for reproducible runs.
    ///
    /// Negative deviations are clamped to zero.
    pub fn new(std_dev: f64, seed: u64) -> Self {
        Self::with_rng(std_dev, StdRng::seed_from_u64(seed))
    }

    /// Creates a noise source seeded from OS entropy.
    pub fn from_os_rng(std_dev: f64) -> Self {
        Self::with_rng(std_dev, StdRng::from_os_rng())
    }

    /// Creates a noise source around an existing generator.
    pub fn with_rng(std_dev: f64, rng: StdRng) -> Self {
        Self {
            std_dev: std_dev.max(0.0),
            rng,
        }
    }
}

impl NoiseSource for GaussianNoise {
    fn sample(&mut self) -> f64 {
        if self.std_dev <= 0.0 {
            return 0.0;
        }
        let z: f64 = self.rng.sample(StandardNormal);
        z * self.std_dev
    }
}

/// Noise source that always returns zero, making predictions deterministic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNoise;

impl NoiseSource for NoNoise {
    fn sample(&mut self) -> f64 {
        0.0
    }
}
