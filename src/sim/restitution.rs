//! Randomized restitution
//!
//! Every individual collision samples its own coefficient, so two hits on
//! the same body in the same tick bounce differently.

use rand::Rng;

/// Base restitution with uniform jitter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Restitution {
    pub base: f32,
    pub jitter: f32,
}

impl Restitution {
    pub fn new(base: f32, jitter: f32) -> Self {
        Self { base, jitter }
    }

    /// Fixed coefficient with no jitter
    pub fn fixed(base: f32) -> Self {
        Self { base, jitter: 0.0 }
    }

    /// `clamp(base + uniform(-jitter, jitter), 0, 1)`
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        (self.base + symmetric(rng, self.jitter)).clamp(0.0, 1.0)
    }
}

/// Uniform sample in [-amplitude, amplitude]; exactly 0 when the amplitude is 0
#[inline]
pub fn symmetric<R: Rng>(rng: &mut R, amplitude: f32) -> f32 {
    if amplitude > 0.0 {
        rng.random_range(-amplitude..=amplitude)
    } else {
        0.0
    }
}
