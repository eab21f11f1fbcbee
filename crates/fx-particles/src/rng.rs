//! Seeded random stream shared by a technique

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Random number generator owned by a technique
///
/// Every random draw in a simulation (random parameters, spawn shapes,
/// randomiser offsets) comes from this single stream, so two techniques
/// built from the same configuration and seed produce identical runs.
#[derive(Debug, Clone)]
pub struct ParticleRng {
    inner: StdRng,
}

impl ParticleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a random f32 in range [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// Generate a random f32 in range [min, max]
    ///
    /// Swapped bounds are tolerated; equal bounds return `min`.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// Generate a random f32 in range [-a, a]
    pub fn symmetric(&mut self, a: f32) -> f32 {
        if a == 0.0 {
            return 0.0;
        }
        (self.next_f32() * 2.0 - 1.0) * a
    }

    /// Independent symmetric offsets per axis
    pub fn symmetric_vec3(&mut self, extent: Vec3) -> Vec3 {
        Vec3::new(
            self.symmetric(extent.x),
            self.symmetric(extent.y),
            self.symmetric(extent.z),
        )
    }

    /// Uniformly distributed unit vector
    ///
    /// Samples `cos(theta)` uniformly so the poles are not over-represented.
    pub fn unit_vector(&mut self) -> Vec3 {
        let z = self.range(-1.0, 1.0);
        let phi = self.next_f32() * TAU;
        let r = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(r * phi.cos(), r * phi.sin(), z)
    }
}

impl Default for ParticleRng {
    fn default() -> Self {
        Self::new(0)
    }
}
