//! Affectors that relate each particle to its neighbours in the pool
//!
//! Particles are visited in spawn order. Follower and align treat the pool
//! as a chain where each particle looks at the one spawned just before it.

use crate::emitter::EmitterId;
use crate::error::{FxError, Result};
use crate::math::EPSILON;
use crate::particle::Particle;
use glam::Vec3;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Keeps each particle within a distance band of its predecessor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct ParticleFollower {
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ParticleFollower {
    fn default() -> Self {
        Self {
            min_distance: 0.0,
            max_distance: 1.0,
        }
    }
}

impl ParticleFollower {
    pub(crate) fn apply<'p>(&self, particles: impl Iterator<Item = &'p mut Particle>) {
        let mut previous: Option<Vec3> = None;
        for particle in particles {
            if let Some(anchor) = previous {
                let offset = particle.current.position - anchor;
                let distance = offset.length();
                if distance > EPSILON {
                    let clamped = distance.clamp(self.min_distance, self.max_distance);
                    if clamped != distance {
                        particle.current.position = anchor + offset / distance * clamped;
                    }
                }
            }
            previous = Some(particle.current.position);
        }
    }

    pub(crate) fn validate(&self, affector: &str) -> Result<()> {
        let valid = self.min_distance.is_finite()
            && self.max_distance.is_finite()
            && self.min_distance >= 0.0
            && self.min_distance <= self.max_distance;
        if !valid {
            return Err(FxError::parameter(
                format!("{affector}.min_distance"),
                "distances must be finite with 0 <= min_distance <= max_distance",
            ));
        }
        Ok(())
    }
}

/// Orients each particle toward its predecessor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct Align {
    /// Stretch the particle height to the gap it spans
    pub resize: bool,
}

impl Align {
    pub(crate) fn apply<'p>(&self, particles: impl Iterator<Item = &'p mut Particle>) {
        let mut previous: Option<Vec3> = None;
        for particle in particles {
            if let Some(anchor) = previous {
                let offset = particle.current.position - anchor;
                let distance = offset.length();
                if distance > EPSILON {
                    particle.current.orientation = offset / distance;
                    if self.resize {
                        particle.current.dimensions.y = distance;
                    }
                }
            }
            previous = Some(particle.current.position);
        }
    }
}

/// Steers particles toward the centroid of the group
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct FlockCentering {
    pub strength: f32,
}

impl Default for FlockCentering {
    fn default() -> Self {
        Self { strength: 1.0 }
    }
}

impl FlockCentering {
    pub(crate) fn apply(&self, particles: &mut [Particle], excluded: &[EmitterId], dt: f32) {
        let included = |p: &Particle| !excluded.contains(&p.emitted_by);

        let (sum, count) = particles
            .iter()
            .filter(|p| included(p))
            .fold((Vec3::ZERO, 0u32), |(sum, n), p| (sum + p.current.position, n + 1));
        if count == 0 {
            return;
        }
        let centroid = sum / count as f32;

        for particle in particles.iter_mut().filter(|p| included(p)) {
            particle.current.direction +=
                (centroid - particle.current.position) * self.strength * dt;
        }
    }
}
