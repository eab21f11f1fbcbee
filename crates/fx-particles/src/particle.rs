//! Individual particle representation

use crate::color::Color;
use crate::emitter::EmitterId;
use crate::math::EPSILON;
use glam::Vec3;

/// Kinematic and visual state of a particle
///
/// Held twice per particle: once as the spawn snapshot and once as the
/// state mutated every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleState {
    /// World-space position
    pub position: Vec3,
    /// Velocity vector (not normalized)
    pub direction: Vec3,
    /// Render-space width, height and depth
    pub dimensions: Vec3,
    /// Facing vector used by rendering
    pub orientation: Vec3,
    pub color: Color,
    pub mass: f32,
    /// Seconds of life remaining; dead at or below zero
    pub time_to_live: f32,
}

impl Default for ParticleState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::ZERO,
            dimensions: Vec3::ONE,
            orientation: Vec3::Z,
            color: Color::WHITE,
            mass: 1.0,
            time_to_live: 0.0,
        }
    }
}

/// A single particle in a technique's pool
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// State at spawn, never modified afterwards
    pub initial: ParticleState,
    /// State after the most recent tick
    pub current: ParticleState,
    /// Emitter that spawned this particle
    pub emitted_by: EmitterId,
}

impl Particle {
    /// Create a particle whose current state starts as a copy of `initial`
    pub fn new(initial: ParticleState, emitted_by: EmitterId) -> Self {
        Self {
            initial,
            current: initial,
            emitted_by,
        }
    }

    /// Check if the particle is still alive
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current.time_to_live > 0.0
    }

    /// Fraction of the lifetime already used (0.0 to 1.0)
    #[inline]
    pub fn lifetime_fraction(&self) -> f32 {
        if self.initial.time_to_live > EPSILON {
            (1.0 - self.current.time_to_live / self.initial.time_to_live).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Mark the particle for removal at the end of the tick
    #[inline]
    pub fn kill(&mut self) {
        self.current.time_to_live = 0.0;
    }

    /// Advance the particle by `dt`: age it and move it along its direction
    #[inline]
    pub(crate) fn integrate(&mut self, dt: f32) {
        self.current.time_to_live -= dt;
        self.current.position += self.current.direction * dt;
    }
}
