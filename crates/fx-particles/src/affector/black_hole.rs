//! Accelerating sink that swallows particles

use crate::error::{FxError, Result};
use crate::math::EPSILON;
use crate::particle::Particle;
use glam::Vec3;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Pulls particles in by a fixed step that grows every tick
///
/// The step is a distance per tick, not per second. A particle that is
/// already closer than the step is killed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct BlackHole {
    /// Starting step length
    pub velocity: f32,
    /// Added to the step at the start of every tick
    pub acceleration: f32,
    #[cfg_attr(feature = "serde-support", serde(skip))]
    current_velocity: f32,
}

impl Default for BlackHole {
    fn default() -> Self {
        Self::new(0.0, 0.01)
    }
}

impl BlackHole {
    pub fn new(velocity: f32, acceleration: f32) -> Self {
        Self {
            velocity,
            acceleration,
            current_velocity: velocity,
        }
    }

    /// Step length used on the most recent tick
    pub fn current_velocity(&self) -> f32 {
        self.current_velocity
    }

    pub(crate) fn reset(&mut self) {
        self.current_velocity = self.velocity;
    }

    pub(crate) fn begin_tick(&mut self) {
        self.current_velocity += self.acceleration;
    }

    pub(crate) fn apply(&self, particle: &mut Particle, center: Vec3) {
        let offset = center - particle.current.position;
        let distance = offset.length();
        if distance < self.current_velocity {
            particle.kill();
            return;
        }
        if distance < EPSILON || self.current_velocity <= 0.0 {
            return;
        }
        particle.current.position += offset / distance * self.current_velocity;
    }

    pub(crate) fn validate(&self, affector: &str) -> Result<()> {
        if !(self.velocity.is_finite() && self.acceleration.is_finite()) {
            return Err(FxError::parameter(
                format!("{affector}.velocity"),
                "velocity and acceleration must be finite",
            ));
        }
        Ok(())
    }
}
