//! Random jitter for particles and emitters

use crate::error::{FxError, Result};
use crate::rng::ParticleRng;
use glam::Vec3;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Perturbs positions or directions at a fixed interval
///
/// Particles and emitters keep separate timers. A `time_step` of zero fires
/// on every tick.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct Randomiser {
    /// Per-axis bound of the offset
    pub max_deviation: Vec3,
    pub time_step: f32,
    /// Jitter the direction instead of the position
    pub random_direction: bool,
    #[cfg_attr(feature = "serde-support", serde(skip))]
    particle_timer: f32,
    #[cfg_attr(feature = "serde-support", serde(skip))]
    emitter_timer: f32,
}

impl Default for Randomiser {
    fn default() -> Self {
        Self {
            max_deviation: Vec3::ONE,
            time_step: 0.0,
            random_direction: true,
            particle_timer: 0.0,
            emitter_timer: 0.0,
        }
    }
}

impl Randomiser {
    pub(crate) fn reset(&mut self) {
        self.particle_timer = 0.0;
        self.emitter_timer = 0.0;
    }

    pub(crate) fn particle_due(&mut self, dt: f32) -> bool {
        advance(&mut self.particle_timer, self.time_step, dt)
    }

    pub(crate) fn emitter_due(&mut self, dt: f32) -> bool {
        advance(&mut self.emitter_timer, self.time_step, dt)
    }

    pub(crate) fn perturb(&self, position: &mut Vec3, direction: &mut Vec3, rng: &mut ParticleRng) {
        let offset = rng.symmetric_vec3(self.max_deviation);
        if self.random_direction {
            *direction += offset;
        } else {
            *position += offset;
        }
    }

    pub(crate) fn validate(&self, affector: &str) -> Result<()> {
        if !self.max_deviation.is_finite() {
            return Err(FxError::parameter(format!("{affector}.max_deviation"), "must be finite"));
        }
        if !self.time_step.is_finite() || self.time_step < 0.0 {
            return Err(FxError::parameter(
                format!("{affector}.time_step"),
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

fn advance(timer: &mut f32, step: f32, dt: f32) -> bool {
    if step <= 0.0 {
        return true;
    }
    *timer += dt;
    if *timer < step {
        return false;
    }
    *timer %= step;
    true
}
