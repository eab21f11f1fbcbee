//! Rotation around an axis through the affector position

use crate::math::axis_rotation;
use crate::parameter::Parameter;
use crate::rng::ParticleRng;
use glam::{Quat, Vec3};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Swirls particles and emitters around an axis
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct Vortex {
    pub rotation_axis: Vec3,
    /// Degrees per second, evaluated at system-elapsed time
    pub rotation_speed: Parameter,
}

impl Default for Vortex {
    fn default() -> Self {
        Self {
            rotation_axis: Vec3::Y,
            rotation_speed: Parameter::fixed(90.0),
        }
    }
}

impl Vortex {
    /// Rotation for this tick, or `None` for a degenerate axis
    pub(crate) fn rotation(&self, elapsed: f32, dt: f32, rng: &mut ParticleRng) -> Option<Quat> {
        let degrees = self.rotation_speed.value(elapsed, rng) * dt;
        axis_rotation(self.rotation_axis, degrees.to_radians())
    }

    /// Rotate a position about `center` and a direction about the origin
    pub(crate) fn rotate(rotation: Quat, center: Vec3, position: &mut Vec3, direction: &mut Vec3) {
        *position = center + rotation * (*position - center);
        *direction = rotation * *direction;
    }
}
