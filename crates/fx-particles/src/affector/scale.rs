//! Dimension scaling over time

use crate::error::Result;
use crate::parameter::Parameter;
use crate::particle::Particle;
use crate::rng::ParticleRng;
use glam::Vec3;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Scales particle dimensions relative to their spawn dimensions
///
/// `scale_xyz` wins over the per-axis parameters when set. A missing axis
/// parameter leaves that axis at its spawn size.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct Scale {
    pub scale_x: Option<Parameter>,
    pub scale_y: Option<Parameter>,
    pub scale_z: Option<Parameter>,
    pub scale_xyz: Option<Parameter>,
    /// Evaluate at system-elapsed time instead of the lifetime fraction
    pub since_system_start: bool,
}

impl Scale {
    /// Uniform scaling on all axes
    pub fn uniform(scale: Parameter) -> Self {
        Self {
            scale_xyz: Some(scale),
            ..Default::default()
        }
    }

    pub(crate) fn apply(
        &self,
        particle: &mut Particle,
        affector_scale: Vec3,
        elapsed: f32,
        rng: &mut ParticleRng,
    ) {
        let t = if self.since_system_start {
            elapsed
        } else {
            particle.lifetime_fraction()
        };

        let factor = match &self.scale_xyz {
            Some(xyz) => Vec3::splat(xyz.value(t, rng)),
            None => {
                let mut axis = |p: &Option<Parameter>| p.as_ref().map_or(1.0, |p| p.value(t, rng));
                Vec3::new(
                    axis(&self.scale_x),
                    axis(&self.scale_y),
                    axis(&self.scale_z),
                )
            }
        };

        particle.current.dimensions =
            (particle.initial.dimensions * factor * affector_scale).max(Vec3::ZERO);
    }

    pub(crate) fn validate(&self, affector: &str) -> Result<()> {
        let axes = [
            ("scale_x", &self.scale_x),
            ("scale_y", &self.scale_y),
            ("scale_z", &self.scale_z),
            ("scale_xyz", &self.scale_xyz),
        ];
        for (field, parameter) in axes {
            if let Some(parameter) = parameter {
                parameter.validate(&format!("{affector}.{field}"))?;
            }
        }
        Ok(())
    }
}
