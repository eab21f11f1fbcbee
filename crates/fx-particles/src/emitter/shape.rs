//! Emitter spawn shapes

use crate::math::{EPSILON, cone_direction, normalize_or};
use crate::parameter::Parameter;
use crate::rng::ParticleRng;
use glam::Vec3;
use std::f32::consts::TAU;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Region a particle's spawn position is drawn from
///
/// All shapes are placed relative to the emitter position. Shapes with a
/// plane (circle) or a deviation (line) orient themselves by the emitter
/// direction.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-support",
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum EmitterShape {
    /// Every particle starts at the emitter position
    #[default]
    Point,
    /// Segment from the emitter position to `position + end`
    Line {
        /// Segment end, relative to the emitter
        end: Vec3,
        /// Maximum perpendicular offset from the segment
        #[cfg_attr(feature = "serde-support", serde(default))]
        deviation: f32,
        /// Smallest step along the segment between consecutive particles
        #[cfg_attr(feature = "serde-support", serde(default))]
        min_increment: f32,
        /// Largest step; 0 spawns at uniformly random points instead
        #[cfg_attr(feature = "serde-support", serde(default))]
        max_increment: f32,
    },
    /// Axis-aligned box centered on the emitter
    Box {
        /// Full extents along each axis
        dimensions: Vec3,
    },
    /// Circle in the plane perpendicular to the emitter direction
    Circle {
        radius: Parameter,
        /// Angle advanced per particle, in degrees
        #[cfg_attr(feature = "serde-support", serde(default))]
        step: f32,
        /// Pick a random angle for every particle instead of stepping
        #[cfg_attr(feature = "serde-support", serde(default))]
        random: bool,
    },
    /// Surface of a sphere; particles fly outward from the center
    SphereSurface { radius: Parameter },
}

impl EmitterShape {
    /// Shape name as used in configuration
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Line { .. } => "line",
            Self::Box { .. } => "box",
            Self::Circle { .. } => "circle",
            Self::SphereSurface { .. } => "sphere_surface",
        }
    }

    pub(crate) fn validate(&self, emitter: &str) -> crate::Result<()> {
        use crate::error::FxError;

        let field = |name: &str| format!("{emitter}.shape.{name}");
        match self {
            Self::Point => Ok(()),
            Self::Line {
                end,
                deviation,
                min_increment,
                max_increment,
            } => {
                if !end.is_finite() {
                    return Err(FxError::parameter(field("end"), "must be finite"));
                }
                if !(deviation.is_finite() && *deviation >= 0.0) {
                    return Err(FxError::parameter(
                        field("deviation"),
                        "must be finite and non-negative",
                    ));
                }
                if !(min_increment.is_finite() && max_increment.is_finite())
                    || *min_increment < 0.0
                    || min_increment > max_increment
                {
                    return Err(FxError::parameter(
                        field("min_increment"),
                        "increments must satisfy 0 <= min_increment <= max_increment",
                    ));
                }
                Ok(())
            }
            Self::Box { dimensions } => {
                if dimensions.is_finite() {
                    Ok(())
                } else {
                    Err(FxError::parameter(field("dimensions"), "must be finite"))
                }
            }
            Self::Circle { radius, step, .. } => {
                radius.validate(&field("radius"))?;
                if step.is_finite() {
                    Ok(())
                } else {
                    Err(FxError::parameter(field("step"), "must be finite"))
                }
            }
            Self::SphereSurface { radius } => radius.validate(&field("radius")),
        }
    }
}

/// Spawn frame handed from the emitter to its shape
#[derive(Debug, Clone, Copy)]
pub(crate) struct SpawnFrame {
    pub origin: Vec3,
    pub axis: Vec3,
    /// Cone half-angle in radians
    pub half_angle: f32,
    pub speed: f32,
    pub t: f32,
}

/// Per-emitter shape state carried between emissions
#[derive(Debug, Clone, Default)]
pub(crate) struct ShapeCursor {
    /// Current circle angle in radians
    circle_angle: f32,
    /// Distance travelled along a line shape
    line_offset: f32,
}

impl ShapeCursor {
    /// Initial position and direction of a newly spawned particle
    pub fn internal_create(
        &mut self,
        shape: &EmitterShape,
        frame: &SpawnFrame,
        rng: &mut ParticleRng,
    ) -> (Vec3, Vec3) {
        let axis = normalize_or(frame.axis, Vec3::Y);

        let position = match shape {
            EmitterShape::Point => frame.origin,
            EmitterShape::Line {
                end,
                deviation,
                min_increment,
                max_increment,
            } => self.line_position(
                frame.origin,
                *end,
                *deviation,
                (*min_increment, *max_increment),
                rng,
            ),
            EmitterShape::Box { dimensions } => frame.origin + rng.symmetric_vec3(*dimensions * 0.5),
            EmitterShape::Circle {
                radius,
                step,
                random,
            } => {
                let angle = if *random {
                    rng.next_f32() * TAU
                } else {
                    let angle = self.circle_angle;
                    self.circle_angle = (angle + step.to_radians()).rem_euclid(TAU);
                    angle
                };
                let radius = radius.value(frame.t, rng);
                let (u, v) = axis.any_orthonormal_pair();
                frame.origin + (u * angle.cos() + v * angle.sin()) * radius
            }
            EmitterShape::SphereSurface { radius } => {
                let normal = rng.unit_vector();
                let radius = radius.value(frame.t, rng);
                return (frame.origin + normal * radius, normal * frame.speed);
            }
        };

        let direction = cone_direction(axis, frame.half_angle, rng) * frame.speed;
        (position, direction)
    }

    fn line_position(
        &mut self,
        origin: Vec3,
        end: Vec3,
        deviation: f32,
        (min_increment, max_increment): (f32, f32),
        rng: &mut ParticleRng,
    ) -> Vec3 {
        let length = end.length();
        if length < EPSILON {
            return origin;
        }
        let along_dir = end / length;

        let along = if max_increment > 0.0 {
            let offset = self.line_offset;
            self.line_offset = (offset + rng.range(min_increment, max_increment)).rem_euclid(length);
            offset
        } else {
            rng.next_f32() * length
        };

        let mut position = origin + along_dir * along;
        if deviation > 0.0 {
            let (u, v) = along_dir.any_orthonormal_pair();
            let angle = rng.next_f32() * TAU;
            position += (u * angle.cos() + v * angle.sin()) * rng.range(0.0, deviation);
        }
        position
    }
}
