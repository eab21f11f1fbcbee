//! Vector helpers shared by emitters and affectors

use crate::rng::ParticleRng;
use glam::{Quat, Vec3};
use std::f32::consts::TAU;

/// Distances and lengths below this are treated as zero
pub const EPSILON: f32 = 1.0e-4;

/// Normalize `v`, or return `fallback` when it is too short to normalize
#[inline]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let len = v.length();
    if len < EPSILON { fallback } else { v / len }
}

/// Random unit vector inside a cone around `axis`
///
/// `half_angle` is in radians. `cos(theta)` is sampled uniformly over the
/// cap so directions are evenly spread rather than bunched at the axis.
pub fn cone_direction(axis: Vec3, half_angle: f32, rng: &mut ParticleRng) -> Vec3 {
    let axis = normalize_or(axis, Vec3::Y);
    let half_angle = half_angle.abs().min(std::f32::consts::PI);
    if half_angle < EPSILON {
        return axis;
    }

    let cos_theta = rng.range(half_angle.cos(), 1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = rng.next_f32() * TAU;
    let (u, v) = axis.any_orthonormal_pair();

    axis * cos_theta + (u * phi.cos() + v * phi.sin()) * sin_theta
}

/// Rotation of `angle` radians about `axis`, or `None` for a degenerate axis
pub fn axis_rotation(axis: Vec3, angle: f32) -> Option<Quat> {
    let len = axis.length();
    if len < EPSILON || !angle.is_finite() {
        return None;
    }
    Some(Quat::from_axis_angle(axis / len, angle))
}
