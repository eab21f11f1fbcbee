//! Cubic Hermite interpolation and Catmull-Rom paths

use glam::Vec3;
use std::ops::{Add, Mul, Sub};

/// Cubic Hermite basis evaluation
///
/// `m0` and `m1` are tangents already scaled to the segment length, and
/// `s` is the position inside the segment in [0, 1].
#[inline]
pub fn hermite<T>(p0: T, m0: T, p1: T, m1: T, s: f32) -> T
where
    T: Copy + Add<Output = T> + Mul<f32, Output = T>,
{
    let s2 = s * s;
    let s3 = s2 * s;
    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;
    p0 * h00 + m0 * h10 + p1 * h01 + m1 * h11
}

/// Uniform Catmull-Rom tangent at `current`
#[inline]
fn tangent<T>(previous: T, next: T) -> T
where
    T: Copy + Sub<Output = T> + Mul<f32, Output = T>,
{
    (next - previous) * 0.5
}

/// Catmull-Rom spline through a list of 3D control points
///
/// The curve passes through every point. The parameter range [0, 1] is
/// split evenly across the segments, and the end tangents reuse the end
/// points so the curve starts and stops exactly on the first and last point.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRom {
    points: Vec<Vec3>,
}

impl CatmullRom {
    /// Minimum number of control points for a usable path
    pub const MIN_POINTS: usize = 2;

    /// Build a spline, or `None` if there are too few points
    pub fn new(points: &[Vec3]) -> Option<Self> {
        if points.len() < Self::MIN_POINTS {
            return None;
        }
        Some(Self {
            points: points.to_vec(),
        })
    }

    /// Control points
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Number of segments between control points
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Sample the spline at `t`, clamped to [0, 1]
    pub fn sample(&self, t: f32) -> Vec3 {
        let segments = self.segment_count();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * segments as f32;
        let index = (scaled.floor() as usize).min(segments - 1);
        let s = scaled - index as f32;

        let last = self.points.len() - 1;
        let p0 = self.points[index];
        let p1 = self.points[index + 1];
        let before = self.points[index.saturating_sub(1)];
        let after = self.points[(index + 2).min(last)];

        hermite(p0, tangent(before, p1), p1, tangent(p0, after), s)
    }
}
