//! Moves particles along a Catmull-Rom path over their lifetime

use crate::error::{FxError, Result};
use crate::math::EPSILON;
use crate::particle::Particle;
use crate::spline::CatmullRom;
use glam::Vec3;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Offsets particles by the change in path position each tick
///
/// The spline is built lazily and rebuilt whenever `points` changes. With
/// fewer than [`CatmullRom::MIN_POINTS`] points the affector does nothing.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct PathFollower {
    pub points: Vec<Vec3>,
    #[cfg_attr(feature = "serde-support", serde(skip))]
    spline: Option<CatmullRom>,
    #[cfg_attr(feature = "serde-support", serde(skip))]
    warned: bool,
}

impl PathFollower {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self {
            points,
            spline: None,
            warned: false,
        }
    }

    /// Replace the control points
    pub fn set_points(&mut self, points: Vec<Vec3>) {
        self.points = points;
        self.spline = None;
        self.warned = false;
    }

    pub(crate) fn reset(&mut self) {
        self.spline = None;
        self.warned = false;
    }

    /// Spline for the current points, rebuilt if they changed
    pub(crate) fn prepare(&mut self, affector: &str) -> Option<&CatmullRom> {
        let stale = self
            .spline
            .as_ref()
            .is_none_or(|spline| spline.points() != self.points.as_slice());
        if stale {
            self.spline = CatmullRom::new(&self.points);
            if self.spline.is_some() {
                self.warned = false;
            } else if !self.warned {
                log::warn!(
                    "Path follower '{}' has {} point(s), needs at least {}; skipping",
                    affector,
                    self.points.len(),
                    CatmullRom::MIN_POINTS
                );
                self.warned = true;
            }
        }
        self.spline.as_ref()
    }

    pub(crate) fn apply(spline: &CatmullRom, particle: &mut Particle, dt: f32) {
        let lifetime = particle.initial.time_to_live;
        if lifetime <= EPSILON {
            return;
        }
        let now = particle.lifetime_fraction();
        let next = (now + dt / lifetime).min(1.0);
        particle.current.position += spline.sample(next) - spline.sample(now);
    }

    pub(crate) fn validate(&self, affector: &str) -> Result<()> {
        if self.points.iter().any(|p| !p.is_finite()) {
            return Err(FxError::InvalidPath(format!(
                "'{affector}' has a non-finite control point"
            )));
        }
        if (1..CatmullRom::MIN_POINTS).contains(&self.points.len()) {
            return Err(FxError::InvalidPath(format!(
                "'{affector}' has {} point(s), needs none or at least {}",
                self.points.len(),
                CatmullRom::MIN_POINTS
            )));
        }
        Ok(())
    }
}
