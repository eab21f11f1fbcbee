//! Direction-changing forces: jet, linear force, gravity and sine force

use crate::error::{FxError, Result};
use crate::math::{EPSILON, normalize_or};
use crate::parameter::Parameter;
use crate::particle::Particle;
use crate::rng::ParticleRng;
use glam::Vec3;
use std::f32::consts::TAU;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Accelerates particles along their spawn direction
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct Jet {
    /// Acceleration, evaluated at the lifetime fraction
    pub acceleration: Parameter,
}

impl Default for Jet {
    fn default() -> Self {
        Self {
            acceleration: Parameter::fixed(1.0),
        }
    }
}

impl Jet {
    pub(crate) fn apply(&self, particle: &mut Particle, dt: f32, rng: &mut ParticleRng) {
        let axis = normalize_or(particle.initial.direction, Vec3::ZERO);
        if axis == Vec3::ZERO {
            return;
        }
        let acceleration = self.acceleration.value(particle.lifetime_fraction(), rng);
        particle.current.direction += axis * acceleration * dt;
    }
}

/// Constant-direction force
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct LinearForce {
    /// Force magnitude, evaluated at the lifetime fraction
    pub force: Parameter,
    /// Direction of the force; normalized when applied
    pub force_vector: Vec3,
}

impl Default for LinearForce {
    fn default() -> Self {
        Self {
            force: Parameter::fixed(1.0),
            force_vector: Vec3::NEG_Y,
        }
    }
}

impl LinearForce {
    pub(crate) fn apply(&self, particle: &mut Particle, dt: f32, rng: &mut ParticleRng) {
        let axis = normalize_or(self.force_vector, Vec3::ZERO);
        if axis == Vec3::ZERO {
            return;
        }
        let force = self.force.value(particle.lifetime_fraction(), rng);
        particle.current.direction += axis * force * dt;
    }
}

/// Point attractor with inverse-distance falloff
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct Gravity {
    /// Attraction strength, evaluated at system-elapsed time
    pub gravity: Parameter,
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            gravity: Parameter::fixed(1.0),
        }
    }
}

impl Gravity {
    /// Pull `particle` toward `center`
    ///
    /// The pull is `strength * mass * particle.mass / distance`, so it grows
    /// as the particle closes in. Nothing happens at the center itself.
    pub(crate) fn apply(particle: &mut Particle, center: Vec3, mass: f32, strength: f32, dt: f32) {
        let offset = center - particle.current.position;
        let distance = offset.length();
        if distance < EPSILON {
            return;
        }
        let pull = strength * mass * particle.current.mass / distance;
        particle.current.direction += offset / distance * pull * dt;
    }
}

/// How a sine force combines with the particle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum SineMode {
    #[default]
    Add,
    Average,
}

/// Oscillating force whose frequency wanders within a range
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct SineForce {
    pub force_vector: Vec3,
    pub mode: SineMode,
    /// Angular frequency bounds in radians per second
    pub min_frequency: f32,
    pub max_frequency: f32,
    #[cfg_attr(feature = "serde-support", serde(skip))]
    angle: f32,
    #[cfg_attr(feature = "serde-support", serde(skip))]
    frequency: f32,
    #[cfg_attr(feature = "serde-support", serde(skip))]
    force: Vec3,
}

impl Default for SineForce {
    fn default() -> Self {
        Self::new(Vec3::Y, SineMode::Add, 1.0, 1.0)
    }
}

impl SineForce {
    pub fn new(force_vector: Vec3, mode: SineMode, min_frequency: f32, max_frequency: f32) -> Self {
        let mut force = Self {
            force_vector,
            mode,
            min_frequency,
            max_frequency,
            angle: 0.0,
            frequency: 0.0,
            force: Vec3::ZERO,
        };
        force.reset();
        force
    }

    /// Current phase angle in radians
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Current angular frequency
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub(crate) fn reset(&mut self) {
        self.angle = 0.0;
        self.frequency = (self.min_frequency + self.max_frequency) * 0.5;
        self.force = Vec3::ZERO;
    }

    /// Advance the phase once per tick
    ///
    /// Each wrap past a full turn draws a new frequency.
    pub(crate) fn begin_tick(&mut self, dt: f32, rng: &mut ParticleRng) {
        self.angle += self.frequency * dt;
        if self.angle > TAU {
            self.angle = self.angle.rem_euclid(TAU);
            self.frequency = rng.range(self.min_frequency, self.max_frequency);
        }
        self.force = self.force_vector * self.angle.sin();
    }

    pub(crate) fn apply(&self, particle: &mut Particle, dt: f32) {
        let direction = &mut particle.current.direction;
        match self.mode {
            SineMode::Add => *direction += self.force * dt,
            SineMode::Average => *direction = (*direction + self.force) * 0.5,
        }
    }

    pub(crate) fn validate(&self, affector: &str) -> Result<()> {
        if !self.force_vector.is_finite() {
            return Err(FxError::parameter(format!("{affector}.force_vector"), "must be finite"));
        }
        if !(self.min_frequency.is_finite() && self.max_frequency.is_finite())
            || self.min_frequency > self.max_frequency
        {
            return Err(FxError::parameter(
                format!("{affector}.min_frequency"),
                "frequencies must be finite with min_frequency <= max_frequency",
            ));
        }
        Ok(())
    }
}
