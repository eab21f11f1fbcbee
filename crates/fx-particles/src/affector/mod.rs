//! Affectors modify live particles once per tick
//!
//! Every affector shares the same frame: a name, a position, a mass, a
//! scale and a set of excluded emitters. The behavior is chosen by
//! [`AffectorKind`], a closed set of variants dispatched with `match`.
//!
//! Within a tick an affector first runs its per-tick preparation (advance
//! timers, grow the black hole step, rebuild the path spline) and then
//! visits every particle that was not spawned by an excluded emitter, in
//! spawn order. Vortex and randomiser also act on the active emitters.

mod black_hole;
mod chain;
mod color;
mod force;
mod path;
mod randomiser;
mod scale;
mod vortex;

pub use black_hole::BlackHole;
pub use chain::{Align, FlockCentering, ParticleFollower};
pub use color::{ColorKey, ColorMode, TimeColor};
pub use force::{Gravity, Jet, LinearForce, SineForce, SineMode};
pub use path::PathFollower;
pub use randomiser::Randomiser;
pub use scale::Scale;
pub use vortex::Vortex;

use crate::emitter::{Emitter, EmitterId};
use crate::error::{FxError, Result};
use crate::particle::Particle;
use crate::rng::ParticleRng;
use glam::Vec3;
use std::collections::BTreeSet;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Affector behavior
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-support",
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum AffectorKind {
    Color(TimeColor),
    Jet(Jet),
    Vortex(Vortex),
    Gravity(Gravity),
    LinearForce(LinearForce),
    Scale(Scale),
    ParticleFollower(ParticleFollower),
    Align(Align),
    FlockCentering(FlockCentering),
    BlackHole(BlackHole),
    PathFollower(PathFollower),
    Randomiser(Randomiser),
    SineForce(SineForce),
}

impl AffectorKind {
    /// Type name as used in technique descriptions
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Color(_) => "color",
            Self::Jet(_) => "jet",
            Self::Vortex(_) => "vortex",
            Self::Gravity(_) => "gravity",
            Self::LinearForce(_) => "linear_force",
            Self::Scale(_) => "scale",
            Self::ParticleFollower(_) => "particle_follower",
            Self::Align(_) => "align",
            Self::FlockCentering(_) => "flock_centering",
            Self::BlackHole(_) => "black_hole",
            Self::PathFollower(_) => "path_follower",
            Self::Randomiser(_) => "randomiser",
            Self::SineForce(_) => "sine_force",
        }
    }
}

#[cfg(feature = "serde-support")]
fn default_enabled() -> bool {
    true
}

#[cfg(feature = "serde-support")]
fn default_mass() -> f32 {
    1.0
}

#[cfg(feature = "serde-support")]
fn default_scale() -> Vec3 {
    Vec3::ONE
}

/// A named affector with its shared frame and behavior
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct Affector {
    pub name: String,
    #[cfg_attr(feature = "serde-support", serde(default = "default_enabled"))]
    pub enabled: bool,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub position: Vec3,
    #[cfg_attr(feature = "serde-support", serde(default = "default_mass"))]
    pub mass: f32,
    #[cfg_attr(feature = "serde-support", serde(default = "default_scale"))]
    pub scale: Vec3,
    /// Names of emitters whose particles this affector ignores
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub excluded_emitters: BTreeSet<String>,
    #[cfg_attr(feature = "serde-support", serde(flatten))]
    pub kind: AffectorKind,
    #[cfg_attr(feature = "serde-support", serde(skip))]
    excluded_ids: Vec<EmitterId>,
}

/// Everything an affector may touch during one tick
pub(crate) struct AffectContext<'a> {
    pub particles: &'a mut [Particle],
    pub emitters: &'a mut [Emitter],
    /// Emitters that are not dead, in creation order
    pub active_emitters: &'a [EmitterId],
    pub rng: &'a mut ParticleRng,
    pub elapsed: f32,
    pub dt: f32,
}

impl Affector {
    pub fn new(name: impl Into<String>, kind: AffectorKind) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            position: Vec3::ZERO,
            mass: 1.0,
            scale: Vec3::ONE,
            excluded_emitters: BTreeSet::new(),
            kind,
            excluded_ids: Vec::new(),
        }
    }

    /// Place the affector
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Ignore particles from the named emitter
    pub fn excluding(mut self, emitter: impl Into<String>) -> Self {
        self.excluded_emitters.insert(emitter.into());
        self
    }

    /// Whether particles from `emitter` are skipped
    pub fn excludes(&self, emitter: EmitterId) -> bool {
        self.excluded_ids.contains(&emitter)
    }

    /// Resolve excluded emitter names against the technique's emitters
    pub(crate) fn resolve_exclusions(&mut self, emitters: &[Emitter]) -> Result<()> {
        let mut ids = Vec::with_capacity(self.excluded_emitters.len());
        for name in &self.excluded_emitters {
            let emitter = emitters.iter().find(|e| e.name() == name).ok_or_else(|| {
                FxError::UnknownEmitter {
                    affector: self.name.clone(),
                    emitter: name.clone(),
                }
            })?;
            ids.push(emitter.id());
        }
        self.excluded_ids = ids;
        Ok(())
    }

    /// Check the frame and behavior for unusable values
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(FxError::InvalidConfig("affector name is empty".to_string()));
        }
        let name = self.name.as_str();
        if !self.position.is_finite() {
            return Err(FxError::parameter(format!("{name}.position"), "must be finite"));
        }
        if !self.mass.is_finite() {
            return Err(FxError::parameter(format!("{name}.mass"), "must be finite"));
        }
        if !self.scale.is_finite() {
            return Err(FxError::parameter(format!("{name}.scale"), "must be finite"));
        }

        match &self.kind {
            AffectorKind::Color(color) => color.validate(name),
            AffectorKind::Jet(jet) => jet.acceleration.validate(&format!("{name}.acceleration")),
            AffectorKind::Vortex(vortex) => {
                if !vortex.rotation_axis.is_finite() {
                    return Err(FxError::parameter(
                        format!("{name}.rotation_axis"),
                        "must be finite",
                    ));
                }
                vortex
                    .rotation_speed
                    .validate(&format!("{name}.rotation_speed"))
            }
            AffectorKind::Gravity(gravity) => gravity.gravity.validate(&format!("{name}.gravity")),
            AffectorKind::LinearForce(force) => {
                if !force.force_vector.is_finite() {
                    return Err(FxError::parameter(
                        format!("{name}.force_vector"),
                        "must be finite",
                    ));
                }
                force.force.validate(&format!("{name}.force"))
            }
            AffectorKind::Scale(scale) => scale.validate(name),
            AffectorKind::ParticleFollower(follower) => follower.validate(name),
            AffectorKind::Align(_) => Ok(()),
            AffectorKind::FlockCentering(flock) => {
                if flock.strength.is_finite() {
                    Ok(())
                } else {
                    Err(FxError::parameter(format!("{name}.strength"), "must be finite"))
                }
            }
            AffectorKind::BlackHole(hole) => hole.validate(name),
            AffectorKind::PathFollower(path) => path.validate(name),
            AffectorKind::Randomiser(randomiser) => randomiser.validate(name),
            AffectorKind::SineForce(sine) => sine.validate(name),
        }
    }

    /// Clear per-run state: timers, phases, cached splines
    pub fn reset(&mut self) {
        match &mut self.kind {
            AffectorKind::BlackHole(hole) => hole.reset(),
            AffectorKind::PathFollower(path) => path.reset(),
            AffectorKind::Randomiser(randomiser) => randomiser.reset(),
            AffectorKind::SineForce(sine) => sine.reset(),
            _ => {}
        }
    }

    /// Apply this affector for one tick
    pub(crate) fn handle_emit_process(&mut self, ctx: AffectContext<'_>) {
        if !self.enabled {
            return;
        }

        let AffectContext {
            particles,
            emitters,
            active_emitters,
            rng,
            elapsed,
            dt,
        } = ctx;
        let excluded = self.excluded_ids.as_slice();
        let center = self.position;

        match &mut self.kind {
            AffectorKind::Color(color) => {
                for_each_included(particles, excluded, |p| color.apply(p));
            }
            AffectorKind::Jet(jet) => {
                for_each_included(particles, excluded, |p| jet.apply(p, dt, rng));
            }
            AffectorKind::Vortex(vortex) => {
                let Some(rotation) = vortex.rotation(elapsed, dt, rng) else {
                    return;
                };
                for_each_included(particles, excluded, |p| {
                    Vortex::rotate(
                        rotation,
                        center,
                        &mut p.current.position,
                        &mut p.current.direction,
                    );
                });
                for_each_active_emitter(emitters, active_emitters, excluded, |e| {
                    let mut position = e.position();
                    let mut direction = e.direction();
                    Vortex::rotate(rotation, center, &mut position, &mut direction);
                    e.set_position(position);
                    e.set_direction(direction);
                });
            }
            AffectorKind::Gravity(gravity) => {
                let strength = gravity.gravity.value(elapsed, rng);
                let mass = self.mass;
                for_each_included(particles, excluded, |p| {
                    Gravity::apply(p, center, mass, strength, dt);
                });
            }
            AffectorKind::LinearForce(force) => {
                for_each_included(particles, excluded, |p| force.apply(p, dt, rng));
            }
            AffectorKind::Scale(scale) => {
                let affector_scale = self.scale;
                for_each_included(particles, excluded, |p| {
                    scale.apply(p, affector_scale, elapsed, rng);
                });
            }
            AffectorKind::ParticleFollower(follower) => {
                follower.apply(included_mut(particles, excluded));
            }
            AffectorKind::Align(align) => {
                align.apply(included_mut(particles, excluded));
            }
            AffectorKind::FlockCentering(flock) => {
                flock.apply(particles, excluded, dt);
            }
            AffectorKind::BlackHole(hole) => {
                hole.begin_tick();
                for_each_included(particles, excluded, |p| hole.apply(p, center));
            }
            AffectorKind::PathFollower(path) => {
                let Some(spline) = path.prepare(&self.name) else {
                    return;
                };
                for_each_included(particles, excluded, |p| PathFollower::apply(spline, p, dt));
            }
            AffectorKind::Randomiser(randomiser) => {
                if randomiser.particle_due(dt) {
                    for_each_included(particles, excluded, |p| {
                        randomiser.perturb(&mut p.current.position, &mut p.current.direction, rng);
                    });
                }
                if randomiser.emitter_due(dt) {
                    for_each_active_emitter(emitters, active_emitters, excluded, |e| {
                        let mut position = e.position();
                        let mut direction = e.direction();
                        randomiser.perturb(&mut position, &mut direction, rng);
                        e.set_position(position);
                        e.set_direction(direction);
                    });
                }
            }
            AffectorKind::SineForce(sine) => {
                sine.begin_tick(dt, rng);
                for_each_included(particles, excluded, |p| sine.apply(p, dt));
            }
        }
    }
}

fn included_mut<'p>(
    particles: &'p mut [Particle],
    excluded: &'p [EmitterId],
) -> impl Iterator<Item = &'p mut Particle> {
    particles
        .iter_mut()
        .filter(move |p| !excluded.contains(&p.emitted_by))
}

fn for_each_included(
    particles: &mut [Particle],
    excluded: &[EmitterId],
    mut f: impl FnMut(&mut Particle),
) {
    for particle in included_mut(particles, excluded) {
        f(particle);
    }
}

fn for_each_active_emitter(
    emitters: &mut [Emitter],
    active: &[EmitterId],
    excluded: &[EmitterId],
    mut f: impl FnMut(&mut Emitter),
) {
    for id in active {
        if excluded.contains(id) {
            continue;
        }
        if let Some(emitter) = emitters.get_mut(id.index()) {
            f(emitter);
        }
    }
}
