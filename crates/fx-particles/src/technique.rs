//! Technique: a self-contained particle effect
//!
//! A [`Technique`] owns the particle pool, its emitters and an ordered list
//! of affectors. One call to [`Technique::process`] advances the whole
//! effect by one frame:
//!
//! 1. Every active emitter runs its life cycle and spawns particles
//! 2. Every affector runs, in the order it was added
//! 3. Particles age by `dt` and move along their direction
//! 4. Particles with no time left are removed, keeping spawn order
//!
//! Techniques are built through [`TechniqueBuilder`], which validates the
//! whole configuration up front so a running technique never fails.

use crate::affector::{AffectContext, Affector};
use crate::emitter::{EmitContext, Emitter, EmitterConfig, EmitterId};
use crate::error::{FxError, Result};
use crate::particle::Particle;
use crate::rng::ParticleRng;
use crate::vertex;
use glam::Vec3;
use std::collections::HashSet;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Live particle cap used when none is configured
pub const DEFAULT_PARTICLE_QUOTA: usize = 10_000;

/// Complete description of a technique
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct TechniqueConfig {
    pub name: String,
    /// Seed for every random draw in the technique
    pub seed: u64,
    /// Maximum number of live particles
    pub particle_quota: usize,
    /// Particle size used when an emitter leaves a dimension unset
    pub default_dimensions: Vec3,
    pub emitters: Vec<EmitterConfig>,
    pub affectors: Vec<Affector>,
}

impl Default for TechniqueConfig {
    fn default() -> Self {
        Self {
            name: "technique".to_string(),
            seed: 0,
            particle_quota: DEFAULT_PARTICLE_QUOTA,
            default_dimensions: Vec3::ONE,
            emitters: Vec::new(),
            affectors: Vec::new(),
        }
    }
}

#[cfg(feature = "serde-support")]
impl TechniqueConfig {
    /// Parse a technique description from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for [`Technique`]
#[derive(Debug, Clone, Default)]
pub struct TechniqueBuilder {
    config: TechniqueConfig,
}

impl TechniqueBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: TechniqueConfig {
                name: name.into(),
                ..Default::default()
            },
        }
    }

    /// Start from an existing description
    pub fn from_config(config: TechniqueConfig) -> Self {
        Self { config }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn particle_quota(mut self, quota: usize) -> Self {
        self.config.particle_quota = quota;
        self
    }

    pub fn default_dimensions(mut self, dimensions: Vec3) -> Self {
        self.config.default_dimensions = dimensions;
        self
    }

    /// Add an emitter
    pub fn emitter(mut self, emitter: EmitterConfig) -> Self {
        self.config.emitters.push(emitter);
        self
    }

    /// Append an affector; affectors run in the order they are added
    pub fn affector(mut self, affector: Affector) -> Self {
        self.config.affectors.push(affector);
        self
    }

    /// Validate the configuration and build the technique
    pub fn build(self) -> Result<Technique> {
        let TechniqueConfig {
            name,
            seed,
            particle_quota,
            default_dimensions,
            emitters: emitter_configs,
            affectors: mut affectors,
        } = self.config;

        if !default_dimensions.is_finite() {
            return Err(FxError::parameter(
                format!("{name}.default_dimensions"),
                "must be finite",
            ));
        }

        let mut names = HashSet::with_capacity(emitter_configs.len());
        let mut emitters = Vec::with_capacity(emitter_configs.len());
        for (index, config) in emitter_configs.into_iter().enumerate() {
            config.validate()?;
            if !names.insert(config.name.clone()) {
                return Err(FxError::DuplicateEmitter(config.name));
            }
            let index = u32::try_from(index)
                .map_err(|_| FxError::InvalidConfig("too many emitters".to_string()))?;
            emitters.push(Emitter::new(EmitterId::new(index), config));
        }

        for affector in &mut affectors {
            affector.validate()?;
            affector.resolve_exclusions(&emitters)?;
            affector.reset();
        }

        let mut technique = Technique {
            name,
            seed,
            particle_quota,
            default_dimensions,
            particles: Vec::new(),
            emitters,
            active_emitters: Vec::new(),
            affectors,
            elapsed_time: 0.0,
            total_emitted: 0,
            rng: ParticleRng::new(seed),
        };
        technique.activate_emitters();

        log::debug!(
            "Built technique '{}': {} emitters, {} affectors, quota {}, seed {}",
            technique.name,
            technique.emitters.len(),
            technique.affectors.len(),
            technique.particle_quota,
            technique.seed
        );
        Ok(technique)
    }
}

/// Snapshot of a technique's counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TechniqueStats {
    pub live_particles: usize,
    pub active_emitters: usize,
    pub total_emitted: u64,
    pub elapsed_time: f32,
}

/// Runtime particle effect
#[derive(Debug, Clone)]
pub struct Technique {
    name: String,
    seed: u64,
    particle_quota: usize,
    default_dimensions: Vec3,
    /// Live particles in spawn order
    particles: Vec<Particle>,
    /// Every emitter, indexed by [`EmitterId`]
    emitters: Vec<Emitter>,
    /// Emitters that are not dead, in creation order
    active_emitters: Vec<EmitterId>,
    affectors: Vec<Affector>,
    elapsed_time: f32,
    total_emitted: u64,
    rng: ParticleRng,
}

impl Technique {
    /// Build a technique from a description
    pub fn from_config(config: TechniqueConfig) -> Result<Self> {
        TechniqueBuilder::from_config(config).build()
    }

    /// Parse and build a technique from JSON
    #[cfg(feature = "serde-support")]
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_config(TechniqueConfig::from_json(json)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn particle_quota(&self) -> usize {
        self.particle_quota
    }

    pub fn default_dimensions(&self) -> Vec3 {
        self.default_dimensions
    }

    /// Seconds simulated since the technique was built or reset
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// Live particles in spawn order
    ///
    /// Expiry removes particles without reordering the rest, so this is
    /// also the order in which chain affectors (follower, align) see them.
    /// When several emitters are active their particles interleave, and a
    /// chain links particles across emitters unless all but one emitter is
    /// excluded from the affector.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Active emitters with their handles, in creation order
    pub fn emitters(&self) -> impl Iterator<Item = (EmitterId, &Emitter)> + '_ {
        self.active_emitters
            .iter()
            .filter_map(|&id| self.emitters.get(id.index()).map(|e| (id, e)))
    }

    /// Every emitter, including dead ones
    pub fn all_emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    pub fn emitter(&self, id: EmitterId) -> Option<&Emitter> {
        self.emitters.get(id.index())
    }

    /// Mutable access, for moving an emitter between frames
    pub fn emitter_mut(&mut self, id: EmitterId) -> Option<&mut Emitter> {
        self.emitters.get_mut(id.index())
    }

    pub fn emitter_by_name(&self, name: &str) -> Option<&Emitter> {
        self.emitters.iter().find(|e| e.name() == name)
    }

    /// Ask the named emitter to stop after its current activation
    ///
    /// Returns `false` if no emitter has that name.
    pub fn request_emitter_deletion(&mut self, name: &str) -> bool {
        match self.emitters.iter_mut().find(|e| e.name() == name) {
            Some(emitter) => {
                emitter.request_deletion();
                log::debug!("Deletion requested for emitter '{name}'");
                true
            }
            None => false,
        }
    }

    /// Affectors in execution order
    pub fn affectors(&self) -> &[Affector] {
        &self.affectors
    }

    /// Mutable access to a named affector
    pub fn affector_mut(&mut self, name: &str) -> Option<&mut Affector> {
        self.affectors.iter_mut().find(|a| a.name == name)
    }

    pub fn stats(&self) -> TechniqueStats {
        TechniqueStats {
            live_particles: self.particles.len(),
            active_emitters: self.active_emitters.len(),
            total_emitted: self.total_emitted,
            elapsed_time: self.elapsed_time,
        }
    }

    /// Advance the effect by `dt` seconds
    ///
    /// A negative or non-finite `dt` is ignored.
    pub fn process(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Technique '{}' ignoring invalid time step {dt}", self.name);
            return;
        }

        let emitted = self.process_emitters(dt);
        self.process_affectors(dt);

        for particle in &mut self.particles {
            particle.integrate(dt);
        }
        let before = self.particles.len();
        self.particles.retain(Particle::is_alive);

        self.elapsed_time += dt;
        self.total_emitted += emitted as u64;

        log::trace!(
            "Technique '{}' t={:.3}: +{} -{} particles, {} live, {} emitters",
            self.name,
            self.elapsed_time,
            emitted,
            before - self.particles.len(),
            self.particles.len(),
            self.active_emitters.len()
        );
    }

    /// Pack live particles for rendering, see [`vertex::fill_vertex_data`]
    pub fn fill_vertex_data(&self) -> Vec<f32> {
        vertex::fill_vertex_data(&self.particles)
    }

    /// Return to the freshly built state
    ///
    /// Particles are cleared, emitters restart from their configuration and
    /// the random stream is reseeded, so the run replays identically.
    pub fn reset(&mut self) {
        self.particles.clear();
        self.elapsed_time = 0.0;
        self.total_emitted = 0;
        self.rng = ParticleRng::new(self.seed);
        for emitter in &mut self.emitters {
            *emitter = Emitter::new(emitter.id(), emitter.config().clone());
        }
        for affector in &mut self.affectors {
            affector.reset();
        }
        self.activate_emitters();
        log::debug!("Technique '{}' reset", self.name);
    }

    fn activate_emitters(&mut self) {
        for emitter in &mut self.emitters {
            emitter.activate(self.elapsed_time, &mut self.rng);
        }
        self.active_emitters = self.emitters.iter().map(Emitter::id).collect();
    }

    fn process_emitters(&mut self, dt: f32) -> usize {
        let mut ctx = EmitContext {
            particles: &mut self.particles,
            rng: &mut self.rng,
            elapsed: self.elapsed_time,
            particle_quota: self.particle_quota,
            default_dimensions: self.default_dimensions,
        };

        let mut emitted = 0;
        for id in &self.active_emitters {
            if let Some(emitter) = self.emitters.get_mut(id.index()) {
                emitted += emitter.handle_emit_process(dt, &mut ctx);
            }
        }

        let emitters = &self.emitters;
        self.active_emitters.retain(|id| {
            let active = emitters.get(id.index()).is_some_and(Emitter::is_active);
            if !active {
                log::debug!("Emitter {id:?} removed from active list");
            }
            active
        });
        emitted
    }

    fn process_affectors(&mut self, dt: f32) {
        for affector in &mut self.affectors {
            affector.handle_emit_process(AffectContext {
                particles: &mut self.particles,
                emitters: &mut self.emitters,
                active_emitters: &self.active_emitters,
                rng: &mut self.rng,
                elapsed: self.elapsed_time,
                dt,
            });
        }
    }
}
