//! Particle emitters
//!
//! An emitter owns the generation policy for particles: where they spawn
//! (its [`EmitterShape`]), how many per second, and which initial speed,
//! lifetime, mass, size and color they get. Each emitter also runs its own
//! life cycle:
//!
//! ```text
//! Emitting --duration elapsed--> WaitingRepeat --delay elapsed--> Emitting
//!     |                               |
//!     +--no repeat / deletion--> Dead <+--deletion requested
//! ```
//!
//! Emission uses fractional carry-over: the part of `rate * dt` that does
//! not make a whole particle is kept for the next tick, so the long-run
//! count matches the configured rate regardless of frame timing.

mod shape;

pub use shape::EmitterShape;

use crate::color::Color;
use crate::error::{FxError, Result};
use crate::math::normalize_or;
use crate::parameter::Parameter;
use crate::particle::{Particle, ParticleState};
use crate::rng::ParticleRng;
use glam::Vec3;
use shape::{ShapeCursor, SpawnFrame};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Accumulated emission within this much of a whole particle counts as whole
const EMISSION_TOLERANCE: f32 = 1e-3;

/// Upper bound on life-cycle transitions handled within one tick
const MAX_TRANSITIONS_PER_TICK: usize = 64;

/// Stable handle of an emitter within its technique
///
/// Particles refer to their emitter through this handle, so a particle
/// outliving its emitter never dangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmitterId(u32);

impl EmitterId {
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of the emitter in the technique's registry
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Emitter life-cycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterState {
    /// Within its duration; may spawn particles
    Emitting,
    /// Duration over, counting down the repeat delay
    WaitingRepeat,
    /// Finished for good; removed from the active list
    Dead,
}

/// Static description of an emitter
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct EmitterConfig {
    /// Unique name within the technique
    pub name: String,
    pub shape: EmitterShape,
    /// Disabled emitters keep their life cycle but spawn nothing
    pub enabled: bool,
    pub position: Vec3,
    /// Axis of the spawn cone and normal of planar shapes
    pub direction: Vec3,
    /// Facing vector given to spawned particles
    pub orientation: Vec3,
    /// Particles per second
    pub emission_rate: Parameter,
    /// Particle lifetime in seconds
    pub time_to_live: Parameter,
    /// Initial particle speed
    pub velocity: Parameter,
    /// Spawn cone half-angle in degrees
    pub angle: Parameter,
    pub mass: Parameter,
    /// Falls back to the technique default width when unset
    pub particle_width: Option<Parameter>,
    pub particle_height: Option<Parameter>,
    pub particle_depth: Option<Parameter>,
    pub color: Color,
    /// Random blend between two colors, overriding `color`
    pub color_range: Option<(Color, Color)>,
    /// Seconds per activation; emits forever when unset
    pub duration: Option<Parameter>,
    /// Seconds between activations; the emitter dies after one cycle when unset
    pub repeat_delay: Option<Parameter>,
    /// Emit at least one particle on the first activation
    pub force_emission: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            shape: EmitterShape::Point,
            enabled: true,
            position: Vec3::ZERO,
            direction: Vec3::Y,
            orientation: Vec3::Z,
            emission_rate: Parameter::fixed(10.0),
            time_to_live: Parameter::fixed(5.0),
            velocity: Parameter::fixed(1.0),
            angle: Parameter::fixed(20.0),
            mass: Parameter::fixed(1.0),
            particle_width: None,
            particle_height: None,
            particle_depth: None,
            color: Color::WHITE,
            color_range: None,
            duration: None,
            repeat_delay: None,
            force_emission: false,
        }
    }
}

impl EmitterConfig {
    /// Create a configuration with default generation parameters
    pub fn new(name: impl Into<String>, shape: EmitterShape) -> Self {
        Self {
            name: name.into(),
            shape,
            ..Default::default()
        }
    }

    /// Check every field for values the emitter cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FxError::InvalidConfig("emitter name is empty".to_string()));
        }
        let field = |f: &str| format!("{}.{f}", self.name);

        for (name, vector) in [
            ("position", self.position),
            ("direction", self.direction),
            ("orientation", self.orientation),
        ] {
            if !vector.is_finite() {
                return Err(FxError::parameter(field(name), "must be finite"));
            }
        }

        self.emission_rate.validate(&field("emission_rate"))?;
        self.time_to_live.validate(&field("time_to_live"))?;
        self.velocity.validate(&field("velocity"))?;
        self.angle.validate(&field("angle"))?;
        self.mass.validate(&field("mass"))?;
        for (name, param) in [
            ("particle_width", &self.particle_width),
            ("particle_height", &self.particle_height),
            ("particle_depth", &self.particle_depth),
            ("duration", &self.duration),
            ("repeat_delay", &self.repeat_delay),
        ] {
            if let Some(param) = param {
                param.validate(&field(name))?;
            }
        }
        self.shape.validate(&self.name)
    }
}

/// Everything an emitter needs from its technique during one tick
pub(crate) struct EmitContext<'a> {
    pub particles: &'a mut Vec<Particle>,
    pub rng: &'a mut ParticleRng,
    /// Technique time in seconds at the start of the tick
    pub elapsed: f32,
    /// Maximum number of live particles in the technique
    pub particle_quota: usize,
    pub default_dimensions: Vec3,
}

/// Runtime emitter
#[derive(Debug, Clone)]
pub struct Emitter {
    id: EmitterId,
    config: EmitterConfig,
    /// Current position; may be moved by affectors
    position: Vec3,
    /// Current spawn axis; may be rotated by affectors
    direction: Vec3,
    state: EmitterState,
    duration_remaining: Option<f32>,
    repeat_delay_remaining: f32,
    emission_fraction: f32,
    /// Quota left in this activation; `None` means unlimited
    particles_remaining: Option<usize>,
    can_be_deleted: bool,
    /// Force emission still owed from the first activation
    force_pending: bool,
    cursor: ShapeCursor,
    activations: u32,
    emitted_total: u64,
}

impl Emitter {
    /// Create an emitter; it starts emitting once activated by its technique
    pub(crate) fn new(id: EmitterId, config: EmitterConfig) -> Self {
        Self {
            id,
            position: config.position,
            direction: config.direction,
            state: EmitterState::Emitting,
            duration_remaining: None,
            repeat_delay_remaining: 0.0,
            emission_fraction: 0.0,
            particles_remaining: None,
            can_be_deleted: false,
            force_pending: config.force_emission,
            cursor: ShapeCursor::default(),
            activations: 0,
            emitted_total: 0,
            config,
        }
    }

    /// Get the emitter handle
    pub fn id(&self) -> EmitterId {
        self.id
    }

    /// Get the emitter name
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Get the configuration this emitter was built from
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn state(&self) -> EmitterState {
        self.state
    }

    /// Check if the emitter is still part of the simulation
    pub fn is_active(&self) -> bool {
        self.state != EmitterState::Dead
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction;
    }

    /// Seconds left in the current activation, if the emitter has a duration
    pub fn duration_remaining(&self) -> Option<f32> {
        self.duration_remaining
    }

    pub fn repeat_delay_remaining(&self) -> f32 {
        self.repeat_delay_remaining
    }

    /// Fractional particle count carried into the next tick
    pub fn emission_fraction(&self) -> f32 {
        self.emission_fraction
    }

    /// Particles this activation may still emit; `None` means unlimited
    pub fn particles_remaining(&self) -> Option<usize> {
        self.particles_remaining
    }

    pub fn can_be_deleted(&self) -> bool {
        self.can_be_deleted
    }

    /// Ask the emitter to stop instead of starting another activation
    ///
    /// An emitter without a duration stops on its next tick.
    pub fn request_deletion(&mut self) {
        self.can_be_deleted = true;
    }

    /// Number of activations so far
    pub fn activations(&self) -> u32 {
        self.activations
    }

    /// Particles emitted over the emitter's whole life
    pub fn emitted_total(&self) -> u64 {
        self.emitted_total
    }

    /// Start a new activation
    ///
    /// Draws the duration and derives the quota for this cycle. The
    /// emission fraction carries over from the previous activation.
    pub(crate) fn activate(&mut self, elapsed: f32, rng: &mut ParticleRng) {
        self.state = EmitterState::Emitting;
        self.activations += 1;
        self.duration_remaining = self
            .config
            .duration
            .as_ref()
            .map(|d| d.value(elapsed, rng).max(0.0));
        self.particles_remaining = self.duration_remaining.map(|d| self.calculate_quota(d));

        log::debug!(
            "Emitter '{}' activated (cycle {}, duration {:?}, quota {:?})",
            self.config.name,
            self.activations,
            self.duration_remaining,
            self.particles_remaining
        );
    }

    /// Maximum particle count for an activation lasting `duration` seconds
    fn calculate_quota(&self, duration: f32) -> usize {
        let quota = (duration * self.config.emission_rate.mean().max(0.0)).ceil() as usize;
        if self.force_pending { quota.max(1) } else { quota }
    }

    /// Whole particles to emit for a tick of `dt` seconds
    ///
    /// Adds `rate * dt` to the carried fraction, returns the integer part
    /// clamped to the remaining quota, and keeps the remainder. A total
    /// falling short of the next integer by rounding noise still counts as
    /// that integer; the remainder then goes slightly negative so the long
    /// run count stays exact.
    pub fn emitted_particle_count_per_cycle(
        &mut self,
        dt: f32,
        elapsed: f32,
        rng: &mut ParticleRng,
    ) -> usize {
        let rate = self.config.emission_rate.value(elapsed, rng).max(0.0);
        let total = rate * dt + self.emission_fraction;
        let whole = (total + EMISSION_TOLERANCE).floor().max(0.0);
        self.emission_fraction = total - whole;

        let mut count = whole as usize;
        if self.force_pending && count == 0 {
            count = 1;
        }
        match self.particles_remaining {
            Some(remaining) => count.min(remaining),
            None => count,
        }
    }

    /// Advance the life cycle by `dt` and spawn this tick's particles
    ///
    /// Time left over when a phase ends mid-tick runs the next phase, so the
    /// cycle period does not depend on the tick size. Returns the number of
    /// particles emitted.
    pub(crate) fn handle_emit_process(&mut self, dt: f32, ctx: &mut EmitContext<'_>) -> usize {
        let mut budget = dt;
        let mut emitted = 0;

        for _ in 0..MAX_TRANSITIONS_PER_TICK {
            match self.state {
                EmitterState::Dead => break,
                EmitterState::WaitingRepeat => {
                    self.repeat_delay_remaining -= budget;
                    if self.repeat_delay_remaining > 0.0 {
                        break;
                    }
                    budget = -self.repeat_delay_remaining;
                    if self.can_be_deleted {
                        self.retire();
                        break;
                    }
                    self.activate(ctx.elapsed, ctx.rng);
                    if budget <= 0.0 {
                        break;
                    }
                }
                EmitterState::Emitting => {
                    // Only the part of the tick inside the duration counts toward emission
                    let active_dt = self
                        .duration_remaining
                        .map_or(budget, |remaining| budget.min(remaining.max(0.0)));
                    if self.config.enabled {
                        emitted += self.emit(active_dt, ctx);
                    }

                    let Some(remaining) = self.duration_remaining.as_mut() else {
                        if self.can_be_deleted {
                            self.retire();
                        }
                        break;
                    };
                    *remaining -= budget;
                    if *remaining > 0.0 {
                        break;
                    }
                    budget = -*remaining;
                    self.finish_cycle(ctx.elapsed, ctx.rng);
                    if budget <= 0.0 {
                        break;
                    }
                }
            }
        }
        emitted
    }

    fn emit(&mut self, dt: f32, ctx: &mut EmitContext<'_>) -> usize {
        let requested = self.emitted_particle_count_per_cycle(dt, ctx.elapsed, ctx.rng);
        let room = ctx.particle_quota.saturating_sub(ctx.particles.len());
        let count = requested.min(room);
        if count < requested {
            log::trace!(
                "Emitter '{}' clamped from {} to {} particles by the technique quota",
                self.config.name,
                requested,
                count
            );
        }

        ctx.particles.reserve(count);
        for _ in 0..count {
            let particle = self.create_particle(ctx);
            ctx.particles.push(particle);
        }

        if count > 0 {
            self.force_pending = false;
        }
        if let Some(remaining) = self.particles_remaining.as_mut() {
            *remaining -= count;
        }
        self.emitted_total += count as u64;
        count
    }

    fn create_particle(&mut self, ctx: &mut EmitContext<'_>) -> Particle {
        let t = ctx.elapsed;
        let rng = &mut *ctx.rng;
        let config = &self.config;

        let time_to_live = config.time_to_live.value(t, rng);
        let mass = config.mass.value(t, rng);
        let frame = SpawnFrame {
            origin: self.position,
            axis: self.direction,
            half_angle: config.angle.value(t, rng).to_radians(),
            speed: config.velocity.value(t, rng),
            t,
        };
        let (position, direction) = self.cursor.internal_create(&config.shape, &frame, rng);

        let defaults = ctx.default_dimensions;
        let mut dimension = |param: &Option<Parameter>, fallback: f32| {
            param.as_ref().map_or(fallback, |p| p.value(t, rng))
        };
        let dimensions = Vec3::new(
            dimension(&config.particle_width, defaults.x),
            dimension(&config.particle_height, defaults.y),
            dimension(&config.particle_depth, defaults.z),
        );

        let color = match config.color_range {
            Some((from, to)) => from.lerp(to, rng.next_f32()),
            None => config.color,
        };

        Particle::new(
            ParticleState {
                position,
                direction,
                dimensions,
                orientation: normalize_or(config.orientation, Vec3::Z),
                color,
                mass,
                time_to_live,
            },
            self.id,
        )
    }

    /// End the current activation
    fn finish_cycle(&mut self, elapsed: f32, rng: &mut ParticleRng) {
        match self.config.repeat_delay.as_ref() {
            Some(delay) if !self.can_be_deleted => {
                self.state = EmitterState::WaitingRepeat;
                self.repeat_delay_remaining = delay.value(elapsed, rng).max(0.0);
                log::debug!(
                    "Emitter '{}' waiting {:.3}s to repeat",
                    self.config.name,
                    self.repeat_delay_remaining
                );
            }
            _ => self.retire(),
        }
    }

    fn retire(&mut self) {
        self.state = EmitterState::Dead;
        self.duration_remaining = Some(0.0);
        self.particles_remaining = Some(0);
        log::debug!(
            "Emitter '{}' finished after {} particles",
            self.config.name,
            self.emitted_total
        );
    }
}
