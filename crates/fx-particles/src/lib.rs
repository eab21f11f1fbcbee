//! Particle effect simulation
//!
//! A [`Technique`] bundles emitters that spawn particles and affectors that
//! shape them every frame. The library only simulates: renderers read the
//! particle pool through [`Technique::particles`] or a packed float buffer
//! from [`Technique::fill_vertex_data`].
//!
//! # Example
//!
//! ```rust
//! use fx_particles::{
//!     Affector, AffectorKind, EmitterConfig, EmitterShape, Gravity, Parameter,
//!     TechniqueBuilder,
//! };
//! use glam::Vec3;
//!
//! let mut technique = TechniqueBuilder::new("sparks")
//!     .seed(42)
//!     .emitter(EmitterConfig {
//!         emission_rate: Parameter::fixed(100.0),
//!         time_to_live: Parameter::random(0.5, 1.5),
//!         ..EmitterConfig::new("core", EmitterShape::Point)
//!     })
//!     .affector(
//!         Affector::new("pull", AffectorKind::Gravity(Gravity::default()))
//!             .at(Vec3::new(0.0, 5.0, 0.0)),
//!     )
//!     .build()?;
//!
//! for _ in 0..60 {
//!     technique.process(1.0 / 60.0);
//! }
//! assert!(!technique.particles().is_empty());
//! # Ok::<(), fx_particles::FxError>(())
//! ```
//!
//! # Features
//!
//! - `serde-support`: `Serialize`/`Deserialize` for every configuration type
//!   and JSON loading through `TechniqueConfig::from_json`

pub mod affector;
pub mod color;
pub mod emitter;
pub mod error;
pub mod math;
pub mod parameter;
pub mod particle;
pub mod rng;
pub mod spline;
pub mod technique;
pub mod vertex;

// Re-export common types
pub use affector::{
    Affector, AffectorKind, Align, BlackHole, ColorKey, ColorMode, FlockCentering, Gravity, Jet,
    LinearForce, ParticleFollower, PathFollower, Randomiser, Scale, SineForce, SineMode,
    TimeColor, Vortex,
};
pub use color::Color;
pub use emitter::{Emitter, EmitterConfig, EmitterId, EmitterShape, EmitterState};
pub use error::{FxError, Result};
pub use parameter::{Interpolation, Keyframe, Parameter, Waveform};
pub use particle::{Particle, ParticleState};
pub use rng::ParticleRng;
pub use technique::{Technique, TechniqueBuilder, TechniqueConfig, TechniqueStats};
pub use vertex::FLOATS_PER_PARTICLE;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
