//! Common test utilities and fixtures

#![allow(dead_code)]

use fx_particles::{EmitterConfig, EmitterShape, Parameter, Technique};
use glam::Vec3;

/// Route library logs through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Emitter that spawns exactly one motionless particle on its first tick
pub fn single_particle(name: &str, position: Vec3, time_to_live: f32) -> EmitterConfig {
    EmitterConfig {
        position,
        emission_rate: Parameter::fixed(0.0),
        velocity: Parameter::fixed(0.0),
        time_to_live: Parameter::fixed(time_to_live),
        force_emission: true,
        ..EmitterConfig::new(name, EmitterShape::Point)
    }
}

/// Steady point emitter
pub fn fountain(name: &str, rate: f32, time_to_live: f32) -> EmitterConfig {
    EmitterConfig {
        emission_rate: Parameter::fixed(rate),
        time_to_live: Parameter::fixed(time_to_live),
        ..EmitterConfig::new(name, EmitterShape::Point)
    }
}

/// Run `ticks` fixed steps
pub fn run(technique: &mut Technique, ticks: usize, dt: f32) {
    for _ in 0..ticks {
        technique.process(dt);
    }
}
