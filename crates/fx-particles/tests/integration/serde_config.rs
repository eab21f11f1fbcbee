//! Technique descriptions loaded from JSON

use fx_particles::{
    AffectorKind, EmitterShape, FxError, Parameter, Technique, TechniqueConfig,
};
use glam::Vec3;
use pretty_assertions::assert_eq;

const CAMPFIRE: &str = r#"{
    "name": "campfire",
    "seed": 9,
    "particle_quota": 500,
    "emitters": [
        {
            "name": "flames",
            "shape": { "type": "circle", "radius": { "type": "fixed", "value": 0.5 }, "step": 15 },
            "emission_rate": { "type": "fixed", "value": 60 },
            "time_to_live": { "type": "random", "min": 0.5, "max": 1.0 },
            "velocity": { "type": "fixed", "value": 2 }
        },
        {
            "name": "embers",
            "shape": { "type": "box", "dimensions": [1, 0.2, 1] },
            "emission_rate": { "type": "oscillate", "frequency": 0.5, "base": 8, "amplitude": 4 },
            "duration": { "type": "fixed", "value": 2 },
            "repeat_delay": { "type": "fixed", "value": 1 }
        }
    ],
    "affectors": [
        { "type": "color", "name": "heat", "keys": [
            { "t": 0, "color": { "r": 255, "g": 200, "b": 80, "a": 255 } },
            { "t": 1, "color": { "r": 40, "g": 40, "b": 40, "a": 0 } }
        ] },
        { "type": "linear_force", "name": "updraft", "force_vector": [0, 1, 0],
          "force": { "type": "curved", "interpolation": "spline",
                     "keys": [{ "t": 0, "value": 0 }, { "t": 1, "value": 3 }] } },
        { "type": "sine_force", "name": "flicker", "force_vector": [0.3, 0, 0],
          "min_frequency": 4, "max_frequency": 8, "excluded_emitters": ["embers"] },
        { "type": "scale", "name": "shrink", "scale_xyz": { "type": "fixed", "value": 0.5 } },
        { "type": "vortex", "name": "swirl", "position": [0, 0, 0],
          "rotation_speed": { "type": "fixed", "value": 30 } },
        { "type": "jet", "name": "jet" },
        { "type": "gravity", "name": "pull", "position": [0, 5, 0], "mass": 2 },
        { "type": "particle_follower", "name": "follow", "enabled": false },
        { "type": "align", "name": "align" },
        { "type": "flock_centering", "name": "flock" },
        { "type": "black_hole", "name": "sink", "position": [0, 20, 0], "velocity": 0.1 },
        { "type": "path_follower", "name": "path" },
        { "type": "randomiser", "name": "jitter", "time_step": 0.1 }
    ]
}"#;

#[test]
fn parse_every_kind() {
    let config = TechniqueConfig::from_json(CAMPFIRE).unwrap();
    assert_eq!(config.emitters.len(), 2);
    assert_eq!(config.affectors.len(), 13);
    assert!(matches!(
        config.emitters[0].shape,
        EmitterShape::Circle { step, random: false, .. } if step == 15.0
    ));
    assert_eq!(config.emitters[1].velocity, Parameter::fixed(1.0));

    let gravity = &config.affectors[6];
    assert_eq!(gravity.kind.type_name(), "gravity");
    assert_eq!(gravity.position, Vec3::new(0.0, 5.0, 0.0));
    assert_eq!(gravity.mass, 2.0);
    assert_eq!(gravity.scale, Vec3::ONE);
    assert!(gravity.enabled);
    assert!(!config.affectors[7].enabled);
    assert!(matches!(
        config.affectors[2].kind,
        AffectorKind::SineForce(_)
    ));
}

#[test]
fn build_and_run_from_json() {
    let mut technique = Technique::from_json(CAMPFIRE).unwrap();
    for _ in 0..120 {
        technique.process(1.0 / 60.0);
    }
    assert!(technique.stats().live_particles > 0);
    assert!(technique.particles().len() <= 500);
    assert!(
        technique
            .particles()
            .iter()
            .all(|p| p.current.position.is_finite())
    );
}

#[test]
fn unknown_type_rejected() {
    let json = r#"{ "affectors": [ { "type": "magnet", "name": "m" } ] }"#;
    assert!(matches!(
        TechniqueConfig::from_json(json),
        Err(FxError::Json(_))
    ));
}

#[test]
fn reload_written_description() {
    let config = TechniqueConfig::from_json(CAMPFIRE).unwrap();
    let written = config.to_json_pretty().unwrap();
    assert_eq!(TechniqueConfig::from_json(&written).unwrap(), config);
}
