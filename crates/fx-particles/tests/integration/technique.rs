//! Technique building, accessors and output

use crate::common::{fountain, run, single_particle};
use fx_particles::{
    Affector, AffectorKind, BlackHole, EmitterConfig, FLOATS_PER_PARTICLE, FxError, Gravity,
    Parameter, PathFollower, TechniqueBuilder, TechniqueConfig,
};
use glam::Vec3;
use pretty_assertions::assert_eq;

#[test]
fn build_from_config() {
    let config = TechniqueConfig {
        name: "from-config".to_string(),
        seed: 3,
        particle_quota: 50,
        emitters: vec![fountain("a", 10.0, 1.0), fountain("b", 10.0, 1.0)],
        affectors: vec![Affector::new("g", AffectorKind::Gravity(Gravity::default()))],
        ..Default::default()
    };
    let technique = TechniqueBuilder::from_config(config).build().unwrap();

    assert_eq!(technique.name(), "from-config");
    assert_eq!(technique.seed(), 3);
    assert_eq!(technique.particle_quota(), 50);
    assert_eq!(technique.affectors().len(), 1);
    let names: Vec<&str> = technique.emitters().map(|(_, e)| e.name()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn emitter_ids_are_stable_handles() {
    let mut technique = TechniqueBuilder::new("ids")
        .emitter(fountain("a", 60.0, 1.0))
        .emitter(fountain("b", 60.0, 1.0))
        .build()
        .unwrap();
    technique.process(0.1);

    for particle in technique.particles() {
        let emitter = technique.emitter(particle.emitted_by).unwrap();
        assert!(emitter.name() == "a" || emitter.name() == "b");
        assert_eq!(emitter.id(), particle.emitted_by);
    }
}

#[test]
fn emitter_mut_moves_spawn_point() {
    let mut technique = TechniqueBuilder::new("move")
        .emitter(EmitterConfig {
            velocity: Parameter::fixed(0.0),
            ..fountain("a", 10.0, 5.0)
        })
        .build()
        .unwrap();
    let id = technique.emitter_by_name("a").unwrap().id();
    technique
        .emitter_mut(id)
        .unwrap()
        .set_position(Vec3::new(0.0, 0.0, 9.0));

    technique.process(0.5);
    assert!(
        technique
            .particles()
            .iter()
            .all(|p| p.initial.position == Vec3::new(0.0, 0.0, 9.0))
    );
}

#[test]
fn one_point_path_rejected() {
    let err = TechniqueBuilder::new("path")
        .emitter(fountain("a", 1.0, 1.0))
        .affector(Affector::new(
            "path",
            AffectorKind::PathFollower(PathFollower::new(vec![Vec3::ONE])),
        ))
        .build()
        .unwrap_err();
    assert!(matches!(err, FxError::InvalidPath(_)));
}

#[test]
fn error_messages_name_the_culprit() {
    let err = TechniqueBuilder::new("dup")
        .emitter(fountain("smoke", 1.0, 1.0))
        .emitter(fountain("smoke", 1.0, 1.0))
        .build()
        .unwrap_err();
    assert_eq!(err.to_string(), "Duplicate emitter name: 'smoke'");

    let err = TechniqueBuilder::new("excl")
        .emitter(fountain("smoke", 1.0, 1.0))
        .affector(
            Affector::new("hole", AffectorKind::BlackHole(BlackHole::default())).excluding("fire"),
        )
        .build()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Affector 'hole' excludes unknown emitter 'fire'"
    );
}

#[test]
fn vertex_data_matches_pool() {
    let mut technique = TechniqueBuilder::new("gpu")
        .emitter(single_particle("a", Vec3::new(1.0, 2.0, 3.0), 2.0))
        .emitter(single_particle("b", Vec3::new(-1.0, 0.0, 0.0), 2.0))
        .build()
        .unwrap();
    technique.process(0.5);

    let data = technique.fill_vertex_data();
    assert_eq!(data.len(), 2 * FLOATS_PER_PARTICLE);
    assert_eq!(&data[0..4], &[1.0, 2.0, 3.0, 0.25]);
    assert_eq!(&data[FLOATS_PER_PARTICLE..FLOATS_PER_PARTICLE + 4], &[
        -1.0, 0.0, 0.0, 0.25
    ]);
}

#[test]
fn stats_track_counts() {
    let mut technique = TechniqueBuilder::new("stats")
        .emitter(fountain("a", 20.0, 0.5))
        .build()
        .unwrap();
    run(&mut technique, 4, 0.25);

    let stats = technique.stats();
    assert_eq!(stats.total_emitted, 20);
    assert_eq!(stats.live_particles, 10);
    assert_eq!(stats.active_emitters, 1);
    assert_eq!(stats.elapsed_time, 1.0);
}

#[test]
fn technique_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<fx_particles::Technique>();
}
