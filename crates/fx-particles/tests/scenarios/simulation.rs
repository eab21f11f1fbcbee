//! End-to-end simulation scenarios

use crate::common::{fountain, init_logging, run, single_particle};
use fx_particles::{
    Affector, AffectorKind, EmitterConfig, EmitterShape, Gravity, LinearForce, Parameter,
    TechniqueBuilder, Vortex,
};
use glam::Vec3;
use pretty_assertions::assert_eq;

const DT: f32 = 1.0 / 60.0;

#[test]
fn constant_rate_burst() {
    init_logging();
    let mut technique = TechniqueBuilder::new("burst")
        .emitter(EmitterConfig {
            duration: Some(Parameter::fixed(1.0)),
            ..fountain("steady", 10.0, 2.0)
        })
        .build()
        .unwrap();

    run(&mut technique, 60, DT);
    assert_eq!(technique.particles().len(), 10);

    run(&mut technique, 120, DT);
    assert_eq!(technique.particles().len(), 0);
    assert_eq!(technique.stats().active_emitters, 0);
}

#[test]
fn excluded_emitter_is_untouched() {
    let mut technique = TechniqueBuilder::new("wind")
        .emitter(EmitterConfig {
            angle: Parameter::fixed(45.0),
            ..fountain("a", 30.0, 3.0)
        })
        .emitter(EmitterConfig {
            position: Vec3::new(5.0, 0.0, 0.0),
            angle: Parameter::fixed(45.0),
            ..fountain("b", 30.0, 3.0)
        })
        .affector(
            Affector::new(
                "wind",
                AffectorKind::LinearForce(LinearForce {
                    force: Parameter::fixed(3.0),
                    force_vector: Vec3::X,
                }),
            )
            .excluding("b"),
        )
        .build()
        .unwrap();

    run(&mut technique, 60, DT);
    let b = technique.emitter_by_name("b").unwrap().id();

    let (mut seen_a, mut seen_b) = (0, 0);
    for p in technique.particles() {
        if p.emitted_by == b {
            seen_b += 1;
            assert_eq!(p.current.direction, p.initial.direction);
        } else {
            seen_a += 1;
            assert_ne!(p.current.direction, p.initial.direction);
        }
    }
    assert!(seen_a > 0 && seen_b > 0);
}

#[test]
fn gravity_converges_until_pass() {
    let mut technique = TechniqueBuilder::new("orbit")
        .emitter(single_particle("one", Vec3::new(10.0, 0.0, 0.0), 1000.0))
        .affector(Affector::new(
            "pull",
            AffectorKind::Gravity(Gravity {
                gravity: Parameter::fixed(4.0),
            }),
        ))
        .build()
        .unwrap();

    technique.process(DT);
    let mut previous = f32::INFINITY;
    let mut passed = false;
    for _ in 0..10_000 {
        let position = technique.particles()[0].current.position;
        if position.x <= 0.0 {
            passed = true;
            break;
        }
        let distance = position.length();
        assert!(distance < previous, "{distance} >= {previous}");
        previous = distance;
        technique.process(DT);
    }
    assert!(passed, "particle never reached the attractor");
}

#[test]
fn same_seed_same_run() {
    let build = |seed| {
        TechniqueBuilder::new("fireworks")
            .seed(seed)
            .emitter(EmitterConfig {
                time_to_live: Parameter::random(0.5, 2.0),
                velocity: Parameter::random(1.0, 4.0),
                angle: Parameter::fixed(60.0),
                ..EmitterConfig::new(
                    "shell",
                    EmitterShape::SphereSurface {
                        radius: Parameter::random(0.1, 0.3),
                    },
                )
            })
            .affector(Affector::new(
                "spin",
                AffectorKind::Vortex(Vortex::default()),
            ))
            .build()
            .unwrap()
    };

    let mut a = build(77);
    let mut b = build(77);
    let mut c = build(78);
    run(&mut a, 90, DT);
    run(&mut b, 90, DT);
    run(&mut c, 90, DT);

    assert_eq!(a.fill_vertex_data(), b.fill_vertex_data());
    assert_ne!(a.fill_vertex_data(), c.fill_vertex_data());
}
