//! Affectors applied through a running technique

use crate::common::{fountain, init_logging, run, single_particle};
use fx_particles::{
    Affector, AffectorKind, Align, Color, ColorMode, EmitterConfig, FlockCentering, Jet,
    Parameter, ParticleFollower, PathFollower, Randomiser, Scale, SineForce, SineMode,
    TechniqueBuilder, TimeColor, Vortex,
};
use glam::Vec3;
use pretty_assertions::assert_eq;

const DT: f32 = 0.125;

#[test]
fn color_ramp_follows_lifetime() {
    let mut technique = TechniqueBuilder::new("fade")
        .emitter(single_particle("spark", Vec3::ZERO, 1.0))
        .affector(Affector::new(
            "fade",
            AffectorKind::Color(TimeColor::new(
                ColorMode::Set,
                [(0.0, Color::WHITE), (1.0, Color::TRANSPARENT)],
            )),
        ))
        .build()
        .unwrap();

    technique.process(DT);
    assert_eq!(technique.particles()[0].current.color, Color::WHITE);

    // Lifetime fraction is 0.5 when the affector runs on the fifth tick
    run(&mut technique, 4, DT);
    assert_eq!(
        technique.particles()[0].current.color,
        Color::rgba(128, 128, 128, 128)
    );
}

#[test]
fn jet_accelerates_along_spawn_direction() {
    let mut technique = TechniqueBuilder::new("jet")
        .emitter(EmitterConfig {
            velocity: Parameter::fixed(1.0),
            angle: Parameter::fixed(0.0),
            ..single_particle("spark", Vec3::ZERO, 10.0)
        })
        .affector(Affector::new(
            "boost",
            AffectorKind::Jet(Jet {
                acceleration: Parameter::fixed(8.0),
            }),
        ))
        .build()
        .unwrap();

    run(&mut technique, 4, DT);
    let p = &technique.particles()[0];
    assert!((p.current.direction - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-5);
}

#[test]
fn vortex_spins_particles_around_axis() {
    let mut technique = TechniqueBuilder::new("swirl")
        .emitter(single_particle("spark", Vec3::new(2.0, 0.0, 0.0), 10.0))
        .affector(Affector::new(
            "swirl",
            AffectorKind::Vortex(Vortex {
                rotation_axis: Vec3::Y,
                rotation_speed: Parameter::fixed(90.0),
            }),
        ))
        .build()
        .unwrap();

    // Four ticks of 0.125 s at 90 deg/s is 45 degrees
    run(&mut technique, 4, DT);
    let p = technique.particles()[0].current.position;
    assert!((p.length() - 2.0).abs() < 1e-4);
    assert!((p.x - p.z.abs()).abs() < 1e-4);
}

#[test]
fn scale_over_system_time() {
    let mut technique = TechniqueBuilder::new("grow")
        .emitter(single_particle("spark", Vec3::ZERO, 10.0))
        .affector(
            Affector::new(
                "grow",
                AffectorKind::Scale(Scale {
                    scale_xyz: Some(Parameter::curved(
                        Default::default(),
                        [(0.0, 1.0), (1.0, 3.0)],
                    )),
                    since_system_start: true,
                    ..Default::default()
                }),
            )
            .with_scale(Vec3::new(1.0, 2.0, 1.0)),
        )
        .build()
        .unwrap();

    run(&mut technique, 5, DT);
    // Evaluated at elapsed 0.5 on the fifth tick
    assert_eq!(
        technique.particles()[0].current.dimensions,
        Vec3::new(2.0, 4.0, 2.0)
    );
}

#[test]
fn follower_keeps_chain_together() {
    init_logging();
    let mut technique = TechniqueBuilder::new("trail")
        .emitter(EmitterConfig {
            velocity: Parameter::fixed(20.0),
            angle: Parameter::fixed(180.0),
            ..fountain("trail", 40.0, 5.0)
        })
        .affector(Affector::new(
            "follow",
            AffectorKind::ParticleFollower(ParticleFollower {
                min_distance: 0.0,
                max_distance: 0.5,
            }),
        ))
        .build()
        .unwrap();

    run(&mut technique, 20, DT);
    let particles = technique.particles();
    assert!(particles.len() > 10);
    // Integration runs after the follower, so allow one tick of travel
    for pair in particles.windows(2) {
        let gap = pair[1].current.position - pair[0].current.position;
        let travel = (pair[0].current.direction - pair[1].current.direction).length() * DT;
        assert!(gap.length() <= 0.5 + travel + 1e-4);
    }
}

#[test]
fn align_orients_along_chain() {
    let mut technique = TechniqueBuilder::new("ribbon")
        .emitter(EmitterConfig {
            velocity: Parameter::fixed(0.0),
            ..fountain("a", 8.0, 5.0)
        })
        .affector(Affector::new("align", AffectorKind::Align(Align { resize: true })))
        .build()
        .unwrap();

    // Motionless particles all sit on the emitter: no orientation change
    run(&mut technique, 4, DT);
    for p in technique.particles() {
        assert_eq!(p.current.orientation, Vec3::Z);
        assert_eq!(p.current.dimensions, Vec3::ONE);
    }
}

#[test]
fn flock_pulls_toward_centroid() {
    let mut technique = TechniqueBuilder::new("flock")
        .emitter(single_particle("left", Vec3::new(-1.0, 0.0, 0.0), 10.0))
        .emitter(single_particle("right", Vec3::new(3.0, 0.0, 0.0), 10.0))
        .affector(Affector::new(
            "flock",
            AffectorKind::FlockCentering(FlockCentering::default()),
        ))
        .build()
        .unwrap();

    technique.process(DT);
    let particles = technique.particles();
    assert!((particles[0].current.direction.x - 2.0 * DT).abs() < 1e-6);
    assert!((particles[1].current.direction.x + 2.0 * DT).abs() < 1e-6);
}

#[test]
fn path_follower_with_one_point_is_inert_at_runtime() {
    init_logging();
    let mut technique = TechniqueBuilder::new("path")
        .emitter(single_particle("spark", Vec3::ZERO, 1.0))
        .affector(Affector::new(
            "path",
            AffectorKind::PathFollower(PathFollower::new(vec![
                Vec3::ZERO,
                Vec3::new(0.0, 8.0, 0.0),
            ])),
        ))
        .build()
        .unwrap();

    if let Some(affector) = technique.affector_mut("path") {
        if let AffectorKind::PathFollower(path) = &mut affector.kind {
            path.set_points(vec![Vec3::ONE]);
        }
    }
    run(&mut technique, 3, DT);
    assert_eq!(technique.particles()[0].current.position, Vec3::ZERO);
}

#[test]
fn randomiser_respects_time_step() {
    let mut technique = TechniqueBuilder::new("jitter")
        .seed(5)
        .emitter(single_particle("spark", Vec3::ZERO, 10.0))
        .affector(Affector::new(
            "jitter",
            AffectorKind::Randomiser({
                let mut randomiser = Randomiser::default();
                randomiser.max_deviation = Vec3::splat(0.5);
                randomiser.time_step = 0.3;
                randomiser.random_direction = false;
                randomiser
            }),
        ))
        .build()
        .unwrap();

    technique.process(DT);
    technique.process(DT);
    assert_eq!(technique.particles()[0].current.position, Vec3::ZERO);

    technique.process(DT);
    let moved = technique.particles()[0].current.position;
    assert_ne!(moved, Vec3::ZERO);
    assert!(moved.abs().max_element() <= 0.5);
}

#[test]
fn randomiser_moves_emitters() {
    let mut technique = TechniqueBuilder::new("jitter")
        .emitter(fountain("a", 1.0, 1.0))
        .affector(Affector::new(
            "jitter",
            AffectorKind::Randomiser({
                let mut randomiser = Randomiser::default();
                randomiser.random_direction = false;
                randomiser
            }),
        ))
        .build()
        .unwrap();

    technique.process(DT);
    let emitter = technique.emitter_by_name("a").unwrap();
    assert_ne!(emitter.position(), Vec3::ZERO);
    assert!(emitter.position().abs().max_element() <= 1.0);
}

#[test]
fn sine_force_averages_direction() {
    let mut technique = TechniqueBuilder::new("wave")
        .emitter(single_particle("spark", Vec3::ZERO, 10.0))
        .affector(Affector::new(
            "wave",
            AffectorKind::SineForce(SineForce::new(Vec3::X, SineMode::Average, 0.0, 0.0)),
        ))
        .build()
        .unwrap();

    run(&mut technique, 3, DT);
    assert_eq!(technique.particles()[0].current.direction, Vec3::ZERO);
}

#[test]
fn disabled_affector_is_skipped() {
    let mut affector = Affector::new(
        "boost",
        AffectorKind::Jet(Jet {
            acceleration: Parameter::fixed(100.0),
        }),
    );
    affector.enabled = false;

    let mut technique = TechniqueBuilder::new("off")
        .emitter(EmitterConfig {
            velocity: Parameter::fixed(1.0),
            angle: Parameter::fixed(0.0),
            ..single_particle("spark", Vec3::ZERO, 10.0)
        })
        .affector(affector)
        .build()
        .unwrap();

    run(&mut technique, 2, DT);
    assert_eq!(technique.particles()[0].current.direction, Vec3::Y);
}
