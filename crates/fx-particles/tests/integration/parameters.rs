//! Parameter evaluation through the public API

use fx_particles::{Interpolation, Parameter, ParticleRng, Waveform};
use test_case::test_case;

fn ramp(interpolation: Interpolation) -> Parameter {
    Parameter::curved(interpolation, [(0.0, 2.0), (0.5, 6.0), (1.0, 4.0)])
}

#[test_case(Interpolation::Linear, -1.0, 2.0 ; "linear clamps before first key")]
#[test_case(Interpolation::Linear, 0.25, 4.0 ; "linear midpoint")]
#[test_case(Interpolation::Linear, 0.75, 5.0 ; "linear second segment")]
#[test_case(Interpolation::Linear, 3.0, 4.0 ; "linear clamps after last key")]
#[test_case(Interpolation::Spline, 0.0, 2.0 ; "spline first key")]
#[test_case(Interpolation::Spline, 0.5, 6.0 ; "spline middle key")]
#[test_case(Interpolation::Spline, 1.0, 4.0 ; "spline last key")]
fn curve_value(interpolation: Interpolation, t: f32, expected: f32) {
    let value = ramp(interpolation).value(t, &mut ParticleRng::new(0));
    assert!((value - expected).abs() < 1e-5, "{value} != {expected}");
}

#[test_case(Parameter::fixed(3.0), 3.0 ; "fixed")]
#[test_case(Parameter::random(2.0, 4.0), 3.0 ; "random midpoint")]
#[test_case(Parameter::curved(Interpolation::Linear, [(0.0, 0.0), (2.0, 4.0)]), 2.0 ; "linear curve")]
#[test_case(Parameter::sine(2.0, 1.5, 10.0), 1.5 ; "oscillator base")]
fn mean(parameter: Parameter, expected: f32) {
    assert!((parameter.mean() - expected).abs() < 1e-5);
}

#[test]
fn square_wave_takes_two_values() {
    let square = Parameter::Oscillate {
        waveform: Waveform::Square,
        frequency: 1.0,
        phase: 0.0,
        base: 1.0,
        amplitude: 2.0,
    };
    let mut rng = ParticleRng::new(0);
    assert_eq!(square.value(0.25, &mut rng), 3.0);
    assert_eq!(square.value(0.75, &mut rng), -1.0);
}

#[test]
fn random_draws_follow_seed() {
    let parameter = Parameter::random(-5.0, 5.0);
    let draw = |seed| {
        let mut rng = ParticleRng::new(seed);
        (0..16)
            .map(|_| parameter.value(0.0, &mut rng))
            .collect::<Vec<_>>()
    };
    assert_eq!(draw(11), draw(11));
    assert_ne!(draw(11), draw(12));
    assert!(draw(11).iter().all(|v| (-5.0..=5.0).contains(v)));
}
