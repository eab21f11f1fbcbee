//! Time-varying scalar parameters
//!
//! A [`Parameter`] drives every rate, force and size in the simulation. It
//! is evaluated with a time value that is either a lifetime fraction in
//! [0, 1] or system-elapsed seconds, depending on the caller.

use crate::error::{FxError, Result};
use crate::rng::ParticleRng;
use crate::spline::hermite;
use std::f32::consts::TAU;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Number of samples per segment used to average spline curves
const SPLINE_MEAN_SAMPLES: usize = 16;

/// How a curved parameter blends between keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum Interpolation {
    /// Straight lines between keys
    #[default]
    Linear,
    /// Cubic Hermite with Catmull-Rom tangents
    Spline,
}

/// Oscillator wave shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum Waveform {
    #[default]
    Sine,
    Square,
}

/// A single curve key
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct Keyframe {
    pub t: f32,
    pub value: f32,
}

/// Time-varying scalar
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-support",
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Parameter {
    /// Constant value
    Fixed { value: f32 },
    /// Uniform draw in [min, max] on every evaluation
    Random { min: f32, max: f32 },
    /// Keyframed curve, keys sorted by `t`
    Curved {
        #[cfg_attr(feature = "serde-support", serde(default))]
        interpolation: Interpolation,
        keys: Vec<Keyframe>,
    },
    /// Periodic oscillator: `base + amplitude * wave(frequency * t + phase)`
    Oscillate {
        #[cfg_attr(feature = "serde-support", serde(default))]
        waveform: Waveform,
        frequency: f32,
        #[cfg_attr(feature = "serde-support", serde(default))]
        phase: f32,
        #[cfg_attr(feature = "serde-support", serde(default))]
        base: f32,
        amplitude: f32,
    },
}

impl Parameter {
    /// Constant parameter
    pub const fn fixed(value: f32) -> Self {
        Self::Fixed { value }
    }

    /// Uniform random parameter
    pub const fn random(min: f32, max: f32) -> Self {
        Self::Random { min, max }
    }

    /// Curve parameter; keys are sorted by time
    pub fn curved(interpolation: Interpolation, keys: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let mut keys: Vec<Keyframe> = keys
            .into_iter()
            .map(|(t, value)| Keyframe { t, value })
            .collect();
        keys.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self::Curved {
            interpolation,
            keys,
        }
    }

    /// Sine oscillator with zero phase
    pub const fn sine(frequency: f32, base: f32, amplitude: f32) -> Self {
        Self::Oscillate {
            waveform: Waveform::Sine,
            frequency,
            phase: 0.0,
            base,
            amplitude,
        }
    }

    /// Evaluate the parameter at `t`
    ///
    /// Only the random variant consumes from `rng`.
    pub fn value(&self, t: f32, rng: &mut ParticleRng) -> f32 {
        match self {
            Self::Fixed { value } => *value,
            Self::Random { min, max } => rng.range(*min, *max),
            Self::Curved {
                interpolation,
                keys,
            } => evaluate_curve(*interpolation, keys, t),
            Self::Oscillate {
                waveform,
                frequency,
                phase,
                base,
                amplitude,
            } => {
                let wave = (TAU * (frequency * t + phase)).sin();
                let wave = match waveform {
                    Waveform::Sine => wave,
                    Waveform::Square => {
                        if wave >= 0.0 {
                            1.0
                        } else {
                            -1.0
                        }
                    }
                };
                base + amplitude * wave
            }
        }
    }

    /// Long-run average value
    ///
    /// Used to size emitter quotas. Curves are averaged over their key span;
    /// oscillators average to their base.
    pub fn mean(&self) -> f32 {
        match self {
            Self::Fixed { value } => *value,
            Self::Random { min, max } => (min + max) * 0.5,
            Self::Curved {
                interpolation,
                keys,
            } => curve_mean(*interpolation, keys),
            Self::Oscillate { base, .. } => *base,
        }
    }

    /// Check the parameter for values that cannot be evaluated
    pub fn validate(&self, field: &str) -> Result<()> {
        let finite = |v: f32, what: &str| {
            if v.is_finite() {
                Ok(())
            } else {
                Err(FxError::parameter(field, format!("{what} must be finite")))
            }
        };

        match self {
            Self::Fixed { value } => finite(*value, "value"),
            Self::Random { min, max } => {
                finite(*min, "min")?;
                finite(*max, "max")?;
                if min > max {
                    return Err(FxError::parameter(
                        field,
                        format!("min {min} is greater than max {max}"),
                    ));
                }
                Ok(())
            }
            Self::Curved { keys, .. } => {
                if keys.is_empty() {
                    return Err(FxError::parameter(field, "curve has no keys"));
                }
                for key in keys {
                    finite(key.t, "key time")?;
                    finite(key.value, "key value")?;
                }
                if keys.windows(2).any(|w| w[0].t > w[1].t) {
                    return Err(FxError::parameter(field, "curve keys must be sorted by time"));
                }
                Ok(())
            }
            Self::Oscillate {
                frequency,
                phase,
                base,
                amplitude,
                ..
            } => {
                finite(*frequency, "frequency")?;
                finite(*phase, "phase")?;
                finite(*base, "base")?;
                finite(*amplitude, "amplitude")
            }
        }
    }
}

impl Default for Parameter {
    fn default() -> Self {
        Self::fixed(0.0)
    }
}

impl From<f32> for Parameter {
    fn from(value: f32) -> Self {
        Self::fixed(value)
    }
}

/// Evaluate a sorted key list at `t`, clamping outside the key range
fn evaluate_curve(interpolation: Interpolation, keys: &[Keyframe], t: f32) -> f32 {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return 0.0;
    };
    if t <= first.t || keys.len() == 1 {
        return first.value;
    }
    if t >= last.t {
        return last.value;
    }

    // Largest index whose key time is <= t
    let index = keys.partition_point(|k| k.t <= t).saturating_sub(1);
    let k0 = keys[index];
    let k1 = keys[index + 1];
    let span = k1.t - k0.t;
    if span <= f32::EPSILON {
        return k1.value;
    }
    let s = (t - k0.t) / span;

    match interpolation {
        Interpolation::Linear => k0.value + (k1.value - k0.value) * s,
        Interpolation::Spline => {
            let m0 = slope(keys, index) * span;
            let m1 = slope(keys, index + 1) * span;
            hermite(k0.value, m0, k1.value, m1, s)
        }
    }
}

/// Catmull-Rom style slope at key `i`, one-sided at the ends
fn slope(keys: &[Keyframe], i: usize) -> f32 {
    let prev = keys[i.saturating_sub(1)];
    let next = keys[(i + 1).min(keys.len() - 1)];
    let dt = next.t - prev.t;
    if dt <= f32::EPSILON {
        0.0
    } else {
        (next.value - prev.value) / dt
    }
}

fn curve_mean(interpolation: Interpolation, keys: &[Keyframe]) -> f32 {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return 0.0;
    };
    let span = last.t - first.t;
    if span <= f32::EPSILON {
        return first.value;
    }

    match interpolation {
        Interpolation::Linear => {
            let area: f32 = keys
                .windows(2)
                .map(|w| (w[1].t - w[0].t) * (w[0].value + w[1].value) * 0.5)
                .sum();
            area / span
        }
        Interpolation::Spline => {
            let samples = SPLINE_MEAN_SAMPLES * (keys.len() - 1);
            let step = span / samples as f32;
            let area: f32 = (0..samples)
                .map(|i| {
                    let a = evaluate_curve(interpolation, keys, first.t + step * i as f32);
                    let b = evaluate_curve(interpolation, keys, first.t + step * (i + 1) as f32);
                    (a + b) * 0.5 * step
                })
                .sum();
            area / span
        }
    }
}
