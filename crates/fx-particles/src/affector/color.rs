//! Color over lifetime

use crate::color::Color;
use crate::error::{FxError, Result};
use crate::particle::Particle;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// How a sampled color is combined with the particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum ColorMode {
    /// Replace the current color
    #[default]
    Set,
    /// Modulate the spawn color
    Multiply,
}

/// Color stop at a lifetime fraction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct ColorKey {
    pub t: f32,
    pub color: Color,
}

/// Piecewise-linear color ramp over the particle lifetime
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct TimeColor {
    /// Keys sorted by `t`
    pub keys: Vec<ColorKey>,
    pub mode: ColorMode,
}

impl TimeColor {
    /// Create a ramp; keys are sorted by lifetime fraction
    pub fn new(mode: ColorMode, keys: impl IntoIterator<Item = (f32, Color)>) -> Self {
        let mut keys: Vec<ColorKey> = keys
            .into_iter()
            .map(|(t, color)| ColorKey { t, color })
            .collect();
        keys.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self { keys, mode }
    }

    /// Sample the ramp at a lifetime fraction
    ///
    /// Fractions before the first key or after the last one return that
    /// key's color unchanged. Returns `None` for an empty ramp.
    pub fn sample(&self, fraction: f32) -> Option<Color> {
        let first = self.keys.first()?;
        let last = self.keys.last()?;
        if fraction <= first.t {
            return Some(first.color);
        }
        if fraction >= last.t {
            return Some(last.color);
        }

        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if fraction >= a.t && fraction < b.t {
                let span = b.t - a.t;
                let s = if span > f32::EPSILON {
                    (fraction - a.t) / span
                } else {
                    1.0
                };
                return Some(a.color.lerp(b.color, s));
            }
        }
        Some(last.color)
    }

    pub(crate) fn apply(&self, particle: &mut Particle) {
        let Some(color) = self.sample(particle.lifetime_fraction()) else {
            return;
        };
        particle.current.color = match self.mode {
            ColorMode::Set => color,
            ColorMode::Multiply => particle.initial.color.multiply(color),
        };
    }

    pub(crate) fn validate(&self, affector: &str) -> Result<()> {
        if self.keys.iter().any(|k| !k.t.is_finite()) {
            return Err(FxError::parameter(
                format!("{affector}.keys"),
                "key times must be finite",
            ));
        }
        if self.keys.windows(2).any(|w| w[0].t > w[1].t) {
            return Err(FxError::parameter(
                format!("{affector}.keys"),
                "keys must be sorted by time",
            ));
        }
        Ok(())
    }
}
