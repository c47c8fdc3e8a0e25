use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::foundation::color::ColorF;
use crate::foundation::error::{GlowError, GlowResult};
use crate::foundation::math::{bump, fract};

/// Ordered list of colors resolved by the caller (theme tables live outside this crate).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(pub Vec<ColorF>);

impl Palette {
    /// Sample the palette cyclically at `x` (one full cycle per unit), blending neighbours.
    pub fn sample_cyclic(&self, x: f64) -> ColorF {
        let len = self.0.len();
        match len {
            0 => ColorF::TRANSPARENT,
            1 => self.0[0],
            _ => {
                let pos = fract(x) * len as f64;
                let i = (pos.floor() as usize).min(len - 1);
                let j = (i + 1) % len;
                self.0[i].lerp(self.0[j], (pos - i as f64) as f32)
            }
        }
    }
}

/// Color of the strip as a pure function of `(ratio, scroll, time)`.
///
/// Every variant multiplies its color channels by `sin(pi * ratio)`, so both ends fade to black no
/// matter which profile is active. Alpha is left alone; opacity is applied once, in
/// [`ColorF::to_additive`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorProfile {
    /// One flat color.
    SolidWithFade {
        /// Base color.
        color: ColorF,
    },
    /// Palette gradient that cycles along the path as `scroll` advances.
    ThemeGradient {
        /// Colors to cycle through.
        palette: Palette,
        /// Palette repetitions per path length.
        #[serde(default = "one")]
        cycles: f64,
    },
    /// Hot core color in the middle of the path, edge color towards the ends, with shimmer.
    PlasmaCore {
        /// Color at the center of the path.
        core: ColorF,
        /// Color towards both ends.
        edge: ColorF,
        /// Relative brightness wobble.
        #[serde(default = "default_shimmer")]
        shimmer: f64,
        /// Shimmer speed in radians per second.
        #[serde(default = "default_shimmer_speed")]
        shimmer_speed: f64,
    },
    /// Hue rotating with ratio, scroll and time.
    RainbowCycle {
        /// HSV saturation.
        #[serde(default = "one")]
        saturation: f64,
        /// HSV value.
        #[serde(default = "one")]
        value: f64,
        /// Hue turns per second.
        #[serde(default = "default_hue_speed")]
        speed: f64,
    },
}

fn one() -> f64 {
    1.0
}

fn default_shimmer() -> f64 {
    0.25
}

fn default_shimmer_speed() -> f64 {
    12.0
}

fn default_hue_speed() -> f64 {
    0.5
}

impl Default for ColorProfile {
    fn default() -> Self {
        Self::SolidWithFade {
            color: ColorF::WHITE,
        }
    }
}

impl ColorProfile {
    /// `SolidWithFade(color)`.
    pub fn solid(color: ColorF) -> Self {
        Self::SolidWithFade { color }
    }

    /// `ThemeGradient(palette)` with one cycle per path.
    pub fn theme_gradient(palette: Palette) -> Self {
        Self::ThemeGradient {
            palette,
            cycles: 1.0,
        }
    }

    /// `PlasmaCore(core, edge)` with default shimmer.
    pub fn plasma(core: ColorF, edge: ColorF) -> Self {
        Self::PlasmaCore {
            core,
            edge,
            shimmer: default_shimmer(),
            shimmer_speed: default_shimmer_speed(),
        }
    }

    /// `RainbowCycle` at full saturation and value.
    pub fn rainbow(speed: f64) -> Self {
        Self::RainbowCycle {
            saturation: 1.0,
            value: 1.0,
            speed,
        }
    }

    /// Evaluate the straight color at `ratio`, with the end envelope already applied to RGB.
    pub fn eval(&self, ratio: f64, scroll: f64, time_s: f64) -> ColorF {
        let r = ratio.clamp(0.0, 1.0);
        let base = match self {
            Self::SolidWithFade { color } => *color,
            Self::ThemeGradient { palette, cycles } => palette.sample_cyclic((r + scroll) * cycles),
            Self::PlasmaCore {
                core,
                edge,
                shimmer,
                shimmer_speed,
            } => {
                let heat = bump(r) * bump(r);
                let phase = TAU * (4.0 * r + scroll) + time_s * shimmer_speed;
                let wobble = 1.0 + shimmer * phase.sin();
                let c = edge.lerp(*core, heat as f32);
                let k = wobble.max(0.0) as f32;
                ColorF::rgba(c.r * k, c.g * k, c.b * k, c.a)
            }
            Self::RainbowCycle {
                saturation,
                value,
                speed,
            } => ColorF::from_hsv(r + scroll + time_s * speed, *saturation, *value, 1.0),
        };
        base.scale_rgb(bump(r) as f32)
    }

    /// Reject empty palettes and non-finite parameters.
    pub fn validate(&self) -> GlowResult<()> {
        match self {
            Self::ThemeGradient { palette, cycles } => {
                if palette.0.is_empty() {
                    return Err(GlowError::validation("theme gradient palette must not be empty"));
                }
                if !cycles.is_finite() {
                    return Err(GlowError::validation("theme gradient cycles must be finite"));
                }
            }
            Self::PlasmaCore {
                shimmer,
                shimmer_speed,
                ..
            } => {
                if !shimmer.is_finite() || !shimmer_speed.is_finite() {
                    return Err(GlowError::validation("plasma shimmer must be finite"));
                }
            }
            Self::RainbowCycle {
                saturation,
                value,
                speed,
            } => {
                if ![saturation, value, speed].iter().all(|v| v.is_finite()) {
                    return Err(GlowError::validation("rainbow parameters must be finite"));
                }
            }
            Self::SolidWithFade { .. } => {}
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/profile/color.rs"]
mod tests;
