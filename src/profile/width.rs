use std::f64::consts::TAU;

use crate::foundation::error::{GlowError, GlowResult};
use crate::foundation::math::{bump, lerp, smoothstep};

/// Width of the strip as a pure function of path ratio (and frame time).
///
/// Evaluation never looks at path state. Outputs may be negative for exotic parameters; the mesh
/// builder clamps them to zero before use.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidthProfile {
    /// `max_width * sin(pi * r)`.
    QuadraticBump {
        /// Width at the midpoint.
        max_width: f64,
    },
    /// Linear ramps in `[0, taper_start]` and `[taper_end, 1]`, constant in between.
    ConstantWithSoftEnds {
        /// Plateau width.
        width: f64,
        /// Ratio where the leading ramp reaches full width.
        taper_start: f64,
        /// Ratio where the trailing ramp starts.
        taper_end: f64,
    },
    /// Bump shape scaled by `1 + amplitude * sin(speed * t)`.
    PulsingWidth {
        /// Bump peak before pulsing.
        base: f64,
        /// Relative pulse depth.
        amplitude: f64,
        /// Angular pulse speed in radians per second.
        speed: f64,
    },
    /// Smoothstep taper from `source_width` at ratio 0 to `end_width` at ratio 1.
    SourceTaper {
        /// Width at the source end.
        source_width: f64,
        /// Width at the terminal end.
        end_width: f64,
    },
    /// Travelling ripple along the path, enveloped by the bump so both ends reach zero.
    WaveWidth {
        /// Mean width before the envelope.
        base: f64,
        /// Ripple amplitude in width units.
        amplitude: f64,
        /// Ripples per path length.
        frequency: f64,
    },
    /// Constant width (no taper).
    Constant {
        /// Width everywhere along the path.
        width: f64,
    },
}

impl Default for WidthProfile {
    fn default() -> Self {
        Self::QuadraticBump { max_width: 16.0 }
    }
}

impl WidthProfile {
    /// `QuadraticBump(max_width)`.
    pub fn quadratic_bump(max_width: f64) -> Self {
        Self::QuadraticBump { max_width }
    }

    /// `ConstantWithSoftEnds(width, taper_start, taper_end)`.
    pub fn constant_with_soft_ends(width: f64, taper_start: f64, taper_end: f64) -> Self {
        Self::ConstantWithSoftEnds {
            width,
            taper_start,
            taper_end,
        }
    }

    /// `PulsingWidth(base, amplitude, speed)`.
    pub fn pulsing(base: f64, amplitude: f64, speed: f64) -> Self {
        Self::PulsingWidth {
            base,
            amplitude,
            speed,
        }
    }

    /// `SourceTaper(source_width, end_width)`.
    pub fn source_taper(source_width: f64, end_width: f64) -> Self {
        Self::SourceTaper {
            source_width,
            end_width,
        }
    }

    /// `WaveWidth(base, amplitude, frequency)`.
    pub fn wave(base: f64, amplitude: f64, frequency: f64) -> Self {
        Self::WaveWidth {
            base,
            amplitude,
            frequency,
        }
    }

    /// Evaluate the raw (unclamped) width at `ratio` for frame time `time_s`.
    pub fn eval(&self, ratio: f64, time_s: f64) -> f64 {
        let r = ratio.clamp(0.0, 1.0);
        match *self {
            Self::QuadraticBump { max_width } => max_width * bump(r),
            Self::ConstantWithSoftEnds {
                width,
                taper_start,
                taper_end,
            } => {
                if taper_start > 0.0 && r < taper_start {
                    width * (r / taper_start)
                } else if taper_end < 1.0 && r > taper_end {
                    width * ((1.0 - r) / (1.0 - taper_end))
                } else {
                    width
                }
            }
            Self::PulsingWidth {
                base,
                amplitude,
                speed,
            } => base * bump(r) * (1.0 + amplitude * (speed * time_s).sin()),
            Self::SourceTaper {
                source_width,
                end_width,
            } => lerp(source_width, end_width, smoothstep(0.0, 1.0, r)),
            Self::WaveWidth {
                base,
                amplitude,
                frequency,
            } => (base + amplitude * (TAU * (frequency * r - time_s)).sin()) * bump(r),
            Self::Constant { width } => width,
        }
    }

    /// Reject non-finite parameters and inverted taper windows.
    pub fn validate(&self) -> GlowResult<()> {
        let params: [f64; 3] = match *self {
            Self::QuadraticBump { max_width } => [max_width, 0.0, 0.0],
            Self::ConstantWithSoftEnds {
                width,
                taper_start,
                taper_end,
            } => {
                if !(0.0..=1.0).contains(&taper_start)
                    || !(0.0..=1.0).contains(&taper_end)
                    || taper_start > taper_end
                {
                    return Err(GlowError::validation(
                        "soft-end tapers must satisfy 0 <= taper_start <= taper_end <= 1",
                    ));
                }
                [width, 0.0, 0.0]
            }
            Self::PulsingWidth {
                base,
                amplitude,
                speed,
            } => [base, amplitude, speed],
            Self::SourceTaper {
                source_width,
                end_width,
            } => [source_width, end_width, 0.0],
            Self::WaveWidth {
                base,
                amplitude,
                frequency,
            } => [base, amplitude, frequency],
            Self::Constant { width } => [width, 0.0, 0.0],
        };
        if params.iter().any(|v| !v.is_finite()) {
            return Err(GlowError::validation("width profile parameters must be finite"));
        }
        Ok(())
    }
}

/// Clamp a raw profile width to a usable value (`>= 0`, NaN becomes 0).
///
/// Negative widths would flip the strip's winding and silently corrupt rendering.
pub fn sanitize_width(w: f64) -> f64 {
    if w.is_nan() { 0.0 } else { w.max(0.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/profile/width.rs"]
mod tests;
