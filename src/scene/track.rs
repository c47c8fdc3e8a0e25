use serde::{Deserialize, Serialize};

use crate::foundation::core::Point;
use crate::foundation::error::{GlowError, GlowResult};
use crate::foundation::math::lerp;

/// Easing functions used between track keyframes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// Anchor pose at a given logic tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Keyframe {
    /// Logic tick of this key.
    pub tick: u64,
    /// World-space anchor position.
    pub position: Point,
    /// Heading in radians.
    #[serde(default)]
    pub heading: f64,
    /// Easing from this key to the next.
    #[serde(default)]
    pub ease: Ease,
}

/// Keyframed anchor motion for one scripted session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Track {
    keys: Vec<Keyframe>,
}

impl Track {
    /// Wrap `keys`, which must be non-empty and strictly increasing in tick.
    pub fn new(keys: Vec<Keyframe>) -> GlowResult<Self> {
        let track = Self { keys };
        track.validate()?;
        Ok(track)
    }

    /// Keyframes in tick order.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Tick of the first key.
    pub fn first_tick(&self) -> Option<u64> {
        self.keys.first().map(|k| k.tick)
    }

    /// Check ordering and finiteness.
    pub fn validate(&self) -> GlowResult<()> {
        if self.keys.is_empty() {
            return Err(GlowError::validation("track must have at least one keyframe"));
        }
        for k in &self.keys {
            if !(k.position.x.is_finite() && k.position.y.is_finite() && k.heading.is_finite()) {
                return Err(GlowError::validation(format!(
                    "keyframe at tick {} has non-finite values",
                    k.tick
                )));
            }
        }
        if self.keys.windows(2).any(|w| w[1].tick <= w[0].tick) {
            return Err(GlowError::validation(
                "keyframe ticks must be strictly increasing",
            ));
        }
        Ok(())
    }

    /// Pose at `tick`: held before the first and after the last key, eased in between.
    pub fn sample(&self, tick: u64) -> Option<(Point, f64)> {
        let first = self.keys.first()?;
        if tick <= first.tick {
            return Some((first.position, first.heading));
        }
        let next_i = self.keys.partition_point(|k| k.tick <= tick);
        let Some(b) = self.keys.get(next_i) else {
            let last = self.keys.last()?;
            return Some((last.position, last.heading));
        };
        let a = &self.keys[next_i - 1];
        let span = (b.tick - a.tick) as f64;
        let t = a.ease.apply((tick - a.tick) as f64 / span);
        Some((a.position.lerp(b.position, t), lerp(a.heading, b.heading, t)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/track.rs"]
mod tests;
