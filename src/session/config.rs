use serde::{Deserialize, Serialize};

use crate::foundation::error::{GlowError, GlowResult};
use crate::profile::color::ColorProfile;
use crate::profile::width::WidthProfile;
use crate::render::passes::PassStack;

/// Upper bound on `max_points` and `resolution`; scratch buffers are sized from them.
pub const MAX_STYLE_POINTS: usize = 4096;

/// Where a session's control points come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathSource {
    /// Trail through the recorded anchor history, newest sample first.
    #[default]
    History,
    /// Straight beam from the newest anchor along its heading.
    Beam {
        /// Beam length in world units.
        length: f64,
    },
}

/// Visual style and lifetime parameters of one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Ring-buffer capacity for raw anchor samples (also the beam point count).
    pub max_points: usize,
    /// Base width multiplier applied on top of every pass multiplier.
    pub width_scale: f64,
    /// Width profile.
    pub width: WidthProfile,
    /// Color profile.
    pub color: ColorProfile,
    /// Bloom/core passes, outermost first.
    pub passes: PassStack,
    /// Smoothed point count; 0 draws the raw control points.
    pub resolution: usize,
    /// Ticks a session keeps fading after it ends.
    pub fade_ticks: u32,
    /// Texture/color scroll in path-lengths per second.
    pub scroll_speed: f64,
    /// Minimum anchor movement before a new sample is recorded.
    pub min_move: f64,
    /// Control point source.
    pub source: PathSource,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            max_points: 24,
            width_scale: 1.0,
            width: WidthProfile::default(),
            color: ColorProfile::default(),
            passes: PassStack::default(),
            resolution: 48,
            fade_ticks: 20,
            scroll_speed: 0.0,
            min_move: 0.5,
            source: PathSource::History,
        }
    }
}

impl StyleConfig {
    /// Check every field and nested profile.
    pub fn validate(&self) -> GlowResult<()> {
        if self.max_points < 2 {
            return Err(GlowError::validation("style max_points must be >= 2"));
        }
        if self.max_points > MAX_STYLE_POINTS {
            return Err(GlowError::validation(format!(
                "style max_points must be <= {MAX_STYLE_POINTS}"
            )));
        }
        if self.resolution > MAX_STYLE_POINTS {
            return Err(GlowError::validation(format!(
                "style resolution must be <= {MAX_STYLE_POINTS}"
            )));
        }
        if !self.width_scale.is_finite() || self.width_scale < 0.0 {
            return Err(GlowError::validation("style width_scale must be finite and >= 0"));
        }
        if !self.scroll_speed.is_finite() {
            return Err(GlowError::validation("style scroll_speed must be finite"));
        }
        if !self.min_move.is_finite() || self.min_move < 0.0 {
            return Err(GlowError::validation("style min_move must be finite and >= 0"));
        }
        if let PathSource::Beam { length } = self.source
            && (!length.is_finite() || length < 0.0)
        {
            return Err(GlowError::validation("beam length must be finite and >= 0"));
        }
        self.width.validate()?;
        self.color.validate()?;
        self.passes.validate()?;
        Ok(())
    }

    /// Builder-style width profile override.
    pub fn with_width(mut self, width: WidthProfile) -> Self {
        self.width = width;
        self
    }

    /// Builder-style color profile override.
    pub fn with_color(mut self, color: ColorProfile) -> Self {
        self.color = color;
        self
    }

    /// Builder-style pass stack override.
    pub fn with_passes(mut self, passes: PassStack) -> Self {
        self.passes = passes;
        self
    }

    /// Builder-style resolution override (0 = raw points).
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Builder-style fade length override.
    pub fn with_fade_ticks(mut self, fade_ticks: u32) -> Self {
        self.fade_ticks = fade_ticks;
        self
    }

    /// Builder-style source override.
    pub fn with_source(mut self, source: PathSource) -> Self {
        self.source = source;
        self
    }
}

/// Registry sizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOpts {
    /// Hard cap on concurrent sessions (active plus fading).
    pub max_sessions: usize,
}

impl Default for RegistryOpts {
    fn default() -> Self {
        Self { max_sessions: 64 }
    }
}

impl RegistryOpts {
    /// Defaults, overridden by `GLOWSTRIP_MAX_SESSIONS` when it holds a positive integer.
    pub fn from_env() -> Self {
        let max_sessions = std::env::var("GLOWSTRIP_MAX_SESSIONS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(Self::default().max_sessions);
        Self { max_sessions }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
