use crate::foundation::error::{GlowError, GlowResult};

pub use kurbo::{Point, Vec2};

/// Output surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas. Both dimensions must be in `1..=u16::MAX`.
    pub fn new(width: u32, height: u32) -> GlowResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    /// Check that the canvas fits the raster backends.
    pub fn validate(self) -> GlowResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GlowError::validation("canvas width/height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(GlowError::validation("canvas width/height must fit in u16"));
        }
        Ok(())
    }

    /// Number of bytes in a tightly packed RGBA8 surface of this size.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Per-frame inputs shared by every session drawn in that frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    /// Wall-clock time in seconds, fed to time-varying profiles.
    pub time_s: f64,
    /// Translation applied to world positions to land in screen space
    /// (usually the negated camera position).
    pub translation: Vec2,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            time_s: 0.0,
            translation: Vec2::ZERO,
        }
    }
}

impl FrameParams {
    /// Frame parameters at `time_s` with no camera offset.
    pub fn at(time_s: f64) -> Self {
        Self {
            time_s,
            ..Self::default()
        }
    }

    /// Return a copy translated so that `camera` maps to the screen origin.
    pub fn with_camera(mut self, camera: Point) -> Self {
        self.translation = -camera.to_vec2();
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
