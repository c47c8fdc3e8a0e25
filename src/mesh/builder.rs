use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::GlowResult;
use crate::mesh::buffer::{MeshBuffer, Vertex};
use crate::path::control::resolve_frame;
use crate::profile::color::ColorProfile;
use crate::profile::width::{WidthProfile, sanitize_width};

/// Everything the builder needs besides the points.
#[derive(Clone, Copy, Debug)]
pub struct StripShading<'a> {
    /// Width profile, evaluated per point.
    pub width: &'a WidthProfile,
    /// Multiplier applied to the profile output (base width scale times pass multiplier).
    pub width_mul: f64,
    /// Color profile, evaluated per point.
    pub color: &'a ColorProfile,
    /// Opacity folded into RGB by the additive transform.
    pub opacity: f32,
    /// Texture/color scroll offset.
    pub scroll: f64,
    /// Frame time for time-varying profiles.
    pub time_s: f64,
    /// World-to-screen translation.
    pub translation: Vec2,
}

/// Turns an ordered point sequence into a two-vertices-per-point triangle strip.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshBuilder;

impl MeshBuilder {
    /// Build the strip for `points` into `out`, replacing its previous contents.
    ///
    /// Fewer than two points leave `out` empty. Widths are clamped to `>= 0` after the multiplier
    /// is applied.
    pub fn build_into(
        &self,
        points: &[Point],
        shading: &StripShading<'_>,
        out: &mut MeshBuffer,
    ) -> GlowResult<()> {
        out.clear();
        let n = points.len();
        if n < 2 {
            return Ok(());
        }
        out.check_fits(n)?;

        let mut fallback = Vec2::new(1.0, 0.0);
        for (i, p) in points.iter().enumerate() {
            let frame = resolve_frame(points, i, fallback);
            fallback = frame.tangent;

            let w = sanitize_width(
                shading.width.eval(frame.ratio, shading.time_s) * shading.width_mul,
            );
            let color = shading
                .color
                .eval(frame.ratio, shading.scroll, shading.time_s)
                .to_additive(shading.opacity);

            let center = *p + shading.translation;
            let offset = frame.normal * (w * 0.5);
            let u = frame.ratio + shading.scroll;
            out.push_pair(
                Vertex {
                    position: center + offset,
                    color,
                    uv: (u, 0.0),
                },
                Vertex {
                    position: center - offset,
                    color,
                    uv: (u, 1.0),
                },
            );
        }
        for i in 0..(n - 1) as u32 {
            out.push_quad(i);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/builder.rs"]
mod tests;
