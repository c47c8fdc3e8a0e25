use crate::foundation::core::{FrameParams, Point};
use crate::foundation::error::GlowResult;
use crate::mesh::buffer::MeshBuffer;
use crate::mesh::builder::{MeshBuilder, StripShading};
use crate::path::spline::SplineSmoother;
use crate::render::device::{
    BlendState, DrawPath, GraphicsDevice, PipelineState, RasterizerState, SamplerState,
};
use crate::session::config::StyleConfig;

/// Renderer sizing options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RendererOpts {
    /// Upper bound on points per strip after smoothing. Scratch buffers are sized from this once.
    pub max_points: usize,
}

impl Default for RendererOpts {
    fn default() -> Self {
        Self { max_points: 256 }
    }
}

/// Scratch memory reused by every strip a renderer draws.
///
/// Contents are only meaningful during a single `render_strip` call.
#[derive(Debug)]
pub struct RenderScratch {
    smoothed: Vec<Point>,
    mesh: MeshBuffer,
}

impl RenderScratch {
    /// Allocate scratch for strips of up to `max_points` points.
    pub fn new(max_points: usize) -> Self {
        let max_points = max_points.max(2);
        Self {
            smoothed: Vec::with_capacity(max_points),
            mesh: MeshBuffer::new(max_points),
        }
    }

    /// Point capacity.
    pub fn max_points(&self) -> usize {
        self.mesh.max_points()
    }
}

/// What one `render_strip` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StripOutcome {
    /// Too few points; nothing was drawn.
    Skipped,
    /// The strip was drawn.
    Drawn {
        /// Draw calls issued.
        passes: usize,
        /// Triangles per pass.
        triangles: usize,
    },
}

/// Draws smoothed strips as ordered additive bloom/core passes.
#[derive(Debug)]
pub struct MultiPassRenderer {
    draw_path: DrawPath,
    smoother: SplineSmoother,
    builder: MeshBuilder,
    scratch: RenderScratch,
}

impl MultiPassRenderer {
    /// Probe `device` once and allocate scratch buffers.
    pub fn new<D: GraphicsDevice + ?Sized>(device: &D, opts: RendererOpts) -> Self {
        let caps = device.capabilities();
        let draw_path = if caps.shader_available {
            DrawPath::Shaded
        } else {
            tracing::warn!("strip shader unavailable, falling back to fixed-function drawing");
            DrawPath::FixedFunction
        };
        Self {
            draw_path,
            smoother: SplineSmoother,
            builder: MeshBuilder,
            scratch: RenderScratch::new(opts.max_points),
        }
    }

    /// Draw path chosen at construction.
    pub fn draw_path(&self) -> DrawPath {
        self.draw_path
    }

    /// Scratch capacity in points.
    pub fn max_points(&self) -> usize {
        self.scratch.max_points()
    }

    /// Render one strip through `points` with every pass of `style`.
    ///
    /// The device pipeline state is restored before returning, on success and on error.
    pub fn render_strip<D: GraphicsDevice + ?Sized>(
        &mut self,
        device: &mut D,
        points: &[Point],
        style: &StyleConfig,
        frame: FrameParams,
    ) -> GlowResult<StripOutcome> {
        if points.len() < 2 {
            tracing::trace!(points = points.len(), "strip skipped: degenerate path");
            return Ok(StripOutcome::Skipped);
        }

        let saved = device.pipeline_state();
        device.set_pipeline_state(PipelineState {
            blend: BlendState::Additive,
            sampler: SamplerState::LINEAR_WRAP_U,
            rasterizer: RasterizerState::CULL_NONE,
        });
        let result = self.draw_passes(device, points, style, frame);
        device.set_pipeline_state(saved);
        result
    }

    fn draw_passes<D: GraphicsDevice + ?Sized>(
        &mut self,
        device: &mut D,
        points: &[Point],
        style: &StyleConfig,
        frame: FrameParams,
    ) -> GlowResult<StripOutcome> {
        let RenderScratch { smoothed, mesh } = &mut self.scratch;
        let cap = mesh.max_points();
        let target = match style.resolution {
            0 => points.len(),
            r => r,
        }
        .min(cap);

        if style.resolution == 0 && points.len() <= cap {
            smoothed.clear();
            smoothed.extend_from_slice(points);
        } else {
            self.smoother.resample_into(points, target, smoothed)?;
        }

        let scroll = frame.time_s * style.scroll_speed;
        let mut drawn = 0;
        let mut triangles = 0;
        for pass in style.passes.passes() {
            let shading = StripShading {
                width: &style.width,
                width_mul: style.width_scale * pass.width_mul,
                color: &style.color,
                opacity: pass.opacity_mul,
                scroll,
                time_s: frame.time_s,
                translation: frame.translation,
            };
            self.builder.build_into(smoothed, &shading, mesh)?;
            if mesh.is_empty() {
                continue;
            }
            triangles = mesh.triangle_count();
            device.draw_indexed(mesh.vertices(), mesh.indices(), self.draw_path)?;
            drawn += 1;
        }
        if drawn == 0 {
            return Ok(StripOutcome::Skipped);
        }
        Ok(StripOutcome::Drawn {
            passes: drawn,
            triangles,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
