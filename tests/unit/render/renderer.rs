use super::*;
use crate::foundation::color::ColorF;
use crate::foundation::error::GlowError;
use crate::mesh::buffer::Vertex;
use crate::profile::color::ColorProfile;
use crate::profile::width::WidthProfile;
use crate::render::device::{CullMode, DeviceCaps};
use crate::render::passes::PassStack;

struct DrawRecord {
    path: DrawPath,
    blend: BlendState,
    strip_width: f64,
    peak_red: f32,
    vertex_count: usize,
}

struct RecordingDevice {
    shader: bool,
    fail_draws: bool,
    state: PipelineState,
    calls: Vec<&'static str>,
    draws: Vec<DrawRecord>,
}

impl RecordingDevice {
    fn new(shader: bool) -> Self {
        Self {
            shader,
            fail_draws: false,
            state: PipelineState {
                blend: BlendState::Opaque,
                sampler: SamplerState::default(),
                rasterizer: RasterizerState {
                    cull: CullMode::Clockwise,
                    scissor: None,
                },
            },
            calls: Vec::new(),
            draws: Vec::new(),
        }
    }
}

impl GraphicsDevice for RecordingDevice {
    fn capabilities(&self) -> DeviceCaps {
        DeviceCaps {
            shader_available: self.shader,
        }
    }

    fn pipeline_state(&self) -> PipelineState {
        self.state
    }

    fn set_pipeline_state(&mut self, state: PipelineState) {
        self.calls.push("set_pipeline_state");
        self.state = state;
    }

    fn draw_indexed(
        &mut self,
        vertices: &[Vertex],
        indices: &[u32],
        path: DrawPath,
    ) -> GlowResult<()> {
        self.calls.push("draw_indexed");
        if self.fail_draws {
            return Err(GlowError::unavailable("device lost"));
        }
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        let strip_width = vertices
            .chunks_exact(2)
            .map(|p| p[0].position.distance(p[1].position))
            .fold(0.0, f64::max);
        let peak_red = vertices.iter().map(|v| v.color.r).fold(0.0, f32::max);
        self.draws.push(DrawRecord {
            path,
            blend: self.state.blend,
            strip_width,
            peak_red,
            vertex_count: vertices.len(),
        });
        Ok(())
    }
}

fn line(n: usize) -> Vec<Point> {
    (0..n).map(|i| Point::new(10.0 * i as f64, 20.0)).collect()
}

fn style() -> StyleConfig {
    StyleConfig::default()
        .with_width(WidthProfile::quadratic_bump(10.0))
        .with_color(ColorProfile::solid(ColorF::rgba(1.0, 1.0, 1.0, 1.0)))
        .with_passes(PassStack::intense())
        .with_resolution(33)
}

#[test]
fn passes_draw_widest_dimmest_first_under_additive_blend() {
    let mut dev = RecordingDevice::new(true);
    let mut r = MultiPassRenderer::new(&dev, RendererOpts::default());
    let outcome = r
        .render_strip(&mut dev, &line(6), &style(), FrameParams::default())
        .unwrap();

    assert_eq!(
        outcome,
        StripOutcome::Drawn {
            passes: 5,
            triangles: 64
        }
    );
    assert_eq!(dev.draws.len(), 5);
    assert!(dev.draws.iter().all(|d| d.blend == BlendState::Additive));
    assert!(dev.draws.iter().all(|d| d.path == DrawPath::Shaded));
    assert!(dev.draws.iter().all(|d| d.vertex_count == 66));
    for w in dev.draws.windows(2) {
        assert!(w[0].strip_width > w[1].strip_width);
        assert!(w[0].peak_red < w[1].peak_red);
    }
}

#[test]
fn pipeline_state_is_restored() {
    let mut dev = RecordingDevice::new(true);
    let before = dev.state;
    let mut r = MultiPassRenderer::new(&dev, RendererOpts::default());
    r.render_strip(&mut dev, &line(4), &style(), FrameParams::default())
        .unwrap();
    assert_eq!(dev.state, before);
    assert_eq!(dev.calls.first(), Some(&"set_pipeline_state"));
    assert_eq!(dev.calls.last(), Some(&"set_pipeline_state"));
}

#[test]
fn pipeline_state_is_restored_when_a_draw_fails() {
    let mut dev = RecordingDevice::new(true);
    dev.fail_draws = true;
    let before = dev.state;
    let mut r = MultiPassRenderer::new(&dev, RendererOpts::default());
    let err = r
        .render_strip(&mut dev, &line(4), &style(), FrameParams::default())
        .unwrap_err();
    assert!(matches!(err, GlowError::ResourceUnavailable(_)));
    assert_eq!(dev.state, before);
    assert_eq!(dev.calls, ["set_pipeline_state", "draw_indexed", "set_pipeline_state"]);
}

#[test]
fn degenerate_paths_are_skipped_without_touching_the_device() {
    let mut dev = RecordingDevice::new(true);
    let mut r = MultiPassRenderer::new(&dev, RendererOpts::default());
    for pts in [Vec::new(), line(1)] {
        let outcome = r
            .render_strip(&mut dev, &pts, &style(), FrameParams::default())
            .unwrap();
        assert_eq!(outcome, StripOutcome::Skipped);
    }
    assert!(dev.calls.is_empty());
}

#[test]
fn missing_shader_selects_fixed_function_once() {
    let mut dev = RecordingDevice::new(false);
    let mut r = MultiPassRenderer::new(&dev, RendererOpts::default());
    assert_eq!(r.draw_path(), DrawPath::FixedFunction);
    dev.shader = true;
    r.render_strip(&mut dev, &line(3), &style(), FrameParams::default())
        .unwrap();
    assert!(dev.draws.iter().all(|d| d.path == DrawPath::FixedFunction));
}

#[test]
fn zero_resolution_draws_raw_points() {
    let mut dev = RecordingDevice::new(true);
    let mut r = MultiPassRenderer::new(&dev, RendererOpts::default());
    let s = style().with_resolution(0);
    r.render_strip(&mut dev, &line(7), &s, FrameParams::default())
        .unwrap();
    assert!(dev.draws.iter().all(|d| d.vertex_count == 14));
}

#[test]
fn resolution_is_clamped_to_scratch_capacity() {
    let mut dev = RecordingDevice::new(true);
    let mut r = MultiPassRenderer::new(&dev, RendererOpts { max_points: 16 });
    let s = style().with_resolution(500);
    r.render_strip(&mut dev, &line(5), &s, FrameParams::default())
        .unwrap();
    assert!(dev.draws.iter().all(|d| d.vertex_count == 32));

    dev.draws.clear();
    let raw = style().with_resolution(0);
    r.render_strip(&mut dev, &line(40), &raw, FrameParams::default())
        .unwrap();
    assert!(dev.draws.iter().all(|d| d.vertex_count == 32));
}
