use super::*;
use crate::foundation::color::ColorF;
use crate::foundation::core::Canvas;
use crate::foundation::error::GlowError;
use crate::mesh::buffer::Vertex;
use crate::profile::color::ColorProfile;
use crate::profile::width::WidthProfile;
use crate::render::cpu::{CpuDevice, CpuDeviceOpts};
use crate::render::device::{DeviceCaps, DrawPath, PipelineState};

fn glow_style() -> StyleConfig {
    StyleConfig::default()
        .with_width(WidthProfile::quadratic_bump(6.0))
        .with_color(ColorProfile::solid(ColorF::rgba(1.0, 0.6, 0.2, 1.0)))
}

fn device(size: u32) -> CpuDevice {
    CpuDevice::new(Canvas::new(size, size).unwrap(), CpuDeviceOpts::default()).unwrap()
}

#[test]
fn trail_loop_lights_pixels_along_the_path() {
    let mut dev = device(64);
    let mut sys = GlowSystem::new(&dev, RegistryOpts::default(), RendererOpts::default());
    let id = sys.begin_session(OwnerId(1), glow_style()).unwrap();
    for i in 0..12 {
        sys.update_session(id, Point::new(8.0 + 4.0 * i as f64, 32.0), 0.0)
            .unwrap();
        sys.tick();
    }
    let report = sys.render_frame(&mut dev, FrameParams::default());
    assert_eq!(report.sessions, 1);
    assert_eq!(report.drawn, 1);
    assert_eq!(report.draw_calls, 4);
    assert_eq!(report.failed, 0);

    let mid = dev.pixel(30, 32).unwrap();
    assert!(mid[0] > mid[2], "{mid:?}");
    assert_eq!(dev.pixel(30, 5), Some([0, 0, 0, 0]));
}

#[test]
fn sessions_without_points_are_skipped() {
    let mut dev = device(16);
    let mut sys = GlowSystem::new(&dev, RegistryOpts::default(), RendererOpts::default());
    sys.begin_session(OwnerId(1), glow_style()).unwrap();
    let report = sys.render_frame(&mut dev, FrameParams::default());
    assert_eq!(report.skipped, 1);
    assert_eq!(report.drawn, 0);
}

struct FlakyDevice {
    state: PipelineState,
    draws: usize,
}

impl GraphicsDevice for FlakyDevice {
    fn capabilities(&self) -> DeviceCaps {
        DeviceCaps {
            shader_available: true,
        }
    }

    fn pipeline_state(&self) -> PipelineState {
        self.state
    }

    fn set_pipeline_state(&mut self, state: PipelineState) {
        self.state = state;
    }

    fn draw_indexed(
        &mut self,
        _vertices: &[Vertex],
        _indices: &[u32],
        _path: DrawPath,
    ) -> GlowResult<()> {
        self.draws += 1;
        if self.draws == 1 {
            return Err(GlowError::unavailable("transient failure"));
        }
        Ok(())
    }
}

#[test]
fn one_failing_session_does_not_stop_the_frame() {
    let mut dev = FlakyDevice {
        state: PipelineState::default(),
        draws: 0,
    };
    let mut sys = GlowSystem::new(&dev, RegistryOpts::default(), RendererOpts::default());
    for owner in 0..2 {
        let id = sys.begin_session(OwnerId(owner), glow_style()).unwrap();
        sys.update_session(id, Point::new(0.0, 0.0), 0.0).unwrap();
        sys.update_session(id, Point::new(20.0, 0.0), 0.0).unwrap();
    }
    let report = sys.render_frame(&mut dev, FrameParams::default());
    assert_eq!(report.failed, 1);
    assert_eq!(report.drawn, 1);
    assert_eq!(dev.state, PipelineState::default());
}

#[test]
fn static_arc_is_drawn_without_a_session() {
    let mut dev = device(64);
    let mut sys = GlowSystem::new(&dev, RegistryOpts::default(), RendererOpts::default());
    let outcome = sys
        .render_static_arc(
            &mut dev,
            Point::new(32.0, 32.0),
            0.0,
            std::f64::consts::PI,
            20.0,
            &glow_style(),
            FrameParams::default(),
        )
        .unwrap();
    assert!(matches!(outcome, StripOutcome::Drawn { passes: 4, .. }));
    assert!(sys.registry().is_empty());
    assert_ne!(dev.pixel(32, 52), Some([0, 0, 0, 0]));
    assert_eq!(dev.pixel(32, 32), Some([0, 0, 0, 0]));
    assert_eq!(dev.pixel(32, 12), Some([0, 0, 0, 0]));
}

#[test]
fn camera_translation_shifts_the_frame() {
    let mut dev = device(64);
    let mut sys = GlowSystem::new(&dev, RegistryOpts::default(), RendererOpts::default());
    let id = sys.begin_session(OwnerId(3), glow_style()).unwrap();
    for i in 0..10 {
        sys.update_session(id, Point::new(1000.0 + 4.0 * i as f64, 500.0), 0.0)
            .unwrap();
    }
    let frame = FrameParams::default().with_camera(Point::new(980.0, 468.0));
    sys.render_frame(&mut dev, frame);
    assert_ne!(dev.pixel(38, 32), Some([0, 0, 0, 0]));
}
