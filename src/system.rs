use crate::foundation::core::{FrameParams, Point};
use crate::foundation::error::GlowResult;
use crate::path::control::arc_points;
use crate::render::device::GraphicsDevice;
use crate::render::renderer::{MultiPassRenderer, RendererOpts, StripOutcome};
use crate::session::config::{RegistryOpts, StyleConfig};
use crate::session::path_session::{OwnerId, SessionId};
use crate::session::registry::Registry;

/// Per-frame render summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Sessions visited.
    pub sessions: usize,
    /// Sessions that produced at least one draw.
    pub drawn: usize,
    /// Sessions with fewer than two points.
    pub skipped: usize,
    /// Sessions whose render returned an error.
    pub failed: usize,
    /// Draw calls issued across all sessions.
    pub draw_calls: usize,
}

/// Registry plus renderer: the full update/render loop for glowing strips.
///
/// Call order per frame: `update_session` for every tracked owner, `tick`, then `render_frame`.
#[derive(Debug)]
pub struct GlowSystem {
    registry: Registry,
    renderer: MultiPassRenderer,
    control: Vec<Point>,
}

impl GlowSystem {
    /// Build a system for `device`, probing its capabilities once.
    pub fn new<D: GraphicsDevice + ?Sized>(
        device: &D,
        registry: RegistryOpts,
        renderer: RendererOpts,
    ) -> Self {
        let renderer = MultiPassRenderer::new(device, renderer);
        let control = Vec::with_capacity(renderer.max_points());
        Self {
            registry: Registry::new(registry),
            renderer,
            control,
        }
    }

    /// Session registry (read-only).
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Renderer (read-only).
    pub fn renderer(&self) -> &MultiPassRenderer {
        &self.renderer
    }

    /// Start (or resume) the session for `owner`.
    pub fn begin_session(&mut self, owner: OwnerId, style: StyleConfig) -> GlowResult<SessionId> {
        self.registry.begin_session(owner, style)
    }

    /// Feed this tick's anchor position and heading (radians).
    pub fn update_session(
        &mut self,
        session: SessionId,
        position: Point,
        heading: f64,
    ) -> GlowResult<()> {
        self.registry.update_session(session, position, heading)
    }

    /// Start fading a session.
    pub fn end_session(&mut self, session: SessionId) -> GlowResult<()> {
        self.registry.end_session(session)
    }

    /// Advance one logic tick.
    pub fn tick(&mut self) {
        self.registry.tick();
    }

    /// Render every live session in registry order.
    ///
    /// A failing session is logged and counted; the remaining sessions still render.
    #[tracing::instrument(skip(self, device), fields(sessions = self.registry.len()))]
    pub fn render_frame<D: GraphicsDevice + ?Sized>(
        &mut self,
        device: &mut D,
        frame: FrameParams,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        for session in self.registry.iter() {
            report.sessions += 1;
            let outcome = session
                .control_points_into(&mut self.control)
                .and_then(|()| {
                    self.renderer
                        .render_strip(device, &self.control, session.style(), frame)
                });
            match outcome {
                Ok(StripOutcome::Drawn { passes, .. }) => {
                    report.drawn += 1;
                    report.draw_calls += passes;
                }
                Ok(StripOutcome::Skipped) => report.skipped += 1,
                Err(e) if e.is_degenerate() => {
                    tracing::trace!(session = session.id().0, "session skipped: {e}");
                    report.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(session = session.id().0, error = %e, "session render failed");
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Draw a one-shot arc that is not tracked by the registry.
    ///
    /// Angles are in radians; the arc is sampled with `style.max_points` control points.
    #[allow(clippy::too_many_arguments)]
    pub fn render_static_arc<D: GraphicsDevice + ?Sized>(
        &mut self,
        device: &mut D,
        center: Point,
        start_angle: f64,
        end_angle: f64,
        radius: f64,
        style: &StyleConfig,
        frame: FrameParams,
    ) -> GlowResult<StripOutcome> {
        style.validate()?;
        arc_points(
            center,
            start_angle,
            end_angle,
            radius,
            style.max_points,
            &mut self.control,
        )?;
        self.renderer
            .render_strip(device, &self.control, style, frame)
    }
}

#[cfg(test)]
#[path = "../tests/unit/system.rs"]
mod tests;
