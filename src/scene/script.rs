use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::color::ColorF;
use crate::foundation::core::{Canvas, FrameParams, Point};
use crate::foundation::error::{GlowError, GlowResult};
use crate::render::cpu::{CpuDevice, CpuDeviceOpts};
use crate::render::device::FrameRGBA;
use crate::render::renderer::RendererOpts;
use crate::render::texture::StripTexture;
use crate::scene::track::Track;
use crate::session::config::{RegistryOpts, StyleConfig};
use crate::session::path_session::{OwnerId, SessionId};
use crate::system::{FrameReport, GlowSystem};

/// Strip texture selection for a scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneTexture {
    /// Untextured strips.
    #[default]
    White,
    /// Strips that fade toward both edges.
    SoftEdge {
        /// Texels across the strip.
        height: u32,
    },
}

impl SceneTexture {
    fn build(self) -> StripTexture {
        match self {
            Self::White => StripTexture::white(),
            Self::SoftEdge { height } => StripTexture::soft_edge(height),
        }
    }
}

/// One scripted trail or beam.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneSession {
    /// Owner the session is registered under.
    pub owner: OwnerId,
    /// Session style.
    #[serde(default)]
    pub style: StyleConfig,
    /// Anchor motion.
    pub track: Track,
    /// Tick at which the session begins.
    #[serde(default)]
    pub start_tick: u64,
    /// Tick at which the session starts fading, if any.
    #[serde(default)]
    pub end_tick: Option<u64>,
}

/// A one-shot arc drawn on top of the sessions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneArc {
    /// Arc center.
    pub center: Point,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
    /// Arc radius.
    pub radius: f64,
    /// Arc style.
    #[serde(default)]
    pub style: StyleConfig,
}

/// Rendered scene output.
#[derive(Clone, Debug)]
pub struct SceneFrame {
    /// Premultiplied RGBA8 pixels.
    pub frame: FrameRGBA,
    /// Session counts for the rendered frame.
    pub report: FrameReport,
}

fn default_ticks_per_second() -> f64 {
    60.0
}

fn default_shader() -> bool {
    true
}

/// JSON scene script: scripted sessions replayed tick by tick on a software device.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Output size.
    pub canvas: Canvas,
    /// Clear color; transparent when absent.
    #[serde(default)]
    pub clear: Option<ColorF>,
    /// Logic rate used to derive frame time.
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: f64,
    /// Registry cap; falls back to `GLOWSTRIP_MAX_SESSIONS` or the default.
    #[serde(default)]
    pub max_sessions: Option<usize>,
    /// Whether the device reports the shaded path.
    #[serde(default = "default_shader")]
    pub shader: bool,
    /// Strip texture.
    #[serde(default)]
    pub texture: SceneTexture,
    /// World position mapped to the top-left of the canvas.
    #[serde(default)]
    pub camera: Option<Point>,
    /// Scripted sessions.
    #[serde(default)]
    pub sessions: Vec<SceneSession>,
    /// Static arcs.
    #[serde(default)]
    pub arcs: Vec<SceneArc>,
}

impl Scene {
    /// Load and validate a scene from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> GlowResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GlowError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Load and validate a scene from a JSON reader.
    pub fn from_reader(reader: impl Read) -> GlowResult<Self> {
        let scene: Self = serde_json::from_reader(reader)
            .map_err(|e| GlowError::serde(format!("parse scene JSON: {e}")))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load and validate a scene from a JSON string.
    pub fn from_json_str(json: &str) -> GlowResult<Self> {
        let scene: Self = serde_json::from_str(json)
            .map_err(|e| GlowError::serde(format!("parse scene JSON: {e}")))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Check every scripted part of the scene.
    pub fn validate(&self) -> GlowResult<()> {
        self.canvas.validate()?;
        if !(self.ticks_per_second.is_finite() && self.ticks_per_second > 0.0) {
            return Err(GlowError::validation("ticks_per_second must be finite and > 0"));
        }
        if self.max_sessions == Some(0) {
            return Err(GlowError::validation("max_sessions must be > 0"));
        }
        if let SceneTexture::SoftEdge { height } = self.texture
            && height < 3
        {
            return Err(GlowError::validation("soft_edge texture height must be >= 3"));
        }
        if let Some(c) = self.camera
            && !(c.x.is_finite() && c.y.is_finite())
        {
            return Err(GlowError::validation("camera must be finite"));
        }
        for (i, s) in self.sessions.iter().enumerate() {
            s.style
                .validate()
                .map_err(|e| GlowError::validation(format!("sessions[{i}]: {e}")))?;
            s.track
                .validate()
                .map_err(|e| GlowError::validation(format!("sessions[{i}]: {e}")))?;
            if s.end_tick.is_some_and(|end| end < s.start_tick) {
                return Err(GlowError::validation(format!(
                    "sessions[{i}]: end_tick precedes start_tick"
                )));
            }
        }
        for (i, a) in self.arcs.iter().enumerate() {
            a.style
                .validate()
                .map_err(|e| GlowError::validation(format!("arcs[{i}]: {e}")))?;
            let finite = [a.center.x, a.center.y, a.start_angle, a.end_angle, a.radius]
                .iter()
                .all(|v| v.is_finite());
            if !finite || a.radius <= 0.0 {
                return Err(GlowError::validation(format!(
                    "arcs[{i}]: geometry must be finite with radius > 0"
                )));
            }
        }
        Ok(())
    }

    /// Last tick at which anything in the scene changes.
    pub fn last_tick(&self) -> u64 {
        self.sessions
            .iter()
            .flat_map(|s| {
                let last_key = s.track.keys().last().map(|k| k.tick).unwrap_or(0);
                [s.start_tick, last_key, s.end_tick.unwrap_or(0)]
            })
            .max()
            .unwrap_or(0)
    }

    /// Replay ticks `0..=tick` and render the state at `tick`.
    pub fn render(&self, tick: u64) -> GlowResult<SceneFrame> {
        let mut opts = CpuDeviceOpts::default().with_strip_texture(self.texture.build());
        if let Some(clear) = self.clear {
            opts = opts.with_clear_rgba(clear.to_rgba8());
        }
        if !self.shader {
            opts = opts.without_shader();
        }
        let mut device = CpuDevice::new(self.canvas, opts)?;

        let registry = self
            .max_sessions
            .map(|max_sessions| RegistryOpts { max_sessions })
            .unwrap_or_else(RegistryOpts::from_env);
        let mut system = GlowSystem::new(&device, registry, self.renderer_opts());

        let mut ids: Vec<Option<SessionId>> = vec![None; self.sessions.len()];
        for t in 0..=tick {
            for (script, slot) in self.sessions.iter().zip(ids.iter_mut()) {
                if t == script.start_tick {
                    *slot = Some(system.begin_session(script.owner, script.style.clone())?);
                }
                let Some(id) = *slot else { continue };
                if t < script.start_tick || script.end_tick.is_some_and(|end| t > end) {
                    continue;
                }
                let step = match script.track.sample(t) {
                    Some((position, heading)) => system.update_session(id, position, heading),
                    None => Ok(()),
                };
                let step = step.and_then(|()| {
                    if script.end_tick == Some(t) {
                        system.end_session(id)
                    } else {
                        Ok(())
                    }
                });
                match step {
                    Ok(()) => {}
                    Err(GlowError::UnknownSession(raw)) => {
                        tracing::debug!(
                            owner = script.owner.0,
                            session = raw,
                            "scripted session gone"
                        );
                        *slot = None;
                    }
                    Err(e) => return Err(e),
                }
            }
            if t < tick {
                system.tick();
            }
        }

        let mut frame = FrameParams::at(tick as f64 / self.ticks_per_second);
        if let Some(camera) = self.camera {
            frame = frame.with_camera(camera);
        }
        let report = system.render_frame(&mut device, frame);
        for arc in &self.arcs {
            system.render_static_arc(
                &mut device,
                arc.center,
                arc.start_angle,
                arc.end_angle,
                arc.radius,
                &arc.style,
                frame,
            )?;
        }

        Ok(SceneFrame {
            frame: device.readback(),
            report,
        })
    }

    fn renderer_opts(&self) -> RendererOpts {
        let styles = self
            .sessions
            .iter()
            .map(|s| &s.style)
            .chain(self.arcs.iter().map(|a| &a.style));
        let needed = styles
            .map(|s| s.resolution.max(s.max_points))
            .max()
            .unwrap_or(0);
        let defaults = RendererOpts::default();
        RendererOpts {
            max_points: defaults.max_points.max(needed),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/script.rs"]
mod tests;
