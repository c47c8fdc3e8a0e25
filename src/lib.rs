//! glowstrip renders glowing beams, trails and ribbons as procedural triangle-strip meshes.
//!
//! Each frame, every live path session turns its control points into pixels:
//!
//! 1. **Control points**: anchor history (trails) or a straight segment (beams), newest first
//! 2. **Smooth**: Catmull-Rom resampling to the style's resolution ([`SplineSmoother`])
//! 3. **Mesh**: a two-vertex-per-point strip shaped by a [`WidthProfile`] and tinted by a
//!    [`ColorProfile`] ([`MeshBuilder`])
//! 4. **Draw**: 3 to 5 additive passes, wide faint bloom first and narrow bright core last
//!    ([`MultiPassRenderer`])
//!
//! The [`Registry`] owns sessions under a hard cap and fades them out after they end;
//! [`GlowSystem`] ties registry and renderer together. Drawing goes through the
//! [`GraphicsDevice`] trait; [`CpuDevice`] is the bundled software implementation.
//!
//! Key constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No per-frame allocation**: scratch buffers are sized once and reused.
//! - **Premultiplied RGBA8** end-to-end on the software device.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod mesh;
mod path;
mod profile;
mod render;
mod scene;
mod session;
mod system;

pub use crate::foundation::color::ColorF;
pub use crate::foundation::core::{Canvas, FrameParams, Point, Vec2};
pub use crate::foundation::error::{GlowError, GlowResult};

pub use crate::mesh::buffer::{MeshBuffer, Vertex};
pub use crate::mesh::builder::{MeshBuilder, StripShading};
pub use crate::path::control::{
    ControlFrame, PointHistory, Sample, arc_points, resolve_frame, segment_points,
};
pub use crate::path::spline::SplineSmoother;
pub use crate::profile::color::{ColorProfile, Palette};
pub use crate::profile::width::{WidthProfile, sanitize_width};
pub use crate::render::composite::PremulRgba8;
pub use crate::render::cpu::{CpuDevice, CpuDeviceOpts};
pub use crate::render::device::{
    AddressMode, BlendState, CullMode, DeviceCaps, DrawPath, Filter, FrameRGBA, GraphicsDevice,
    PipelineState, RasterizerState, SamplerState, ScissorRect,
};
pub use crate::render::passes::{MAX_PASSES, MIN_PASSES, PassSpec, PassStack};
pub use crate::render::renderer::{MultiPassRenderer, RenderScratch, RendererOpts, StripOutcome};
pub use crate::render::texture::StripTexture;
pub use crate::scene::script::{Scene, SceneArc, SceneFrame, SceneSession, SceneTexture};
pub use crate::scene::track::{Ease, Keyframe, Track};
pub use crate::session::config::{MAX_STYLE_POINTS, PathSource, RegistryOpts, StyleConfig};
pub use crate::session::path_session::{OwnerId, PathSession, SessionId, SessionState};
pub use crate::session::registry::Registry;
pub use crate::system::{FrameReport, GlowSystem};
