use crate::foundation::error::GlowResult;
use crate::mesh::buffer::Vertex;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are premultiplied alpha; the flag keeps that explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// How source fragments combine with the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendState {
    /// `dst + src`, saturating. Source alpha is ignored.
    Additive,
    /// Premultiplied source-over.
    #[default]
    AlphaBlend,
    /// Source replaces destination.
    Opaque,
}

/// Texel filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    /// Nearest texel.
    Point,
    /// Linear blend of neighbouring texels.
    #[default]
    Linear,
}

/// Texture coordinate addressing outside `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressMode {
    /// Repeat the texture.
    Wrap,
    /// Clamp to the edge texel.
    #[default]
    Clamp,
}

/// Sampler state for strip textures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SamplerState {
    /// Filtering mode.
    pub filter: Filter,
    /// Addressing mode along `u`.
    pub address_u: AddressMode,
    /// Addressing mode along `v`.
    pub address_v: AddressMode,
}

impl SamplerState {
    /// Linear filtering, wrapping along the strip and clamping across it.
    pub const LINEAR_WRAP_U: Self = Self {
        filter: Filter::Linear,
        address_u: AddressMode::Wrap,
        address_v: AddressMode::Clamp,
    };
}

/// Triangle face culling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CullMode {
    /// Draw both windings.
    #[default]
    None,
    /// Drop clockwise triangles (screen space, y down).
    Clockwise,
    /// Drop counter-clockwise triangles.
    CounterClockwise,
}

/// Integer pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScissorRect {
    /// Left edge (inclusive).
    pub x0: u32,
    /// Top edge (inclusive).
    pub y0: u32,
    /// Right edge (exclusive).
    pub x1: u32,
    /// Bottom edge (exclusive).
    pub y1: u32,
}

/// Rasterizer state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterizerState {
    /// Face culling.
    pub cull: CullMode,
    /// Optional clip rectangle.
    pub scissor: Option<ScissorRect>,
}

impl RasterizerState {
    /// No culling, no scissor.
    pub const CULL_NONE: Self = Self {
        cull: CullMode::None,
        scissor: None,
    };
}

/// The device state a renderer may mutate and must restore.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineState {
    /// Blend state.
    pub blend: BlendState,
    /// Sampler state.
    pub sampler: SamplerState,
    /// Rasterizer state.
    pub rasterizer: RasterizerState,
}

/// Result of the one-time capability probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceCaps {
    /// Whether the textured/shaded draw path can be used.
    pub shader_available: bool,
}

/// Which draw path a draw call uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawPath {
    /// Per-vertex color interpolation plus strip texture.
    Shaded,
    /// Flat-colored triangles without texture.
    FixedFunction,
}

/// Graphics boundary consumed by [`crate::MultiPassRenderer`].
///
/// Implementations own their render target. Draw calls read the current pipeline state.
pub trait GraphicsDevice {
    /// Report optional capabilities. Renderers call this once at construction.
    fn capabilities(&self) -> DeviceCaps;

    /// Snapshot the current pipeline state.
    fn pipeline_state(&self) -> PipelineState;

    /// Replace the current pipeline state.
    fn set_pipeline_state(&mut self, state: PipelineState);

    /// Draw an indexed triangle list.
    fn draw_indexed(
        &mut self,
        vertices: &[Vertex],
        indices: &[u32],
        path: DrawPath,
    ) -> GlowResult<()>;
}
