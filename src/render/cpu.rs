use crate::foundation::color::ColorF;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{GlowError, GlowResult};
use crate::foundation::math::unit_to_u8;
use crate::mesh::buffer::Vertex;
use crate::render::composite::{
    PremulRgba8, add_rgb_in_place, blend_pixel, over_in_place, premul_rgba8,
};
use crate::render::device::{
    BlendState, CullMode, DeviceCaps, DrawPath, FrameRGBA, GraphicsDevice, PipelineState,
    ScissorRect,
};
use crate::render::texture::StripTexture;

/// Options for [`CpuDevice`].
#[derive(Clone, Debug)]
pub struct CpuDeviceOpts {
    /// Straight RGBA8 color the target is cleared to. `None` clears to transparent.
    pub clear_rgba: Option<[u8; 4]>,
    /// Texture modulating the shaded path.
    pub strip_texture: StripTexture,
    /// Report the shaded path as available.
    pub shader_available: bool,
}

impl Default for CpuDeviceOpts {
    fn default() -> Self {
        Self {
            clear_rgba: None,
            strip_texture: StripTexture::white(),
            shader_available: true,
        }
    }
}

impl CpuDeviceOpts {
    /// Set the clear color.
    pub fn with_clear_rgba(mut self, rgba: [u8; 4]) -> Self {
        self.clear_rgba = Some(rgba);
        self
    }

    /// Set the strip texture.
    pub fn with_strip_texture(mut self, texture: StripTexture) -> Self {
        self.strip_texture = texture;
        self
    }

    /// Force the fixed-function path by reporting no shader support.
    pub fn without_shader(mut self) -> Self {
        self.shader_available = false;
        self
    }
}

/// Software [`GraphicsDevice`] rendering into a premultiplied RGBA8 `vello_cpu` pixmap.
pub struct CpuDevice {
    canvas: Canvas,
    opts: CpuDeviceOpts,
    state: PipelineState,
    target: vello_cpu::Pixmap,
    flat: Option<FlatScratch>,
}

struct FlatScratch {
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl CpuDevice {
    /// Create a device with a cleared target of `canvas` size.
    pub fn new(canvas: Canvas, opts: CpuDeviceOpts) -> GlowResult<Self> {
        canvas.validate()?;
        let (w, h) = canvas_u16(canvas)?;
        let mut device = Self {
            canvas,
            opts,
            state: PipelineState::default(),
            target: vello_cpu::Pixmap::new(w, h),
            flat: None,
        };
        device.clear();
        Ok(device)
    }

    /// Target dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Reset every target pixel to the configured clear color.
    pub fn clear(&mut self) {
        let premul = self
            .opts
            .clear_rgba
            .map(premul_rgba8)
            .unwrap_or([0, 0, 0, 0]);
        for px in self.target.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    /// Copy the target out as a premultiplied frame.
    pub fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.target.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    /// Premultiplied pixel at `(x, y)`, if inside the target.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let idx = (y as usize * self.canvas.width as usize + x as usize) * 4;
        let d = self.target.data_as_u8_slice();
        Some([d[idx], d[idx + 1], d[idx + 2], d[idx + 3]])
    }

    fn clip_rect(&self) -> ScissorRect {
        let full = ScissorRect {
            x0: 0,
            y0: 0,
            x1: self.canvas.width,
            y1: self.canvas.height,
        };
        match self.state.rasterizer.scissor {
            Some(s) => ScissorRect {
                x0: s.x0.min(full.x1),
                y0: s.y0.min(full.y1),
                x1: s.x1.min(full.x1),
                y1: s.y1.min(full.y1),
            },
            None => full,
        }
    }

    fn draw_shaded(&mut self, vertices: &[Vertex], indices: &[u32]) -> GlowResult<()> {
        let clip = self.clip_rect();
        let state = self.state;
        let width = self.canvas.width as usize;
        let texture = &self.opts.strip_texture;
        let data = self.target.data_as_u8_slice_mut();

        for tri in indices.chunks_exact(3) {
            let [a, mut b, mut c] = triangle(vertices, tri)?;
            let area = edge(a.position, b.position, c.position);
            if !area.is_finite() || area == 0.0 || culled(area, state.rasterizer.cull) {
                continue;
            }
            if area < 0.0 {
                std::mem::swap(&mut b, &mut c);
            }
            let area = area.abs();

            let Some((x0, y0, x1, y1)) = pixel_bounds(&[a.position, b.position, c.position], clip)
            else {
                continue;
            };
            for y in y0..y1 {
                for x in x0..x1 {
                    let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                    let w0 = edge(b.position, c.position, p);
                    let w1 = edge(c.position, a.position, p);
                    let w2 = edge(a.position, b.position, p);
                    if !(covers(w0, b.position, c.position)
                        && covers(w1, c.position, a.position)
                        && covers(w2, a.position, b.position))
                    {
                        continue;
                    }
                    let (l0, l1, l2) = (w0 / area, w1 / area, w2 / area);
                    let color = interpolate_color(&a.color, &b.color, &c.color, l0, l1, l2);
                    let u = a.uv.0 * l0 + b.uv.0 * l1 + c.uv.0 * l2;
                    let v = a.uv.1 * l0 + b.uv.1 * l1 + c.uv.1 * l2;
                    let t = texture.sample(u, v, state.sampler);
                    let src = [
                        unit_to_u8(color.r * t[0]),
                        unit_to_u8(color.g * t[1]),
                        unit_to_u8(color.b * t[2]),
                        unit_to_u8(color.a * t[3]),
                    ];
                    let idx = (y as usize * width + x as usize) * 4;
                    let dst = [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]];
                    data[idx..idx + 4].copy_from_slice(&blend_pixel(dst, src, state.blend));
                }
            }
        }
        Ok(())
    }

    fn draw_flat(&mut self, vertices: &[Vertex], indices: &[u32]) -> GlowResult<()> {
        let (w, h) = canvas_u16(self.canvas)?;
        let state = self.state;
        let mut flat = match self.flat.take() {
            Some(f) if f.ctx.width() == w && f.ctx.height() == h => f,
            _ => FlatScratch {
                ctx: vello_cpu::RenderContext::new(w, h),
                pixmap: vello_cpu::Pixmap::new(w, h),
            },
        };
        flat.ctx.reset();
        flat.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        flat.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());

        let additive = state.blend == BlendState::Additive;
        for tri in indices.chunks_exact(3) {
            let [a, b, c] = triangle(vertices, tri)?;
            let area = edge(a.position, b.position, c.position);
            if !area.is_finite() || area == 0.0 || culled(area, state.rasterizer.cull) {
                continue;
            }
            let third = 1.0 / 3.0;
            let avg = interpolate_color(&a.color, &b.color, &c.color, third, third, third);
            // Premultiplied vertex colors; additive ones carry no alpha, so paint them opaque.
            let rgba = if additive {
                [unit_to_u8(avg.r), unit_to_u8(avg.g), unit_to_u8(avg.b), 255]
            } else if avg.a > 0.0 {
                let inv = 1.0 / avg.a;
                [
                    unit_to_u8(avg.r * inv),
                    unit_to_u8(avg.g * inv),
                    unit_to_u8(avg.b * inv),
                    unit_to_u8(avg.a),
                ]
            } else {
                continue;
            };
            if additive && rgba[..3] == [0, 0, 0] {
                continue;
            }
            flat.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                rgba[0], rgba[1], rgba[2], rgba[3],
            ));
            let mut path = vello_cpu::kurbo::BezPath::new();
            path.move_to(to_cpu_point(a.position));
            path.line_to(to_cpu_point(b.position));
            path.line_to(to_cpu_point(c.position));
            path.close_path();
            flat.ctx.fill_path(&path);
        }

        flat.pixmap.data_as_u8_slice_mut().fill(0);
        flat.ctx.flush();
        flat.ctx.render_to_pixmap(&mut flat.pixmap);

        let clip = self.clip_rect();
        if self.state.rasterizer.scissor.is_some() {
            mask_outside(flat.pixmap.data_as_u8_slice_mut(), self.canvas, clip);
        }

        let src = flat.pixmap.data_as_u8_slice();
        let dst = self.target.data_as_u8_slice_mut();
        let out = match state.blend {
            BlendState::Additive => add_rgb_in_place(dst, src),
            BlendState::AlphaBlend | BlendState::Opaque => over_in_place(dst, src, 1.0),
        };
        self.flat = Some(flat);
        out
    }
}

impl GraphicsDevice for CpuDevice {
    fn capabilities(&self) -> DeviceCaps {
        DeviceCaps {
            shader_available: self.opts.shader_available,
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
        vertices: &[Vertex],
        indices: &[u32],
        path: DrawPath,
    ) -> GlowResult<()> {
        if !indices.len().is_multiple_of(3) {
            return Err(GlowError::validation("index count must be a multiple of 3"));
        }
        match path {
            DrawPath::Shaded if self.opts.shader_available => self.draw_shaded(vertices, indices),
            DrawPath::Shaded => Err(GlowError::unavailable("shaded draw path is disabled")),
            DrawPath::FixedFunction => self.draw_flat(vertices, indices),
        }
    }
}

fn canvas_u16(canvas: Canvas) -> GlowResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| GlowError::validation("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| GlowError::validation("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn triangle(vertices: &[Vertex], tri: &[u32]) -> GlowResult<[Vertex; 3]> {
    let get = |i: u32| {
        vertices
            .get(i as usize)
            .copied()
            .ok_or_else(|| GlowError::validation(format!("index {i} out of range")))
    };
    Ok([get(tri[0])?, get(tri[1])?, get(tri[2])?])
}

/// Twice the signed area of `(a, b, p)`; positive when `p` is clockwise of `a -> b` on screen.
fn edge(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

fn culled(area: f64, cull: CullMode) -> bool {
    match cull {
        CullMode::None => false,
        CullMode::Clockwise => area > 0.0,
        CullMode::CounterClockwise => area < 0.0,
    }
}

/// Inside test with a tie rule so pixels on a shared edge belong to exactly one triangle.
fn covers(w: f64, a: Point, b: Point) -> bool {
    if w > 0.0 {
        return true;
    }
    if w < 0.0 {
        return false;
    }
    let d = b - a;
    d.y < 0.0 || (d.y == 0.0 && d.x > 0.0)
}

fn pixel_bounds(pts: &[Point; 3], clip: ScissorRect) -> Option<(u32, u32, u32, u32)> {
    let min_x = pts.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = pts.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = pts.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = pts.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
        return None;
    }
    let x0 = (min_x.floor().max(0.0) as u32).max(clip.x0);
    let y0 = (min_y.floor().max(0.0) as u32).max(clip.y0);
    let x1 = ((max_x.ceil().max(0.0) as u32).saturating_add(1)).min(clip.x1);
    let y1 = ((max_y.ceil().max(0.0) as u32).saturating_add(1)).min(clip.y1);
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

fn interpolate_color(a: &ColorF, b: &ColorF, c: &ColorF, l0: f64, l1: f64, l2: f64) -> ColorF {
    let (l0, l1, l2) = (l0 as f32, l1 as f32, l2 as f32);
    ColorF::rgba(
        a.r * l0 + b.r * l1 + c.r * l2,
        a.g * l0 + b.g * l1 + c.g * l2,
        a.b * l0 + b.b * l1 + c.b * l2,
        a.a * l0 + b.a * l1 + c.a * l2,
    )
}

fn to_cpu_point(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn mask_outside(data: &mut [u8], canvas: Canvas, clip: ScissorRect) {
    let width = canvas.width as usize;
    for (i, px) in data.chunks_exact_mut(4).enumerate() {
        let x = (i % width) as u32;
        let y = (i / width) as u32;
        if x < clip.x0 || x >= clip.x1 || y < clip.y0 || y >= clip.y1 {
            px.fill(0);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
