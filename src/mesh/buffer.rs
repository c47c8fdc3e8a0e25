use crate::foundation::color::ColorF;
use crate::foundation::core::Point;
use crate::foundation::error::{GlowError, GlowResult};

/// One strip vertex in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// Screen-space position (translation already applied).
    pub position: Point,
    /// Premultiplied color; additive draws carry alpha 0.
    pub color: ColorF,
    /// Texture coordinates: `u = ratio + scroll`, `v` is 0 on one edge and 1 on the other.
    pub uv: (f64, f64),
}

/// Flat vertex/index storage for one strip, sized once for a maximum point count.
///
/// `clear` keeps the allocation. Pushing past the configured capacity is rejected rather than
/// growing the buffers.
#[derive(Clone, Debug)]
pub struct MeshBuffer {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    max_points: usize,
}

impl MeshBuffer {
    /// Allocate storage for strips of up to `max_points` points (minimum 2).
    pub fn new(max_points: usize) -> Self {
        let max_points = max_points.max(2);
        Self {
            vertices: Vec::with_capacity(max_points * 2),
            indices: Vec::with_capacity((max_points - 1) * 6),
            max_points,
        }
    }

    /// Largest strip this buffer accepts.
    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Vertices of the current strip (two per point).
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Triangle-list indices of the current strip.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles in the current strip.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Return `true` when no geometry is stored.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Drop the current strip, keeping the allocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Ensure a strip of `points` points fits.
    pub fn check_fits(&self, points: usize) -> GlowResult<()> {
        if points > self.max_points {
            return Err(GlowError::validation(format!(
                "strip of {points} points exceeds mesh capacity {}",
                self.max_points
            )));
        }
        Ok(())
    }

    pub(crate) fn push_pair(&mut self, left: Vertex, right: Vertex) {
        self.vertices.push(left);
        self.vertices.push(right);
    }

    /// Connect pair `i` to pair `i + 1` with two triangles.
    pub(crate) fn push_quad(&mut self, i: u32) {
        let a = 2 * i;
        self.indices
            .extend_from_slice(&[a, a + 1, a + 2, a + 1, a + 3, a + 2]);
    }
}
