use bytemuck::{Pod, Zeroable};

/// Vertices per glyph quad: two triangles, no shared index buffer.
pub const VERTICES_PER_QUAD: usize = 6;

/// Vertex format for text glyph quads.
///
/// Positions are in the normalized layout space (view-projection applied at
/// render time). UVs are normalized texture coordinates into the glyph atlas.
/// Color is linear RGBA in `[0, 1]`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TextVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl TextVertex {
    pub const fn new(position: [f32; 3], color: [f32; 4], uv: [f32; 2]) -> Self {
        Self {
            position,
            color,
            uv,
        }
    }
}

/// Per-frame vertex accumulator.
///
/// `begin` resets the logical length without releasing storage, so
/// steady-state frames reuse the same allocation; `push_quad` grows on
/// demand. The length is always a multiple of [`VERTICES_PER_QUAD`].
#[derive(Clone, Debug, Default)]
pub struct TextBatch {
    vertices: Vec<TextVertex>,
}

impl TextBatch {
    /// Create a batch with storage reserved for `quads` glyph quads.
    pub fn with_capacity(quads: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(quads * VERTICES_PER_QUAD),
        }
    }

    /// Reset the write cursor. Existing storage is retained; stale vertices
    /// beyond the new length are unreachable until overwritten.
    #[inline]
    pub fn begin(&mut self) {
        self.vertices.clear();
    }

    /// Append one quad's worth of vertices at the cursor.
    #[inline]
    pub fn push_quad(&mut self, quad: [TextVertex; VERTICES_PER_QUAD]) {
        self.vertices.extend_from_slice(&quad);
    }

    /// The cursor-bounded vertex stream for this frame.
    #[inline]
    pub fn vertices(&self) -> &[TextVertex] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
