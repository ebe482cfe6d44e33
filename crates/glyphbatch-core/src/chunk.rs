//! Chunk plan for rendering a vertex stream through a fixed-capacity buffer.
//!
//! The GPU-side vertex buffer holds at most `capacity` vertices, so a frame's
//! stream is uploaded and drawn in spans of at most that size. Chunk count is
//! true ceiling division: an exact multiple of the capacity produces exactly
//! `total / capacity` full spans, and an empty stream produces no spans at
//! all (no empty draw calls).

/// One contiguous span of the vertex stream: vertices
/// `[start, start + len)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChunkSpan {
    pub start: usize,
    pub len: usize,
}

/// Split `total` vertices into spans of at most `capacity` vertices.
///
/// Every span except possibly the last has `len == capacity`; the last span
/// carries the remainder. Spans tile `[0, total)` exactly and in order.
///
/// # Panics
/// Panics if `capacity` is zero.
pub fn chunk_spans(total: usize, capacity: usize) -> impl Iterator<Item = ChunkSpan> {
    assert!(capacity > 0, "chunk capacity must be non-zero");
    (0..total).step_by(capacity).map(move |start| ChunkSpan {
        start,
        len: capacity.min(total - start),
    })
}
