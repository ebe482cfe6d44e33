//! Backend-agnostic glyph-atlas text layout and batching.
//!
//! # Design goals
//! - **Backend-agnostic**: no `wgpu`, no window handles, no textures.
//! - **Flat output**: layout produces an append-only stream of plain vertices
//!   that a renderer can byte-cast and upload as-is.
//! - **Bounded uploads**: the chunk plan slices an arbitrarily large vertex
//!   stream into spans that fit a fixed-capacity GPU buffer.
//!
//! Renderers are expected to:
//! 1. Call [`TextBatcher::begin`] once per frame.
//! 2. Call [`TextBatcher::draw_text`] for each string to place.
//! 3. Walk [`chunk_spans`] over [`TextBatcher::vertices`] and issue one
//!    upload + draw per span.
//!
//! The glyph metrics themselves come from a font-packing service (see the
//! `glyphbatch-font` crate); this crate only consumes the packed table.

#![deny(warnings)]

mod batch;
mod chunk;
mod glyph;
mod layout;

pub use batch::{TextBatch, TextVertex, VERTICES_PER_QUAD};
pub use chunk::{chunk_spans, ChunkSpan};
pub use glyph::{GlyphMetrics, GlyphTable, FALLBACK_CHAR};
pub use layout::TextBatcher;
