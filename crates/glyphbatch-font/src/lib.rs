//! Font rasterization + glyph-atlas packing for glyphbatch.
//!
//! This crate is the "font service": given raw TTF bytes and a contiguous
//! character range, it rasterizes every glyph at a fixed pixel size with
//! `fontdue`, shelf-packs the coverage bitmaps into a single-channel atlas
//! bitmap, and emits the [`GlyphTable`] consumed by `glyphbatch-core`.
//!
//! Runs once at startup; nothing here is per-frame.

#![deny(warnings)]

mod shelf;

use std::path::Path;

use glyphbatch_core::{GlyphMetrics, GlyphTable};
use shelf::ShelfPacker;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to parse font data: {0}")]
    Parse(&'static str),
    #[error(
        "glyph {glyph:?} ({width}x{height} px) does not fit in the \
         {atlas_width}x{atlas_height} atlas"
    )]
    AtlasFull {
        glyph: char,
        width: u32,
        height: u32,
        atlas_width: u32,
        atlas_height: u32,
    },
    #[error("atlas pixel buffer does not match {0}x{1}")]
    Dimensions(u32, u32),
    #[error("failed to write atlas image: {0}")]
    Image(#[from] image::ImageError),
}

/// Atlas bake parameters.
///
/// The default mirrors a typical printable-ASCII setup: 64 px glyphs, the 95
/// characters from `' '` (32) through `'~'` (126), packed into a 512×512
/// atlas with 1 px of padding between glyphs.
#[derive(Copy, Clone, Debug)]
pub struct AtlasConfig {
    /// Rasterization size in pixels.
    pub font_px: f32,
    /// Code point of the first packed character.
    pub first_char: u32,
    /// Number of consecutive characters to pack.
    pub glyph_count: u32,
    /// Atlas bitmap dimensions in pixels.
    pub width: u32,
    pub height: u32,
    /// Padding reserved around each glyph, in pixels.
    pub padding: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            font_px: 64.0,
            first_char: ' ' as u32,
            glyph_count: 95,
            width: 512,
            height: 512,
            padding: 1,
        }
    }
}

/// A baked atlas: single-channel coverage bitmap + the packed glyph table.
#[derive(Clone, Debug)]
pub struct BakedAtlas {
    /// Row-major 8-bit coverage, length `width * height`.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub table: GlyphTable,
}

impl BakedAtlas {
    /// Write the atlas bitmap as a single-channel gray PNG.
    ///
    /// Debug artifact only; has no effect on rendering.
    pub fn write_png(&self, path: &Path) -> Result<(), FontError> {
        let img = image::GrayImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or(FontError::Dimensions(self.width, self.height))?;
        img.save(path)?;
        Ok(())
    }
}

/// Rasterize and pack the configured character range from `font_bytes`.
///
/// The returned table covers `[first_char, first_char + glyph_count)` with
/// one entry per code point. Characters that rasterize to an empty bitmap
/// (e.g. space) get a zero-area atlas rect but keep their advance, so layout
/// still emits a (degenerate) quad and moves the pen.
pub fn bake(font_bytes: &[u8], config: &AtlasConfig) -> Result<BakedAtlas, FontError> {
    let font = fontdue::Font::from_bytes(
        font_bytes,
        fontdue::FontSettings {
            scale: config.font_px,
            ..fontdue::FontSettings::default()
        },
    )
    .map_err(FontError::Parse)?;

    let mut pixels = vec![0u8; (config.width * config.height) as usize];
    let mut packer = ShelfPacker::new(config.width, config.height, config.padding);
    let mut glyphs = Vec::with_capacity(config.glyph_count as usize);

    let inv_w = 1.0 / config.width as f32;
    let inv_h = 1.0 / config.height as f32;

    for code in config.first_char..config.first_char.saturating_add(config.glyph_count) {
        // Invalid scalar values (surrogates) still occupy a table slot so
        // indices stay aligned with the contiguous range.
        let Some(ch) = char::from_u32(code) else {
            glyphs.push(GlyphMetrics::default());
            continue;
        };

        let (metrics, coverage) = font.rasterize(ch, config.font_px);
        let (xoff, yoff) = packed_offsets(&metrics);
        let (w, h) = (metrics.width as u32, metrics.height as u32);

        if w == 0 || h == 0 {
            glyphs.push(GlyphMetrics {
                xoff,
                yoff,
                advance: metrics.advance_width,
                ..GlyphMetrics::default()
            });
            continue;
        }

        let (gx, gy) = packer.place(w, h).ok_or(FontError::AtlasFull {
            glyph: ch,
            width: w,
            height: h,
            atlas_width: config.width,
            atlas_height: config.height,
        })?;

        // Blit the coverage bitmap into the atlas, row by row.
        for row in 0..h {
            let src = (row * w) as usize;
            let dst = ((gy + row) * config.width + gx) as usize;
            pixels[dst..dst + w as usize].copy_from_slice(&coverage[src..src + w as usize]);
        }

        glyphs.push(GlyphMetrics {
            x0: gx as f32,
            y0: gy as f32,
            x1: (gx + w) as f32,
            y1: (gy + h) as f32,
            xoff,
            yoff,
            advance: metrics.advance_width,
            uv_min: [gx as f32 * inv_w, gy as f32 * inv_h],
            uv_max: [(gx + w) as f32 * inv_w, (gy + h) as f32 * inv_h],
        });
    }

    log::debug!(
        "baked {} glyphs at {} px into a {}x{} atlas",
        glyphs.len(),
        config.font_px,
        config.width,
        config.height,
    );

    Ok(BakedAtlas {
        pixels,
        width: config.width,
        height: config.height,
        table: GlyphTable::new(config.first_char, glyphs),
    })
}

/// Convert fontdue's bottom-up bitmap offsets into the top-down packed
/// convention used by [`GlyphMetrics`].
///
/// fontdue's `ymin` is the offset from the baseline to the bitmap *bottom*
/// with y growing up; the packed `yoff` is baseline to bitmap *top* with y
/// growing down, i.e. `-(ymin + height)`.
fn packed_offsets(metrics: &fontdue::Metrics) -> (f32, f32) {
    (
        metrics.xmin as f32,
        -((metrics.ymin + metrics.height as i32) as f32),
    )
}
