//! Text layout: string + placement parameters -> glyph quads.

use glam::{Vec2, Vec3, Vec4};

use crate::batch::{TextBatch, TextVertex, VERTICES_PER_QUAD};
use crate::glyph::GlyphTable;

/// Triangulation of the four quad corners into two triangles sharing the
/// diagonal from corner 0 to corner 2.
const QUAD_ORDER: [usize; VERTICES_PER_QUAD] = [0, 1, 2, 0, 2, 3];

/// Lays out text strings into the shared per-frame vertex batch.
///
/// Owns the packed glyph table and the current pixel scale
/// (`2.0 / window_height`), which converts font-pixel metrics into the
/// normalized layout space. The layout space is y-up with the visible range
/// `[-1, 1]` vertically; the view-projection applied at render time handles
/// the aspect ratio.
///
/// Frame protocol: [`TextBatcher::begin`] once, then any number of
/// [`TextBatcher::draw_text`] calls (purely additive), then hand
/// [`TextBatcher::vertices`] to the renderer. If the window was resized,
/// [`TextBatcher::set_window_height`] must run before the frame's first
/// `draw_text`.
#[derive(Clone, Debug)]
pub struct TextBatcher {
    table: GlyphTable,
    batch: TextBatch,
    pixel_scale: f32,
}

impl TextBatcher {
    pub fn new(table: GlyphTable, window_height: u32) -> Self {
        let mut batcher = Self {
            table,
            // Small reserve; grows on demand and is retained across frames.
            batch: TextBatch::with_capacity(64),
            pixel_scale: 0.0,
        };
        batcher.set_window_height(window_height);
        batcher
    }

    /// Recompute the pixel scale for a new window height.
    #[inline]
    pub fn set_window_height(&mut self, height: u32) {
        self.pixel_scale = 2.0 / height.max(1) as f32;
    }

    #[inline]
    pub fn pixel_scale(&self) -> f32 {
        self.pixel_scale
    }

    #[inline]
    pub fn table(&self) -> &GlyphTable {
        &self.table
    }

    /// Reset the batch for a new frame.
    #[inline]
    pub fn begin(&mut self) {
        self.batch.begin();
    }

    /// Append `text` to the batch, one quad (6 vertices) per character,
    /// left to right from `pen`.
    ///
    /// `pen` is the layout-space position of the first glyph's origin on the
    /// baseline; `pen.z` is carried through to every emitted vertex. `size`
    /// is a unitless scale factor on top of the pixel scale. Characters
    /// outside the packed range fall back to `'?'`, or are skipped when the
    /// fallback itself is not packed.
    pub fn draw_text(&mut self, text: &str, pen: Vec3, color: Vec4, size: f32) {
        let scale = self.pixel_scale * size;
        let color = color.to_array();
        let mut pen_x = pen.x;

        for ch in text.chars() {
            let Some(glyph) = self.table.get_or_fallback(ch).copied() else {
                continue;
            };

            let glyph_size = Vec2::new(glyph.width(), glyph.height()) * scale;

            // Flip the bitmap's top-down offset convention into the y-up
            // layout space: yoff measures baseline -> bitmap top, so the
            // bottom edge sits at baseline - (yoff + height).
            let bottom_left = Vec2::new(
                pen_x + glyph.xoff * scale,
                pen.y - (glyph.yoff + glyph.height()) * scale,
            );

            // Corner order: top-right, top-left, bottom-left, bottom-right.
            let corners = [
                bottom_left + glyph_size,
                Vec2::new(bottom_left.x, bottom_left.y + glyph_size.y),
                bottom_left,
                Vec2::new(bottom_left.x + glyph_size.x, bottom_left.y),
            ];

            // Matching atlas corners. The atlas is top-down, so the quad's
            // top edge samples t0 (uv_min.y) and the bottom edge samples t1.
            let uvs = [
                [glyph.uv_max[0], glyph.uv_min[1]],
                [glyph.uv_min[0], glyph.uv_min[1]],
                [glyph.uv_min[0], glyph.uv_max[1]],
                [glyph.uv_max[0], glyph.uv_max[1]],
            ];

            self.batch.push_quad(QUAD_ORDER.map(|i| {
                TextVertex::new([corners[i].x, corners[i].y, pen.z], color, uvs[i])
            }));

            pen_x += glyph.advance * scale;
        }
    }

    /// The cursor-bounded vertex stream accumulated since `begin`.
    #[inline]
    pub fn vertices(&self) -> &[TextVertex] {
        self.batch.vertices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GlyphMetrics;

    const EPSILON: f32 = 1e-6;

    /// A synthetic printable-ASCII table with distinct, nonzero metrics per
    /// glyph so tests can tell glyphs apart.
    fn test_table() -> GlyphTable {
        let glyphs = (0..95u32)
            .map(|i| {
                let w = 10.0 + (i % 7) as f32;
                let h = 20.0 + (i % 5) as f32;
                GlyphMetrics {
                    x0: 0.0,
                    y0: 0.0,
                    x1: w,
                    y1: h,
                    xoff: 1.0,
                    yoff: -(h - 2.0),
                    advance: w + 2.0,
                    uv_min: [i as f32 / 95.0, 0.0],
                    uv_max: [(i + 1) as f32 / 95.0, h / 512.0],
                }
            })
            .collect();
        GlyphTable::new(' ' as u32, glyphs)
    }

    fn batcher() -> TextBatcher {
        TextBatcher::new(test_table(), 600)
    }

    #[test]
    fn six_vertices_per_character() {
        let mut b = batcher();
        b.begin();
        for (text, len) in [("", 0usize), ("A", 1), ("Hello, world!", 13)] {
            let before = b.vertices().len();
            b.draw_text(text, Vec3::ZERO, Vec4::ONE, 1.0);
            assert_eq!(b.vertices().len() - before, 6 * len);
        }
    }

    #[test]
    fn vertex_count_independent_of_placement() {
        let mut b = batcher();
        b.begin();
        b.draw_text("abc", Vec3::new(-0.9, 0.7, 0.25), Vec4::new(0.2, 0.4, 0.6, 0.8), 3.5);
        assert_eq!(b.vertices().len(), 18);
    }

    #[test]
    fn texture_coords_are_translation_invariant() {
        let mut b = batcher();

        b.begin();
        b.draw_text("Wx", Vec3::ZERO, Vec4::ONE, 1.0);
        let at_origin: Vec<[f32; 2]> = b.vertices().iter().map(|v| v.uv).collect();

        b.begin();
        b.draw_text("Wx", Vec3::new(0.6, -0.3, 0.1), Vec4::ONE, 2.0);
        let moved: Vec<[f32; 2]> = b.vertices().iter().map(|v| v.uv).collect();

        assert_eq!(at_origin, moved);
    }

    #[test]
    fn quad_uvs_are_the_glyph_atlas_corners() {
        let mut b = batcher();
        b.begin();
        b.draw_text("A", Vec3::ZERO, Vec4::ONE, 1.0);

        let glyph = *b.table().get('A').unwrap();
        let uvs: Vec<[f32; 2]> = b.vertices().iter().map(|v| v.uv).collect();
        assert_eq!(
            uvs,
            vec![
                [glyph.uv_max[0], glyph.uv_min[1]],
                [glyph.uv_min[0], glyph.uv_min[1]],
                [glyph.uv_min[0], glyph.uv_max[1]],
                [glyph.uv_max[0], glyph.uv_min[1]],
                [glyph.uv_min[0], glyph.uv_max[1]],
                [glyph.uv_max[0], glyph.uv_max[1]],
            ]
        );
    }

    #[test]
    fn known_glyph_positions_match_the_layout_formula() {
        // 'A' on a 600 px window: x0=0, y0=0, x1=20, y1=30, xoff=1,
        // yoff=-28, advance=22, drawn at the origin with size 1.
        let glyphs = vec![GlyphMetrics {
            x0: 0.0,
            y0: 0.0,
            x1: 20.0,
            y1: 30.0,
            xoff: 1.0,
            yoff: -28.0,
            advance: 22.0,
            uv_min: [0.0, 0.0],
            uv_max: [1.0, 1.0],
        }];
        let mut b = TextBatcher::new(GlyphTable::new('A' as u32, glyphs), 600);

        b.begin();
        b.draw_text("A", Vec3::ZERO, Vec4::ONE, 1.0);

        let ps = 2.0 / 600.0;
        // bottom-left = (xoff, -(yoff + height)) * ps = (1, -2) * ps
        let (left, bottom) = (1.0 * ps, -2.0 * ps);
        let (right, top) = (left + 20.0 * ps, bottom + 30.0 * ps);

        let expected = [
            [right, top],
            [left, top],
            [left, bottom],
            [right, top],
            [left, bottom],
            [right, bottom],
        ];
        for (vertex, want) in b.vertices().iter().zip(expected) {
            assert!((vertex.position[0] - want[0]).abs() < EPSILON);
            assert!((vertex.position[1] - want[1]).abs() < EPSILON);
            assert_eq!(vertex.position[2], 0.0);
        }
    }

    #[test]
    fn pen_z_and_color_carried_to_every_vertex() {
        let mut b = batcher();
        b.begin();
        let color = Vec4::new(0.9, 0.2, 0.3, 1.0);
        b.draw_text("zz", Vec3::new(0.0, 0.0, 0.5), color, 1.0);

        for vertex in b.vertices() {
            assert_eq!(vertex.position[2], 0.5);
            assert_eq!(vertex.color, color.to_array());
        }
    }

    #[test]
    fn advance_is_strictly_monotonic() {
        let mut b = batcher();
        b.begin();
        b.draw_text("gradient", Vec3::ZERO, Vec4::ONE, 1.0);

        // Corner 2 of each quad (vertex index 2 within the 6) is the
        // bottom-left; with positive advances its x must strictly increase.
        let lefts: Vec<f32> = b
            .vertices()
            .chunks(6)
            .map(|quad| quad[2].position[0])
            .collect();
        for pair in lefts.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn multiple_calls_are_purely_additive() {
        let mut b = batcher();
        b.begin();
        b.draw_text("first", Vec3::new(-1.0, 0.0, 0.0), Vec4::ONE, 0.7);
        let first: Vec<TextVertex> = b.vertices().to_vec();

        b.draw_text("second!", Vec3::new(0.3, -0.5, 0.0), Vec4::new(0.1, 0.5, 1.0, 1.0), 2.0);
        assert_eq!(b.vertices().len(), first.len() + 6 * 7);
        assert_eq!(&b.vertices()[..first.len()], &first[..]);
    }

    #[test]
    fn begin_discards_previous_frame() {
        let mut b = batcher();
        b.begin();
        b.draw_text("stale", Vec3::ZERO, Vec4::ONE, 1.0);
        b.begin();
        assert!(b.vertices().is_empty());
    }

    #[test]
    fn halving_window_height_doubles_quad_dimensions() {
        let mut b = batcher();

        b.begin();
        b.draw_text("Q", Vec3::ZERO, Vec4::ONE, 1.0);
        let small: Vec<TextVertex> = b.vertices().to_vec();

        b.set_window_height(300);
        b.begin();
        b.draw_text("Q", Vec3::ZERO, Vec4::ONE, 1.0);
        let large = b.vertices();

        // Quad width/height from corners: 0 = top-right, 2 = bottom-left.
        let dims = |v: &[TextVertex]| {
            (
                v[0].position[0] - v[2].position[0],
                v[0].position[1] - v[2].position[1],
            )
        };
        let (w1, h1) = dims(&small);
        let (w2, h2) = dims(large);
        assert!((w2 - 2.0 * w1).abs() < EPSILON);
        assert!((h2 - 2.0 * h1).abs() < EPSILON);
    }

    #[test]
    fn out_of_range_characters_use_fallback() {
        let mut b = batcher();
        b.begin();
        b.draw_text("é", Vec3::ZERO, Vec4::ONE, 1.0);
        let substituted: Vec<[f32; 2]> = b.vertices().iter().map(|v| v.uv).collect();

        b.begin();
        b.draw_text("?", Vec3::ZERO, Vec4::ONE, 1.0);
        let fallback: Vec<[f32; 2]> = b.vertices().iter().map(|v| v.uv).collect();

        assert_eq!(substituted, fallback);
    }

    #[test]
    fn unrenderable_characters_are_skipped() {
        // No '?' in this table, so the fallback is unavailable.
        let glyphs = vec![GlyphMetrics::default(); 26];
        let mut b = TextBatcher::new(GlyphTable::new('a' as u32, glyphs), 600);
        b.begin();
        b.draw_text("aéb", Vec3::ZERO, Vec4::ONE, 1.0);
        assert_eq!(b.vertices().len(), 12);
    }
}
