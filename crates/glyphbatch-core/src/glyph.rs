//! Packed glyph metrics and the contiguous-range lookup table.
//!
//! Coordinate conventions:
//! - `x0..y1` are atlas pixel coordinates (top-left origin).
//! - `xoff`/`yoff` are bitmap placement offsets relative to the pen position,
//!   in font pixels, with the top-down sign convention used by TrueType
//!   packers: `yoff` is the offset from the baseline to the bitmap *top*, so
//!   it is negative for glyphs that rise above the baseline.
//! - `uv_min`/`uv_max` are normalized texture coordinates `[0, 1]` into the
//!   atlas, covering exactly the glyph bitmap area.

/// Substitute glyph for characters outside the packed range.
pub const FALLBACK_CHAR: char = '?';

/// Per-glyph placement and sampling data for one packed character.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GlyphMetrics {
    /// Atlas-pixel bounding box of the glyph bitmap.
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    /// Horizontal offset of the bitmap from the pen position, in font pixels.
    pub xoff: f32,
    /// Vertical offset from the baseline to the bitmap top (top-down sign).
    pub yoff: f32,
    /// Horizontal pen advance after drawing this glyph, in font pixels.
    pub advance: f32,
    /// Normalized atlas coordinates of the bitmap area.
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

impl GlyphMetrics {
    /// Bitmap width in font pixels.
    #[inline]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Bitmap height in font pixels.
    #[inline]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// Metrics for a fixed contiguous range of character codes
/// `[first_char, first_char + len)`.
///
/// Lookups are always bounds-checked; a character outside the range is never
/// an indexing fault. Callers that want the reference behavior of "something
/// always renders" should use [`GlyphTable::get_or_fallback`].
#[derive(Clone, Debug, Default)]
pub struct GlyphTable {
    first_char: u32,
    glyphs: Vec<GlyphMetrics>,
}

impl GlyphTable {
    pub fn new(first_char: u32, glyphs: Vec<GlyphMetrics>) -> Self {
        Self { first_char, glyphs }
    }

    /// Code point of the first packed character.
    #[inline]
    pub fn first_char(&self) -> u32 {
        self.first_char
    }

    /// Number of packed glyphs.
    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Look up the metrics for `ch`, or `None` when `ch` is outside the
    /// packed range.
    #[inline]
    pub fn get(&self, ch: char) -> Option<&GlyphMetrics> {
        let index = (ch as u32).checked_sub(self.first_char)?;
        self.glyphs.get(index as usize)
    }

    /// Look up `ch`, substituting [`FALLBACK_CHAR`] for out-of-range
    /// characters. Returns `None` only when the fallback itself is not
    /// packed, in which case the caller should skip the character.
    #[inline]
    pub fn get_or_fallback(&self, ch: char) -> Option<&GlyphMetrics> {
        self.get(ch).or_else(|| self.get(FALLBACK_CHAR))
    }
}
