//! Row-based shelf packer for bake-time atlas placement.
//!
//! The atlas is partitioned into horizontal shelves (rows). Each placement
//! goes into the first shelf that fits, otherwise a new shelf is opened.
//! Not optimal packing, but simple, fast, and deterministic — more than
//! enough for a fixed range of glyphs packed once at startup.

/// A single shelf (row) in the atlas.
#[derive(Copy, Clone, Debug)]
struct Shelf {
    y: u32,
    height: u32,
    x_cursor: u32,
}

/// Allocates non-overlapping rectangles inside a fixed-size atlas, reserving
/// a padding border around each one to avoid sampling bleed between glyphs.
#[derive(Clone, Debug)]
pub(crate) struct ShelfPacker {
    width: u32,
    height: u32,
    padding: u32,
    shelves: Vec<Shelf>,
    next_shelf_y: u32,
}

impl ShelfPacker {
    pub fn new(width: u32, height: u32, padding: u32) -> Self {
        Self {
            width,
            height,
            padding,
            shelves: Vec::new(),
            next_shelf_y: 0,
        }
    }

    /// Reserve space for a `w`×`h` bitmap (padding excluded) and return the
    /// atlas-pixel position of the bitmap's top-left corner, or `None` when
    /// the atlas has no room left.
    pub fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        let pad = self.padding;
        let reserved_w = w.saturating_add(pad.saturating_mul(2));
        let reserved_h = h.saturating_add(pad.saturating_mul(2));

        // Quick reject if it can never fit.
        if reserved_w > self.width || reserved_h > self.height {
            return None;
        }

        // First existing shelf that fits, left-to-right within the shelf.
        for shelf in &mut self.shelves {
            if reserved_h <= shelf.height {
                let x = shelf.x_cursor;
                if x.saturating_add(reserved_w) <= self.width {
                    shelf.x_cursor = x.saturating_add(reserved_w);
                    return Some((x + pad, shelf.y + pad));
                }
            }
        }

        // Open a new shelf.
        if self.next_shelf_y.saturating_add(reserved_h) > self.height {
            return None;
        }
        let shelf = Shelf {
            y: self.next_shelf_y,
            height: reserved_h,
            x_cursor: reserved_w,
        };
        self.next_shelf_y = self.next_shelf_y.saturating_add(reserved_h);
        self.shelves.push(shelf);
        Some((pad, shelf.y + pad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placements_stay_inside_the_atlas() {
        let mut packer = ShelfPacker::new(128, 128, 1);
        for _ in 0..20 {
            let (x, y) = packer.place(20, 30).unwrap();
            assert!(x + 20 <= 128);
            assert!(y + 30 <= 128);
        }
    }

    #[test]
    fn placements_do_not_overlap() {
        let mut packer = ShelfPacker::new(256, 256, 1);
        let mut rects: Vec<(u32, u32, u32, u32)> = Vec::new();
        for i in 0..30u32 {
            let (w, h) = (10 + i % 9, 12 + i % 5);
            let (x, y) = packer.place(w, h).unwrap();
            for &(ox, oy, ow, oh) in &rects {
                let disjoint = x + w <= ox || ox + ow <= x || y + h <= oy || oy + oh <= y;
                assert!(disjoint, "rect {i} overlaps a previous placement");
            }
            rects.push((x, y, w, h));
        }
    }

    #[test]
    fn padding_separates_neighbors() {
        let mut packer = ShelfPacker::new(128, 128, 2);
        let (x0, y0) = packer.place(10, 10).unwrap();
        let (x1, _) = packer.place(10, 10).unwrap();
        assert_eq!((x0, y0), (2, 2));
        // Second placement starts after the first's reserved width (10 + 2*2).
        assert_eq!(x1, 2 + 14);
    }

    #[test]
    fn full_row_opens_a_new_shelf() {
        let mut packer = ShelfPacker::new(64, 64, 0);
        let (_, y0) = packer.place(40, 10).unwrap();
        let (x1, y1) = packer.place(40, 10).unwrap();
        assert_eq!(y0, 0);
        assert_eq!((x1, y1), (0, 10));
    }

    #[test]
    fn exhausted_atlas_returns_none() {
        let mut packer = ShelfPacker::new(32, 32, 0);
        assert!(packer.place(32, 32).is_some());
        assert!(packer.place(1, 1).is_none());
    }

    #[test]
    fn oversized_bitmap_is_rejected() {
        let mut packer = ShelfPacker::new(32, 32, 1);
        assert!(packer.place(32, 8).is_none());
    }

    #[test]
    fn shorter_bitmaps_reuse_tall_shelves() {
        let mut packer = ShelfPacker::new(128, 40, 0);
        packer.place(10, 30).unwrap();
        // 20-tall fits the existing 30-tall shelf; a new shelf would not fit.
        let (x, y) = packer.place(10, 20).unwrap();
        assert_eq!((x, y), (10, 0));
    }
}
