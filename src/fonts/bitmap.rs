/// Built-in 8×8 bitmap font, always available.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};

use super::TextBounds;

/// Fixed-cell font backed by the `font8x8` glyph tables.
///
/// Each glyph is 8 rows of 8 bits; bit 0 of a row is its leftmost pixel.
/// Characters outside Basic Latin and Latin-1 advance one cell with no ink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitmapFont;

impl BitmapFont {
    pub const CELL: i32 = 8;

    fn glyph(c: char) -> Option<[u8; 8]> {
        BASIC_FONTS.get(c).or_else(|| LATIN_FONTS.get(c))
    }

    /// Call `f(x, y)` for every ink pixel of `text` drawn with its top-left
    /// cell corner at `origin`.
    pub fn for_each_pixel(&self, text: &str, origin: (i32, i32), mut f: impl FnMut(i32, i32)) {
        let (ox, oy) = origin;
        for (i, c) in text.chars().enumerate() {
            let Some(rows) = Self::glyph(c) else { continue };
            let cell_x = ox + i as i32 * Self::CELL;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..Self::CELL {
                    if bits & (1 << col) != 0 {
                        f(cell_x + col, oy + row as i32);
                    }
                }
            }
        }
    }

    /// Tight ink bounds of `text` relative to a (0, 0) origin.
    pub fn text_bounds(&self, text: &str) -> TextBounds {
        let mut bounds: Option<TextBounds> = None;
        self.for_each_pixel(text, (0, 0), |x, y| {
            let px = TextBounds { left: x, top: y, right: x + 1, bottom: y + 1 };
            bounds = Some(match bounds {
                Some(b) => b.union(&px),
                None => px,
            });
        });
        bounds.unwrap_or_default()
    }
}
