//! Glyph blitting for text rendering.
//!
//! Font tables are not part of this crate; a [`Font`] implementation
//! hands out [`Glyph`] bitmaps and [`MonoBitmap::draw_text`] places them.

use crate::bitmap::MonoBitmap;
use crate::color::Color;

/// A 1-bit glyph image.
///
/// Rows run top to bottom, each `width.div_ceil(8)` bytes long with the
/// leftmost pixel in the most significant bit. A set bit is ink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph<'a> {
    pub width: u32,
    pub height: u32,
    pub rows: &'a [u8],
}

impl<'a> Glyph<'a> {
    pub const fn new(width: u32, height: u32, rows: &'a [u8]) -> Self {
        Self {
            width,
            height,
            rows,
        }
    }

    fn stride(&self) -> usize {
        self.width.div_ceil(8) as usize
    }

    /// Whether the glyph has ink at `(x, y)`. Missing row data reads as blank.
    pub fn ink(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y as usize * self.stride() + (x as usize >> 3);
        self.rows
            .get(index)
            .is_some_and(|byte| byte & (0x80 >> (x & 7)) != 0)
    }
}

/// Source of glyphs for [`MonoBitmap::draw_text`].
pub trait Font {
    /// Vertical advance for a line break.
    fn line_height(&self) -> u32;

    /// Glyph for `ch`, or `None` when the font has no such character.
    fn glyph(&self, ch: char) -> Option<Glyph<'_>>;
}

impl<F: Font + ?Sized> Font for &F {
    fn line_height(&self) -> u32 {
        (**self).line_height()
    }

    fn glyph(&self, ch: char) -> Option<Glyph<'_>> {
        (**self).glyph(ch)
    }
}

impl MonoBitmap {
    /// Draw the ink of `glyph` with its top-left corner at `(x, y)`.
    ///
    /// Blank glyph pixels leave the bitmap untouched; ink falling outside
    /// the bitmap is clipped.
    pub fn draw_glyph(&mut self, x: u32, y: u32, glyph: &Glyph<'_>, color: Color) {
        for gy in 0..glyph.height {
            let Some(py) = y.checked_add(gy) else { break };
            if py >= self.height() {
                break;
            }
            for gx in 0..glyph.width {
                if glyph.ink(gx, gy) {
                    if let Some(px) = x.checked_add(gx) {
                        self.set_pixel(px, py, color);
                    }
                }
            }
        }
    }

    /// Draw `text` left to right starting with the top-left corner at
    /// `(x, y)`. Each glyph advances the pen by its width; `'\n'` returns
    /// to `x` one line height lower. Characters the font lacks are
    /// skipped. Returns the pen's final x position.
    pub fn draw_text<F: Font>(&mut self, text: &str, font: &F, x: u32, y: u32, color: Color) -> u32 {
        let mut pen_x = x;
        let mut pen_y = y;
        for ch in text.chars() {
            if ch == '\n' {
                pen_x = x;
                pen_y = pen_y.saturating_add(font.line_height());
                continue;
            }
            if let Some(glyph) = font.glyph(ch) {
                self.draw_glyph(pen_x, pen_y, &glyph, color);
                pen_x = pen_x.saturating_add(glyph.width);
            }
        }
        pen_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 glyphs: 'x' is a diagonal cross, 'o' a ring.
    struct TinyFont;

    const CROSS: [u8; 3] = [0b1010_0000, 0b0100_0000, 0b1010_0000];
    const RING: [u8; 3] = [0b1110_0000, 0b1010_0000, 0b1110_0000];

    impl Font for TinyFont {
        fn line_height(&self) -> u32 {
            4
        }

        fn glyph(&self, ch: char) -> Option<Glyph<'_>> {
            match ch {
                'x' => Some(Glyph::new(3, 3, &CROSS)),
                'o' => Some(Glyph::new(3, 3, &RING)),
                _ => None,
            }
        }
    }

    #[test]
    fn glyph_ink_reads_msb_first() {
        let g = Glyph::new(3, 3, &CROSS);
        assert!(g.ink(0, 0));
        assert!(!g.ink(1, 0));
        assert!(g.ink(1, 1));
        assert!(!g.ink(3, 0));
        let short = Glyph::new(8, 4, &[0xFF]);
        assert!(short.ink(7, 0));
        assert!(!short.ink(0, 1));
    }

    #[test]
    fn blank_bits_are_transparent() {
        let mut bmp = MonoBitmap::new(5, 5).unwrap();
        bmp.fill(Color::White);
        bmp.draw_glyph(1, 1, &Glyph::new(3, 3, &RING), Color::Black);
        assert_eq!(bmp.count_white(), 25 - 8);
        assert_eq!(bmp.get_pixel(2, 2), Some(Color::White));
        assert_eq!(bmp.get_pixel(1, 1), Some(Color::Black));
    }

    #[test]
    fn text_advances_and_breaks_lines() {
        let mut bmp = MonoBitmap::new(16, 8).unwrap();
        let end = bmp.draw_text("xo?\nx", &TinyFont, 1, 0, Color::White);
        assert_eq!(end, 4);
        // 'x' at 1..4, 'o' at 4..7 on the first line
        assert_eq!(bmp.get_pixel(1, 0), Some(Color::White));
        assert_eq!(bmp.get_pixel(4, 1), Some(Color::White));
        assert_eq!(bmp.get_pixel(5, 1), Some(Color::Black));
        // second line starts at y = 4
        assert_eq!(bmp.get_pixel(2, 5), Some(Color::White));
        assert_eq!(bmp.count_white(), 5 + 8 + 5);
    }

    #[test]
    fn glyph_is_clipped_at_edges() {
        let mut bmp = MonoBitmap::new(4, 4).unwrap();
        bmp.draw_glyph(2, 2, &Glyph::new(3, 3, &RING), Color::White);
        assert_eq!(bmp.count_white(), 3);
        bmp.draw_glyph(u32::MAX, 0, &Glyph::new(3, 3, &RING), Color::White);
        assert_eq!(bmp.count_white(), 3);
    }
}
