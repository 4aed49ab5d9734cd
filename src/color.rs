use core::ops::Not;

/// Value of a single pixel.
///
/// The palette is fixed: a cleared bit renders as palette entry 0
/// (black), a set bit as palette entry 1 (white).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    #[default]
    Black,
    White,
}

impl Color {
    /// Interpret the low bit of a flag byte: 1 is white, 0 is black.
    /// Higher bits are ignored.
    #[inline]
    pub const fn from_low_bit(flag: u8) -> Self {
        if flag & 0x01 != 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    /// The stored bit value (0 or 1).
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl From<bool> for Color {
    /// `true` is white.
    #[inline]
    fn from(white: bool) -> Self {
        if white { Color::White } else { Color::Black }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_bit_decides() {
        assert_eq!(Color::from_low_bit(0), Color::Black);
        assert_eq!(Color::from_low_bit(1), Color::White);
        assert_eq!(Color::from_low_bit(2), Color::Black);
        assert_eq!(Color::from_low_bit(0xFF), Color::White);
    }

    #[test]
    fn bit_matches_palette_index() {
        assert_eq!(Color::Black.bit(), 0);
        assert_eq!(Color::White.bit(), 1);
        assert_eq!(!Color::Black, Color::White);
        assert_eq!(Color::from(true), Color::White);
    }
}
