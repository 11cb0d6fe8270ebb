//! Braille dot layout and glyph encoding.
//!
//! A braille cell is 2 dots wide and 4 dots tall. Bits are assigned
//! column-major for the top three rows, the bottom row uses the two high bits:
//! ```text
//! 0 3
//! 1 4
//! 2 5
//! 6 7
//! ```

/// Empty braille pattern (U+2800).
pub const BRAILLE_BASE: u32 = 0x2800;

pub const DOT_COLUMNS: u32 = 2;
pub const DOT_ROWS: u32 = 4;
pub const DOT_COUNT: u32 = DOT_COLUMNS * DOT_ROWS;

/// Bit index of the dot at (`column`, `row`) in the cell.
pub const fn dot_bit(column: u32, row: u32) -> u32 {
    if row < 3 {
        row + 3 * column
    } else {
        6 + column
    }
}

/// Raised dots of one braille cell; a set bit is a dot darker than the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DotPattern(pub u8);

impl DotPattern {
    pub const EMPTY: DotPattern = DotPattern(0);
    pub const FULL: DotPattern = DotPattern(u8::MAX);

    pub fn raised(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_raised(self, bit: u32) -> bool {
        self.0 & (1 << bit) != 0
    }

    pub fn raise(&mut self, bit: u32) {
        self.0 |= 1 << bit;
    }

    pub fn lower(&mut self, bit: u32) {
        self.0 &= !(1 << bit);
    }

    pub fn glyph(self) -> char {
        encode(self)
    }
}

/// Braille character for a dot pattern.
#[must_use]
pub fn encode(pattern: DotPattern) -> char {
    // every offset in 0..=255 is a valid code point
    char::from_u32(BRAILLE_BASE + u32::from(pattern.0)).unwrap_or(' ')
}
