//! Dot-count balancing for thresholded braille patterns.
//!
//! Thresholding keeps one bit per dot cell and loses how bright the block is
//! overall. Balancing measures the whole block, derives how many dots should
//! be lowered, and flips the lowest eligible bits until the pattern agrees.

use crate::glyph::{DotPattern, DOT_COUNT};

/// Luminance span represented by one lowered dot.
const LEVEL_STEP: u32 = 65536 / DOT_COUNT;

/// Outcome of balancing one pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balanced {
    pub pattern: DotPattern,
    /// Lowered dots still missing (positive) or in excess (negative) once no
    /// eligible bit was left. Zero when the pattern met its target.
    pub difference: i32,
}

/// Number of dots a block of this brightness should leave lowered, rounded half up.
pub fn lowered_target(brightness: u16) -> u32 {
    (u32::from(brightness) + LEVEL_STEP / 2) / LEVEL_STEP
}

/// Flips bits of `pattern`, lowest bit first, until exactly `target` dots are lowered.
///
/// Raised bits are lowered when the block is brighter than the pattern shows,
/// lowered bits are raised when it is darker. Each bit flips at most once.
pub fn balance(pattern: DotPattern, target: u32) -> Balanced {
    let lowered = DOT_COUNT - pattern.raised();
    let mut difference = target as i32 - lowered as i32;
    let mut pattern = pattern;

    while difference != 0 {
        let candidates = if difference > 0 { pattern.0 } else { !pattern.0 };
        if candidates == 0 {
            break;
        }
        let bit = candidates.trailing_zeros();
        if difference > 0 {
            pattern.lower(bit);
            difference -= 1;
        } else {
            pattern.raise(bit);
            difference += 1;
        }
    }

    Balanced { pattern, difference }
}
