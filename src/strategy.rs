//! Per-block glyph selection strategies.

use crate::chunk::BlockSampler;
use crate::dither;
use crate::luminance::PixelSource;
use crate::palette::Palette;
use crate::PicbrailleError;
use std::str::FromStr;

/// How a block of `2*scale × 4*scale` pixels becomes one glyph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Threshold each dot cell, then balance the dot count against the block brightness.
    #[default]
    Balanced,
    /// Threshold each dot cell and emit the pattern as is.
    Threshold,
    /// Look the block brightness up in a table.
    Palette(Palette),
    /// Look the block brightness up in a table stretched around the image average.
    Normalized(Palette),
}

/// Glyph chosen for one block, with the balancing leftover (0 unless balancing fell short).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGlyph {
    pub glyph: char,
    pub difference: i32,
}

impl BlockGlyph {
    fn exact(glyph: char) -> Self {
        Self { glyph, difference: 0 }
    }
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Balanced => "balanced",
            Strategy::Threshold => "threshold",
            Strategy::Palette(_) => "palette",
            Strategy::Normalized(_) => "normalized",
        }
    }

    /// Swap in `palette` for the table-driven strategies; dot strategies are unchanged.
    pub fn with_palette(self, palette: Palette) -> Self {
        match self {
            Strategy::Palette(_) => Strategy::Palette(palette),
            Strategy::Normalized(_) => Strategy::Normalized(palette),
            other => other,
        }
    }

    pub fn needs_image_average(&self) -> bool {
        matches!(self, Strategy::Normalized(_))
    }

    /// Render the block whose top-left pixel is (`x`, `y`).
    ///
    /// `image_average` is only read by [`Strategy::Normalized`].
    pub fn render_block<P: PixelSource + ?Sized>(
        &self,
        sampler: &BlockSampler<'_, P>,
        x: u32,
        y: u32,
        image_average: u16,
    ) -> BlockGlyph {
        match self {
            Strategy::Balanced => {
                let pattern = sampler.threshold(x, y);
                let target = dither::lowered_target(sampler.block_average(x, y));
                let balanced = dither::balance(pattern, target);
                BlockGlyph { glyph: balanced.pattern.glyph(), difference: balanced.difference }
            }
            Strategy::Threshold => BlockGlyph::exact(sampler.threshold(x, y).glyph()),
            Strategy::Palette(palette) => BlockGlyph::exact(palette.lookup(sampler.block_average(x, y))),
            Strategy::Normalized(palette) => {
                BlockGlyph::exact(palette.lookup_normalized(sampler.block_average(x, y), image_average))
            }
        }
    }
}

impl FromStr for Strategy {
    type Err = PicbrailleError;

    /// Table-driven strategies start with the default palette.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "balanced" => Ok(Strategy::Balanced),
            "threshold" => Ok(Strategy::Threshold),
            "palette" => Ok(Strategy::Palette(Palette::default())),
            "normalized" => Ok(Strategy::Normalized(Palette::default())),
            _ => Err(PicbrailleError::UnknownStrategy(s.to_string())),
        }
    }
}
