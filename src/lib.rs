//! Image to Unicode braille converter with brightness-balanced dot patterns.

pub mod chunk;
pub mod dither;
pub mod glyph;
pub mod luminance;
pub mod palette;
pub mod strategy;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use chunk::BlockSampler;
pub use glyph::DotPattern;
pub use luminance::PixelSource;
pub use palette::Palette;
pub use strategy::Strategy;

use luminance::MAX_LUMINANCE;
use strategy::BlockGlyph;
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

#[derive(Error, Debug)]
pub enum PicbrailleError {
    #[error("Invalid scale factor {0}: must be at least 1")]
    InvalidScale(u32),
    #[error("Palette has no glyphs")]
    EmptyPalette,
    #[error("Palette error: {0}")]
    Palette(String),
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PicbrailleError>;

/// A block whose balancing could not reach its target dot count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Residual {
    /// Top-left pixel of the block.
    pub x: u32,
    pub y: u32,
    pub difference: i32,
}

/// Converted text plus the blocks that finished out of balance, in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendering {
    pub text: String,
    pub residuals: Vec<Residual>,
}

/// Main converter: one braille glyph per `2*scale × 4*scale` pixel block.
#[derive(Debug, Clone)]
pub struct Converter {
    scale: u32,
    strategy: Strategy,
    parallel: bool,
}

impl Converter {
    pub fn new(scale: u32) -> Result<Self> {
        if scale < 1 {
            return Err(PicbrailleError::InvalidScale(scale));
        }
        Ok(Self { scale, strategy: Strategy::default(), parallel: true })
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Rows are rendered on the rayon pool unless disabled; output is identical either way.
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn convert<P: PixelSource + Sync + ?Sized>(&self, image: &P) -> String {
        self.render(image).text
    }

    /// Convert a decoded image, widening it to 16-bit RGB first.
    pub fn convert_image(&self, image: &image::DynamicImage) -> String {
        self.convert(&image.to_rgb16())
    }

    pub fn render<P: PixelSource + Sync + ?Sized>(&self, image: &P) -> Rendering {
        let sampler = BlockSampler::new(image, self.scale);
        let (width, height) = (image.width(), image.height());

        let image_average = if self.strategy.needs_image_average() {
            sampler.region_average(0, 0, width, height)
        } else {
            MAX_LUMINANCE
        };

        let row_starts: Vec<u32> = (0..height).step_by(sampler.block_height() as usize).collect();
        log::debug!(
            "converting {width}x{height} at scale {} with {} strategy: {} rows",
            self.scale,
            self.strategy.name(),
            row_starts.len()
        );

        let render_row = |&y: &u32| self.render_row(&sampler, y, width, image_average);
        #[cfg(not(target_arch = "wasm32"))]
        let rows: Vec<(String, Vec<Residual>)> = if self.parallel {
            row_starts.par_iter().map(render_row).collect()
        } else {
            row_starts.iter().map(render_row).collect()
        };
        #[cfg(target_arch = "wasm32")]
        let rows: Vec<(String, Vec<Residual>)> = row_starts.iter().map(render_row).collect();

        let mut rendering = Rendering::default();
        for (line, residuals) in rows {
            rendering.text.push_str(&line);
            rendering.text.push('\n');
            rendering.residuals.extend(residuals);
        }
        rendering
    }

    fn render_row<P: PixelSource + ?Sized>(
        &self,
        sampler: &BlockSampler<'_, P>,
        y: u32,
        width: u32,
        image_average: u16,
    ) -> (String, Vec<Residual>) {
        let mut line = String::new();
        let mut residuals = Vec::new();
        for x in (0..width).step_by(sampler.block_width() as usize) {
            let BlockGlyph { glyph, difference } = self.strategy.render_block(sampler, x, y, image_average);
            if difference != 0 {
                log::warn!("point difference of {difference} left in block at {x},{y}");
                residuals.push(Residual { x, y, difference });
            }
            line.push(glyph);
        }
        (line, residuals)
    }
}
