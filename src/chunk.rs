//! Block sampling - averages image regions and thresholds the 2×4 dot cells of a glyph block.

use crate::glyph::{dot_bit, DotPattern, DOT_COLUMNS, DOT_ROWS};
use crate::luminance::{luminance, PixelSource, MAX_LUMINANCE};

/// Dot cells averaging below this are raised.
pub const DOT_THRESHOLD: u16 = MAX_LUMINANCE / 2;

pub struct BlockSampler<'a, P: ?Sized> {
    image: &'a P,
    scale: u32,
}

impl<'a, P: PixelSource + ?Sized> BlockSampler<'a, P> {
    /// `scale` is the edge length in pixels of one dot cell and must be at least 1.
    pub fn new(image: &'a P, scale: u32) -> Self {
        Self { image, scale }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn block_width(&self) -> u32 {
        self.scale.saturating_mul(DOT_COLUMNS)
    }

    pub fn block_height(&self) -> u32 {
        self.scale.saturating_mul(DOT_ROWS)
    }

    /// Mean luminance of the in-bounds part of a `width × height` region at (`x`, `y`).
    ///
    /// Rows at or past the bottom edge end the scan and columns past the right
    /// edge are skipped. A region with no in-bounds pixel reads as white.
    pub fn region_average(&self, x: u32, y: u32, width: u32, height: u32) -> u16 {
        let x_end = x.saturating_add(width).min(self.image.width());
        let y_end = y.saturating_add(height).min(self.image.height());

        let mut sum = 0u64;
        let mut count = 0u64;
        for py in y..y_end {
            for px in x..x_end {
                sum += u64::from(luminance(self.image.pixel_at(px, py)));
                count += 1;
            }
        }

        if count == 0 {
            return MAX_LUMINANCE;
        }
        // the mean of u16 samples fits in u16
        (sum / count) as u16
    }

    /// Mean luminance of the whole glyph block at (`x`, `y`).
    pub fn block_average(&self, x: u32, y: u32) -> u16 {
        self.region_average(x, y, self.block_width(), self.block_height())
    }

    /// Mean luminance of one `scale × scale` dot cell of the block at (`x`, `y`).
    pub fn cell_average(&self, x: u32, y: u32, column: u32, row: u32) -> u16 {
        let cx = x.saturating_add(column.saturating_mul(self.scale));
        let cy = y.saturating_add(row.saturating_mul(self.scale));
        self.region_average(cx, cy, self.scale, self.scale)
    }

    /// Raises every dot whose cell is darker than [`DOT_THRESHOLD`].
    pub fn threshold(&self, x: u32, y: u32) -> DotPattern {
        let mut pattern = DotPattern::EMPTY;
        for column in 0..DOT_COLUMNS {
            for row in 0..DOT_ROWS {
                if self.cell_average(x, y, column, row) < DOT_THRESHOLD {
                    pattern.raise(dot_bit(column, row));
                }
            }
        }
        pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn gray(width: u32, height: u32, f: impl Fn(u32, u32) -> u16) -> ImageBuffer<Rgb<u16>, Vec<u16>> {
        ImageBuffer::from_fn(width, height, |x, y| Rgb([f(x, y); 3]))
    }

    #[test]
    fn single_pixel_region_is_exact() {
        let img = ImageBuffer::from_fn(3, 3, |x, y| Rgb([(x * 9000) as u16, (y * 7000) as u16, 1234]));
        let sampler = BlockSampler::new(&img, 1);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(sampler.region_average(x, y, 1, 1), luminance(img.pixel_at(x, y)));
            }
        }
    }

    #[test]
    fn averages_in_bounds_pixels_only() {
        // left column black, right column gray; region spills past both edges
        let img = gray(2, 2, |x, _| if x == 0 { 0 } else { 30000 });
        let lit = luminance([30000; 3]);
        let sampler = BlockSampler::new(&img, 1);
        assert_eq!(sampler.region_average(0, 0, 5, 5), lit / 2);
        assert_eq!(sampler.region_average(1, 1, 4, 4), lit);
    }

    #[test]
    fn offscreen_region_reads_white() {
        let img = gray(2, 2, |_, _| 0);
        let sampler = BlockSampler::new(&img, 1);
        assert_eq!(sampler.region_average(2, 0, 2, 2), MAX_LUMINANCE);
        assert_eq!(sampler.region_average(0, 7, 1, 1), MAX_LUMINANCE);
        assert_eq!(sampler.region_average(0, 0, 0, 0), MAX_LUMINANCE);
    }

    #[test]
    fn threshold_maps_cells_to_bits() {
        // only the bottom-right dot cell is dark
        let img = gray(4, 8, |x, y| if x >= 2 && y >= 6 { 0 } else { u16::MAX });
        let sampler = BlockSampler::new(&img, 2);
        assert_eq!(sampler.threshold(0, 0), DotPattern(1 << 7));
    }

    #[test]
    fn threshold_is_strict() {
        // the extra red keeps the weighted sum clear of an integer boundary
        let at = [DOT_THRESHOLD + 2, DOT_THRESHOLD, DOT_THRESHOLD];
        assert_eq!(luminance(at), DOT_THRESHOLD);
        let img = ImageBuffer::from_pixel(2, 4, Rgb(at));
        assert_eq!(BlockSampler::new(&img, 1).threshold(0, 0), DotPattern::EMPTY);

        let below = [DOT_THRESHOLD + 1, DOT_THRESHOLD - 1, DOT_THRESHOLD - 1];
        assert_eq!(luminance(below), DOT_THRESHOLD - 1);
        let img = ImageBuffer::from_pixel(2, 4, Rgb(below));
        assert_eq!(BlockSampler::new(&img, 1).threshold(0, 0), DotPattern::FULL);
    }

    #[test]
    fn partial_block_treats_missing_cells_as_white() {
        // 1×1 black image: only the top-left dot exists
        let img = gray(1, 1, |_, _| 0);
        let sampler = BlockSampler::new(&img, 1);
        assert_eq!(sampler.threshold(0, 0), DotPattern(1));
        assert_eq!(sampler.block_average(0, 0), 0);
    }
}
