//! Pixel access and luminance sampling.

use image::{ImageBuffer, Pixel, Rgb, Rgba};
use std::ops::Deref;

/// Brightest possible luminance (white).
pub const MAX_LUMINANCE: u16 = u16::MAX;

/// Read-only random access to an RGB image with 16-bit channels.
///
/// Callers guarantee `pixel_at` is defined for every `x < width()` and
/// `y < height()`; the converter never asks for anything outside that range.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Red, green and blue intensities in `[0, 65535]`.
    fn pixel_at(&self, x: u32, y: u32) -> [u16; 3];
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> [u16; 3] {
        (**self).pixel_at(x, y)
    }
}

impl<C: Deref<Target = [u16]>> PixelSource for ImageBuffer<Rgb<u16>, C> {
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn pixel_at(&self, x: u32, y: u32) -> [u16; 3] {
        self.get_pixel(x, y).0
    }
}

impl<C: Deref<Target = [u8]>> PixelSource for ImageBuffer<Rgb<u8>, C> {
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn pixel_at(&self, x: u32, y: u32) -> [u16; 3] {
        widen(self.get_pixel(x, y).0)
    }
}

/// Alpha is ignored, like the rest of the pipeline ignores color.
impl<C: Deref<Target = [u8]>> PixelSource for ImageBuffer<Rgba<u8>, C> {
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn pixel_at(&self, x: u32, y: u32) -> [u16; 3] {
        widen(self.get_pixel(x, y).to_rgb().0)
    }
}

/// 8-bit to 16-bit channel widening (`0xAB` becomes `0xABAB`).
fn widen([r, g, b]: [u8; 3]) -> [u16; 3] {
    [u16::from(r) * 257, u16::from(g) * 257, u16::from(b) * 257]
}

/// Perceived brightness of one pixel: `0.299 R + 0.587 G + 0.114 B`, truncated.
pub fn luminance([r, g, b]: [u16; 3]) -> u16 {
    let value = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    // `as` saturates, so float rounding above 65535 still lands on white
    value as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_is_zero() {
        assert_eq!(luminance([0, 0, 0]), 0);
    }

    #[test]
    fn white_is_near_max() {
        // 0.299 + 0.587 + 0.114 is not exactly 1.0 in binary floating point
        assert!(luminance([MAX_LUMINANCE; 3]) >= MAX_LUMINANCE - 1);
    }

    #[test]
    fn green_weighs_most() {
        let red = luminance([MAX_LUMINANCE, 0, 0]);
        let green = luminance([0, MAX_LUMINANCE, 0]);
        let blue = luminance([0, 0, MAX_LUMINANCE]);
        assert_eq!(red, 19594);
        assert_eq!(green, 38469);
        assert_eq!(blue, 7470);
        assert!(green > red && red > blue);
    }

    #[test]
    fn eight_bit_buffers_are_widened() {
        let img = ImageBuffer::from_pixel(1, 1, Rgba([0xABu8, 0x00, 0xFF, 0x10]));
        assert_eq!(img.pixel_at(0, 0), [0xABAB, 0x0000, 0xFFFF]);

        let img = ImageBuffer::from_pixel(2, 3, Rgb([1u8, 2, 3]));
        assert_eq!((PixelSource::width(&img), PixelSource::height(&img)), (2, 3));
        assert_eq!(img.pixel_at(1, 2), [257, 514, 771]);
    }
}
