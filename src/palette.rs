//! Brightness lookup tables mapping a whole block to a single glyph.

use crate::luminance::MAX_LUMINANCE;
use crate::{PicbrailleError, Result};
use serde::Deserialize;
use std::path::Path;

/// Darkest first: a full cell down to the empty cell.
const DEFAULT_GLYPHS: [char; 9] = [
    '\u{28FF}', '\u{28FE}', '\u{28B7}', '\u{28AB}', '\u{2868}', '\u{286A}', '\u{2848}', '\u{2840}',
    '\u{2800}',
];

#[derive(Deserialize)]
struct PaletteFile {
    glyphs: Vec<String>,
}

/// Non-empty glyph table ordered from darkest to brightest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    glyphs: Vec<char>,
}

impl Default for Palette {
    fn default() -> Self {
        Self { glyphs: DEFAULT_GLYPHS.to_vec() }
    }
}

impl Palette {
    pub fn new(glyphs: Vec<char>) -> Result<Self> {
        if glyphs.is_empty() {
            return Err(PicbrailleError::EmptyPalette);
        }
        Ok(Self { glyphs })
    }

    /// Load a table from JSON of the form `{"glyphs": ["⣿", "⣾", ...]}`.
    ///
    /// Each entry contributes its first character; empty strings are skipped.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let file: PaletteFile =
            serde_json::from_str(text).map_err(|e| PicbrailleError::Palette(e.to_string()))?;
        let glyphs = file.glyphs.iter().filter_map(|s| s.chars().next()).collect();
        Self::new(glyphs)
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    fn last(&self) -> usize {
        self.glyphs.len() - 1
    }

    /// Glyph for an absolute block brightness, in equal-width bands.
    pub fn lookup(&self, brightness: u16) -> char {
        let band = u32::from(MAX_LUMINANCE) / self.glyphs.len() as u32 + 1;
        let index = (u32::from(brightness) / band) as usize;
        self.glyphs[index.min(self.last())]
    }

    /// Glyph for a block brightness relative to the image's average brightness.
    ///
    /// The bands span a window centered on `average`, as wide as the distance to
    /// the nearer extreme on each side and clipped to the luminance range.
    pub fn lookup_normalized(&self, brightness: u16, average: u16) -> char {
        let max = i64::from(MAX_LUMINANCE);
        let average = i64::from(average);
        let brightness = i64::from(brightness);
        let upper = (average * 2).min(max);
        let lower = (average - (max - average)).max(0);

        let index = if brightness > upper {
            self.last()
        } else if brightness < lower {
            0
        } else {
            let band = (upper - lower) / self.glyphs.len() as i64 + 1;
            let index = ((brightness - lower) / band) as usize;
            if index > self.last() {
                log::debug!("normalized index {index} past table end, clamped");
            }
            index.min(self.last())
        };
        self.glyphs[index]
    }
}
