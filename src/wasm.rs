//! WebAssembly bindings for picbraille

use wasm_bindgen::prelude::*;
use crate::{Converter, Palette, Strategy};

#[wasm_bindgen]
pub struct WasmConverter {
    scale: u32,
    strategy: Strategy,
}

#[wasm_bindgen]
impl WasmConverter {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmConverter {
        WasmConverter { scale: 1, strategy: Strategy::default() }
    }

    #[wasm_bindgen]
    pub fn set_scale(&mut self, scale: u32) -> Result<(), JsValue> {
        if scale < 1 {
            return Err(JsValue::from_str("Scale must be at least 1"));
        }
        self.scale = scale;
        Ok(())
    }

    /// One of "balanced", "threshold", "palette", "normalized"
    #[wasm_bindgen]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        self.strategy = mode.parse().map_err(|e: crate::PicbrailleError| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Glyph table for the palette modes, darkest first
    #[wasm_bindgen]
    pub fn set_palette(&mut self, glyphs: Vec<String>) -> Result<(), JsValue> {
        let glyphs = glyphs.iter().filter_map(|s| s.chars().next()).collect();
        let palette = Palette::new(glyphs).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.strategy = std::mem::take(&mut self.strategy).with_palette(palette);
        Ok(())
    }

    /// Convert RGBA pixel data
    /// Returns an object: { text: string, residuals: number }
    #[wasm_bindgen]
    pub fn convert(&self, image_data: &[u8], width: u32, height: u32) -> Result<js_sys::Object, JsValue> {
        let img = image::RgbaImage::from_raw(width, height, image_data.to_vec())
            .ok_or_else(|| JsValue::from_str("Invalid image dimensions"))?;

        let converter = Converter::new(self.scale)
            .map_err(|e| JsValue::from_str(&e.to_string()))?
            .with_strategy(self.strategy.clone());
        let rendering = converter.render(&img);

        for residual in &rendering.residuals {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "point difference of {} left in block at {},{}",
                residual.difference, residual.x, residual.y
            )));
        }

        let result = js_sys::Object::new();
        js_sys::Reflect::set(&result, &"text".into(), &rendering.text.into())?;
        js_sys::Reflect::set(&result, &"residuals".into(), &(rendering.residuals.len() as u32).into())?;
        Ok(result)
    }
}

impl Default for WasmConverter {
    fn default() -> Self {
        Self::new()
    }
}
