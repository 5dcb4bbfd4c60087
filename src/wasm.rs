//! WebAssembly bindings for inkcurve

use wasm_bindgen::prelude::*;
use image::{DynamicImage, RgbaImage};
use crate::{Converter, Settings};

#[wasm_bindgen]
pub struct WasmConverter {
    settings: Settings,
}

#[wasm_bindgen]
impl WasmConverter {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmConverter {
        WasmConverter { settings: Settings::default() }
    }

    #[wasm_bindgen]
    pub fn set_offset(&mut self, offset: u32) {
        self.settings.offset = offset;
    }

    #[wasm_bindgen]
    pub fn set_threshold(&mut self, threshold: u64) {
        self.settings.threshold = threshold;
    }

    /// Render an RGBA canvas buffer.
    ///
    /// Returns `{ pixels, width, height, curves }` where `pixels` is the RGBA sketch.
    #[wasm_bindgen]
    pub fn render(&self, image_data: &[u8], width: u32, height: u32) -> Result<js_sys::Object, JsValue> {
        let img = RgbaImage::from_raw(width, height, image_data.to_vec())
            .ok_or_else(|| JsValue::from_str("Invalid image dimensions"))?;
        let converter = Converter::new(self.settings)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let sketch = converter.render(&DynamicImage::ImageRgba8(img));
        let curves = sketch.curve_count() as u32;
        let pixels = sketch.surface.into_image().into_rgba8().into_raw();

        let result = js_sys::Object::new();
        js_sys::Reflect::set(&result, &"pixels".into(), &js_sys::Uint8ClampedArray::from(&pixels[..]))?;
        js_sys::Reflect::set(&result, &"width".into(), &width.into())?;
        js_sys::Reflect::set(&result, &"height".into(), &height.into())?;
        js_sys::Reflect::set(&result, &"curves".into(), &curves.into())?;

        Ok(result)
    }
}

impl Default for WasmConverter {
    fn default() -> Self {
        Self::new()
    }
}
