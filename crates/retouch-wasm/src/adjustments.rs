//! Brightness/contrast WASM bindings.
//!
//! Adjustments cross the boundary as plain objects,
//! `{ brightness?: number, contrast?: number }`, each in [-1, 1].

use retouch_core::{ColorAdjustment, EditOptions};
use wasm_bindgen::prelude::*;

use crate::error::{parse_options, parse_value, to_js_error};
use crate::types::{JsEncodedImage, JsPixelBuffer};

/// Adjust brightness and contrast, then encode.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const png = adjust_color(image, { brightness: 0.1, contrast: 0.2 });
/// ```
#[wasm_bindgen]
pub fn adjust_color(
    image: &JsPixelBuffer,
    adjustment: JsValue,
    options: JsValue,
) -> Result<JsEncodedImage, JsValue> {
    let adjustment: ColorAdjustment = parse_value(adjustment)?;
    let options: EditOptions = parse_options(options)?;
    retouch_core::adjust_color(image.as_core(), adjustment, &options)
        .map(JsEncodedImage::from_core)
        .map_err(to_js_error)
}

/// Adjust brightness and contrast without encoding, for chaining.
#[wasm_bindgen]
pub fn apply_brightness_contrast(
    image: &JsPixelBuffer,
    brightness: f32,
    contrast: f32,
) -> Result<JsPixelBuffer, JsValue> {
    let adjustment = ColorAdjustment::new()
        .with_brightness(brightness)
        .with_contrast(contrast);
    retouch_core::adjust_brightness_contrast(image.as_core(), &adjustment)
        .map(JsPixelBuffer::from_core)
        .map_err(to_js_error)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_adjust_color_from_object() {
        let img = JsPixelBuffer::new(2, 2, vec![100u8; 16]).unwrap();
        let adj = serde_wasm_bindgen::to_value(&ColorAdjustment::new().with_brightness(0.2)).unwrap();
        let out = adjust_color(&img, adj, JsValue::UNDEFINED).unwrap();
        assert_eq!(out.mime_type(), "image/png");
    }

    #[wasm_bindgen_test]
    fn test_non_finite_rejected() {
        let img = JsPixelBuffer::new(1, 1, vec![0u8; 4]).unwrap();
        assert!(apply_brightness_contrast(&img, f32::NAN, 0.0).is_err());
    }
}
