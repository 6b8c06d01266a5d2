//! Named filter and filter stack bindings.
//!
//! A stack crosses the boundary as an array of tagged ops:
//!
//! ```typescript
//! apply_filter_stack(image, [
//!   { type: "brightnessContrast", value: { brightness: 0.5 } },
//!   { type: "named", value: "sepia" },
//! ]);
//! ```

use retouch_core::{EditOptions, FilterCatalog, FilterStack};
use wasm_bindgen::prelude::*;

use crate::error::{parse_options, parse_value, to_js_error};
use crate::types::{JsEncodedImage, JsPixelBuffer};

/// Apply a built-in filter by name (`"sepia"`, `"vintage"`, ...) and encode.
#[wasm_bindgen]
pub fn apply_filter(
    image: &JsPixelBuffer,
    name: &str,
    options: JsValue,
) -> Result<JsEncodedImage, JsValue> {
    let options: EditOptions = parse_options(options)?;
    retouch_core::apply_filter(image.as_core(), name, &options)
        .map(JsEncodedImage::from_core)
        .map_err(to_js_error)
}

/// Apply an ordered list of filter ops and encode.
///
/// Fails without output if any op is invalid or names an unknown filter.
#[wasm_bindgen]
pub fn apply_filter_stack(
    image: &JsPixelBuffer,
    ops: JsValue,
    options: JsValue,
) -> Result<JsEncodedImage, JsValue> {
    let stack: FilterStack = parse_value(ops)?;
    let options: EditOptions = parse_options(options)?;
    retouch_core::apply_filter_stack(image.as_core(), &stack, &options)
        .map(JsEncodedImage::from_core)
        .map_err(to_js_error)
}

/// Apply a named filter without encoding, for chaining.
#[wasm_bindgen]
pub fn apply_named_filter(image: &JsPixelBuffer, name: &str) -> Result<JsPixelBuffer, JsValue> {
    FilterCatalog::shared()
        .apply(image.as_core(), name)
        .map(JsPixelBuffer::from_core)
        .map_err(to_js_error)
}

/// Names accepted by `apply_filter`, sorted.
#[wasm_bindgen]
pub fn filter_names() -> Vec<String> {
    FilterCatalog::shared().names().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_names() {
        let names = filter_names();
        assert!(names.contains(&"sepia".to_string()));
        assert!(names.contains(&"vintage".to_string()));
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_apply_named_filter_keeps_alpha() {
        let img = JsPixelBuffer::new(2, 1, vec![128, 128, 128, 17, 0, 0, 0, 255]).unwrap();
        let out = apply_named_filter(&img, "sepia").unwrap();
        assert_eq!(out.pixels(), vec![173, 154, 120, 17, 0, 0, 0, 255]);
    }
}
