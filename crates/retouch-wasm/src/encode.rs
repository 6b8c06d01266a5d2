//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode a buffer as lossless PNG
//! - [`encode_jpeg`] - Encode a buffer as JPEG, flattening alpha over white
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, encode_jpeg } from '@retouch/wasm';
//!
//! const png = encode_png(buffer);
//! img.src = png.to_data_url();
//!
//! const jpeg = encode_jpeg(buffer, 90);
//! await writable.write(new Blob([jpeg.bytes()], { type: jpeg.mime_type }));
//! ```

use retouch_core::{encode, ImageFormat};
use wasm_bindgen::prelude::*;

use crate::error::to_js_error;
use crate::types::{JsEncodedImage, JsPixelBuffer};

/// Encode a buffer to PNG.
#[wasm_bindgen]
pub fn encode_png(image: &JsPixelBuffer) -> Result<JsEncodedImage, JsValue> {
    encode(image.as_core(), ImageFormat::Png)
        .map(JsEncodedImage::from_core)
        .map_err(to_js_error)
}

/// Encode a buffer to JPEG.
///
/// * `quality` - JPEG quality, clamped to 1-100 (recommended: 90)
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsPixelBuffer, quality: u8) -> Result<JsEncodedImage, JsValue> {
    encode(image.as_core(), ImageFormat::Jpeg { quality })
        .map(JsEncodedImage::from_core)
        .map_err(to_js_error)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_empty_is_error() {
        let img = JsPixelBuffer::new(0, 0, vec![]).unwrap();
        assert!(encode_png(&img).is_err());
    }
}
