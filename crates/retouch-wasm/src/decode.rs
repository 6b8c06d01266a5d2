//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, rotate_image } from '@retouch/wasm';
//!
//! const bytes = new Uint8Array(await (await fetch(url)).arrayBuffer());
//! const image = decode_image(bytes);
//! const rotated = rotate_image(image, 90);
//! ```

use retouch_core::{BytesSource, EditError, ImageSource};
use wasm_bindgen::prelude::*;

use crate::error::to_js_error;
use crate::types::JsPixelBuffer;

/// Decode PNG, JPEG or WebP bytes into an RGBA buffer.
///
/// EXIF orientation is applied so the result matches what the browser shows.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    load(bytes).map_err(to_js_error)
}

fn load(bytes: &[u8]) -> Result<JsPixelBuffer, EditError> {
    let buffer = BytesSource::new(bytes).load()?;
    Ok(JsPixelBuffer::from_core(buffer))
}
