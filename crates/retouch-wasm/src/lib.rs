//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core editing pipeline to JavaScript and
//! TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for pixel buffers and encoded images
//! - `decode` - Decode PNG/JPEG/WebP bytes into a pixel buffer
//! - `transform` - Crop and rotation
//! - `adjustments` - Brightness and contrast
//! - `filters` - Named filters and filter stacks
//! - `encode` - PNG and JPEG encoding
//!
//! Failures are thrown as JS `Error`s carrying the core error message.
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, apply_filter } from '@retouch/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! img.src = apply_filter(image, "sepia").to_data_url();
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod decode;
mod encode;
mod error;
mod filters;
mod transform;
mod types;

// Re-export public types
pub use adjustments::{adjust_color, apply_brightness_contrast};
pub use decode::decode_image;
pub use encode::{encode_jpeg, encode_png};
pub use filters::{apply_filter, apply_filter_stack, apply_named_filter, filter_names};
pub use transform::{apply_crop, apply_rotation, crop_image, rotate_image};
pub use types::{JsEncodedImage, JsPixelBuffer};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "retouch-wasm {} ready",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
