//! WASM bindings for crop and rotation.
//!
//! `crop_image` / `rotate_image` run one operation and return an encoded
//! image. `apply_crop` / `apply_rotation` return a buffer so several
//! operations can be chained before encoding once.

use retouch_core::transform::{apply_crop as core_crop, apply_rotation as core_rotate};
use retouch_core::{EditError, EditOptions, EncodedImage, InterpolationFilter, Rect};
use wasm_bindgen::prelude::*;

use crate::error::{parse_options, to_js_error};
use crate::types::{JsEncodedImage, JsPixelBuffer};

/// Crop an image to a pixel rectangle and encode it.
///
/// The rectangle may extend past the image; those areas are transparent.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const png = crop_image(image, 10, 10, 200, 100);
/// img.src = png.to_data_url();
/// ```
#[wasm_bindgen]
pub fn crop_image(
    image: &JsPixelBuffer,
    left: i32,
    top: i32,
    width: u32,
    height: u32,
    options: JsValue,
) -> Result<JsEncodedImage, JsValue> {
    let options: EditOptions = parse_options(options)?;
    crop_encoded(image, Rect::new(left, top, width, height), &options)
        .map(JsEncodedImage::from_core)
        .map_err(to_js_error)
}

/// Rotate an image clockwise by `angle_degrees` and encode it.
///
/// The canvas grows to fit the rotated image; uncovered corners are
/// transparent.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const png = rotate_image(image, 15, { interpolation: "lanczos3" });
/// ```
#[wasm_bindgen]
pub fn rotate_image(
    image: &JsPixelBuffer,
    angle_degrees: f64,
    options: JsValue,
) -> Result<JsEncodedImage, JsValue> {
    let options: EditOptions = parse_options(options)?;
    rotate_encoded(image, angle_degrees, &options)
        .map(JsEncodedImage::from_core)
        .map_err(to_js_error)
}

/// Crop without encoding, for chaining.
#[wasm_bindgen]
pub fn apply_crop(
    image: &JsPixelBuffer,
    left: i32,
    top: i32,
    width: u32,
    height: u32,
) -> Result<JsPixelBuffer, JsValue> {
    core_crop(image.as_core(), &Rect::new(left, top, width, height))
        .map(JsPixelBuffer::from_core)
        .map_err(to_js_error)
}

/// Rotate without encoding, for chaining.
///
/// Takes the same options object as `rotate_image`; only `interpolation`
/// is used.
///
/// ```typescript
/// const rotated = apply_rotation(image, 10, { interpolation: "nearest" });
/// ```
#[wasm_bindgen]
pub fn apply_rotation(
    image: &JsPixelBuffer,
    angle_degrees: f64,
    options: JsValue,
) -> Result<JsPixelBuffer, JsValue> {
    let options: EditOptions = parse_options(options)?;
    rotate_buffer(image, angle_degrees, options.interpolation)
        .map(JsPixelBuffer::from_core)
        .map_err(to_js_error)
}

fn rotate_buffer(
    image: &JsPixelBuffer,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> Result<retouch_core::PixelBuffer, EditError> {
    core_rotate(image.as_core(), angle_degrees, filter)
}

fn crop_encoded(
    image: &JsPixelBuffer,
    rect: Rect,
    options: &EditOptions,
) -> Result<EncodedImage, EditError> {
    retouch_core::crop_image(image.as_core(), rect, options)
}

fn rotate_encoded(
    image: &JsPixelBuffer,
    angle_degrees: f64,
    options: &EditOptions,
) -> Result<EncodedImage, EditError> {
    retouch_core::rotate_image(image.as_core(), angle_degrees, options)
}
