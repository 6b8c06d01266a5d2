//! Brightness and contrast adjustment.
//!
//! Applies a two-stage linear transform to the R, G and B channels of RGBA
//! pixel data. Alpha is never touched.
//!
//! ## Adjustment Order
//! 1. Contrast, pivoting around mid-gray (128)
//! 2. Brightness, as an offset of `brightness * 255`
//!
//! Both stages clamp to 0..=255, so extreme values saturate instead of
//! wrapping around.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::Result;
use crate::ColorAdjustment;

/// Contrast pivot in 8-bit channel space.
const MIDPOINT: f32 = 128.0;

/// Apply brightness/contrast to an image, returning a new buffer.
///
/// Out-of-range values are clamped to [-1, 1]; NaN or infinite values are
/// rejected before any pixel work.
///
/// # Example
/// ```ignore
/// let adj = ColorAdjustment::new().with_brightness(0.2);
/// let brighter = adjust_brightness_contrast(&image, &adj)?;
/// ```
pub fn adjust_brightness_contrast(
    image: &PixelBuffer,
    adjustment: &ColorAdjustment,
) -> Result<PixelBuffer> {
    let adjustment = adjustment.validated()?;
    let mut output = image.clone();
    apply_brightness_contrast_in_place(&mut output.pixels, &adjustment);
    Ok(output)
}

/// Apply brightness/contrast to RGBA pixel data in place.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `adjustment` - Values are clamped to [-1, 1]; absent values have no effect
pub fn apply_brightness_contrast_in_place(pixels: &mut [u8], adjustment: &ColorAdjustment) {
    // Early exit if no adjustments
    if adjustment.is_noop() {
        return;
    }

    let lut = build_lut(
        adjustment.brightness.unwrap_or(0.0),
        adjustment.contrast.unwrap_or(0.0),
    );

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        chunk[0] = lut[chunk[0] as usize];
        chunk[1] = lut[chunk[1] as usize];
        chunk[2] = lut[chunk[2] as usize];
    }
}

/// Precompute the per-channel mapping; every channel uses the same curve.
fn build_lut(brightness: f32, contrast: f32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, value) in lut.iter_mut().enumerate() {
        *value = adjust_channel(i as u8, brightness, contrast);
    }
    lut
}

/// Adjust a single 8-bit channel value.
///
/// Formula:
/// ```text
/// c'  = clamp((c - 128) * (1 + contrast) + 128, 0, 255)
/// c'' = clamp(c' + brightness * 255, 0, 255)
/// ```
#[inline]
pub fn adjust_channel(value: u8, brightness: f32, contrast: f32) -> u8 {
    let brightness = brightness.clamp(-1.0, 1.0);
    let contrast = contrast.clamp(-1.0, 1.0);

    let factor = 1.0 + contrast;
    let contrasted = ((value as f32 - MIDPOINT) * factor + MIDPOINT).clamp(0.0, 255.0);
    let brightened = (contrasted + brightness * 255.0).clamp(0.0, 255.0);

    brightened.round() as u8
}


// ============================================================================
// Property-Based Tests
// ============================================================================
