//! Image cropping in source pixel coordinates.
//!
//! The crop rectangle may extend past any edge of the source. Output pixels
//! that map outside the source are transparent black, so the output is always
//! exactly `rect.width x rect.height`.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::Result;
use crate::Rect;

/// Extract `rect` from `image`.
///
/// Output pixel `(x, y)` reads source pixel `(rect.left + x, rect.top + y)`.
///
/// # Errors
///
/// Returns `EditError::InvalidArgument` if the rectangle has a zero width or
/// height, or is larger than the output limits in [`crate::buffer`]. This is
/// checked before any pixel work.
///
/// # Example
///
/// ```ignore
/// // Crop the central 2x2 of a 4x4 image
/// let cropped = apply_crop(&image, &Rect::new(1, 1, 2, 2))?;
/// ```
pub fn apply_crop(image: &PixelBuffer, rect: &Rect) -> Result<PixelBuffer> {
    rect.validate()?;
    image.validate()?;

    // Fast path: identity crop returns a clone
    if rect.left == 0 && rect.top == 0 && rect.width == image.width && rect.height == image.height
    {
        return Ok(image.clone());
    }

    let out_w = rect.width as usize;
    let mut output = PixelBuffer::canvas("rect", rect.width, rect.height)?;

    // Intersect the crop with the source so the copy is row slices only.
    let src_x0 = (rect.left as i64).max(0);
    let src_y0 = (rect.top as i64).max(0);
    let src_x1 = (rect.left as i64 + rect.width as i64).min(image.width as i64);
    let src_y1 = (rect.top as i64 + rect.height as i64).min(image.height as i64);

    if src_x0 >= src_x1 || src_y0 >= src_y1 {
        // Entirely outside the source
        return Ok(output);
    }

    let span = (src_x1 - src_x0) as usize * CHANNELS;
    let dst_x = (src_x0 - rect.left as i64) as usize;

    for src_y in src_y0..src_y1 {
        let dst_y = (src_y - rect.top as i64) as usize;
        let src_start = (src_y as usize * image.width as usize + src_x0 as usize) * CHANNELS;
        let dst_start = (dst_y * out_w + dst_x) * CHANNELS;

        output.pixels[dst_start..dst_start + span]
            .copy_from_slice(&image.pixels[src_start..src_start + span]);
    }

    Ok(output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
