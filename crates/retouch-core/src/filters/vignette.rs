//! Radial vignette: darkens RGB toward the corners.
//!
//! The falloff is an ellipse fitted to the image. For each pixel centre we
//! compute `d`, its normalized elliptical distance from the image centre
//! (0 at the centre, 1 at the corners). The darkening is
//! ```text
//! factor = 1 - strength * smootherstep((d - INNER) / (1 - INNER))
//! ```
//! so everything inside `INNER` is untouched and the corners lose
//! `strength` of their brightness.

use crate::buffer::PixelBuffer;

/// Normalized distance where darkening starts.
const INNER: f32 = 0.5;

/// Smootherstep interpolation function.
///
/// Returns values from 0.0 to 1.0 with zero velocity and acceleration at
/// boundaries, avoiding visible banding in the falloff.
///
/// Formula: `6t^5 - 15t^4 + 10t^3`
#[inline]
pub fn smootherstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Darkening factor at pixel `(x, y)` of a `width x height` image.
#[inline]
pub fn vignette_factor(x: u32, y: u32, width: u32, height: u32, strength: f32) -> f32 {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;

    // Radii chosen so the corners sit exactly on d = 1
    let rx = (cx * std::f32::consts::SQRT_2).max(f32::EPSILON);
    let ry = (cy * std::f32::consts::SQRT_2).max(f32::EPSILON);

    let dx = (x as f32 + 0.5 - cx) / rx;
    let dy = (y as f32 + 0.5 - cy) / ry;
    let d = (dx * dx + dy * dy).sqrt();

    let falloff = smootherstep((d - INNER) / (1.0 - INNER));
    1.0 - strength.clamp(0.0, 1.0) * falloff
}

/// Apply a vignette to an image in place. Alpha is untouched.
pub fn apply_vignette_in_place(image: &mut PixelBuffer, strength: f32) {
    if strength.is_nan() || strength <= 0.0 {
        return;
    }

    let (width, height) = (image.width, image.height);
    for (idx, chunk) in image.pixels.chunks_exact_mut(4).enumerate() {
        let x = (idx % width as usize) as u32;
        let y = (idx / width as usize) as u32;
        let factor = vignette_factor(x, y, width, height, strength);

        for c in chunk.iter_mut().take(3) {
            *c = (*c as f32 * factor).clamp(0.0, 255.0).round() as u8;
        }
    }
}
