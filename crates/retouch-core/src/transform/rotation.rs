//! Image rotation with nearest, bilinear and Lanczos3 interpolation.
//!
//! # Algorithm
//!
//! Quarter turns (multiples of 90°) are exact pixel remaps. Any other angle
//! uses inverse mapping: for each pixel in the output image, we calculate
//! which source position it came from and interpolate around it.
//!
//! For a clockwise rotation by θ in image coordinates (y pointing down), the
//! inverse transform from an output pixel centre to source coordinates is:
//! ```text
//! src_x =  (dst_x - dst_cx) * cos(θ) + (dst_y - dst_cy) * sin(θ) + src_cx
//! src_y = -(dst_x - dst_cx) * sin(θ) + (dst_y - dst_cy) * cos(θ) + src_cy
//! ```
//!
//! Interpolation is done on premultiplied alpha so the transparent area
//! outside the source does not bleed dark fringes into the edges.

use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, TRANSPARENT};
use crate::error::{EditError, Result};

/// Angles within this many degrees of a quarter turn are treated as exact.
const ANGLE_EPSILON: f64 = 1e-6;

/// Absorbs float noise before rounding bounds up to whole pixels.
const BOUNDS_EPSILON: f64 = 1e-9;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest neighbor - no blending, hard edges.
    Nearest,
    /// Fast bilinear interpolation.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation.
    Lanczos3,
}

/// Number of clockwise quarter turns if `angle_degrees` is a multiple of 90°.
fn quarter_turns(angle_degrees: f64) -> Option<u32> {
    let normalized = angle_degrees.rem_euclid(360.0);
    let quarters = (normalized / 90.0).round();
    if (normalized - quarters * 90.0).abs() < ANGLE_EPSILON {
        Some(quarters as u32 % 4)
    } else {
        None
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// The box is the smallest axis-aligned rectangle containing the rotated
/// source, rounded up to whole pixels:
/// ```text
/// new_w = ceil(|w*cos| + |h*sin|)
/// new_h = ceil(|w*sin| + |h*cos|)
/// ```
///
/// # Example
///
/// ```ignore
/// // 90-degree rotation swaps dimensions
/// assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turns(angle_degrees) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin - BOUNDS_EPSILON).ceil() as u32;
    let new_h = (w * sin + h * cos - BOUNDS_EPSILON).ceil() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Apply rotation to an image.
///
/// The image is rotated clockwise around its center. The output canvas is
/// expanded to fit the entire rotated image (no clipping), and the uncovered
/// corners are transparent black.
///
/// # Errors
///
/// Returns `EditError::InvalidArgument` if the angle is NaN or infinite, or
/// if the rotated canvas would exceed the output limits in [`crate::buffer`].
pub fn apply_rotation(
    image: &PixelBuffer,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> Result<PixelBuffer> {
    if !angle_degrees.is_finite() {
        return Err(EditError::invalid(
            "angle",
            format!("rotation angle must be finite, got {angle_degrees}"),
        ));
    }
    image.validate()?;

    if let Some(turns) = quarter_turns(angle_degrees) {
        return Ok(rotate_quarter_turns(image, turns));
    }

    let (src_w, src_h) = (image.width as f64, image.height as f64);
    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    // Center of source and destination images
    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = PixelBuffer::canvas("image", dst_w, dst_h)?;

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Pixel centre relative to the destination centre
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos + dy * sin + src_cx;
            let src_y = -dx * sin + dy * cos + src_cy;

            let pixel = match filter {
                InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y),
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
                InterpolationFilter::Lanczos3 => sample_lanczos3(image, src_x, src_y),
            };

            output.put(dst_x, dst_y, pixel);
        }
    }

    Ok(output)
}

/// Lossless clockwise rotation by `turns` quarter turns.
///
/// The output holds as many bytes as the validated source.
fn rotate_quarter_turns(image: &PixelBuffer, turns: u32) -> PixelBuffer {
    let (w, h) = (image.width, image.height);
    if turns == 0 {
        return image.clone();
    }

    let (out_w, out_h) = if turns == 2 { (w, h) } else { (h, w) };
    let mut output = PixelBuffer::transparent(out_w, out_h);

    for y in 0..out_h {
        for x in 0..out_w {
            let (sx, sy) = match turns {
                1 => (y, h - 1 - x),
                2 => (w - 1 - x, h - 1 - y),
                _ => (w - 1 - y, x),
            };
            output.put(x, y, image.get(sx as i64, sy as i64));
        }
    }

    output
}

/// Nearest-neighbour sample at continuous source coordinates.
#[inline]
fn sample_nearest(image: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    image.get(x.floor() as i64, y.floor() as i64)
}

/// Running premultiplied-alpha accumulator for interpolation kernels.
#[derive(Default)]
struct Accumulator {
    rgb: [f64; 3],
    alpha: f64,
    weight: f64,
}

impl Accumulator {
    #[inline]
    fn add(&mut self, pixel: [u8; 4], weight: f64) {
        let a = pixel[3] as f64 * weight;
        self.rgb[0] += pixel[0] as f64 * a;
        self.rgb[1] += pixel[1] as f64 * a;
        self.rgb[2] += pixel[2] as f64 * a;
        self.alpha += a;
        self.weight += weight;
    }

    fn finish(&self) -> [u8; 4] {
        if self.weight <= 0.0 {
            return TRANSPARENT;
        }
        let alpha = (self.alpha / self.weight).clamp(0.0, 255.0);
        if alpha < 0.5 || self.alpha <= 0.0 {
            return TRANSPARENT;
        }
        // Un-premultiply
        let channel = |v: f64| (v / self.alpha).clamp(0.0, 255.0).round() as u8;
        [
            channel(self.rgb[0]),
            channel(self.rgb[1]),
            channel(self.rgb[2]),
            alpha.round() as u8,
        ]
    }
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixel centres and weights
/// their contribution based on distance. Neighbours outside the source count
/// as transparent, which anti-aliases the rotated edges.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    // Convert to pixel-centre index space
    let fx = x - 0.5;
    let fy = y - 0.5;
    let (w, h) = (image.width as f64, image.height as f64);

    if fx < -1.0 || fy < -1.0 || fx >= w || fy >= h {
        return TRANSPARENT;
    }

    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let mut acc = Accumulator::default();
    acc.add(image.get(x0, y0), (1.0 - tx) * (1.0 - ty));
    acc.add(image.get(x0 + 1, y0), tx * (1.0 - ty));
    acc.add(image.get(x0, y0 + 1), (1.0 - tx) * ty);
    acc.add(image.get(x0 + 1, y0 + 1), tx * ty);
    acc.finish()
}

/// Sample a pixel using Lanczos3 interpolation.
///
/// Lanczos3 considers a 6x6 neighborhood of pixels, providing
/// higher quality results especially for sharp edges.
fn sample_lanczos3(image: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    let fx = x - 0.5;
    let fy = y - 0.5;
    let (w, h) = (image.width as i64, image.height as i64);

    let x0 = fx.floor() as i64;
    let y0 = fy.floor() as i64;

    // Fall back to bilinear wherever the kernel would leave the source
    if x0 - 2 < 0 || x0 + 3 >= w || y0 - 2 < 0 || y0 + 3 >= h {
        return sample_bilinear(image, x, y);
    }

    let mut acc = Accumulator::default();
    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;
            let weight = lanczos_weight(fx - px as f64, 3.0) * lanczos_weight(fy - py as f64, 3.0);
            acc.add(image.get(px, py), weight);
        }
    }
    acc.finish()
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image with a unique value per pixel and opaque alpha.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 8) as u8, (y * 8) as u8, 100, 255]);
            }
        }
        PixelBuffer {
            width,
            height,
            pixels,
        }
    }

    #[test]
    fn test_no_rotation_is_identity() {
        let img = test_image(30, 20);
        let result = apply_rotation(&img, 0.0, InterpolationFilter::Bilinear).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_full_rotation_is_identity() {
        let img = test_image(30, 20);
        for angle in [360.0, -360.0, 720.0] {
            let result = apply_rotation(&img, angle, InterpolationFilter::Bilinear).unwrap();
            assert_eq!(result, img, "angle {angle}");
        }
    }

    #[test]
    fn test_90_degrees_is_clockwise() {
        // 3x2 image:
        //   a b c
        //   d e f
        // clockwise 90 ->
        //   d a
        //   e b
        //   f c
        let img = test_image(3, 2);
        let result = apply_rotation(&img, 90.0, InterpolationFilter::Bilinear).unwrap();

        assert_eq!((result.width, result.height), (2, 3));
        assert_eq!(result.get(0, 0), img.get(0, 1));
        assert_eq!(result.get(1, 0), img.get(0, 0));
        assert_eq!(result.get(0, 2), img.get(2, 1));
        assert_eq!(result.get(1, 2), img.get(2, 0));
    }

    #[test]
    fn test_180_degrees() {
        let img = test_image(4, 3);
        let result = apply_rotation(&img, 180.0, InterpolationFilter::Bilinear).unwrap();
        assert_eq!(result.get(0, 0), img.get(3, 2));
        assert_eq!(result.get(3, 2), img.get(0, 0));
    }

    #[test]
    fn test_negative_90_equals_270() {
        let img = test_image(5, 3);
        let a = apply_rotation(&img, -90.0, InterpolationFilter::Bilinear).unwrap();
        let b = apply_rotation(&img, 270.0, InterpolationFilter::Bilinear).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get(0, 0), img.get(4, 0));
    }

    #[test]
    fn test_four_quarter_turns_roundtrip() {
        let img = test_image(7, 4);
        let mut result = img.clone();
        for _ in 0..4 {
            result = apply_rotation(&result, 90.0, InterpolationFilter::Nearest).unwrap();
        }
        assert_eq!(result, img);
    }

    #[test]
    fn test_non_finite_angle_rejected() {
        let img = test_image(4, 4);
        for angle in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = apply_rotation(&img, angle, InterpolationFilter::Bilinear).unwrap_err();
            assert!(matches!(err, EditError::InvalidArgument { name: "angle", .. }));
        }
    }

    #[test]
    fn test_oversized_canvas_rejected() {
        // A 30000x1 strip at 45 degrees needs a ~21214x21214 canvas, which
        // is within the dimension limit but over the pixel limit.
        let img = PixelBuffer {
            width: 30000,
            height: 1,
            pixels: vec![0u8; 30000 * 4],
        };
        let err = apply_rotation(&img, 45.0, InterpolationFilter::Nearest).unwrap_err();
        assert!(matches!(err, EditError::InvalidArgument { name: "image", .. }));

        // Quarter turns keep the pixel count and always fit.
        assert!(apply_rotation(&img, 90.0, InterpolationFilter::Nearest).is_ok());
    }

    #[test]
    fn test_90_degree_rotation_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, 270.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, -90.0), (50, 100));
    }

    #[test]
    fn test_180_degree_rotation_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 180.0), (100, 50));
    }

    #[test]
    fn test_45_degree_rotation_bounds() {
        // Diagonal of 100x100 square is ~141.42, rounded up
        assert_eq!(compute_rotated_bounds(100, 100, 45.0), (142, 142));
    }

    #[test]
    fn test_bounds_round_up() {
        // 10x10 at 30°: 10*cos30 + 10*sin30 = 13.66
        assert_eq!(compute_rotated_bounds(10, 10, 30.0), (14, 14));
    }

    #[test]
    fn test_negative_rotation_bounds() {
        assert_eq!(
            compute_rotated_bounds(100, 50, 30.0),
            compute_rotated_bounds(100, 50, -30.0)
        );
    }

    #[test]
    fn test_large_rotation_angles() {
        assert_eq!(compute_rotated_bounds(100, 50, 720.0), (100, 50));
        assert_eq!(compute_rotated_bounds(100, 50, 450.0), (50, 100));
    }

    #[test]
    fn test_bounds_never_zero() {
        for angle in [1.0, 15.0, 45.0, 89.0, 90.0, 135.0, 179.0, 180.0, 270.0, 359.0] {
            let (w, h) = compute_rotated_bounds(1, 1, angle);
            assert!(w > 0, "Width should be > 0 for angle {}", angle);
            assert!(h > 0, "Height should be > 0 for angle {}", angle);
        }
    }

    #[test]
    fn test_rotation_expands_canvas_with_transparent_corners() {
        let img = PixelBuffer::filled(40, 40, [200, 10, 10, 255]);
        let result = apply_rotation(&img, 45.0, InterpolationFilter::Bilinear).unwrap();

        assert!(result.width > img.width);
        assert!(result.height > img.height);

        // Corners of the bounding box are outside the rotated square
        assert_eq!(result.get(0, 0), TRANSPARENT);
        assert_eq!(result.get(result.width as i64 - 1, 0), TRANSPARENT);
        assert_eq!(result.get(0, result.height as i64 - 1), TRANSPARENT);

        // The centre is fully inside and keeps the exact color
        let center = result.get(result.width as i64 / 2, result.height as i64 / 2);
        assert_eq!(center, [200, 10, 10, 255]);
    }

    #[test]
    fn test_premultiplied_edges_keep_color() {
        // Any partially covered edge pixel should keep the source hue,
        // not darken toward the transparent black outside.
        let img = PixelBuffer::filled(20, 20, [250, 250, 250, 255]);
        let result = apply_rotation(&img, 30.0, InterpolationFilter::Bilinear).unwrap();

        for px in result.pixels.chunks(4) {
            if px[3] > 0 {
                assert!(px[0] >= 249, "edge pixel darkened: {:?}", px);
            }
        }
    }

    #[test]
    fn test_nearest_only_uses_source_values() {
        let img = test_image(10, 10);
        let result = apply_rotation(&img, 33.0, InterpolationFilter::Nearest).unwrap();
        let source: std::collections::HashSet<&[u8]> = img.pixels.chunks(4).collect();

        for px in result.pixels.chunks(4) {
            assert!(px == TRANSPARENT || source.contains(px));
        }
    }

    #[test]
    fn test_filters_agree_on_dimensions() {
        let img = test_image(30, 30);
        let nearest = apply_rotation(&img, 15.0, InterpolationFilter::Nearest).unwrap();
        let bilinear = apply_rotation(&img, 15.0, InterpolationFilter::Bilinear).unwrap();
        let lanczos = apply_rotation(&img, 15.0, InterpolationFilter::Lanczos3).unwrap();

        assert_eq!((nearest.width, nearest.height), (bilinear.width, bilinear.height));
        assert_eq!((lanczos.width, lanczos.height), (bilinear.width, bilinear.height));
    }

    #[test]
    fn test_lanczos_uniform_interior() {
        let img = PixelBuffer::filled(30, 30, [90, 120, 150, 255]);
        let result = apply_rotation(&img, 20.0, InterpolationFilter::Lanczos3).unwrap();
        let center = result.get(result.width as i64 / 2, result.height as i64 / 2);
        assert_eq!(center, [90, 120, 150, 255]);
    }

    #[test]
    fn test_quarter_turn_remaps_alpha() {
        let mut img = test_image(3, 3);
        img.put(2, 0, [1, 2, 3, 77]);
        let result = apply_rotation(&img, 90.0, InterpolationFilter::Bilinear).unwrap();
        // Top-right corner moves to bottom-right under clockwise rotation
        assert_eq!(result.get(2, 2), [1, 2, 3, 77]);
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = PixelBuffer::filled(1, 1, [128, 128, 128, 255]);
        let result = apply_rotation(&img, 45.0, InterpolationFilter::Bilinear).unwrap();
        assert_eq!((result.width, result.height), (2, 2));
    }

    #[test]
    fn test_very_thin_image_rotation() {
        let img = test_image(100, 1);
        let result = apply_rotation(&img, 45.0, InterpolationFilter::Bilinear).unwrap();
        assert!(result.width > 70);
        assert!(result.height > 70);
    }

    #[test]
    fn test_lanczos_weight_at_zero() {
        assert!((lanczos_weight(0.0, 3.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lanczos_weight_at_boundary() {
        assert!(lanczos_weight(3.0, 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lanczos_weight_symmetry() {
        assert!((lanczos_weight(1.5, 3.0) - lanczos_weight(-1.5, 3.0)).abs() < 1e-10);
    }

    #[test]
    fn test_quarter_turns_detection() {
        assert_eq!(quarter_turns(0.0), Some(0));
        assert_eq!(quarter_turns(90.0), Some(1));
        assert_eq!(quarter_turns(-270.0), Some(1));
        assert_eq!(quarter_turns(540.0), Some(2));
        assert_eq!(quarter_turns(359.9999999), Some(0));
        assert_eq!(quarter_turns(45.0), None);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
