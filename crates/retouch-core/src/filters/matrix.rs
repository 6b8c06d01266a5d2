//! 3x3 RGB color matrices with an additive offset.
//!
//! Each output channel is a weighted mix of the input channels:
//! ```text
//! r' = m[0][0]*r + m[0][1]*g + m[0][2]*b + offset[0]
//! g' = m[1][0]*r + m[1][1]*g + m[1][2]*b + offset[1]
//! b' = m[2][0]*r + m[2][1]*g + m[2][2]*b + offset[2]
//! ```
//! Offsets are in 8-bit channel units. Results are rounded and clamped to
//! 0..=255; alpha passes through.

use serde::{Deserialize, Serialize};

use crate::buffer::CHANNELS;

/// Linear RGB color transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorMatrix {
    /// Row-major coefficients; row i produces output channel i
    pub m: [[f32; 3]; 3],
    /// Added after mixing, in 0-255 units
    pub offset: [f32; 3],
}

impl ColorMatrix {
    pub const IDENTITY: ColorMatrix = ColorMatrix::new(
        [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        [0.0, 0.0, 0.0],
    );

    /// Classic warm sepia tone.
    pub const SEPIA: ColorMatrix = ColorMatrix::new(
        [
            [0.393, 0.769, 0.189],
            [0.349, 0.686, 0.168],
            [0.272, 0.534, 0.131],
        ],
        [0.0, 0.0, 0.0],
    );

    /// Warm, slightly desaturated film look. Offsets are
    /// [0.03784, 0.02926, 0.02023] scaled to 8-bit.
    pub const VINTAGE: ColorMatrix = ColorMatrix::new(
        [
            [0.62793, 0.32021, -0.03965],
            [0.02578, 0.64411, 0.03259],
            [0.04660, -0.08512, 0.52416],
        ],
        [9.6492, 7.4613, 5.15865],
    );

    /// BT.709 luma on every channel.
    pub const GRAYSCALE: ColorMatrix = ColorMatrix::new(
        [
            [0.2126, 0.7152, 0.0722],
            [0.2126, 0.7152, 0.0722],
            [0.2126, 0.7152, 0.0722],
        ],
        [0.0, 0.0, 0.0],
    );

    pub const INVERT: ColorMatrix = ColorMatrix::new(
        [[-1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, -1.0]],
        [255.0, 255.0, 255.0],
    );

    pub const BROWNIE: ColorMatrix = ColorMatrix::new(
        [
            [0.59970, 0.34553, -0.27082],
            [-0.03770, 0.86095, 0.15059],
            [0.24113, -0.07441, 0.44972],
        ],
        [47.43, -36.9495, -7.56075],
    );

    pub const KODACHROME: ColorMatrix = ColorMatrix::new(
        [
            [1.12855, -0.39673, -0.03992],
            [-0.16404, 1.08352, -0.05498],
            [-0.16786, -0.56034, 1.60148],
        ],
        [63.72705, 24.7299, 35.6286],
    );

    pub const TECHNICOLOR: ColorMatrix = ColorMatrix::new(
        [
            [1.91252, -0.85453, -0.09155],
            [-0.30878, 1.76589, -0.10601],
            [-0.23110, -0.75018, 1.84759],
        ],
        [11.7912, -70.35195, 30.94935],
    );

    pub const POLAROID: ColorMatrix = ColorMatrix::new(
        [
            [1.438, -0.062, -0.062],
            [-0.122, 1.378, -0.122],
            [-0.016, -0.016, 1.483],
        ],
        [0.0, 0.0, 0.0],
    );

    pub const fn new(m: [[f32; 3]; 3], offset: [f32; 3]) -> Self {
        Self { m, offset }
    }

    /// True when every coefficient and offset is finite.
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().chain(&self.offset).all(|v| v.is_finite())
    }

    /// Transform one RGB triple.
    #[inline]
    pub fn transform(&self, rgb: [u8; 3]) -> [u8; 3] {
        let [r, g, b] = rgb.map(|c| c as f32);
        let row = |i: usize| {
            let m = self.m[i];
            (m[0] * r + m[1] * g + m[2] * b + self.offset[i])
                .clamp(0.0, 255.0)
                .round() as u8
        };
        [row(0), row(1), row(2)]
    }

    /// Apply to the RGB channels of RGBA pixels in place.
    pub fn apply_in_place(&self, pixels: &mut [u8]) {
        for chunk in pixels.chunks_exact_mut(CHANNELS) {
            let [r, g, b] = self.transform([chunk[0], chunk[1], chunk[2]]);
            chunk[0] = r;
            chunk[1] = g;
            chunk[2] = b;
        }
    }
}
