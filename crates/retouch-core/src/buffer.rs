//! RGBA pixel buffer shared by every pipeline stage.

use crate::error::{EditError, Result};

/// Number of bytes per RGBA8 pixel.
pub const CHANNELS: usize = 4;

/// A fully transparent black sample, used for reads outside the source.
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Largest width or height an operation will allocate.
pub const MAX_DIMENSION: u32 = 32768;

/// Largest output an operation will allocate: 100 megapixels, 400MB of RGBA.
pub const MAX_PIXELS: u64 = 100_000_000;

/// An image held as RGBA8 samples.
///
/// Channels are integers in 0..=255 everywhere in the crate. Operations take
/// the buffer by reference and return a fresh one; only functions suffixed
/// `_in_place` mutate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length is always width * height * 4.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from raw RGBA data, checking the length invariant.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let buffer = Self {
            width,
            height,
            pixels,
        };
        buffer.validate()?;
        Ok(buffer)
    }

    /// Check the length invariant on a buffer built through its public fields.
    pub fn validate(&self) -> Result<()> {
        let Some(expected) = byte_len(self.width, self.height) else {
            return Err(EditError::invalid(
                "pixels",
                format!(
                    "{}x{} RGBA does not fit in memory",
                    self.width, self.height
                ),
            ));
        };
        if self.pixels.len() != expected {
            return Err(EditError::invalid(
                "pixels",
                format!(
                    "expected {expected} bytes for {}x{} RGBA, got {}",
                    self.width,
                    self.height,
                    self.pixels.len()
                ),
            ));
        }
        Ok(())
    }

    /// Create a buffer where every pixel has the same value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a fully transparent buffer.
    ///
    /// Operations producing a caller-sized output go through
    /// [`PixelBuffer::canvas`] instead, which checks the size first.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * CHANNELS],
        }
    }

    /// Create a transparent output buffer after checking its size against
    /// [`MAX_DIMENSION`] and [`MAX_PIXELS`].
    ///
    /// `name` is the argument reported when the size is rejected.
    pub fn canvas(name: &'static str, width: u32, height: u32) -> Result<Self> {
        check_output_size(name, width, height)?;
        Ok(Self::transparent(width, height))
    }

    /// Create a PixelBuffer from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbaImage for codec interop.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Sample at `(x, y)`, or transparent black when outside the buffer.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> [u8; 4] {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return TRANSPARENT;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Write a sample. Out-of-bounds writes are ignored.
    #[inline]
    pub fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        self.pixels[idx..idx + CHANNELS].copy_from_slice(&rgba);
    }

    /// Iterate over the alpha channel in pixel order.
    pub fn alphas(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.chunks_exact(CHANNELS).map(|p| p[3])
    }
}

/// Byte length of a `width x height` RGBA buffer, or `None` on overflow.
#[inline]
fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
}

/// Reject output sizes that exceed the allocation limits.
pub fn check_output_size(name: &'static str, width: u32, height: u32) -> Result<()> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(EditError::invalid(
            name,
            format!(
                "output {width}x{height} exceeds the maximum dimension {MAX_DIMENSION}"
            ),
        ));
    }
    let pixels = width as u64 * height as u64;
    if pixels > MAX_PIXELS || byte_len(width, height).is_none() {
        return Err(EditError::invalid(
            name,
            format!("output {width}x{height} exceeds the limit of {MAX_PIXELS} pixels"),
        ));
    }
    Ok(())
}
