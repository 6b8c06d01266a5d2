//! Image encoding for edited buffers.
//!
//! This module provides functionality for:
//! - Encoding RGBA buffers to PNG (lossless, keeps alpha)
//! - Encoding to JPEG with configurable quality, flattening alpha over white
//! - Wrapping the result as a `data:` URL for direct use in an `<img>` tag
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::encode::{encode, ImageFormat};
//!
//! let encoded = encode(&buffer, ImageFormat::Png)?;
//! img.set_src(&encoded.to_data_url());
//! ```

mod jpeg;
mod png;

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{PixelBuffer, CHANNELS};

pub use jpeg::{encode_jpeg, flatten_over_white};
pub use png::encode_png;

/// Quality used when a JPEG is requested without one.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Errors that can occur while encoding a buffer.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the image
    #[error("Image encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output container format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossless RGBA
    #[default]
    Png,
    /// Lossy RGB; quality 1-100
    Jpeg {
        #[serde(default = "default_jpeg_quality")]
        quality: u8,
    },
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl ImageFormat {
    pub fn jpeg() -> Self {
        ImageFormat::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg { .. } => "image/jpeg",
        }
    }
}

/// Encoded image bytes tagged with their format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl EncodedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Base64 `data:` URL, the same shape a canvas `toDataURL()` returns.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode a buffer in the requested format.
pub fn encode(image: &PixelBuffer, format: ImageFormat) -> Result<EncodedImage, EncodeError> {
    let bytes = match format {
        ImageFormat::Png => encode_png(image)?,
        ImageFormat::Jpeg { quality } => encode_jpeg(image, quality)?,
    };

    Ok(EncodedImage { bytes, format })
}

/// Check dimensions and pixel length before handing data to a codec.
pub(crate) fn validate(image: &PixelBuffer) -> Result<(), EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * CHANNELS;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_is_png() {
        assert_eq!(ImageFormat::default(), ImageFormat::Png);
        assert_eq!(ImageFormat::default().mime_type(), "image/png");
    }

    #[test]
    fn test_encode_png_magic() {
        let img = PixelBuffer::filled(3, 2, [255, 0, 0, 255]);
        let encoded = encode(&img, ImageFormat::Png).unwrap();
        assert_eq!(&encoded.bytes[0..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(encoded.mime_type(), "image/png");
    }

    #[test]
    fn test_encode_jpeg_magic() {
        let img = PixelBuffer::filled(8, 8, [10, 200, 30, 255]);
        let encoded = encode(&img, ImageFormat::jpeg()).unwrap();
        assert_eq!(&encoded.bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!(encoded.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let img = PixelBuffer {
            width: 0,
            height: 5,
            pixels: vec![],
        };
        let err = encode(&img, ImageFormat::Png).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::InvalidDimensions {
                width: 0,
                height: 5
            }
        ));
    }

    #[test]
    fn test_pixel_length_mismatch_rejected() {
        let img = PixelBuffer {
            width: 2,
            height: 2,
            pixels: vec![0; 15],
        };
        let err = encode(&img, ImageFormat::jpeg()).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::InvalidPixelData {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn test_data_url() {
        let encoded = EncodedImage {
            bytes: vec![1, 2, 3],
            format: ImageFormat::Png,
        };
        assert_eq!(encoded.to_data_url(), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_data_url_of_real_png() {
        let img = PixelBuffer::filled(1, 1, [0, 0, 0, 0]);
        let url = encode(&img, ImageFormat::Png).unwrap().to_data_url();
        // base64 of the PNG signature
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_format_serde() {
        let f: ImageFormat = serde_json::from_str(r#"{"type":"jpeg","quality":70}"#).unwrap();
        assert_eq!(f, ImageFormat::Jpeg { quality: 70 });

        let f: ImageFormat = serde_json::from_str(r#"{"type":"jpeg"}"#).unwrap();
        assert_eq!(f, ImageFormat::jpeg());

        let f: ImageFormat = serde_json::from_str(r#"{"type":"png"}"#).unwrap();
        assert_eq!(f, ImageFormat::Png);
    }
}
