//! Image decoding for source images.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG and WebP bytes into an RGBA [`PixelBuffer`](crate::PixelBuffer)
//! - Reading and applying EXIF orientation
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let image = decode_image(&bytes)?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_image, read_orientation};
pub use types::{DecodeError, Orientation};
