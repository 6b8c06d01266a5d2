//! Where source images come from.
//!
//! The editor never fetches anything itself. A caller resolves the image
//! (from a URL, a file, an upload) and hands over an [`ImageSource`]; loading
//! happens once, synchronously, and is never retried.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::decode::{decode_image, DecodeError};

/// Something that can be resolved into a pixel buffer.
pub trait ImageSource {
    fn load(&self) -> Result<PixelBuffer, DecodeError>;
}

/// Encoded image bytes held in memory.
#[derive(Debug, Clone)]
pub struct BytesSource {
    bytes: Vec<u8>,
}

impl BytesSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl ImageSource for BytesSource {
    fn load(&self) -> Result<PixelBuffer, DecodeError> {
        decode_image(&self.bytes)
    }
}

/// An encoded image file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for FileSource {
    fn load(&self) -> Result<PixelBuffer, DecodeError> {
        debug!(path = %self.path.display(), "reading source image");
        let bytes = std::fs::read(&self.path)?;
        decode_image(&bytes)
    }
}

/// An already-decoded buffer loads as a copy of itself.
impl ImageSource for PixelBuffer {
    fn load(&self) -> Result<PixelBuffer, DecodeError> {
        Ok(self.clone())
    }
}

impl<S: ImageSource + ?Sized> ImageSource for &S {
    fn load(&self) -> Result<PixelBuffer, DecodeError> {
        (**self).load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_png;

    fn sample() -> PixelBuffer {
        let mut img = PixelBuffer::filled(5, 3, [20, 40, 60, 255]);
        img.put(4, 2, [200, 100, 0, 128]);
        img
    }

    #[test]
    fn test_pixel_buffer_source() {
        let img = sample();
        assert_eq!(img.load().unwrap(), img);
    }

    #[test]
    fn test_bytes_source() {
        let img = sample();
        let source = BytesSource::new(encode_png(&img).unwrap());
        assert_eq!(source.load().unwrap(), img);
    }

    #[test]
    fn test_bytes_source_garbage() {
        let source = BytesSource::new(b"not an image".to_vec());
        assert!(matches!(source.load(), Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_file_source() {
        let img = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.png");
        std::fs::write(&path, encode_png(&img).unwrap()).unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.path(), path.as_path());
        assert_eq!(source.load().unwrap(), img);
    }

    #[test]
    fn test_file_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.png"));
        assert!(matches!(source.load(), Err(DecodeError::IoError(_))));
    }

    #[test]
    fn test_reference_source() {
        let img = sample();
        let source: &dyn ImageSource = &img;
        assert_eq!(source.load().unwrap(), img);
    }
}
