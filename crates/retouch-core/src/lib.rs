//! Retouch Core - Image transformation pipeline
//!
//! This crate provides non-destructive raster transformations: cropping,
//! rotation, brightness/contrast and named color filters, plus decoding of
//! source images and encoding of the result.
//!
//! Every entry point runs exactly one geometric or one color pipeline over
//! an RGBA [`PixelBuffer`] and returns an [`EncodedImage`]. The buffer-level
//! functions can also be chained by hand to thread one image through several
//! operations.

pub mod adjustments;
pub mod batch;
pub mod buffer;
pub mod curve;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod error;
pub mod filters;
pub mod source;
pub mod stack;
pub mod transform;

pub use adjustments::{adjust_brightness_contrast, apply_brightness_contrast_in_place};
pub use batch::{process_batch, EditOp, EditRequest};
pub use buffer::PixelBuffer;
pub use curve::{apply_tone_curve, evaluate_curve, ToneCurveLut};
pub use decode::{decode_image, DecodeError};
pub use editor::{
    adjust_color, adjust_color_from_source, apply_filter, apply_filter_from_source,
    apply_filter_stack, apply_filter_stack_from_source, crop_image, crop_image_from_source,
    rotate_image, rotate_image_from_source, EditOptions,
};
pub use encode::{encode, EncodeError, EncodedImage, ImageFormat};
pub use error::{EditError, Result};
pub use filters::{ColorMatrix, FilterCatalog, FilterRecipe, FilterStep};
pub use source::{BytesSource, FileSource, ImageSource};
pub use stack::{apply_filters, FilterOp, FilterStack};
pub use transform::{apply_crop, apply_rotation, compute_rotated_bounds, InterpolationFilter};

/// Crop region in source pixel coordinates.
///
/// The region may extend past the source on any side; those pixels come out
/// transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Left edge (may be negative)
    pub left: i32,
    /// Top edge (may be negative)
    pub top: i32,
    /// Width in pixels, must be > 0
    pub width: u32,
    /// Height in pixels, must be > 0
    pub height: u32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Reject degenerate rectangles and ones too large to allocate.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(EditError::invalid(
                "rect.width",
                "crop width must be greater than zero",
            ));
        }
        if self.height == 0 {
            return Err(EditError::invalid(
                "rect.height",
                "crop height must be greater than zero",
            ));
        }
        buffer::check_output_size("rect", self.width, self.height)
    }
}

/// Brightness/contrast adjustment.
///
/// Both values range from -1.0 to 1.0. An absent value has no effect, so
/// the default adjustment is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorAdjustment {
    /// Brightness offset (-1 to 1), scaled to ±255
    pub brightness: Option<f32>,
    /// Contrast (-1 to 1); -1 flattens to gray, 1 doubles the spread
    pub contrast: Option<f32>,
}

impl ColorAdjustment {
    /// Create an empty (no-op) adjustment
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = Some(brightness);
        self
    }

    pub fn with_contrast(mut self, contrast: f32) -> Self {
        self.contrast = Some(contrast);
        self
    }

    /// Check whether applying this adjustment would change nothing
    pub fn is_noop(&self) -> bool {
        self.brightness.unwrap_or(0.0) == 0.0 && self.contrast.unwrap_or(0.0) == 0.0
    }

    /// Return a copy with values clamped to [-1, 1].
    ///
    /// Fails if either value is NaN or infinite.
    pub fn validated(&self) -> Result<Self> {
        Ok(Self {
            brightness: check_unit_range("brightness", self.brightness)?,
            contrast: check_unit_range("contrast", self.contrast)?,
        })
    }
}

fn check_unit_range(name: &'static str, value: Option<f32>) -> Result<Option<f32>> {
    match value {
        Some(v) if !v.is_finite() => Err(EditError::invalid(
            name,
            format!("expected a finite value in [-1, 1], got {v}"),
        )),
        Some(v) => Ok(Some(v.clamp(-1.0, 1.0))),
        None => Ok(None),
    }
}

/// Tone curve control point
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurvePoint {
    /// Input value (0.0 to 1.0)
    pub x: f32,
    /// Output value (0.0 to 1.0)
    pub y: f32,
}

impl CurvePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Tone curve with control points
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToneCurve {
    /// Control points for the curve (sorted by x)
    pub points: Vec<CurvePoint>,
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self {
            // Linear curve by default
            points: vec![CurvePoint::new(0.0, 0.0), CurvePoint::new(1.0, 1.0)],
        }
    }
}

impl ToneCurve {
    /// Create a new linear tone curve
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a curve from control points, sorting them by x
    pub fn from_points(mut points: Vec<CurvePoint>) -> Self {
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self { points }
    }

    /// Check that every control point is finite.
    pub fn validate(&self) -> Result<()> {
        match self
            .points
            .iter()
            .find(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            Some(p) => Err(EditError::invalid(
                "curve.points",
                format!("control points must be finite, got ({}, {})", p.x, p.y),
            )),
            None => Ok(()),
        }
    }

    /// Check if the curve is linear (no adjustment)
    pub fn is_linear(&self) -> bool {
        if self.points.len() != 2 {
            return false;
        }
        let first = &self.points[0];
        let last = &self.points[1];
        first.x.abs() < f32::EPSILON
            && first.y.abs() < f32::EPSILON
            && (last.x - 1.0).abs() < f32::EPSILON
            && (last.y - 1.0).abs() < f32::EPSILON
    }
}
