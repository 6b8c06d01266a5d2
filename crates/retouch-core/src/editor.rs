//! Public editing entry points.
//!
//! Each function runs exactly one pipeline over the source (a geometric
//! transform or a color pipeline) and encodes the result. Arguments are
//! validated before any pixel work; the source buffer is never modified.
//!
//! To apply several operations to one image, use the buffer-level functions
//! (`apply_crop`, `apply_rotation`, `adjust_brightness_contrast`,
//! `FilterStack::apply`) and encode once at the end.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adjustments::adjust_brightness_contrast;
use crate::buffer::PixelBuffer;
use crate::encode::{encode, EncodedImage, ImageFormat};
use crate::error::Result;
use crate::filters::FilterCatalog;
use crate::source::ImageSource;
use crate::stack::FilterStack;
use crate::transform::{apply_crop, apply_rotation, InterpolationFilter};
use crate::{ColorAdjustment, Rect};

/// Output and resampling settings shared by every entry point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditOptions {
    /// Container format of the result. PNG unless asked otherwise.
    pub format: ImageFormat,
    /// Sampling used by non-quarter-turn rotations.
    pub interpolation: InterpolationFilter,
}

impl EditOptions {
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_interpolation(mut self, interpolation: InterpolationFilter) -> Self {
        self.interpolation = interpolation;
        self
    }
}

/// Crop `source` to `rect` and encode.
///
/// Parts of `rect` outside the source come out transparent.
pub fn crop_image(source: &PixelBuffer, rect: Rect, options: &EditOptions) -> Result<EncodedImage> {
    debug!(
        width = source.width,
        height = source.height,
        ?rect,
        "crop_image"
    );
    let cropped = apply_crop(source, &rect)?;
    Ok(encode(&cropped, options.format)?)
}

/// Rotate `source` clockwise by `angle_degrees` and encode.
///
/// The canvas grows to the rotated bounding box.
pub fn rotate_image(
    source: &PixelBuffer,
    angle_degrees: f64,
    options: &EditOptions,
) -> Result<EncodedImage> {
    debug!(
        width = source.width,
        height = source.height,
        angle = angle_degrees,
        filter = ?options.interpolation,
        "rotate_image"
    );
    let rotated = apply_rotation(source, angle_degrees, options.interpolation)?;
    Ok(encode(&rotated, options.format)?)
}

/// Apply brightness/contrast to `source` and encode.
pub fn adjust_color(
    source: &PixelBuffer,
    adjustment: ColorAdjustment,
    options: &EditOptions,
) -> Result<EncodedImage> {
    debug!(
        width = source.width,
        height = source.height,
        brightness = ?adjustment.brightness,
        contrast = ?adjustment.contrast,
        "adjust_color"
    );
    let adjusted = adjust_brightness_contrast(source, &adjustment)?;
    Ok(encode(&adjusted, options.format)?)
}

/// Apply a built-in named filter to `source` and encode.
///
/// Fails with `UnknownFilter` before any pixel work if the name is not in
/// the catalog.
pub fn apply_filter(source: &PixelBuffer, name: &str, options: &EditOptions) -> Result<EncodedImage> {
    debug!(
        width = source.width,
        height = source.height,
        filter = name,
        "apply_filter"
    );
    let filtered = FilterCatalog::shared().apply(source, name)?;
    Ok(encode(&filtered, options.format)?)
}

/// Fold a filter stack over `source` using the built-in catalog, then encode.
pub fn apply_filter_stack(
    source: &PixelBuffer,
    stack: &FilterStack,
    options: &EditOptions,
) -> Result<EncodedImage> {
    debug!(
        width = source.width,
        height = source.height,
        ops = stack.len(),
        "apply_filter_stack"
    );
    let filtered = stack.apply(source, FilterCatalog::shared())?;
    Ok(encode(&filtered, options.format)?)
}

/// [`crop_image`] on a source that still needs loading.
pub fn crop_image_from_source<S: ImageSource + ?Sized>(
    source: &S,
    rect: Rect,
    options: &EditOptions,
) -> Result<EncodedImage> {
    rect.validate()?;
    crop_image(&source.load()?, rect, options)
}

/// [`rotate_image`] on a source that still needs loading.
pub fn rotate_image_from_source<S: ImageSource + ?Sized>(
    source: &S,
    angle_degrees: f64,
    options: &EditOptions,
) -> Result<EncodedImage> {
    rotate_image(&source.load()?, angle_degrees, options)
}

/// [`adjust_color`] on a source that still needs loading.
pub fn adjust_color_from_source<S: ImageSource + ?Sized>(
    source: &S,
    adjustment: ColorAdjustment,
    options: &EditOptions,
) -> Result<EncodedImage> {
    adjustment.validated()?;
    adjust_color(&source.load()?, adjustment, options)
}

/// [`apply_filter`] on a source that still needs loading.
pub fn apply_filter_from_source<S: ImageSource + ?Sized>(
    source: &S,
    name: &str,
    options: &EditOptions,
) -> Result<EncodedImage> {
    FilterCatalog::shared().get(name)?;
    apply_filter(&source.load()?, name, options)
}

/// [`apply_filter_stack`] on a source that still needs loading.
pub fn apply_filter_stack_from_source<S: ImageSource + ?Sized>(
    source: &S,
    stack: &FilterStack,
    options: &EditOptions,
) -> Result<EncodedImage> {
    stack.validate(FilterCatalog::shared())?;
    apply_filter_stack(&source.load()?, stack, options)
}
