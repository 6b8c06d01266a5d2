//! Ordered color filter stacks.
//!
//! A [`FilterStack`] is built once per request and folded over a buffer in
//! insertion order. Named operations are resolved against a
//! [`FilterCatalog`] up front, so a stack either applies completely or
//! fails without producing a buffer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adjustments::apply_brightness_contrast_in_place;
use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::filters::{FilterCatalog, FilterRecipe};
use crate::ColorAdjustment;

/// A single color operation in a stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FilterOp {
    /// Contrast then brightness
    BrightnessContrast(ColorAdjustment),
    /// A recipe looked up by name in the catalog
    Named(String),
}

/// Ordered list of color operations.
///
/// # Example
/// ```ignore
/// let stack = FilterStack::new()
///     .brightness_contrast(ColorAdjustment::new().with_brightness(0.1))
///     .named("sepia");
/// let out = stack.apply(&image, &FilterCatalog::builtin())?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterStack {
    ops: Vec<FilterOp>,
}

impl FilterStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, op: FilterOp) -> Self {
        self.ops.push(op);
        self
    }

    pub fn brightness_contrast(self, adjustment: ColorAdjustment) -> Self {
        self.push(FilterOp::BrightnessContrast(adjustment))
    }

    pub fn named(self, name: impl Into<String>) -> Self {
        self.push(FilterOp::Named(name.into()))
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    /// Check every op against `catalog` without touching pixels.
    pub fn validate(&self, catalog: &FilterCatalog) -> Result<()> {
        resolve(&self.ops, catalog).map(|_| ())
    }

    /// Apply the stack to `image`. See [`apply_filters`].
    pub fn apply(&self, image: &PixelBuffer, catalog: &FilterCatalog) -> Result<PixelBuffer> {
        apply_filters(image, &self.ops, catalog)
    }
}

impl From<Vec<FilterOp>> for FilterStack {
    fn from(ops: Vec<FilterOp>) -> Self {
        Self { ops }
    }
}

impl FromIterator<FilterOp> for FilterStack {
    fn from_iter<I: IntoIterator<Item = FilterOp>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

/// Operation with its catalog lookup already done.
enum Resolved<'a> {
    Adjust(ColorAdjustment),
    Recipe(&'a FilterRecipe),
}

fn resolve<'a>(ops: &[FilterOp], catalog: &'a FilterCatalog) -> Result<Vec<Resolved<'a>>> {
    ops.iter()
        .map(|op| match op {
            FilterOp::BrightnessContrast(adj) => adj.validated().map(Resolved::Adjust),
            FilterOp::Named(name) => catalog.get(name).map(Resolved::Recipe),
        })
        .collect()
}

/// Fold `ops` over a copy of `image` in order.
///
/// Every op is validated and every name resolved before any pixel is
/// touched. An empty list returns an identical copy.
pub fn apply_filters(
    image: &PixelBuffer,
    ops: &[FilterOp],
    catalog: &FilterCatalog,
) -> Result<PixelBuffer> {
    let resolved = resolve(ops, catalog)?;

    debug!(
        width = image.width,
        height = image.height,
        ops = resolved.len(),
        "applying filter stack"
    );

    let mut output = image.clone();
    for op in resolved {
        match op {
            Resolved::Adjust(adj) => apply_brightness_contrast_in_place(&mut output.pixels, &adj),
            Resolved::Recipe(recipe) => recipe.apply_in_place(&mut output),
        }
    }
    Ok(output)
}
