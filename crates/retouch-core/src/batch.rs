//! Parallel processing of independent edit requests.
//!
//! Each request owns its source buffer, so requests share nothing and run
//! on the rayon pool without locks. Results come back in request order and
//! one failure never affects the others.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::editor::{
    adjust_color, apply_filter, apply_filter_stack, crop_image, rotate_image, EditOptions,
};
use crate::encode::EncodedImage;
use crate::error::Result;
use crate::stack::FilterStack;
use crate::{ColorAdjustment, Rect};

/// One editing operation, mirroring the editor entry points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum EditOp {
    Crop { rect: Rect },
    Rotate { angle: f64 },
    AdjustColor { adjustment: ColorAdjustment },
    ApplyFilter { name: String },
    ApplyStack { stack: FilterStack },
}

/// A source buffer paired with the operation to run on it.
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub source: PixelBuffer,
    pub op: EditOp,
}

impl EditRequest {
    pub fn new(source: PixelBuffer, op: EditOp) -> Self {
        Self { source, op }
    }

    /// Run this request on the current thread.
    pub fn run(&self, options: &EditOptions) -> Result<EncodedImage> {
        let source = &self.source;
        match &self.op {
            EditOp::Crop { rect } => crop_image(source, *rect, options),
            EditOp::Rotate { angle } => rotate_image(source, *angle, options),
            EditOp::AdjustColor { adjustment } => adjust_color(source, *adjustment, options),
            EditOp::ApplyFilter { name } => apply_filter(source, name, options),
            EditOp::ApplyStack { stack } => apply_filter_stack(source, stack, options),
        }
    }
}

/// Run every request in parallel, returning results in input order.
pub fn process_batch(
    requests: Vec<EditRequest>,
    options: &EditOptions,
) -> Vec<Result<EncodedImage>> {
    debug!(requests = requests.len(), "processing batch");
    requests
        .into_par_iter()
        .map(|request| request.run(options))
        .collect()
}
