//! Geometric operations: cropping and rotation.
//!
//! Both operations read a `PixelBuffer` and return a new one sized to the
//! result. Reads outside the source produce transparent black, so crop and
//! rotate share one out-of-bounds policy.
//!
//! # Coordinate System
//!
//! - Crop rectangles are in source pixels; origin is the top-left corner
//! - Rotation angles are in degrees, positive = clockwise
//! - Rotation is about the image centre and the canvas grows to fit

mod crop;
mod rotation;

pub use crop::apply_crop;
pub use rotation::{apply_rotation, compute_rotated_bounds, InterpolationFilter};
