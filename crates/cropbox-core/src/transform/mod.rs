//! Crop and scale operations on image buffers.
//!
//! Both operations are pure: they read a source buffer and return a new,
//! independent buffer.
//!
//! # Operation Order
//!
//! The editor applies them in this order:
//! 1. Crop the displayed image to the selection
//! 2. Scale the crop result by a percentage
//!
//! # Coordinate System
//!
//! - Crop rectangles are in image pixels, half-open on the max edges
//! - Origin is the top-left corner

mod crop;
mod scale;

pub use crop::{apply_crop, InvalidSelection, PixelRect};
pub use scale::{scale_bounds, scale_by_percent, ScalePercent};
