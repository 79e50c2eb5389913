//! Image resizing functions for previews and viewport display.
//!
//! Provides various resize operations using the `image` crate's algorithms.
//! All functions return new `ImageBuffer` instances without modifying the input.

use super::{FilterType, ImageBuffer, LoadError};
use crate::geometry::fit_dimensions;

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `LoadError::InvalidDimensions` if either target dimension is zero.
pub fn resize(
    image: &ImageBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<ImageBuffer, LoadError> {
    if width == 0 || height == 0 {
        return Err(LoadError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| LoadError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(ImageBuffer::from_rgb_image(resized))
}

/// Resize an image to fit within a `max_width x max_height` box while
/// preserving aspect ratio.
///
/// Images that already fit are returned unchanged; this never upscales.
///
/// # Errors
///
/// Returns `LoadError::InvalidDimensions` if the box or the image has zero area.
pub fn resize_to_fit(
    image: &ImageBuffer,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<ImageBuffer, LoadError> {
    if max_width == 0 || max_height == 0 {
        return Err(LoadError::InvalidDimensions {
            width: max_width,
            height: max_height,
        });
    }
    if image.is_empty() {
        return Err(LoadError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let (new_width, new_height) = fit_dimensions(image.width, image.height, max_width, max_height);
    resize(image, new_width, new_height, filter)
}

/// Generate a preview thumbnail that fits within a `size x size` box.
///
/// Uses Lanczos3, matching the quality of the viewport rendering.
pub fn generate_thumbnail(image: &ImageBuffer, size: u32) -> Result<ImageBuffer, LoadError> {
    resize_to_fit(image, size, size, FilterType::Lanczos3)
}
