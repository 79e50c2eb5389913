//! Image cropping in pixel coordinates.
//!
//! A crop region is given by two corners in image pixel space, in any order.
//! The region is half-open: `[min_x, max_x) x [min_y, max_y)`.
//!
//! # Example
//!
//! ```ignore
//! let rect = PixelRect::from_corners(PixelPoint::new(10, 10), PixelPoint::new(60, 40));
//! let cropped = apply_crop(&image, rect)?; // 50x30
//! ```

use thiserror::Error;

use crate::decode::ImageBuffer;
use crate::geometry::PixelPoint;

/// A crop rectangle rejected because it is too small to be a real selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid crop selection: {width}x{height} pixels")]
pub struct InvalidSelection {
    pub width: u32,
    pub height: u32,
}

/// A normalized crop rectangle in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl PixelRect {
    /// Build a rectangle from two unordered corners.
    pub fn from_corners(a: PixelPoint, b: PixelPoint) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    /// Clip the rectangle to `[0, width] x [0, height]`.
    fn clamped_to(self, width: u32, height: u32) -> Self {
        Self {
            min_x: self.min_x.min(width),
            min_y: self.min_y.min(height),
            max_x: self.max_x.min(width),
            max_y: self.max_y.min(height),
        }
    }
}

/// Extract a rectangular region of an image into a new buffer.
///
/// The rectangle is clipped to the image bounds first.
///
/// # Errors
///
/// Returns `InvalidSelection` when the clipped region is one pixel or less
/// wide or tall, which is what a click without a drag produces.
pub fn apply_crop(image: &ImageBuffer, rect: PixelRect) -> Result<ImageBuffer, InvalidSelection> {
    let rect = rect.clamped_to(image.width, image.height);
    let (out_width, out_height) = (rect.width(), rect.height());

    if out_width <= 1 || out_height <= 1 {
        return Err(InvalidSelection {
            width: out_width,
            height: out_height,
        });
    }

    // Fast path: full crop returns a clone
    if out_width == image.width && out_height == image.height {
        return Ok(image.clone());
    }

    let src_stride = image.width as usize * 3;
    let row_len = out_width as usize * 3;
    let mut output = Vec::with_capacity(row_len * out_height as usize);

    // Copy pixel data row by row
    for y in rect.min_y..rect.max_y {
        let start = y as usize * src_stride + rect.min_x as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Ok(ImageBuffer::new(out_width, out_height, output))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> ImageBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                // Use position to create unique pixel values
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v); // R
                pixels.push(v); // G
                pixels.push(v); // B
            }
        }
        ImageBuffer::new(width, height, pixels)
    }

    fn rect(x0: u32, y0: u32, x1: u32, y1: u32) -> PixelRect {
        PixelRect::from_corners(PixelPoint::new(x0, y0), PixelPoint::new(x1, y1))
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(100, 100);
        let result = apply_crop(&img, rect(0, 0, 100, 100)).unwrap();

        assert_eq!(result, img);
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, rect(2, 2, 8, 8)).unwrap();

        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);

        // First pixel should be from position (2, 2) in the original
        // Value at (2, 2) = (2 * 10 + 2) % 256 = 22
        assert_eq!(result.pixels[0], 22);
    }

    #[test]
    fn test_unordered_corners_are_normalized() {
        let img = test_image(10, 10);
        let a = apply_crop(&img, rect(8, 7, 3, 2)).unwrap();
        let b = apply_crop(&img, rect(3, 2, 8, 7)).unwrap();

        assert_eq!(a, b);
        assert_eq!((a.width, a.height), (5, 5));
    }

    #[test]
    fn test_crop_is_half_open() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, rect(3, 3, 7, 5)).unwrap();

        assert_eq!((result.width, result.height), (4, 2));
        // Last pixel comes from (6, 4): (4 * 10 + 6) = 46
        assert_eq!(result.pixel(3, 1), Some([46, 46, 46]));
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, rect(8, 8, 50, 50)).unwrap();

        assert_eq!((result.width, result.height), (2, 2));
    }

    #[test]
    fn test_click_without_drag_is_invalid() {
        let img = test_image(10, 10);
        let err = apply_crop(&img, rect(4, 4, 4, 4)).unwrap_err();

        assert_eq!(
            err,
            InvalidSelection {
                width: 0,
                height: 0
            }
        );
    }

    #[test]
    fn test_one_pixel_wide_is_invalid() {
        let img = test_image(10, 10);
        assert!(apply_crop(&img, rect(4, 0, 5, 10)).is_err());
        assert!(apply_crop(&img, rect(0, 4, 10, 5)).is_err());
    }

    #[test]
    fn test_two_pixels_is_valid() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, rect(4, 4, 6, 6)).unwrap();
        assert_eq!((result.width, result.height), (2, 2));
    }

    #[test]
    fn test_selection_entirely_outside_is_invalid() {
        let img = test_image(10, 10);
        assert!(apply_crop(&img, rect(20, 20, 40, 40)).is_err());
    }

    #[test]
    fn test_crop_result_is_independent() {
        let img = test_image(10, 10);
        let mut result = apply_crop(&img, rect(0, 0, 10, 10)).unwrap();
        result.pixels[0] = 255;

        assert_eq!(img.pixels[0], 0);
    }

    #[test]
    fn test_invalid_selection_display() {
        let err = InvalidSelection {
            width: 1,
            height: 40,
        };
        assert_eq!(err.to_string(), "Invalid crop selection: 1x40 pixels");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
