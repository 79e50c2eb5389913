//! Coordinate mapping between viewport space and image pixel space.
//!
//! The editor shows the displayed image "letterboxed": scaled down to fit a
//! fixed-size viewport with its aspect ratio preserved, then centered, with
//! the leftover area painted in a neutral background.
//!
//! # Coordinate System
//!
//! - Viewport coordinates are signed, because a drag may leave the viewport
//! - Image coordinates are pixel indices, origin at the top-left corner
//! - All arithmetic is integer, truncating toward zero
//!
//! Every function here is pure.

use serde::{Deserialize, Serialize};

/// A point in viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewportPoint {
    pub x: i32,
    pub y: i32,
}

impl ViewportPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A pixel coordinate in image space.
///
/// Coordinates range over `[0, width] x [0, height]` inclusive, so a point
/// can name the right or bottom edge of the image as a half-open bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: u32,
    pub y: u32,
}

impl PixelPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A normalized rectangle in viewport space (`min <= max` on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl ViewportRect {
    /// Build a rectangle from two unordered corners.
    pub fn from_corners(a: ViewportPoint, b: ViewportPoint) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> u32 {
        self.max_x.abs_diff(self.min_x)
    }

    pub fn height(&self) -> u32 {
        self.max_y.abs_diff(self.min_y)
    }
}

/// Result of fitting an image into a fixed-size viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportGeometry {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub displayed_width: u32,
    pub displayed_height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

impl ViewportGeometry {
    /// Whether `point` lies strictly inside the displayed image region.
    pub fn contains(&self, point: ViewportPoint) -> bool {
        let x = i64::from(point.x) - i64::from(self.offset_x);
        let y = i64::from(point.y) - i64::from(self.offset_y);
        x > 0
            && y > 0
            && x < i64::from(self.displayed_width)
            && y < i64::from(self.displayed_height)
    }
}

/// Dimensions of an image scaled to fit a box, preserving aspect ratio.
///
/// Never upscales: an image that already fits keeps its size. The constrained
/// axis takes the box size exactly and the other axis is truncated, with a
/// floor of one pixel. Zero-area input yields `(0, 0)`.
pub fn fit_dimensions(width: u32, height: u32, box_width: u32, box_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width <= box_width && height <= box_height {
        return (width, height);
    }

    let (w, h) = (u64::from(width), u64::from(height));
    let (bw, bh) = (u64::from(box_width), u64::from(box_height));

    // Compare bw/w against bh/h without division.
    if bw * h <= bh * w {
        let new_height = (h * bw / w).max(1);
        (box_width, new_height as u32)
    } else {
        let new_width = (w * bh / h).max(1);
        (new_width as u32, box_height)
    }
}

/// Fit an image into a viewport and center it.
///
/// Offsets use truncating integer division, so an odd leftover margin puts
/// the extra pixel on the right or bottom.
pub fn fit_to_viewport(
    image_width: u32,
    image_height: u32,
    viewport_width: u32,
    viewport_height: u32,
) -> ViewportGeometry {
    let (displayed_width, displayed_height) =
        fit_dimensions(image_width, image_height, viewport_width, viewport_height);

    ViewportGeometry {
        viewport_width,
        viewport_height,
        displayed_width,
        displayed_height,
        offset_x: (viewport_width - displayed_width) / 2,
        offset_y: (viewport_height - displayed_height) / 2,
    }
}

/// Map a viewport point to an image pixel coordinate.
///
/// The point is clamped to the displayed region first, since it may sit in
/// the letterbox margin, and clamped to the image bounds again after scaling.
pub fn viewport_to_image(
    point: ViewportPoint,
    geometry: &ViewportGeometry,
    image_width: u32,
    image_height: u32,
) -> PixelPoint {
    PixelPoint {
        x: unscale_axis(
            point.x,
            geometry.offset_x,
            geometry.displayed_width,
            image_width,
        ),
        y: unscale_axis(
            point.y,
            geometry.offset_y,
            geometry.displayed_height,
            image_height,
        ),
    }
}

/// Map an image pixel coordinate to a viewport point (the forward fit).
pub fn image_to_viewport(
    pixel: PixelPoint,
    geometry: &ViewportGeometry,
    image_width: u32,
    image_height: u32,
) -> ViewportPoint {
    ViewportPoint {
        x: scale_axis(
            pixel.x,
            geometry.offset_x,
            geometry.displayed_width,
            image_width,
        ),
        y: scale_axis(
            pixel.y,
            geometry.offset_y,
            geometry.displayed_height,
            image_height,
        ),
    }
}

fn unscale_axis(value: i32, offset: u32, displayed: u32, image: u32) -> u32 {
    if displayed == 0 {
        return 0;
    }
    let local = (i64::from(value) - i64::from(offset)).clamp(0, i64::from(displayed));
    let pixel = local * i64::from(image) / i64::from(displayed);
    pixel.clamp(0, i64::from(image)) as u32
}

fn scale_axis(value: u32, offset: u32, displayed: u32, image: u32) -> i32 {
    if image == 0 {
        return offset as i32;
    }
    let local = u64::from(value.min(image)) * u64::from(displayed) / u64::from(image);
    (local + u64::from(offset)) as i32
}


// ============================================================================
// Property-Based Tests
// ============================================================================
