//! Percentage scaling of the crop baseline.
//!
//! Scaling always starts from the unscaled crop result, never from a
//! previously scaled buffer, so the output depends only on the baseline and
//! the percentage. Scaling to 100% returns the baseline unchanged.

use serde::{Deserialize, Serialize};

use crate::decode::{resize, FilterType, ImageBuffer, LoadError};

/// Scale percentage bounds (10% to 200%).
pub mod scale_bounds {
    /// Minimum scale percentage.
    pub const MIN: u32 = 10;
    /// Maximum scale percentage.
    pub const MAX: u32 = 200;
    /// Default scale percentage.
    pub const DEFAULT: u32 = 100;
}

/// Scale percentage, guaranteed to be within the valid range (10%–200%).
///
/// Values outside the range are clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct ScalePercent(u32);

impl ScalePercent {
    /// Creates a new scale, clamping the value to the valid range.
    #[must_use]
    pub fn new(percent: u32) -> Self {
        Self(percent.clamp(scale_bounds::MIN, scale_bounds::MAX))
    }

    /// Returns the raw percentage value.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Whether this is the identity scale (100%).
    #[must_use]
    pub fn is_identity(self) -> bool {
        self.0 == 100
    }

    /// Applies the scale to the given dimensions, rounding to the nearest
    /// pixel. Both dimensions are at least 1 pixel.
    #[must_use]
    pub fn apply_to_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        (self.apply_to(width), self.apply_to(height))
    }

    fn apply_to(self, length: u32) -> u32 {
        let scaled = (u64::from(length) * u64::from(self.0) + 50) / 100;
        scaled.clamp(1, u64::from(u32::MAX)) as u32
    }
}

impl Default for ScalePercent {
    fn default() -> Self {
        Self(scale_bounds::DEFAULT)
    }
}

impl From<u32> for ScalePercent {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<ScalePercent> for u32 {
    fn from(value: ScalePercent) -> Self {
        value.0
    }
}

/// Scale an image by a percentage.
///
/// Downscaling uses area-averaging bilinear filtering and upscaling uses
/// Catmull-Rom. At 100% the input is returned as an exact copy.
///
/// # Errors
///
/// Returns `LoadError::CorruptedFile` if the buffer doesn't match its
/// declared dimensions.
pub fn scale_by_percent(
    image: &ImageBuffer,
    scale: ScalePercent,
) -> Result<ImageBuffer, LoadError> {
    let (width, height) = scale.apply_to_dimensions(image.width, image.height);
    let filter = if scale.value() < 100 {
        FilterType::Bilinear
    } else {
        FilterType::CatmullRom
    };
    resize(image, width, height, filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn gradient(width: u32, height: u32) -> ImageBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 64]);
            }
        }
        ImageBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_scale_clamps_to_bounds() {
        assert_eq!(ScalePercent::new(0).value(), 10);
        assert_eq!(ScalePercent::new(5).value(), 10);
        assert_eq!(ScalePercent::new(250).value(), 200);
        assert_eq!(ScalePercent::new(75).value(), 75);
        assert_eq!(ScalePercent::default().value(), 100);
        assert!(ScalePercent::default().is_identity());
    }

    #[test]
    fn test_apply_to_dimensions_rounds() {
        // 333 * 0.5 = 166.5 -> 167
        assert_eq!(ScalePercent::new(50).apply_to_dimensions(333, 100), (167, 50));
        // 7 * 0.1 = 0.7 -> 1
        assert_eq!(ScalePercent::new(10).apply_to_dimensions(7, 4), (1, 1));
        assert_eq!(ScalePercent::new(200).apply_to_dimensions(640, 480), (1280, 960));
    }

    #[test]
    fn test_scale_half() {
        let img = gradient(1000, 800);
        let out = scale_by_percent(&img, ScalePercent::new(50)).unwrap();
        assert_eq!((out.width, out.height), (500, 400));
    }

    #[test]
    fn test_scale_up() {
        let img = gradient(40, 30);
        let out = scale_by_percent(&img, ScalePercent::new(150)).unwrap();
        assert_eq!((out.width, out.height), (60, 45));
    }

    #[test]
    fn test_identity_scale_is_exact() {
        let img = gradient(37, 21);
        let out = scale_by_percent(&img, ScalePercent::default()).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_downscale_averages_uniform_color() {
        let img = ImageBuffer::filled(64, 64, [200, 100, 50]);
        let out = scale_by_percent(&img, ScalePercent::new(25)).unwrap();
        assert_eq!((out.width, out.height), (16, 16));
        assert_eq!(out.pixel(8, 8), Some([200, 100, 50]));
    }

    #[test]
    fn test_scale_percent_serde_clamps() {
        let parsed: ScalePercent = toml::from_str::<Wrapper>("scale = 900").unwrap().scale;
        assert_eq!(parsed.value(), 200);

        #[derive(Deserialize)]
        struct Wrapper {
            scale: ScalePercent,
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
