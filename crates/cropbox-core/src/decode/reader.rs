//! Image decoding from bytes or files, with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;
use tracing::debug;

use super::{ImageBuffer, LoadError, Orientation};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The format is guessed from the content. JPEG, PNG, BMP and TIFF are
/// supported.
///
/// # Errors
///
/// Returns `LoadError::InvalidFormat` if the format can't be recognized,
/// `LoadError::CorruptedFile` if decoding fails, and
/// `LoadError::InvalidDimensions` for zero-area images.
pub fn decode_image(bytes: &[u8]) -> Result<ImageBuffer, LoadError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| LoadError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(LoadError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| LoadError::CorruptedFile(e.to_string()))?;

    let rgb = apply_orientation(img, orientation).into_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(LoadError::InvalidDimensions { width, height });
    }

    debug!(width, height, ?orientation, "Decoded image");
    Ok(ImageBuffer::from_rgb_image(rgb))
}

/// Read and decode an image file.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file can't be read, otherwise the same
/// errors as [`decode_image`].
pub fn load_image(path: impl AsRef<Path>) -> Result<ImageBuffer, LoadError> {
    let bytes = std::fs::read(path.as_ref())?;
    decode_image(&bytes)
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 10) as u8, (y * 10) as u8, 128])
        });
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png_preserves_pixels() {
        let bytes = encoded(8, 6, ImageFormat::Png);
        let img = decode_image(&bytes).unwrap();

        assert_eq!(img.dimensions(), (8, 6));
        assert_eq!(img.pixel(3, 2), Some([30, 20, 128]));
    }

    #[test]
    fn test_decode_bmp() {
        let bytes = encoded(5, 5, ImageFormat::Bmp);
        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.dimensions(), (5, 5));
    }

    #[test]
    fn test_decode_jpeg_dimensions() {
        let bytes = encoded(16, 12, ImageFormat::Jpeg);
        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.dimensions(), (16, 12));
        assert_eq!(img.byte_size(), 16 * 12 * 3);
    }

    #[test]
    fn test_decode_garbage_is_invalid_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(LoadError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png_is_corrupted() {
        let bytes = encoded(32, 32, ImageFormat::Png);
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(LoadError::CorruptedFile(_))));
    }

    #[test]
    fn test_load_image_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.png");
        std::fs::write(&path, encoded(4, 3, ImageFormat::Png)).unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!(img.dimensions(), (4, 3));
    }

    #[test]
    fn test_load_image_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_image(dir.path().join("missing.png"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_orientation_without_exif_is_normal() {
        let bytes = encoded(4, 4, ImageFormat::Png);
        assert_eq!(extract_orientation(&bytes), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate_swaps_dimensions() {
        let img = DynamicImage::new_rgb8(10, 4);
        let rotated = apply_orientation(img, Orientation::Rotate90CW);
        assert_eq!((rotated.width(), rotated.height()), (4, 10));
    }
}
