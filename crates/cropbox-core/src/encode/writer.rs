//! Encoding and writing of image buffers.
//!
//! JPEG goes through the `image` crate's encoder with a fixed quality; the
//! lossless formats use `image::write_buffer_with_format`.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::decode::ImageBuffer;

/// JPEG quality used for saving (1-100).
pub const JPEG_QUALITY: u8 = 90;

/// Errors that can occur while encoding or writing an image.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The target extension doesn't name a supported format
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Encoding failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// I/O error during file writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Formats the editor can save to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
    Tiff,
}

impl ExportFormat {
    /// Resolve a format from a file extension (case-insensitive, no dot).
    pub fn from_extension(ext: &str) -> Result<Self, SaveError> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg),
            "bmp" => Ok(ExportFormat::Bmp),
            "tif" | "tiff" => Ok(ExportFormat::Tiff),
            other => Err(SaveError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Resolve a format from a path's extension. Paths without an extension
    /// are saved as PNG.
    pub fn from_path(path: &Path) -> Result<Self, SaveError> {
        match path.extension() {
            None => Ok(ExportFormat::Png),
            Some(ext) => Self::from_extension(&ext.to_string_lossy()),
        }
    }

    /// Canonical file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Bmp => "bmp",
            ExportFormat::Tiff => "tiff",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
            ExportFormat::Bmp => ImageFormat::Bmp,
            ExportFormat::Tiff => ImageFormat::Tiff,
        }
    }
}

/// Destination for a saved image.
///
/// The editor hands the buffer over unchanged; the sink decides how and where
/// it is written.
pub trait ImageSink {
    fn write_image(&mut self, image: &ImageBuffer) -> Result<(), SaveError>;
}

/// Writes images to a file, choosing the format from the extension.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSink for FileSink {
    fn write_image(&mut self, image: &ImageBuffer) -> Result<(), SaveError> {
        save_image(image, &self.path).map(|_| ())
    }
}

/// Encode an image to bytes in the given format.
///
/// # Errors
///
/// Returns `SaveError::InvalidDimensions` for zero-area images,
/// `SaveError::InvalidPixelData` if the buffer length is wrong and
/// `SaveError::EncodingFailed` if the encoder fails.
pub fn encode_image(image: &ImageBuffer, format: ExportFormat) -> Result<Vec<u8>, SaveError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(SaveError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if image.pixels.len() != expected_len {
        return Err(SaveError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());

    match format {
        ExportFormat::Jpeg => JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY)
            .write_image(&image.pixels, width, height, ExtendedColorType::Rgb8),
        other => image::write_buffer_with_format(
            &mut buffer,
            &image.pixels,
            width,
            height,
            ExtendedColorType::Rgb8,
            other.image_format(),
        ),
    }
    .map_err(|e| SaveError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode an image and write it to `path`.
///
/// Returns the format that was used.
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>) -> Result<ExportFormat, SaveError> {
    let path = path.as_ref();
    let format = ExportFormat::from_path(path)?;
    let bytes = encode_image(image, format)?;
    std::fs::write(path, &bytes)?;

    info!(
        path = %path.display(),
        ?format,
        width = image.width,
        height = image.height,
        "Saved image"
    );
    Ok(format)
}
