//! Image encoding for saving the edited result.
//!
//! This module provides functionality for:
//! - Resolving an export format from a file extension
//! - Encoding images to PNG, JPEG, BMP or TIFF
//! - Writing encoded images to disk through an `ImageSink`
//!
//! # Examples
//!
//! ```ignore
//! use cropbox_core::encode::{encode_image, ExportFormat};
//!
//! let bytes = encode_image(&image, ExportFormat::Png)?;
//! println!("Encoded {} bytes", bytes.len());
//! ```

mod writer;

pub use writer::{
    encode_image, save_image, ExportFormat, FileSink, ImageSink, SaveError, JPEG_QUALITY,
};
