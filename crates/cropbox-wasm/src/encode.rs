//! Image encoding WASM bindings.
//!
//! Standalone encoders for shells that manage their own `JsImageBuffer`s.
//! Inside an editor session, prefer `JsEditorSession::export`.
//!
//! # Example
//!
//! ```typescript
//! import { encode_image } from '@cropbox/wasm';
//!
//! const png = encode_image(image, 'png');
//! await writable.write(new Blob([png], { type: 'image/png' }));
//! ```

use crate::types::JsImageBuffer;
use cropbox_core::{encode, ExportFormat};
use wasm_bindgen::prelude::*;

/// Encode an image as `png`, `jpg`/`jpeg`, `bmp` or `tiff`.
///
/// JPEG output uses a fixed quality of 90.
///
/// # Errors
///
/// Returns an error if the format is unknown, the pixel data length doesn't
/// match width * height * 3, or encoding fails internally.
#[wasm_bindgen]
pub fn encode_image(image: &JsImageBuffer, format: &str) -> Result<Vec<u8>, JsValue> {
    encode_buffer(image, format).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Mime type for a format name, for building `Blob`s.
#[wasm_bindgen]
pub fn mime_type(format: &str) -> Result<String, JsValue> {
    let format =
        ExportFormat::from_extension(format).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(mime_for(format).to_string())
}

fn encode_buffer(image: &JsImageBuffer, format: &str) -> Result<Vec<u8>, encode::SaveError> {
    let format = ExportFormat::from_extension(format)?;
    encode::encode_image(&image.to_buffer(), format)
}

fn mime_for(format: ExportFormat) -> &'static str {
    match format {
        ExportFormat::Png => "image/png",
        ExportFormat::Jpeg => "image/jpeg",
        ExportFormat::Bmp => "image/bmp",
        ExportFormat::Tiff => "image/tiff",
    }
}

/// Tests for encode bindings.
///
/// Note: functions that return `Result<T, JsValue>` only work on wasm32
/// targets, so the native tests go through the inner helpers.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_signature() {
        let img = JsImageBuffer::new(10, 10, vec![128u8; 10 * 10 * 3]);
        let png = encode_buffer(&img, "png").unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_encode_jpeg_signature() {
        let img = JsImageBuffer::new(10, 10, vec![128u8; 10 * 10 * 3]);
        let jpeg = encode_buffer(&img, "JPEG").unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_rejects_unknown_format() {
        let img = JsImageBuffer::new(2, 2, vec![0u8; 12]);
        assert!(matches!(
            encode_buffer(&img, "gif"),
            Err(encode::SaveError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_encode_rejects_bad_pixel_data() {
        let img = JsImageBuffer::new(10, 10, vec![0u8; 10]);
        assert!(encode_buffer(&img, "png").is_err());
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(ExportFormat::Jpeg), "image/jpeg");
        assert_eq!(mime_for(ExportFormat::Tiff), "image/tiff");
    }
}
