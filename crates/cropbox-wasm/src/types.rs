//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core cropbox
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use cropbox_core::ImageBuffer;
use wasm_bindgen::prelude::*;

/// An RGB image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` and `rgba_pixels()`
/// copy it out to a JavaScript `Uint8Array`, so keep the image in WASM memory
/// and only extract pixels when they are about to be drawn.
#[wasm_bindgen]
pub struct JsImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImageBuffer {
    /// Create a new image from dimensions and RGB pixel data
    /// (3 bytes per pixel, row-major order).
    ///
    /// The data is validated when the image is handed to an editor session.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImageBuffer {
        JsImageBuffer {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns RGBA pixel data with opaque alpha, ready for `ImageData`.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for rgb in self.pixels.chunks_exact(3) {
            rgba.extend_from_slice(rgb);
            rgba.push(255);
        }
        rgba
    }

    /// RGBA pixel data as a `Uint8ClampedArray`, for `new ImageData(...)`.
    pub fn image_data_array(&self) -> js_sys::Uint8ClampedArray {
        js_sys::Uint8ClampedArray::from(self.rgba_pixels().as_slice())
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsImageBuffer {
    pub(crate) fn from_buffer(image: ImageBuffer) -> Self {
        Self {
            width: image.width,
            height: image.height,
            pixels: image.pixels,
        }
    }

    /// Convert to a core buffer without validating it. Note: this clones the
    /// pixel data.
    pub(crate) fn to_buffer(&self) -> ImageBuffer {
        ImageBuffer {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_getters() {
        let img = JsImageBuffer::new(4, 2, vec![7u8; 24]);
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 2);
        assert_eq!(img.byte_length(), 24);
        assert_eq!(img.pixels(), vec![7u8; 24]);
    }

    #[test]
    fn test_rgba_pixels_adds_alpha() {
        let img = JsImageBuffer::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(img.rgba_pixels(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_buffer_conversion() {
        let buffer = ImageBuffer::filled(3, 3, [10, 20, 30]);
        let img = JsImageBuffer::from_buffer(buffer.clone());
        assert_eq!(img.to_buffer(), buffer);
    }
}
