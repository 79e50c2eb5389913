//! Image loading for the editor.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG, BMP and TIFF images (with EXIF orientation)
//! - The `ImageBuffer` type every other module works with
//! - Image resizing for previews and the viewport
//!
//! All operations are synchronous and run on the caller's thread.
//!
//! # Examples
//!
//! ```ignore
//! use cropbox_core::decode::load_image;
//!
//! let image = load_image("photo.jpg")?;
//! println!("Loaded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, load_image};
pub use resize::{generate_thumbnail, resize, resize_to_fit};
pub use types::{FilterType, ImageBuffer, LoadError, Orientation};
