//! Cropbox WASM - WebAssembly bindings for the cropbox editor
//!
//! This crate exposes the cropbox-core editor session to a browser shell.
//! The shell draws the canvas and the side panels, opens file dialogs and
//! forwards input; everything else happens here.
//!
//! # Module Structure
//!
//! - `session` - The interactive editor session (load, drag-to-crop, scale,
//!   undo/redo, reset, export)
//! - `types` - WASM-compatible wrapper types for image data
//! - `encode` - Standalone image encoding bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditorSession } from '@cropbox/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsEditorSession();
//! editor.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! console.log(editor.status_message()); // "Loaded: 1000x800"
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod session;
mod types;

// Re-export public types
pub use encode::{encode_image, mime_type};
pub use session::JsEditorSession;
pub use types::JsImageBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
