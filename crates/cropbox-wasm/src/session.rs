//! Editor session WASM bindings.
//!
//! The browser shell owns the canvas, the file picker and the buttons; this
//! wrapper owns the editor. The shell forwards pointer events and button
//! presses, then polls the wrapper for the frame, the side-panel previews
//! and the latest status message.
//!
//! # Example
//!
//! ```typescript
//! import { JsEditorSession } from '@cropbox/wasm';
//!
//! const editor = new JsEditorSession({ history_depth: 50 });
//! editor.load_bytes(new Uint8Array(await file.arrayBuffer()));
//!
//! canvas.onmousedown = (e) => editor.pointer_down(e.offsetX, e.offsetY);
//! canvas.onmousemove = (e) => { editor.pointer_move(e.offsetX, e.offsetY); redraw(); };
//! canvas.onmouseup = (e) => { editor.pointer_up(e.offsetX, e.offsetY); redraw(); };
//!
//! function redraw() {
//!   const frame = editor.frame();
//!   if (!frame) return;
//!   const data = new ImageData(new Uint8ClampedArray(frame.rgba_pixels()), frame.width);
//!   ctx.putImageData(data, 0, 0);
//!   statusBar.textContent = editor.status_message() ?? '';
//! }
//! ```

use cropbox_core::render::{placeholder_panel, preview_panel};
use cropbox_core::{
    EditError, EditorAction, EditorConfig, EditorSession, ExportFormat, Phase, RecordingShell,
    StatusLevel, ViewportPoint,
};
use wasm_bindgen::prelude::*;

use crate::types::JsImageBuffer;

/// An interactive crop/resize session for JavaScript.
#[wasm_bindgen]
pub struct JsEditorSession {
    inner: EditorSession<RecordingShell>,
}

#[wasm_bindgen]
impl JsEditorSession {
    /// Create a session.
    ///
    /// `config` is an optional object with any of the `EditorConfig` keys
    /// (`viewport_width`, `viewport_height`, `background`, `selection_color`,
    /// `selection_stroke`, `history_depth`, `preview_size`). Missing keys use
    /// their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditorSession, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        Self::with_config(config).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Decode an encoded image (JPEG, PNG, BMP, TIFF) and load it.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_bytes(bytes).map_err(to_js_error)
    }

    /// Load an already decoded RGB image.
    pub fn load_image(&mut self, image: &JsImageBuffer) -> Result<(), JsValue> {
        self.inner.load(image.to_buffer()).map_err(to_js_error)
    }

    /// Primary button pressed at viewport coordinates.
    pub fn pointer_down(&mut self, x: i32, y: i32) {
        self.inner.begin_selection(ViewportPoint::new(x, y));
    }

    /// Pointer moved while the button is held.
    pub fn pointer_move(&mut self, x: i32, y: i32) {
        self.inner.update_selection(ViewportPoint::new(x, y));
    }

    /// Primary button released; crops to the dragged rectangle.
    pub fn pointer_up(&mut self, x: i32, y: i32) -> Result<(), JsValue> {
        self.inner
            .end_selection(ViewportPoint::new(x, y))
            .map_err(to_js_error)
    }

    /// Set the scale slider value (clamped to 10-200).
    pub fn set_scale(&mut self, percent: u32) -> Result<(), JsValue> {
        self.inner.set_scale(percent).map_err(to_js_error)
    }

    pub fn undo(&mut self) -> Result<(), JsValue> {
        self.inner.undo().map_err(to_js_error)
    }

    pub fn redo(&mut self) -> Result<(), JsValue> {
        self.inner.redo().map_err(to_js_error)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Handle a keyboard shortcut.
    ///
    /// Undo and redo run immediately. Load and save need a file dialog, so
    /// they are returned as `"load"` or `"save"` for the shell to handle.
    /// Returns `undefined` for unbound keys.
    pub fn handle_shortcut(&mut self, ctrl: bool, key: &str) -> Result<Option<String>, JsValue> {
        let Some(action) = key
            .chars()
            .next()
            .and_then(|c| EditorAction::from_shortcut(ctrl, c))
        else {
            return Ok(None);
        };
        match action {
            EditorAction::Undo => self.undo().map(|()| None),
            EditorAction::Redo => self.redo().map(|()| None),
            EditorAction::Reset => {
                self.reset();
                Ok(None)
            }
            EditorAction::Load => Ok(Some("load".to_string())),
            EditorAction::Save => Ok(Some("save".to_string())),
        }
    }

    /// Encode the working image as `png`, `jpg`/`jpeg`, `bmp` or `tiff`.
    pub fn export(&mut self, format: &str) -> Result<Vec<u8>, JsValue> {
        let format = ExportFormat::from_extension(format).map_err(|e| to_js_error(e.into()))?;
        self.inner.export(format).map_err(to_js_error)
    }

    /// The viewport canvas with the letterboxed image and any live selection.
    /// Returns `undefined` while no image is loaded.
    pub fn frame(&self) -> Result<Option<JsImageBuffer>, JsValue> {
        let frame = self.inner.frame().map_err(to_js_error)?;
        Ok(frame.map(|frame| JsImageBuffer::from_buffer(frame.canvas)))
    }

    /// Side-panel preview of the loaded image.
    pub fn original_preview(&self) -> Result<JsImageBuffer, JsValue> {
        self.preview(self.inner.original_image())
    }

    /// Side-panel preview of the working image, or a placeholder before the
    /// first crop.
    pub fn result_preview(&self) -> Result<JsImageBuffer, JsValue> {
        self.preview(self.inner.working_image())
    }

    /// Letterbox geometry of the displayed image as a plain object.
    pub fn geometry(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.geometry())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Live selection rectangle in viewport coordinates.
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.selection())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// One of `empty`, `loaded`, `cropped`, `resized`.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        phase_name(self.inner.phase()).to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> u32 {
        self.inner.scale().value()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    /// Number of renders requested so far; poll to detect redraws.
    #[wasm_bindgen(getter)]
    pub fn render_count(&self) -> usize {
        self.inner.shell().render_count()
    }

    /// Latest status bar text.
    pub fn status_message(&self) -> Option<String> {
        self.inner
            .shell()
            .last_status()
            .map(|status| status.message.clone())
    }

    /// Severity of the latest status: `info`, `warning` or `error`.
    pub fn status_level(&self) -> Option<String> {
        self.inner
            .shell()
            .last_status()
            .map(|status| level_name(status.level).to_string())
    }
}

impl JsEditorSession {
    pub(crate) fn with_config(config: EditorConfig) -> Result<Self, cropbox_core::ConfigError> {
        Ok(Self {
            inner: EditorSession::new(config, RecordingShell::new())?,
        })
    }

    fn preview(&self, image: Option<&cropbox_core::ImageBuffer>) -> Result<JsImageBuffer, JsValue> {
        let panel = match image {
            Some(image) => preview_panel(image, self.inner.config().preview_size)
                .map_err(|e| to_js_error(EditError::Resample(e)))?,
            None => placeholder_panel(),
        };
        Ok(JsImageBuffer::from_buffer(panel))
    }
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Empty => "empty",
        Phase::Loaded => "loaded",
        Phase::Cropped => "cropped",
        Phase::Resized => "resized",
    }
}

fn level_name(level: StatusLevel) -> &'static str {
    match level {
        StatusLevel::Info => "info",
        StatusLevel::Warning => "warning",
        StatusLevel::Error => "error",
    }
}

/// Convert an editor error for JavaScript, echoing it to the console.
fn to_js_error(err: EditError) -> JsValue {
    let message = JsValue::from_str(&err.to_string());
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message);
    message
}

/// Tests for session bindings.
///
/// Native tests stay on success paths: anything that builds a `JsValue`
/// only works on wasm32 targets.
#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> JsImageBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 64]);
            }
        }
        JsImageBuffer::new(width, height, pixels)
    }

    fn loaded() -> JsEditorSession {
        let mut session = JsEditorSession::with_config(EditorConfig::default()).unwrap();
        assert!(session.load_image(&gradient(1000, 800)).is_ok());
        session
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = EditorConfig {
            viewport_width: 0,
            ..EditorConfig::default()
        };
        assert!(JsEditorSession::with_config(config).is_err());
    }

    #[test]
    fn test_initial_state() {
        let session = JsEditorSession::with_config(EditorConfig::default()).unwrap();
        assert_eq!(session.phase(), "empty");
        assert_eq!(session.scale(), 100);
        assert!(session.status_message().is_none());
        assert!(session.frame().is_ok_and(|frame| frame.is_none()));
    }

    #[test]
    fn test_load_and_frame() {
        let session = loaded();

        assert_eq!(session.phase(), "loaded");
        assert_eq!(session.status_message().as_deref(), Some("Loaded: 1000x800"));
        assert_eq!(session.status_level().as_deref(), Some("info"));
        assert_eq!(session.render_count(), 1);

        let frame = session.frame().ok().flatten().unwrap();
        assert_eq!((frame.width(), frame.height()), (600, 400));
        assert_eq!(&frame.pixels()[0..3], &[128, 128, 128]);
    }

    #[test]
    fn test_drag_scale_and_history() {
        let mut session = loaded();

        session.pointer_down(50, 0);
        session.pointer_move(550, 400);
        assert!(session.pointer_up(550, 400).is_ok());
        assert_eq!(session.phase(), "cropped");

        assert!(session.set_scale(50).is_ok());
        assert_eq!(session.phase(), "resized");
        assert_eq!(session.scale(), 50);
        assert_eq!(session.status_message().as_deref(), Some("Resized to 500x400"));

        assert!(session.handle_shortcut(true, "z").is_ok_and(|a| a.is_none()));
        assert_eq!(session.status_message().as_deref(), Some("Undo performed."));
        assert!(session.can_redo());
    }

    #[test]
    fn test_shortcuts_for_dialogs() {
        let mut session = loaded();
        assert!(session
            .handle_shortcut(true, "O")
            .is_ok_and(|action| action.as_deref() == Some("load")));
        assert!(session
            .handle_shortcut(true, "s")
            .is_ok_and(|action| action.as_deref() == Some("save")));
        assert!(session
            .handle_shortcut(false, "z")
            .is_ok_and(|action| action.is_none()));
    }

    #[test]
    fn test_export_after_crop() {
        let mut session = loaded();
        session.pointer_down(100, 100);
        assert!(session.pointer_up(300, 300).is_ok());

        let bytes = session.export("jpg").ok().unwrap();
        // JPEG magic bytes
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_previews() {
        let mut session = loaded();

        let original = session.original_preview().ok().unwrap();
        assert_eq!((original.width(), original.height()), (300, 240));

        let placeholder = session.result_preview().ok().unwrap();
        assert_eq!(placeholder.to_buffer(), placeholder_panel());

        session.pointer_down(100, 100);
        assert!(session.pointer_up(300, 300).is_ok());
        let result = session.result_preview().ok().unwrap();
        assert_eq!((result.width(), result.height()), (300, 300));
    }

    #[test]
    fn test_reset() {
        let mut session = loaded();
        session.pointer_down(100, 100);
        assert!(session.pointer_up(300, 300).is_ok());

        session.reset();

        assert_eq!(session.phase(), "loaded");
        assert!(!session.can_undo());
        assert_eq!(
            session.status_message().as_deref(),
            Some("Image reset to original.")
        );
    }
}
