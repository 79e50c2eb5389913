//! Cropbox Core - crop and resize engine
//!
//! This crate provides everything behind a small interactive image editor:
//! decoding, letterbox geometry, rubber-band cropping, percentage scaling,
//! bounded undo/redo and the session that ties them together. It has no UI
//! dependencies; hosts implement [`EditorShell`] to receive render requests
//! and status messages.

pub mod config;
pub mod controls;
pub mod decode;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod history;
pub mod render;
pub mod session;
pub mod transform;

pub use config::{ConfigError, EditorConfig};
pub use controls::{EditorAction, PointerEvent};
pub use decode::{decode_image, load_image, ImageBuffer, LoadError};
pub use encode::{encode_image, save_image, ExportFormat, FileSink, ImageSink, SaveError};
pub use error::{EditError, Result};
pub use geometry::{
    fit_to_viewport, image_to_viewport, viewport_to_image, PixelPoint, ViewportGeometry,
    ViewportPoint, ViewportRect,
};
pub use history::{HistoryDirection, HistoryStack};
pub use render::{compose_viewport, draw_selection, ViewportFrame};
pub use session::{
    EditorSession, EditorShell, EditorState, NoOpShell, Phase, RecordingShell, Status,
    StatusLevel,
};
pub use transform::{apply_crop, scale_by_percent, InvalidSelection, PixelRect, ScalePercent};
