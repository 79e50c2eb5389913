//! The editor session: load an image, drag a selection over its letterboxed
//! preview, crop, scale, step through history and save.
//!
//! # Architecture
//!
//! The session owns one [`EditorState`] value and replaces it wholesale on
//! every successful operation. Fallible work (decoding, mapping and cropping
//! the selection, resampling) happens before the state is touched, so an
//! error always leaves the editor exactly as it was.
//!
//! Output goes to an [`EditorShell`]: render requests whenever the displayed
//! image changes, the selection overlay while dragging, and status messages.
//!
//! Sessions are single-threaded and not re-entrant; the host drives them from
//! its UI thread.
//!
//! # Example
//!
//! ```ignore
//! let mut session = EditorSession::new(EditorConfig::default(), NoOpShell)?;
//! session.load_path("photo.jpg")?;
//! session.begin_selection(ViewportPoint::new(50, 0));
//! session.end_selection(ViewportPoint::new(550, 400))?;
//! session.set_scale(50)?;
//! session.save_to_path("photo-small.png")?;
//! ```

mod shell;
mod state;

pub use shell::{EditorShell, NoOpShell, RecordingShell, Status, StatusLevel};
pub use state::{EditorState, Phase};

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::{ConfigError, EditorConfig};
use crate::controls::{PointerEvent, ScalePercent};
use crate::decode::{decode_image, load_image, ImageBuffer, LoadError};
use crate::encode::{encode_image, save_image, ExportFormat, ImageSink};
use crate::error::{EditError, Result};
use crate::geometry::{
    fit_to_viewport, viewport_to_image, ViewportGeometry, ViewportPoint, ViewportRect,
};
use crate::history::HistoryDirection;
use crate::render::{compose_viewport, draw_selection, ViewportFrame};
use crate::transform::{apply_crop, scale_by_percent, PixelRect};

/// An in-progress drag, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: ViewportPoint,
    pub end: ViewportPoint,
}

impl Selection {
    pub fn rect(&self) -> ViewportRect {
        ViewportRect::from_corners(self.start, self.end)
    }
}

pub struct EditorSession<S = NoOpShell> {
    config: EditorConfig,
    state: EditorState,
    geometry: Option<ViewportGeometry>,
    selection: Option<Selection>,
    shell: S,
}

impl Default for EditorSession<NoOpShell> {
    fn default() -> Self {
        Self {
            config: EditorConfig::default(),
            state: EditorState::default(),
            geometry: None,
            selection: None,
            shell: NoOpShell,
        }
    }
}

impl<S: EditorShell> EditorSession<S> {
    /// Create an empty session.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the configuration fails validation.
    pub fn new(config: EditorConfig, shell: S) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: EditorState::default(),
            geometry: None,
            selection: None,
            shell,
        })
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Load an already decoded image, replacing everything in the session.
    ///
    /// # Errors
    ///
    /// Returns `EditError::Load` for zero-area buffers or buffers whose
    /// length doesn't match their dimensions. The session is unchanged.
    pub fn load(&mut self, image: ImageBuffer) -> Result<()> {
        self.load_labeled(image, None)
    }

    /// Decode and load an image from encoded bytes.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        match decode_image(bytes) {
            Ok(image) => self.load_labeled(image, None),
            Err(err) => Err(self.load_failed(err)),
        }
    }

    /// Read, decode and load an image file.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        match load_image(path) {
            Ok(image) => self.load_labeled(image, label),
            Err(err) => Err(self.load_failed(err)),
        }
    }

    fn load_labeled(&mut self, image: ImageBuffer, label: Option<String>) -> Result<()> {
        let image = match ImageBuffer::try_new(image.width, image.height, image.pixels) {
            Ok(image) => image,
            Err(err) => return Err(self.load_failed(err)),
        };
        let (width, height) = image.dimensions();

        self.state = EditorState::loaded(image, self.config.history_depth);
        self.clear_selection();
        self.refresh();

        info!(width, height, label = label.as_deref(), "Loaded image");
        let message = match label {
            Some(name) => format!("Loaded: {name} ({width}x{height})"),
            None => format!("Loaded: {width}x{height}"),
        };
        self.report(StatusLevel::Info, message);
        Ok(())
    }

    fn load_failed(&mut self, err: LoadError) -> EditError {
        warn!(error = %err, "Failed to load image");
        self.report(StatusLevel::Error, "Failed to load image.".to_string());
        EditError::Load(err)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Route a pointer event to the selection handlers.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<()> {
        match event {
            PointerEvent::Down(point) => {
                self.begin_selection(point);
                Ok(())
            }
            PointerEvent::Move(point) => {
                self.update_selection(point);
                Ok(())
            }
            PointerEvent::Up(point) => self.end_selection(point),
        }
    }

    /// Start a drag at `point`. Ignored while no image is loaded.
    pub fn begin_selection(&mut self, point: ViewportPoint) {
        if self.state.phase() == Phase::Empty {
            return;
        }
        self.selection = Some(Selection {
            start: point,
            end: point,
        });
        self.shell.selection(None);
    }

    /// Move the free corner of the drag. Only the overlay changes.
    pub fn update_selection(&mut self, point: ViewportPoint) {
        if let Some(selection) = self.selection.as_mut() {
            selection.end = point;
            let rect = selection.rect();
            self.shell.selection(Some(rect));
        }
    }

    /// Finish the drag and crop the displayed image to it.
    ///
    /// Without an active drag this does nothing.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidSelection` when the selection covers one
    /// image pixel or less on either axis. The drag is discarded and the
    /// session is otherwise unchanged.
    pub fn end_selection(&mut self, point: ViewportPoint) -> Result<()> {
        let Some(mut selection) = self.selection.take() else {
            return Ok(());
        };
        selection.end = point;
        self.shell.selection(None);

        let (Some(image), Some(geometry)) = (self.state.displayed(), self.geometry) else {
            return Ok(());
        };
        let rect = map_selection(&selection, &geometry, image);
        debug!(?selection, ?rect, "Mapped selection to image pixels");

        let cropped = match apply_crop(image, rect) {
            Ok(cropped) => cropped,
            Err(err) => {
                warn!(width = err.width, height = err.height, "Invalid crop selection");
                self.report(StatusLevel::Warning, "Invalid crop selection.".to_string());
                return Err(err.into());
            }
        };

        let (width, height) = cropped.dimensions();
        self.state = std::mem::take(&mut self.state).with_crop(cropped);
        self.refresh();

        info!(
            x0 = rect.min_x,
            y0 = rect.min_y,
            x1 = rect.max_x,
            y1 = rect.max_y,
            width,
            height,
            "Cropped image"
        );
        self.report(
            StatusLevel::Info,
            format!(
                "Cropped region: ({},{}) to ({},{})",
                rect.min_x, rect.min_y, rect.max_x, rect.max_y
            ),
        );
        Ok(())
    }

    /// Drop any in-progress drag without cropping.
    pub fn cancel_selection(&mut self) {
        self.clear_selection();
    }

    fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.shell.selection(None);
        }
    }

    // ------------------------------------------------------------------
    // Scaling
    // ------------------------------------------------------------------

    /// Scale the crop baseline to `percent` (clamped to 10-200).
    ///
    /// Does nothing before the first crop or when the scale is unchanged.
    pub fn set_scale(&mut self, percent: u32) -> Result<()> {
        let scale = ScalePercent::new(percent);
        let Some(baseline) = self.state.cropped() else {
            return Ok(());
        };
        if scale == self.state.scale() {
            return Ok(());
        }

        let resized = scale_by_percent(baseline, scale).map_err(EditError::Resample)?;
        let (width, height) = resized.dimensions();
        self.state = std::mem::take(&mut self.state).with_scale(scale, resized);
        self.refresh();

        info!(percent = scale.value(), width, height, "Resized image");
        self.report(StatusLevel::Info, format!("Resized to {width}x{height}"));
        Ok(())
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Restore the previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns `EditError::EmptyHistory` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<()> {
        self.step_history(HistoryDirection::Undo)
    }

    /// Re-apply the most recently undone snapshot.
    ///
    /// # Errors
    ///
    /// Returns `EditError::EmptyHistory` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<()> {
        self.step_history(HistoryDirection::Redo)
    }

    fn step_history(&mut self, direction: HistoryDirection) -> Result<()> {
        let available = match direction {
            HistoryDirection::Undo => self.state.can_undo(),
            HistoryDirection::Redo => self.state.can_redo(),
        };
        if !available {
            debug!(%direction, "History is empty");
            self.report(StatusLevel::Info, format!("Nothing to {direction}."));
            return Err(EditError::EmptyHistory(direction));
        }

        self.state = std::mem::take(&mut self.state).restore(direction);
        self.clear_selection();
        self.refresh();

        info!(
            %direction,
            undo_depth = self.state.history().undo_len(),
            redo_depth = self.state.history().redo_len(),
            "History step"
        );
        let message = match direction {
            HistoryDirection::Undo => "Undo performed.",
            HistoryDirection::Redo => "Redo performed.",
        };
        self.report(StatusLevel::Info, message.to_string());
        Ok(())
    }

    /// Go back to the loaded image, dropping crop, scale and history.
    ///
    /// Does nothing while no image is loaded.
    pub fn reset(&mut self) {
        if self.state.phase() == Phase::Empty {
            return;
        }
        self.state = std::mem::take(&mut self.state).reset();
        self.clear_selection();
        self.refresh();

        info!("Reset to original image");
        self.report(StatusLevel::Info, "Image reset to original.".to_string());
    }

    // ------------------------------------------------------------------
    // Saving
    // ------------------------------------------------------------------

    /// Hand the working image to `sink` unchanged.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NoImageToSave` before the first crop, or
    /// `EditError::Save` if the sink fails.
    pub fn save<K: ImageSink + ?Sized>(&mut self, sink: &mut K) -> Result<()> {
        let working = self.working_or_warn()?;
        let (width, height) = working.dimensions();

        if let Err(err) = sink.write_image(working) {
            return Err(self.save_failed(err.into()));
        }

        info!(width, height, "Saved image");
        self.report(StatusLevel::Info, "Saved image.".to_string());
        Ok(())
    }

    /// Save the working image to a file; the format follows the extension.
    pub fn save_to_path(&mut self, path: impl AsRef<Path>) -> Result<ExportFormat> {
        let path = path.as_ref();
        let working = self.working_or_warn()?;

        let format = match save_image(working, path) {
            Ok(format) => format,
            Err(err) => return Err(self.save_failed(err.into())),
        };

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.report(StatusLevel::Info, format!("Saved image: {name}"));
        Ok(format)
    }

    /// Encode the working image in memory.
    pub fn export(&mut self, format: ExportFormat) -> Result<Vec<u8>> {
        let working = self.working_or_warn()?;
        match encode_image(working, format) {
            Ok(bytes) => Ok(bytes),
            Err(err) => Err(self.save_failed(err.into())),
        }
    }

    fn working_or_warn(&mut self) -> Result<&ImageBuffer> {
        if self.state.working().is_none() {
            warn!("Save requested before any crop");
            self.report(StatusLevel::Warning, EditError::NoImageToSave.to_string());
        }
        self.state.working().ok_or(EditError::NoImageToSave)
    }

    fn save_failed(&mut self, err: EditError) -> EditError {
        warn!(error = %err, "Failed to save image");
        self.report(StatusLevel::Error, err.to_string());
        err
    }

    // ------------------------------------------------------------------
    // Rendering and queries
    // ------------------------------------------------------------------

    /// Render the viewport, with the selection outline while dragging.
    ///
    /// Returns `None` while no image is loaded.
    pub fn frame(&self) -> Result<Option<ViewportFrame>> {
        let Some(image) = self.state.displayed() else {
            return Ok(None);
        };
        let mut frame = compose_viewport(image, &self.config).map_err(EditError::Resample)?;
        if let Some(selection) = self.selection {
            draw_selection(
                &mut frame.canvas,
                selection.rect(),
                self.config.selection_color,
                self.config.selection_stroke,
            );
        }
        Ok(Some(frame))
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Geometry of the displayed image in the viewport.
    pub fn geometry(&self) -> Option<&ViewportGeometry> {
        self.geometry.as_ref()
    }

    pub fn displayed_image(&self) -> Option<&ImageBuffer> {
        self.state.displayed()
    }

    pub fn original_image(&self) -> Option<&ImageBuffer> {
        self.state.original()
    }

    pub fn working_image(&self) -> Option<&ImageBuffer> {
        self.state.working()
    }

    pub fn scale(&self) -> ScalePercent {
        self.state.scale()
    }

    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.can_redo()
    }

    /// The live selection rectangle, if a drag is in progress.
    pub fn selection(&self) -> Option<ViewportRect> {
        self.selection.map(|selection| selection.rect())
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }

    /// Recompute the geometry for the displayed image and ask for a render.
    fn refresh(&mut self) {
        let (viewport_width, viewport_height) =
            (self.config.viewport_width, self.config.viewport_height);
        self.geometry = self
            .state
            .displayed()
            .map(|image| {
                fit_to_viewport(image.width, image.height, viewport_width, viewport_height)
            });

        if let (Some(image), Some(geometry)) = (self.state.displayed(), self.geometry.as_ref()) {
            debug!(?geometry, "Rendering displayed image");
            self.shell.render(image, geometry);
        }
    }

    fn report(&mut self, level: StatusLevel, message: String) {
        self.shell.status(&Status { level, message });
    }
}

/// Map both drag corners into the image's pixel space.
fn map_selection(
    selection: &Selection,
    geometry: &ViewportGeometry,
    image: &ImageBuffer,
) -> PixelRect {
    let start = viewport_to_image(selection.start, geometry, image.width, image.height);
    let end = viewport_to_image(selection.end, geometry, image.width, image.height);
    PixelRect::from_corners(start, end)
}
