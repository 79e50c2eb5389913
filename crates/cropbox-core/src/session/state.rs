//! Editor state as a plain value.
//!
//! Transitions consume the state and return the next one. They are
//! infallible: anything that can fail (decoding, cropping, scaling) is
//! computed by the caller beforehand, so a failed operation never touches
//! the state.

use crate::decode::ImageBuffer;
use crate::history::{HistoryDirection, HistoryStack};
use crate::transform::ScalePercent;

/// Where the editor is in its edit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No image loaded.
    #[default]
    Empty,
    /// An image is loaded and nothing has been cropped since.
    Loaded,
    /// The working image is an unscaled crop.
    Cropped,
    /// The working image is a scaled crop, or was restored from history.
    Resized,
}

/// All per-document editor data.
///
/// Invariants:
/// - `original` and `current` are both set once an image is loaded
/// - `working` is set iff a crop has happened since the last load or reset,
///   and `cropped` is set whenever `working` is
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    original: Option<ImageBuffer>,
    current: Option<ImageBuffer>,
    cropped: Option<ImageBuffer>,
    working: Option<ImageBuffer>,
    scale: ScalePercent,
    history: HistoryStack,
    phase: Phase,
}

impl EditorState {
    /// Fresh state for a newly loaded image.
    pub fn loaded(image: ImageBuffer, history_depth: usize) -> Self {
        Self {
            original: Some(image.clone()),
            current: Some(image),
            cropped: None,
            working: None,
            scale: ScalePercent::default(),
            history: HistoryStack::with_capacity(history_depth),
            phase: Phase::Loaded,
        }
    }

    /// Return to the loaded image, dropping crop, scale and history.
    pub fn reset(mut self) -> Self {
        let Some(original) = self.original.take() else {
            return self;
        };
        self.history.clear();
        self.current = Some(original.clone());
        self.original = Some(original);
        self.cropped = None;
        self.working = None;
        self.scale = ScalePercent::default();
        self.phase = Phase::Loaded;
        self
    }

    /// Install a new crop result.
    ///
    /// The displayed image is pushed to history and the scale returns to 100%.
    pub fn with_crop(mut self, cropped: ImageBuffer) -> Self {
        if let Some(previous) = self.working.as_ref().or(self.current.as_ref()) {
            self.history.push(previous);
        }
        self.cropped = Some(cropped.clone());
        self.working = Some(cropped);
        self.scale = ScalePercent::default();
        self.phase = Phase::Cropped;
        self
    }

    /// Install a scaled version of the crop baseline.
    ///
    /// The previous working image (or the baseline if there is none) is
    /// pushed to history. Without a baseline the state is returned unchanged.
    pub fn with_scale(mut self, scale: ScalePercent, resized: ImageBuffer) -> Self {
        if self.cropped.is_none() {
            return self;
        }
        if let Some(previous) = self.working.as_ref().or(self.cropped.as_ref()) {
            self.history.push(previous);
        }
        self.working = Some(resized);
        self.scale = scale;
        self.phase = Phase::Resized;
        self
    }

    /// Step through history.
    ///
    /// The restored snapshot becomes both the crop baseline and the working
    /// image, and the scale returns to 100%. With nothing to restore the
    /// state is returned unchanged.
    pub fn restore(mut self, direction: HistoryDirection) -> Self {
        let replaced = self.working.as_ref();
        let restored = match direction {
            HistoryDirection::Undo => self.history.undo(replaced),
            HistoryDirection::Redo => self.history.redo(replaced),
        };
        let Some(restored) = restored else {
            return self;
        };

        self.cropped = Some(restored.clone());
        self.working = Some(restored);
        self.scale = ScalePercent::default();
        self.phase = Phase::Resized;
        self
    }

    /// The buffer the viewport shows: the working image if there is one,
    /// otherwise the loaded image.
    pub fn displayed(&self) -> Option<&ImageBuffer> {
        self.working.as_ref().or(self.current.as_ref())
    }

    pub fn original(&self) -> Option<&ImageBuffer> {
        self.original.as_ref()
    }

    pub fn current(&self) -> Option<&ImageBuffer> {
        self.current.as_ref()
    }

    pub fn cropped(&self) -> Option<&ImageBuffer> {
        self.cropped.as_ref()
    }

    pub fn working(&self) -> Option<&ImageBuffer> {
        self.working.as_ref()
    }

    pub fn scale(&self) -> ScalePercent {
        self.scale
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
