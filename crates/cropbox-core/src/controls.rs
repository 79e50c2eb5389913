//! Toolkit-independent control surface.
//!
//! Shells translate their widget events into these types: buttons and
//! keyboard shortcuts become [`EditorAction`]s, mouse or touch input becomes
//! [`PointerEvent`]s in viewport coordinates, and the scale slider produces a
//! [`ScalePercent`].

use serde::{Deserialize, Serialize};

use crate::geometry::ViewportPoint;

pub use crate::transform::{scale_bounds, ScalePercent};

/// Discrete editor commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorAction {
    Load,
    Save,
    Reset,
    Undo,
    Redo,
}

impl EditorAction {
    /// Map a key press to an action.
    ///
    /// Bindings: Ctrl+O load, Ctrl+S save, Ctrl+Z undo, Ctrl+Y redo. Keys
    /// are matched case-insensitively; nothing is bound without Ctrl.
    pub fn from_shortcut(ctrl: bool, key: char) -> Option<Self> {
        if !ctrl {
            return None;
        }
        match key.to_ascii_lowercase() {
            'o' => Some(EditorAction::Load),
            's' => Some(EditorAction::Save),
            'z' => Some(EditorAction::Undo),
            'y' => Some(EditorAction::Redo),
            _ => None,
        }
    }
}

/// Primary-button pointer input in viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(ViewportPoint),
    Move(ViewportPoint),
    Up(ViewportPoint),
}

impl PointerEvent {
    pub fn point(&self) -> ViewportPoint {
        match *self {
            PointerEvent::Down(p) | PointerEvent::Move(p) | PointerEvent::Up(p) => p,
        }
    }
}
