//! Callbacks from the editor session to whatever UI hosts it.

use crate::decode::ImageBuffer;
use crate::geometry::{ViewportGeometry, ViewportRect};

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// A message for the user's status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub message: String,
}

/// Receives render requests and status updates from an `EditorSession`.
///
/// Every method has a no-op default, so a shell only implements what it
/// displays. Calls happen synchronously inside the session operation that
/// caused them.
pub trait EditorShell {
    /// The displayed image changed; `geometry` is where it sits in the viewport.
    fn render(&mut self, _image: &ImageBuffer, _geometry: &ViewportGeometry) {}

    /// The live selection changed. `None` clears the overlay.
    fn selection(&mut self, _rect: Option<ViewportRect>) {}

    /// A status message should be shown.
    fn status(&mut self, _status: &Status) {}
}

/// Shell that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpShell;

impl EditorShell for NoOpShell {}

/// Shell that remembers what it was told, for hosts that poll instead of
/// reacting to callbacks.
#[derive(Debug, Clone, Default)]
pub struct RecordingShell {
    statuses: Vec<Status>,
    render_count: usize,
    geometry: Option<ViewportGeometry>,
    selection: Option<ViewportRect>,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_status(&self) -> Option<&Status> {
        self.statuses.last()
    }

    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    /// Number of render requests received so far.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Geometry from the most recent render request.
    pub fn geometry(&self) -> Option<ViewportGeometry> {
        self.geometry
    }

    /// Selection overlay as last reported, `None` when cleared.
    pub fn current_selection(&self) -> Option<ViewportRect> {
        self.selection
    }
}

impl EditorShell for RecordingShell {
    fn render(&mut self, _image: &ImageBuffer, geometry: &ViewportGeometry) {
        self.render_count += 1;
        self.geometry = Some(*geometry);
    }

    fn selection(&mut self, rect: Option<ViewportRect>) {
        self.selection = rect;
    }

    fn status(&mut self, status: &Status) {
        self.statuses.push(status.clone());
    }
}
