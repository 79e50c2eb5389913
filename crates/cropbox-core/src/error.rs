use thiserror::Error;

use crate::decode::LoadError;
use crate::encode::SaveError;
use crate::history::HistoryDirection;
use crate::transform::InvalidSelection;

/// Errors reported by the editor session.
///
/// None of them is fatal: the session state is left as it was and the
/// message is meant for the user's status bar.
#[derive(Error, Debug)]
pub enum EditError {
    #[error("Failed to load image: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    InvalidSelection(#[from] InvalidSelection),

    #[error("No cropped or resized image to save.")]
    NoImageToSave,

    /// Resampling a validated buffer failed while scaling or rendering.
    #[error("Failed to resample image: {0}")]
    Resample(#[source] LoadError),

    #[error("Nothing to {0}.")]
    EmptyHistory(HistoryDirection),

    #[error("Failed to save image: {0}")]
    Save(#[from] SaveError),
}

pub type Result<T> = std::result::Result<T, EditError>;
