//! Editor configuration.
//!
//! Every field has a default matching the stock editor: a 600x400 viewport
//! on a mid-gray background, a red 2px selection outline, 30 history entries
//! per stack and 300px side-panel previews. A TOML file only needs the keys
//! it wants to change.
//!
//! ```toml
//! viewport_width = 800
//! history_depth = 50
//! background = [32, 32, 32]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::DEFAULT_HISTORY_DEPTH;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Viewport width in pixels.
    pub viewport_width: u32,
    /// Viewport height in pixels.
    pub viewport_height: u32,
    /// Letterbox background color.
    pub background: [u8; 3],
    /// Selection outline color.
    pub selection_color: [u8; 3],
    /// Selection outline thickness in pixels.
    pub selection_stroke: u32,
    /// Maximum entries on each of the undo and redo stacks.
    pub history_depth: usize,
    /// Bounding box of the original/result preview panels.
    pub preview_size: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport_width: 600,
            viewport_height: 400,
            background: [128, 128, 128],
            selection_color: [255, 0, 0],
            selection_stroke: 2,
            history_depth: DEFAULT_HISTORY_DEPTH,
            preview_size: 300,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Reject values the editor can't work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        if self.history_depth == 0 {
            return Err(ConfigError::Invalid(
                "history_depth must be at least 1".to_string(),
            ));
        }
        if self.preview_size == 0 {
            return Err(ConfigError::Invalid(
                "preview_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!((config.viewport_width, config.viewport_height), (600, 400));
        assert_eq!(config.background, [128, 128, 128]);
        assert_eq!(config.history_depth, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = EditorConfig::from_toml_str("").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = EditorConfig::from_toml_str(
            "viewport_width = 800\nhistory_depth = 5\nbackground = [0, 0, 0]\n",
        )
        .unwrap();

        assert_eq!(config.viewport_width, 800);
        assert_eq!(config.viewport_height, 400);
        assert_eq!(config.history_depth, 5);
        assert_eq!(config.background, [0, 0, 0]);
    }

    #[test]
    fn test_zero_viewport_rejected() {
        let result = EditorConfig::from_toml_str("viewport_height = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_history_rejected() {
        let result = EditorConfig::from_toml_str("history_depth = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = EditorConfig::from_toml_str("viewport_width = \"wide\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.toml");
        std::fs::write(&path, "preview_size = 128\n").unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.preview_size, 128);
    }
}
