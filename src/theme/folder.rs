//! Theme folder layout and themes root listing.
//!
//! A theme lives in `<themes root>/<theme-id>/`:
//!
//! ```text
//! theme.json        metadata (required)
//! colors.json       color palette (optional)
//! chrome.css        generated from colors.json
//! preferences.json  legacy or grouped preferences (optional)
//! ```

use std::path::{Path, PathBuf};

use super::types::{ColorPalette, ThemeError, ThemeMetadata};
use crate::json_io;

pub const METADATA_FILE: &str = "theme.json";
pub const COLORS_FILE: &str = "colors.json";
pub const STYLESHEET_FILE: &str = "chrome.css";
pub const PREFERENCES_FILE: &str = "preferences.json";

/// One theme directory under the themes root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeFolder {
    id: String,
    path: PathBuf,
}

impl ThemeFolder {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }

    /// Theme identifier (the folder name), used as the catalog key.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.path.join(METADATA_FILE)
    }

    pub fn colors_path(&self) -> PathBuf {
        self.path.join(COLORS_FILE)
    }

    pub fn stylesheet_path(&self) -> PathBuf {
        self.path.join(STYLESHEET_FILE)
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.path.join(PREFERENCES_FILE)
    }

    pub fn has_palette(&self) -> bool {
        self.colors_path().is_file()
    }

    pub fn has_preferences(&self) -> bool {
        self.preferences_path().is_file()
    }

    /// Load theme.json.
    ///
    /// Returns `MissingMetadata` when the file does not exist, so callers can
    /// tell a skipped folder apart from a broken one.
    pub fn load_metadata(&self) -> Result<ThemeMetadata, ThemeError> {
        let path = self.metadata_path();
        if !path.is_file() {
            return Err(ThemeError::MissingMetadata(self.path.display().to_string()));
        }

        let value = json_io::read_json(&path)?;
        ThemeMetadata::from_value(value)
            .map_err(|e| ThemeError::ParseError(format!("{}: {}", path.display(), e)))
    }

    pub fn save_metadata(&self, metadata: &ThemeMetadata) -> Result<(), ThemeError> {
        json_io::write_json(&self.metadata_path(), metadata)
    }

    pub fn load_palette(&self) -> Result<ColorPalette, ThemeError> {
        let path = self.colors_path();
        let value = json_io::read_json(&path)?;
        ColorPalette::from_value(value)
            .map_err(|e| ThemeError::ParseError(format!("{}: {}", path.display(), e)))
    }
}

/// List every theme folder under `root`, sorted by id.
///
/// Plain files in the root are ignored. A missing root is the one fatal
/// condition of every job.
pub fn list_theme_folders(root: &Path) -> Result<Vec<ThemeFolder>, ThemeError> {
    if !root.is_dir() {
        return Err(ThemeError::MissingRoot(root.display().to_string()));
    }

    let entries = std::fs::read_dir(root)
        .map_err(|e| ThemeError::IoError(format!("{}: {}", root.display(), e)))?;

    let mut folders = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let id = entry.file_name().to_string_lossy().to_string();
        folders.push(ThemeFolder::new(id, path));
    }

    folders.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(folders)
}
