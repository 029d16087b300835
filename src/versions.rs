//! Version backfill: give every theme a `version` field.

use std::path::Path;

use crate::theme::{list_theme_folders, SkippedTheme, ThemeError, ThemeFolder};

/// Result of a backfill run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillReport {
    /// Themes whose theme.json gained a version, in processing order
    pub updated: Vec<String>,
    /// Themes already carrying a version
    pub unchanged: usize,
    pub skipped: Vec<SkippedTheme>,
}

impl BackfillReport {
    pub fn updated_count(&self) -> usize {
        self.updated.len()
    }
}

/// Ensure one theme's metadata has a version, rewriting theme.json only when
/// the field was added. Returns true when the file was rewritten.
pub fn ensure_version_in_theme(
    folder: &ThemeFolder,
    default_version: &str,
) -> Result<bool, ThemeError> {
    let mut metadata = folder.load_metadata()?;
    if !metadata.ensure_version(default_version) {
        return Ok(false);
    }

    folder.save_metadata(&metadata)?;
    Ok(true)
}

/// Backfill versions across every theme under `themes_dir`.
///
/// Per-theme failures are logged and recorded in the report; only a missing
/// root aborts the run.
pub fn add_missing_versions(
    themes_dir: &Path,
    default_version: &str,
) -> Result<BackfillReport, ThemeError> {
    let mut report = BackfillReport::default();

    for folder in list_theme_folders(themes_dir)? {
        match ensure_version_in_theme(&folder, default_version) {
            Ok(true) => {
                tracing::info!("Added version to theme: {}", folder.id());
                report.updated.push(folder.id().to_string());
            }
            Ok(false) => report.unchanged += 1,
            Err(e) => {
                e.log(folder.id());
                report.skipped.push(SkippedTheme::new(folder.id(), &e));
            }
        }
    }

    Ok(report)
}
