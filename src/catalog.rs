//! The aggregated theme catalog and the rebuild job that produces it.
//!
//! A rebuild walks every theme folder in sorted order and, per theme:
//!
//! 1. loads theme.json and backfills `version`
//! 2. loads colors.json and tags the theme (`color scheme`, plus `dark` for
//!    dark palettes)
//! 3. regenerates chrome.css, writes the normalized metadata back and stores
//!    it in the catalog
//! 4. persists the catalog when running with per-theme persistence
//! 5. migrates a legacy preferences.json
//!
//! A failure in steps 1-3 skips the theme, and nothing is written to its
//! folder before all of them have been checked. Preference failures are
//! logged without uncataloguing the theme. Only a missing themes root or a
//! catalog that cannot be read (merge mode) or written stops the job.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::config::{CatalogConfig, CatalogMode, Persistence};
use crate::css;
use crate::json_io;
use crate::preferences::{self, PreferenceMigration};
use crate::theme::{
    list_theme_folders, SkippedTheme, ThemeError, ThemeFolder, ThemeMetadata, COLOR_SCHEME_TAG,
    DARK_TAG,
};

/// Theme id to theme metadata, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Catalog(Map<String, Value>);

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog file. A missing file is an empty catalog.
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        match json_io::read_json(path)? {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ThemeError::ParseError(format!(
                "{}: catalog must be an object",
                path.display()
            ))),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ThemeError> {
        json_io::write_json(path, self)
    }

    /// Insert or replace the entry for `id`. Replacing keeps the key's position.
    pub fn insert(&mut self, id: &str, metadata: ThemeMetadata) {
        self.0.insert(id.to_string(), metadata.into_value());
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.0.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of a rebuild run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildReport {
    /// Themes stored in the catalog, in processing order
    pub processed: Vec<String>,
    pub skipped: Vec<SkippedTheme>,
    pub stylesheets_written: usize,
    pub preferences_migrated: usize,
    /// Themes whose preferences.json could not be migrated
    pub preference_failures: Vec<SkippedTheme>,
    /// Entries in the catalog as written, including merged ones
    pub catalog_entries: usize,
}

impl RebuildReport {
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }
}

/// Metadata and side results for one theme, before it enters the catalog.
struct RebuiltTheme {
    metadata: ThemeMetadata,
    stylesheet_written: bool,
}

/// Drives a full catalog rebuild.
pub struct CatalogRebuilder {
    config: CatalogConfig,
}

impl CatalogRebuilder {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Run the rebuild over every theme folder.
    pub fn run(&self) -> Result<RebuildReport, ThemeError> {
        let folders = list_theme_folders(self.config.themes_path())?;
        let catalog_path = self.config.catalog_path();

        let mut catalog = self.initial_catalog(catalog_path)?;
        let mut report = RebuildReport::default();

        for folder in &folders {
            let rebuilt = match self.rebuild_theme(folder) {
                Ok(rebuilt) => rebuilt,
                Err(e) => {
                    e.log(folder.id());
                    report.skipped.push(SkippedTheme::new(folder.id(), &e));
                    continue;
                }
            };

            if rebuilt.stylesheet_written {
                report.stylesheets_written += 1;
            }

            catalog.insert(folder.id(), rebuilt.metadata);
            if self.config.persistence == Persistence::PerTheme {
                catalog.save(catalog_path)?;
            }

            if self.config.migrate_preferences && folder.has_preferences() {
                tracing::info!("Found preferences.json in theme: {}", folder.id());
                match preferences::migrate_preferences_file(&folder.preferences_path()) {
                    Ok(PreferenceMigration::Converted(_)) => report.preferences_migrated += 1,
                    Ok(PreferenceMigration::AlreadyCurrent) => {
                        tracing::debug!("Preferences of {} already current", folder.id());
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to migrate preferences of theme {}: {}",
                            folder.id(),
                            e
                        );
                        report
                            .preference_failures
                            .push(SkippedTheme::new(folder.id(), &e));
                    }
                }
            }

            tracing::info!("Rebuilt theme: {}", folder.id());
            report.processed.push(folder.id().to_string());
        }

        catalog.save(catalog_path)?;
        report.catalog_entries = catalog.len();
        Ok(report)
    }

    fn initial_catalog(&self, path: &Path) -> Result<Catalog, ThemeError> {
        match self.config.catalog_mode {
            CatalogMode::Rebuild => {
                let catalog = Catalog::new();
                catalog.save(path)?;
                Ok(catalog)
            }
            // An unreadable catalog is left as it is rather than replaced
            CatalogMode::Merge => Catalog::load(path),
        }
    }

    /// Steps 1-3 for a single theme. Errors here skip the theme.
    fn rebuild_theme(&self, folder: &ThemeFolder) -> Result<RebuiltTheme, ThemeError> {
        let mut metadata = folder.load_metadata()?;
        if metadata.ensure_version(&self.config.default_version) {
            tracing::debug!("Added version to theme: {}", folder.id());
        }

        let palette = if folder.has_palette() {
            tracing::info!("  Found colors.json in theme: {}", folder.id());
            let palette = folder.load_palette()?;
            metadata.ensure_tag(COLOR_SCHEME_TAG)?;
            if palette.is_dark_mode() {
                metadata.ensure_tag(DARK_TAG)?;
            }
            Some(palette)
        } else {
            None
        };

        // Nothing above touched the folder, so a skipped theme stays as it was
        if let Some(palette) = &palette {
            css::write_palette_stylesheet(folder, palette)?;
        }
        if self.config.write_metadata {
            folder.save_metadata(&metadata)?;
        }

        Ok(RebuiltTheme {
            metadata,
            stylesheet_written: palette.is_some(),
        })
    }
}
