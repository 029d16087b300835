use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version written into metadata that has none.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// How the catalog file is treated at the start of a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CatalogMode {
    /// Truncate the catalog to `{}` and rebuild it from the theme folders
    #[default]
    Rebuild,
    /// Load the existing catalog and overwrite entries theme by theme
    Merge,
}

/// When the catalog is written to disk during a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Persistence {
    /// Write once after every theme has been processed
    #[default]
    OnCompletion,
    /// Write after each theme, so a crash loses at most the current theme
    PerTheme,
}

/// Configuration for the maintenance jobs.
///
/// Every field has a default, so an empty `{}` file is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding one folder per theme
    pub themes_dir: PathBuf,

    /// Aggregated catalog written by the rebuild
    pub catalog_file: PathBuf,

    /// Version assigned to themes whose metadata has none
    pub default_version: String,

    pub catalog_mode: CatalogMode,

    pub persistence: Persistence,

    /// Convert legacy preferences.json files during a rebuild
    pub migrate_preferences: bool,

    /// Rewrite each theme.json with its normalized metadata during a rebuild
    pub write_metadata: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            themes_dir: PathBuf::from("./themes"),
            catalog_file: PathBuf::from("./themes.json"),
            default_version: DEFAULT_VERSION.to_string(),
            catalog_mode: CatalogMode::default(),
            persistence: Persistence::default(),
            migrate_preferences: true,
            write_metadata: true,
        }
    }
}

impl CatalogConfig {
    /// The config file name looked up when no `--config` is given
    pub const FILENAME: &'static str = "theme-catalog.json";

    pub fn themes_path(&self) -> &Path {
        &self.themes_dir
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_file
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.as_ref().display(), e)))?;

        let config: CatalogConfig = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.as_ref().display(), e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load `theme-catalog.json` from `working_dir` if present, otherwise defaults.
    pub fn load_for_working_dir(working_dir: &Path) -> Result<Self, ConfigError> {
        let path = working_dir.join(Self::FILENAME);
        if !path.exists() {
            tracing::debug!("No config file found, using defaults");
            return Ok(Self::default());
        }

        let config = Self::load_from_file(&path)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_version.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "default_version cannot be empty".to_string(),
            ));
        }

        if self.themes_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "themes_dir cannot be empty".to_string(),
            ));
        }

        if self.catalog_file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "catalog_file cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
