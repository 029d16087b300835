//! Theme preferences and migration from the legacy flat format.
//!
//! Legacy `preferences.json` is a single object keyed by preference name:
//!
//! ```json
//! {
//!     "theme.compact": true,
//!     "theme.radius": {"type": "number", "default": 8, "label": "Corner radius"}
//! }
//! ```
//!
//! The current format is a list of groups, each holding explicit entries:
//!
//! ```json
//! [
//!     {
//!         "name": "General",
//!         "preferences": [
//!             {"key": "theme.compact", "type": "boolean", "default": true},
//!             {"key": "theme.radius", "type": "number", "default": 8, "label": "Corner radius"}
//!         ]
//!     }
//! ]
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::json_io;
use crate::theme::ThemeError;

/// Name of the group that legacy entries are migrated into.
pub const DEFAULT_GROUP_NAME: &str = "General";

/// A single preference in the current format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PreferenceEntry {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub default: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PreferenceGroup {
    pub name: String,
    pub preferences: Vec<PreferenceEntry>,
}

/// The current preferences file: an ordered list of groups.
pub type Preferences = Vec<PreferenceGroup>;

/// Value kinds a type can be inferred from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKind {
    Boolean,
    Number,
    String,
    Json,
}

impl PreferenceKind {
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Bool(_) => PreferenceKind::Boolean,
            Value::Number(_) => PreferenceKind::Number,
            Value::String(_) | Value::Null => PreferenceKind::String,
            Value::Array(_) | Value::Object(_) => PreferenceKind::Json,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceKind::Boolean => "boolean",
            PreferenceKind::Number => "number",
            PreferenceKind::String => "string",
            PreferenceKind::Json => "json",
        }
    }
}

/// A preferences file classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum PreferencesDocument {
    Legacy(Map<String, Value>),
    Current(Vec<Value>),
}

impl PreferencesDocument {
    pub fn classify(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => Ok(Self::Legacy(map)),
            Value::Array(groups) => Ok(Self::Current(groups)),
            other => Err(format!(
                "expected an object or a list, found {}",
                crate::theme::kind_name(&other)
            )),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

/// Convert one legacy entry. A typed record is an object with a string `type`.
fn convert_entry(key: &str, value: &Value) -> PreferenceEntry {
    if let Value::Object(record) = value {
        let label = record
            .get("label")
            .and_then(Value::as_str)
            .map(str::to_string);

        if let Some(kind) = record.get("type").and_then(Value::as_str) {
            return PreferenceEntry {
                key: key.to_string(),
                kind: kind.to_string(),
                default: record.get("default").cloned().unwrap_or(Value::Null),
                label,
            };
        }

        if let Some(default) = record.get("default") {
            return PreferenceEntry {
                key: key.to_string(),
                kind: PreferenceKind::infer(default).as_str().to_string(),
                default: default.clone(),
                label,
            };
        }
    }

    PreferenceEntry {
        key: key.to_string(),
        kind: PreferenceKind::infer(value).as_str().to_string(),
        default: value.clone(),
        label: None,
    }
}

/// Reshape legacy preferences into the grouped format.
///
/// Every legacy key becomes exactly one entry, in input order, inside a
/// single group.
pub fn convert_legacy_preferences(legacy: &Map<String, Value>) -> Preferences {
    let preferences = legacy
        .iter()
        .map(|(key, value)| convert_entry(key, value))
        .collect();

    vec![PreferenceGroup {
        name: DEFAULT_GROUP_NAME.to_string(),
        preferences,
    }]
}

/// Outcome of migrating one preferences file.
#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceMigration {
    /// The file was legacy; holds the converted groups.
    Converted(Preferences),
    /// The file already uses the grouped format and was left alone.
    AlreadyCurrent,
}

impl PreferenceMigration {
    pub fn entry_count(&self) -> usize {
        match self {
            PreferenceMigration::Converted(groups) => {
                groups.iter().map(|g| g.preferences.len()).sum()
            }
            PreferenceMigration::AlreadyCurrent => 0,
        }
    }
}

/// Read `path` and work out what migrating it would produce, without writing.
pub fn plan_migration(path: &Path) -> Result<PreferenceMigration, ThemeError> {
    let value = json_io::read_json(path)?;
    let document = PreferencesDocument::classify(value)
        .map_err(|e| ThemeError::InvalidPreferences(format!("{}: {}", path.display(), e)))?;

    Ok(match document {
        PreferencesDocument::Legacy(map) => {
            PreferenceMigration::Converted(convert_legacy_preferences(&map))
        }
        PreferencesDocument::Current(_) => PreferenceMigration::AlreadyCurrent,
    })
}

/// Migrate `path` in place when it holds legacy preferences.
pub fn migrate_preferences_file(path: &Path) -> Result<PreferenceMigration, ThemeError> {
    let migration = plan_migration(path)?;
    if let PreferenceMigration::Converted(groups) = &migration {
        tracing::info!("Legacy preferences found, performing transformation into new structure.");
        json_io::write_json(path, groups)?;
    }
    Ok(migration)
}
