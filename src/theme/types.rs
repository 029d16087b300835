use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tag added to every theme that ships a color palette.
pub const COLOR_SCHEME_TAG: &str = "color scheme";

/// Tag added when the palette declares itself as dark.
pub const DARK_TAG: &str = "dark";

/// Palette key holding the dark-mode flag. Never emitted as CSS.
pub const DARK_MODE_KEY: &str = "isDarkMode";

/// Theme processing error types
#[derive(Debug)]
pub enum ThemeError {
    /// The themes root directory does not exist
    MissingRoot(String),
    /// A theme folder has no theme.json
    MissingMetadata(String),
    IoError(String),
    ParseError(String),
    SerializeError(String),
    /// Metadata parsed but a field has an unusable shape (e.g. `tags` is not a list)
    InvalidMetadata(String),
    /// preferences.json is neither the legacy mapping nor the grouped list
    InvalidPreferences(String),
}

impl std::fmt::Display for ThemeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeError::MissingRoot(msg) => write!(f, "{msg} directory not found"),
            ThemeError::MissingMetadata(msg) => write!(f, "theme.json not found in {msg}"),
            ThemeError::IoError(msg) => write!(f, "IO error: {msg}"),
            ThemeError::ParseError(msg) => write!(f, "Invalid JSON in {msg}"),
            ThemeError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ThemeError::InvalidMetadata(msg) => write!(f, "Invalid metadata: {msg}"),
            ThemeError::InvalidPreferences(msg) => write!(f, "Invalid preferences: {msg}"),
        }
    }
}

impl std::error::Error for ThemeError {}

impl ThemeError {
    /// Log this error at the level its category calls for: a missing
    /// metadata file is a warning, anything else is an error.
    pub fn log(&self, theme_id: &str) {
        match self {
            ThemeError::MissingMetadata(_) => tracing::warn!("Warning: {}", self),
            ThemeError::ParseError(_) => tracing::error!("Error: {}", self),
            _ => tracing::error!("Unexpected error processing theme {}: {}", theme_id, self),
        }
    }
}

/// A theme a job could not process, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTheme {
    pub id: String,
    pub reason: String,
}

impl SkippedTheme {
    pub fn new(id: &str, error: &ThemeError) -> Self {
        Self {
            id: id.to_string(),
            reason: error.to_string(),
        }
    }
}

/// Contents of a theme's `theme.json`.
///
/// Only `version` and `tags` are interpreted; every other field is carried
/// through untouched and in its original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ThemeMetadata(Map<String, Value>);

impl ThemeMetadata {
    pub const VERSION_KEY: &'static str = "version";
    pub const TAGS_KEY: &'static str = "tags";

    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(format!("expected an object, found {}", kind_name(&other))),
        }
    }

    pub fn version(&self) -> Option<&Value> {
        self.0.get(Self::VERSION_KEY)
    }

    /// Set `version` if the field is absent. Returns true when it was added.
    pub fn ensure_version(&mut self, default_version: &str) -> bool {
        if self.0.contains_key(Self::VERSION_KEY) {
            return false;
        }
        self.0.insert(
            Self::VERSION_KEY.to_string(),
            Value::String(default_version.to_string()),
        );
        true
    }

    /// Tags currently present, skipping any non-string entries.
    pub fn tags(&self) -> Vec<&str> {
        match self.0.get(Self::TAGS_KEY) {
            Some(Value::Array(tags)) => tags.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().contains(&tag)
    }

    /// Append `tag` unless already present, creating the list when missing.
    /// Returns true when the tag was appended.
    pub fn ensure_tag(&mut self, tag: &str) -> Result<bool, ThemeError> {
        let tags = self
            .0
            .entry(Self::TAGS_KEY)
            .or_insert_with(|| Value::Array(Vec::new()));

        match tags {
            Value::Array(tags) => {
                if tags.iter().any(|t| t.as_str() == Some(tag)) {
                    return Ok(false);
                }
                tags.push(Value::String(tag.to_string()));
                Ok(true)
            }
            other => Err(ThemeError::InvalidMetadata(format!(
                "`tags` must be a list, found {}",
                kind_name(other)
            ))),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Contents of a theme's `colors.json`: role keys to CSS color values plus
/// the optional `isDarkMode` flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ColorPalette(Map<String, Value>);

impl ColorPalette {
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(format!("expected an object, found {}", kind_name(&other))),
        }
    }

    /// Only a literal `true` counts as dark.
    pub fn is_dark_mode(&self) -> bool {
        matches!(self.0.get(DARK_MODE_KEY), Some(Value::Bool(true)))
    }

    /// Color entries in file order, without the dark-mode flag.
    pub fn colors(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0
            .iter()
            .filter(|(key, _)| key.as_str() != DARK_MODE_KEY)
            .map(|(key, value)| (key.as_str(), value))
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
