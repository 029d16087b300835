//! Color palette to stylesheet translation.
//!
//! Each recognized palette key maps to one CSS custom property. The generated
//! `chrome.css` sets every mapped property inside `:root` with `!important`.

use serde_json::Value;
use std::path::Path;

use crate::theme::{ColorPalette, ThemeError, ThemeFolder};

/// Header line written at the top of every generated stylesheet.
pub const GENERATED_HEADER: &str = "/* This is an auto-generated color theme. */";

/// Semantic color roles a palette may define.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Primary,
    Secondary,
    Tertiary,
    Border,
    DialogBackground,
    Accent,
}

impl ColorRole {
    pub const ALL: [ColorRole; 6] = [
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Tertiary,
        ColorRole::Border,
        ColorRole::DialogBackground,
        ColorRole::Accent,
    ];

    /// Key used for this role in colors.json.
    pub fn palette_key(self) -> &'static str {
        match self {
            ColorRole::Primary => "primaryColor",
            ColorRole::Secondary => "secondaryColor",
            ColorRole::Tertiary => "tertiaryColor",
            ColorRole::Border => "colorsBorder",
            ColorRole::DialogBackground => "dialogBg",
            ColorRole::Accent => "accentColor",
        }
    }

    /// CSS custom property this role is written to.
    pub fn css_variable(self) -> &'static str {
        match self {
            ColorRole::Primary => "--zen-colors-primary",
            ColorRole::Secondary => "--zen-colors-secondary",
            ColorRole::Tertiary => "--zen-colors-tertiary",
            ColorRole::Border => "--zen-colors-border",
            ColorRole::DialogBackground => "--zen-dialog-background",
            ColorRole::Accent => "--zen-primary-color",
        }
    }

    pub fn from_palette_key(key: &str) -> Result<Self, CssError> {
        Self::ALL
            .into_iter()
            .find(|role| role.palette_key() == key)
            .ok_or_else(|| CssError::UnknownColor(key.to_string()))
    }
}

/// Translation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssError {
    UnknownColor(String),
}

impl std::fmt::Display for CssError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CssError::UnknownColor(key) => write!(f, "Unknown color: {key}"),
        }
    }
}

impl std::error::Error for CssError {}

/// Map a palette key to its CSS custom property name.
pub fn css_variable_for(key: &str) -> Result<&'static str, CssError> {
    ColorRole::from_palette_key(key).map(ColorRole::css_variable)
}

/// A rendered stylesheet plus the palette keys that had no mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub text: String,
    pub declarations: usize,
    pub skipped: Vec<String>,
}

/// Render the stylesheet for `palette`. Declarations follow palette order.
///
/// Keys without a mapping are left out and listed in `skipped`; reporting
/// them is up to the caller, which knows the theme they belong to.
pub fn render_stylesheet(palette: &ColorPalette) -> Stylesheet {
    let mut text = String::new();
    text.push_str(GENERATED_HEADER);
    text.push('\n');
    text.push_str(":root {\n");

    let mut declarations = 0;
    let mut skipped = Vec::new();
    for (key, value) in palette.colors() {
        match css_variable_for(key) {
            Ok(variable) => {
                text.push_str(&format!(
                    "    {}: {} !important;\n",
                    variable,
                    css_value(value)
                ));
                declarations += 1;
            }
            Err(_) => skipped.push(key.to_string()),
        }
    }

    text.push_str("}\n");
    Stylesheet {
        text,
        declarations,
        skipped,
    }
}

fn css_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Regenerate chrome.css from colors.json for one theme.
///
/// Returns the parsed palette so the caller can derive tags from it.
pub fn write_stylesheet(folder: &ThemeFolder) -> Result<ColorPalette, ThemeError> {
    let palette = folder.load_palette()?;
    write_palette_stylesheet(folder, &palette)?;
    Ok(palette)
}

/// Write chrome.css for an already loaded palette.
pub fn write_palette_stylesheet(
    folder: &ThemeFolder,
    palette: &ColorPalette,
) -> Result<Stylesheet, ThemeError> {
    let stylesheet = render_stylesheet(palette);
    for key in &stylesheet.skipped {
        tracing::warn!(
            "{} in theme {}",
            CssError::UnknownColor(key.clone()),
            folder.id()
        );
    }

    write_text(&folder.stylesheet_path(), &stylesheet.text)?;
    tracing::debug!(
        "Wrote {} declarations to {}",
        stylesheet.declarations,
        folder.stylesheet_path().display()
    );
    Ok(stylesheet)
}

fn write_text(path: &Path, text: &str) -> Result<(), ThemeError> {
    std::fs::write(path, text)
        .map_err(|e| ThemeError::IoError(format!("{}: {}", path.display(), e)))
}
