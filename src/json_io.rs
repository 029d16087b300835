//! JSON file helpers shared by every job.
//!
//! Files are written with 4-space indentation and a trailing newline, and
//! object keys keep the order they were read in.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::path::Path;

use crate::theme::ThemeError;

/// Read and parse a JSON file into a raw value.
pub fn read_json(path: &Path) -> Result<Value, ThemeError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ThemeError::IoError(format!("{}: {}", path.display(), e)))?;

    serde_json::from_str(&content)
        .map_err(|e| ThemeError::ParseError(format!("{}: {}", path.display(), e)))
}

/// Serialize a value with 4-space indentation.
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T) -> Result<String, ThemeError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| ThemeError::SerializeError(e.to_string()))?;

    let mut text =
        String::from_utf8(buf).map_err(|e| ThemeError::SerializeError(e.to_string()))?;
    text.push('\n');
    Ok(text)
}

/// Serialize a value and write it to `path`, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ThemeError> {
    let text = to_pretty_string(value)?;
    std::fs::write(path, text)
        .map_err(|e| ThemeError::IoError(format!("{}: {}", path.display(), e)))
}
