//! Generate JSON Schemas for the theme files and the tool configuration
//!
//! This binary generates JSON Schemas using schemars and prints them as one
//! object keyed by file name, for editors that validate theme folders.
//!
//! Usage:
//!   cargo run --features dev-bins --bin generate_schema > schemas.json

use schemars::schema_for;
use theme_catalog::catalog::Catalog;
use theme_catalog::config::CatalogConfig;
use theme_catalog::preferences::Preferences;
use theme_catalog::theme::{ColorPalette, ThemeMetadata};

fn main() {
    let config = schema_for!(CatalogConfig);
    let metadata = schema_for!(ThemeMetadata);
    let palette = schema_for!(ColorPalette);
    let preferences = schema_for!(Preferences);
    let catalog = schema_for!(Catalog);

    let schemas = serde_json::json!({
        "theme-catalog.json": config,
        "theme.json": metadata,
        "colors.json": palette,
        "preferences.json": preferences,
        "themes.json": catalog,
    });

    let output = serde_json::to_string_pretty(&schemas).expect("Failed to serialize schema");
    println!("{}", output);
}
