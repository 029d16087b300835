//! Theme folders on disk and the records stored in them.
//!
//! This module is split into:
//! - `types`: JSON-backed records (`ThemeMetadata`, `ColorPalette`) and `ThemeError`
//! - `folder`: the per-theme file layout and themes root listing
//!
//! # Example
//!
//! ```ignore
//! use theme_catalog::theme::{list_theme_folders, ThemeFolder};
//!
//! for folder in list_theme_folders(Path::new("themes"))? {
//!     let metadata = folder.load_metadata()?;
//!     println!("{}: {:?}", folder.id(), metadata.version());
//! }
//! ```

mod folder;
mod types;

pub use folder::*;
pub use types::*;
