// Themes tree fixtures

use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use theme_catalog::config::CatalogConfig;
use theme_catalog::json_io;

/// A temporary project root holding `themes/` and `themes.json`.
pub struct ThemesFixture {
    _temp_dir: TempDir,
    pub root: PathBuf,
}

impl ThemesFixture {
    /// Create an empty project with an empty themes directory
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().to_path_buf();
        fs::create_dir_all(root.join("themes")).unwrap();

        ThemesFixture {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Create a project without a themes directory
    pub fn without_themes_dir() -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().to_path_buf();
        ThemesFixture {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn themes_dir(&self) -> PathBuf {
        self.root.join("themes")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join("themes.json")
    }

    pub fn theme_dir(&self, id: &str) -> PathBuf {
        self.themes_dir().join(id)
    }

    /// Write `contents` to `themes/<id>/<file>`, creating the folder as needed
    pub fn write(&self, id: &str, file: &str, contents: &str) -> &Self {
        let dir = self.theme_dir(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), contents).unwrap();
        self
    }

    pub fn read(&self, id: &str, file: &str) -> String {
        fs::read_to_string(self.theme_dir(id).join(file)).unwrap()
    }

    pub fn read_json(&self, id: &str, file: &str) -> Value {
        json_io::read_json(&self.theme_dir(id).join(file)).unwrap()
    }

    pub fn catalog(&self) -> Value {
        json_io::read_json(&self.catalog_path()).unwrap()
    }

    pub fn exists(&self, id: &str, file: &str) -> bool {
        self.theme_dir(id).join(file).exists()
    }

    /// Config pointing at this fixture's themes and catalog
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig {
            themes_dir: self.themes_dir(),
            catalog_file: self.catalog_path(),
            ..Default::default()
        }
    }
}
