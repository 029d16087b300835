// CLI tests - exit codes and summary lines of the theme-catalog binary

mod common;

use common::fixtures::ThemesFixture;
use serde_json::json;
use std::process::{Command, Output};

fn run(fx: &ThemesFixture, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_theme-catalog"))
        .args(args)
        .current_dir(&fx.root)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run theme-catalog")
}

#[test]
fn test_no_arguments_rebuilds_with_relative_paths() {
    let fx = ThemesFixture::new();
    fx.write("nord", "theme.json", "{}")
        .write("nord", "colors.json", r##"{"dialogBg": "#000"}"##);

    let output = run(&fx, &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rebuilt theme: nord"));
    assert!(stdout.contains("Rebuilt 1 themes"));
    assert!(stdout.trim_end().ends_with("Rebuilt all themes!"));
    assert_eq!(
        fx.catalog(),
        json!({"nord": {"version": "1.0.0", "tags": ["color scheme"]}})
    );
}

#[test]
fn test_missing_themes_dir_exits_nonzero() {
    let fx = ThemesFixture::without_themes_dir();

    let output = run(&fx, &["rebuild"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("directory not found"));

    let output = run(&fx, &["add-versions"]);
    assert!(!output.status.success());
}

#[test]
fn test_theme_failures_still_exit_zero() {
    let fx = ThemesFixture::new();
    fx.write("broken", "theme.json", "{");
    std::fs::create_dir_all(fx.theme_dir("empty")).unwrap();

    let output = run(&fx, &["rebuild"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid JSON"));
    assert!(stderr.contains("theme.json not found"));
    assert!(stderr.contains("Finished with 1 warning(s) and 1 error(s)"));
}

#[test]
fn test_add_versions_reports_count() {
    let fx = ThemesFixture::new();
    fx.write("a", "theme.json", "{}")
        .write("b", "theme.json", r#"{"version": "1.2.3"}"#);

    let output = run(&fx, &["add-versions"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout)
        .contains("Processing complete. Updated 1 themes."));
    assert_eq!(fx.read_json("a", "theme.json"), json!({"version": "1.0.0"}));
}

#[test]
fn test_convert_preferences_dry_run_leaves_file() {
    let fx = ThemesFixture::new();
    fx.write("p", "preferences.json", r#"{"p.flag": true}"#);
    let file = fx.theme_dir("p").join("preferences.json");

    let output = run(&fx, &["convert-preferences", "--dry-run", file.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("\"type\": \"boolean\""));
    assert_eq!(fx.read("p", "preferences.json"), r#"{"p.flag": true}"#);

    let output = run(&fx, &["convert-preferences", file.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(fx.read_json("p", "preferences.json").is_array());
}

#[test]
fn test_flags_override_config_file() {
    let fx = ThemesFixture::new();
    std::fs::write(
        fx.root.join("theme-catalog.json"),
        r#"{"default_version": "0.0.1", "catalog_file": "from-config.json"}"#,
    )
    .unwrap();
    fx.write("t", "theme.json", "{}");

    let output = run(&fx, &["--catalog", "out.json", "rebuild"]);
    assert!(output.status.success());
    assert!(fx.root.join("out.json").exists());
    assert!(!fx.root.join("from-config.json").exists());
    assert_eq!(fx.read_json("t", "theme.json"), json!({"version": "0.0.1"}));
}

#[test]
fn test_dump_config_prints_effective_config() {
    let fx = ThemesFixture::new();

    let output = run(&fx, &["dump-config", "--themes-dir", "elsewhere"]);
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["themes_dir"], json!("elsewhere"));
    assert_eq!(config["catalog_mode"], json!("rebuild"));
}
