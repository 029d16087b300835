use anyhow::{Context, Result as AnyhowResult};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use theme_catalog::catalog::CatalogRebuilder;
use theme_catalog::config::CatalogConfig;
use theme_catalog::preferences::{self, PreferenceMigration};
use theme_catalog::services::diagnostic_log::DiagnosticHandle;
use theme_catalog::services::tracing_setup;
use theme_catalog::{json_io, versions};
use tracing::Level;

/// Maintenance tools for a directory of theme folders
#[derive(Parser, Debug)]
#[command(name = "theme-catalog")]
#[command(about = "Normalize theme folders and rebuild the theme catalog", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Themes root directory (default: ./themes)
    #[arg(long, value_name = "DIR", global = true)]
    themes_dir: Option<PathBuf>,

    /// Catalog file to write (default: ./themes.json)
    #[arg(long, value_name = "PATH", global = true)]
    catalog: Option<PathBuf>,

    /// Path to configuration file (default: ./theme-catalog.json if present)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Only print warnings, errors and the summary
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Print per-file details
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Regenerate stylesheets, tag themes, migrate preferences and rebuild the catalog (default)
    Rebuild,
    /// Add the default version to every theme.json that lacks one
    AddVersions,
    /// Convert one legacy preferences.json into the grouped format
    ConvertPreferences {
        /// The preferences file to convert
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the converted preferences instead of rewriting the file
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the effective configuration as JSON and exit
    DumpConfig,
}

impl Args {
    fn log_level(&self) -> Level {
        if self.quiet {
            Level::WARN
        } else if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Layer CLI flags over the config file (or defaults).
    fn resolve_config(&self) -> AnyhowResult<CatalogConfig> {
        let mut config = match &self.config {
            Some(path) => CatalogConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => {
                let working_dir = std::env::current_dir().unwrap_or_default();
                CatalogConfig::load_for_working_dir(&working_dir)
                    .context("Failed to load config from working directory")?
            }
        };

        if let Some(themes_dir) = &self.themes_dir {
            config.themes_dir = themes_dir.clone();
        }
        if let Some(catalog) = &self.catalog {
            config.catalog_file = catalog.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn run_rebuild(config: CatalogConfig) -> AnyhowResult<()> {
    let report = CatalogRebuilder::new(config).run()?;

    println!("Rebuilt {} themes", report.processed_count());
    if !report.skipped.is_empty() {
        println!("Skipped {} themes", report.skipped.len());
    }
    println!("Rebuilt all themes!");
    Ok(())
}

fn run_add_versions(config: &CatalogConfig) -> AnyhowResult<()> {
    let report = versions::add_missing_versions(config.themes_path(), &config.default_version)?;

    println!(
        "Processing complete. Updated {} themes.",
        report.updated_count()
    );
    Ok(())
}

fn run_convert_preferences(file: &Path, dry_run: bool) -> AnyhowResult<()> {
    if dry_run {
        match preferences::plan_migration(file)? {
            PreferenceMigration::Converted(groups) => {
                print!("{}", json_io::to_pretty_string(&groups)?);
            }
            PreferenceMigration::AlreadyCurrent => {
                println!("{} already uses the grouped format", file.display());
            }
        }
        return Ok(());
    }

    match preferences::migrate_preferences_file(file)? {
        migration @ PreferenceMigration::Converted(_) => {
            println!(
                "Converted {} preferences in {}",
                migration.entry_count(),
                file.display()
            );
        }
        PreferenceMigration::AlreadyCurrent => {
            println!("{} already uses the grouped format", file.display());
        }
    }
    Ok(())
}

fn print_diagnostics(handle: Option<&DiagnosticHandle>) {
    let Some(handle) = handle else {
        return;
    };

    let notified = handle.drain();
    let counts = handle.counts();
    if notified > 0 || !counts.is_clean() {
        eprintln!(
            "Finished with {} warning(s) and {} error(s)",
            counts.warnings, counts.errors
        );
    }
}

fn main() -> AnyhowResult<()> {
    // Parse command-line arguments
    let args = Args::parse();

    let diagnostics = tracing_setup::init_global(args.log_level());
    let config = args.resolve_config()?;

    match args.command.unwrap_or(Command::Rebuild) {
        Command::Rebuild => run_rebuild(config)?,
        Command::AddVersions => run_add_versions(&config)?,
        Command::ConvertPreferences { file, dry_run } => run_convert_preferences(&file, dry_run)?,
        Command::DumpConfig => {
            let json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize config")?;
            println!("{}", json);
            return Ok(());
        }
    }

    print_diagnostics(diagnostics.as_ref());
    Ok(())
}
