//! Tracing subscriber setup
//!
//! Progress lines (INFO and below) go to stdout, warnings and errors go to
//! stderr, and a diagnostic layer tallies the latter for the final summary.

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use super::diagnostic_log::{DiagnosticHandle, DiagnosticLayer};

/// Initialize the global tracing subscriber for the command-line tools.
///
/// `default_level` applies when `RUST_LOG` is unset or invalid.
/// Returns the diagnostic handle if successful, None if a subscriber was
/// already installed.
pub fn init_global(default_level: Level) -> Option<DiagnosticHandle> {
    let (diagnostic_layer, diagnostic_handle) = super::diagnostic_log::create();

    let subscriber = build_subscriber(
        default_filter(default_level),
        std::io::stdout,
        std::io::stderr,
        Some(diagnostic_layer),
    );
    subscriber.try_init().ok()?;

    Some(diagnostic_handle)
}

/// Build the `RUST_LOG` filter, falling back to `default_level`.
pub fn default_filter(default_level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy()
}

/// Build a subscriber that splits output by level.
///
/// This is the core subscriber configuration shared between the binary and tests.
pub fn build_subscriber<O, E>(
    filter: EnvFilter,
    out: O,
    err: E,
    diagnostic_layer: Option<DiagnosticLayer>,
) -> impl tracing::Subscriber + Send + Sync
where
    O: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    E: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let out_layer = fmt::layer()
        .without_time()
        .with_target(false)
        .with_level(false)
        .with_ansi(false)
        .with_writer(out.with_min_level(Level::INFO));

    let err_layer = fmt::layer()
        .without_time()
        .with_target(false)
        .with_level(false)
        .with_ansi(false)
        .with_writer(err.with_max_level(Level::WARN));

    tracing_subscriber::registry()
        .with(filter)
        .with(out_layer)
        .with(err_layer)
        .with(diagnostic_layer)
}
